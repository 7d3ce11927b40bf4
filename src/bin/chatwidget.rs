//! Interactive chat client for a `/chat` reply endpoint.
//!
//! # Usage
//!
//! ```bash
//! # Talk to the endpoint on localhost:5000
//! chatwidget
//!
//! # Talk to another endpoint, giving up on requests after 30 seconds
//! chatwidget --url http://chat.internal:8080/chat --timeout-secs 30
//!
//! # Disable colors and keep failures off stderr
//! chatwidget --no-color --quiet
//! ```
//!
//! Every line entered is sent as one message. When a request fails, the
//! unsent text is offered again at the next prompt.
//!
//! # Commands
//!
//! - `/history` - Show the conversation so far
//! - `/stats` - Show session statistics
//! - `/help` - Show available commands
//! - `/quit` - Exit the application

use arrrg::CommandLine;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use chatwidget::chat::{
    ChatArgs, ChatCommand, ChatConfig, PlainTextRenderer, Renderer, help_text, parse_command,
};
use chatwidget::{ChatWidget, Key, Submission, render_conversation};

const PROMPT: &str = "You: ";

/// Main entry point for the chatwidget application.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (args, _) = ChatArgs::from_command_line_relaxed("chatwidget [OPTIONS]");
    let config = ChatConfig::from(args);

    let mut widget = config.widget()?;
    let mut renderer = PlainTextRenderer::with_color(config.use_color);
    let mut rl = DefaultEditor::new()?;

    println!("Chat (endpoint: {})", config.url);
    println!("Type /help for commands, /quit to exit\n");

    loop {
        let retained = widget.input().to_string();
        let readline = if retained.is_empty() {
            rl.readline(PROMPT)
        } else {
            rl.readline_with_initial(PROMPT, (retained.as_str(), ""))
        };

        match readline {
            Ok(line) => {
                if let Some(cmd) = parse_command(&line) {
                    match cmd {
                        ChatCommand::Quit => {
                            println!("Goodbye!");
                            break;
                        }
                        ChatCommand::Help => {
                            for line in help_text().lines() {
                                println!("    {}", line);
                            }
                        }
                        ChatCommand::History => {
                            if widget.conversation().is_empty() {
                                renderer.print_info("(no messages yet)");
                            } else {
                                render_conversation(&mut renderer, widget.conversation());
                            }
                        }
                        ChatCommand::Stats => print_stats(&widget, &config),
                        ChatCommand::Invalid(message) => renderer.print_error(&message),
                    }
                    continue;
                }

                if !line.trim().is_empty() {
                    let _ = rl.add_history_entry(line.as_str());
                }

                // The prompt already echoed the user's line.
                widget.set_input(line);
                match widget.submit_on_enter(Key::Enter).await {
                    Submission::Replied(message) => renderer.render_message(&message),
                    Submission::Failed(_) | Submission::Skipped | Submission::Ignored => {}
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C at prompt - discard the line being edited
                widget.set_input("");
                println!();
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("\nGoodbye!");
                break;
            }
            Err(err) => {
                renderer.print_error(&format!("Input error: {}", err));
                break;
            }
        }
    }

    Ok(())
}

fn print_stats(widget: &ChatWidget, config: &ChatConfig) {
    let stats = widget.stats();
    println!("    Session Statistics:");
    println!("      Endpoint: {}", config.url);
    match config.timeout {
        Some(timeout) => println!("      Timeout: {}s", timeout.as_secs()),
        None => println!("      Timeout: (none)"),
    }
    println!("      Messages: {}", stats.message_count);
    println!(
        "      Sent / replied: {} / {}",
        stats.user_messages, stats.bot_messages
    );
    println!("      Failed requests: {}", stats.failed_submissions);
}
