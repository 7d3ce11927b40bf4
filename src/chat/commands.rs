//! Slash command parsing for the chat application.
//!
//! This module handles parsing of special commands that start with `/`,
//! allowing users to control the front end without sending messages to the
//! endpoint.

/// A parsed chat command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    /// Display help information.
    Help,

    /// Render the whole conversation again.
    History,

    /// Display session statistics.
    Stats,

    /// Exit the chat application.
    Quit,

    /// Report a parsing error back to the caller.
    Invalid(String),
}

/// Parses user input for slash commands.
///
/// Returns `Some(ChatCommand)` if the input is a command, or `None` if it
/// should be treated as a regular message.
///
/// # Examples
///
/// ```
/// # use chatwidget::chat::parse_command;
/// assert!(parse_command("/quit").is_some());
/// assert!(parse_command("/history").is_some());
/// assert!(parse_command("Hello there!").is_none());
/// ```
pub fn parse_command(input: &str) -> Option<ChatCommand> {
    let input = input.trim();

    if !input.starts_with('/') {
        return None;
    }

    let mut parts = input[1..].splitn(2, ' ');
    let command = parts.next()?.to_lowercase();
    let argument = parts.next().map(|s| s.trim()).filter(|s| !s.is_empty());

    let result = match (command.as_str(), argument) {
        ("help" | "?", None) => ChatCommand::Help,
        ("history", None) => ChatCommand::History,
        ("stats" | "status", None) => ChatCommand::Stats,
        ("quit" | "exit" | "q", None) => ChatCommand::Quit,
        ("help" | "?" | "history" | "stats" | "status" | "quit" | "exit" | "q", Some(_)) => {
            ChatCommand::Invalid(format!("/{command} takes no arguments"))
        }
        _ => ChatCommand::Invalid(format!("Unknown command: /{}", command)),
    };

    Some(result)
}

/// Returns help text describing available commands.
pub fn help_text() -> &'static str {
    r#"Available commands:
  /history               Show the conversation so far
  /stats                 Show session statistics
  /help                  Show this help message
  /quit                  Exit the chat
Anything else is sent to the chat endpoint."#
}
