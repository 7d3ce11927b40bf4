//! Output rendering for the conversation.
//!
//! The view is a projection of the [`Conversation`]: renderers are handed
//! messages and never keep their own copy of the history.

use std::io::{self, Stdout, Write};

use crate::conversation::Conversation;
use crate::types::{Author, Message};

/// ANSI escape code for cyan text (used for the user's label).
const ANSI_CYAN: &str = "\x1b[36m";

/// ANSI escape code for green text (used for the bot's label).
const ANSI_GREEN: &str = "\x1b[32m";

/// ANSI escape code for dim text (used for informational lines).
const ANSI_DIM: &str = "\x1b[2m";

/// ANSI escape code for red text (used for errors).
const ANSI_RED: &str = "\x1b[31m";

/// ANSI escape code to reset all styling.
const ANSI_RESET: &str = "\x1b[0m";

/// Trait for rendering the conversation.
pub trait Renderer: Send {
    /// Render one message.
    fn render_message(&mut self, message: &Message);

    /// Print an informational line that is not part of the conversation.
    fn print_info(&mut self, info: &str);

    /// Print an error that is not part of the conversation.
    fn print_error(&mut self, error: &str);
}

/// Render every message of `conversation`, oldest first.
pub fn render_conversation(renderer: &mut dyn Renderer, conversation: &Conversation) {
    for message in conversation {
        renderer.render_message(message);
    }
}

/// The label shown in front of a message.
fn label(author: Author) -> &'static str {
    match author {
        Author::User => "You",
        Author::Bot => "Bot",
    }
}

/// Format a message as a single line of output, without a trailing newline.
pub fn format_message(message: &Message, use_color: bool) -> String {
    let label = label(message.author());
    if use_color {
        let color = match message.author() {
            Author::User => ANSI_CYAN,
            Author::Bot => ANSI_GREEN,
        };
        format!("{color}{label}:{ANSI_RESET} {}", message.text())
    } else {
        format!("{label}: {}", message.text())
    }
}

/// Plain text renderer with optional ANSI styling.
pub struct PlainTextRenderer<W: Write + Send = Stdout> {
    out: W,
    use_color: bool,
}

impl PlainTextRenderer<Stdout> {
    /// Creates a new PlainTextRenderer on stdout with ANSI colors enabled.
    pub fn new() -> Self {
        Self::with_color(true)
    }

    /// Creates a new PlainTextRenderer on stdout with the given color setting.
    pub fn with_color(use_color: bool) -> Self {
        Self::with_writer(io::stdout(), use_color)
    }
}

impl<W: Write + Send> PlainTextRenderer<W> {
    /// Creates a renderer that writes to `out`.
    pub fn with_writer(out: W, use_color: bool) -> Self {
        Self { out, use_color }
    }

    /// Consumes the renderer, returning the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, line: &str) {
        let _ = writeln!(self.out, "{line}");
        let _ = self.out.flush();
    }
}

impl Default for PlainTextRenderer<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write + Send> Renderer for PlainTextRenderer<W> {
    fn render_message(&mut self, message: &Message) {
        let line = format_message(message, self.use_color);
        self.line(&line);
    }

    fn print_info(&mut self, info: &str) {
        if self.use_color {
            self.line(&format!("{ANSI_DIM}{info}{ANSI_RESET}"));
        } else {
            self.line(info);
        }
    }

    fn print_error(&mut self, error: &str) {
        if self.use_color {
            self.line(&format!("{ANSI_RED}Error: {error}{ANSI_RESET}"));
        } else {
            self.line(&format!("Error: {error}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(conversation: &Conversation, use_color: bool) -> String {
        let mut renderer = PlainTextRenderer::with_writer(Vec::new(), use_color);
        render_conversation(&mut renderer, conversation);
        String::from_utf8(renderer.into_inner()).unwrap()
    }

    #[test]
    fn renderer_default_has_color() {
        let renderer = PlainTextRenderer::new();
        assert!(renderer.use_color);
    }

    #[test]
    fn format_without_color() {
        assert_eq!(format_message(&Message::user("hi"), false), "You: hi");
        assert_eq!(format_message(&Message::bot("hello"), false), "Bot: hello");
    }

    #[test]
    fn format_with_color_wraps_label_only() {
        let line = format_message(&Message::bot("hello"), true);
        assert_eq!(line, "\x1b[32mBot:\x1b[0m hello");
    }

    #[test]
    fn projection_follows_conversation_order() {
        let mut conversation = Conversation::new();
        conversation.push(Message::user("hi"));
        conversation.push(Message::bot("hello"));
        assert_eq!(rendered(&conversation, false), "You: hi\nBot: hello\n");
    }

    #[test]
    fn empty_conversation_renders_nothing() {
        assert_eq!(rendered(&Conversation::new(), false), "");
    }

    #[test]
    fn info_and_error_lines() {
        let mut renderer = PlainTextRenderer::with_writer(Vec::new(), false);
        renderer.print_info("note");
        renderer.print_error("bad");
        let out = String::from_utf8(renderer.into_inner()).unwrap();
        assert_eq!(out, "note\nError: bad\n");
    }
}
