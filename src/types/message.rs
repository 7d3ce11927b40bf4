use std::fmt;

use serde::{Deserialize, Serialize};

/// Who wrote a message in the conversation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Author {
    /// Text the user typed and submitted.
    User,

    /// Text extracted from the endpoint's reply.
    Bot,
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Author::User => write!(f, "user"),
            Author::Bot => write!(f, "bot"),
        }
    }
}

/// A single entry in the conversation.
///
/// Messages are immutable once created: the fields are private and only
/// exposed through accessors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    author: Author,
    text: String,
}

impl Message {
    /// Create a new `Message` with the given author and text.
    pub fn new(author: Author, text: impl Into<String>) -> Self {
        Self {
            author,
            text: text.into(),
        }
    }

    /// Create a new user-authored `Message`.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Author::User, text)
    }

    /// Create a new bot-authored `Message`.
    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(Author::Bot, text)
    }

    /// The author of this message.
    pub fn author(&self) -> Author {
        self.author
    }

    /// The text of this message, exactly as submitted or received.
    pub fn text(&self) -> &str {
        &self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_author() {
        assert_eq!(Message::user("hi").author(), Author::User);
        assert_eq!(Message::bot("hello").author(), Author::Bot);
    }

    #[test]
    fn text_is_kept_verbatim() {
        let message = Message::user("  padded  ");
        assert_eq!(message.text(), "  padded  ");
    }

    #[test]
    fn author_display() {
        assert_eq!(Author::User.to_string(), "user");
        assert_eq!(Author::Bot.to_string(), "bot");
    }
}
