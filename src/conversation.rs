//! The conversation: an ordered, append-only list of messages.
//!
//! This is the source of truth for what the user sees. Renderers project it;
//! nothing else holds message state.

use crate::types::{Author, Message};

/// Ordered, append-only sequence of [`Message`]s for one session.
///
/// Messages are kept in the order they were appended. There is no removal
/// and no reordering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    /// Creates an empty conversation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message and returns a reference to it.
    pub fn push(&mut self, message: Message) -> &Message {
        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }

    /// Returns the number of messages in the conversation.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns true if nothing has been appended yet.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Returns the messages in chronological order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Iterates over the messages in chronological order.
    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.messages.iter()
    }

    /// Returns the most recently appended message.
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Counts the messages written by `author`.
    pub fn count_by(&self, author: Author) -> usize {
        self.messages
            .iter()
            .filter(|message| message.author() == author)
            .count()
    }
}

impl<'a> IntoIterator for &'a Conversation {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
