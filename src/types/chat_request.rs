use serde::{Deserialize, Serialize};

/// Body of the `POST /chat` request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatRequest {
    /// The raw user input. Never trimmed.
    pub message: String,
}

impl ChatRequest {
    /// Create a new `ChatRequest` carrying the given text.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
