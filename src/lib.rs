// Public modules
pub mod chat;
pub mod client;
pub mod conversation;
pub mod diagnostics;
pub mod error;
pub mod render;
pub mod types;
pub mod widget;

mod observability;

// Re-exports
pub use client::{ChatClient, DEFAULT_CHAT_URL, Endpoint};
pub use conversation::Conversation;
pub use diagnostics::{DiagnosticLogger, SilentLogger, StderrLogger};
pub use error::{Error, Result};
pub use observability::register_biometrics;
pub use render::{PlainTextRenderer, Renderer, format_message, render_conversation};
pub use types::*;
pub use widget::{ChatWidget, Key, PendingReply, ReplyOutcome, Submission, WidgetStats};
