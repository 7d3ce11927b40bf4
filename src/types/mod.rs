// Public modules
pub mod chat_request;
pub mod message;
pub mod reply;

// Re-exports
pub use chat_request::ChatRequest;
pub use message::{Author, Message};
pub use reply::Reply;
