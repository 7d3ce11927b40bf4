//! Terminal front end for the chat widget.
//!
//! This module provides the pieces the `chatwidget` binary is assembled
//! from:
//!
//! - [`config`]: CLI argument parsing and configuration
//! - [`commands`]: Slash command parsing and handling
//!
//! Each line the user enters is placed in the widget's input field and
//! submitted as an Enter key press. Slash commands never reach the endpoint.

mod commands;
mod config;

pub use crate::render::{PlainTextRenderer, Renderer};
pub use commands::{ChatCommand, help_text, parse_command};
pub use config::{ChatArgs, ChatConfig};
