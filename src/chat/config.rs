//! Configuration types for the chat application.
//!
//! This module provides CLI argument parsing via `arrrg` and configuration
//! structures for controlling the terminal front end.

use std::sync::Arc;
use std::time::Duration;

use arrrg_derive::CommandLine;

use crate::client::{ChatClient, DEFAULT_CHAT_URL};
use crate::diagnostics::{DiagnosticLogger, SilentLogger, StderrLogger};
use crate::error::Result;
use crate::widget::ChatWidget;

/// Command-line arguments for the chatwidget tool.
#[derive(CommandLine, Debug, Default, PartialEq, Eq)]
pub struct ChatArgs {
    /// Endpoint to post messages to.
    #[arrrg(optional, "Chat endpoint (default: http://localhost:5000/chat)", "URL")]
    pub url: Option<String>,

    /// Request timeout in seconds.
    #[arrrg(optional, "Request timeout in seconds (default: wait forever)", "SECONDS")]
    pub timeout_secs: Option<u64>,

    /// Disable ANSI colors and styles.
    #[arrrg(flag, "Disable ANSI colors/styles")]
    pub no_color: bool,

    /// Do not report failed requests on stderr.
    #[arrrg(flag, "Do not report failed requests on stderr")]
    pub quiet: bool,
}

/// Configuration for a chat session.
///
/// This struct holds the resolved configuration values after processing
/// command-line arguments with appropriate defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    /// The endpoint messages are posted to.
    pub url: String,

    /// Optional request timeout. `None` waits for the endpoint indefinitely.
    pub timeout: Option<Duration>,

    /// Whether to use ANSI colors and styles in output.
    pub use_color: bool,

    /// Whether failed requests are reported on stderr.
    pub report_failures: bool,
}

impl ChatConfig {
    /// Creates a new ChatConfig with default values.
    ///
    /// Defaults:
    /// - URL: http://localhost:5000/chat
    /// - Timeout: none
    /// - Color: enabled
    /// - Failures: reported on stderr
    pub fn new() -> Self {
        Self {
            url: DEFAULT_CHAT_URL.to_string(),
            timeout: None,
            use_color: true,
            report_failures: true,
        }
    }

    /// Sets the endpoint URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Disables ANSI color output.
    pub fn without_color(mut self) -> Self {
        self.use_color = false;
        self
    }

    /// Stops reporting failed requests on stderr.
    pub fn quiet(mut self) -> Self {
        self.report_failures = false;
        self
    }

    /// Builds the HTTP client this configuration describes.
    pub fn client(&self) -> Result<ChatClient> {
        ChatClient::with_options(Some(self.url.clone()), self.timeout)
    }

    /// Builds the diagnostic logger this configuration describes.
    pub fn logger(&self) -> Arc<dyn DiagnosticLogger> {
        if self.report_failures {
            Arc::new(StderrLogger::new())
        } else {
            Arc::new(SilentLogger)
        }
    }

    /// Builds a widget bound to the configured endpoint and logger.
    pub fn widget(&self) -> Result<ChatWidget> {
        let client = self.client()?;
        Ok(ChatWidget::with_logger(Arc::new(client), self.logger()))
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ChatArgs> for ChatConfig {
    fn from(args: ChatArgs) -> Self {
        ChatConfig {
            url: args.url.unwrap_or_else(|| DEFAULT_CHAT_URL.to_string()),
            timeout: args.timeout_secs.map(Duration::from_secs),
            use_color: !args.no_color,
            report_failures: !args.quiet,
        }
    }
}
