//! The diagnostic channel.
//!
//! Failed exchanges never reach the conversation. They are handed to a
//! [`DiagnosticLogger`] instead, which decides where (if anywhere) they go.

use std::io::{self, Write};
use std::sync::Mutex;

use crate::Error;

/// A sink for request/response failures.
///
/// # Example
///
/// ```rust
/// use chatwidget::{DiagnosticLogger, Error};
/// use std::sync::Mutex;
///
/// #[derive(Default)]
/// struct Collecting(Mutex<Vec<String>>);
///
/// impl DiagnosticLogger for Collecting {
///     fn log_failure(&self, input: &str, error: &Error) {
///         self.0.lock().unwrap().push(format!("{input}: {error}"));
///     }
/// }
///
/// let logger = Collecting::default();
/// logger.log_failure("hi", &Error::connection("refused", None));
/// assert_eq!(logger.0.lock().unwrap().len(), 1);
/// ```
pub trait DiagnosticLogger: Send + Sync {
    /// Record that submitting `input` failed with `error`.
    fn log_failure(&self, input: &str, error: &Error);
}

/// Writes one line per failure to stderr.
#[derive(Debug, Default)]
pub struct StderrLogger {
    lock: Mutex<()>,
}

impl StderrLogger {
    /// Creates a new stderr logger.
    pub fn new() -> Self {
        Self::default()
    }
}

impl DiagnosticLogger for StderrLogger {
    fn log_failure(&self, input: &str, error: &Error) {
        let _guard = self.lock.lock();
        let mut stderr = io::stderr().lock();
        let _ = writeln!(stderr, "{}", format_failure(input, error));
    }
}

/// Discards every failure.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentLogger;

impl DiagnosticLogger for SilentLogger {
    fn log_failure(&self, _input: &str, _error: &Error) {}
}

/// Formats a failure the way [`StderrLogger`] prints it.
fn format_failure(input: &str, error: &Error) -> String {
    format!("chat request failed for {input:?}: {error}")
}
