//! The chat widget: an input field, a conversation and a send action.
//!
//! [`ChatWidget::submit`] is the whole behavior in one call. It is also
//! available in two halves, [`ChatWidget::begin_submit`] and
//! [`ChatWidget::finish_submit`], so that a front end can keep several
//! requests in flight while the widget stays owned by a single task.
//! Replies are appended in the order their outcomes are finished, which is
//! not necessarily the order the requests were submitted in.

use std::sync::Arc;

use crate::client::Endpoint;
use crate::conversation::Conversation;
use crate::diagnostics::{DiagnosticLogger, StderrLogger};
use crate::error::{Error, Result};
use crate::observability::{WIDGET_FAILURES, WIDGET_REPLIES, WIDGET_SKIPPED, WIDGET_SUBMISSIONS};
use crate::types::{Author, ChatRequest, Message, Reply};

/// A key press delivered to the widget's input field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// The Enter / Return key.
    Enter,
    /// A printable character.
    Char(char),
    /// Backspace.
    Backspace,
    /// Anything else.
    Other,
}

/// What a submit attempt did.
#[derive(Debug, Clone)]
pub enum Submission {
    /// The trimmed input was empty; nothing was appended or sent.
    Skipped,
    /// The key was not Enter; nothing happened.
    Ignored,
    /// The endpoint replied and the bot message was appended.
    Replied(Message),
    /// The exchange failed; the failure went to the diagnostic channel.
    Failed(Error),
}

impl Submission {
    /// Returns true if a bot message was appended.
    pub fn is_replied(&self) -> bool {
        matches!(self, Submission::Replied(_))
    }

    /// Returns true if the exchange failed.
    pub fn is_failed(&self) -> bool {
        matches!(self, Submission::Failed(_))
    }
}

/// A request that has been recorded in the conversation but not yet sent.
///
/// Resolving it performs the network exchange. It owns everything it needs,
/// so it can be moved to another task.
pub struct PendingReply {
    endpoint: Arc<dyn Endpoint>,
    request: ChatRequest,
}

impl PendingReply {
    /// The request that will be sent.
    pub fn request(&self) -> &ChatRequest {
        &self.request
    }

    /// Send the request and wait for the endpoint, however long it takes.
    pub async fn resolve(self) -> ReplyOutcome {
        let result = self.endpoint.reply(&self.request).await;
        ReplyOutcome {
            request: self.request,
            result,
        }
    }
}

/// The result of a resolved [`PendingReply`], ready to be applied.
#[derive(Debug, Clone)]
pub struct ReplyOutcome {
    request: ChatRequest,
    result: Result<Reply>,
}

impl ReplyOutcome {
    /// The request this outcome answers.
    pub fn request(&self) -> &ChatRequest {
        &self.request
    }

    /// The reply, or why there is none.
    pub fn result(&self) -> &Result<Reply> {
        &self.result
    }
}

/// Counts describing a widget's session so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetStats {
    /// Messages in the conversation.
    pub message_count: usize,
    /// Messages the user submitted.
    pub user_messages: usize,
    /// Replies appended.
    pub bot_messages: usize,
    /// Exchanges that failed.
    pub failed_submissions: u64,
}

/// Input field, conversation and send action bound to an [`Endpoint`].
pub struct ChatWidget {
    endpoint: Arc<dyn Endpoint>,
    logger: Arc<dyn DiagnosticLogger>,
    conversation: Conversation,
    input: String,
    failed_submissions: u64,
}

impl ChatWidget {
    /// Creates a widget that reports failures to stderr.
    pub fn new(endpoint: Arc<dyn Endpoint>) -> Self {
        Self::with_logger(endpoint, Arc::new(StderrLogger::new()))
    }

    /// Creates a widget that reports failures to `logger`.
    pub fn with_logger(endpoint: Arc<dyn Endpoint>, logger: Arc<dyn DiagnosticLogger>) -> Self {
        Self {
            endpoint,
            logger,
            conversation: Conversation::new(),
            input: String::new(),
            failed_submissions: 0,
        }
    }

    /// The conversation so far.
    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Returns the current session statistics snapshot.
    pub fn stats(&self) -> WidgetStats {
        WidgetStats {
            message_count: self.conversation.len(),
            user_messages: self.conversation.count_by(Author::User),
            bot_messages: self.conversation.count_by(Author::Bot),
            failed_submissions: self.failed_submissions,
        }
    }

    /// The current contents of the input field.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Replaces the contents of the input field.
    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    /// Types a character into the input field.
    pub fn push_char(&mut self, c: char) {
        self.input.push(c);
    }

    /// Deletes the last character of the input field.
    pub fn pop_char(&mut self) -> Option<char> {
        self.input.pop()
    }

    /// Submits the current input and waits for the reply.
    pub async fn submit(&mut self) -> Submission {
        match self.begin_submit() {
            Some(pending) => {
                let outcome = pending.resolve().await;
                self.finish_submit(outcome)
            }
            None => Submission::Skipped,
        }
    }

    /// Submits when `key` is Enter; any other key is a no-op.
    pub async fn submit_on_enter(&mut self, key: Key) -> Submission {
        match key {
            Key::Enter => self.submit().await,
            _ => Submission::Ignored,
        }
    }

    /// Validates the input and appends the user's message.
    ///
    /// Returns `None` without touching anything when the trimmed input is
    /// empty. Otherwise the user message is in the conversation before this
    /// returns, and the raw input travels in the returned request. The input
    /// field is not cleared here.
    pub fn begin_submit(&mut self) -> Option<PendingReply> {
        if self.input.trim().is_empty() {
            WIDGET_SKIPPED.click();
            return None;
        }
        WIDGET_SUBMISSIONS.click();
        self.conversation.push(Message::user(self.input.clone()));
        Some(PendingReply {
            endpoint: Arc::clone(&self.endpoint),
            request: ChatRequest::new(self.input.clone()),
        })
    }

    /// Applies a resolved reply.
    ///
    /// On success the bot message is appended and the input field cleared.
    /// On failure the error goes to the diagnostic logger and nothing else
    /// changes.
    pub fn finish_submit(&mut self, outcome: ReplyOutcome) -> Submission {
        match outcome.result {
            Ok(reply) => {
                WIDGET_REPLIES.click();
                let message = self.conversation.push(Message::bot(reply.into_text())).clone();
                self.input.clear();
                Submission::Replied(message)
            }
            Err(err) => {
                WIDGET_FAILURES.click();
                self.failed_submissions = self.failed_submissions.saturating_add(1);
                self.logger.log_failure(&outcome.request.message, &err);
                Submission::Failed(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;

    use serde_json::{Value, json};
    use tokio::sync::oneshot;
    use tokio_test::{assert_pending, assert_ready, task};

    use super::*;

    /// Answers each exchange with the next scripted result.
    #[derive(Default)]
    struct ScriptedEndpoint {
        script: Mutex<VecDeque<Result<Vec<Value>>>>,
        seen: Mutex<Vec<ChatRequest>>,
    }

    impl ScriptedEndpoint {
        fn new(script: Vec<Result<Vec<Value>>>) -> Arc<Self> {
            Arc::new(Self {
                script: Mutex::new(script.into()),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> usize {
            self.seen.lock().unwrap().len()
        }

        fn requests(&self) -> Vec<ChatRequest> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl Endpoint for ScriptedEndpoint {
        async fn exchange(&self, request: &ChatRequest) -> Result<Vec<Value>> {
            self.seen.lock().unwrap().push(request.clone());
            self.script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(Error::connection("script exhausted", None)))
        }
    }

    /// Echoes the request back as the reply.
    struct EchoEndpoint;

    #[async_trait::async_trait]
    impl Endpoint for EchoEndpoint {
        async fn exchange(&self, request: &ChatRequest) -> Result<Vec<Value>> {
            tokio::task::yield_now().await;
            Ok(vec![json!({"text": format!("echo: {}", request.message)})])
        }
    }

    /// Holds each reply until the test releases it.
    struct GatedEndpoint {
        gates: Mutex<HashMap<String, oneshot::Receiver<Vec<Value>>>>,
    }

    impl GatedEndpoint {
        fn new(gates: Vec<(&str, oneshot::Receiver<Vec<Value>>)>) -> Arc<Self> {
            let gates = gates
                .into_iter()
                .map(|(message, gate)| (message.to_string(), gate))
                .collect();
            Arc::new(Self {
                gates: Mutex::new(gates),
            })
        }
    }

    #[async_trait::async_trait]
    impl Endpoint for GatedEndpoint {
        async fn exchange(&self, request: &ChatRequest) -> Result<Vec<Value>> {
            let gate = self.gates.lock().unwrap().remove(&request.message);
            match gate {
                Some(gate) => gate
                    .await
                    .map_err(|_| Error::connection("gate dropped", None)),
                None => Err(Error::connection("no gate for request", None)),
            }
        }
    }

    #[derive(Default)]
    struct RecordingLogger {
        failures: Mutex<Vec<String>>,
    }

    impl DiagnosticLogger for RecordingLogger {
        fn log_failure(&self, input: &str, error: &Error) {
            self.failures
                .lock()
                .unwrap()
                .push(format!("{input}|{error}"));
        }
    }

    fn widget_with(endpoint: Arc<dyn Endpoint>) -> (ChatWidget, Arc<RecordingLogger>) {
        let logger = Arc::new(RecordingLogger::default());
        let widget = ChatWidget::with_logger(endpoint, logger.clone());
        (widget, logger)
    }

    fn texts(widget: &ChatWidget) -> Vec<(Author, String)> {
        widget
            .conversation()
            .iter()
            .map(|m| (m.author(), m.text().to_string()))
            .collect()
    }

    #[test]
    fn begin_submit_appends_before_network() {
        let endpoint = ScriptedEndpoint::new(vec![Ok(vec![json!({"text": "hello"})])]);
        let (mut widget, _) = widget_with(endpoint.clone());
        widget.set_input("hi");

        let pending = widget.begin_submit().expect("non-empty input");
        assert_eq!(widget.conversation().len(), 1);
        assert_eq!(widget.conversation().last(), Some(&Message::user("hi")));
        assert_eq!(endpoint.calls(), 0);
        assert_eq!(pending.request().message, "hi");
        assert_eq!(widget.input(), "hi");
    }

    #[tokio::test]
    async fn empty_and_whitespace_input_is_skipped() {
        let endpoint = ScriptedEndpoint::new(Vec::new());
        let (mut widget, logger) = widget_with(endpoint.clone());

        for input in ["", " ", "\t\n  "] {
            widget.set_input(input);
            assert!(matches!(widget.submit().await, Submission::Skipped));
            assert_eq!(widget.input(), input);
        }
        assert!(widget.conversation().is_empty());
        assert_eq!(endpoint.calls(), 0);
        assert!(logger.failures.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn successful_reply_is_appended_and_input_cleared() {
        let endpoint = ScriptedEndpoint::new(vec![Ok(vec![json!({"text": "hello"})])]);
        let (mut widget, _) = widget_with(endpoint.clone());
        widget.set_input("hi");

        let submission = widget.submit().await;
        assert!(matches!(&submission, Submission::Replied(m) if m.text() == "hello"));
        assert_eq!(
            texts(&widget),
            vec![
                (Author::User, "hi".to_string()),
                (Author::Bot, "hello".to_string())
            ]
        );
        assert_eq!(widget.input(), "");
    }

    #[tokio::test]
    async fn only_first_reply_element_is_rendered() {
        let endpoint = ScriptedEndpoint::new(vec![Ok(vec![
            json!({"text": "hi"}),
            json!({"text": "ignored"}),
        ])]);
        let (mut widget, _) = widget_with(endpoint);
        widget.set_input("hey");

        widget.submit().await;
        assert_eq!(widget.conversation().count_by(Author::Bot), 1);
        assert_eq!(widget.conversation().last(), Some(&Message::bot("hi")));
    }

    #[tokio::test]
    async fn raw_input_is_sent_untrimmed() {
        let endpoint = ScriptedEndpoint::new(vec![Ok(vec![json!({"text": "ok"})])]);
        let (mut widget, _) = widget_with(endpoint.clone());
        widget.set_input("  spaced out  ");

        widget.submit().await;
        assert_eq!(endpoint.requests(), vec![ChatRequest::new("  spaced out  ")]);
        assert_eq!(
            widget.conversation().messages()[0],
            Message::user("  spaced out  ")
        );
    }

    #[tokio::test]
    async fn network_failure_keeps_input_and_logs() {
        let endpoint =
            ScriptedEndpoint::new(vec![Err(Error::connection("connection refused", None))]);
        let (mut widget, logger) = widget_with(endpoint.clone());
        widget.set_input("hi");

        let submission = widget.submit().await;
        assert!(submission.is_failed());
        assert_eq!(texts(&widget), vec![(Author::User, "hi".to_string())]);
        assert_eq!(widget.input(), "hi");
        assert_eq!(endpoint.calls(), 1);

        let failures = logger.failures.lock().unwrap();
        assert_eq!(failures.len(), 1);
        assert!(failures[0].starts_with("hi|Connection error"));
    }

    #[tokio::test]
    async fn malformed_reply_is_a_failure() {
        let endpoint = ScriptedEndpoint::new(vec![Ok(Vec::new()), Ok(vec![json!({})])]);
        let (mut widget, logger) = widget_with(endpoint);
        widget.set_input("first");
        assert!(widget.submit().await.is_failed());
        assert!(widget.submit().await.is_failed());

        assert_eq!(widget.conversation().count_by(Author::Bot), 0);
        assert_eq!(widget.conversation().count_by(Author::User), 2);
        assert_eq!(widget.input(), "first");
        assert_eq!(logger.failures.lock().unwrap().len(), 2);
        assert_eq!(
            widget.stats(),
            WidgetStats {
                message_count: 2,
                user_messages: 2,
                bot_messages: 0,
                failed_submissions: 2,
            }
        );
    }

    #[tokio::test]
    async fn failure_does_not_retry() {
        let endpoint = ScriptedEndpoint::new(vec![
            Err(Error::api(500, "boom")),
            Ok(vec![json!({"text": "unused"})]),
        ]);
        let (mut widget, _) = widget_with(endpoint.clone());
        widget.set_input("hi");

        widget.submit().await;
        assert_eq!(endpoint.calls(), 1);
    }

    #[tokio::test]
    async fn enter_submits_other_keys_do_not() {
        let endpoint = ScriptedEndpoint::new(vec![Ok(vec![json!({"text": "hello"})])]);
        let (mut widget, _) = widget_with(endpoint.clone());
        widget.set_input("hi");

        for key in [Key::Char('x'), Key::Backspace, Key::Other] {
            assert!(matches!(
                widget.submit_on_enter(key).await,
                Submission::Ignored
            ));
        }
        assert!(widget.conversation().is_empty());
        assert_eq!(endpoint.calls(), 0);

        assert!(widget.submit_on_enter(Key::Enter).await.is_replied());
        assert_eq!(widget.conversation().len(), 2);
        assert_eq!(endpoint.calls(), 1);
    }

    #[tokio::test]
    async fn enter_on_blank_input_is_skipped() {
        let endpoint = ScriptedEndpoint::new(Vec::new());
        let (mut widget, _) = widget_with(endpoint.clone());
        widget.set_input("   ");
        assert!(matches!(
            widget.submit_on_enter(Key::Enter).await,
            Submission::Skipped
        ));
        assert_eq!(endpoint.calls(), 0);
    }

    #[test]
    fn typing_edits_the_input() {
        let (mut widget, _) = widget_with(Arc::new(EchoEndpoint));
        widget.push_char('h');
        widget.push_char('i');
        widget.push_char('!');
        assert_eq!(widget.pop_char(), Some('!'));
        assert_eq!(widget.input(), "hi");
    }

    #[test]
    fn later_submission_can_reply_first() {
        let (first_tx, first_rx) = oneshot::channel();
        let (second_tx, second_rx) = oneshot::channel();
        let endpoint = GatedEndpoint::new(vec![("first", first_rx), ("second", second_rx)]);
        let (mut widget, _) = widget_with(endpoint);

        widget.set_input("first");
        let first = widget.begin_submit().unwrap();
        widget.set_input("second");
        let second = widget.begin_submit().unwrap();

        let mut first = task::spawn(first.resolve());
        let mut second = task::spawn(second.resolve());
        assert_pending!(first.poll());
        assert_pending!(second.poll());

        second_tx.send(vec![json!({"text": "reply two"})]).unwrap();
        assert!(second.is_woken());
        let second_outcome = assert_ready!(second.poll());
        widget.finish_submit(second_outcome);
        assert_pending!(first.poll());

        first_tx.send(vec![json!({"text": "reply one"})]).unwrap();
        let first_outcome = assert_ready!(first.poll());
        widget.finish_submit(first_outcome);

        assert_eq!(
            texts(&widget),
            vec![
                (Author::User, "first".to_string()),
                (Author::User, "second".to_string()),
                (Author::Bot, "reply two".to_string()),
                (Author::Bot, "reply one".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn odd_trailing_elements_still_reply() {
        let bodies = [
            vec![json!({"text": "hi"}), json!({"text": 42})],
            vec![json!({"text": "hi"}), json!("plain")],
            vec![json!({"text": "hi", "recipient_id": 7})],
        ];
        for body in bodies {
            let endpoint = ScriptedEndpoint::new(vec![Ok(body)]);
            let (mut widget, logger) = widget_with(endpoint);
            widget.set_input("hello");

            assert!(widget.submit().await.is_replied());
            assert_eq!(widget.conversation().last(), Some(&Message::bot("hi")));
            assert_eq!(widget.input(), "");
            assert!(logger.failures.lock().unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn pending_replies_resolve_concurrently() {
        let (mut widget, _) = widget_with(Arc::new(EchoEndpoint));
        widget.set_input("a");
        let a = widget.begin_submit().unwrap();
        widget.set_input("b");
        let b = widget.begin_submit().unwrap();

        let (a, b) = futures::future::join(
            tokio::spawn(a.resolve()),
            tokio::spawn(b.resolve()),
        )
        .await;
        let a = a.unwrap();
        let b = b.unwrap();
        assert_eq!(a.request().message, "a");
        assert!(matches!(b.result(), Ok(reply) if reply.text() == "echo: b"));

        widget.finish_submit(a);
        widget.finish_submit(b);
        assert_eq!(widget.conversation().len(), 4);
        assert_eq!(widget.input(), "");
    }
}
