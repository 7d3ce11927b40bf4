use biometrics::{Collector, Counter, Moments};

pub(crate) static CLIENT_REQUESTS: Counter = Counter::new("chatwidget.client.requests");
pub(crate) static CLIENT_REQUEST_ERRORS: Counter =
    Counter::new("chatwidget.client.request_errors");
pub(crate) static CLIENT_REQUEST_DURATION: Moments =
    Moments::new("chatwidget.client.request_duration_seconds");

pub(crate) static WIDGET_SUBMISSIONS: Counter = Counter::new("chatwidget.widget.submissions");
pub(crate) static WIDGET_SKIPPED: Counter = Counter::new("chatwidget.widget.skipped");
pub(crate) static WIDGET_REPLIES: Counter = Counter::new("chatwidget.widget.replies");
pub(crate) static WIDGET_FAILURES: Counter = Counter::new("chatwidget.widget.failures");

/// Register this crate's biometrics with the provided collector.
pub fn register_biometrics(collector: Collector) {
    collector.register_counter(&CLIENT_REQUESTS);
    collector.register_counter(&CLIENT_REQUEST_ERRORS);
    collector.register_moments(&CLIENT_REQUEST_DURATION);

    collector.register_counter(&WIDGET_SUBMISSIONS);
    collector.register_counter(&WIDGET_SKIPPED);
    collector.register_counter(&WIDGET_REPLIES);
    collector.register_counter(&WIDGET_FAILURES);
}
