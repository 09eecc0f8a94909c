use super::error::{FailureKind, ForwardError};
use crate::utils::telemetry::ErrorReporter;

/// Report a final forwarding failure to Sentry with appropriate categorization
pub fn report_forward_failure(endpoint: &str, error: &ForwardError, attempts: usize) {
    let error_msg = format!(
        "Event forward failed after {} attempt(s): {}",
        attempts, error
    );

    let reporter = ErrorReporter::new("hec_forward")
        .add("attempts", attempts)
        .add("user_message", error.user_message());

    let reporter = match error {
        ForwardError::Network(e) => reporter.network_error(endpoint, e),
        ForwardError::Server { status, body } => {
            reporter.http_error(endpoint, *status, Some(body))
        }
        ForwardError::Rejected { status, code, text } => {
            reporter.rejection(endpoint, *status, *code, text.as_deref())
        }
        _ => reporter
            .add("error_type", error.error_category().as_str())
            .add("endpoint", endpoint)
            .add("error_message", error.to_string()),
    };

    let reporter = reporter.add(
        "failure_kind",
        match error.kind() {
            FailureKind::Transport => "transport",
            FailureKind::Rejection => "rejection",
        },
    );

    reporter.report(&error_msg);
}
