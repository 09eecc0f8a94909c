//! Structured failure reports for Sentry.
//!
//! Reports are dropped by the Sentry client when it was never initialized,
//! so callers report unconditionally.

use crate::utils::Sentry;
use serde_json::json;
use std::collections::HashMap;

/// Error categories for telemetry reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    NetworkFailure,
    SerializationFailure,
    Non2xxResponse,
    JsonParseFailure,
    ConfigurationError,
    AuthenticationError,
    CollectorRejection,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::NetworkFailure => "network_failure",
            ErrorCategory::SerializationFailure => "serialization_failure",
            ErrorCategory::Non2xxResponse => "non_2xx_response",
            ErrorCategory::JsonParseFailure => "json_parse_failure",
            ErrorCategory::ConfigurationError => "configuration_error",
            ErrorCategory::AuthenticationError => "authentication_error",
            ErrorCategory::CollectorRejection => "collector_rejection",
        }
    }
}

/// Error reporter with context for Sentry
pub struct ErrorReporter {
    component: String,
    context: HashMap<String, serde_json::Value>,
}

impl ErrorReporter {
    /// Create a new error reporter for a component
    pub fn new(component: &str) -> Self {
        let mut context = HashMap::new();
        context.insert("component".to_string(), json!(component));
        context.insert("timestamp".to_string(), json!(now_secs()));

        Self {
            component: component.to_string(),
            context,
        }
    }

    /// Add additional context to the error report
    pub fn add<T: serde::Serialize>(mut self, key: &str, value: T) -> Self {
        if let Ok(json_value) = serde_json::to_value(value) {
            self.context.insert(key.to_string(), json_value);
        }
        self
    }

    /// Add network error context
    pub fn network_error<E>(self, endpoint: &str, error: &E) -> Self
    where
        E: std::fmt::Display + std::fmt::Debug,
    {
        self.add("error_type", ErrorCategory::NetworkFailure.as_str())
            .add("endpoint", endpoint)
            .add("error_message", error.to_string())
            .add("error_debug", format!("{:?}", error))
    }

    /// Add HTTP error context
    pub fn http_error(self, endpoint: &str, status: u16, body: Option<&str>) -> Self {
        let mut reporter = self
            .add("error_type", ErrorCategory::Non2xxResponse.as_str())
            .add("endpoint", endpoint)
            .add("status_code", status);

        if let Some(body) = body {
            reporter = reporter.add("response_body", truncate(body, 1000));
        }
        reporter
    }

    /// Add collector rejection context
    pub fn rejection(
        self,
        endpoint: &str,
        status: u16,
        code: Option<i64>,
        text: Option<&str>,
    ) -> Self {
        self.add("error_type", ErrorCategory::CollectorRejection.as_str())
            .add("endpoint", endpoint)
            .add("status_code", status)
            .add("collector_code", code)
            .add("collector_text", text)
    }

    pub fn error_type(&self) -> &str {
        self.context
            .get("error_type")
            .and_then(|v| v.as_str())
            .unwrap_or("unknown")
    }

    /// Report the error to Sentry
    pub fn report(self, message: &str) {
        let key = format!("{}_{}", &self.component, self.error_type());
        let json_context = serde_json::Value::Object(self.context.into_iter().collect());

        Sentry::add_extra(&key, json_context);
        Sentry::capture_message(message, sentry::Level::Error);
    }
}

fn truncate(body: &str, limit: usize) -> String {
    match body.char_indices().nth(limit) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

/// Get current timestamp in seconds
fn now_secs() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
