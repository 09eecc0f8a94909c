use crate::utils::telemetry::ErrorCategory;
use std::fmt;

/// How a failure reached us: the collector was never properly reached, or it
/// answered and refused the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Transport,
    Rejection,
}

/// Errors that can occur while forwarding a record to the collector
#[derive(Debug)]
pub enum ForwardError {
    /// Configured collector URL is missing or unparseable
    InvalidEndpoint { url: String, reason: String },

    /// Failed to serialize the record to JSON
    Serialization(serde_json::Error),

    /// Network request failed
    Network(reqwest::Error),

    /// Collector returned a 5XX status code
    Server { status: u16, body: String },

    /// Collector answered with a non-zero application code
    Rejected {
        status: u16,
        code: Option<i64>,
        text: Option<String>,
    },

    /// Collector answered with a body that is not a JSON acknowledgement
    MalformedResponse { status: u16, body: String },
}

impl fmt::Display for ForwardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForwardError::InvalidEndpoint { url, reason } => {
                write!(f, "Invalid collector endpoint {:?}: {}", url, reason)
            }
            ForwardError::Serialization(e) => write!(f, "Failed to serialize record: {}", e),
            ForwardError::Network(e) => write!(f, "Network request failed: {}", e),
            ForwardError::Server { status, body } => {
                write!(f, "Server error {}: {}", status, body)
            }
            ForwardError::Rejected { status, code, text } => match code {
                Some(code) => write!(
                    f,
                    "Collector rejected record (status {}, code {}): {}",
                    status,
                    code,
                    text.as_deref().unwrap_or("")
                ),
                None => write!(
                    f,
                    "Collector response without code (status {}): {}",
                    status,
                    text.as_deref().unwrap_or("")
                ),
            },
            ForwardError::MalformedResponse { status, body } => {
                write!(f, "Unreadable collector response (status {}): {}", status, body)
            }
        }
    }
}

impl std::error::Error for ForwardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ForwardError::Serialization(e) => Some(e),
            ForwardError::Network(e) => Some(e),
            ForwardError::InvalidEndpoint { .. }
            | ForwardError::Server { .. }
            | ForwardError::Rejected { .. }
            | ForwardError::MalformedResponse { .. } => None,
        }
    }
}

impl From<serde_json::Error> for ForwardError {
    fn from(err: serde_json::Error) -> Self {
        ForwardError::Serialization(err)
    }
}

impl From<reqwest::Error> for ForwardError {
    fn from(err: reqwest::Error) -> Self {
        ForwardError::Network(err)
    }
}

impl ForwardError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ForwardError::InvalidEndpoint { .. }
            | ForwardError::Serialization(_)
            | ForwardError::Network(_)
            | ForwardError::Server { .. } => FailureKind::Transport,
            ForwardError::Rejected { .. } | ForwardError::MalformedResponse { .. } => {
                FailureKind::Rejection
            }
        }
    }

    /// Get the telemetry error category for this error type
    pub fn error_category(&self) -> ErrorCategory {
        match self {
            ForwardError::InvalidEndpoint { .. } => ErrorCategory::ConfigurationError,
            ForwardError::Serialization(_) => ErrorCategory::SerializationFailure,
            ForwardError::Network(_) => ErrorCategory::NetworkFailure,
            ForwardError::Server { .. } => ErrorCategory::Non2xxResponse,
            ForwardError::Rejected { status, .. } if *status == 401 || *status == 403 => {
                ErrorCategory::AuthenticationError
            }
            ForwardError::Rejected { .. } => ErrorCategory::CollectorRejection,
            ForwardError::MalformedResponse { .. } => ErrorCategory::JsonParseFailure,
        }
    }

    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            ForwardError::Network(_) => true,
            ForwardError::Server { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            ForwardError::InvalidEndpoint { .. } => {
                "Collector endpoint is not configured correctly".to_string()
            }
            ForwardError::Serialization(_) => "Failed to prepare event for sending".to_string(),
            ForwardError::Network(_) => {
                "Network connection failed while sending event".to_string()
            }
            ForwardError::Server { status, .. } => {
                format!("Collector failed with status {}", status)
            }
            ForwardError::Rejected { code, .. } => match code {
                Some(code) => format!("Collector rejected event with code {}", code),
                None => "Collector did not acknowledge event".to_string(),
            },
            ForwardError::MalformedResponse { .. } => {
                "Collector sent an unreadable response".to_string()
            }
        }
    }
}

/// Result type for forwarding operations
pub type ForwardResult<T> = Result<T, ForwardError>;
