use super::error::{ForwardError, ForwardResult};
use serde::Deserialize;
use std::fmt;

/// Acknowledgement body sent by the collector, e.g. `{"text":"Success","code":0}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CollectorResponse {
    #[serde(default)]
    pub text: Option<String>,
    /// Must be a JSON number. A string such as `"0"` fails to parse, and the
    /// body is then reported as `MalformedResponse`.
    #[serde(default)]
    pub code: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectorAck {
    /// Collector accepted the record and said so
    Parsed(CollectorResponse),
    /// Collector accepted the record with an empty body
    Empty,
}

impl fmt::Display for CollectorAck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollectorAck::Parsed(response) => write!(
                f,
                "{} (code {})",
                response.text.as_deref().unwrap_or(""),
                response.code.unwrap_or_default()
            ),
            CollectorAck::Empty => write!(f, "<empty body>"),
        }
    }
}

/// Maps a non-5XX collector answer onto success or rejection.
///
/// Only an empty body or a JSON body whose `code` is exactly zero counts as
/// success. A body without a `code` is a rejection too.
pub fn interpret_response(status: u16, body: &str) -> ForwardResult<CollectorAck> {
    if body.trim().is_empty() {
        return if (200..300).contains(&status) {
            Ok(CollectorAck::Empty)
        } else {
            Err(ForwardError::Rejected {
                status,
                code: None,
                text: None,
            })
        };
    }

    let response: CollectorResponse = match serde_json::from_str(body) {
        Ok(response) => response,
        Err(_) => {
            return Err(ForwardError::MalformedResponse {
                status,
                body: body.to_string(),
            })
        }
    };

    let code = response.code;
    match code {
        Some(0) => Ok(CollectorAck::Parsed(response)),
        _ => Err(ForwardError::Rejected {
            status,
            code,
            text: response.text,
        }),
    }
}
