//! The record sent to the collector for one invocation.
//!
//! A record wraps the inbound event with fixed metadata. On the wire it is a
//! single HEC event object:
//!
//! ```json
//! {"event": {...}, "host": "serverless", "source": "lambda:my-fn", "sourcetype": "httpevent"}
//! ```
//!
//! `time` and `index` are left to the collector's defaults.

use crate::constants::{RECORD_HOST, RECORD_SOURCETYPE, REQUEST_ID_FIELD, SOURCE_PREFIX};
use serde::Serialize;
use serde_json::Value;

/// Per-invocation identity handed over by the Lambda runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationContext {
    pub request_id: String,
    pub function_name: String,
}

impl InvocationContext {
    pub fn new(request_id: impl Into<String>, function_name: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            function_name: function_name.into(),
        }
    }
}

impl From<&lambda_runtime::Context> for InvocationContext {
    fn from(context: &lambda_runtime::Context) -> Self {
        Self {
            request_id: context.request_id.clone(),
            function_name: context.env_config.function_name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordMetadata {
    pub host: String,
    pub source: String,
    pub sourcetype: String,
}

impl RecordMetadata {
    pub fn for_function(function_name: &str) -> Self {
        Self {
            host: RECORD_HOST.to_string(),
            source: format!("{}{}", SOURCE_PREFIX, function_name),
            sourcetype: RECORD_SOURCETYPE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForwardedRecord {
    pub event: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<f64>,
    #[serde(flatten)]
    pub metadata: RecordMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,
}

impl ForwardedRecord {
    /// Builds the record for one invocation. The event is cloned, so the
    /// caller's copy stays untouched.
    pub fn for_invocation(event: &Value, context: &InvocationContext) -> Self {
        let mut event = event.clone();
        augment_with_request_id(&mut event, &context.request_id);

        Self {
            event,
            time: None,
            metadata: RecordMetadata::for_function(&context.function_name),
            index: None,
        }
    }
}

/// Adds the request id to object payloads that do not carry one yet.
///
/// Scalars and arrays have no named fields and pass through unchanged.
/// Returns whether the field was inserted.
pub fn augment_with_request_id(event: &mut Value, request_id: &str) -> bool {
    match event {
        Value::Object(fields) if !fields.contains_key(REQUEST_ID_FIELD) => {
            fields.insert(
                REQUEST_ID_FIELD.to_string(),
                Value::String(request_id.to_string()),
            );
            true
        }
        _ => false,
    }
}
