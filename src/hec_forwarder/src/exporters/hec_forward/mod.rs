//! Record forwarding to an HTTP Event Collector
//!
//! One record per request: the batch size is pinned to one, so submitting a
//! record is also flushing it. Network failures and 5XX answers are retried a
//! fixed number of times; everything else fails on the first attempt.
//!
//! # Example
//!
//! ```rust,no_run
//! # use hec_forwarder::config::ConfigLoader;
//! # use hec_forwarder::exporters::event_sink::EventSink;
//! # use hec_forwarder::exporters::hec_forward::{HecForward, HecForwardConfig};
//! # use hec_forwarder::record::{ForwardedRecord, InvocationContext};
//! #
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let config = ConfigLoader::load()?;
//! let forwarder = HecForward::new(HecForwardConfig::from(&config));
//! let context = InvocationContext::new("request-id", "my-function");
//! let record = ForwardedRecord::for_invocation(&serde_json::json!({"state": "on"}), &context);
//! forwarder.submit(&record).await?;
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod response;
mod retry;
mod telemetry;

// Public exports
pub use client::{resolve_endpoint, HecForward, HecForwardConfig};
pub use error::{FailureKind, ForwardError, ForwardResult};
pub use response::{interpret_response, CollectorAck, CollectorResponse};
pub use retry::RetryPolicy;
