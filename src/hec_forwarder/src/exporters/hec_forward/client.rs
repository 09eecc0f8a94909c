use super::error::{ForwardError, ForwardResult};
use super::response::CollectorAck;
use super::retry::{self, RetryPolicy};
use super::telemetry;
use crate::config::Config;
use crate::constants::DEFAULT_COLLECTOR_PATH;
use crate::exporters::event_sink::EventSink;
use crate::record::ForwardedRecord;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::debug;
use url::Url;

/// Configuration for forwarding to the collector
#[derive(Clone)]
pub struct HecForwardConfig {
    pub url: String,
    pub token: String,
    pub max_attempts: usize,
    pub retry_delay: Duration,
}

impl From<&Config> for HecForwardConfig {
    fn from(config: &Config) -> Self {
        Self {
            url: config.url.clone(),
            token: config.token.clone(),
            max_attempts: config.max_attempts,
            retry_delay: config.retry_delay(),
        }
    }
}

impl HecForwardConfig {
    fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            delay: self.retry_delay,
        }
    }
}

/// Parse the configured collector URL, filling in the event path when the
/// URL names only a host.
pub fn resolve_endpoint(raw: &str) -> ForwardResult<Url> {
    let mut url = Url::parse(raw.trim()).map_err(|e| ForwardError::InvalidEndpoint {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ForwardError::InvalidEndpoint {
            url: raw.to_string(),
            reason: format!("unsupported scheme {}", url.scheme()),
        });
    }

    if url.path().is_empty() || url.path() == "/" {
        url.set_path(DEFAULT_COLLECTOR_PATH);
    }

    Ok(url)
}

/// HTTP client for forwarding records to the collector.
///
/// Built once per process. Holds no per-invocation state, so one instance can
/// serve any number of invocations.
pub struct HecForward {
    config: HecForwardConfig,
    client: Client,
}

impl HecForward {
    pub fn new(config: HecForwardConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    async fn forward(&self, record: &ForwardedRecord) -> ForwardResult<CollectorAck> {
        let start_time = Instant::now();

        let prepared = resolve_endpoint(&self.config.url)
            .and_then(|endpoint| Ok((endpoint, serde_json::to_vec(record)?)));

        let (endpoint, body) = match prepared {
            Ok(prepared) => prepared,
            Err(e) => {
                telemetry::report_forward_failure(&self.config.url, &e, 0);
                return Err(e);
            }
        };

        let ack = retry::send_record_with_retry(
            &self.client,
            &endpoint,
            &self.config.token,
            body,
            self.config.retry_policy(),
        )
        .await?;

        debug!("Record forwarding completed in {:?}", start_time.elapsed());
        Ok(ack)
    }
}

impl EventSink for HecForward {
    async fn submit(&self, record: &ForwardedRecord) -> ForwardResult<CollectorAck> {
        self.forward(record).await
    }
}
