use super::error::{ForwardError, ForwardResult};
use super::response::{interpret_response, CollectorAck};
use super::telemetry;
use crate::constants::AUTHORIZATION_SCHEME;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};
use url::Url;

/// Fixed attempt budget for one record
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: usize,
    pub delay: Duration,
}

/// Send one serialized record with retry logic
pub async fn send_record_with_retry(
    client: &Client,
    endpoint: &Url,
    token: &str,
    body: Vec<u8>,
    policy: RetryPolicy,
) -> ForwardResult<CollectorAck> {
    let max_attempts = policy.max_attempts.max(1);

    info!("Sending record ({} bytes) to {}", body.len(), endpoint);

    for attempt in 1..=max_attempts {
        let start_time = Instant::now();

        match send_request(client, endpoint, token, body.clone()).await {
            Ok(ack) => {
                info!(
                    "Collector accepted record on attempt {}, elapsed: {:?}",
                    attempt,
                    start_time.elapsed()
                );
                return Ok(ack);
            }
            Err(e) => {
                let elapsed = start_time.elapsed();

                if e.is_retryable() && attempt < max_attempts {
                    warn!(
                        "Attempt {} failed (retrying): {}, elapsed: {:?}",
                        attempt, e, elapsed
                    );
                    tokio::time::sleep(policy.delay).await;
                } else {
                    error!("Attempt {} failed: {}, elapsed: {:?}", attempt, e, elapsed);

                    telemetry::report_forward_failure(endpoint.as_str(), &e, attempt);
                    return Err(e);
                }
            }
        }
    }

    unreachable!("Loop should always return")
}

/// Send a single HTTP request
async fn send_request(
    client: &Client,
    endpoint: &Url,
    token: &str,
    body: Vec<u8>,
) -> ForwardResult<CollectorAck> {
    let response = client
        .post(endpoint.clone())
        .header(AUTHORIZATION, format!("{} {}", AUTHORIZATION_SCHEME, token))
        .header(CONTENT_TYPE, "application/json")
        .body(body)
        .send()
        .await?;

    let status = response.status();
    let text = response.text().await?;

    if status.is_server_error() {
        return Err(ForwardError::Server {
            status: status.as_u16(),
            body: text,
        });
    }

    interpret_response(status.as_u16(), &text)
}
