use crate::error::SdkError;
use reqwest::Method;
use reqwest::StatusCode;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use serde::Serialize;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};

pub const MAX_RETRIES_CAP: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryStatusRule {
    Code(u16),
    ServerError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryNetworkRule {
    Timeout,
    Connect,
    Request,
}

/// Backoff configuration. The default performs no retries: one request, one
/// outcome. Callers opt in with `with_max_retries`.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
    pub jitter: Duration,
    pub retryable_statuses: Vec<RetryStatusRule>,
    pub retryable_network_errors: Vec<RetryNetworkRule>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 0,
            base_delay: Duration::from_millis(250),
            max_delay: Duration::from_millis(8_000),
            jitter: Duration::from_millis(200),
            retryable_statuses: vec![
                RetryStatusRule::Code(408),
                RetryStatusRule::Code(429),
                RetryStatusRule::ServerError,
            ],
            retryable_network_errors: vec![
                RetryNetworkRule::Timeout,
                RetryNetworkRule::Connect,
                RetryNetworkRule::Request,
            ],
        }
    }
}

impl RetryPolicy {
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }

    pub fn with_jitter(mut self, jitter: Duration) -> Self {
        self.jitter = jitter;
        self
    }
}

/// Where to send a request and the client-level policies that apply to it.
#[derive(Debug, Clone)]
pub struct EndpointConfig {
    pub base_url: String,
    pub endpoint: String,
    pub retry_policy: RetryPolicy,
    pub request_timeout: Option<Duration>,
}

impl EndpointConfig {
    pub fn url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.endpoint)
    }
}

fn should_retry_status(status: StatusCode, retry_policy: &RetryPolicy) -> bool {
    retry_policy
        .retryable_statuses
        .iter()
        .any(|rule| match rule {
            RetryStatusRule::Code(code) => status.as_u16() == *code,
            RetryStatusRule::ServerError => status.is_server_error(),
        })
}

fn should_retry_network_error(error: &reqwest::Error, retry_policy: &RetryPolicy) -> bool {
    retry_policy
        .retryable_network_errors
        .iter()
        .any(|rule| match rule {
            RetryNetworkRule::Timeout => error.is_timeout(),
            RetryNetworkRule::Connect => error.is_connect(),
            RetryNetworkRule::Request => error.is_request(),
        })
}

fn retry_delay(attempt: u32, retry_policy: &RetryPolicy) -> Duration {
    let capped_attempt = attempt.min(MAX_RETRIES_CAP);
    let exp_multiplier = 2_u64.saturating_pow(capped_attempt.saturating_sub(1));

    let base_ms = retry_policy.base_delay.as_millis() as u64;
    let max_ms = retry_policy.max_delay.as_millis() as u64;
    let jitter_ms = retry_policy.jitter.as_millis() as u64;

    let backoff_ms = base_ms.saturating_mul(exp_multiplier).min(max_ms);
    Duration::from_millis(backoff_ms.saturating_add(random_jitter(jitter_ms)))
        .min(retry_policy.max_delay)
}

fn random_jitter(max_jitter_ms: u64) -> u64 {
    if max_jitter_ms == 0 {
        return 0;
    }

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() as u64)
        .unwrap_or(0);
    seed % max_jitter_ms
}

fn retry_after_delay(headers: &HeaderMap, retry_policy: &RetryPolicy) -> Option<Duration> {
    let header = headers.get(RETRY_AFTER)?;
    let seconds = header.to_str().ok()?.trim().parse::<u64>().ok()?;
    Some(Duration::from_secs(seconds).min(retry_policy.max_delay))
}

fn resolve_retry_policy(config: &EndpointConfig) -> RetryPolicy {
    let mut policy = config.retry_policy.clone();
    policy.max_retries = policy.max_retries.min(MAX_RETRIES_CAP);
    policy
}

/// Map a terminal non-success status to its error kind.
fn status_error(status: StatusCode, body: String) -> SdkError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => SdkError::AuthenticationError {
            status: Some(status.as_u16()),
            message: body,
        },
        StatusCode::TOO_MANY_REQUESTS => SdkError::RateLimited(body),
        _ => SdkError::ApiError(format!("request failed (status {}): {}", status, body)),
    }
}

/// Send a JSON POST, retrying transient failures according to the resolved
/// policy. With the default policy exactly one request is made.
pub async fn send_json<T: Serialize>(
    http_client: &reqwest::Client,
    config: &EndpointConfig,
    request_body: &T,
) -> Result<reqwest::Response, SdkError> {
    let url = config.url();
    let retry_policy = resolve_retry_policy(config);
    let max_retries = retry_policy.max_retries;
    let mut retries = 0;

    loop {
        let mut request_builder = http_client.request(Method::POST, &url).json(request_body);
        if let Some(timeout) = config.request_timeout {
            request_builder = request_builder.timeout(timeout);
        }

        debug!(attempt = retries, %url, "sending request");

        match request_builder.send().await {
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    debug!(status = status.as_u16(), "request succeeded");
                    return Ok(response);
                }

                if should_retry_status(status, &retry_policy) && retries < max_retries {
                    retries += 1;
                    let from_retry_after = retry_after_delay(response.headers(), &retry_policy);
                    let wait = from_retry_after.unwrap_or_else(|| retry_delay(retries, &retry_policy));

                    warn!(
                        attempt = retries,
                        max_retries,
                        status = status.as_u16(),
                        wait_ms = wait.as_millis() as u64,
                        from_retry_after = from_retry_after.is_some(),
                        %url,
                        "retrying request after retryable status"
                    );
                    tokio::time::sleep(wait).await;
                    continue;
                }

                let body = response.text().await.unwrap_or_default();
                return Err(status_error(status, body));
            }
            Err(e) => {
                if should_retry_network_error(&e, &retry_policy) && retries < max_retries {
                    retries += 1;
                    let wait = retry_delay(retries, &retry_policy);

                    warn!(
                        attempt = retries,
                        max_retries,
                        wait_ms = wait.as_millis() as u64,
                        timeout = e.is_timeout(),
                        connect = e.is_connect(),
                        %url,
                        "retrying request after network error"
                    );
                    tokio::time::sleep(wait).await;
                    continue;
                }
                return Err(SdkError::TransportError(e));
            }
        }
    }
}
