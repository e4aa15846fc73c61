//! Shared request execution for the gateway client.
//!
//! Callers build the `RequestBuilder` themselves (URL, bearer token, body); this
//! module sends it, logs it, turns transport and gateway-overload failures into
//! typed errors, and retries the transient ones according to a [`RetryPolicy`].

use std::time::Duration;

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

use crate::error::ProviderError;
use crate::utils::log_sanitizer::sanitize_for_log;

/// Status and body of a response that made it past the transport checks.
///
/// 4xx/5xx statuses other than 429 and 502–504 still arrive here so the caller
/// can decode the gateway's error envelope.
#[derive(Debug)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_error(&self) -> bool {
        self.status >= 400
    }
}

/// How often and how long to wait before re-sending a failed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RetryPolicy {
    /// Extra attempts after the first one; 0 disables retrying.
    pub max_retries: u32,
}

impl RetryPolicy {
    const BASE_DELAY_MS: u64 = 100;
    const MAX_BACKOFF_MS: u64 = 10_000;
    const MAX_RETRY_AFTER_SECS: u64 = 30;

    pub fn new(max_retries: u32) -> Self {
        Self { max_retries }
    }

    /// Wait before attempt `attempt + 1`.
    ///
    /// A `Retry-After` hint on a rate-limit error wins (capped at 30s); otherwise
    /// the delay doubles from 100ms up to 10s.
    pub fn delay(&self, error: &ProviderError, attempt: u32) -> Duration {
        if let ProviderError::RateLimited {
            retry_after: Some(secs),
            ..
        } = error
        {
            return Duration::from_secs((*secs).min(Self::MAX_RETRY_AFTER_SECS));
        }
        let factor = 1_u64 << attempt.min(20);
        Duration::from_millis(
            Self::BASE_DELAY_MS
                .saturating_mul(factor)
                .min(Self::MAX_BACKOFF_MS),
        )
    }
}

fn transport_error(e: &reqwest::Error) -> ProviderError {
    if e.is_timeout() {
        ProviderError::Timeout {
            detail: e.to_string(),
        }
    } else {
        ProviderError::NetworkError {
            detail: e.to_string(),
        }
    }
}

/// Sends the request once.
///
/// HTTP 429 becomes [`ProviderError::RateLimited`] and 502/503/504 become
/// [`ProviderError::NetworkError`]; every other status is returned as a
/// [`RawResponse`].
pub async fn send_once(request: RequestBuilder, label: &str) -> Result<RawResponse, ProviderError> {
    log::debug!("{label}");

    let response = request.send().await.map_err(|e| transport_error(&e))?;
    let status = response.status().as_u16();
    log::debug!("{label} -> HTTP {status}");

    // 先读 Retry-After，读取正文会消耗 response
    let retry_after = response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok());

    let body = response
        .text()
        .await
        .map_err(|e| ProviderError::NetworkError {
            detail: format!("Failed to read response body: {e}"),
        })?;

    match status {
        429 => {
            log::warn!("{label}: rate limited, retry_after={retry_after:?}");
            Err(ProviderError::RateLimited {
                retry_after,
                raw_message: Some(sanitize_for_log(&body)),
            })
        }
        502..=504 => {
            log::warn!("{label}: gateway unavailable (HTTP {status})");
            Err(ProviderError::NetworkError {
                detail: format!("HTTP {status}: {}", sanitize_for_log(&body)),
            })
        }
        _ => {
            log::debug!("{label} body: {}", sanitize_for_log(&body));
            Ok(RawResponse { status, body })
        }
    }
}

/// Sends the request, re-sending it on retryable failures per `policy`.
///
/// A request whose body cannot be cloned is sent exactly once.
pub async fn send(
    request: RequestBuilder,
    label: &str,
    policy: RetryPolicy,
) -> Result<RawResponse, ProviderError> {
    let mut attempt = 0;
    loop {
        let Some(this_try) = request.try_clone() else {
            log::warn!("{label}: request body is not cloneable, sending without retry");
            return send_once(request, label).await;
        };

        match send_once(this_try, label).await {
            Err(e) if attempt < policy.max_retries && e.is_retryable() => {
                let delay = policy.delay(&e, attempt);
                attempt += 1;
                log::warn!(
                    "{label}: attempt {attempt}/{} failed, retrying in {}ms: {e}",
                    policy.max_retries,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }
            result => return result,
        }
    }
}

/// Decodes a JSON body, logging the sanitized raw text on failure.
pub fn parse_json<T: DeserializeOwned>(body: &str) -> Result<T, ProviderError> {
    serde_json::from_str(body).map_err(|e| {
        log::error!("JSON parse failed: {e}; raw response: {}", sanitize_for_log(body));
        ProviderError::ParseError {
            detail: e.to_string(),
        }
    })
}
