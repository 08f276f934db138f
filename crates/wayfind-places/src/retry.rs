//! Retry with exponential back-off and jitter for provider calls.
//!
//! [`retry_with_backoff`] wraps any fallible async operation and retries on
//! transient errors. Parse failures, client errors and configuration errors
//! are returned immediately.

use std::future::Future;
use std::time::Duration;

use crate::error::PlacesError;

const MAX_DELAY_MS: u64 = 10_000;

/// Returns `true` for errors that are worth retrying after a back-off delay.
///
/// **Retriable:**
/// - [`PlacesError::RateLimited`]: HTTP 429; the provider asked us to back off.
/// - [`PlacesError::Http`]: timeout, connection failure, or a 5xx surfaced by reqwest.
/// - [`PlacesError::UnexpectedStatus`] with a 5xx status.
///
/// **Not retriable:**
/// - 4xx statuses other than 429; retrying returns the same answer.
/// - [`PlacesError::Deserialize`]: malformed body; retrying won't fix it.
/// - [`PlacesError::InvalidBaseUrl`] and [`PlacesError::Timeout`].
pub(crate) fn is_retriable(err: &PlacesError) -> bool {
    match err {
        PlacesError::RateLimited { .. } => true,
        PlacesError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        PlacesError::UnexpectedStatus { status, .. } => (500..600).contains(status),
        PlacesError::Deserialize { .. }
        | PlacesError::InvalidBaseUrl { .. }
        | PlacesError::Timeout { .. } => false,
    }
}

/// Runs `operation` with up to `max_retries` additional attempts on transient errors.
///
/// Back-off schedule with `backoff_base_ms = 250`:
///
/// | Attempt | Sleep before next attempt   |
/// |---------|-----------------------------|
/// | 1       | 250 ms × 2⁰ ± 25 % jitter   |
/// | 2       | 250 ms × 2¹ ± 25 % jitter   |
/// | 3       | 250 ms × 2² ± 25 % jitter   |
///
/// Delay is capped at 10 s. Non-retriable errors are returned immediately.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, PlacesError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, PlacesError>>,
{
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
                let computed = backoff_base_ms.saturating_mul(1u64 << (attempt - 1).min(10));
                let capped = computed.min(MAX_DELAY_MS);
                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    clippy::cast_precision_loss
                )]
                let delay_ms = (capped as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "place provider transient error, retrying after back-off"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}
