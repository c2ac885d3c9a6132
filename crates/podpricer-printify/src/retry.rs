//! Retry with exponential back-off and jitter for idempotent Printify reads.
//!
//! Only GET requests go through [`retry_with_backoff`]. Price updates and
//! publishes are sent exactly once; a failed write is reported, not
//! resubmitted.

use std::future::Future;
use std::time::Duration;

use crate::error::PrintifyError;

/// Upper bound on a single back-off sleep.
const MAX_DELAY_MS: u64 = 60_000;

/// Returns `true` for errors that are worth retrying after a back-off delay.
///
/// Retriable:
/// - [`PrintifyError::RateLimited`] (HTTP 429).
/// - [`PrintifyError::Http`]: network-level failure.
/// - [`PrintifyError::UnexpectedStatus`] with a 5xx status.
///
/// Everything else (404, other 4xx, malformed bodies, write rejections,
/// pagination guard) is returned immediately.
pub(crate) fn is_retriable(err: &PrintifyError) -> bool {
    match err {
        PrintifyError::RateLimited { .. } | PrintifyError::Http(_) => true,
        PrintifyError::UnexpectedStatus { status, .. } => (500..600).contains(status),
        PrintifyError::Deserialize { .. }
        | PrintifyError::NotFound { .. }
        | PrintifyError::CapacityExceeded { .. }
        | PrintifyError::Rejected { .. }
        | PrintifyError::InvalidBaseUrl { .. }
        | PrintifyError::PaginationLimit { .. } => false,
    }
}

/// Back-off before retry number `attempt` (1-based), before jitter:
/// `backoff_base_ms * 2^(attempt - 1)`, capped at [`MAX_DELAY_MS`].
fn base_delay_ms(backoff_base_ms: u64, attempt: u32) -> u64 {
    backoff_base_ms
        .saturating_mul(1u64 << (attempt.saturating_sub(1)).min(20))
        .min(MAX_DELAY_MS)
}

/// Runs `operation` with up to `max_retries` additional attempts on transient
/// errors, sleeping `base × 2^(n-1)` ± 25% jitter before the n-th retry.
///
/// With `max_retries = 3` the operation is attempted at most 4 times total.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, PrintifyError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, PrintifyError>>,
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
                let capped = base_delay_ms(backoff_base_ms, attempt);
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
                    "transient Printify error, retrying after back-off"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}
