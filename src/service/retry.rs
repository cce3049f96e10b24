//! Retry helper with exponential backoff

use std::future::Future;
use std::time::Duration;

use tracing::{error, warn};

use crate::error::Result;

/// Delay before the second attempt; doubles for each later one.
pub const BASE_DELAY: Duration = Duration::from_millis(100);

/// Returns the sleep before retrying after failed attempt number `attempt`
/// (zero-based).
pub fn backoff_delay(attempt: u32) -> Duration {
    BASE_DELAY * 2u32.saturating_pow(attempt.min(16))
}

/// Runs `op` up to `max_attempts` times, sleeping between failures.
///
/// Errors that are not retryable are returned immediately. When every
/// attempt fails the last error is returned. `max_attempts` of zero is
/// treated as one.
pub async fn retry<T, F, Fut>(max_attempts: u32, mut op: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let max_attempts = max_attempts.max(1);
    let mut attempt = 0;

    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if !err.is_retryable() => return Err(err),
            Err(err) if attempt + 1 >= max_attempts => {
                error!(attempts = max_attempts, error = %err, "Giving up after retries");
                return Err(err);
            }
            Err(err) => {
                let delay = backoff_delay(attempt);
                warn!(
                    attempt = attempt + 1,
                    max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "Attempt failed, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}
