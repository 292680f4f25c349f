use std::future::Future;
use std::time::Duration;

use crate::error::ApiError;

/// Retries after the initial attempt, so a call runs at most
/// `MAX_RETRIES + 1` times.
const MAX_RETRIES: u32 = 5;

/// Runs a remote call, retrying transient failures with exponential backoff
/// (`2^attempt` seconds). Fatal failures propagate immediately; once retries
/// are exhausted the last failure propagates.
pub async fn with_retry<T, F, Fut>(mut call: F) -> Result<T, ApiError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let mut attempt = 0;
    loop {
        match call().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_transient() && attempt < MAX_RETRIES => {
                let delay = Duration::from_secs(1 << attempt);
                eprintln!(
                    "Transient error (attempt {}), retrying in {}s: {err}",
                    attempt + 1,
                    delay.as_secs(),
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}
