use std::future::Future;
use std::time::Duration;

const MAX_ATTEMPTS: u32 = 3;
const BASE_DELAY: Duration = Duration::from_secs(1);
const MAX_DELAY: Duration = Duration::from_secs(4);

/// Run `operation` up to three times, sleeping with exponential backoff
/// (1s, then 2s, capped at 4s) between attempts. Only errors the caller
/// classifies as transient are retried; everything else surfaces at once.
pub async fn with_retry<T, E, Fut, Op>(
    operation_name: &str,
    is_transient: fn(&E) -> bool,
    mut operation: Op,
) -> Result<T, E>
where
    Op: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut delay = BASE_DELAY;
    let mut attempt = 1;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt < MAX_ATTEMPTS && is_transient(&e) => {
                tracing::warn!(
                    error = %e,
                    attempt,
                    delay_secs = delay.as_secs(),
                    "{operation_name}: transient failure, retrying"
                );
                tokio::time::sleep(delay).await;
                delay = (delay * 2).min(MAX_DELAY);
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
