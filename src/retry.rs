use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Exponential backoff settings for network calls.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of attempts (including the first one); 0 behaves as 1
    pub max_attempts: u32,
    /// Delay before the first retry
    pub initial_delay: Duration,
    /// Upper bound for any single delay
    pub max_delay: Duration,
    /// Multiplier applied to the delay after each retry
    pub backoff_multiplier: f64,
}

impl RetryConfig {
    pub fn new(max_attempts: u32, initial_delay: Duration) -> Self {
        Self {
            max_attempts,
            initial_delay,
            max_delay: Duration::from_secs(30),
            backoff_multiplier: 2.0,
        }
    }

    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }

    pub fn with_backoff_multiplier(mut self, multiplier: f64) -> Self {
        self.backoff_multiplier = multiplier;
        self
    }

    /// Preset: image downloads (3 attempts, delays 1s then 2s)
    pub fn image_download() -> Self {
        Self::new(3, Duration::from_secs(1))
            .with_max_delay(Duration::from_secs(4))
            .with_backoff_multiplier(2.0)
    }

    /// Delay before attempt `attempt` (0-indexed; the first attempt waits 0)
    fn delay_for_attempt(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }

        let delay_ms = self.initial_delay.as_millis() as f64
            * self.backoff_multiplier.powi((attempt - 1) as i32);

        Duration::from_millis(delay_ms as u64).min(self.max_delay)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::image_download()
    }
}

/// Run `operation` until it succeeds, `should_retry` rejects its error, or
/// the attempts run out. Returns the last error in the latter two cases.
pub async fn with_retry_if<T, E, F, Fut, P>(
    config: &RetryConfig,
    operation_name: &str,
    mut operation: F,
    should_retry: P,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
    P: Fn(&E) -> bool,
{
    let max_attempts = config.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        let delay = config.delay_for_attempt(attempt);
        if !delay.is_zero() {
            debug!(
                "{}: Retry attempt {}/{} after {:?}",
                operation_name,
                attempt + 1,
                max_attempts,
                delay
            );
            sleep(delay).await;
        }

        let error = match operation().await {
            Ok(result) => return Ok(result),
            Err(e) => e,
        };

        let remaining = max_attempts - attempt - 1;
        if !should_retry(&error) {
            debug!("{}: Non-retryable error: {}", operation_name, error);
            return Err(error);
        }
        if remaining == 0 {
            warn!(
                "{}: All {} attempts failed. Last error: {}",
                operation_name, max_attempts, error
            );
            return Err(error);
        }

        warn!(
            "{}: Attempt {}/{} failed ({}), {} retries remaining",
            operation_name,
            attempt + 1,
            max_attempts,
            error,
            remaining
        );
        attempt += 1;
    }
}
