//! Fixed-pause retry, shared by the metadata and coordinator refreshers.

use std::time::Duration;

use tracing::info;

#[derive(Debug, Clone, Copy)]
pub(crate) struct RetryConfig {
    /// Total attempts, including the first one.
    pub attempts: u32,
    /// Pause between consecutive attempts.
    pub pause: Duration,
}

/// Tracks the attempt budget of one retried operation.
///
/// ```ignore
/// let mut retry = Retry::new(CONFIG);
/// loop {
///     match attempt().await {
///         Ok(value) => break value,
///         Err(error) if retry.pause("refresh", &error).await => continue,
///         Err(error) => break fallback(error),
///     }
/// }
/// ```
#[derive(Debug)]
pub(crate) struct Retry {
    pauses_left: u32,
    pause: Duration,
}

impl Retry {
    pub(crate) fn new(config: RetryConfig) -> Self {
        Self {
            pauses_left: config.attempts.saturating_sub(1),
            pause: config.pause,
        }
    }

    /// Sleeps the configured pause and returns `true` while attempts remain;
    /// returns `false` immediately once the budget is exhausted.
    pub(crate) async fn pause(
        &mut self,
        request_name: &str,
        error: &(dyn std::fmt::Display + Send + Sync),
    ) -> bool {
        if self.pauses_left == 0 {
            return false;
        }
        self.pauses_left -= 1;
        let error = error.to_string();
        info!(
            request_name,
            pause_ms = self.pause.as_millis() as u64,
            %error,
            "request failed, pausing before retry",
        );
        tokio::time::sleep(self.pause).await;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn three_attempts_pause_twice() {
        let mut retry = Retry::new(RetryConfig {
            attempts: 3,
            pause: Duration::from_millis(300),
        });

        let begin = tokio::time::Instant::now();
        assert!(retry.pause("test", &"boom").await);
        assert!(retry.pause("test", &"boom").await);
        assert!(!retry.pause("test", &"boom").await);
        assert!(!retry.pause("test", &"boom").await);
        assert_eq!(begin.elapsed(), Duration::from_millis(600));
    }

    #[tokio::test(start_paused = true)]
    async fn single_attempt_never_pauses() {
        let mut retry = Retry::new(RetryConfig {
            attempts: 1,
            pause: Duration::from_millis(300),
        });
        assert!(!retry.pause("test", &"boom").await);
    }
}
