//! Retry policy for lyrics lookups.
//!
//! Exponential backoff: `factor * 2^retry`, capped at `max_backoff_secs`.

use std::time::Duration;

use euterpe_config::lyrics::LyricsConfig;

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: u32,
    pub backoff_factor_secs: f64,
    pub max_backoff_secs: u64,
    /// HTTP statuses worth another attempt
    pub retry_statuses: Vec<u16>,
}

impl RetryPolicy {
    pub fn new(config: &LyricsConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            backoff_factor_secs: config.backoff_factor_secs,
            max_backoff_secs: config.max_backoff_secs,
            retry_statuses: config.retry_statuses.clone(),
        }
    }

    pub fn backoff(&self, retry: u32) -> Duration {
        let secs = self.backoff_factor_secs * 2f64.powi(retry as i32);
        Duration::from_secs_f64(secs.clamp(0.0, self.max_backoff_secs as f64))
    }

    pub fn retries_status(&self, status: u16) -> bool {
        self.retry_statuses.contains(&status)
    }

    pub fn can_retry(&self, retry: u32) -> bool {
        retry < self.max_retries
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(&LyricsConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_doubles_then_caps() {
        let policy = RetryPolicy {
            backoff_factor_secs: 1.0,
            max_backoff_secs: 10,
            ..RetryPolicy::default()
        };

        assert_eq!(policy.backoff(0), Duration::from_secs(1));
        assert_eq!(policy.backoff(1), Duration::from_secs(2));
        assert_eq!(policy.backoff(3), Duration::from_secs(8));
        assert_eq!(policy.backoff(4), Duration::from_secs(10));
    }

    #[test]
    fn defaults_retry_rate_limits_and_gateway_errors() {
        let policy = RetryPolicy::default();

        assert_eq!(policy.max_retries, 6);
        assert!(policy.retries_status(429));
        assert!(policy.retries_status(503));
        assert!(!policy.retries_status(404));
        assert!(!policy.retries_status(501));
        assert!(policy.can_retry(5));
        assert!(!policy.can_retry(6));
    }
}
