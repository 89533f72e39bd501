//! Retry strategy for schedule fetches.

use std::time::Duration;
use tokio_retry::strategy::ExponentialBackoff;

/// Gets the retry strategy for transient schedule-fetch failures.
///
/// Exponential backoff starting at `RETRY_INITIAL_DELAY_MS`, doubling each
/// time, capped at `RETRY_MAX_DELAY_SECS`, limited to `RETRY_MAX_ATTEMPTS`.
///
/// # Returns
///
/// A retry strategy iterator ready for use with `tokio_retry::RetryIf`.
pub fn get_retry_strategy() -> impl Iterator<Item = Duration> {
    ExponentialBackoff::from_millis(crate::config::RETRY_INITIAL_DELAY_MS)
        .factor(crate::config::RETRY_FACTOR)
        .max_delay(Duration::from_secs(crate::config::RETRY_MAX_DELAY_SECS))
        .take(crate::config::RETRY_MAX_ATTEMPTS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_retry_strategy_initial_delay() {
        let first_delay = get_retry_strategy().next().unwrap();
        let expected_ms = crate::config::RETRY_INITIAL_DELAY_MS as u128;
        assert!(
            first_delay.as_millis() >= expected_ms,
            "Expected delay >= {}ms, got {}ms",
            expected_ms,
            first_delay.as_millis()
        );
    }

    #[test]
    fn test_get_retry_strategy_is_non_decreasing_and_capped() {
        let delays: Vec<Duration> = get_retry_strategy().collect();
        let max_delay_ms = (crate::config::RETRY_MAX_DELAY_SECS * 1000) as u128;
        for pair in delays.windows(2) {
            assert!(pair[1] >= pair[0]);
        }
        for delay in &delays {
            assert!(delay.as_millis() <= max_delay_ms);
        }
    }

    #[test]
    fn test_get_retry_strategy_max_attempts() {
        assert_eq!(
            get_retry_strategy().count(),
            crate::config::RETRY_MAX_ATTEMPTS
        );
    }
}
