//! Binary exponential backoff keyed on the measured round trip time.

use std::time::Duration;

/// Delay before attempt `attempt`: `rtt * 2^attempt`, saturating.
pub fn backoff_delay(rtt: Duration, attempt: u32) -> Duration {
    match 2u32.checked_pow(attempt) {
        Some(factor) => rtt.saturating_mul(factor),
        None if rtt.is_zero() => Duration::ZERO,
        None => Duration::MAX,
    }
}

/// Per-call retry bookkeeping.
///
/// The round trip time is taken from the first attempt only and reused for
/// every later delay.
#[derive(Debug, Clone)]
pub struct RetryState {
    max_retries: u32,
    attempt: u32,
    rtt: Option<Duration>,
}

impl RetryState {
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            attempt: 0,
            rtt: None,
        }
    }

    /// Zero-based index of the current attempt.
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    pub fn rtt(&self) -> Option<Duration> {
        self.rtt
    }

    /// Records the duration of an attempt. Only the first one is kept.
    pub fn record_rtt(&mut self, elapsed: Duration) {
        if self.rtt.is_none() {
            self.rtt = Some(elapsed);
        }
    }

    /// How long to wait before the current attempt. `None` on the first.
    pub fn delay(&self) -> Option<Duration> {
        if self.attempt == 0 {
            return None;
        }
        Some(backoff_delay(self.rtt.unwrap_or_default(), self.attempt))
    }

    /// Moves to the next attempt. Returns `false` once all
    /// `max_retries + 1` attempts are used up.
    pub fn advance(&mut self) -> bool {
        if self.attempt >= self.max_retries {
            return false;
        }
        self.attempt += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_growth() {
        let rtt = Duration::from_millis(10);
        let delays: Vec<_> = (0..4).map(|attempt| backoff_delay(rtt, attempt)).collect();
        assert_eq!(
            delays,
            vec![
                Duration::from_millis(10),
                Duration::from_millis(20),
                Duration::from_millis(40),
                Duration::from_millis(80),
            ]
        );
    }

    #[test]
    fn test_backoff_saturates() {
        assert_eq!(backoff_delay(Duration::from_secs(1), 64), Duration::MAX);
        assert_eq!(backoff_delay(Duration::from_secs(u64::MAX), 2), Duration::MAX);
        assert_eq!(backoff_delay(Duration::ZERO, 64), Duration::ZERO);
    }

    #[test]
    fn test_retry_state_attempts() {
        let mut state = RetryState::new(2);
        assert_eq!(state.delay(), None);

        state.record_rtt(Duration::from_millis(5));
        state.record_rtt(Duration::from_secs(9));
        assert_eq!(state.rtt(), Some(Duration::from_millis(5)));

        assert!(state.advance());
        assert_eq!(state.delay(), Some(Duration::from_millis(10)));
        assert!(state.advance());
        assert_eq!(state.delay(), Some(Duration::from_millis(20)));
        assert!(!state.advance());
        assert_eq!(state.attempt(), 2);
    }

    #[test]
    fn test_zero_retries_single_attempt() {
        let mut state = RetryState::new(0);
        assert!(!state.advance());
    }
}
