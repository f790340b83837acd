//! Reconnect delay schedule for the event stream.

use std::time::Duration;

/// Initial reconnect delay.
pub const DEFAULT_INITIAL_BACKOFF: Duration = Duration::from_millis(3_000);
/// Upper bound on the reconnect delay.
pub const DEFAULT_MAX_BACKOFF: Duration = Duration::from_millis(30_000);

/// Doubling delay, capped at `max`, reset whenever a stream is established.
#[derive(Clone, Copy, Debug)]
pub struct Backoff {
    initial: Duration,
    max: Duration,
    current: Duration,
}

impl Default for Backoff {
    fn default() -> Self {
        Self::new(DEFAULT_INITIAL_BACKOFF, DEFAULT_MAX_BACKOFF)
    }
}

impl Backoff {
    /// A `max` below `initial` is raised to `initial`.
    pub fn new(initial: Duration, max: Duration) -> Self {
        let max = max.max(initial);
        Self {
            initial,
            max,
            current: initial,
        }
    }

    /// Delay to wait now; the following call returns double, up to the cap.
    pub fn next_delay(&mut self) -> Duration {
        let delay = self.current;
        self.current = self.current.saturating_mul(2).min(self.max);
        delay
    }

    pub fn reset(&mut self) {
        self.current = self.initial;
    }

    pub fn initial(&self) -> Duration {
        self.initial
    }

    pub fn max(&self) -> Duration {
        self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn millis(backoff: &mut Backoff, n: usize) -> Vec<u128> {
        (0..n).map(|_| backoff.next_delay().as_millis()).collect()
    }

    #[test]
    fn doubles_up_to_cap() {
        let mut backoff = Backoff::default();
        assert_eq!(
            millis(&mut backoff, 7),
            vec![3_000, 6_000, 12_000, 24_000, 30_000, 30_000, 30_000]
        );
    }

    #[test]
    fn reset_returns_to_initial_delay() {
        let mut backoff = Backoff::default();
        millis(&mut backoff, 4);
        backoff.reset();
        assert_eq!(millis(&mut backoff, 2), vec![3_000, 6_000]);
    }

    #[test]
    fn max_below_initial_is_clamped() {
        let mut backoff = Backoff::new(Duration::from_millis(50), Duration::from_millis(10));
        assert_eq!(millis(&mut backoff, 3), vec![50, 50, 50]);
    }
}
