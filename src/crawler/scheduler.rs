//! Request pacing
//!
//! Every HTTP call is followed by a fixed blocking pause before the next one
//! may start. There is no concurrency to coordinate: the whole pipeline runs
//! on the calling thread.

use std::time::Duration;

/// Default pause enforced after each request
pub const DEFAULT_REQUEST_DELAY: Duration = Duration::from_millis(1000);

/// Enforces a fixed pause after each request
#[derive(Debug, Clone, Copy)]
pub struct Throttle {
    delay: Duration,
}

impl Throttle {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// The configured pause
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Blocks the calling thread for the configured pause
    pub fn pause(&self) {
        if !self.delay.is_zero() {
            tracing::trace!("Pausing {:?} before next request", self.delay);
            std::thread::sleep(self.delay);
        }
    }
}

impl Default for Throttle {
    fn default() -> Self {
        Self::new(DEFAULT_REQUEST_DELAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_default_delay() {
        assert_eq!(Throttle::default().delay(), DEFAULT_REQUEST_DELAY);
    }

    #[test]
    fn test_pause_blocks_for_delay() {
        let throttle = Throttle::new(Duration::from_millis(30));
        let start = Instant::now();
        throttle.pause();
        assert!(start.elapsed() >= Duration::from_millis(30));
    }

    #[test]
    fn test_zero_delay_returns_immediately() {
        let throttle = Throttle::new(Duration::ZERO);
        let start = Instant::now();
        throttle.pause();
        assert!(start.elapsed() < Duration::from_millis(20));
    }
}
