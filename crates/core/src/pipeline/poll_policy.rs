use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::shared::constants::{DEFAULT_MAX_WAIT, DEFAULT_POLL_INTERVAL, INITIAL_POLL_DELAY};

/// How often and for how long a submitted job is polled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub initial_delay: Duration,
    pub interval: Duration,
    /// Give up once this much time has passed since the first poll delay began.
    pub max_wait: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            initial_delay: INITIAL_POLL_DELAY,
            interval: DEFAULT_POLL_INTERVAL,
            max_wait: DEFAULT_MAX_WAIT,
        }
    }
}

impl PollPolicy {
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_max_wait(mut self, max_wait: Duration) -> Self {
        self.max_wait = max_wait;
        self
    }
}

/// Source of elapsed time and blocking waits.
pub trait Clock: Send {
    /// Time since the clock was created.
    fn elapsed(&self) -> Duration;

    fn sleep(&self, duration: Duration);
}

/// Wall clock backed by `Instant` and `thread::sleep`.
pub struct SystemClock {
    started: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Shared flag that asks a running pipeline to stop at its next wait.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// The underlying flag, for registration with signal handlers.
    pub fn flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.flag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = PollPolicy::default();
        assert_eq!(policy.initial_delay, Duration::from_millis(500));
        assert_eq!(policy.interval, Duration::from_secs(30));
        assert_eq!(policy.max_wait, Duration::from_secs(7200));
    }

    #[test]
    fn test_builder_overrides() {
        let policy = PollPolicy::default()
            .with_interval(Duration::from_secs(5))
            .with_max_wait(Duration::from_secs(60));
        assert_eq!(policy.interval, Duration::from_secs(5));
        assert_eq!(policy.max_wait, Duration::from_secs(60));
    }

    #[test]
    fn test_token_clones_share_state() {
        let token = CancellationToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());
        token.cancel();
        assert!(clone.is_cancelled());
    }

    #[test]
    fn test_flag_shares_state() {
        let token = CancellationToken::new();
        token.flag().store(true, Ordering::SeqCst);
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_system_clock_advances() {
        let clock = SystemClock::new();
        clock.sleep(Duration::from_millis(5));
        assert!(clock.elapsed() >= Duration::from_millis(5));
    }
}
