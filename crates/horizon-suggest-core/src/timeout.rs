//! One-shot timeout primitive.
//!
//! Provides [`Timeout`], a single armed deadline used for deferred UI
//! actions such as the sticker-preview delay and the delayed hide of an
//! empty popup. All methods take an explicit `Instant` so callers (and
//! tests) drive time themselves; nothing here sleeps or spawns.

use std::time::{Duration, Instant};

/// A one-shot armed deadline.
///
/// A `Timeout` is either disarmed or armed with a deadline. [`fire`] reports
/// `true` exactly once, the first time it is polled at or past the deadline,
/// and disarms the timeout. Re-arming replaces any pending deadline.
///
/// [`fire`]: Timeout::fire
#[derive(Debug, Clone, Copy, Default)]
pub struct Timeout {
    /// The pending deadline, if armed.
    deadline: Option<Instant>,
}

impl Timeout {
    /// Create a disarmed timeout.
    pub const fn new() -> Self {
        Self { deadline: None }
    }

    /// Arm the timeout to fire `delay` after `now`.
    ///
    /// Replaces any previously armed deadline.
    pub fn arm(&mut self, now: Instant, delay: Duration) {
        self.deadline = Some(now + delay);
    }

    /// Disarm the timeout without firing.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Whether a deadline is currently armed.
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// The armed deadline, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Poll the timeout.
    ///
    /// Returns `true` if the timeout was armed and its deadline has been
    /// reached; the timeout disarms itself in that case. Returns `false`
    /// when disarmed or still pending.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Time remaining until the deadline, if armed and still pending.
    ///
    /// Returns `Duration::ZERO` when the deadline has already passed.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|deadline| {
            if deadline > now {
                deadline - now
            } else {
                Duration::ZERO
            }
        })
    }
}

static_assertions::assert_impl_all!(Timeout: Copy, Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_at_deadline() {
        let start = Instant::now();
        let mut timeout = Timeout::new();
        timeout.arm(start, Duration::from_millis(100));

        assert!(timeout.is_armed());
        assert!(!timeout.fire(start + Duration::from_millis(99)));
        assert!(timeout.fire(start + Duration::from_millis(100)));
        // Already fired: disarmed, does not fire again.
        assert!(!timeout.is_armed());
        assert!(!timeout.fire(start + Duration::from_millis(200)));
    }

    #[test]
    fn test_cancel_prevents_firing() {
        let start = Instant::now();
        let mut timeout = Timeout::new();
        timeout.arm(start, Duration::from_millis(50));
        timeout.cancel();

        assert!(!timeout.is_armed());
        assert!(!timeout.fire(start + Duration::from_secs(1)));
    }

    #[test]
    fn test_rearm_replaces_deadline() {
        let start = Instant::now();
        let mut timeout = Timeout::new();
        timeout.arm(start, Duration::from_millis(50));
        timeout.arm(start, Duration::from_millis(500));

        assert!(!timeout.fire(start + Duration::from_millis(100)));
        assert!(timeout.fire(start + Duration::from_millis(500)));
    }

    #[test]
    fn test_remaining() {
        let start = Instant::now();
        let mut timeout = Timeout::new();
        assert_eq!(timeout.remaining(start), None);

        timeout.arm(start, Duration::from_millis(100));
        assert_eq!(
            timeout.remaining(start + Duration::from_millis(40)),
            Some(Duration::from_millis(60))
        );
        assert_eq!(
            timeout.remaining(start + Duration::from_millis(200)),
            Some(Duration::ZERO)
        );
    }
}
