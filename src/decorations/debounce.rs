//! Trailing debounce with a single pending slot.
//!
//! Each trigger replaces the pending deadline, so only the last trigger in a
//! burst fires. Time is passed in by the caller, which keeps this testable
//! without sleeping.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Change the delay. A pending deadline keeps its original time.
    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    /// (Re)start the timer at `now`.
    pub fn schedule(&mut self, now: Instant) {
        self.pending = Some(now + self.delay);
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Clear the slot and return `true` if the deadline has passed.
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.pending {
            Some(deadline) if now >= deadline => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(Duration::from_millis(200))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_fires_after_delay() {
        let start = Instant::now();
        let mut debouncer = Debouncer::default();
        assert!(!debouncer.take_due(start));

        debouncer.schedule(start);
        assert!(!debouncer.take_due(start + 199 * MS));
        assert!(debouncer.take_due(start + 200 * MS));
        assert!(!debouncer.is_pending());
        assert!(!debouncer.take_due(start + 400 * MS));
    }

    #[test]
    fn test_reschedule_replaces_deadline() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(100 * MS);

        debouncer.schedule(start);
        debouncer.schedule(start + 80 * MS);
        assert!(!debouncer.take_due(start + 120 * MS));
        assert_eq!(debouncer.deadline(), Some(start + 180 * MS));
        assert!(debouncer.take_due(start + 180 * MS));
    }

    #[test]
    fn test_cancel_and_zero_delay() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::ZERO);
        debouncer.schedule(start);
        debouncer.cancel();
        assert!(!debouncer.take_due(start));

        debouncer.schedule(start);
        assert!(debouncer.take_due(start));
    }
}
