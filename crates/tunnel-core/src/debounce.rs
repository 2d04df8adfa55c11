use instant::Instant;
use std::time::Duration;

/// Coalesces bursts of events into one action fired `delay` after the last
/// event of the burst.
///
/// Holds only a timestamp and a pending flag; whoever owns it decides when to
/// `poll` (a timer, the frame loop, an event loop wakeup).
#[derive(Clone, Debug)]
pub struct Debouncer {
    delay: Duration,
    last_trigger: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            last_trigger: None,
        }
    }

    /// Record an event; restarts the quiet period.
    pub fn trigger(&mut self, now: Instant) {
        self.last_trigger = Some(now);
    }

    pub fn is_pending(&self) -> bool {
        self.last_trigger.is_some()
    }

    /// True exactly once per burst, when `delay` has passed since the last
    /// trigger. Clears the pending flag when it fires.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.last_trigger {
            Some(t) if now >= t && now.duration_since(t) >= self.delay => {
                self.last_trigger = None;
                true
            }
            _ => false,
        }
    }

    /// Time left before a pending event fires; `None` when idle.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        let t = self.last_trigger?;
        let waited = if now > t { now.duration_since(t) } else { Duration::ZERO };
        Some(self.delay.saturating_sub(waited))
    }

    pub fn cancel(&mut self) {
        self.last_trigger = None;
    }
}
