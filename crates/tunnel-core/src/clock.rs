use instant::Instant;
use std::time::Duration;

/// Resettable frame-delta clock.
///
/// Callers pass `now` in, so the clock works the same under
/// `requestAnimationFrame`, a winit event loop or a test.
#[derive(Clone, Debug, Default)]
pub struct FrameClock {
    last: Option<Instant>,
    elapsed: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the previous frame; the next `delta` measures from `now`.
    pub fn reset(&mut self, now: Instant) {
        self.last = Some(now);
        self.elapsed = Duration::ZERO;
    }

    /// Time since the previous call (or reset). Zero on the first call.
    pub fn delta(&mut self, now: Instant) -> Duration {
        let dt = match self.last {
            Some(last) if now > last => now.duration_since(last),
            _ => Duration::ZERO,
        };
        self.last = Some(now);
        self.elapsed += dt;
        dt
    }

    /// Total time accumulated since the last reset.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}
