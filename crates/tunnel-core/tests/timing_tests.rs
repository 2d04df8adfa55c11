// Host-side tests for the frame clock and the resize debouncer.

use instant::Instant;
use std::time::Duration;
use tunnel_core::*;

#[test]
fn clock_reports_zero_before_first_frame_then_deltas() {
    let t0 = Instant::now();
    let mut clock = FrameClock::new();
    assert_eq!(clock.delta(t0), Duration::ZERO);
    assert_eq!(clock.delta(t0 + Duration::from_millis(16)), Duration::from_millis(16));
    assert_eq!(clock.delta(t0 + Duration::from_millis(50)), Duration::from_millis(34));
    assert_eq!(clock.elapsed(), Duration::from_millis(50));
}

#[test]
fn clock_reset_discards_the_gap() {
    let t0 = Instant::now();
    let mut clock = FrameClock::new();
    clock.reset(t0);
    clock.delta(t0 + Duration::from_millis(20));
    clock.reset(t0 + Duration::from_secs(10));
    assert_eq!(clock.elapsed(), Duration::ZERO);
    assert_eq!(
        clock.delta(t0 + Duration::from_secs(10) + Duration::from_millis(8)),
        Duration::from_millis(8)
    );
}

#[test]
fn clock_ignores_time_going_backwards() {
    let t0 = Instant::now() + Duration::from_secs(1);
    let mut clock = FrameClock::new();
    clock.reset(t0);
    assert_eq!(clock.delta(t0 - Duration::from_millis(5)), Duration::ZERO);
}

#[test]
fn debouncer_fires_once_after_quiet_period() {
    let t0 = Instant::now();
    let mut d = Debouncer::new(Duration::from_millis(RESIZE_DEBOUNCE_MS));
    assert!(!d.poll(t0));
    d.trigger(t0);
    assert!(d.is_pending());
    assert!(!d.poll(t0 + Duration::from_millis(99)));
    assert!(d.poll(t0 + Duration::from_millis(100)));
    assert!(!d.is_pending());
    assert!(!d.poll(t0 + Duration::from_millis(500)));
}

#[test]
fn debouncer_restarts_on_every_trigger() {
    let t0 = Instant::now();
    let mut d = Debouncer::new(Duration::from_millis(100));
    for i in 0..10 {
        d.trigger(t0 + Duration::from_millis(i * 30));
        assert!(!d.poll(t0 + Duration::from_millis(i * 30 + 50)));
    }
    let last = t0 + Duration::from_millis(9 * 30);
    assert!(!d.poll(last + Duration::from_millis(99)));
    assert!(d.poll(last + Duration::from_millis(100)));
}

#[test]
fn debouncer_cancel_drops_pending_event() {
    let t0 = Instant::now();
    let mut d = Debouncer::new(Duration::from_millis(100));
    d.trigger(t0);
    d.cancel();
    assert!(!d.poll(t0 + Duration::from_secs(1)));
}

#[test]
fn debouncer_reports_time_left_until_it_fires() {
    let t0 = Instant::now();
    let mut d = Debouncer::new(Duration::from_millis(100));
    assert_eq!(d.remaining(t0), None);

    d.trigger(t0);
    assert_eq!(d.remaining(t0), Some(Duration::from_millis(100)));
    // a timer that wakes slightly early still sees the event pending
    assert!(!d.poll(t0 + Duration::from_millis(99)));
    assert_eq!(
        d.remaining(t0 + Duration::from_millis(99)),
        Some(Duration::from_millis(1))
    );
    assert_eq!(d.remaining(t0 + Duration::from_millis(150)), Some(Duration::ZERO));
    assert!(d.poll(t0 + Duration::from_millis(101)));
    assert_eq!(d.remaining(t0 + Duration::from_millis(101)), None);
}
