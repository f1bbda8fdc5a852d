use std::time::{Duration, Instant};

use planit::pipeline::debounce::{Debouncer, Trigger};

const QUIET: Duration = Duration::from_millis(1000);

#[test]
fn test_radius_drag_waits_for_quiet_period() {
    let now = Instant::now();
    let mut debouncer = Debouncer::new(QUIET);

    debouncer.schedule(Trigger::RadiusDrag, now);
    assert!(!debouncer.take_ready(now), "must not fire inside the quiet period");
    assert!(!debouncer.take_ready(now + Duration::from_millis(999)));
    assert!(debouncer.take_ready(now + Duration::from_millis(1000)), "must fire at the deadline");
    assert!(debouncer.is_idle());
}

#[test]
fn test_radius_burst_coalesces_to_single_fire() {
    let now = Instant::now();
    let mut debouncer = Debouncer::new(QUIET);

    // Five slider ticks inside the window; each resets the one shared timer.
    for i in 0..5 {
        debouncer.schedule(Trigger::RadiusDrag, now + Duration::from_millis(i * 100));
    }

    // Deadline counts from the LAST change (400ms), not the first.
    assert!(!debouncer.take_ready(now + Duration::from_millis(1000)));
    assert!(debouncer.take_ready(now + Duration::from_millis(1400)));
    // Exactly one fire: nothing left pending.
    assert!(!debouncer.take_ready(now + Duration::from_millis(5000)), "timer must not fire twice");
}

#[test]
fn test_toggle_fires_immediately() {
    let now = Instant::now();
    let mut debouncer = Debouncer::new(QUIET);

    debouncer.schedule(Trigger::Toggle, now);
    assert!(debouncer.take_ready(now), "toggle must fire without waiting");
    assert!(!debouncer.take_ready(now), "fire must be consumed exactly once");
}

#[test]
fn test_submit_bypasses_and_clears_pending_timer() {
    let now = Instant::now();
    let mut debouncer = Debouncer::new(QUIET);

    debouncer.schedule(Trigger::RadiusDrag, now);
    debouncer.schedule(Trigger::TextSubmit, now + Duration::from_millis(100));

    assert!(debouncer.take_ready(now + Duration::from_millis(100)), "submit is unconditional");
    // The superseded radius timer must not produce a duplicate dispatch.
    assert!(
        !debouncer.take_ready(now + Duration::from_millis(2000)),
        "immediate fire must replace the pending radius timer"
    );
}

#[test]
fn test_new_drag_replaces_prior_deadline() {
    let now = Instant::now();
    let mut debouncer = Debouncer::new(QUIET);

    debouncer.schedule(Trigger::RadiusDrag, now);
    let first = debouncer.next_deadline().expect("deadline armed");
    debouncer.schedule(Trigger::RadiusDrag, now + Duration::from_millis(500));
    let second = debouncer.next_deadline().expect("deadline still armed");

    assert!(second > first, "rescheduling must push the single deadline out");
}
