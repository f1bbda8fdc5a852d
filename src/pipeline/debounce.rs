use std::time::{Duration, Instant};

/// What caused a request to be scheduled. Each trigger has its own timing
/// policy; all three feed the same debouncer so only one request can be
/// pending at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Active/inactive flip: fires on the same step, right after the state
    /// mutation has completed.
    Toggle,
    /// Slider movement: trailing-edge debounce over ONE shared timer for all
    /// radius controls; each change resets it.
    RadiusDrag,
    /// Explicit submit (Enter / button): fires unconditionally, bypassing
    /// the quiet period.
    TextSubmit,
}

/// Coalesces bursts of state changes into a single dispatch. Pure logic:
/// the debouncer never sleeps, the driver does (`next_deadline`). The
/// session captures its snapshot when `take_ready` reports a fire, which is
/// fire time, not schedule time.
#[derive(Debug)]
pub struct Debouncer {
    quiet_period: Duration,
    deadline: Option<Instant>,
    fire_now: bool,
}

impl Debouncer {
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            deadline: None,
            fire_now: false,
        }
    }

    pub fn schedule(&mut self, trigger: Trigger, now: Instant) {
        match trigger {
            Trigger::RadiusDrag => {
                // Replaces any prior uncommitted timer; at most one pending
                // deadline ever exists.
                self.deadline = Some(now + self.quiet_period);
            }
            Trigger::Toggle | Trigger::TextSubmit => {
                // An immediate fire supersedes a pending radius timer; the
                // dispatch it replaces would have carried the same snapshot.
                self.fire_now = true;
                self.deadline = None;
            }
        }
    }

    /// True exactly once per committed fire.
    pub fn take_ready(&mut self, now: Instant) -> bool {
        if self.fire_now {
            self.fire_now = false;
            self.deadline = None;
            return true;
        }
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// When the driver should next wake us, if a radius timer is pending.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_idle(&self) -> bool {
        !self.fire_now && self.deadline.is_none()
    }
}
