//! Deferred callbacks as next-fire timestamps polled once per tick.
//!
//! A timer holds at most one pending deadline, so a new callback can only
//! be armed after the previous one has fired.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeferredTimer {
    next_fire_ms: Option<u64>,
}

impl DeferredTimer {
    /// Arm the timer to fire at `at_ms`. Refused while a deadline is pending.
    pub fn arm(&mut self, at_ms: u64) -> bool {
        if self.next_fire_ms.is_some() {
            return false;
        }
        self.next_fire_ms = Some(at_ms);
        true
    }

    /// Consume the deadline if it has passed. Returns true exactly once per arm.
    pub fn fire_if_due(&mut self, now_ms: u64) -> bool {
        match self.next_fire_ms {
            Some(at) if now_ms >= at => {
                self.next_fire_ms = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.next_fire_ms.is_some()
    }

    pub fn next_fire_ms(&self) -> Option<u64> {
        self.next_fire_ms
    }

    pub fn disarm(&mut self) {
        self.next_fire_ms = None;
    }
}
