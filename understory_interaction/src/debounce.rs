// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trailing-edge debounce over caller-supplied timestamps.
//!
//! The helper owns no clock. Feed it monotonic milliseconds from your event
//! loop: [`Debounce::trigger`] arms (or re-arms) the deadline and
//! [`Debounce::fire`] reports once when the quiet window has elapsed.
//!
//! ```
//! use understory_interaction::debounce::Debounce;
//!
//! let mut d = Debounce::new(300);
//! d.trigger(1000);
//! d.trigger(1200); // cancels the pending call and restarts the window
//! assert!(!d.fire(1400));
//! assert!(d.fire(1500));
//! assert!(!d.fire(1600));
//! ```

/// A single pending trailing-edge call.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Debounce {
    window: u64,
    deadline: Option<u64>,
}

impl Debounce {
    /// Create an idle debouncer with a quiet window of `window` milliseconds.
    pub fn new(window: u64) -> Self {
        Self {
            window,
            deadline: None,
        }
    }

    /// The quiet window in milliseconds.
    pub fn window(&self) -> u64 {
        self.window
    }

    /// Record a call at `now`, replacing any pending one.
    pub fn trigger(&mut self, now: u64) {
        self.deadline = Some(now.saturating_add(self.window));
    }

    /// Drop the pending call, if any.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// When the pending call is due.
    pub fn deadline(&self) -> Option<u64> {
        self.deadline
    }

    /// Whether a call is waiting.
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns `true` exactly once when the pending call is due at `now`.
    pub fn fire(&mut self, now: u64) -> bool {
        match self.deadline {
            Some(due) if due <= now => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_never_fires() {
        let mut d = Debounce::new(10);
        assert!(!d.fire(u64::MAX));
    }

    #[test]
    fn burst_fires_once_after_last_call() {
        let mut d = Debounce::new(300);
        for t in [0, 100, 200, 250] {
            d.trigger(t);
        }
        assert_eq!(d.deadline(), Some(550));
        assert!(!d.fire(549));
        assert!(d.fire(550));
        assert!(!d.is_pending());
    }

    #[test]
    fn cancel_drops_pending_call() {
        let mut d = Debounce::new(5);
        d.trigger(0);
        d.cancel();
        assert!(!d.fire(100));
    }
}
