//! Combo multiplier state machine
//!
//! Idle: multiplier 1, no deadline. Active: multiplier > 1, counting down.
//! Every food event doubles the multiplier (capped) and resets the window;
//! the window expiring drops straight back to Idle.
//!
//! Deadlines are wall-clock milliseconds on the session clock, so entering
//! or leaving slow-motion does not change the remaining real time.

use serde::{Deserialize, Serialize};

use crate::consts::{COMBO_MAX_MULTIPLIER, COMBO_WINDOW_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComboTracker {
    multiplier: u32,
    expires_at: Option<u64>,
}

impl Default for ComboTracker {
    fn default() -> Self {
        Self {
            multiplier: 1,
            expires_at: None,
        }
    }
}

impl ComboTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current score multiplier, in [1, 16]
    pub fn multiplier(&self) -> u32 {
        self.multiplier
    }

    pub fn is_active(&self) -> bool {
        self.expires_at.is_some()
    }

    /// Wall-clock deadline of the running window, if any
    pub fn expires_at(&self) -> Option<u64> {
        self.expires_at
    }

    /// Food eaten: double (capped) and restart the window.
    /// Returns the new deadline for the caller to schedule.
    pub fn extend(&mut self, now_ms: u64) -> u64 {
        self.multiplier = (self.multiplier * 2).min(COMBO_MAX_MULTIPLIER);
        let deadline = now_ms + COMBO_WINDOW_MS;
        self.expires_at = Some(deadline);
        deadline
    }

    /// A ComboExpiry timer fired. Only the deadline that is actually due
    /// resets the combo; anything earlier is a stale entry from a window
    /// that was since extended.
    pub fn expire(&mut self, now_ms: u64) -> bool {
        match self.expires_at {
            Some(at) if now_ms >= at => {
                self.reset();
                true
            }
            _ => false,
        }
    }

    pub fn reset(&mut self) {
        self.multiplier = 1;
        self.expires_at = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_idle_at_one() {
        let combo = ComboTracker::new();
        assert_eq!(combo.multiplier(), 1);
        assert!(!combo.is_active());
    }

    #[test]
    fn test_extend_doubles_and_caps() {
        let mut combo = ComboTracker::new();
        for expected in [2, 4, 8, 16, 16, 16] {
            combo.extend(0);
            assert_eq!(combo.multiplier(), expected);
        }
    }

    #[test]
    fn test_extend_sets_window() {
        let mut combo = ComboTracker::new();
        let deadline = combo.extend(1000);
        assert_eq!(deadline, 1000 + COMBO_WINDOW_MS);
        assert_eq!(combo.expires_at(), Some(deadline));
    }

    #[test]
    fn test_expiry_resets_to_idle() {
        let mut combo = ComboTracker::new();
        let deadline = combo.extend(0);
        assert!(combo.expire(deadline));
        assert_eq!(combo.multiplier(), 1);
        assert!(!combo.is_active());
    }

    #[test]
    fn test_stale_expiry_ignored_after_extension() {
        let mut combo = ComboTracker::new();
        let first = combo.extend(0);
        // Second food before the first window elapsed
        combo.extend(1000);
        // The stale timer from the first window fires; clock < new deadline
        assert!(!combo.expire(first));
        assert_eq!(combo.multiplier(), 4);
        assert!(combo.is_active());
    }
}
