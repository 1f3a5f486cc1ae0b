//! Tick scheduling and deferred expiry events
//!
//! The host drives the recurring tick and re-reads `TickScheduler::interval_ms`
//! after every step, so an interval change always replaces the previous
//! schedule and two ticks can never be in flight at once.
//!
//! Power-up and combo expiries are NOT host timers. They are entries in a
//! session-owned [`EventQueue`] keyed by the simulated wall clock, which
//! advances by the effective interval each tick. Deadlines are therefore
//! wall-clock deadlines regardless of the active speed modifier, and a
//! generation bump on reset makes every outstanding entry a no-op.

use serde::{Deserialize, Serialize};

use crate::consts::{MIN_TICK_INTERVAL_MS, SLOWMO_FACTOR};

/// Active speed modifier, at most one at a time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SpeedModifier {
    /// Turbo: factor > 1 shortens the interval
    Turbo { power: f32 },
    /// Slow-motion: factor < 1 stretches the interval
    SlowMo { factor: f32 },
}

impl SpeedModifier {
    /// The speed factor the interval is divided by
    pub fn speed_factor(self) -> f32 {
        match self {
            SpeedModifier::Turbo { power } => power,
            SpeedModifier::SlowMo { factor } => factor,
        }
    }
}

/// Owns the current tick interval: base speed divided by the active modifier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickScheduler {
    base_interval_ms: u32,
    modifier: Option<SpeedModifier>,
}

impl TickScheduler {
    pub fn new(base_interval_ms: u32) -> Self {
        Self {
            base_interval_ms,
            modifier: None,
        }
    }

    pub fn base_interval_ms(&self) -> u32 {
        self.base_interval_ms
    }

    pub fn set_base_interval(&mut self, ms: u32) {
        self.base_interval_ms = ms;
    }

    pub fn apply_modifier(&mut self, modifier: SpeedModifier) {
        self.modifier = Some(modifier);
    }

    pub fn clear_modifier(&mut self) {
        self.modifier = None;
    }

    pub fn modifier(&self) -> Option<SpeedModifier> {
        self.modifier
    }

    /// Effective interval: `base / speed_factor`, floored at 20 ms
    pub fn interval_ms(&self) -> u32 {
        let factor = self.modifier.map_or(1.0, SpeedModifier::speed_factor);
        let scaled = (self.base_interval_ms as f32 / factor).round() as u32;
        scaled.max(MIN_TICK_INTERVAL_MS)
    }

    /// Convenience constructor for the standard slow-motion modifier
    pub fn slowmo_modifier() -> SpeedModifier {
        SpeedModifier::SlowMo {
            factor: SLOWMO_FACTOR,
        }
    }
}

/// What a deferred event does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerKind {
    TurboExpiry,
    SlowMoExpiry,
    ComboExpiry,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct Deadline {
    at_ms: u64,
    generation: u64,
    kind: TimerKind,
}

/// Session-owned queue of deferred expiries keyed by the simulated wall clock
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventQueue {
    entries: Vec<Deadline>,
    generation: u64,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `kind` to fire once the clock reaches `at_ms`
    pub fn schedule(&mut self, at_ms: u64, kind: TimerKind) {
        self.entries.push(Deadline {
            at_ms,
            generation: self.generation,
            kind,
        });
    }

    /// Cancel everything outstanding. Bumping the generation also kills
    /// entries that were drained but not yet acted upon.
    pub fn cancel_all(&mut self) {
        self.entries.clear();
        self.generation = self.generation.wrapping_add(1);
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Drain every entry due at `now_ms`, earliest first. Entries from a
    /// cancelled generation are silently discarded.
    pub fn fire_due(&mut self, now_ms: u64) -> Vec<TimerKind> {
        let generation = self.generation;
        let mut due: Vec<Deadline> = Vec::new();
        self.entries.retain(|entry| {
            if entry.at_ms <= now_ms {
                if entry.generation == generation {
                    due.push(*entry);
                }
                false
            } else {
                true
            }
        });
        due.sort_by_key(|entry| entry.at_ms);
        due.into_iter().map(|entry| entry.kind).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_unmodified() {
        let scheduler = TickScheduler::new(100);
        assert_eq!(scheduler.interval_ms(), 100);
    }

    #[test]
    fn test_turbo_halves_interval() {
        let mut scheduler = TickScheduler::new(100);
        scheduler.apply_modifier(SpeedModifier::Turbo { power: 2.0 });
        assert_eq!(scheduler.interval_ms(), 50);
        scheduler.clear_modifier();
        assert_eq!(scheduler.interval_ms(), 100);
    }

    #[test]
    fn test_slowmo_stretches_interval() {
        let mut scheduler = TickScheduler::new(100);
        scheduler.apply_modifier(SpeedModifier::SlowMo { factor: 0.5 });
        assert_eq!(scheduler.interval_ms(), 200);
    }

    #[test]
    fn test_interval_floor() {
        let mut scheduler = TickScheduler::new(50);
        scheduler.apply_modifier(SpeedModifier::Turbo { power: 4.0 });
        // 50 / 4 = 12.5 → floored at the 20 ms minimum
        assert_eq!(scheduler.interval_ms(), 20);
    }

    #[test]
    fn test_base_change_takes_effect() {
        let mut scheduler = TickScheduler::new(200);
        scheduler.set_base_interval(80);
        assert_eq!(scheduler.interval_ms(), 80);
    }

    #[test]
    fn test_queue_fires_in_deadline_order() {
        let mut queue = EventQueue::new();
        queue.schedule(300, TimerKind::ComboExpiry);
        queue.schedule(100, TimerKind::TurboExpiry);
        queue.schedule(200, TimerKind::SlowMoExpiry);

        assert_eq!(queue.fire_due(50), vec![]);
        assert_eq!(
            queue.fire_due(250),
            vec![TimerKind::TurboExpiry, TimerKind::SlowMoExpiry]
        );
        assert_eq!(queue.fire_due(300), vec![TimerKind::ComboExpiry]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_cancel_all_discards_pending() {
        let mut queue = EventQueue::new();
        queue.schedule(100, TimerKind::TurboExpiry);
        queue.cancel_all();
        assert!(queue.is_empty());
        assert_eq!(queue.fire_due(1000), vec![]);
    }

    #[test]
    fn test_generation_bump_invalidates_stale_entries() {
        let mut queue = EventQueue::new();
        let before = queue.generation();
        queue.schedule(100, TimerKind::ComboExpiry);
        queue.cancel_all();
        assert_ne!(queue.generation(), before);
        // A fresh schedule after the bump still works
        queue.schedule(150, TimerKind::ComboExpiry);
        assert_eq!(queue.fire_due(200), vec![TimerKind::ComboExpiry]);
    }
}
