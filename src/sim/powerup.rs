//! Turbo, slow-motion and shield state
//!
//! Turbo and slow-motion are mutually exclusive timed modifiers drawing on
//! separate unit pools; shields are a passive counter spent one at a time by
//! the collision resolver.

use serde::{Deserialize, Serialize};

use super::schedule::{EventQueue, SpeedModifier, TickScheduler, TimerKind};
use crate::consts::{
    SLOWMO_DURATION_MS, TURBO_DURATION_MS, TURBO_START_POWER, TURBO_START_UNITS,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Powerups {
    pub turbo_units: u32,
    /// Turbo speed multiplier; only ever raised by TurboPower pickups
    pub turbo_power: f32,
    pub turbo_active: bool,
    pub turbo_expires_at: Option<u64>,
    pub slowmo_units: u32,
    pub slowmo_active: bool,
    pub slowmo_expires_at: Option<u64>,
    pub shields: u32,
}

impl Default for Powerups {
    fn default() -> Self {
        Self {
            turbo_units: TURBO_START_UNITS,
            turbo_power: TURBO_START_POWER,
            turbo_active: false,
            turbo_expires_at: None,
            slowmo_units: 0,
            slowmo_active: false,
            slowmo_expires_at: None,
            shields: 0,
        }
    }
}

impl Powerups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spend a unit and engage turbo. Fails (leaving everything untouched)
    /// unless turbo is inactive, slow-motion is inactive and a unit remains.
    pub fn activate_turbo(
        &mut self,
        now_ms: u64,
        scheduler: &mut TickScheduler,
        timers: &mut EventQueue,
    ) -> bool {
        if self.turbo_active || self.slowmo_active || self.turbo_units == 0 {
            return false;
        }
        self.turbo_units -= 1;
        self.turbo_active = true;
        let deadline = now_ms + TURBO_DURATION_MS;
        self.turbo_expires_at = Some(deadline);
        scheduler.apply_modifier(SpeedModifier::Turbo {
            power: self.turbo_power,
        });
        timers.schedule(deadline, TimerKind::TurboExpiry);
        true
    }

    /// A TurboExpiry timer fired; restore the base interval if it is due
    pub fn expire_turbo(&mut self, now_ms: u64, scheduler: &mut TickScheduler) -> bool {
        match self.turbo_expires_at {
            Some(at) if self.turbo_active && now_ms >= at => {
                self.turbo_active = false;
                self.turbo_expires_at = None;
                scheduler.clear_modifier();
                true
            }
            _ => false,
        }
    }

    /// Spend a unit and engage slow-motion. Mirrors the turbo preconditions
    /// with the slow-motion pool; the duration is constant wall-clock time.
    pub fn activate_slowmo(
        &mut self,
        now_ms: u64,
        scheduler: &mut TickScheduler,
        timers: &mut EventQueue,
    ) -> bool {
        if self.slowmo_active || self.turbo_active || self.slowmo_units == 0 {
            return false;
        }
        self.slowmo_units -= 1;
        self.slowmo_active = true;
        let deadline = now_ms + SLOWMO_DURATION_MS;
        self.slowmo_expires_at = Some(deadline);
        scheduler.apply_modifier(TickScheduler::slowmo_modifier());
        timers.schedule(deadline, TimerKind::SlowMoExpiry);
        true
    }

    /// A SlowMoExpiry timer fired; restore the base interval if it is due
    pub fn expire_slowmo(&mut self, now_ms: u64, scheduler: &mut TickScheduler) -> bool {
        match self.slowmo_expires_at {
            Some(at) if self.slowmo_active && now_ms >= at => {
                self.slowmo_active = false;
                self.slowmo_expires_at = None;
                scheduler.clear_modifier();
                true
            }
            _ => false,
        }
    }

    /// Consume one shield for a negated collision. Returns false at zero.
    pub fn use_shield(&mut self) -> bool {
        if self.shields == 0 {
            return false;
        }
        self.shields -= 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SLOWMO_FACTOR;

    fn fixtures() -> (TickScheduler, EventQueue) {
        (TickScheduler::new(100), EventQueue::new())
    }

    #[test]
    fn test_turbo_activation_spends_unit_and_halves_interval() {
        let (mut scheduler, mut timers) = fixtures();
        let mut powerups = Powerups::new();
        assert!(powerups.activate_turbo(0, &mut scheduler, &mut timers));
        assert_eq!(powerups.turbo_units, TURBO_START_UNITS - 1);
        assert!(powerups.turbo_active);
        assert_eq!(scheduler.interval_ms(), 50);
    }

    #[test]
    fn test_turbo_requires_a_unit() {
        let (mut scheduler, mut timers) = fixtures();
        let mut powerups = Powerups {
            turbo_units: 0,
            ..Powerups::new()
        };
        assert!(!powerups.activate_turbo(0, &mut scheduler, &mut timers));
        assert!(!powerups.turbo_active);
        assert_eq!(scheduler.interval_ms(), 100);
    }

    #[test]
    fn test_turbo_not_reentrant() {
        let (mut scheduler, mut timers) = fixtures();
        let mut powerups = Powerups::new();
        assert!(powerups.activate_turbo(0, &mut scheduler, &mut timers));
        assert!(!powerups.activate_turbo(0, &mut scheduler, &mut timers));
        // Only the first activation spent a unit
        assert_eq!(powerups.turbo_units, TURBO_START_UNITS - 1);
    }

    #[test]
    fn test_turbo_expiry_restores_interval() {
        let (mut scheduler, mut timers) = fixtures();
        let mut powerups = Powerups::new();
        powerups.activate_turbo(0, &mut scheduler, &mut timers);
        // Not yet due
        assert!(!powerups.expire_turbo(TURBO_DURATION_MS - 1, &mut scheduler));
        assert!(powerups.expire_turbo(TURBO_DURATION_MS, &mut scheduler));
        assert!(!powerups.turbo_active);
        assert_eq!(scheduler.interval_ms(), 100);
    }

    #[test]
    fn test_mutual_exclusion() {
        let (mut scheduler, mut timers) = fixtures();
        let mut powerups = Powerups {
            slowmo_units: 1,
            ..Powerups::new()
        };
        assert!(powerups.activate_turbo(0, &mut scheduler, &mut timers));
        // Slow-mo refused while turbo runs; the unit is kept
        assert!(!powerups.activate_slowmo(0, &mut scheduler, &mut timers));
        assert_eq!(powerups.slowmo_units, 1);
        assert!(!(powerups.turbo_active && powerups.slowmo_active));

        powerups.expire_turbo(TURBO_DURATION_MS, &mut scheduler);
        assert!(powerups.activate_slowmo(TURBO_DURATION_MS, &mut scheduler, &mut timers));
        assert!(!powerups.activate_turbo(TURBO_DURATION_MS, &mut scheduler, &mut timers));
        assert!(!(powerups.turbo_active && powerups.slowmo_active));
    }

    #[test]
    fn test_slowmo_stretches_interval_for_fixed_wall_clock() {
        let (mut scheduler, mut timers) = fixtures();
        let mut powerups = Powerups {
            slowmo_units: 1,
            ..Powerups::new()
        };
        assert!(powerups.activate_slowmo(0, &mut scheduler, &mut timers));
        assert_eq!(
            scheduler.interval_ms(),
            (100.0 / SLOWMO_FACTOR).round() as u32
        );
        assert_eq!(powerups.slowmo_expires_at, Some(SLOWMO_DURATION_MS));
        assert!(powerups.expire_slowmo(SLOWMO_DURATION_MS, &mut scheduler));
        assert_eq!(scheduler.interval_ms(), 100);
    }

    #[test]
    fn test_shield_consumption() {
        let mut powerups = Powerups {
            shields: 2,
            ..Powerups::new()
        };
        assert!(powerups.use_shield());
        assert!(powerups.use_shield());
        assert!(!powerups.use_shield());
        assert_eq!(powerups.shields, 0);
    }
}
