//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per call, driven by the host at the scheduler's interval
//! - Seeded RNG only
//! - Deferred expiries keyed by the simulated wall clock, never host timers
//! - No rendering or platform dependencies

pub mod collision;
pub mod combo;
pub mod grid;
pub mod items;
pub mod powerup;
pub mod schedule;
pub mod snake;
pub mod state;
pub mod tick;

pub use collision::{HazardContact, bonus_contact, hazard_contact, hits_self, hits_wall};
pub use combo::ComboTracker;
pub use grid::{Direction, Grid};
pub use items::{BonusKind, Item, ItemKind, ItemManager};
pub use powerup::Powerups;
pub use schedule::{EventQueue, SpeedModifier, TickScheduler, TimerKind};
pub use snake::SnakeBody;
pub use state::{Food, GameEvent, GamePhase, GameSession, ShieldCause, Snapshot};
pub use tick::{TickInput, tick};
