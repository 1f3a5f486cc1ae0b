//! Turbo Snake - a grid-based snake arcade sim
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid motion, collisions, power-ups, items)
//! - `game`: Session control surface and external-interface glue
//! - `settings`: Game configuration (grid size, speed slider)
//! - `highscores`: High-score record and persistence boundary

pub mod game;
pub mod highscores;
pub mod settings;
pub mod sim;

pub use game::{MessageSink, NullSink, SnakeGame};
pub use highscores::{HighScoreRecord, HighScoreStore};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Default grid dimensions (cells)
    pub const GRID_WIDTH: i32 = 30;
    pub const GRID_HEIGHT: i32 = 20;

    /// Base tick interval range, driven by the speed slider
    pub const MIN_BASE_INTERVAL_MS: u32 = 50;
    pub const MAX_BASE_INTERVAL_MS: u32 = 200;
    pub const DEFAULT_BASE_INTERVAL_MS: u32 = 100;
    /// Hard floor for the effective interval, whatever the modifiers say
    pub const MIN_TICK_INTERVAL_MS: u32 = 20;

    /// Turbo defaults
    pub const TURBO_START_UNITS: u32 = 3;
    pub const TURBO_START_POWER: f32 = 2.0;
    pub const TURBO_POWER_STEP: f32 = 0.2;
    pub const TURBO_UNITS_PER_PICKUP: u32 = 3;
    pub const TURBO_DURATION_MS: u64 = 3000;

    /// Slow-motion: speed factor < 1 stretches the interval
    pub const SLOWMO_FACTOR: f32 = 0.5;
    pub const SLOWMO_DURATION_MS: u64 = 4000;

    /// Combo scoring
    pub const COMBO_WINDOW_MS: u64 = 3000;
    pub const COMBO_MAX_MULTIPLIER: u32 = 16;
    pub const FOOD_VALUE: u32 = 1;
    pub const BONUS_VALUE: u32 = 5;

    /// Item spawning
    pub const MAX_ACTIVE_ITEMS: usize = 5;
    pub const ITEM_SPAWN_CHANCE: f64 = 0.2;
    pub const BONUS_CATEGORY_WEIGHT: f64 = 0.6;
    pub const PLACEMENT_ATTEMPTS: u32 = 32;
    /// Spawn margin (cells) for items with inherent motion
    pub const MOVING_SPAWN_MARGIN: i32 = 2;
    /// Drifting items despawn this far past the grid edge
    pub const ITEM_EXIT_MARGIN: f32 = 2.0;
    /// Drift speed range, cells per tick
    pub const ITEM_MIN_SPEED: f32 = 0.25;
    pub const ITEM_MAX_SPEED: f32 = 0.45;

    /// Shrinking zones
    pub const ZONE_MIN_START_RADIUS: f32 = 2.5;
    pub const ZONE_MAX_START_RADIUS: f32 = 3.5;
    pub const ZONE_MIN_RADIUS: f32 = 0.5;
    pub const ZONE_SHRINK_PER_SEC: f32 = 0.25;
    pub const ZONE_BITE_CHANCE: f64 = 0.15;

    /// ReduceLength bonus trims this fraction of the tail (at least 1 segment)
    pub const SHRINK_FRACTION: f32 = 0.25;

    /// Transient notice lifetime
    pub const NOTICE_TTL_MS: u32 = 2500;
}
