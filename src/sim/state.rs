//! Session state and core simulation types
//!
//! Everything a run owns lives in [`GameSession`] by composition: snake,
//! food, items, combo, power-ups, scheduler, timer queue, score and the
//! seeded RNG. No ambient globals; a fixed seed reproduces a run.

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::combo::ComboTracker;
use super::grid::{Direction, Grid};
use super::items::{BonusKind, Item, ItemManager};
use super::powerup::Powerups;
use super::schedule::{EventQueue, TickScheduler};
use super::snake::SnakeBody;
use crate::consts::PLACEMENT_ATTEMPTS;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Created but not started; nothing moves
    Idle,
    /// Active gameplay
    Running,
    /// Run ended on a fatal collision
    GameOver,
}

/// The single food cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Food {
    pub pos: IVec2,
    pub active: bool,
}

/// What a consumed shield negated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShieldCause {
    Wall,
    SelfHit,
    Hazard,
}

/// Observable things that happened during one tick, for the glue layer to
/// turn into notices, persistence calls and sounds
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    ShieldUsed { cause: ShieldCause, remaining: u32 },
    FoodEaten { gained: u32, multiplier: u32 },
    BonusCollected { effect: BonusKind, gained: u32 },
    TurboUnitsAdded { total: u32 },
    TurboPowerRaised { power: f32 },
    LengthReduced { removed: usize },
    ShrinkFailed,
    ShieldAdded { total: u32 },
    SlowMoUnitAdded { total: u32 },
    TurboActivated { power: f32 },
    TurboExpired,
    SlowMoActivated,
    SlowMoExpired,
    ComboExpired,
    TailBitten { remaining: usize },
    GameOver { score: u32 },
}

/// Read-only state snapshot handed to the renderer
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub snake: Vec<IVec2>,
    pub direction: Direction,
    pub food: Option<IVec2>,
    pub items: Vec<Item>,
    pub shields: u32,
    pub turbo_units: u32,
    pub turbo_power: f32,
    pub turbo_active: bool,
    pub slowmo_units: u32,
    pub slowmo_active: bool,
    pub score: u32,
    pub multiplier: u32,
    pub interval_ms: u32,
}

/// Complete per-run simulation state
#[derive(Debug, Clone)]
pub struct GameSession {
    pub grid: Grid,
    pub snake: SnakeBody,
    pub direction: Direction,
    pub food: Food,
    pub items: ItemManager,
    pub combo: ComboTracker,
    pub powerups: Powerups,
    pub scheduler: TickScheduler,
    pub timers: EventQueue,
    pub score: u32,
    pub player_name: String,
    pub phase: GamePhase,
    /// Simulated wall clock, advanced by the effective interval each tick
    pub clock_ms: u64,
    pub tick_index: u64,
    pub seed: u64,
    pub(crate) rng: Pcg32,
}

impl GameSession {
    /// Fresh idle session with the snake at the grid center
    pub fn new(grid: Grid, base_interval_ms: u32, seed: u64) -> Self {
        let mut session = Self {
            grid,
            snake: SnakeBody::new(grid.center()),
            direction: Direction::None,
            food: Food {
                pos: IVec2::ZERO,
                active: false,
            },
            items: ItemManager::new(),
            combo: ComboTracker::new(),
            powerups: Powerups::new(),
            scheduler: TickScheduler::new(base_interval_ms),
            timers: EventQueue::new(),
            score: 0,
            player_name: String::new(),
            phase: GamePhase::Idle,
            clock_ms: 0,
            tick_index: 0,
            seed,
            rng: Pcg32::seed_from_u64(seed),
        };
        session.place_food();
        session
    }

    /// Begin a run for the named player, starting from a clean slate
    pub fn start(&mut self, player_name: &str) {
        self.reset();
        self.player_name = player_name.to_string();
        self.phase = GamePhase::Running;
        log::info!("session started for {player_name}");
    }

    /// Back to a fresh idle state. Cancels every outstanding deferred
    /// callback first so nothing from the old run can touch the new one.
    pub fn reset(&mut self) {
        self.timers.cancel_all();
        self.scheduler.clear_modifier();
        self.snake = SnakeBody::new(self.grid.center());
        self.direction = Direction::None;
        self.items.clear();
        self.combo.reset();
        self.powerups = Powerups::new();
        self.score = 0;
        self.player_name.clear();
        self.phase = GamePhase::Idle;
        self.clock_ms = 0;
        self.tick_index = 0;
        self.place_food();
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Current effective tick interval for the host's scheduling decision
    pub fn tick_interval_ms(&self) -> u32 {
        self.scheduler.interval_ms()
    }

    /// Try to place food on a free cell. Failure leaves the food inactive;
    /// the tick loop retries on later ticks.
    pub fn place_food(&mut self) {
        for _ in 0..PLACEMENT_ATTEMPTS {
            let cell = self.grid.random_cell(&mut self.rng);
            if !self.snake.occupies(cell) && !self.items.occupies(cell) {
                self.food = Food {
                    pos: cell,
                    active: true,
                };
                return;
            }
        }
        self.food.active = false;
        log::debug!("food placement failed, retrying next tick");
    }

    /// Terminal transition: stop everything, freeze the final score.
    /// High-score comparison happens at the persistence boundary above.
    pub(crate) fn game_over(&mut self) {
        self.phase = GamePhase::GameOver;
        self.timers.cancel_all();
        self.scheduler.clear_modifier();
        self.powerups.turbo_active = false;
        self.powerups.turbo_expires_at = None;
        self.powerups.slowmo_active = false;
        self.powerups.slowmo_expires_at = None;
        log::info!(
            "game over for {}: score {}",
            self.player_name,
            self.score
        );
    }

    /// Owned read-only snapshot for the renderer
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            snake: self.snake.to_vec(),
            direction: self.direction,
            food: self.food.active.then_some(self.food.pos),
            items: self.items.items.clone(),
            shields: self.powerups.shields,
            turbo_units: self.powerups.turbo_units,
            turbo_power: self.powerups.turbo_power,
            turbo_active: self.powerups.turbo_active,
            slowmo_units: self.powerups.slowmo_units,
            slowmo_active: self.powerups.slowmo_active,
            score: self.score,
            multiplier: self.combo.multiplier(),
            interval_ms: self.scheduler.interval_ms(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::DEFAULT_BASE_INTERVAL_MS;

    fn session() -> GameSession {
        GameSession::new(Grid::new(30, 20), DEFAULT_BASE_INTERVAL_MS, 1)
    }

    #[test]
    fn test_new_session_is_idle_with_food() {
        let session = session();
        assert_eq!(session.phase, GamePhase::Idle);
        assert_eq!(session.snake.len(), 1);
        assert_eq!(session.snake.head(), IVec2::new(15, 10));
        assert!(session.food.active);
        assert_ne!(session.food.pos, session.snake.head());
    }

    #[test]
    fn test_start_enters_running() {
        let mut session = session();
        session.start("ada");
        assert!(session.is_running());
        assert_eq!(session.player_name, "ada");
        assert_eq!(session.direction, Direction::None);
    }

    #[test]
    fn test_reset_cancels_timers_and_clears_state() {
        let mut session = session();
        session.start("ada");
        session.score = 42;
        session
            .timers
            .schedule(1000, super::super::schedule::TimerKind::ComboExpiry);
        let generation = session.timers.generation();
        session.reset();
        assert_eq!(session.phase, GamePhase::Idle);
        assert_eq!(session.score, 0);
        assert!(session.timers.is_empty());
        assert_ne!(session.timers.generation(), generation);
    }

    #[test]
    fn test_game_over_freezes_modifiers() {
        let mut session = session();
        session.start("ada");
        let GameSession {
            powerups,
            scheduler,
            timers,
            ..
        } = &mut session;
        assert!(powerups.activate_turbo(0, scheduler, timers));
        assert_eq!(session.tick_interval_ms(), DEFAULT_BASE_INTERVAL_MS / 2);
        session.game_over();
        assert_eq!(session.phase, GamePhase::GameOver);
        assert!(!session.powerups.turbo_active);
        assert_eq!(session.tick_interval_ms(), DEFAULT_BASE_INTERVAL_MS);
        assert!(session.timers.is_empty());
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut session = session();
        session.start("ada");
        session.score = 7;
        session.powerups.shields = 2;
        let snapshot = session.snapshot();
        assert_eq!(snapshot.score, 7);
        assert_eq!(snapshot.shields, 2);
        assert_eq!(snapshot.snake, vec![IVec2::new(15, 10)]);
        assert_eq!(snapshot.food, Some(session.food.pos));
    }
}
