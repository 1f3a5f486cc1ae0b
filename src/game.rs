//! Session control surface and external-interface glue
//!
//! [`SnakeGame`] wraps the pure simulation for an embedding front end: it
//! buffers input intents between ticks, renders game events into transient
//! notices, and writes the high score through the persistence boundary when
//! a run ends. The front end drives `tick()` on a recurring schedule and
//! re-reads `tick_interval_ms()` after every call.

use crate::consts::NOTICE_TTL_MS;
use crate::highscores::{HighScoreRecord, HighScoreStore, qualifies};
use crate::settings::Settings;
use crate::sim::{
    Direction, GameEvent, GameSession, Grid, ShieldCause, Snapshot, TickInput, tick,
};

/// Transient-message sink: purely observational, no feedback into the sim
pub trait MessageSink {
    fn show(&mut self, message: &str, ttl_ms: u32);
}

/// Sink that drops every message
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl MessageSink for NullSink {
    fn show(&mut self, _message: &str, _ttl_ms: u32) {}
}

/// One playable game: session plus its external collaborators
pub struct SnakeGame {
    session: GameSession,
    store: Box<dyn HighScoreStore>,
    sink: Box<dyn MessageSink>,
    pending_direction: Option<Direction>,
    pending_turbo: bool,
}

impl SnakeGame {
    pub fn new(
        settings: &Settings,
        seed: u64,
        store: Box<dyn HighScoreStore>,
        sink: Box<dyn MessageSink>,
    ) -> Self {
        let grid = Grid::new(settings.grid_width, settings.grid_height);
        Self {
            session: GameSession::new(grid, settings.base_interval_ms, seed),
            store,
            sink,
            pending_direction: None,
            pending_turbo: false,
        }
    }

    /// Begin a run for the named player
    pub fn start(&mut self, player_name: &str) {
        self.pending_direction = None;
        self.pending_turbo = false;
        self.session.start(player_name);
    }

    /// Abandon the current run and return to idle
    pub fn reset(&mut self) {
        self.pending_direction = None;
        self.pending_turbo = false;
        self.session.reset();
    }

    pub fn is_running(&self) -> bool {
        self.session.is_running()
    }

    /// Direction intent from the input adapter. The latest intent before a
    /// tick wins; reversals are filtered inside the tick. Ignored while the
    /// session is not running.
    pub fn queue_direction(&mut self, direction: Direction) {
        if self.session.is_running() && direction != Direction::None {
            self.pending_direction = Some(direction);
        }
    }

    /// Turbo trigger from the input adapter. Ignored while not running.
    pub fn trigger_turbo(&mut self) {
        if self.session.is_running() {
            self.pending_turbo = true;
        }
    }

    /// Speed-slider change; takes effect on the next scheduling decision
    pub fn set_base_interval(&mut self, ms: u32) {
        self.session.scheduler.set_base_interval(ms);
    }

    /// Interval the host should wait before the next `tick()` call
    pub fn tick_interval_ms(&self) -> u32 {
        self.session.tick_interval_ms()
    }

    pub fn score(&self) -> u32 {
        self.session.score
    }

    pub fn high_score(&self) -> Option<HighScoreRecord> {
        self.store.get()
    }

    /// Read-only state snapshot for the renderer
    pub fn snapshot(&self) -> Snapshot {
        self.session.snapshot()
    }

    /// Advance the simulation one tick, consuming buffered input. Returns
    /// the tick's events for embedders that want more than the notices.
    pub fn tick(&mut self) -> Vec<GameEvent> {
        let input = TickInput {
            direction: self.pending_direction.take(),
            turbo: std::mem::take(&mut self.pending_turbo),
        };
        let events = tick(&mut self.session, &input);
        for event in &events {
            self.handle_event(event);
        }
        events
    }

    fn handle_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::ShieldUsed { cause, .. } => {
                let message = match cause {
                    ShieldCause::Wall => "Shield Used! Wall Warp!",
                    ShieldCause::SelfHit => "Shield Used! Phased Through Tail!",
                    ShieldCause::Hazard => "Shield Used! Hazard Destroyed!",
                };
                self.sink.show(message, NOTICE_TTL_MS);
            }
            GameEvent::FoodEaten { multiplier, .. } => {
                if *multiplier >= 4 {
                    self.sink
                        .show(&format!("Combo x{multiplier}!"), NOTICE_TTL_MS);
                }
            }
            GameEvent::TurboUnitsAdded { .. } => {
                self.sink.show("+3 Turbo Units!", NOTICE_TTL_MS);
            }
            GameEvent::TurboPowerRaised { power } => {
                self.sink
                    .show(&format!("Turbo Power Up! ({power:.1}x)"), NOTICE_TTL_MS);
            }
            GameEvent::LengthReduced { .. } => {
                self.sink.show("Snake Shrunk!", NOTICE_TTL_MS);
            }
            GameEvent::ShrinkFailed => {
                self.sink.show("Shrink Failed (Too Short)!", NOTICE_TTL_MS);
            }
            GameEvent::ShieldAdded { .. } => {
                self.sink.show("+1 Shield!", NOTICE_TTL_MS);
            }
            GameEvent::SlowMoUnitAdded { .. } => {
                self.sink.show("+1 Slow-Mo!", NOTICE_TTL_MS);
            }
            GameEvent::TurboActivated { power } => {
                self.sink
                    .show(&format!("Turbo Activated! ({power:.1}x)"), NOTICE_TTL_MS);
            }
            GameEvent::SlowMoActivated => {
                self.sink.show("Slow Motion!", NOTICE_TTL_MS);
            }
            GameEvent::TailBitten { .. } => {
                self.sink.show("The zone bit your tail!", NOTICE_TTL_MS);
            }
            GameEvent::GameOver { score } => {
                if qualifies(self.store.get().as_ref(), *score) {
                    let record = HighScoreRecord::new(&self.session.player_name, *score);
                    self.store.set(&record);
                    self.sink.show("New High Score!", NOTICE_TTL_MS);
                }
            }
            GameEvent::BonusCollected { .. }
            | GameEvent::TurboExpired
            | GameEvent::SlowMoExpired
            | GameEvent::ComboExpired => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::MemoryHighScores;
    use crate::sim::SnakeBody;
    use glam::IVec2;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Sink that records messages for inspection
    #[derive(Clone, Default)]
    struct RecordingSink {
        messages: Rc<RefCell<Vec<(String, u32)>>>,
    }

    impl MessageSink for RecordingSink {
        fn show(&mut self, message: &str, ttl_ms: u32) {
            self.messages
                .borrow_mut()
                .push((message.to_string(), ttl_ms));
        }
    }

    fn game_with(store: Box<dyn HighScoreStore>) -> (SnakeGame, RecordingSink) {
        let sink = RecordingSink::default();
        let game = SnakeGame::new(
            &Settings::default(),
            11,
            store,
            Box::new(sink.clone()),
        );
        (game, sink)
    }

    #[test]
    fn test_control_surface() {
        let (mut game, _sink) = game_with(Box::new(MemoryHighScores::new()));
        assert!(!game.is_running());
        game.start("ada");
        assert!(game.is_running());
        game.reset();
        assert!(!game.is_running());
    }

    #[test]
    fn test_input_ignored_while_idle() {
        let (mut game, _sink) = game_with(Box::new(MemoryHighScores::new()));
        game.queue_direction(Direction::Right);
        game.trigger_turbo();
        game.tick();
        assert_eq!(game.snapshot().direction, Direction::None);
        assert!(!game.snapshot().turbo_active);
    }

    #[test]
    fn test_latest_direction_intent_wins() {
        let (mut game, _sink) = game_with(Box::new(MemoryHighScores::new()));
        game.start("ada");
        game.queue_direction(Direction::Up);
        game.queue_direction(Direction::Right);
        game.tick();
        assert_eq!(game.snapshot().direction, Direction::Right);
    }

    #[test]
    fn test_high_score_written_when_beaten() {
        let (mut game, _sink) = game_with(Box::new(MemoryHighScores::new()));
        game.start("ada");
        game.session.snake = SnakeBody::new(IVec2::new(0, 5));
        game.session.score = 50;
        game.queue_direction(Direction::Left);
        game.tick();
        assert!(!game.is_running());
        assert_eq!(game.high_score(), Some(HighScoreRecord::new("ada", 50)));
    }

    #[test]
    fn test_high_score_not_overwritten_by_lower_score() {
        let mut store = MemoryHighScores::new();
        store.set(&HighScoreRecord::new("grace", 100));
        let (mut game, _sink) = game_with(Box::new(store));
        game.start("ada");
        game.session.snake = SnakeBody::new(IVec2::new(0, 5));
        game.session.score = 50;
        game.queue_direction(Direction::Left);
        game.tick();
        assert!(!game.is_running());
        assert_eq!(game.high_score(), Some(HighScoreRecord::new("grace", 100)));
    }

    #[test]
    fn test_shield_notice_reaches_sink() {
        let (mut game, sink) = game_with(Box::new(MemoryHighScores::new()));
        game.start("ada");
        game.session.snake = SnakeBody::new(IVec2::new(0, 5));
        game.session.powerups.shields = 1;
        game.session.food.pos = IVec2::new(20, 15);
        game.queue_direction(Direction::Left);
        game.tick();
        assert!(game.is_running());
        let messages = sink.messages.borrow();
        assert_eq!(
            messages.as_slice(),
            &[("Shield Used! Wall Warp!".to_string(), NOTICE_TTL_MS)]
        );
    }
}
