//! The per-tick state transition
//!
//! One call to [`tick`] is one simulation step: fire due timers, advance
//! items, move the snake and resolve collisions in a fixed order. The
//! collision order (wall, self, hazard, bonus, food) is load-bearing — games
//! where food and a bonus overlap depend on it — so the whole chain lives in
//! one function and must not be reordered.

use rand::Rng;

use super::collision::{self, HazardContact};
use super::grid::Direction;
use super::items::{BonusKind, ItemKind};
use super::schedule::TimerKind;
use super::state::{GameEvent, GamePhase, GameSession, ShieldCause};
use crate::consts::*;

/// Input resolved for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Direction intent, applied at most once per tick; reversals ignored
    pub direction: Option<Direction>,
    /// Turbo activation trigger
    pub turbo: bool,
}

/// Advance the session by one tick. No-op unless the session is running.
pub fn tick(session: &mut GameSession, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if session.phase != GamePhase::Running {
        return events;
    }

    // Direction intent, reversal filtered
    if let Some(dir) = input.direction {
        if dir != Direction::None && !session.direction.is_reverse_of(dir) {
            session.direction = dir;
        }
    }

    // Pre-game idle: no direction yet, nothing moves and no time passes
    if session.direction == Direction::None {
        return events;
    }

    // This tick represents one interval of wall-clock time at the speed that
    // scheduled it; capture it before inputs or expiries change the modifier
    let interval = session.scheduler.interval_ms();
    session.clock_ms += interval as u64;
    session.tick_index += 1;

    fire_timers(session, &mut events);

    if input.turbo {
        let GameSession {
            powerups,
            scheduler,
            timers,
            clock_ms,
            ..
        } = &mut *session;
        if powerups.activate_turbo(*clock_ms, scheduler, timers) {
            events.push(GameEvent::TurboActivated {
                power: powerups.turbo_power,
            });
        }
    }

    // Items move and decay before the head does
    let grid = session.grid;
    session.items.advance_all(interval, &grid);

    // A failed placement from an earlier tick gets another chance
    if !session.food.active {
        session.place_food();
    }

    step_snake(session, &mut events);
    events
}

/// Drain due deferred expiries and apply the ones that are still current
fn fire_timers(session: &mut GameSession, events: &mut Vec<GameEvent>) {
    for kind in session.timers.fire_due(session.clock_ms) {
        match kind {
            TimerKind::TurboExpiry => {
                if session
                    .powerups
                    .expire_turbo(session.clock_ms, &mut session.scheduler)
                {
                    events.push(GameEvent::TurboExpired);
                }
            }
            TimerKind::SlowMoExpiry => {
                if session
                    .powerups
                    .expire_slowmo(session.clock_ms, &mut session.scheduler)
                {
                    events.push(GameEvent::SlowMoExpired);
                }
            }
            TimerKind::ComboExpiry => {
                if session.combo.expire(session.clock_ms) {
                    events.push(GameEvent::ComboExpired);
                }
            }
        }
    }
}

/// Move the head and resolve collisions in the fixed order:
/// wall, self, prepend, hazards, bonus, food, conditional tail drop.
fn step_snake(session: &mut GameSession, events: &mut Vec<GameEvent>) {
    let mut head = session.snake.head() + session.direction.delta();

    // 1. Wall: shield warps to the opposite edge, otherwise fatal
    if collision::hits_wall(&session.grid, head) {
        if session.powerups.use_shield() {
            head = session.grid.wrap(head);
            events.push(GameEvent::ShieldUsed {
                cause: ShieldCause::Wall,
                remaining: session.powerups.shields,
            });
        } else {
            session.game_over();
            events.push(GameEvent::GameOver {
                score: session.score,
            });
            return;
        }
    }

    // 2. Self: every existing segment counts, tail included
    if collision::hits_self(&session.snake, head) {
        if session.powerups.use_shield() {
            events.push(GameEvent::ShieldUsed {
                cause: ShieldCause::SelfHit,
                remaining: session.powerups.shields,
            });
        } else {
            session.game_over();
            events.push(GameEvent::GameOver {
                score: session.score,
            });
            return;
        }
    }

    // 3. Tentative growth; the tail drop at the end restores the length
    session.snake.advance(head);

    // 4. Hazards, in id order
    let contacts: Vec<(u32, HazardContact)> = session
        .items
        .items
        .iter()
        .map(|item| (item.id, collision::hazard_contact(item, head)))
        .filter(|&(_, contact)| contact != HazardContact::Miss)
        .collect();
    for (id, contact) in contacts {
        match contact {
            HazardContact::Hit => {
                if session.powerups.use_shield() {
                    session.items.deactivate(id);
                    events.push(GameEvent::ShieldUsed {
                        cause: ShieldCause::Hazard,
                        remaining: session.powerups.shields,
                    });
                } else {
                    session.game_over();
                    events.push(GameEvent::GameOver {
                        score: session.score,
                    });
                    return;
                }
            }
            HazardContact::ZoneBite => {
                if session.rng.random_bool(ZONE_BITE_CHANCE)
                    && session.snake.truncate_tail(1) > 0
                {
                    events.push(GameEvent::TailBitten {
                        remaining: session.snake.len(),
                    });
                }
            }
            HazardContact::Miss => {}
        }
    }

    let mut consumed = false;

    // 5. Bonus pickup
    let bonus_hit = session.items.items.iter().find_map(|item| {
        if !collision::bonus_contact(item, head) {
            return None;
        }
        match item.kind {
            ItemKind::Bonus { effect, .. } => Some((item.id, effect)),
            _ => None,
        }
    });
    if let Some((id, effect)) = bonus_hit {
        session.items.deactivate(id);
        let gained = BONUS_VALUE * session.combo.multiplier();
        session.score += gained;
        events.push(GameEvent::BonusCollected { effect, gained });
        apply_bonus(session, effect, events);
        consumed = true;
    }

    // 6. Food: extend the combo first, then award with the new multiplier
    if session.food.active && session.food.pos == head {
        session.food.active = false;
        let deadline = session.combo.extend(session.clock_ms);
        session.timers.schedule(deadline, TimerKind::ComboExpiry);
        let gained = FOOD_VALUE * session.combo.multiplier();
        session.score += gained;
        events.push(GameEvent::FoodEaten {
            gained,
            multiplier: session.combo.multiplier(),
        });
        session.place_food();
        let GameSession {
            items,
            rng,
            snake,
            food,
            grid,
            ..
        } = &mut *session;
        items.spawn_roll(rng, grid, snake, food.active.then_some(food.pos));
        consumed = true;
    }

    // 7. Constant length unless something was eaten this tick
    if !consumed {
        session.snake.drop_tail();
    }
}

/// Apply a collected bonus effect
fn apply_bonus(session: &mut GameSession, effect: BonusKind, events: &mut Vec<GameEvent>) {
    match effect {
        BonusKind::TurboUnits => {
            session.powerups.turbo_units += TURBO_UNITS_PER_PICKUP;
            events.push(GameEvent::TurboUnitsAdded {
                total: session.powerups.turbo_units,
            });
        }
        BonusKind::TurboPower => {
            session.powerups.turbo_power += TURBO_POWER_STEP;
            events.push(GameEvent::TurboPowerRaised {
                power: session.powerups.turbo_power,
            });
        }
        BonusKind::ReduceLength => {
            let len = session.snake.len();
            let reduction = ((len as f32 * SHRINK_FRACTION) as usize).max(1);
            if len > reduction {
                let removed = session.snake.truncate_tail(reduction);
                events.push(GameEvent::LengthReduced { removed });
            } else {
                events.push(GameEvent::ShrinkFailed);
            }
        }
        BonusKind::AddShield => {
            session.powerups.shields += 1;
            events.push(GameEvent::ShieldAdded {
                total: session.powerups.shields,
            });
        }
        BonusKind::AddSlowMo => {
            session.powerups.slowmo_units += 1;
            events.push(GameEvent::SlowMoUnitAdded {
                total: session.powerups.slowmo_units,
            });
            // Auto-activate; if turbo currently owns the clock the unit is
            // simply banked for later
            let GameSession {
                powerups,
                scheduler,
                timers,
                clock_ms,
                ..
            } = &mut *session;
            if powerups.activate_slowmo(*clock_ms, scheduler, timers) {
                events.push(GameEvent::SlowMoActivated);
            }
        }
    }
}
