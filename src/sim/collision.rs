//! Collision predicates for the per-tick resolver
//!
//! Pure geometry tests against the candidate head cell. The resolution
//! *order* (wall, self, hazard, bonus, food) lives in `tick.rs` and must not
//! be reordered; these helpers only answer whether a given check hits.

use glam::IVec2;

use super::grid::Grid;
use super::items::{Item, ItemKind, rounded_cell};
use super::snake::SnakeBody;

/// Result of testing the candidate head against one hazard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HazardContact {
    Miss,
    /// Fatal unless negated by a shield
    Hit,
    /// Shrinking-zone proximity: stochastic tail damage, never fatal
    ZoneBite,
}

/// Candidate head outside the playfield?
pub fn hits_wall(grid: &Grid, candidate: IVec2) -> bool {
    !grid.contains(candidate)
}

/// Candidate head on any existing body segment?
pub fn hits_self(snake: &SnakeBody, candidate: IVec2) -> bool {
    snake.occupies(candidate)
}

/// Test the candidate head against one item's hazard geometry.
/// Bonus items are not hazards and always miss here.
pub fn hazard_contact(item: &Item, candidate: IVec2) -> HazardContact {
    match &item.kind {
        ItemKind::Bonus { .. } => HazardContact::Miss,
        ItemKind::MovingSpike { pos, .. } => {
            if rounded_cell(*pos) == candidate {
                HazardContact::Hit
            } else {
                HazardContact::Miss
            }
        }
        ItemKind::StaticSpikes { parts } | ItemKind::WallObstacle { parts } => {
            if parts.contains(&candidate) {
                HazardContact::Hit
            } else {
                HazardContact::Miss
            }
        }
        ItemKind::ShrinkingZone { center, radius } => {
            if (candidate.as_vec2() - *center).length() < *radius {
                HazardContact::ZoneBite
            } else {
                HazardContact::Miss
            }
        }
    }
}

/// Candidate head on an active bonus item's (rounded) position?
pub fn bonus_contact(item: &Item, candidate: IVec2) -> bool {
    match &item.kind {
        ItemKind::Bonus { pos, .. } => rounded_cell(*pos) == candidate,
        _ => false,
    }
}
