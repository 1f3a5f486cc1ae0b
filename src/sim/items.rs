//! Transient items: bonus pickups and hazards
//!
//! Items are a tagged sum type with one matcher per operation (spawn, move,
//! occupancy, contact). The manager owns spawn rolls, bounded-attempt
//! placement with occupancy checks, and per-tick motion/expiry.

use glam::{IVec2, Vec2};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::grid::Grid;
use super::snake::SnakeBody;
use crate::consts::*;

/// Effect granted by a bonus pickup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BonusKind {
    TurboUnits,
    TurboPower,
    ReduceLength,
    AddShield,
    AddSlowMo,
}

impl BonusKind {
    pub const ALL: [BonusKind; 5] = [
        BonusKind::TurboUnits,
        BonusKind::TurboPower,
        BonusKind::ReduceLength,
        BonusKind::AddShield,
        BonusKind::AddSlowMo,
    ];
}

/// Item payload. Drifting variants carry fractional positions; their grid
/// cell is the rounded position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ItemKind {
    /// Drifting bonus pickup
    Bonus {
        effect: BonusKind,
        pos: Vec2,
        dir: Vec2,
        speed: f32,
    },
    /// Single drifting hazard cell
    MovingSpike { pos: Vec2, dir: Vec2, speed: f32 },
    /// Fixed cluster of hazard cells
    StaticSpikes { parts: Vec<IVec2> },
    /// Fixed straight line of hazard cells
    WallObstacle { parts: Vec<IVec2> },
    /// Area hazard whose radius decays over time
    ShrinkingZone { center: Vec2, radius: f32 },
}

/// An active item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: u32,
    pub kind: ItemKind,
}

/// Round a fractional position to its grid cell
pub fn rounded_cell(pos: Vec2) -> IVec2 {
    pos.round().as_ivec2()
}

impl Item {
    pub fn is_bonus(&self) -> bool {
        matches!(self.kind, ItemKind::Bonus { .. })
    }

    /// Cells the item occupies for placement/occupancy purposes
    pub fn cells(&self) -> Vec<IVec2> {
        match &self.kind {
            ItemKind::Bonus { pos, .. } | ItemKind::MovingSpike { pos, .. } => {
                vec![rounded_cell(*pos)]
            }
            ItemKind::StaticSpikes { parts } | ItemKind::WallObstacle { parts } => parts.clone(),
            ItemKind::ShrinkingZone { center, radius } => zone_cells(*center, *radius),
        }
    }

    /// Does the item occupy this cell?
    pub fn covers(&self, cell: IVec2) -> bool {
        match &self.kind {
            ItemKind::Bonus { pos, .. } | ItemKind::MovingSpike { pos, .. } => {
                rounded_cell(*pos) == cell
            }
            ItemKind::StaticSpikes { parts } | ItemKind::WallObstacle { parts } => {
                parts.contains(&cell)
            }
            ItemKind::ShrinkingZone { center, radius } => {
                (cell.as_vec2() - *center).length() < *radius
            }
        }
    }

    /// Advance one tick of motion/decay. Returns false once the item has
    /// left the playfield or decayed away.
    pub fn advance(&mut self, interval_ms: u32, grid: &Grid) -> bool {
        match &mut self.kind {
            ItemKind::Bonus {
                pos, dir, speed, ..
            }
            | ItemKind::MovingSpike { pos, dir, speed } => {
                *pos += *dir * *speed;
                in_flight_bounds(*pos, grid)
            }
            ItemKind::StaticSpikes { .. } | ItemKind::WallObstacle { .. } => true,
            ItemKind::ShrinkingZone { radius, .. } => {
                // Shrink rate is wall-clock-normalized so speed modifiers
                // don't change how fast the zone closes in real time
                *radius -= ZONE_SHRINK_PER_SEC * interval_ms as f32 / 1000.0;
                *radius >= ZONE_MIN_RADIUS
            }
        }
    }
}

/// Cells within a zone's radius (distance from cell center to zone center)
fn zone_cells(center: Vec2, radius: f32) -> Vec<IVec2> {
    let r = radius.ceil() as i32;
    let base = rounded_cell(center);
    let mut cells = Vec::new();
    for dy in -r..=r {
        for dx in -r..=r {
            let cell = base + IVec2::new(dx, dy);
            if (cell.as_vec2() - center).length() < radius {
                cells.push(cell);
            }
        }
    }
    cells
}

/// Drifting items live until they pass the grid edge by the exit margin
fn in_flight_bounds(pos: Vec2, grid: &Grid) -> bool {
    pos.x > -ITEM_EXIT_MARGIN
        && pos.x < grid.width as f32 - 1.0 + ITEM_EXIT_MARGIN
        && pos.y > -ITEM_EXIT_MARGIN
        && pos.y < grid.height as f32 - 1.0 + ITEM_EXIT_MARGIN
}

/// Owns every active item plus the spawn/placement logic
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemManager {
    /// Active items, in spawn (id) order
    pub items: Vec<Item>,
    next_id: u32,
}

impl ItemManager {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            next_id: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Does any active item occupy the cell?
    pub fn occupies(&self, cell: IVec2) -> bool {
        self.items.iter().any(|item| item.covers(cell))
    }

    /// Remove a consumed/negated item by id
    pub fn deactivate(&mut self, id: u32) {
        self.items.retain(|item| item.id != id);
    }

    /// Per-tick motion and expiry for every active item
    pub fn advance_all(&mut self, interval_ms: u32, grid: &Grid) {
        self.items.retain_mut(|item| item.advance(interval_ms, grid));
    }

    /// Post-food spawn roll: fixed chance, capped concurrency, weighted
    /// bonus-vs-hazard category, uniform subtype. Placement failure is a
    /// silent no-op.
    pub fn spawn_roll<R: Rng>(
        &mut self,
        rng: &mut R,
        grid: &Grid,
        snake: &SnakeBody,
        food: Option<IVec2>,
    ) {
        if self.items.len() >= MAX_ACTIVE_ITEMS || !rng.random_bool(ITEM_SPAWN_CHANCE) {
            return;
        }
        self.try_spawn(rng, grid, snake, food);
    }

    /// Roll a subtype and attempt placement (no probability gate)
    fn try_spawn<R: Rng>(
        &mut self,
        rng: &mut R,
        grid: &Grid,
        snake: &SnakeBody,
        food: Option<IVec2>,
    ) {
        let kind = if rng.random_bool(BONUS_CATEGORY_WEIGHT) {
            let effect = BonusKind::ALL[rng.random_range(0..BonusKind::ALL.len())];
            self.place_drifter(rng, grid, snake, food)
                .map(|(pos, dir, speed)| ItemKind::Bonus {
                    effect,
                    pos,
                    dir,
                    speed,
                })
        } else {
            match rng.random_range(0..4) {
                0 => self
                    .place_drifter(rng, grid, snake, food)
                    .map(|(pos, dir, speed)| ItemKind::MovingSpike { pos, dir, speed }),
                1 => self
                    .place_cluster(rng, grid, snake, food)
                    .map(|parts| ItemKind::StaticSpikes { parts }),
                2 => self
                    .place_line(rng, grid, snake, food)
                    .map(|parts| ItemKind::WallObstacle { parts }),
                _ => self
                    .place_zone(rng, grid, snake, food)
                    .map(|(center, radius)| ItemKind::ShrinkingZone { center, radius }),
            }
        };

        match kind {
            Some(kind) => {
                let id = self.next_id;
                self.next_id += 1;
                log::debug!("spawned item {id}: {kind:?}");
                self.items.push(Item { id, kind });
            }
            None => log::debug!("item placement failed, spawn abandoned"),
        }
    }

    fn cell_free(&self, cell: IVec2, snake: &SnakeBody, food: Option<IVec2>) -> bool {
        !snake.occupies(cell) && food != Some(cell) && !self.occupies(cell)
    }

    /// Sample a free cell, retrying up to the attempt budget
    fn place_point<R: Rng>(
        &self,
        rng: &mut R,
        grid: &Grid,
        margin: i32,
        snake: &SnakeBody,
        food: Option<IVec2>,
    ) -> Option<IVec2> {
        for _ in 0..PLACEMENT_ATTEMPTS {
            let cell = if margin > 0 {
                grid.random_cell_with_margin(rng, margin)
            } else {
                grid.random_cell(rng)
            };
            if self.cell_free(cell, snake, food) {
                return Some(cell);
            }
        }
        None
    }

    /// Position, unit drift direction and per-tick speed for a moving item
    fn place_drifter<R: Rng>(
        &self,
        rng: &mut R,
        grid: &Grid,
        snake: &SnakeBody,
        food: Option<IVec2>,
    ) -> Option<(Vec2, Vec2, f32)> {
        let cell = self.place_point(rng, grid, MOVING_SPAWN_MARGIN, snake, food)?;
        let dir = CARDINALS[rng.random_range(0..CARDINALS.len())];
        let speed = rng.random_range(ITEM_MIN_SPEED..ITEM_MAX_SPEED);
        Some((cell.as_vec2(), dir, speed))
    }

    /// Grow a connected cluster of 3-5 spike cells, aborting the whole item
    /// if the attempt budget runs out before it is complete
    fn place_cluster<R: Rng>(
        &self,
        rng: &mut R,
        grid: &Grid,
        snake: &SnakeBody,
        food: Option<IVec2>,
    ) -> Option<Vec<IVec2>> {
        let size = rng.random_range(3..=5usize);
        let base = self.place_point(rng, grid, 0, snake, food)?;
        let mut parts = vec![base];
        for _ in 0..PLACEMENT_ATTEMPTS {
            if parts.len() == size {
                break;
            }
            let anchor = parts[rng.random_range(0..parts.len())];
            let offset = rounded_cell(CARDINALS[rng.random_range(0..CARDINALS.len())]);
            let cell = anchor + offset;
            if grid.contains(cell)
                && !parts.contains(&cell)
                && self.cell_free(cell, snake, food)
            {
                parts.push(cell);
            }
        }
        (parts.len() == size).then_some(parts)
    }

    /// A straight wall of 3-5 cells, horizontal or vertical
    fn place_line<R: Rng>(
        &self,
        rng: &mut R,
        grid: &Grid,
        snake: &SnakeBody,
        food: Option<IVec2>,
    ) -> Option<Vec<IVec2>> {
        let length = rng.random_range(3..=5);
        let step = if rng.random_bool(0.5) {
            IVec2::new(1, 0)
        } else {
            IVec2::new(0, 1)
        };
        for _ in 0..PLACEMENT_ATTEMPTS {
            let base = grid.random_cell(rng);
            let parts: Vec<IVec2> = (0..length).map(|i| base + step * i).collect();
            let fits = parts
                .iter()
                .all(|&cell| grid.contains(cell) && self.cell_free(cell, snake, food));
            if fits {
                return Some(parts);
            }
        }
        None
    }

    /// A shrinking zone whose every covered cell must start free
    fn place_zone<R: Rng>(
        &self,
        rng: &mut R,
        grid: &Grid,
        snake: &SnakeBody,
        food: Option<IVec2>,
    ) -> Option<(Vec2, f32)> {
        let radius = rng.random_range(ZONE_MIN_START_RADIUS..ZONE_MAX_START_RADIUS);
        let margin = radius.ceil() as i32;
        for _ in 0..PLACEMENT_ATTEMPTS {
            let center = grid.random_cell_with_margin(rng, margin).as_vec2();
            let clear = zone_cells(center, radius)
                .into_iter()
                .all(|cell| self.cell_free(cell, snake, food));
            if clear {
                return Some((center, radius));
            }
        }
        None
    }
}

/// Unit drift directions for motion-bearing items
const CARDINALS: [Vec2; 4] = [
    Vec2::new(1.0, 0.0),
    Vec2::new(-1.0, 0.0),
    Vec2::new(0.0, 1.0),
    Vec2::new(0.0, -1.0),
];
