//! Grid geometry and movement directions
//!
//! The playfield is a rectangle of integer cells. Cells are `IVec2` with
//! (0,0) at the top-left; y grows downward, matching the renderer.

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Movement direction, `None` while waiting for the first input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    #[default]
    None,
}

impl Direction {
    /// Per-tick cell delta
    pub fn delta(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
            Direction::None => IVec2::ZERO,
        }
    }

    /// True when `other` is the exact 180° reversal of `self`.
    /// `None` reverses nothing, so the first real input is always accepted.
    pub fn is_reverse_of(self, other: Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
                | (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
        )
    }
}

/// Rectangular playfield bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
}

impl Grid {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Center cell, the snake's starting position
    pub fn center(&self) -> IVec2 {
        IVec2::new(self.width / 2, self.height / 2)
    }

    /// Is the cell inside the playfield?
    pub fn contains(&self, cell: IVec2) -> bool {
        cell.x >= 0 && cell.x < self.width && cell.y >= 0 && cell.y < self.height
    }

    /// Wrap an out-of-bounds coordinate to the opposite edge (shield warp)
    pub fn wrap(&self, mut cell: IVec2) -> IVec2 {
        if cell.x < 0 {
            cell.x = self.width - 1;
        } else if cell.x >= self.width {
            cell.x = 0;
        }
        if cell.y < 0 {
            cell.y = self.height - 1;
        } else if cell.y >= self.height {
            cell.y = 0;
        }
        cell
    }

    /// Sample a uniformly random in-bounds cell
    pub fn random_cell<R: Rng>(&self, rng: &mut R) -> IVec2 {
        IVec2::new(
            rng.random_range(0..self.width),
            rng.random_range(0..self.height),
        )
    }

    /// Sample a random cell at least `margin` cells away from every edge.
    /// Falls back to plain sampling when the grid is too small for the margin.
    pub fn random_cell_with_margin<R: Rng>(&self, rng: &mut R, margin: i32) -> IVec2 {
        if self.width <= margin * 2 || self.height <= margin * 2 {
            return self.random_cell(rng);
        }
        IVec2::new(
            rng.random_range(margin..self.width - margin),
            rng.random_range(margin..self.height - margin),
        )
    }
}
