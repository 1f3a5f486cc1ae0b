//! Snake body primitives
//!
//! An ordered segment sequence, head first. Growth happens by advancing
//! without dropping the tail; plain movement advances then drops it.

use std::collections::VecDeque;

use glam::IVec2;

/// The snake's body. Invariant: never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnakeBody {
    segments: VecDeque<IVec2>,
}

impl SnakeBody {
    /// A length-1 snake at the given cell
    pub fn new(head: IVec2) -> Self {
        let mut segments = VecDeque::new();
        segments.push_back(head);
        Self { segments }
    }

    pub fn head(&self) -> IVec2 {
        *self.segments.front().expect("snake body is never empty")
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn segments(&self) -> impl Iterator<Item = IVec2> + '_ {
        self.segments.iter().copied()
    }

    /// Does any segment occupy the cell?
    pub fn occupies(&self, cell: IVec2) -> bool {
        self.segments.contains(&cell)
    }

    /// Prepend a new head (tentative growth; pair with `drop_tail` for a
    /// constant-length move)
    pub fn advance(&mut self, head: IVec2) {
        self.segments.push_front(head);
    }

    /// Remove the tail segment, never shrinking below length 1
    pub fn drop_tail(&mut self) {
        if self.segments.len() > 1 {
            self.segments.pop_back();
        }
    }

    /// Remove up to `count` tail segments, floored at length 1.
    /// Returns how many were actually removed.
    pub fn truncate_tail(&mut self, count: usize) -> usize {
        let mut removed = 0;
        while removed < count && self.segments.len() > 1 {
            self.segments.pop_back();
            removed += 1;
        }
        removed
    }

    /// Owned copy of the segments, head first (for snapshots)
    pub fn to_vec(&self) -> Vec<IVec2> {
        self.segments.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_and_drop_keeps_length() {
        let mut snake = SnakeBody::new(IVec2::new(5, 5));
        snake.advance(IVec2::new(6, 5));
        snake.drop_tail();
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), IVec2::new(6, 5));
    }

    #[test]
    fn test_advance_without_drop_grows() {
        let mut snake = SnakeBody::new(IVec2::new(5, 5));
        snake.advance(IVec2::new(6, 5));
        assert_eq!(snake.len(), 2);
        assert_eq!(snake.head(), IVec2::new(6, 5));
        assert!(snake.occupies(IVec2::new(5, 5)));
    }

    #[test]
    fn test_drop_tail_floors_at_one() {
        let mut snake = SnakeBody::new(IVec2::new(5, 5));
        snake.drop_tail();
        assert_eq!(snake.len(), 1);
    }

    #[test]
    fn test_truncate_tail_floors_at_one() {
        let mut snake = SnakeBody::new(IVec2::new(0, 0));
        for x in 1..6 {
            snake.advance(IVec2::new(x, 0));
        }
        assert_eq!(snake.len(), 6);
        assert_eq!(snake.truncate_tail(3), 3);
        assert_eq!(snake.len(), 3);
        // Asking for more than available stops at the floor
        assert_eq!(snake.truncate_tail(10), 2);
        assert_eq!(snake.len(), 1);
    }
}
