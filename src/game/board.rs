//! Board model: grid dimensions and how coordinates past the edge are treated.

use serde::{Deserialize, Serialize};

use super::state::Position;

/// Side length of the default square grid
pub const GRID_SIZE: usize = 16;

/// What happens when the snake's head leaves the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryPolicy {
    /// Leaving one edge re-enters at the opposite edge
    #[default]
    Wrap,
    /// Leaving the grid ends the game
    Walled,
}

/// A square `size` x `size` grid together with its boundary policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    pub size: usize,
    pub boundary: BoundaryPolicy,
}

impl Board {
    pub fn new(size: usize, boundary: BoundaryPolicy) -> Self {
        Self { size, boundary }
    }

    /// Number of cells on the board
    pub fn cell_count(&self) -> usize {
        self.size * self.size
    }

    /// Check if a position is within the grid bounds
    pub fn contains(&self, pos: Position) -> bool {
        let n = self.size as i32;
        pos.x >= 0 && pos.x < n && pos.y >= 0 && pos.y < n
    }

    /// Euclidean wrap of both coordinates into `[0, size)`
    pub fn normalize(&self, pos: Position) -> Position {
        let n = self.size as i32;
        Position::new(pos.x.rem_euclid(n), pos.y.rem_euclid(n))
    }

    /// Apply the boundary policy to a raw head position.
    ///
    /// Returns `None` when the position is off the board under [`BoundaryPolicy::Walled`].
    pub fn resolve(&self, pos: Position) -> Option<Position> {
        match self.boundary {
            BoundaryPolicy::Wrap => Some(self.normalize(pos)),
            BoundaryPolicy::Walled => self.contains(pos).then_some(pos),
        }
    }

    /// Every cell in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        let n = self.size as i32;
        (0..n).flat_map(move |y| (0..n).map(move |x| Position::new(x, y)))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(GRID_SIZE, BoundaryPolicy::Wrap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_wraps_both_edges() {
        let board = Board::new(16, BoundaryPolicy::Wrap);
        assert_eq!(board.normalize(Position::new(16, 8)), Position::new(0, 8));
        assert_eq!(board.normalize(Position::new(-1, 8)), Position::new(15, 8));
        assert_eq!(board.normalize(Position::new(3, -1)), Position::new(3, 15));
        assert_eq!(board.normalize(Position::new(3, 16)), Position::new(3, 0));
        assert_eq!(board.normalize(Position::new(5, 5)), Position::new(5, 5));
    }

    #[test]
    fn test_resolve_walled_rejects_out_of_bounds() {
        let board = Board::new(16, BoundaryPolicy::Walled);
        assert_eq!(board.resolve(Position::new(16, 8)), None);
        assert_eq!(board.resolve(Position::new(-1, 0)), None);
        assert_eq!(board.resolve(Position::new(15, 15)), Some(Position::new(15, 15)));
    }

    #[test]
    fn test_bounds_checking() {
        let board = Board::new(20, BoundaryPolicy::Walled);
        assert!(board.contains(Position::new(0, 0)));
        assert!(board.contains(Position::new(19, 19)));
        assert!(!board.contains(Position::new(-1, 0)));
        assert!(!board.contains(Position::new(20, 0)));
        assert!(!board.contains(Position::new(0, 20)));
    }

    #[test]
    fn test_cells_cover_grid_row_major() {
        let board = Board::new(3, BoundaryPolicy::Wrap);
        let cells: Vec<_> = board.cells().collect();
        assert_eq!(cells.len(), board.cell_count());
        assert_eq!(cells[0], Position::new(0, 0));
        assert_eq!(cells[1], Position::new(1, 0));
        assert_eq!(cells[3], Position::new(0, 1));
    }
}
