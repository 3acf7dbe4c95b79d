//! Food placement on the free cells of the board.

use rand::Rng;
use std::collections::HashSet;

use super::board::Board;
use super::state::{Position, Snake};

/// Cells of `board` not covered by `snake`, in row-major order
pub fn free_cells(board: &Board, snake: &Snake) -> Vec<Position> {
    let occupied: HashSet<Position> = snake.segments().iter().copied().collect();
    board
        .cells()
        .filter(|cell| !occupied.contains(cell))
        .collect()
}

/// Pick a uniformly random free cell for new food.
///
/// Returns `None` when the snake covers the whole board.
pub fn place_food<R: Rng + ?Sized>(board: &Board, snake: &Snake, rng: &mut R) -> Option<Position> {
    let free = free_cells(board, snake);
    if free.is_empty() {
        tracing::debug!(grid_size = board.size, "no free cell left for food");
        return None;
    }

    let food = free[rng.gen_range(0..free.len())];
    tracing::trace!(x = food.x, y = food.y, free = free.len(), "placed food");
    Some(food)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::action::Direction;
    use crate::game::board::BoundaryPolicy;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    /// A snake that snakes through every cell of a `size` x `size` board
    fn board_filling_snake(size: i32) -> Snake {
        let mut cells = Vec::new();
        for y in 0..size {
            if y % 2 == 0 {
                cells.extend((0..size).map(|x| (x, y)));
            } else {
                cells.extend((0..size).rev().map(|x| (x, y)));
            }
        }
        Snake::from_segments(cells).unwrap()
    }

    #[test]
    fn test_free_cells_excludes_snake() {
        let board = Board::new(4, BoundaryPolicy::Wrap);
        let snake = Snake::new(Position::new(2, 2), Direction::Right, 3);
        let free = free_cells(&board, &snake);
        assert_eq!(free.len(), 16 - 3);
        assert!(free.iter().all(|cell| !snake.occupies(*cell)));
    }

    #[test]
    fn test_place_food_never_on_snake() {
        let board = Board::new(6, BoundaryPolicy::Wrap);
        let snake = Snake::new(Position::new(3, 3), Direction::Right, 4);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..500 {
            let food = place_food(&board, &snake, &mut rng).unwrap();
            assert!(board.contains(food));
            assert!(!snake.occupies(food));
        }
    }

    #[test]
    fn test_place_food_full_board() {
        let board = Board::new(4, BoundaryPolicy::Wrap);
        let snake = board_filling_snake(4);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(place_food(&board, &snake, &mut rng), None);
    }

    #[test]
    fn test_place_food_single_free_cell() {
        let board = Board::new(4, BoundaryPolicy::Wrap);
        let full = board_filling_snake(4);
        // Drop the last segment so exactly one cell is free
        let snake = Snake::from_segments(full.segments()[..15].to_vec()).unwrap();
        let mut rng = StdRng::seed_from_u64(99);
        assert_eq!(place_food(&board, &snake, &mut rng), Some(full.tail()));
    }

    #[test]
    fn test_place_food_is_reproducible() {
        let board = Board::default();
        let snake = Snake::new(Position::new(8, 8), Direction::Right, 3);
        let a = place_food(&board, &snake, &mut StdRng::seed_from_u64(42));
        let b = place_food(&board, &snake, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }
}
