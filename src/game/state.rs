use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::action::Direction;
use super::board::Board;
use super::config::FoodMode;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction, without any boundary handling
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// The snake in the game. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Position>", into = "Vec<Position>")]
pub struct Snake {
    /// Body segments, with head at index 0
    body: Vec<Position>,
}

impl Snake {
    /// Create a straight snake whose body trails behind `head` opposite to `direction`
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let (dx, dy) = direction.delta();
        let body = (0..length.max(1) as i32)
            .map(|i| head.moved_by(-dx * i, -dy * i))
            .collect();

        Self { body }
    }

    /// Build a snake from explicit segments, head first.
    ///
    /// Returns `None` for an empty sequence.
    pub fn from_segments<I>(segments: I) -> Option<Self>
    where
        I: IntoIterator,
        I::Item: Into<Position>,
    {
        let body: Vec<Position> = segments.into_iter().map(Into::into).collect();
        (!body.is_empty()).then_some(Self { body })
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    pub fn segments(&self) -> &[Position] {
        &self.body
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> &[Position] {
        &self.body[1..]
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body_segments().contains(&pos)
    }

    /// Check if any segment occupies `pos`
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// The snake after its head moves to `new_head`.
    ///
    /// The tail is kept when `grow` is set, otherwise it moves forward.
    pub fn advanced(&self, new_head: Position, grow: bool) -> Self {
        let keep = if grow {
            self.body.len()
        } else {
            self.body.len() - 1
        };

        let mut body = Vec::with_capacity(keep + 1);
        body.push(new_head);
        body.extend_from_slice(&self.body[..keep]);

        Self { body }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; kept for the `len`/`is_empty` pairing
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("snake must have at least one segment")]
pub struct EmptySnakeError;

impl TryFrom<Vec<Position>> for Snake {
    type Error = EmptySnakeError;

    fn try_from(body: Vec<Position>) -> Result<Self, Self::Error> {
        Self::from_segments(body).ok_or(EmptySnakeError)
    }
}

impl From<Snake> for Vec<Position> {
    fn from(snake: Snake) -> Self {
        snake.body
    }
}

/// Kind of the active food item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoodType {
    #[default]
    Normal,
    Silver,
    Golden,
}

/// Every food type, cheapest first
pub const FOOD_TYPES: [FoodType; 3] = [FoodType::Normal, FoodType::Silver, FoodType::Golden];

impl FoodType {
    /// Points awarded for eating this food
    pub fn points(&self) -> u32 {
        match self {
            FoodType::Normal => 1,
            FoodType::Silver => 5,
            FoodType::Golden => 10,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FoodType::Normal => "normal",
            FoodType::Silver => "silver",
            FoodType::Golden => "golden",
        }
    }
}

/// Complete game state.
///
/// Values are never mutated by the core: every transition returns a new state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    pub food_mode: FoodMode,
    pub snake: Snake,
    /// Direction applied by the most recent tick
    pub direction: Direction,
    /// Buffered direction consumed by the next tick
    pub next_direction: Direction,
    /// `None` only when no free cell was left
    pub food: Option<Position>,
    pub food_type: FoodType,
    pub score: u32,
    pub normal_food_eaten_count: u32,
    pub silver_collected: u32,
    pub golden_collected: u32,
    pub game_over: bool,
    pub paused: bool,
}

impl GameState {
    /// A running, unscored state with the given snake and food
    pub fn new(
        board: Board,
        food_mode: FoodMode,
        snake: Snake,
        direction: Direction,
        food: Option<Position>,
    ) -> Self {
        Self {
            board,
            food_mode,
            snake,
            direction,
            next_direction: direction,
            food,
            food_type: FoodType::Normal,
            score: 0,
            normal_food_eaten_count: 0,
            silver_collected: 0,
            golden_collected: 0,
            game_over: false,
            paused: false,
        }
    }

    pub fn grid_size(&self) -> usize {
        self.board.size
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.occupies(pos)
    }

    /// True when the board has no room left for food
    pub fn is_board_full(&self) -> bool {
        self.food.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::board::BoundaryPolicy;

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Position::new(6, 5));
        assert_eq!(pos.moved_by(-1, 0), Position::new(4, 5));
        assert_eq!(pos.moved_in_direction(Direction::Down), Position::new(5, 6));
        assert_eq!(pos.moved_in_direction(Direction::Up), Position::new(5, 4));
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(Position::new(8, 8), Direction::Right, 3);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(8, 8));
        assert_eq!(
            snake.segments(),
            &[Position::new(8, 8), Position::new(7, 8), Position::new(6, 8)]
        );
        assert_eq!(snake.tail(), Position::new(6, 8));
    }

    #[test]
    fn test_from_segments_rejects_empty() {
        assert!(Snake::from_segments(Vec::<(i32, i32)>::new()).is_none());
        let snake = Snake::from_segments([(1, 1), (1, 2)]).unwrap();
        assert_eq!(snake.head(), Position::new(1, 1));
    }

    #[test]
    fn test_advanced_moves_and_grows() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);

        let moved = snake.advanced(Position::new(6, 5), false);
        assert_eq!(moved.len(), 3);
        assert_eq!(moved.head(), Position::new(6, 5));
        assert_eq!(moved.tail(), Position::new(4, 5));

        let grown = snake.advanced(Position::new(6, 5), true);
        assert_eq!(grown.len(), 4);
        assert_eq!(grown.tail(), Position::new(3, 5));

        // Original is untouched
        assert_eq!(snake.head(), Position::new(5, 5));
    }

    #[test]
    fn test_collision_detection() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        assert!(!snake.collides_with_body(Position::new(5, 5)));
        assert!(snake.collides_with_body(Position::new(4, 5)));
        assert!(!snake.collides_with_body(Position::new(10, 10)));
        assert!(snake.occupies(Position::new(5, 5)));
    }

    #[test]
    fn test_food_points() {
        assert_eq!(FoodType::Normal.points(), 1);
        assert_eq!(FoodType::Silver.points(), 5);
        assert_eq!(FoodType::Golden.points(), 10);
        assert_eq!(FOOD_TYPES.map(|f| f.as_str()), ["normal", "silver", "golden"]);
    }

    #[test]
    fn test_new_state_is_fresh() {
        let state = GameState::new(
            Board::new(16, BoundaryPolicy::Wrap),
            FoodMode::Tiered,
            Snake::new(Position::new(8, 8), Direction::Right, 3),
            Direction::Right,
            Some(Position::new(1, 1)),
        );
        assert_eq!(state.grid_size(), 16);
        assert_eq!(state.next_direction, Direction::Right);
        assert_eq!(state.score, 0);
        assert!(!state.game_over && !state.paused);
        assert!(!state.is_board_full());
        assert!(state.is_occupied_by_snake(Position::new(6, 8)));
    }

    #[test]
    fn test_empty_snake_rejected_on_load() {
        assert!(serde_json::from_str::<Snake>("[]").is_err());

        let snake = Snake::new(Position::new(4, 4), Direction::Up, 2);
        let json = serde_json::to_string(&snake).unwrap();
        assert_eq!(json, r#"[{"x":4,"y":4},{"x":4,"y":5}]"#);
        assert_eq!(serde_json::from_str::<Snake>(&json).unwrap(), snake);
    }
}
