//! Core game logic module for Snake
//!
//! Everything here is pure: each operation takes a state value (and a random
//! source where food may be placed) and returns a new state. No I/O, timers or
//! rendering live in this module.

pub mod action;
pub mod board;
pub mod config;
pub mod engine;
pub mod food;
pub mod reducers;
pub mod session;
pub mod state;

// Re-export commonly used types
pub use action::{Action, DIRECTIONS, Direction};
pub use board::{Board, BoundaryPolicy, GRID_SIZE};
pub use config::{ConfigError, FoodMode, GameConfig, MAX_GRID_SIZE};
pub use engine::{CollisionType, GameEngine, StepResult, TickOutcome, next_food_type, step, tick};
pub use food::{free_cells, place_food};
pub use reducers::{apply_action, set_direction, toggle_pause};
pub use session::{create_initial_state, restart_game};
pub use state::{EmptySnakeError, FOOD_TYPES, FoodType, GameState, Position, Snake};
