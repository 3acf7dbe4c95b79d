use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::board::{Board, BoundaryPolicy, GRID_SIZE};

/// Largest accepted `grid_size`; keeps coordinates in `i32` and the free-cell scan small
pub const MAX_GRID_SIZE: usize = 256;

/// Whether eaten food cycles through the silver/golden tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoodMode {
    /// normal / silver / golden with escalating rewards
    #[default]
    Tiered,
    /// Only normal food, one point each
    Single,
}

/// Reasons a [`GameConfig`] cannot start a game
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("grid_size must be at least 1")]
    EmptyGrid,
    #[error("grid_size {0} exceeds the maximum of {MAX_GRID_SIZE}")]
    GridTooLarge(usize),
    #[error("initial_snake_length must be at least 1")]
    EmptySnake,
    #[error("a snake of length {length} does not fit centered on a {grid_size}x{grid_size} grid")]
    SnakeTooLong { length: usize, grid_size: usize },
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side length of the square grid
    pub grid_size: usize,
    /// Wrap-around or walled edges
    pub boundary: BoundaryPolicy,
    /// Tiered or single food
    pub food_mode: FoodMode,
    /// Initial length of the snake
    pub initial_snake_length: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::tiered()
    }
}

impl GameConfig {
    /// Extended profile: wrap-around edges and tiered food
    pub fn tiered() -> Self {
        Self {
            grid_size: GRID_SIZE,
            boundary: BoundaryPolicy::Wrap,
            food_mode: FoodMode::Tiered,
            initial_snake_length: 3,
        }
    }

    /// Minimal profile: walls and normal food only
    pub fn classic() -> Self {
        Self {
            boundary: BoundaryPolicy::Walled,
            food_mode: FoodMode::Single,
            ..Self::tiered()
        }
    }

    /// Same profile with a different grid size
    pub fn with_grid_size(self, grid_size: usize) -> Self {
        Self { grid_size, ..self }
    }

    pub fn board(&self) -> Board {
        Board::new(self.grid_size, self.boundary)
    }

    /// Checks that a centered starting snake fits on the grid
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size == 0 {
            return Err(ConfigError::EmptyGrid);
        }

        if self.grid_size > MAX_GRID_SIZE {
            return Err(ConfigError::GridTooLarge(self.grid_size));
        }

        if self.initial_snake_length == 0 {
            return Err(ConfigError::EmptySnake);
        }

        // Head sits at grid_size / 2 and the body trails to the left.
        if self.initial_snake_length > self.grid_size / 2 + 1 {
            return Err(ConfigError::SnakeTooLong {
                length: self.initial_snake_length,
                grid_size: self.grid_size,
            });
        }

        Ok(())
    }
}
