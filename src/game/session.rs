//! Session factory: fresh states for new games and restarts.

use rand::Rng;

use super::{
    action::Direction,
    config::GameConfig,
    food::place_food,
    state::{GameState, Position, Snake},
};

/// Build the starting state for `config`.
///
/// The snake is centered and faces right, with its body trailing to the left.
pub fn create_initial_state<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> GameState {
    let board = config.board();
    let center = (config.grid_size / 2) as i32;
    let snake = Snake::new(
        Position::new(center, center),
        Direction::Right,
        config.initial_snake_length,
    );
    let food = place_food(&board, &snake, rng);

    let mut state = GameState::new(board, config.food_mode, snake, Direction::Right, food);
    // Only reachable on a board the starting snake already fills
    state.game_over = food.is_none();

    tracing::debug!(
        grid_size = config.grid_size,
        boundary = ?config.boundary,
        food_mode = ?config.food_mode,
        "created initial state"
    );
    state
}

/// Start over; nothing from the previous session is kept
pub fn restart_game<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> GameState {
    create_initial_state(config, rng)
}
