//! Pure input reducers. Both return the input unchanged when the request is ignored.

use super::action::{Action, Direction};
use super::state::GameState;

/// Queue `direction` for the next tick.
///
/// Ignored once the game is over or when it would reverse the current heading.
pub fn set_direction(state: &GameState, direction: Direction) -> GameState {
    if state.game_over || state.direction.is_opposite(direction) {
        return state.clone();
    }

    GameState {
        next_direction: direction,
        ..state.clone()
    }
}

/// Flip the paused flag, unless the game is over
pub fn toggle_pause(state: &GameState) -> GameState {
    if state.game_over {
        return state.clone();
    }

    GameState {
        paused: !state.paused,
        ..state.clone()
    }
}

/// Dispatch a player [`Action`] to the matching reducer
pub fn apply_action(state: &GameState, action: Action) -> GameState {
    match action {
        Action::Turn(direction) => set_direction(state, direction),
        Action::TogglePause => toggle_pause(state),
    }
}
