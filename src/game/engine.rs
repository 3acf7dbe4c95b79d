use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{
    config::{FoodMode, GameConfig},
    food::place_food,
    session::{create_initial_state, restart_game},
    state::{FoodType, GameState},
};

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// What a single tick did to the state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// State was paused or already over; nothing changed
    Idle,
    /// Snake moved one cell without eating
    Moved,
    /// Snake ate food of the given type and new food was placed
    Ate(FoodType),
    /// Snake ate the last reachable food and filled the board
    BoardFull,
    /// Snake crashed
    Collision(CollisionType),
}

impl TickOutcome {
    /// True if this outcome ended the game
    pub fn is_terminal(&self) -> bool {
        matches!(self, TickOutcome::BoardFull | TickOutcome::Collision(_))
    }
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    pub state: GameState,
    pub outcome: TickOutcome,
}

/// Food type that follows eating normal food for the `normal_eaten`-th time
pub fn next_food_type(normal_eaten: u32) -> FoodType {
    if normal_eaten > 0 && normal_eaten % 10 == 0 {
        FoodType::Golden
    } else if normal_eaten > 0 && normal_eaten % 5 == 0 {
        FoodType::Silver
    } else {
        FoodType::Normal
    }
}

/// Advance `state` by one tick, reporting what happened.
///
/// Paused and finished states come back unchanged.
pub fn step<R: Rng + ?Sized>(state: &GameState, rng: &mut R) -> StepResult {
    if state.game_over || state.paused {
        return StepResult {
            state: state.clone(),
            outcome: TickOutcome::Idle,
        };
    }

    let direction = state.next_direction;
    let raw_head = state.snake.head().moved_in_direction(direction);

    let Some(new_head) = state.board.resolve(raw_head) else {
        tracing::debug!(x = raw_head.x, y = raw_head.y, "snake hit the wall");
        return StepResult {
            state: GameState {
                direction,
                game_over: true,
                ..state.clone()
            },
            outcome: TickOutcome::Collision(CollisionType::Wall),
        };
    };

    let is_eating = state.food == Some(new_head);
    let snake = state.snake.advanced(new_head, is_eating);

    if snake.collides_with_body(new_head) {
        tracing::debug!(x = new_head.x, y = new_head.y, "snake hit itself");
        return StepResult {
            state: GameState {
                direction,
                snake,
                game_over: true,
                ..state.clone()
            },
            outcome: TickOutcome::Collision(CollisionType::SelfCollision),
        };
    }

    let mut next = GameState {
        direction,
        snake,
        ..state.clone()
    };

    if !is_eating {
        return StepResult {
            state: next,
            outcome: TickOutcome::Moved,
        };
    }

    let eaten = state.food_type;
    award(&mut next, eaten);
    next.food = place_food(&next.board, &next.snake, rng);

    let outcome = if next.food.is_none() {
        tracing::debug!(score = next.score, "board full");
        next.game_over = true;
        TickOutcome::BoardFull
    } else {
        TickOutcome::Ate(eaten)
    };

    StepResult {
        state: next,
        outcome,
    }
}

/// Advance `state` by one tick
pub fn tick<R: Rng + ?Sized>(state: &GameState, rng: &mut R) -> GameState {
    step(state, rng).state
}

/// Apply score, counters and the next food type for eating `eaten`
fn award(state: &mut GameState, eaten: FoodType) {
    state.score += eaten.points();

    match (state.food_mode, eaten) {
        (FoodMode::Single, _) => {
            state.normal_food_eaten_count += 1;
            state.food_type = FoodType::Normal;
        }
        (FoodMode::Tiered, FoodType::Normal) => {
            state.normal_food_eaten_count += 1;
            state.food_type = next_food_type(state.normal_food_eaten_count);
        }
        (FoodMode::Tiered, FoodType::Silver) => {
            state.silver_collected += 1;
            state.food_type = FoodType::Normal;
        }
        (FoodMode::Tiered, FoodType::Golden) => {
            state.golden_collected += 1;
            state.food_type = FoodType::Normal;
        }
    }
}

/// Owns a configuration and a random source for callers that keep one
/// session alive, such as the terminal front end.
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine seeded from OS entropy
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    /// Create an engine whose food placement is reproducible
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Start a new session
    pub fn reset(&mut self) -> GameState {
        create_initial_state(&self.config, &mut self.rng)
    }

    /// Throw away the current session and start a fresh one
    pub fn restart(&mut self) -> GameState {
        restart_game(&self.config, &mut self.rng)
    }

    /// Execute one step of the game
    pub fn step(&mut self, state: &GameState) -> StepResult {
        step(state, &mut self.rng)
    }
}
