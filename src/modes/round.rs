//! Round controller
//!
//! Holds the single live [`GameState`] of a terminal session and layers the
//! timed-round rules on top of the pure core: a `3, 2, 1, GO` countdown, a
//! round clock that can run out, end reasons, a stats screen and the fading
//! trail the tail leaves behind. The controller never schedules anything
//! itself; the caller drives it with `advance_countdown`, `on_tick` and
//! `on_second` from its own timers.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;
use thiserror::Error;

use crate::game::{Action, GameEngine, GameState, Position, TickOutcome, apply_action};

/// Labels shown during the countdown, one per [`COUNTDOWN_STEP`]
pub const COUNTDOWN_STEPS: [&str; 4] = ["3", "2", "1", "GO"];

/// Time each countdown label stays on screen
pub const COUNTDOWN_STEP: Duration = Duration::from_millis(800);

/// Ticks a trail particle stays visible
pub const TRAIL_LIFE: u8 = 3;

/// Oldest particles are dropped beyond this many
pub const MAX_TRAIL_PARTICLES: usize = 30;

/// Movement speed presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speed {
    /// 190ms per tick
    Slow,
    /// 120ms per tick
    #[default]
    Speedy,
    /// 80ms per tick
    Rocket,
}

impl Speed {
    /// Get the tick interval for this speed
    pub fn tick_interval(&self) -> Duration {
        match self {
            Self::Slow => Duration::from_millis(190),
            Self::Speedy => Duration::from_millis(120),
            Self::Rocket => Duration::from_millis(80),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Slow => "Slow-mo",
            Self::Speedy => "Speedy",
            Self::Rocket => "Rocket",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoundConfigError {
    #[error("duration_secs must be at least 1")]
    ZeroDuration,
}

/// Settings for a timed round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundConfig {
    pub speed: Speed,
    /// Length of the round clock
    pub duration_secs: u32,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            speed: Speed::Speedy,
            duration_secs: 60,
        }
    }
}

impl RoundConfig {
    pub fn validate(&self) -> Result<(), RoundConfigError> {
        if self.duration_secs == 0 {
            return Err(RoundConfigError::ZeroDuration);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    Countdown,
    Playing,
    GameOver,
    Stats,
}

/// Why a round finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// Hit a wall or itself
    Collision,
    /// No free cell was left for food
    BoardFull,
    /// The round clock ran out
    TimeUp,
}

/// A fading mark on a cell the tail just left
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrailParticle {
    pub position: Position,
    pub life: u8,
}

pub struct Round {
    engine: GameEngine,
    config: RoundConfig,
    state: GameState,
    phase: RoundPhase,
    countdown_index: usize,
    remaining_secs: u32,
    elapsed_secs: u32,
    end_reason: Option<EndReason>,
    trail: VecDeque<TrailParticle>,
}

impl Round {
    /// Start a round in the countdown phase
    pub fn new(mut engine: GameEngine, config: RoundConfig) -> Self {
        let state = engine.reset();
        tracing::info!(
            speed = config.speed.label(),
            duration = config.duration_secs,
            "round created"
        );

        Self {
            engine,
            remaining_secs: config.duration_secs,
            config,
            state,
            phase: RoundPhase::Countdown,
            countdown_index: 0,
            elapsed_secs: 0,
            end_reason: None,
            trail: VecDeque::with_capacity(MAX_TRAIL_PARTICLES),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn config(&self) -> &RoundConfig {
        &self.config
    }

    pub fn end_reason(&self) -> Option<EndReason> {
        self.end_reason
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    pub fn trail(&self) -> impl Iterator<Item = &TrailParticle> {
        self.trail.iter()
    }

    /// Current countdown label, if counting down
    pub fn countdown_label(&self) -> Option<&'static str> {
        (self.phase == RoundPhase::Countdown).then(|| COUNTDOWN_STEPS[self.countdown_index])
    }

    pub fn status_text(&self) -> &'static str {
        match self.phase {
            RoundPhase::Countdown => "Countdown",
            RoundPhase::Stats => "Stats",
            RoundPhase::GameOver => match self.end_reason {
                Some(EndReason::TimeUp) => "Time up",
                _ => "Game over",
            },
            RoundPhase::Playing if self.state.paused => "Paused",
            RoundPhase::Playing => "Running",
        }
    }

    /// Move to the next countdown label.
    ///
    /// Returns true when the countdown finished and play started.
    pub fn advance_countdown(&mut self) -> bool {
        if self.phase != RoundPhase::Countdown {
            return false;
        }

        self.countdown_index += 1;
        if self.countdown_index < COUNTDOWN_STEPS.len() {
            return false;
        }

        self.countdown_index = COUNTDOWN_STEPS.len() - 1;
        self.phase = RoundPhase::Playing;
        tracing::info!("round started");

        // A game with no room for food is over before the first tick
        if self.state.game_over {
            self.end(EndReason::BoardFull);
        }
        true
    }

    /// Forward a player action to the core while playing
    pub fn handle_action(&mut self, action: Action) {
        if self.phase != RoundPhase::Playing {
            return;
        }
        self.state = apply_action(&self.state, action);
    }

    /// Advance the snake by one tick
    pub fn on_tick(&mut self) -> TickOutcome {
        if self.phase != RoundPhase::Playing {
            return TickOutcome::Idle;
        }

        let result = self.engine.step(&self.state);
        if result.outcome != TickOutcome::Idle {
            self.decay_trail();
            self.push_trail(&result.state);
        }
        self.state = result.state;

        match result.outcome {
            TickOutcome::Collision(_) => self.end(EndReason::Collision),
            TickOutcome::BoardFull => self.end(EndReason::BoardFull),
            _ => {}
        }

        result.outcome
    }

    /// Count one second off the round clock while playing and unpaused
    pub fn on_second(&mut self) {
        if self.phase != RoundPhase::Playing || self.state.paused {
            return;
        }

        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        self.elapsed_secs += 1;

        if self.remaining_secs == 0 {
            self.end(EndReason::TimeUp);
        }
    }

    /// Leave the game-over screen for the stats screen
    pub fn show_stats(&mut self) {
        if self.phase == RoundPhase::GameOver {
            self.phase = RoundPhase::Stats;
        }
    }

    /// Throw the current game away and count down into a fresh one
    pub fn restart(&mut self) {
        self.state = self.engine.restart();
        self.phase = RoundPhase::Countdown;
        self.countdown_index = 0;
        self.remaining_secs = self.config.duration_secs;
        self.elapsed_secs = 0;
        self.end_reason = None;
        self.trail.clear();
        tracing::info!("round restarted");
    }

    fn end(&mut self, reason: EndReason) {
        if matches!(self.phase, RoundPhase::GameOver | RoundPhase::Stats) {
            return;
        }

        self.end_reason = Some(reason);
        self.state = GameState {
            game_over: true,
            paused: false,
            ..self.state.clone()
        };
        self.phase = RoundPhase::GameOver;
        tracing::info!(
            reason = ?reason,
            score = self.state.score,
            elapsed = self.elapsed_secs,
            "round ended"
        );
    }

    fn decay_trail(&mut self) {
        self.trail.retain_mut(|particle| {
            particle.life -= 1;
            particle.life > 0
        });
    }

    /// Leave a particle where the old tail was, if the snake moved off it
    fn push_trail(&mut self, next: &GameState) {
        let old_tail = self.state.snake.tail();
        if next.snake.occupies(old_tail) {
            return;
        }

        self.trail.push_back(TrailParticle {
            position: old_tail,
            life: TRAIL_LIFE,
        });
        while self.trail.len() > MAX_TRAIL_PARTICLES {
            self.trail.pop_front();
        }
    }
}
