use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval, interval_at};

use super::round::{COUNTDOWN_STEP, Round, RoundConfig, RoundPhase};
use crate::game::GameEngine;
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// Timers driving a round; each restarts its period when play (re)starts
struct Clocks {
    movement: Interval,
    seconds: Interval,
    countdown: Interval,
}

impl Clocks {
    fn new(tick: Duration) -> Self {
        Self {
            movement: delayed(tick),
            seconds: delayed(Duration::from_secs(1)),
            countdown: delayed(COUNTDOWN_STEP),
        }
    }

    fn restart_play(&mut self) {
        self.movement.reset();
        self.seconds.reset();
    }
}

/// An interval whose first tick is one full period away
fn delayed(period: Duration) -> Interval {
    let mut timer = interval_at(Instant::now() + period, period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    timer
}

pub struct HumanMode {
    round: Round,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(engine: GameEngine, round_config: RoundConfig) -> Self {
        Self {
            round: Round::new(engine, round_config),
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut clocks = Clocks::new(self.round.config().speed.tick_interval());

        // Render at 30 FPS (33ms per frame)
        let mut render_timer = interval(Duration::from_millis(33));

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event, &mut clocks);
                    }
                }

                _ = clocks.countdown.tick() => {
                    if self.round.advance_countdown() {
                        clocks.restart_play();
                        if self.round.phase() == RoundPhase::GameOver {
                            self.record_game_over();
                        }
                    }
                }

                _ = clocks.movement.tick() => {
                    let outcome = self.round.on_tick();
                    if outcome.is_terminal() {
                        self.record_game_over();
                    }
                }

                _ = clocks.seconds.tick() => {
                    let was_playing = self.round.phase() == RoundPhase::Playing;
                    self.round.on_second();
                    if was_playing && self.round.phase() == RoundPhase::GameOver {
                        self.record_game_over();
                    }
                }

                // Render frame
                _ = render_timer.tick() => {
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.round, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event, clocks: &mut Clocks) {
        let Event::Key(key) = event else {
            return;
        };

        // Only process key press events, not release
        if key.kind != KeyEventKind::Press {
            return;
        }

        match self.input_handler.handle_key_event(key) {
            KeyAction::GameAction(action) => self.round.handle_action(action),
            KeyAction::Restart => {
                self.round.restart();
                clocks.countdown.reset();
            }
            KeyAction::ShowStats => self.round.show_stats(),
            KeyAction::Quit => self.should_quit = true,
            KeyAction::None => {}
        }
    }

    fn record_game_over(&mut self) {
        let state = self.round.state();
        self.metrics
            .on_game_over(state.score, state.silver_collected, state.golden_collected);
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Action, Direction, GameConfig};

    fn mode() -> HumanMode {
        HumanMode::new(
            GameEngine::with_seed(GameConfig::default(), 21),
            RoundConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_game_initialization() {
        let mode = mode();
        assert_eq!(mode.round.phase(), RoundPhase::Countdown);
        assert!(!mode.round.state().game_over);
        assert_eq!(mode.round.state().score, 0);
    }

    #[tokio::test]
    async fn test_restart_key_resets_round() {
        let mut mode = mode();
        let mut clocks = Clocks::new(Duration::from_millis(120));
        while !mode.round.advance_countdown() {}
        mode.round.handle_action(Action::Turn(Direction::Up));
        mode.round.on_tick();

        let r = crossterm::event::KeyEvent::new(
            crossterm::event::KeyCode::Char('r'),
            crossterm::event::KeyModifiers::NONE,
        );
        mode.handle_event(Event::Key(r), &mut clocks);

        assert_eq!(mode.round.phase(), RoundPhase::Countdown);
        assert_eq!(mode.round.state().snake.len(), 3);
        assert_eq!(mode.round.state().direction, Direction::Right);
    }

    #[tokio::test]
    async fn test_game_over_recorded_in_metrics() {
        let mut mode = mode();
        while !mode.round.advance_countdown() {}
        for _ in 0..60 {
            mode.round.on_second();
        }
        mode.record_game_over();
        assert_eq!(mode.metrics.games_played, 1);
    }
}
