use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{Direction, FoodType, GameState, Position};
use crate::metrics::{GameMetrics, format_clock};
use crate::modes::{EndReason, Round, RoundPhase};

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, round: &Round, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(round, metrics), chunks[0]);

        // Center the game grid horizontally
        let game_area = Layout::default()
            .direction(LayoutDirection::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        let body = match round.phase() {
            RoundPhase::Countdown | RoundPhase::Playing => self.render_grid(round),
            RoundPhase::GameOver => self.render_game_over(round),
            RoundPhase::Stats => self.render_round_stats(round),
        };
        frame.render_widget(body, game_area);

        frame.render_widget(self.render_controls(), chunks[2]);
    }

    fn render_grid(&self, round: &Round) -> Paragraph<'_> {
        let state = round.state();
        let size = state.grid_size();
        let mut lines = Vec::with_capacity(size + 2);

        for y in 0..size {
            let spans: Vec<Span> = (0..size)
                .map(|x| self.cell(round, Position::new(x as i32, y as i32)))
                .collect();
            lines.push(Line::from(spans));
        }

        if let Some(label) = round.countdown_label() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                label,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )));
        }

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn cell(&self, round: &Round, pos: Position) -> Span<'static> {
        let state = round.state();

        if pos == state.snake.head() {
            return Span::styled(
                head_glyph(state.direction),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            );
        }

        if state.snake.collides_with_body(pos) {
            return Span::styled("□ ", Style::default().fg(Color::Green));
        }

        if state.food == Some(pos) {
            return Span::styled("O ", food_style(state.food_type));
        }

        match round.trail().find(|p| p.position == pos) {
            Some(particle) => {
                let glyph = if particle.life > 1 { "∙ " } else { "· " };
                Span::styled(glyph, Style::default().fg(Color::Green).add_modifier(Modifier::DIM))
            }
            None => Span::styled(". ", Style::default().fg(Color::DarkGray)),
        }
    }

    fn render_stats(&self, round: &Round, metrics: &GameMetrics) -> Paragraph<'_> {
        let state = round.state();
        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Status: ", Style::default().fg(Color::Yellow)),
            Span::styled(round.status_text(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                format_clock(round.remaining_secs()),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.high_score.to_string(), Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, round: &Round) -> Paragraph<'_> {
        let headline = match round.end_reason() {
            Some(EndReason::TimeUp) => "TIME UP",
            Some(EndReason::BoardFull) => "BOARD CLEARED",
            _ => "GAME OVER",
        };

        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                headline,
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    round.state().score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                key_span("Enter", Color::Cyan),
                Span::styled(" for stats, ", Style::default().fg(Color::Gray)),
                key_span("R", Color::Green),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                key_span("Q", Color::Red),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_round_stats(&self, round: &Round) -> Paragraph<'_> {
        let state: &GameState = round.state();
        let row = |label: &'static str, value: String| {
            Line::from(vec![
                Span::styled(label, Style::default().fg(Color::Yellow)),
                Span::styled(value, Style::default().fg(Color::White)),
            ])
        };

        let text = vec![
            Line::from(""),
            row("Time played: ", format!("{}s", round.elapsed_secs())),
            row("Speed: ", round.config().speed.label().to_string()),
            row("Silver collected: ", state.silver_collected.to_string()),
            row("Golden collected: ", state.golden_collected.to_string()),
            row("Score: ", state.score.to_string()),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                key_span("R", Color::Green),
                Span::styled(" to play again", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title(" Stats "),
        )
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("Space", Style::default().fg(Color::Cyan)),
            Span::raw(" to pause | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" to restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn head_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => "▲ ",
        Direction::Down => "▼ ",
        Direction::Left => "◀ ",
        Direction::Right => "▶ ",
    }
}

fn food_style(food_type: FoodType) -> Style {
    let color = match food_type {
        FoodType::Normal => Color::Red,
        FoodType::Silver => Color::Gray,
        FoodType::Golden => Color::Yellow,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

fn key_span(key: &'static str, color: Color) -> Span<'static> {
    Span::styled(key, Style::default().fg(color).add_modifier(Modifier::BOLD))
}
