use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::game::{EndReason, FoodKind, Hud, SecurityStatus};
use crate::metrics::{format_duration, GameMetrics};

use super::surface::{CellCanvas, Shade};

/// Everything one frame needs
pub struct FrameView<'a> {
    pub canvas: &'a CellCanvas,
    pub hud: &'a Hud,
    pub metrics: &'a GameMetrics,
    pub paused: bool,
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, view: &FrameView<'_>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(view), chunks[0]);

        // Center the game grid horizontally
        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        match view.hud.finished {
            Some((reason, final_score)) => {
                frame.render_widget(self.render_game_over(reason, final_score, view), game_area)
            }
            None => frame.render_widget(self.render_grid(view), game_area),
        }

        frame.render_widget(self.render_controls(), chunks[2]);
    }

    fn shade_style(shade: Shade) -> Style {
        match shade {
            Shade::Empty => Style::default().fg(Color::DarkGray),
            Shade::Head => Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            Shade::Body => Style::default().fg(Color::Green),
            Shade::Food { kind, verified } => {
                let color = match kind {
                    FoodKind::Normal => Color::White,
                    FoodKind::Shield => Color::Blue,
                    FoodKind::Fraud if verified => Color::LightGreen,
                    FoodKind::Fraud => Color::Red,
                    FoodKind::Jam => Color::Magenta,
                    FoodKind::Drain => Color::Yellow,
                };
                Style::default().fg(color).add_modifier(Modifier::BOLD)
            }
        }
    }

    fn render_grid(&self, view: &FrameView<'_>) -> Paragraph<'_> {
        let lines: Vec<Line> = view
            .canvas
            .rows()
            .map(|row| {
                Line::from(
                    row.iter()
                        .map(|cell| {
                            Span::styled(format!("{} ", cell.glyph), Self::shade_style(cell.shade))
                        })
                        .collect::<Vec<_>>(),
                )
            })
            .collect();

        let title = if view.paused {
            " Ethereum Snake (paused) "
        } else {
            " Ethereum Snake "
        };

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(title),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, view: &FrameView<'_>) -> Paragraph<'_> {
        let hud = view.hud;
        let security_color = match hud.security {
            SecurityStatus::Stable => Color::Green,
            SecurityStatus::Shaky => Color::Red,
        };
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(hud.score.to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(format!("{}s", hud.time_remaining), value),
            Span::raw("    "),
            Span::styled("Security: ", label),
            Span::styled(
                format!("{} ({})", hud.security, hud.danger_count),
                Style::default().fg(security_color),
            ),
            Span::raw("    "),
            Span::styled("Last L2: ", label),
            Span::styled(hud.last_l2.clone(), value),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(view.metrics.high_score.to_string(), value),
            Span::raw("    "),
            Span::styled("Run: ", label),
            Span::styled(format_duration(view.metrics.run_time), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(
        &self,
        reason: EndReason,
        final_score: u32,
        view: &FrameView<'_>,
    ) -> Paragraph<'_> {
        let (headline, color) = if reason.is_win() {
            ("YOU WIN", Color::Green)
        } else {
            ("GAME OVER", Color::Red)
        };

        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                headline,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![Span::styled(
                reason.message(),
                Style::default().fg(Color::Gray),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    final_score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("    "),
                Span::styled("Runs: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    format!("{} ({} won)", view.metrics.games_played, view.metrics.wins),
                    Style::default().fg(Color::White),
                ),
            ]),
            Line::from(vec![
                Span::styled("Collapses: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    view.metrics
                        .endings(EndReason::SecurityCollapse)
                        .to_string(),
                    Style::default().fg(Color::White),
                ),
                Span::raw("    "),
                Span::styled("Fastest win: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    view.metrics
                        .fastest_win
                        .map_or_else(|| "--:--".to_string(), format_duration),
                    Style::default().fg(Color::White),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        )
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("P", Style::default().fg(Color::Cyan)),
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
