use std::io;

use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame, Terminal,
};

use super::{board::Board, Scene, Surface};

/// Status shown around the board
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Hud {
    pub score: u32,
    pub high_score: u32,
    pub games_played: u32,
    pub elapsed: String,
    pub interval_ms: f64,
    pub running: bool,
    /// Score of the game that just ended, if any
    pub last_score: Option<u32>,
}

/// ratatui terminal used as the game's drawing surface
pub struct TerminalSurface<B: Backend> {
    terminal: Terminal<B>,
    hud: Hud,
}

impl<B: Backend> TerminalSurface<B> {
    pub fn new(terminal: Terminal<B>) -> Self {
        Self {
            terminal,
            hud: Hud::default(),
        }
    }

    pub fn set_hud(&mut self, hud: Hud) {
        self.hud = hud;
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

impl<B: Backend> Surface for TerminalSurface<B> {
    fn is_usable(&self) -> bool {
        self.terminal
            .size()
            .map(|size| size.width > 0 && size.height > 0)
            .unwrap_or(false)
    }

    fn draw(&mut self, scene: Scene<'_>) -> io::Result<()> {
        let hud = &self.hud;
        self.terminal.draw(|frame| render(frame, scene, hud))?;
        Ok(())
    }
}

fn render(frame: &mut Frame, scene: Scene<'_>, hud: &Hud) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Game area
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    frame.render_widget(render_stats(hud), chunks[0]);

    let (width, height) = scene.grid_size.map(Board::footprint).unwrap_or((0, 0));
    let framed = centered(chunks[1], width.saturating_add(2), height.saturating_add(2));
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::White))
        .title(" Snake ");
    let inner = block.inner(framed);
    frame.render_widget(block, framed);
    frame.render_widget(Board::new(scene), inner);

    if !hud.running {
        let popup = centered(chunks[1], 36, 7);
        frame.render_widget(Clear, popup);
        frame.render_widget(render_idle(hud), popup);
    }

    frame.render_widget(render_controls(), chunks[2]);
}

fn render_stats(hud: &Hud) -> Paragraph<'static> {
    let text = vec![Line::from(vec![
        Span::styled("Score: ", Style::default().fg(Color::Yellow)),
        Span::styled(
            hud.score.to_string(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("    "),
        Span::styled("Best: ", Style::default().fg(Color::Yellow)),
        Span::styled(hud.high_score.to_string(), Style::default().fg(Color::White)),
        Span::raw("    "),
        Span::styled("Time: ", Style::default().fg(Color::Yellow)),
        Span::styled(hud.elapsed.clone(), Style::default().fg(Color::White)),
        Span::raw("    "),
        Span::styled("Tick: ", Style::default().fg(Color::Yellow)),
        Span::styled(
            format!("{:.1}ms", hud.interval_ms),
            Style::default().fg(Color::White),
        ),
    ])];

    Paragraph::new(text).alignment(Alignment::Center)
}

fn render_idle(hud: &Hud) -> Paragraph<'static> {
    let mut text = vec![Line::from("")];

    match hud.last_score {
        Some(score) => {
            text.push(Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]));
            text.push(Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]));
        }
        None => {
            text.push(Line::from(vec![Span::styled(
                "STOPPED",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )]));
            text.push(Line::from(format!("Games played: {}", hud.games_played)));
        }
    }

    text.push(Line::from(vec![
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
    ]));

    Paragraph::new(text).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red)),
    )
}

fn render_controls() -> Paragraph<'static> {
    let text = vec![Line::from(vec![
        Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
        Span::raw(" or "),
        Span::styled("WASD", Style::default().fg(Color::Cyan)),
        Span::raw(" to move | "),
        Span::styled("1/2/3", Style::default().fg(Color::Cyan)),
        Span::raw(" speed | "),
        Span::styled("Space", Style::default().fg(Color::Cyan)),
        Span::raw(" stop/start | "),
        Span::styled("Q", Style::default().fg(Color::Red)),
        Span::raw(" to quit"),
    ])];

    Paragraph::new(text).alignment(Alignment::Center)
}

/// Rect of at most `width` x `height` centred in `area`
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Snake;
    use ratatui::backend::TestBackend;

    fn screen_text(surface: &TerminalSurface<TestBackend>) -> String {
        let buffer = surface.terminal().backend().buffer();
        let area = buffer.area;
        let mut text = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                text.push_str(buffer.cell((x, y)).map(|c| c.symbol()).unwrap_or(" "));
            }
            text.push('\n');
        }
        text
    }

    fn surface(width: u16, height: u16) -> TerminalSurface<TestBackend> {
        TerminalSurface::new(Terminal::new(TestBackend::new(width, height)).unwrap())
    }

    #[test]
    fn test_empty_terminal_is_not_usable() {
        assert!(!surface(0, 0).is_usable());
        assert!(surface(80, 30).is_usable());
    }

    #[test]
    fn test_draws_hud_while_running() {
        let mut surface = surface(80, 32);
        surface.set_hud(Hud {
            score: 7,
            high_score: 12,
            elapsed: "01:05".into(),
            interval_ms: 125.0,
            running: true,
            ..Default::default()
        });

        let snake = Snake::initial(21, 9);
        surface
            .draw(Scene {
                snake: Some(&snake),
                fruit: None,
                grid_size: Some(21),
            })
            .unwrap();

        let text = screen_text(&surface);
        assert!(text.contains("Score: 7"));
        assert!(text.contains("Best: 12"));
        assert!(text.contains("01:05"));
        assert!(text.contains("125.0ms"));
        assert!(!text.contains("GAME OVER"));
    }

    #[test]
    fn test_draws_game_over() {
        let mut surface = surface(80, 32);
        surface.set_hud(Hud {
            running: false,
            last_score: Some(4),
            ..Default::default()
        });
        surface
            .draw(Scene {
                grid_size: Some(21),
                ..Default::default()
            })
            .unwrap();

        let text = screen_text(&surface);
        assert!(text.contains("GAME OVER"));
        assert!(text.contains("Final Score: 4"));
    }

    #[test]
    fn test_centered_clamps_to_area() {
        let area = Rect::new(0, 0, 10, 4);
        assert_eq!(centered(area, 20, 20), area);
        assert_eq!(centered(area, 4, 2), Rect::new(3, 1, 4, 2));
    }
}
