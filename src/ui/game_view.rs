use crate::config::UiConfig;
use crate::game::{GameState, WinningLine};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::board_widget::{self, BoardView, FallingPiece, BOARD_HEIGHT};

pub struct GameView<'a> {
    pub game_state: &'a GameState,
    pub config: &'a UiConfig,
    pub selected_column: usize,
    pub message: Option<&'a str>,
    /// Outcome text, once its announcement delay has passed
    pub banner: Option<&'a str>,
    pub winning_line: Option<&'a WinningLine>,
    pub falling: Option<FallingPiece>,
}

/// Draw the whole screen and return where the board landed.
pub fn render(frame: &mut Frame, view: &GameView) -> Rect {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),            // Header
            Constraint::Min(BOARD_HEIGHT),    // Board
            Constraint::Length(3),            // Message
            Constraint::Length(3),            // Controls
        ])
        .split(frame.area());

    render_header(frame, view, chunks[0]);

    let board_area = board_widget::centered(chunks[1]);
    let turn = (!view.game_state.is_terminal()).then(|| view.game_state.current_player());
    let board_view = BoardView {
        board: view.game_state.board(),
        selected_column: view.selected_column,
        turn,
        winning_line: view.winning_line,
        falling: view.falling,
    };
    board_widget::render_board(frame, &board_view, board_area);

    render_message(frame, view.message, chunks[2]);
    render_controls(frame, chunks[3]);

    board_area
}

fn render_header(frame: &mut Frame, view: &GameView, area: Rect) {
    let player = view.game_state.current_player();

    let (status, color) = if view.game_state.is_terminal() {
        let text = view.banner.unwrap_or("Game Over");
        (text.to_string(), Color::Green)
    } else {
        (
            format!(
                "Current Player: {} (player {})",
                view.config.player_name(player),
                player.number()
            ),
            board_widget::player_color(player),
        )
    };

    let header = Paragraph::new(status)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Connect Four"),
        );

    frame.render_widget(header, area);
}

fn render_message(frame: &mut Frame, message: Option<&str>, area: Rect) {
    let msg_widget = Paragraph::new(message.unwrap_or(""))
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let line = Line::from("←/→: Move  |  Enter/Click/1-7: Drop  |  R: Restart  |  Q: Quit");

    let controls = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Controls"),
        );

    frame.render_widget(controls, area);
}
