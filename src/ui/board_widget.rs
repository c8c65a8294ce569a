//! Board drawing and the screen geometry used to map mouse positions back to
//! columns.

use crate::game::{Board, Cell, Coord, Player, WinningLine, COLS, ROWS};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Screen columns per board cell
pub const CELL_WIDTH: u16 = 3;
/// "  ║" before the first cell
const FRAME_LEFT: u16 = 3;
/// " ║" after the last cell
const FRAME_RIGHT: u16 = 2;

pub const BOARD_WIDTH: u16 = FRAME_LEFT + CELL_WIDTH * COLS as u16 + FRAME_RIGHT;
/// Column tops, top border, cells, bottom border, selection marker
pub const BOARD_HEIGHT: u16 = ROWS as u16 + 4;

/// A piece on its way down to `target`, currently drawn at `row`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallingPiece {
    pub target: Coord,
    pub player: Player,
    pub row: usize,
}

/// Everything the board needs to draw one frame.
pub struct BoardView<'a> {
    pub board: &'a Board,
    pub selected_column: usize,
    /// Player whose turn it is; `None` once the game is over
    pub turn: Option<Player>,
    pub winning_line: Option<&'a WinningLine>,
    pub falling: Option<FallingPiece>,
}

pub fn player_color(player: Player) -> Color {
    match player {
        Player::Red => Color::Red,
        Player::Blue => Color::LightBlue,
    }
}

/// Fixed-size board rectangle centred in `area`.
pub fn centered(area: Rect) -> Rect {
    let width = BOARD_WIDTH.min(area.width);
    let height = BOARD_HEIGHT.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Column under the screen position `(x, y)`, if it falls on the board drawn
/// in `board_area`.
pub fn column_at(board_area: Rect, x: u16, y: u16) -> Option<usize> {
    if y < board_area.y || y >= board_area.y + board_area.height {
        return None;
    }
    let first_cell = board_area.x + FRAME_LEFT;
    if x < first_cell || x >= board_area.x + board_area.width {
        return None;
    }
    let col = ((x - first_cell) / CELL_WIDTH) as usize;
    (col < COLS).then_some(col)
}

pub fn render_board(frame: &mut Frame, view: &BoardView, area: Rect) {
    let turn_color = view.turn.map_or(Color::DarkGray, player_color);
    let mut lines = Vec::with_capacity(BOARD_HEIGHT as usize);

    // Column tops: the drop targets, coloured for the player to move
    let mut col_line = vec![Span::raw(" ".repeat(FRAME_LEFT as usize))];
    for col in 0..COLS {
        let mut style = Style::default().fg(turn_color);
        if col == view.selected_column && view.turn.is_some() {
            style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
        }
        col_line.push(Span::styled(format!(" {} ", col + 1), style));
    }
    lines.push(Line::from(col_line));

    let border = "═".repeat(CELL_WIDTH as usize * COLS + 1);
    lines.push(Line::from(format!("  ╔{border}╗")));

    for row in 0..ROWS {
        let mut row_spans = vec![Span::raw("  ║")];
        for col in 0..COLS {
            let at = Coord::new(row, col);
            row_spans.push(cell_span(view, at));
        }
        row_spans.push(Span::raw(" ║"));
        lines.push(Line::from(row_spans));
    }

    lines.push(Line::from(format!("  ╚{border}╝")));

    let mut indicator_line = vec![Span::raw(" ".repeat(FRAME_LEFT as usize))];
    for col in 0..COLS {
        if col == view.selected_column && view.turn.is_some() {
            indicator_line.push(Span::styled(" ▲ ", Style::default().fg(turn_color)));
        } else {
            indicator_line.push(Span::raw("   "));
        }
    }
    lines.push(Line::from(indicator_line));

    frame.render_widget(Paragraph::new(lines), area);
}

fn cell_span(view: &BoardView, at: Coord) -> Span<'static> {
    let mut cell = view.board.cell(at);
    if let Some(falling) = view.falling {
        if falling.target == at {
            cell = Cell::Empty;
        } else if falling.target.col == at.col && falling.row == at.row {
            cell = falling.player.to_cell();
        }
    }

    let mut style = match cell.player() {
        Some(player) => Style::default().fg(player_color(player)),
        None => Style::default().fg(Color::DarkGray),
    };
    let symbol = if cell == Cell::Empty { " . " } else { " ● " };

    if view.falling.is_none() && view.winning_line.is_some_and(|line| line.contains(&at)) {
        style = style.bg(Color::Green).add_modifier(Modifier::BOLD);
    }

    Span::styled(symbol, style)
}
