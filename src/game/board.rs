use crate::error::GameError;

use super::Player;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;
/// Pieces in a row needed to win
pub const CONNECT: usize = 4;

/// Scan directions as (row step, column step): right, down, down-right, down-left.
/// The order is the tie-break when one move completes several lines.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Red,
    Blue,
}

impl Cell {
    /// The player occupying this cell, if any
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Red => Some(Player::Red),
            Cell::Blue => Some(Player::Blue),
        }
    }
}

/// A board position. Row 0 is the top, row `ROWS - 1` the bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Coord { row, col }
    }
}

/// The four cells of a completed line, in scan order starting at the anchor.
pub type WinningLine = [Coord; CONNECT];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; COLS]; ROWS],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [[Cell::Empty; COLS]; ROWS],
        }
    }

    /// Get the cell at a specific position
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    pub fn cell(&self, at: Coord) -> Cell {
        self.cells[at.row][at.col]
    }

    /// Check if a column is full
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= COLS {
            return true;
        }
        self.cells[0][col] != Cell::Empty
    }

    /// Lowest empty row in `col`, scanning from the bottom up.
    /// `Ok(None)` means the column is full.
    pub fn drop_row(&self, col: usize) -> Result<Option<usize>, GameError> {
        if col >= COLS {
            return Err(GameError::InvalidColumn {
                column: col,
                width: COLS,
            });
        }

        Ok((0..ROWS).rev().find(|&row| self.cells[row][col] == Cell::Empty))
    }

    /// Write a piece. Only the engine calls this, and only on an empty cell.
    pub(super) fn set(&mut self, at: Coord, cell: Cell) {
        debug_assert_eq!(self.cells[at.row][at.col], Cell::Empty);
        self.cells[at.row][at.col] = cell;
    }

    /// Check if every cell is occupied
    pub fn is_full(&self) -> bool {
        self.cells
            .iter()
            .all(|row| row.iter().all(|&cell| cell != Cell::Empty))
    }

    /// First winning line for `player` found by scanning every cell in
    /// row-major order and trying each direction in turn.
    pub fn winning_line(&self, player: Player) -> Option<WinningLine> {
        let cell = player.to_cell();
        for row in 0..ROWS {
            for col in 0..COLS {
                let anchor = Coord::new(row, col);
                for &direction in &DIRECTIONS {
                    if let Some(line) = self.line_from(anchor, direction, cell) {
                        return Some(line);
                    }
                }
            }
        }
        None
    }

    fn line_from(
        &self,
        anchor: Coord,
        (d_row, d_col): (isize, isize),
        cell: Cell,
    ) -> Option<WinningLine> {
        let mut line = [anchor; CONNECT];
        for (step, slot) in line.iter_mut().enumerate() {
            let row = anchor.row as isize + d_row * step as isize;
            let col = anchor.col as isize + d_col * step as isize;
            if row < 0 || col < 0 || row >= ROWS as isize || col >= COLS as isize {
                return None;
            }
            let at = Coord::new(row as usize, col as usize);
            if self.cell(at) != cell {
                return None;
            }
            *slot = at;
        }
        Some(line)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
impl Board {
    /// Build a board from top-to-bottom row strings: `.` empty, `R` red, `B` blue.
    pub(crate) fn from_rows(rows: [&str; ROWS]) -> Self {
        let mut board = Board::new();
        for (row, line) in rows.iter().enumerate() {
            assert_eq!(line.len(), COLS, "row {row} must have {COLS} cells");
            for (col, ch) in line.chars().enumerate() {
                board.cells[row][col] = match ch {
                    '.' => Cell::Empty,
                    'R' => Cell::Red,
                    'B' => Cell::Blue,
                    other => panic!("unexpected cell {other:?}"),
                };
            }
        }
        board
    }
}
