use std::fmt;

use tracing::{debug, info, instrument};

use super::{Board, Coord, Player, WinningLine, COLS};
use crate::error::GameError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won(Player),
    Tied,
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        self != GameStatus::InProgress
    }
}

/// Why a move was refused. These are ordinary game-flow results, not faults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    GameAlreadyOver,
    ColumnFull,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::GameAlreadyOver => write!(f, "game is already over"),
            RejectReason::ColumnFull => write!(f, "column is full"),
        }
    }
}

/// Result of [`GameState::apply_move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Piece placed, game continues and the turn has passed.
    Placed { at: Coord, player: Player },
    /// Piece placed and completed `line`.
    Won {
        at: Coord,
        player: Player,
        line: WinningLine,
    },
    /// Piece placed and filled the board without a winner.
    Tied { at: Coord, player: Player },
    /// Nothing changed.
    Rejected(RejectReason),
}

impl MoveOutcome {
    /// Where the piece landed, unless the move was rejected
    pub fn placed_at(&self) -> Option<Coord> {
        match *self {
            MoveOutcome::Placed { at, .. }
            | MoveOutcome::Won { at, .. }
            | MoveOutcome::Tied { at, .. } => Some(at),
            MoveOutcome::Rejected(_) => None,
        }
    }
}

/// The whole game: board, whose turn it is, and whether it has ended.
///
/// Once the status leaves `InProgress` the board is frozen and every further
/// move is rejected with [`RejectReason::GameAlreadyOver`].
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    board: Board,
    current_player: Player,
    status: GameStatus,
    last_move: Option<Coord>,
    move_count: usize,
}

impl GameState {
    /// Create initial game state
    pub fn initial() -> Self {
        GameState {
            board: Board::new(),
            current_player: Player::Red, // Red starts
            status: GameStatus::InProgress,
            last_move: None,
            move_count: 0,
        }
    }

    /// Discard the current game and start over
    pub fn reset(&mut self) {
        *self = GameState::initial();
    }

    /// Get current player
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.status.is_over()
    }

    /// Coordinate of the most recently placed piece
    pub fn last_move(&self) -> Option<Coord> {
        self.last_move
    }

    /// Number of pieces placed so far
    pub fn move_count(&self) -> usize {
        self.move_count
    }

    /// Get list of legal columns (not full)
    pub fn legal_columns(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }

        (0..COLS)
            .filter(|&col| !self.board.is_column_full(col))
            .collect()
    }

    /// Row the next piece dropped into `column` would land on, or `None` if
    /// the column is full.
    pub fn find_drop_row(&self, column: usize) -> Result<Option<usize>, GameError> {
        self.board.drop_row(column)
    }

    /// Drop the current player's piece into `column`.
    ///
    /// Rejections leave the state untouched. An out-of-range column is a
    /// caller bug and comes back as `Err`, also without touching the state.
    #[instrument(level = "debug", skip(self))]
    pub fn apply_move(&mut self, column: usize) -> Result<MoveOutcome, GameError> {
        if self.is_terminal() {
            debug!(column, status = ?self.status, "move rejected, game already over");
            return Ok(MoveOutcome::Rejected(RejectReason::GameAlreadyOver));
        }

        let Some(row) = self.board.drop_row(column)? else {
            debug!(column, "move rejected, column full");
            return Ok(MoveOutcome::Rejected(RejectReason::ColumnFull));
        };

        let player = self.current_player;
        let at = Coord::new(row, column);
        self.board.set(at, player.to_cell());
        self.last_move = Some(at);
        self.move_count += 1;

        if let Some(line) = self.board.winning_line(player) {
            self.status = GameStatus::Won(player);
            info!(%player, moves = self.move_count, ?line, "game won");
            return Ok(MoveOutcome::Won { at, player, line });
        }

        if self.board.is_full() {
            self.status = GameStatus::Tied;
            info!(moves = self.move_count, "game tied");
            return Ok(MoveOutcome::Tied { at, player });
        }

        self.current_player = player.other();
        debug!(row, column, "piece placed");
        Ok(MoveOutcome::Placed { at, player })
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}
