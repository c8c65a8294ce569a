//! Core Connect Four game logic: board representation, player types, and the
//! game state machine that applies moves and detects wins and ties.

mod board;
mod player;
mod state;

pub use board::{Board, Cell, Coord, WinningLine, COLS, CONNECT, ROWS};
pub use player::Player;
pub use state::{GameState, GameStatus, MoveOutcome, RejectReason};
