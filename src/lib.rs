//! # Connect Four
//!
//! Two-player Connect Four in the terminal. The game engine owns the board,
//! turn and win/tie detection; the terminal UI built with Ratatui only turns
//! input into column choices and draws what the engine reports.
//!
//! ## Modules
//!
//! - [`game`] — Core game logic: board, player, state machine
//! - [`ui`] — Terminal UI: board rendering, input, outcome announcements
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod config;
pub mod error;
pub mod game;
pub mod ui;
