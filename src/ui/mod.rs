//! Terminal UI: the presentation side of the game. It feeds column choices to
//! the engine and draws the board, turn indicator and outcome it reports.

mod app;
pub mod board_widget;
mod game_view;

pub use app::App;
