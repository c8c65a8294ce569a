use std::io;
use std::time::{Duration, Instant};

use crate::config::UiConfig;
use crate::game::{Coord, GameState, MoveOutcome, Player, RejectReason, WinningLine, COLS};
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{backend::Backend, layout::Rect, Terminal};
use tracing::{debug, error, info};

use super::board_widget::{self, FallingPiece};
use super::game_view::{self, GameView};

/// A newly placed piece still falling towards its row.
#[derive(Debug, Clone, Copy)]
struct DropAnimation {
    target: Coord,
    player: Player,
    started: Instant,
    row: usize,
}

/// Outcome text waiting for its announcement delay.
#[derive(Debug, Clone)]
struct PendingBanner {
    text: String,
    due: Instant,
}

/// Terminal front end. Turns keys and clicks into column choices for the
/// engine and draws whatever the engine reports back.
pub struct App {
    game_state: GameState,
    config: UiConfig,
    selected_column: usize,
    should_quit: bool,
    message: Option<String>,
    winning_line: Option<WinningLine>,
    falling: Option<DropAnimation>,
    pending_banner: Option<PendingBanner>,
    banner: Option<String>,
    /// Where the board was last drawn, for mouse hit-testing
    board_area: Rect,
}

impl App {
    pub fn new(config: UiConfig) -> Self {
        App {
            game_state: GameState::initial(),
            selected_column: config.start_column.min(COLS - 1),
            config,
            should_quit: false,
            message: None,
            winning_line: None,
            falling: None,
            pending_banner: None,
            banner: None,
            board_area: Rect::default(),
        }
    }

    pub fn game_state(&self) -> &GameState {
        &self.game_state
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        info!("game started");
        loop {
            self.tick(Instant::now());
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }
        info!(moves = self.game_state.move_count(), "quitting");
        Ok(())
    }

    /// Handle terminal events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(self.poll_timeout())? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    self.handle_key(key, Instant::now())
                }
                Event::Mouse(mouse) => self.handle_mouse(mouse, Instant::now()),
                _ => {}
            }
        }
        Ok(())
    }

    fn poll_timeout(&self) -> Duration {
        let tick = Duration::from_millis(self.config.tick_rate_ms);
        if self.falling.is_some() {
            tick.min(Duration::from_millis(self.config.drop_frame_ms))
        } else {
            tick
        }
    }

    /// Advance time-based presentation state: the falling piece and the
    /// delayed outcome banner.
    pub fn tick(&mut self, now: Instant) {
        if let Some(anim) = self.falling {
            let frame_ms = self.config.drop_frame_ms.max(1) as u128;
            let row = (now.saturating_duration_since(anim.started).as_millis() / frame_ms) as usize;
            self.falling = (row < anim.target.row).then_some(DropAnimation { row, ..anim });
        }

        if self.pending_banner.as_ref().is_some_and(|p| now >= p.due) {
            if let Some(pending) = self.pending_banner.take() {
                info!(banner = %pending.text, "announcing outcome");
                self.banner = Some(pending.text);
            }
        }
    }

    /// Handle key press
    fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        // Clear message on any key press
        self.message = None;

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.selected_column + 1 < COLS {
                    self.selected_column += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_piece(now);
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                let Some(n) = c.to_digit(10).map(|d| d as usize) else {
                    return;
                };
                if (1..=COLS).contains(&n) {
                    self.selected_column = n - 1;
                    self.drop_piece(now);
                }
            }
            KeyCode::Char('r') => {
                self.restart();
            }
            _ => {}
        }
    }

    /// Hovering selects a column, a left click drops into it
    fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        let Some(col) = board_widget::column_at(self.board_area, mouse.column, mouse.row) else {
            return;
        };

        match mouse.kind {
            MouseEventKind::Moved => self.selected_column = col,
            MouseEventKind::Down(MouseButton::Left) => {
                self.message = None;
                self.selected_column = col;
                self.drop_piece(now);
            }
            _ => {}
        }
    }

    fn restart(&mut self) {
        self.game_state.reset();
        self.selected_column = self.config.start_column.min(COLS - 1);
        self.winning_line = None;
        self.falling = None;
        self.pending_banner = None;
        self.banner = None;
        self.message = Some("New game started!".to_string());
        info!("new game");
    }

    /// Drop piece in selected column
    fn drop_piece(&mut self, now: Instant) {
        // A second move lands the previous piece at once
        self.falling = None;

        debug!(column = self.selected_column, "drop requested");
        match self.game_state.apply_move(self.selected_column) {
            Ok(outcome) => self.show_outcome(outcome, now),
            Err(err) => {
                error!(%err, "engine refused column");
                self.message = Some(format!("Invalid move: {err}"));
            }
        }
    }

    fn show_outcome(&mut self, outcome: MoveOutcome, now: Instant) {
        match outcome {
            MoveOutcome::Placed { at, player } => {
                self.start_animation(at, player, now);
            }
            MoveOutcome::Won { at, player, line } => {
                self.start_animation(at, player, now);
                self.winning_line = Some(line);
                let text = format!("{} player wins!", self.config.player_name(player));
                self.announce(text, now);
            }
            MoveOutcome::Tied { at, player } => {
                self.start_animation(at, player, now);
                self.announce("Tie Game".to_string(), now);
            }
            MoveOutcome::Rejected(RejectReason::ColumnFull) => {
                self.message = Some("Column is full!".to_string());
            }
            MoveOutcome::Rejected(RejectReason::GameAlreadyOver) => {
                self.message = Some("Game over! Press 'r' to restart.".to_string());
            }
        }
    }

    fn start_animation(&mut self, target: Coord, player: Player, now: Instant) {
        if self.config.drop_frame_ms == 0 || target.row == 0 {
            return;
        }
        self.falling = Some(DropAnimation {
            target,
            player,
            started: now,
            row: 0,
        });
    }

    fn announce(&mut self, text: String, now: Instant) {
        self.pending_banner = Some(PendingBanner {
            text,
            due: now + Duration::from_millis(self.config.announce_delay_ms),
        });
        self.tick(now);
    }

    /// Render the UI
    fn render(&mut self, frame: &mut ratatui::Frame) {
        let view = GameView {
            game_state: &self.game_state,
            config: &self.config,
            selected_column: self.selected_column,
            message: self.message.as_deref(),
            banner: self.banner.as_deref(),
            winning_line: self.winning_line.as_ref(),
            falling: self.falling.map(|anim| FallingPiece {
                target: anim.target,
                player: anim.player,
                row: anim.row,
            }),
        };
        self.board_area = game_view::render(frame, &view);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(UiConfig::default())
    }
}
