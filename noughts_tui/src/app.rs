//! Application state and logic.

use crossterm::event::KeyCode;
use noughts::{rules, Board, EngineEvent, Position};
use tracing::{debug, warn};

use crate::input;

/// Main application state.
///
/// The board here is a display mirror rebuilt purely from engine
/// events; the engine remains the only source of truth.
pub struct App {
    board: Board,
    status: String,
    finished: bool,
    winning_line: Option<[usize; 3]>,
    cursor: Position,
}

impl App {
    /// Creates a new application.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            status: "It's your turn! Press 1-9 or move with arrows and Enter.".to_string(),
            finished: false,
            winning_line: None,
            cursor: Position::Center,
        }
    }

    /// Gets the mirrored board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Gets the current status message.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Returns true once the game is over.
    pub fn finished(&self) -> bool {
        self.finished
    }

    /// Returns the completed line, if the game ended with one.
    pub fn winning_line(&self) -> Option<[usize; 3]> {
        self.winning_line
    }

    /// Gets the keyboard cursor.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Moves the keyboard cursor.
    pub fn move_cursor(&mut self, key: KeyCode) {
        self.cursor = input::move_cursor(self.cursor, key);
    }

    /// Applies an engine event to the display mirror.
    pub fn handle_event(&mut self, event: EngineEvent) {
        debug!(?event, "Handling engine event");

        match event {
            EngineEvent::CellUpdated { index, mark } => {
                if let Err(error) = self.board.set(index, mark) {
                    // The engine only reports legal placements; a failure
                    // here means the mirror fell out of step.
                    warn!(%error, "could not apply cell update to the mirror");
                }
            }
            EngineEvent::StatusChanged(text) => {
                self.status = text;
            }
            EngineEvent::GameFinished(_) => {
                self.finished = true;
                self.winning_line = rules::winning_line(&self.board).map(|(_, line)| line);
                self.status.push_str(" Press 'r' to play again or 'q' to quit.");
            }
            EngineEvent::GameReset => {
                self.board = Board::new();
                self.finished = false;
                self.winning_line = None;
            }
            EngineEvent::AiScheduled { .. } => {
                // Timer bookkeeping lives in the orchestrator.
            }
        }
    }
}
