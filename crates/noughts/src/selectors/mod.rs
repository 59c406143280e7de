//! Move-selection strategies for the automated opponent.
//!
//! Two mutually exclusive strategies sit behind the [`MoveSelector`]
//! trait: [`OptimalSelector`] (exhaustive minimax, never loses) and
//! [`RandomSelector`] (uniform over empty squares). The presentation
//! layer picks one at startup via configuration.

mod optimal;
mod random;

pub use optimal::OptimalSelector;
pub use random::RandomSelector;

use crate::types::{Board, Mark};

/// Error raised by a move selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum SelectError {
    /// No empty squares remain.
    #[display("No legal move: the board is full")]
    NoLegalMove,
}

impl std::error::Error for SelectError {}

/// A strategy that chooses the next square for a given mark.
pub trait MoveSelector: Send {
    /// Returns the board index (0-8) of the chosen square.
    ///
    /// # Errors
    ///
    /// Returns [`SelectError::NoLegalMove`] if no empty square exists.
    /// Callers must guarantee at least one empty square; the engine only
    /// invokes selectors while the game is in progress.
    fn select(&mut self, board: &Board, mark: Mark) -> Result<usize, SelectError>;

    /// Display name of the strategy.
    fn name(&self) -> &'static str;
}
