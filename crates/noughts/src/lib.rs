//! Tic-tac-toe game engine.
//!
//! The engine is pure logic with no terminal or rendering dependencies:
//! - [`Board`] stores the nine squares and answers occupancy queries.
//! - [`rules`] classifies board snapshots (win, draw, in progress).
//! - [`MoveSelector`] strategies choose squares for the automated opponent.
//! - [`Engine`] owns the authoritative [`GameState`], applies human moves,
//!   triggers the computer's moves, and reports [`EngineEvent`]s to whatever
//!   presentation layer is driving it.

#![warn(missing_docs)]

mod engine;
mod position;
pub mod rules;
mod selectors;
mod types;

pub use engine::{Engine, EngineEvent, Phase};
pub use position::Position;
pub use selectors::{MoveSelector, OptimalSelector, RandomSelector, SelectError};
pub use types::{Board, GameState, Mark, MoveError, Outcome, Square};
