//! Core domain types for the tic-tac-toe engine.

use serde::{Deserialize, Serialize};

/// A player's mark.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
pub enum Mark {
    /// The human side; moves first.
    X,
    /// The computer side; moves second.
    O,
}

impl Mark {
    /// Returns the opposing mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

/// A square on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square occupied by a mark.
    Occupied(Mark),
}

/// Error raised when a mark cannot be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The target index is outside 0-8.
    #[display("Square {} is out of bounds", _0)]
    OutOfBounds(usize),
    /// The target square already holds a mark.
    #[display("Square {} is already occupied", _0)]
    SquareOccupied(usize),
}

impl std::error::Error for MoveError {}

/// 3x3 tic-tac-toe board.
///
/// Squares are stored in row-major order: index 0-8, row = index / 3,
/// column = index % 3.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    squares: [Square; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; 9],
        }
    }

    /// Gets the square at the given index, or `None` if out of range.
    pub fn get(&self, index: usize) -> Option<Square> {
        self.squares.get(index).copied()
    }

    /// Places a mark at the given index.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::OutOfBounds`] for an index outside 0-8 and
    /// [`MoveError::SquareOccupied`] if the square already holds a mark.
    pub fn set(&mut self, index: usize, mark: Mark) -> Result<(), MoveError> {
        match self.squares.get(index) {
            None => Err(MoveError::OutOfBounds(index)),
            Some(Square::Occupied(_)) => Err(MoveError::SquareOccupied(index)),
            Some(Square::Empty) => {
                self.squares[index] = Square::Occupied(mark);
                Ok(())
            }
        }
    }

    /// Empties the square at the given index.
    ///
    /// Undo support for game-tree search. Out-of-range indices are ignored.
    pub(crate) fn clear(&mut self, index: usize) {
        if let Some(square) = self.squares.get_mut(index) {
            *square = Square::Empty;
        }
    }

    /// Checks if the square at the given index is empty.
    pub fn is_empty(&self, index: usize) -> bool {
        matches!(self.get(index), Some(Square::Empty))
    }

    /// Checks if every square is occupied.
    pub fn is_full(&self) -> bool {
        self.squares.iter().all(|s| *s != Square::Empty)
    }

    /// Returns the indices of all empty squares in ascending order.
    ///
    /// Recomputed on each call; never cached.
    pub fn empty_positions(&self) -> Vec<usize> {
        self.squares
            .iter()
            .enumerate()
            .filter(|(_, s)| **s == Square::Empty)
            .map(|(i, _)| i)
            .collect()
    }

    /// Returns all squares as a slice.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Formats the board as a human-readable string.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let index = row * 3 + col;
                let symbol = match self.squares[index] {
                    Square::Empty => (index + 1).to_string(),
                    Square::Occupied(mark) => mark.to_string(),
                };
                result.push_str(&symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Terminal classification of a game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Game is ongoing.
    InProgress,
    /// Game ended with a winner.
    Won(Mark),
    /// Game ended with a full board and no winner.
    Draw,
}

impl Outcome {
    /// Returns the winner, if there is one.
    pub fn winner(&self) -> Option<Mark> {
        match self {
            Outcome::Won(mark) => Some(*mark),
            _ => None,
        }
    }

    /// Returns true once the game has ended.
    pub fn is_terminal(&self) -> bool {
        *self != Outcome::InProgress
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::InProgress => write!(f, "In progress"),
            Outcome::Won(mark) => write!(f, "{} wins", mark),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}

/// Complete game state.
///
/// Created fresh at startup and on every reset, mutated only by the
/// [`Engine`](crate::Engine). Once the outcome is terminal the board is
/// never touched again until a reset replaces the state wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    board: Board,
    current: Mark,
    outcome: Outcome,
}

impl GameState {
    /// Creates a fresh game: empty board, X to move.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            current: Mark::X,
            outcome: Outcome::InProgress,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the mark whose turn it is.
    pub fn current(&self) -> Mark {
        self.current
    }

    /// Returns the outcome.
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Places a mark and passes the turn (validation aside, the outcome is
    /// updated separately by the engine).
    pub(crate) fn apply_move(&mut self, index: usize, mark: Mark) -> Result<(), MoveError> {
        debug_assert_eq!(mark, self.current, "moves must alternate");
        self.board.set(index, mark)?;
        self.current = mark.opponent();
        Ok(())
    }

    /// Sets the outcome.
    pub(crate) fn set_outcome(&mut self, outcome: Outcome) {
        self.outcome = outcome;
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_rejects_second_write() {
        let mut board = Board::new();
        board.set(4, Mark::X).unwrap();
        assert_eq!(board.set(4, Mark::O), Err(MoveError::SquareOccupied(4)));
        assert_eq!(board.get(4), Some(Square::Occupied(Mark::X)));
    }

    #[test]
    fn test_set_rejects_out_of_bounds() {
        let mut board = Board::new();
        assert_eq!(board.set(9, Mark::X), Err(MoveError::OutOfBounds(9)));
    }

    #[test]
    fn test_empty_positions_ascending() {
        let mut board = Board::new();
        board.set(0, Mark::X).unwrap();
        board.set(4, Mark::O).unwrap();
        board.set(8, Mark::X).unwrap();
        assert_eq!(board.empty_positions(), vec![1, 2, 3, 5, 6, 7]);
    }

    #[test]
    fn test_clear_restores_empty() {
        let mut board = Board::new();
        board.set(2, Mark::O).unwrap();
        board.clear(2);
        assert!(board.is_empty(2));
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_game_state_round_trips_through_json() {
        let mut state = GameState::new();
        state.apply_move(0, Mark::X).unwrap();
        let json = serde_json::to_string(&state).unwrap();
        let restored: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, restored);
    }
}
