//! Win detection logic.

use crate::types::{Board, Mark, Square};
use tracing::instrument;

/// The 8 winning lines: rows, then columns, then diagonals.
///
/// A domain constant; never mutated.
pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Checks if there is a winner on the board.
///
/// Returns the mark holding the first complete line in declaration order,
/// `None` otherwise.
#[instrument]
pub fn check_winner(board: &Board) -> Option<Mark> {
    winning_line(board).map(|(mark, _)| mark)
}

/// Like [`check_winner`], but also yields the completed line so the
/// presentation layer can highlight the winning squares.
#[instrument]
pub fn winning_line(board: &Board) -> Option<(Mark, [usize; 3])> {
    for line in LINES {
        let [a, b, c] = line;
        if let Some(Square::Occupied(mark)) = board.get(a) {
            if board.get(b) == Some(Square::Occupied(mark))
                && board.get(c) == Some(Square::Occupied(mark))
            {
                return Some((mark, line));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_winner_empty_board() {
        let board = Board::new();
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_winner_top_row() {
        let mut board = Board::new();
        for index in [0, 1, 2] {
            board.set(index, Mark::X).unwrap();
        }
        assert_eq!(check_winner(&board), Some(Mark::X));
        assert_eq!(winning_line(&board), Some((Mark::X, [0, 1, 2])));
    }

    #[test]
    fn test_winner_column() {
        let mut board = Board::new();
        for index in [1, 4, 7] {
            board.set(index, Mark::O).unwrap();
        }
        assert_eq!(winning_line(&board), Some((Mark::O, [1, 4, 7])));
    }

    #[test]
    fn test_winner_diagonal() {
        let mut board = Board::new();
        for index in [2, 4, 6] {
            board.set(index, Mark::O).unwrap();
        }
        assert_eq!(check_winner(&board), Some(Mark::O));
    }

    #[test]
    fn test_no_winner_incomplete() {
        let mut board = Board::new();
        board.set(0, Mark::X).unwrap();
        board.set(1, Mark::X).unwrap();
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_mixed_line_is_not_a_win() {
        let mut board = Board::new();
        board.set(0, Mark::X).unwrap();
        board.set(1, Mark::O).unwrap();
        board.set(2, Mark::X).unwrap();
        assert_eq!(check_winner(&board), None);
    }
}
