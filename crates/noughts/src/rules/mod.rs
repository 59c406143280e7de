//! Win and draw detection.
//!
//! All functions here are pure queries over a board snapshot: no side
//! effects, identical results on repeated calls.

mod win;

pub use win::{check_winner, winning_line, LINES};

use crate::types::{Board, Outcome};

/// Classifies a board snapshot.
///
/// The first complete line (in [`LINES`] declaration order) decides a win;
/// a full board with no complete line is a draw; anything else is still in
/// progress. Under legal alternating play at most one line can complete,
/// but this function does not assume that and simply reports the first
/// match found.
pub fn evaluate(board: &Board) -> Outcome {
    if let Some(mark) = check_winner(board) {
        return Outcome::Won(mark);
    }
    if board.is_full() {
        return Outcome::Draw;
    }
    Outcome::InProgress
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Mark;

    fn board_from(marks: &[(usize, Mark)]) -> Board {
        let mut board = Board::new();
        for &(index, mark) in marks {
            board.set(index, mark).unwrap();
        }
        board
    }

    #[test]
    fn test_empty_board_in_progress() {
        assert_eq!(evaluate(&Board::new()), Outcome::InProgress);
    }

    #[test]
    fn test_win_detected() {
        let board = board_from(&[
            (0, Mark::X),
            (3, Mark::O),
            (1, Mark::X),
            (4, Mark::O),
            (2, Mark::X),
        ]);
        assert_eq!(evaluate(&board), Outcome::Won(Mark::X));
    }

    #[test]
    fn test_full_board_no_line_is_draw() {
        // X O X / X O O / O X X - fully populated, no completed line.
        let board = board_from(&[
            (0, Mark::X),
            (1, Mark::O),
            (2, Mark::X),
            (3, Mark::X),
            (4, Mark::O),
            (5, Mark::O),
            (6, Mark::O),
            (7, Mark::X),
            (8, Mark::X),
        ]);
        assert_eq!(evaluate(&board), Outcome::Draw);
    }

    #[test]
    fn test_evaluate_idempotent() {
        let board = board_from(&[(0, Mark::X), (4, Mark::O), (8, Mark::X)]);
        let first = evaluate(&board);
        for _ in 0..10 {
            assert_eq!(evaluate(&board), first);
        }
    }
}
