//! Uniform-random selection over empty squares.

use super::{MoveSelector, SelectError};
use crate::position::Position;
use crate::types::{Board, Mark};
use rand::seq::SliceRandom;
use tracing::{debug, instrument};

/// Non-optimal opponent: picks uniformly at random among the empty
/// squares. Loses to anyone paying attention.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSelector;

impl MoveSelector for RandomSelector {
    #[instrument(skip(self, board))]
    fn select(&mut self, board: &Board, mark: Mark) -> Result<usize, SelectError> {
        let moves = Position::valid_moves(board);
        let position = moves
            .choose(&mut rand::thread_rng())
            .ok_or(SelectError::NoLegalMove)?;

        debug!(%mark, index = position.to_index(), "random selector chose square");
        Ok(position.to_index())
    }

    fn name(&self) -> &'static str {
        "Random"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_always_returns_an_empty_square() {
        let mut board = Board::new();
        board.set(0, Mark::X).unwrap();
        board.set(4, Mark::O).unwrap();

        for _ in 0..50 {
            let index = RandomSelector.select(&board, Mark::O).unwrap();
            assert!(board.is_empty(index));
        }
    }

    #[test]
    fn test_full_board_has_no_legal_move() {
        let mut board = Board::new();
        for (index, mark) in [
            Mark::X,
            Mark::O,
            Mark::X,
            Mark::X,
            Mark::O,
            Mark::O,
            Mark::O,
            Mark::X,
            Mark::X,
        ]
        .into_iter()
        .enumerate()
        {
            board.set(index, mark).unwrap();
        }
        assert_eq!(
            RandomSelector.select(&board, Mark::O),
            Err(SelectError::NoLegalMove)
        );
    }
}
