//! Exhaustive minimax selection.

use super::{MoveSelector, SelectError};
use crate::position::Position;
use crate::rules;
use crate::types::{Board, Mark};
use tracing::{debug, instrument};

/// Base score for a line completed by the mark being optimized for.
const WIN_SCORE: i32 = 10;
/// Base score for a line completed by its opponent.
const LOSS_SCORE: i32 = -10;

/// Optimal opponent: full game-tree search with no pruning.
///
/// Recursive calls return scores; only the top level tracks the chosen
/// square. Terminal scores are discounted by ply depth so a win two
/// moves out never ties with a win right now. Empty squares are tried
/// in ascending index order and strict comparisons keep the first
/// square on ties, so selection is fully deterministic for a fixed
/// board and mark. Worst case is 9! leaf evaluations, which is nothing
/// at 3x3.
#[derive(Debug, Clone, Copy, Default)]
pub struct OptimalSelector;

impl MoveSelector for OptimalSelector {
    #[instrument(skip(self, board))]
    fn select(&mut self, board: &Board, mark: Mark) -> Result<usize, SelectError> {
        let moves = Position::valid_moves(board);
        let first = moves.first().ok_or(SelectError::NoLegalMove)?;

        let mut scratch = board.clone();
        let mut best_score = i32::MIN;
        let mut best_move = first.to_index();
        for position in &moves {
            let index = position.to_index();
            scratch
                .set(index, mark)
                .expect("valid_moves only yields empty squares");
            let score = minimax(&mut scratch, mark, mark.opponent(), 1);
            scratch.clear(index);
            if score > best_score {
                best_score = score;
                best_move = index;
            }
        }

        debug!(%mark, best_move, best_score, "minimax chose square");
        Ok(best_move)
    }

    fn name(&self) -> &'static str {
        "Minimax"
    }
}

/// Scores the position for `perspective`, with `to_move` placing next
/// and `depth` plies already played below the root.
///
/// Terminal cases: a completed line scores +-10 discounted by depth
/// (earlier wins score higher, later losses less badly), a full board
/// scores 0. Otherwise every empty square is tried in ascending order,
/// maximizing on `perspective`'s turns and minimizing on the
/// opponent's.
fn minimax(board: &mut Board, perspective: Mark, to_move: Mark, depth: i32) -> i32 {
    if let Some(winner) = rules::check_winner(board) {
        return if winner == perspective {
            WIN_SCORE - depth
        } else {
            LOSS_SCORE + depth
        };
    }
    if board.is_full() {
        return 0;
    }

    let maximizing = to_move == perspective;
    let mut best = if maximizing { i32::MIN } else { i32::MAX };
    for index in board.empty_positions() {
        board
            .set(index, to_move)
            .expect("empty_positions only yields empty squares");
        let score = minimax(board, perspective, to_move.opponent(), depth + 1);
        board.clear(index);
        if maximizing {
            if score > best {
                best = score;
            }
        } else if score < best {
            best = score;
        }
    }
    best
}
