//! Turn controller: owns the authoritative game state and sequences play.

use crate::rules;
use crate::selectors::MoveSelector;
use crate::types::{GameState, Mark, Outcome};
use tracing::{debug, info, instrument};

/// Status line shown while the human may move.
const YOUR_TURN: &str = "It's your turn!";
/// Status line shown while the computer's move is pending.
const THINKING: &str = "Computer is thinking...";

/// Phase of the turn state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the human to activate a cell.
    WaitingForHuman,
    /// A deferred computer move is pending.
    AiThinking,
    /// The game reached a terminal outcome; only reset is accepted.
    Finished,
}

/// Events the engine reports to the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// A mark was placed at the square.
    CellUpdated {
        /// Board index of the square (0-8).
        index: usize,
        /// The mark placed there.
        mark: Mark,
    },
    /// The human-readable status line changed.
    StatusChanged(String),
    /// The computer's move should be applied after the configured delay,
    /// by calling [`Engine::apply_ai_move`] with this generation.
    AiScheduled {
        /// Generation of the game state the move was scheduled against.
        generation: u64,
    },
    /// The game reached a terminal outcome.
    GameFinished(Outcome),
    /// The game state was replaced with a fresh one.
    GameReset,
}

/// Turn controller for a human (X) versus computer (O) game.
///
/// The engine owns the [`GameState`] and is its only mutator. Every
/// reset bumps a generation counter; a deferred computer move scheduled
/// against an older generation is dropped, so a reset during the
/// thinking delay can never apply a move to a stale board.
pub struct Engine {
    state: GameState,
    phase: Phase,
    selector: Box<dyn MoveSelector>,
    human: Mark,
    ai: Mark,
    generation: u64,
}

impl Engine {
    /// Creates an engine with a fresh game and the given opponent
    /// strategy.
    pub fn new(selector: Box<dyn MoveSelector>) -> Self {
        Self {
            state: GameState::new(),
            phase: Phase::WaitingForHuman,
            selector,
            human: Mark::X,
            ai: Mark::O,
            generation: 0,
        }
    }

    /// Returns the live game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Returns the current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the generation of the live game state.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Handles a cell activation from the presentation layer.
    ///
    /// Only accepted while waiting for the human. Activations aimed at
    /// an occupied or out-of-range square, or arriving in any other
    /// phase, are absorbed without a state change - the presentation
    /// layer is never trusted to pre-validate.
    #[instrument(skip(self))]
    pub fn handle_cell_activated(&mut self, index: usize) -> Vec<EngineEvent> {
        if self.phase != Phase::WaitingForHuman {
            debug!(phase = ?self.phase, "ignoring activation outside the human turn");
            return Vec::new();
        }

        let mark = self.human;
        if let Err(error) = self.state.apply_move(index, mark) {
            debug!(%error, "ignoring invalid activation");
            return Vec::new();
        }
        self.refresh_outcome();

        let mut events = vec![EngineEvent::CellUpdated { index, mark }];
        match self.state.outcome() {
            Outcome::InProgress => {
                self.phase = Phase::AiThinking;
                events.push(EngineEvent::StatusChanged(THINKING.to_string()));
                events.push(EngineEvent::AiScheduled {
                    generation: self.generation,
                });
            }
            outcome => events.extend(self.finish(outcome)),
        }
        events
    }

    /// Applies the deferred computer move scheduled under `generation`.
    ///
    /// A stale generation means the game was reset while the timer was
    /// pending; the move is dropped without touching the live state.
    #[instrument(skip(self))]
    pub fn apply_ai_move(&mut self, generation: u64) -> Vec<EngineEvent> {
        if generation != self.generation || self.phase != Phase::AiThinking {
            debug!(
                generation,
                live = self.generation,
                phase = ?self.phase,
                "dropping stale computer move"
            );
            return Vec::new();
        }

        let mark = self.ai;
        // The phase machine only schedules a move while the game is in
        // progress, which implies at least one empty square; anything
        // else is a caller-discipline bug.
        let index = self
            .selector
            .select(self.state.board(), mark)
            .expect("computer move requested with no empty squares");
        self.state
            .apply_move(index, mark)
            .expect("selector returned an unplayable square");
        self.refresh_outcome();

        let mut events = vec![EngineEvent::CellUpdated { index, mark }];
        match self.state.outcome() {
            Outcome::InProgress => {
                self.phase = Phase::WaitingForHuman;
                events.push(EngineEvent::StatusChanged(YOUR_TURN.to_string()));
            }
            outcome => events.extend(self.finish(outcome)),
        }
        events
    }

    /// Discards the live game and starts a fresh one.
    ///
    /// Accepted from any phase: a reset during the thinking delay is
    /// safe because the bumped generation invalidates the pending move.
    #[instrument(skip(self))]
    pub fn handle_reset(&mut self) -> Vec<EngineEvent> {
        self.generation += 1;
        self.state = GameState::new();
        self.phase = Phase::WaitingForHuman;
        info!(generation = self.generation, "game reset");
        vec![
            EngineEvent::GameReset,
            EngineEvent::StatusChanged(YOUR_TURN.to_string()),
        ]
    }

    fn refresh_outcome(&mut self) {
        let outcome = rules::evaluate(self.state.board());
        self.state.set_outcome(outcome);
    }

    fn finish(&mut self, outcome: Outcome) -> Vec<EngineEvent> {
        self.phase = Phase::Finished;
        info!(%outcome, "game finished");
        let status = match outcome {
            Outcome::Won(mark) if mark == self.ai => "The computer won!".to_string(),
            Outcome::Won(mark) => format!("{} wins!", mark),
            Outcome::Draw => "It's a tie!".to_string(),
            Outcome::InProgress => unreachable!("finish called on a live game"),
        };
        vec![
            EngineEvent::StatusChanged(status),
            EngineEvent::GameFinished(outcome),
        ]
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("state", &self.state)
            .field("phase", &self.phase)
            .field("selector", &self.selector.name())
            .field("generation", &self.generation)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selectors::{OptimalSelector, SelectError};
    use crate::types::{Board, Square};

    /// Scripted opponent for deterministic scenarios: always takes the
    /// lowest empty square.
    struct FirstFree;

    impl MoveSelector for FirstFree {
        fn select(&mut self, board: &Board, _mark: Mark) -> Result<usize, SelectError> {
            board
                .empty_positions()
                .first()
                .copied()
                .ok_or(SelectError::NoLegalMove)
        }

        fn name(&self) -> &'static str {
            "FirstFree"
        }
    }

    fn engine_with_first_free() -> Engine {
        Engine::new(Box::new(FirstFree))
    }

    fn occupied_count(board: &Board) -> usize {
        board.squares().iter().filter(|s| **s != Square::Empty).count()
    }

    #[test]
    fn test_human_move_schedules_computer() {
        let mut engine = Engine::new(Box::new(OptimalSelector));
        let events = engine.handle_cell_activated(0);

        assert!(events.contains(&EngineEvent::CellUpdated {
            index: 0,
            mark: Mark::X
        }));
        assert!(events.contains(&EngineEvent::AiScheduled { generation: 0 }));
        assert_eq!(engine.phase(), Phase::AiThinking);
        assert_eq!(engine.state().outcome(), Outcome::InProgress);
        assert_eq!(engine.state().current(), Mark::O);
    }

    #[test]
    fn test_computer_move_fills_exactly_one_empty_square() {
        let mut engine = Engine::new(Box::new(OptimalSelector));
        engine.handle_cell_activated(0);

        let before = occupied_count(engine.state().board());
        let events = engine.apply_ai_move(0);

        assert_eq!(occupied_count(engine.state().board()), before + 1);
        assert_eq!(engine.phase(), Phase::WaitingForHuman);
        assert!(matches!(
            events.first(),
            Some(EngineEvent::CellUpdated { mark: Mark::O, .. })
        ));
    }

    #[test]
    fn test_occupied_square_activation_absorbed() {
        let mut engine = engine_with_first_free();
        engine.handle_cell_activated(4);
        engine.apply_ai_move(0); // FirstFree takes 0.

        let before = engine.state().clone();
        assert!(engine.handle_cell_activated(4).is_empty());
        assert!(engine.handle_cell_activated(0).is_empty());
        assert!(engine.handle_cell_activated(42).is_empty());
        assert_eq!(engine.state(), &before);
    }

    #[test]
    fn test_activation_during_thinking_absorbed() {
        let mut engine = engine_with_first_free();
        engine.handle_cell_activated(4);

        assert_eq!(engine.phase(), Phase::AiThinking);
        assert!(engine.handle_cell_activated(8).is_empty());
        assert_eq!(occupied_count(engine.state().board()), 1);
    }

    #[test]
    fn test_stale_generation_dropped_after_reset() {
        let mut engine = engine_with_first_free();
        let events = engine.handle_cell_activated(4);
        assert!(events.contains(&EngineEvent::AiScheduled { generation: 0 }));

        engine.handle_reset();
        assert!(engine.apply_ai_move(0).is_empty());
        assert_eq!(engine.state().board(), &Board::new());
        assert_eq!(engine.phase(), Phase::WaitingForHuman);
    }

    #[test]
    fn test_human_win_finishes_game() {
        let mut engine = engine_with_first_free();
        // Human takes the left column; FirstFree answers 1 then 2.
        engine.handle_cell_activated(0);
        engine.apply_ai_move(0);
        engine.handle_cell_activated(3);
        engine.apply_ai_move(0);
        let events = engine.handle_cell_activated(6);

        assert_eq!(engine.phase(), Phase::Finished);
        assert!(events.contains(&EngineEvent::GameFinished(Outcome::Won(Mark::X))));
        assert!(events.contains(&EngineEvent::StatusChanged("X wins!".to_string())));
    }

    #[test]
    fn test_computer_win_status() {
        let mut engine = engine_with_first_free();
        // Steer FirstFree (O) into the top row: it takes 0, 1, 2 in turn
        // while the human plays harmless squares.
        engine.handle_cell_activated(3);
        engine.apply_ai_move(0); // O at 0
        engine.handle_cell_activated(4);
        engine.apply_ai_move(0); // O at 1
        engine.handle_cell_activated(8);
        let events = engine.apply_ai_move(0); // O at 2 completes the row

        assert_eq!(engine.phase(), Phase::Finished);
        assert!(events.contains(&EngineEvent::GameFinished(Outcome::Won(Mark::O))));
        assert!(events.contains(&EngineEvent::StatusChanged(
            "The computer won!".to_string()
        )));
    }

    #[test]
    fn test_reset_after_finish_yields_fresh_game() {
        let mut engine = engine_with_first_free();
        engine.handle_cell_activated(0);
        engine.apply_ai_move(0);
        engine.handle_cell_activated(3);
        engine.apply_ai_move(0);
        engine.handle_cell_activated(6);
        assert_eq!(engine.phase(), Phase::Finished);

        let events = engine.handle_reset();
        assert!(events.contains(&EngineEvent::GameReset));
        assert_eq!(engine.state().board(), &Board::new());
        assert_eq!(engine.state().current(), Mark::X);
        assert_eq!(engine.state().outcome(), Outcome::InProgress);
        assert_eq!(engine.generation(), 1);
    }

    #[test]
    fn test_no_activation_accepted_after_finish() {
        let mut engine = engine_with_first_free();
        engine.handle_cell_activated(0);
        engine.apply_ai_move(0);
        engine.handle_cell_activated(3);
        engine.apply_ai_move(0);
        engine.handle_cell_activated(6);

        assert!(engine.handle_cell_activated(8).is_empty());
        assert_eq!(engine.phase(), Phase::Finished);
    }
}
