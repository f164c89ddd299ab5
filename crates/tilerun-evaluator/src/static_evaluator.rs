//! One-ply greedy move selection without simulation.
//!
//! [`StaticHeuristicStrategy`] slides the board once per direction (no tile is
//! spawned) and scores the result by the change of the summed tile values.
//! A direction that leaves the board unchanged scores [`INVALID_MOVE_SCORE`].
//!
//! Merging conserves the tile sum, so every legal direction scores `0` and the
//! strategy effectively plays the first legal direction in [`TIE_BREAK_ORDER`]
//! (up, down, left, right). It is kept as a cheap fallback and as a baseline
//! for self-play.

use tilerun_engine::{Board, CorruptTileError, Direction, GameRng, GameState};

use crate::move_selector::MoveSelector;

/// Score of a direction that does not change the board.
pub const INVALID_MOVE_SCORE: i64 = -1;

/// Order in which directions are scored; the first of equal scores wins.
///
/// Differs from [`Direction::ALL`], which the rollout evaluator uses.
pub const TIE_BREAK_ORDER: [Direction; Direction::LEN] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

#[derive(Debug, Default, Clone)]
pub struct StaticHeuristicStrategy;

impl StaticHeuristicStrategy {
    /// Scores one direction as the sum of `post - pre` over all cells.
    ///
    /// # Example
    ///
    /// ```
    /// use tilerun_engine::{Board, Direction};
    /// use tilerun_evaluator::static_evaluator::{INVALID_MOVE_SCORE, StaticHeuristicStrategy};
    ///
    /// let board: Board = "2 4 8 16 0 0 0 0 0 0 0 0 0 0 0 0".parse().unwrap();
    /// let score = StaticHeuristicStrategy.score_direction(&board, Direction::Left).unwrap();
    /// assert_eq!(score, INVALID_MOVE_SCORE);
    /// ```
    pub fn score_direction(
        &self,
        board: &Board,
        direction: Direction,
    ) -> Result<i64, CorruptTileError> {
        let slide = board.slide(direction)?;
        if !slide.is_changed() {
            return Ok(INVALID_MOVE_SCORE);
        }
        let delta = board
            .cells()
            .zip(slide.board().cells())
            .map(|(pre, post)| i64::from(post) - i64::from(pre))
            .sum();
        Ok(delta)
    }

    /// Returns the highest scoring direction, first in [`TIE_BREAK_ORDER`] on
    /// ties, or `None` if no direction changes the board.
    pub fn best_direction(&self, board: &Board) -> Result<Option<Direction>, CorruptTileError> {
        let mut best: Option<(Direction, i64)> = None;
        for direction in TIE_BREAK_ORDER {
            let score = self.score_direction(board, direction)?;
            log::trace!("{direction}: static score {score}");
            if score <= INVALID_MOVE_SCORE {
                continue;
            }
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((direction, score));
            }
        }
        Ok(best.map(|(direction, _)| direction))
    }
}

impl MoveSelector for StaticHeuristicStrategy {
    fn select_move(
        &self,
        state: &GameState,
        _rng: &mut GameRng,
    ) -> Result<Option<Direction>, CorruptTileError> {
        self.best_direction(state.board())
    }
}
