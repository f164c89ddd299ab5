//! Rollout policies: which directions a simulated game may pick next.
//!
//! A rollout plays random moves until the game ends. The policy narrows the
//! candidate set for each step; the rollout then picks uniformly among the
//! candidates. Policies are stateless and only see the current board, so they
//! can be swapped without touching the [`RolloutEvaluator`](crate::rollout_evaluator::RolloutEvaluator).
//!
//! - [`CornerBiasPolicy`] - keeps the heavier side of the board in place
//! - [`UniformPolicy`] - all four directions, as a baseline

use std::{fmt, iter};

use arrayvec::ArrayVec;
use tilerun_engine::{BOARD_SIZE, Board, Direction};

/// Candidate directions proposed by a policy.
pub type DirectionSet = ArrayVec<Direction, { Direction::LEN }>;

/// Proposes the directions a rollout may choose from on a given board.
pub trait RolloutPolicy: fmt::Debug + Send + Sync {
    /// Returns the candidate directions, never empty.
    fn candidate_directions(&self, board: &Board) -> DirectionSet;
}

/// Every direction is a candidate.
#[derive(Debug, Default, Clone, Copy)]
pub struct UniformPolicy;

impl RolloutPolicy for UniformPolicy {
    fn candidate_directions(&self, _board: &Board) -> DirectionSet {
        DirectionSet::from(Direction::ALL)
    }
}

/// Corner-dominance bias.
///
/// Compares the top row with the bottom row and the left column with the
/// right column, element-wise. If one side of each pair is at least as large
/// in every position, the rollout only moves toward those two sides:
///
/// | rows            | columns         | candidates      |
/// |-----------------|-----------------|-----------------|
/// | top >= bottom   | left >= right   | up, left        |
/// | top >= bottom   | right >= left   | up, right       |
/// | bottom >= top   | left >= right   | down, left      |
/// | bottom >= top   | right >= left   | down, right     |
/// | otherwise       |                 | all four        |
///
/// Rules are tried in table order, so ties prefer up and left.
#[derive(Debug, Default, Clone, Copy)]
pub struct CornerBiasPolicy;

impl RolloutPolicy for CornerBiasPolicy {
    fn candidate_directions(&self, board: &Board) -> DirectionSet {
        let top = board.row(0);
        let bottom = board.row(BOARD_SIZE - 1);
        let left = board.column(0);
        let right = board.column(BOARD_SIZE - 1);

        let vertical = if dominates(&top, &bottom) {
            Direction::Up
        } else if dominates(&bottom, &top) {
            Direction::Down
        } else {
            return DirectionSet::from(Direction::ALL);
        };
        let horizontal = if dominates(&left, &right) {
            Direction::Left
        } else if dominates(&right, &left) {
            Direction::Right
        } else {
            return DirectionSet::from(Direction::ALL);
        };

        [vertical, horizontal].into_iter().collect()
    }
}

fn dominates(a: &[u32; BOARD_SIZE], b: &[u32; BOARD_SIZE]) -> bool {
    iter::zip(a, b).all(|(x, y)| x >= y)
}
