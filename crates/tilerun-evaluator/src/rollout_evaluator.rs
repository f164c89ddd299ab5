//! Rollout evaluation: flat Monte Carlo move selection.
//!
//! For each direction in [`Direction::ALL`] order, the evaluator plays a number
//! of independent simulated games ("rollouts") that start with that move and
//! continue with moves proposed by a [`RolloutPolicy`] until the game ends. The
//! value of a direction is the mean final score of its rollouts, and the
//! direction with the highest value is selected.
//!
//! # How It Works
//!
//! 1. **Seed** - One child [`RngSeed`] per direction is drawn from the caller's
//!    stream, always in direction order
//! 2. **Roll Out** - Each trial clones the state, applies the direction, then
//!    picks uniformly among the policy's candidates until the board is terminal
//!    or the picked move changes nothing
//! 3. **Average** - Scores of completed trials are averaged; a direction whose
//!    first move is a no-op completes no trial and is never selected
//! 4. **Select** - Highest mean wins; ties go to the earliest direction
//!
//! Because every direction owns its child stream, the directions can be
//! evaluated on worker threads ([`RolloutConfig::parallel`]) and still produce
//! exactly the same table as a sequential run with the same seed.
//!
//! # Usage
//!
//! ```
//! use std::num::NonZeroUsize;
//!
//! use tilerun_engine::{GameState, RngSeed};
//! use tilerun_evaluator::{
//!     rollout_evaluator::{RolloutConfig, RolloutEvaluator},
//!     rollout_policy::CornerBiasPolicy,
//! };
//!
//! let state: GameState = "2 2 0 0 0 4 0 0 0 0 0 0 0 0 0 2".parse().unwrap();
//! let mut rng = "7".parse::<RngSeed>().unwrap().rng();
//!
//! let config = RolloutConfig {
//!     trials_per_direction: NonZeroUsize::new(10).unwrap(),
//!     ..RolloutConfig::default()
//! };
//! let evaluator = RolloutEvaluator::new(config, Box::new(CornerBiasPolicy));
//! let direction = evaluator.select_move(&state, &mut rng).unwrap();
//! assert!(direction.is_some());
//! ```

use std::{array, iter, num::NonZeroUsize, panic, thread};

use arrayvec::ArrayVec;
use rand::{Rng, seq::IndexedRandom as _};
use tilerun_engine::{CorruptTileError, Direction, GameRng, GameState, RngSeed};

use crate::{move_selector::MoveSelector, rollout_policy::RolloutPolicy};

/// Number of rollouts per direction when nothing else is configured.
pub const DEFAULT_TRIALS_PER_DIRECTION: NonZeroUsize = NonZeroUsize::new(150).unwrap();

/// Per-direction results of one evaluation, in [`Direction::ALL`] order.
pub type DirectionEvaluations = ArrayVec<DirectionEvaluation, { Direction::LEN }>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RolloutConfig {
    /// Rollouts started for each direction.
    ///
    /// At least one, so a direction that can move always completes a trial.
    pub trials_per_direction: NonZeroUsize,
    /// Evaluate the four directions on scoped worker threads.
    pub parallel: bool,
}

impl Default for RolloutConfig {
    fn default() -> Self {
        Self {
            trials_per_direction: DEFAULT_TRIALS_PER_DIRECTION,
            parallel: false,
        }
    }
}

/// Outcome of the rollouts started with one direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionEvaluation {
    /// Direction of the first move of every rollout.
    pub direction: Direction,
    /// Mean final score of the completed rollouts, `0.0` if none completed.
    pub value: f64,
    /// Rollouts whose first move changed the board.
    pub completed_trials: usize,
    /// Highest final score among the completed rollouts.
    pub best_score: u64,
}

impl DirectionEvaluation {
    /// Returns whether the direction can be selected.
    #[must_use]
    pub const fn is_playable(&self) -> bool {
        self.completed_trials > 0
    }
}

/// Returns the direction with the highest value among the playable ones.
///
/// Ties go to the earliest entry, which is the earliest direction in
/// [`Direction::ALL`] for tables produced by [`RolloutEvaluator::evaluate`].
#[must_use]
pub fn best_direction(evaluations: &[DirectionEvaluation]) -> Option<Direction> {
    let mut best: Option<&DirectionEvaluation> = None;
    for evaluation in evaluations.iter().filter(|e| e.is_playable()) {
        if best.is_none_or(|b| evaluation.value > b.value) {
            best = Some(evaluation);
        }
    }
    best.map(|e| e.direction)
}

/// Flat Monte Carlo move selector.
#[derive(Debug)]
pub struct RolloutEvaluator<'a> {
    config: RolloutConfig,
    policy: Box<dyn RolloutPolicy + 'a>,
}

impl<'a> RolloutEvaluator<'a> {
    #[must_use]
    pub fn new(config: RolloutConfig, policy: Box<dyn RolloutPolicy + 'a>) -> Self {
        Self { config, policy }
    }

    #[must_use]
    pub const fn config(&self) -> &RolloutConfig {
        &self.config
    }

    /// Runs the rollouts for every direction and returns the full table.
    ///
    /// Draws exactly [`Direction::LEN`] seeds from `rng`, whatever the trial
    /// count, and never modifies `state`.
    pub fn evaluate<R>(
        &self,
        state: &GameState,
        rng: &mut R,
    ) -> Result<DirectionEvaluations, CorruptTileError>
    where
        R: Rng + ?Sized,
    {
        let seeds: [RngSeed; Direction::LEN] = array::from_fn(|_| rng.random());
        let jobs = iter::zip(Direction::ALL, seeds);

        let results: ArrayVec<_, { Direction::LEN }> = if self.config.parallel {
            thread::scope(|s| {
                let handles: ArrayVec<_, { Direction::LEN }> = jobs
                    .map(|(direction, seed)| {
                        s.spawn(move || self.evaluate_direction(state, direction, &mut seed.rng()))
                    })
                    .collect();
                handles
                    .into_iter()
                    .map(|h| h.join().unwrap_or_else(|payload| panic::resume_unwind(payload)))
                    .collect()
            })
        } else {
            jobs.map(|(direction, seed)| self.evaluate_direction(state, direction, &mut seed.rng()))
                .collect()
        };

        results.into_iter().collect()
    }

    /// Evaluates every direction and returns the best playable one.
    ///
    /// Returns `Ok(None)` when no direction changes the board.
    pub fn select_move<R>(
        &self,
        state: &GameState,
        rng: &mut R,
    ) -> Result<Option<Direction>, CorruptTileError>
    where
        R: Rng + ?Sized,
    {
        let evaluations = self.evaluate(state, rng)?;
        Ok(best_direction(&evaluations))
    }

    #[expect(clippy::cast_precision_loss)]
    fn evaluate_direction(
        &self,
        state: &GameState,
        direction: Direction,
        rng: &mut GameRng,
    ) -> Result<DirectionEvaluation, CorruptTileError> {
        let mut evaluation = DirectionEvaluation {
            direction,
            value: 0.0,
            completed_trials: 0,
            best_score: 0,
        };

        // every trial would be discarded, so leave the stream untouched
        if !state.board().can_slide(direction) {
            log::debug!("{direction}: not playable");
            return Ok(evaluation);
        }

        let mut total_score = 0_u64;
        for _ in 0..self.config.trials_per_direction.get() {
            let Some(score) = self.run_trial(state, direction, rng)? else {
                continue;
            };
            total_score += score;
            evaluation.completed_trials += 1;
            evaluation.best_score = evaluation.best_score.max(score);
        }

        if evaluation.completed_trials > 0 {
            evaluation.value = total_score as f64 / evaluation.completed_trials as f64;
        }
        log::debug!(
            "{direction}: mean {:.1} over {} trials, best {}",
            evaluation.value,
            evaluation.completed_trials,
            evaluation.best_score
        );
        Ok(evaluation)
    }

    /// Plays one rollout and returns its final score, or `None` if the first
    /// move does not change the board.
    fn run_trial(
        &self,
        state: &GameState,
        direction: Direction,
        rng: &mut GameRng,
    ) -> Result<Option<u64>, CorruptTileError> {
        let mut state = state.clone();
        if !state.apply_move(direction, rng)? {
            return Ok(None);
        }

        while !state.is_terminal() {
            let candidates = self.policy.candidate_directions(state.board());
            let Some(&next) = candidates.choose(rng) else {
                break;
            };
            if !state.apply_move(next, rng)? {
                break;
            }
        }

        log::trace!(
            "rollout from {direction}: score {} after {} moves",
            state.score(),
            state.move_count()
        );
        Ok(Some(state.score()))
    }
}

impl MoveSelector for RolloutEvaluator<'_> {
    fn select_move(
        &self,
        state: &GameState,
        rng: &mut GameRng,
    ) -> Result<Option<Direction>, CorruptTileError> {
        RolloutEvaluator::select_move(self, state, rng)
    }
}
