use std::num::NonZeroUsize;

use serde::Serialize;
use tilerun_engine::{Direction, GameRng, GameState, RngSeed};
use tilerun_evaluator::{
    move_selector::MoveSelector,
    rollout_evaluator::{self, DEFAULT_TRIALS_PER_DIRECTION, RolloutConfig, RolloutEvaluator},
    rollout_policy::{CornerBiasPolicy, RolloutPolicy, UniformPolicy},
    static_evaluator::{StaticHeuristicStrategy, TIE_BREAK_ORDER},
};

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::FromStr)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    #[default]
    Rollout,
    Static,
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::FromStr)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    #[default]
    Corner,
    Uniform,
}

/// Options shared by every command that selects moves.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct StrategyArg {
    /// Move selection strategy (rollout or static)
    #[arg(long, default_value = "rollout")]
    pub strategy: StrategyKind,
    /// Rollout policy (corner or uniform)
    #[arg(long, default_value = "corner")]
    pub policy: PolicyKind,
    /// Rollouts per direction (at least 1)
    #[arg(long, default_value_t = DEFAULT_TRIALS_PER_DIRECTION)]
    pub trials: NonZeroUsize,
    /// Evaluate the four directions on worker threads
    #[arg(long, default_value_t = false)]
    pub parallel: bool,
    /// Random seed as up to 32 hex digits (random if omitted)
    #[arg(long)]
    pub seed: Option<RngSeed>,
}

impl StrategyArg {
    /// Returns the seed in use and a stream started from it.
    pub fn rng(&self) -> (RngSeed, GameRng) {
        let seed = self.seed.unwrap_or_else(RngSeed::random);
        log::info!("Using seed {seed}");
        (seed, seed.rng())
    }

    pub fn build(&self) -> Strategy {
        match self.strategy {
            StrategyKind::Rollout => {
                let policy: Box<dyn RolloutPolicy> = match self.policy {
                    PolicyKind::Corner => Box::new(CornerBiasPolicy),
                    PolicyKind::Uniform => Box::new(UniformPolicy),
                };
                let config = RolloutConfig {
                    trials_per_direction: self.trials,
                    parallel: self.parallel,
                };
                Strategy::Rollout(RolloutEvaluator::new(config, policy))
            }
            StrategyKind::Static => Strategy::Static(StaticHeuristicStrategy),
        }
    }
}

#[derive(Debug)]
pub(crate) enum Strategy {
    Rollout(RolloutEvaluator<'static>),
    Static(StaticHeuristicStrategy),
}

impl Strategy {
    pub fn selector(&self) -> &dyn MoveSelector {
        match self {
            Strategy::Rollout(evaluator) => evaluator,
            Strategy::Static(strategy) => strategy,
        }
    }

    /// Selects a move and prints the per-direction values to stderr.
    pub fn explain_move(
        &self,
        state: &GameState,
        rng: &mut GameRng,
    ) -> anyhow::Result<Option<Direction>> {
        match self {
            Strategy::Rollout(evaluator) => {
                let evaluations = evaluator.evaluate(state, rng)?;
                eprintln!("direction      mean  trials      best");
                for e in &evaluations {
                    eprintln!(
                        "{:<9} {:>9.1} {:>7} {:>9}",
                        e.direction.as_str(),
                        e.value,
                        e.completed_trials,
                        e.best_score
                    );
                }
                Ok(rollout_evaluator::best_direction(&evaluations))
            }
            Strategy::Static(strategy) => {
                eprintln!("direction  score");
                for direction in TIE_BREAK_ORDER {
                    let score = strategy.score_direction(state.board(), direction)?;
                    eprintln!("{:<9} {score:>6}", direction.as_str());
                }
                Ok(strategy.best_direction(state.board())?)
            }
        }
    }
}

/// Token written for a selected move, `none` when there is no move.
pub(crate) fn move_token(direction: Option<Direction>) -> &'static str {
    direction.map_or("none", Direction::as_str)
}
