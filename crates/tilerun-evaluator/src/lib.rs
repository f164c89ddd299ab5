//! Move selection strategies for 2048 boards.
//!
//! This crate decides which direction to play next. It builds on the board and
//! game state types from `tilerun-engine` and never touches the outside world.
//!
//! 1. **Rollout Evaluation** ([`rollout_evaluator`]) - Plays many randomized
//!    games from each candidate direction and picks the direction with the
//!    highest mean final score (flat Monte Carlo, one ply deep).
//!
//! 2. **Rollout Policies** ([`rollout_policy`]) - Decide which directions a
//!    simulated game may pick at each step. The corner-bias policy keeps the
//!    heavier side of the board in place.
//!
//! 3. **Static Heuristic** ([`static_evaluator`]) - Greedy one-move lookahead
//!    without simulation, used as a fallback and a baseline.
//!
//! 4. **Session Play** ([`move_selector`]) - The [`MoveSelector`](move_selector::MoveSelector)
//!    trait shared by both strategies and a driver that plays a whole local game.
//!
//! # Architecture
//!
//! ```text
//! Session Play (play until terminal)
//!     ↓ asks
//! MoveSelector (RolloutEvaluator | StaticHeuristicStrategy)
//!     ↓ rollouts use
//! RolloutPolicy (CornerBiasPolicy | UniformPolicy)
//! ```
//!
//! # Determinism
//!
//! All randomness comes from the `&mut` stream passed in by the caller. The
//! rollout evaluator derives one child stream per direction in a fixed order,
//! so a given seed yields the same move whether or not worker threads are used.
//!
//! # Example: Choosing a Move
//!
//! ```
//! use std::num::NonZeroUsize;
//!
//! use tilerun_engine::{GameState, RngSeed};
//! use tilerun_evaluator::{
//!     move_selector::MoveSelector,
//!     rollout_evaluator::{RolloutConfig, RolloutEvaluator},
//!     rollout_policy::CornerBiasPolicy,
//! };
//!
//! let state: GameState = "2 4 2 0 4 2 4 0 2 4 2 0 4 2 4 0".parse().unwrap();
//! let mut rng = RngSeed::random().rng();
//!
//! let config = RolloutConfig {
//!     trials_per_direction: NonZeroUsize::new(20).unwrap(),
//!     ..RolloutConfig::default()
//! };
//! let selector: Box<dyn MoveSelector> =
//!     Box::new(RolloutEvaluator::new(config, Box::new(CornerBiasPolicy)));
//! let direction = selector.select_move(&state, &mut rng).unwrap();
//! assert_eq!(direction.map(|d| d.as_str()), Some("right"));
//! ```

pub mod move_selector;
pub mod rollout_evaluator;
pub mod rollout_policy;
pub mod static_evaluator;
