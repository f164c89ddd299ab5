//! Game state management.
//!
//! This module wraps the core board operations into a playable game:
//!
//! - [`GameState`] - Board plus statistics; the only way to play a move
//! - [`GameStats`] - Score, move count and merge count
//! - [`RngSeed`] / [`GameRng`] - Explicit, seedable random stream
//!
//! # Game Flow
//!
//! 1. Start a [`GameState`] with two random tiles, or resume from a board read
//!    from a running game
//! 2. Pick a [`Direction`](crate::Direction) and call [`GameState::apply_move`]
//! 3. A move that changes the board adds its merge bonus to the score and
//!    spawns one tile; a move that changes nothing is rejected
//! 4. Repeat until [`GameState::is_terminal`]
//!
//! Randomness is never global: every function that spawns tiles takes the
//! random stream as an argument.
//!
//! # Example
//!
//! ```
//! use tilerun_engine::{Direction, GameState, RngSeed};
//!
//! let seed: RngSeed = "1".parse().unwrap();
//! let mut rng = seed.rng();
//! let mut state = GameState::new(&mut rng);
//!
//! while !state.is_terminal() {
//!     let Some(direction) = Direction::ALL
//!         .into_iter()
//!         .find(|d| state.board().can_slide(*d))
//!     else {
//!         break;
//!     };
//!     state.apply_move(direction, &mut rng).unwrap();
//! }
//!
//! println!("Game over with score {}", state.score());
//! ```

pub use self::{game_state::*, game_stats::*, rng_seed::*};

mod game_state;
mod game_stats;
mod rng_seed;
