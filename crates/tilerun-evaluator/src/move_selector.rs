//! Move selection seam and local game sessions.
//!
//! Every strategy implements [`MoveSelector`], so callers (the CLI, self-play
//! benchmarks) can switch between the rollout evaluator and the static
//! heuristic without knowing which one they drive.

use std::fmt;

use tilerun_engine::{CorruptTileError, Direction, GameRng, GameState};

/// Chooses the next move for a game state.
pub trait MoveSelector: fmt::Debug + Send + Sync {
    /// Returns the direction to play, or `None` if the selector has no move.
    ///
    /// Must not modify `state`. Random choices are drawn from `rng` only.
    fn select_move(
        &self,
        state: &GameState,
        rng: &mut GameRng,
    ) -> Result<Option<Direction>, CorruptTileError>;
}

/// Why [`play_session`] stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum SessionEnd {
    /// No direction can change the board.
    #[display("terminal")]
    Terminal,
    /// The selector returned no move on a board that is not terminal.
    #[display("no-move")]
    NoMove,
    /// The move limit was reached.
    #[display("move-limit")]
    MoveLimit,
}

/// Plays moves chosen by `selector` until the game ends.
///
/// Tiles are spawned from `rng`, which is also handed to the selector. The
/// session stops when the board is terminal, the selector has no move, or
/// `move_limit` moves have been played.
///
/// # Example
///
/// ```
/// use tilerun_engine::{GameState, RngSeed};
/// use tilerun_evaluator::{
///     move_selector::{SessionEnd, play_session},
///     static_evaluator::StaticHeuristicStrategy,
/// };
///
/// let mut rng = "2048".parse::<RngSeed>().unwrap().rng();
/// let mut state = GameState::new(&mut rng);
///
/// let end = play_session(&StaticHeuristicStrategy, &mut state, &mut rng, None).unwrap();
/// assert_eq!(end, SessionEnd::Terminal);
/// assert!(state.is_terminal());
/// ```
pub fn play_session<S>(
    selector: &S,
    state: &mut GameState,
    rng: &mut GameRng,
    move_limit: Option<usize>,
) -> Result<SessionEnd, CorruptTileError>
where
    S: MoveSelector + ?Sized,
{
    let end = loop {
        if state.is_terminal() {
            break SessionEnd::Terminal;
        }
        if move_limit.is_some_and(|limit| state.move_count() >= limit) {
            break SessionEnd::MoveLimit;
        }
        let Some(direction) = selector.select_move(state, rng)? else {
            break SessionEnd::NoMove;
        };
        if !state.apply_move(direction, rng)? {
            log::warn!("selector chose {direction}, which does not change the board");
            break SessionEnd::NoMove;
        }
    };

    log::debug!(
        "session ended ({end}): score {}, {} moves, max tile {}",
        state.score(),
        state.move_count(),
        state.board().max_tile()
    );
    Ok(end)
}
