use std::str::FromStr;

use rand::Rng;

use crate::{Board, CorruptTileError, Direction, ParseBoardError};

use super::GameStats;

/// Board plus the statistics of the game played on it.
///
/// The state only changes through [`GameState::apply_move`], which slides the
/// board, adds the merge bonus to the score and spawns one random tile when the
/// move changed the board. Cloning is cheap; simulations clone the state and
/// play on the copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    stats: GameStats,
}

impl GameState {
    /// Starts a new game: an empty board with two random tiles.
    #[must_use]
    pub fn new<R>(rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let mut board = Board::EMPTY;
        board.spawn_random_tile(rng);
        board.spawn_random_tile(rng);
        Self::from_board(board)
    }

    /// Resumes from an observed board with score and move count reset to zero.
    #[must_use]
    pub const fn from_board(board: Board) -> Self {
        Self {
            board,
            stats: GameStats::new(),
        }
    }

    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub const fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub const fn score(&self) -> u64 {
        self.stats.score()
    }

    #[must_use]
    pub const fn move_count(&self) -> usize {
        self.stats.move_count()
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.board.is_terminal()
    }

    /// Plays one move.
    ///
    /// Returns `Ok(false)` and leaves the state untouched if the move does not
    /// change the board. Otherwise commits the slide, updates the statistics,
    /// spawns a tile and returns `Ok(true)`.
    ///
    /// # Example
    ///
    /// ```
    /// use rand::SeedableRng as _;
    /// use rand_pcg::Pcg32;
    /// use tilerun_engine::{Direction, GameState};
    ///
    /// let mut rng = Pcg32::seed_from_u64(0);
    /// let mut state: GameState = "2 2 0 0 0 0 0 0 0 0 0 0 0 0 0 0".parse().unwrap();
    ///
    /// assert!(!state.apply_move(Direction::Up, &mut rng).unwrap());
    /// assert!(state.apply_move(Direction::Left, &mut rng).unwrap());
    /// assert_eq!(state.score(), 4);
    /// assert_eq!(state.board().get(0, 0), 4);
    /// assert_eq!(state.board().empty_cells().count(), 14);
    /// ```
    pub fn apply_move<R>(&mut self, direction: Direction, rng: &mut R) -> Result<bool, CorruptTileError>
    where
        R: Rng + ?Sized,
    {
        let slide = self.board.slide(direction)?;
        if !slide.is_changed() {
            return Ok(false);
        }
        self.board = *slide.board();
        self.stats.complete_move(&slide);
        self.board.spawn_random_tile(rng);
        Ok(true)
    }
}

impl FromStr for GameState {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self::from_board)
    }
}
