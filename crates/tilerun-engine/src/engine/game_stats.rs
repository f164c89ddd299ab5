use serde::{Deserialize, Serialize};

use crate::Slide;

/// Game statistics tracking score, move count and merges.
///
/// - **Score**: Sum of merge bonuses (see [`crate::merge_bonus`])
/// - **Move count**: Number of moves that changed the board
/// - **Merge count**: Number of tile pairs merged
///
/// Moves that leave the board unchanged are not counted.
///
/// # Example
///
/// ```
/// use tilerun_engine::{Board, Direction, GameStats};
///
/// let board: Board = "2 2 4 4 0 0 0 0 0 0 0 0 0 0 0 0".parse().unwrap();
/// let mut stats = GameStats::new();
/// stats.complete_move(&board.slide(Direction::Left).unwrap());
///
/// assert_eq!(stats.score(), 12);
/// assert_eq!(stats.move_count(), 1);
/// assert_eq!(stats.merge_count(), 2);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    score: u64,
    move_count: usize,
    merge_count: usize,
}

impl GameStats {
    /// Creates a new game statistics tracker with all counters at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            move_count: 0,
            merge_count: 0,
        }
    }

    #[must_use]
    pub const fn score(&self) -> u64 {
        self.score
    }

    #[must_use]
    pub const fn move_count(&self) -> usize {
        self.move_count
    }

    #[must_use]
    pub const fn merge_count(&self) -> usize {
        self.merge_count
    }

    /// Updates statistics after a slide.
    ///
    /// Unchanged slides are ignored.
    pub const fn complete_move(&mut self, slide: &Slide) {
        if !slide.is_changed() {
            return;
        }
        self.move_count += 1;
        self.merge_count += slide.merge_count();
        self.score += slide.score_gain();
    }
}
