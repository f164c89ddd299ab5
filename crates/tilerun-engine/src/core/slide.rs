//! Move resolution and terminal-state detection.
//!
//! Every direction is resolved by the same downward collapse: the board is
//! rotated so the requested direction points toward increasing row index,
//! each column is collapsed, and the result is rotated back.
//!
//! # Collapse Rules
//!
//! Each column is scanned once from the top, looking at the pairs
//! `(r, r + 1)` for `r = 0 .. BOARD_SIZE - 1`:
//!
//! 1. An empty tile at `r` is skipped.
//! 2. If `r + 1` is empty, every tile in `0..=r` moves down by one.
//! 3. A pair containing a tile created by a merge in this pass is skipped,
//!    so merges never chain within one move.
//! 4. Equal tiles merge into `r + 1`, unless the tile at `r + 2` has the same
//!    value (the chain guard). The guard leaves the pair for the next step, so
//!    three equal tiles collapse into one merged tile plus one single tile
//!    closest to the far edge.

use crate::{CorruptTileError, Direction};

use super::{
    board::{BOARD_SIZE, Board, QUARTER_TURNS},
    tile,
};

/// Result of sliding a board in one direction, before any tile is spawned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slide {
    board: Board,
    score_gain: u64,
    merge_count: usize,
    changed: bool,
}

impl Slide {
    /// Board after the slide. Equal to the input board if nothing changed.
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Total merge bonus earned by this slide.
    #[must_use]
    pub const fn score_gain(&self) -> u64 {
        self.score_gain
    }

    #[must_use]
    pub const fn merge_count(&self) -> usize {
        self.merge_count
    }

    /// Whether any tile moved or merged.
    ///
    /// An unchanged slide is not a legal move: callers skip scoring and spawning.
    #[must_use]
    pub const fn is_changed(&self) -> bool {
        self.changed
    }
}

#[derive(Debug, Default)]
struct LineCollapse {
    score_gain: u64,
    merge_count: usize,
    changed: bool,
    corrupt: Option<CorruptTileError>,
}

impl Board {
    /// Slides all tiles toward `direction`, merging equal neighbours.
    ///
    /// Fails if a merge involves a tile value outside the bonus table.
    ///
    /// # Example
    ///
    /// ```
    /// use tilerun_engine::{Board, Direction};
    ///
    /// let board: Board = "2 2 2 0 0 0 0 0 0 0 0 0 0 0 0 0".parse().unwrap();
    /// let slide = board.slide(Direction::Right).unwrap();
    /// assert!(slide.is_changed());
    /// assert_eq!(slide.score_gain(), 4);
    /// assert_eq!(slide.board().row(0), [0, 0, 2, 4]);
    /// ```
    pub fn slide(&self, direction: Direction) -> Result<Slide, CorruptTileError> {
        let (board, collapse) = self.collapse(direction);
        if let Some(err) = collapse.corrupt {
            return Err(err);
        }
        if !collapse.changed {
            return Ok(Slide {
                board: *self,
                score_gain: 0,
                merge_count: 0,
                changed: false,
            });
        }
        Ok(Slide {
            board,
            score_gain: collapse.score_gain,
            merge_count: collapse.merge_count,
            changed: true,
        })
    }

    /// Returns whether sliding toward `direction` would change the board.
    #[must_use]
    pub fn can_slide(&self, direction: Direction) -> bool {
        self.collapse(direction).1.changed
    }

    /// Returns whether no move can change the board anymore.
    ///
    /// A board is terminal when it has no empty cell and the collapse leaves it
    /// unchanged in every direction, using the same merge rules (chain guard
    /// included) as [`Board::slide`].
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !self.has_empty_cell()
            && Direction::ALL
                .into_iter()
                .all(|direction| !self.can_slide(direction))
    }

    fn collapse(&self, direction: Direction) -> (Self, LineCollapse) {
        let turns = direction.quarter_turns();
        let mut board = self.rotated(turns);
        let mut total = LineCollapse::default();

        for col in 0..BOARD_SIZE {
            let mut line = board.column(col);
            let result = collapse_line(&mut line);
            if result.changed {
                board.set_column(col, line);
            }
            total.score_gain += result.score_gain;
            total.merge_count += result.merge_count;
            total.changed |= result.changed;
            if total.corrupt.is_none() {
                total.corrupt = result.corrupt;
            }
        }

        (board.rotated(QUARTER_TURNS - turns), total)
    }
}

/// Collapses one line toward its last index.
fn collapse_line(line: &mut [u32; BOARD_SIZE]) -> LineCollapse {
    let mut merged = [false; BOARD_SIZE];
    let mut result = LineCollapse::default();

    for r in 0..BOARD_SIZE - 1 {
        let value = line[r];
        if value == 0 {
            continue;
        }
        if line[r + 1] == 0 {
            shift_down(line, &mut merged, r + 1);
            result.changed = true;
            continue;
        }
        if merged[r] || merged[r + 1] || line[r + 1] != value {
            continue;
        }
        if r + 2 < BOARD_SIZE && line[r + 2] == value {
            continue;
        }

        match tile::merge_bonus(value) {
            Ok(bonus) => result.score_gain += bonus,
            Err(err) => {
                result.corrupt.get_or_insert(err);
            }
        }
        line[r + 1] = value.saturating_mul(2);
        merged[r + 1] = true;
        shift_down(line, &mut merged, r);
        result.merge_count += 1;
        result.changed = true;
    }

    result
}

/// Moves `line[0..end]` to `line[1..=end]` and clears `line[0]`.
///
/// Merge marks travel with their tiles.
fn shift_down(line: &mut [u32; BOARD_SIZE], merged: &mut [bool; BOARD_SIZE], end: usize) {
    line.copy_within(0..end, 1);
    merged.copy_within(0..end, 1);
    line[0] = 0;
    merged[0] = false;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with_column(col: usize, values: [u32; BOARD_SIZE]) -> Board {
        let mut board = Board::EMPTY;
        board.set_column(col, values);
        board
    }

    fn board_with_row(row: usize, values: [u32; BOARD_SIZE]) -> Board {
        let mut rows = [[0; BOARD_SIZE]; BOARD_SIZE];
        rows[row] = values;
        Board::from_rows(rows)
    }

    fn collapsed(values: [u32; BOARD_SIZE]) -> ([u32; BOARD_SIZE], u64) {
        let mut line = values;
        let result = collapse_line(&mut line);
        (line, result.score_gain)
    }

    #[test]
    fn test_line_slides_through_gaps() {
        assert_eq!(collapsed([2, 0, 0, 0]), ([0, 0, 0, 2], 0));
        assert_eq!(collapsed([0, 4, 0, 2]), ([0, 0, 4, 2], 0));
        assert_eq!(collapsed([8, 0, 4, 0]), ([0, 0, 8, 4], 0));
    }

    #[test]
    fn test_line_merges_once_per_pass() {
        assert_eq!(collapsed([0, 0, 2, 2]), ([0, 0, 0, 4], 4));
        assert_eq!(collapsed([2, 0, 2, 0]), ([0, 0, 0, 4], 4));
        assert_eq!(collapsed([4, 4, 2, 2]), ([0, 0, 8, 4], 12));
        // the merged 4 must not absorb the existing 4 below it
        assert_eq!(collapsed([2, 2, 0, 4]), ([0, 0, 4, 4], 4));
        assert_eq!(collapsed([4, 2, 2, 0]), ([0, 0, 4, 4], 4));
    }

    #[test]
    fn test_line_chain_guard() {
        assert_eq!(collapsed([2, 2, 2, 0]), ([0, 0, 2, 4], 4));
        assert_eq!(collapsed([0, 2, 2, 2]), ([0, 0, 2, 4], 4));
        assert_eq!(collapsed([2, 2, 2, 2]), ([0, 2, 2, 4], 4));
    }

    #[test]
    fn test_line_unchanged() {
        let mut line = [2, 4, 8, 16];
        let result = collapse_line(&mut line);
        assert!(!result.changed);
        assert_eq!(line, [2, 4, 8, 16]);

        let mut line = [0, 0, 0, 0];
        assert!(!collapse_line(&mut line).changed);
    }

    #[test]
    fn test_triple_chain_down_and_up() {
        let board = board_with_column(1, [2, 2, 2, 0]);

        let down = board.slide(Direction::Down).unwrap();
        assert!(down.is_changed());
        assert_eq!(down.board().column(1), [0, 0, 2, 4]);
        assert_eq!(down.score_gain(), 4);

        let up = board.slide(Direction::Up).unwrap();
        assert!(up.is_changed());
        assert_eq!(up.board().column(1), [4, 2, 0, 0]);
        assert_eq!(up.score_gain(), 4);
    }

    #[test]
    fn test_horizontal_moves() {
        let board = board_with_row(2, [2, 0, 2, 4]);

        let left = board.slide(Direction::Left).unwrap();
        assert_eq!(left.board().row(2), [4, 4, 0, 0]);
        assert_eq!(left.score_gain(), 4);

        let right = board.slide(Direction::Right).unwrap();
        assert_eq!(right.board().row(2), [0, 0, 4, 4]);
        assert_eq!(right.score_gain(), 4);
    }

    #[test]
    fn test_compacted_row_is_invalid_toward_its_edge() {
        let board = board_with_row(0, [2, 4, 8, 16]);
        let left = board.slide(Direction::Left).unwrap();
        assert!(!left.is_changed());
        assert_eq!(left.board(), &board);
        assert_eq!(left.score_gain(), 0);

        // the same row can still slide down
        assert!(board.can_slide(Direction::Down));
        assert!(!board.can_slide(Direction::Up));
        assert!(!board.can_slide(Direction::Right));
    }

    #[test]
    fn test_tile_sum_is_conserved() {
        let boards = [
            "2 2 2 0 0 4 4 0 8 0 8 2 0 0 2 2",
            "2 4 2 4 4 4 2 2 16 16 16 16 0 2 0 2",
            "1024 1024 2 2 0 0 0 2 4 0 4 0 2 2 2 2",
        ];
        for board in boards {
            let board: Board = board.parse().unwrap();
            for direction in Direction::ALL {
                let slide = board.slide(direction).unwrap();
                assert_eq!(slide.board().tile_sum(), board.tile_sum());
            }
        }
    }

    #[test]
    fn test_score_gain_counts_created_tiles() {
        // four merges of 16 + 16 into 32 on the left, one extra per row
        let board: Board = "16 16 0 0 16 16 0 0 16 16 0 0 16 16 0 0".parse().unwrap();
        let slide = board.slide(Direction::Left).unwrap();
        assert_eq!(slide.merge_count(), 4);
        assert_eq!(slide.score_gain(), 4 * 32);
        assert_eq!(slide.board().column(0), [32; BOARD_SIZE]);
    }

    #[test]
    fn test_full_board_without_neighbours_is_terminal() {
        let board: Board = "2 4 2 4 4 2 4 2 2 4 2 4 4 2 4 2".parse().unwrap();
        assert!(board.is_terminal());
        for direction in Direction::ALL {
            let slide = board.slide(direction).unwrap();
            assert!(!slide.is_changed(), "{direction} should be invalid");
        }
    }

    #[test]
    fn test_full_board_with_chain_is_not_terminal() {
        let board: Board = "2 2 2 4 4 8 4 2 2 4 2 4 4 2 4 2".parse().unwrap();
        assert!(!board.is_terminal());
        assert!(board.can_slide(Direction::Left));
        assert!(board.can_slide(Direction::Right));
        assert!(!board.can_slide(Direction::Up));
        assert!(!board.can_slide(Direction::Down));
    }

    #[test]
    fn test_board_with_empty_cell_is_not_terminal() {
        assert!(!Board::EMPTY.is_terminal());
        let board: Board = "2 4 2 4 4 2 4 2 2 4 2 4 4 2 4 0".parse().unwrap();
        assert!(!board.is_terminal());
    }

    #[test]
    fn test_corrupt_tile_merge_is_reported() {
        let board = board_with_row(0, [3, 3, 0, 0]);
        assert_eq!(
            board.slide(Direction::Left),
            Err(CorruptTileError { value: 3 })
        );
        // sliding without merging is fine
        let board = board_with_row(0, [3, 0, 0, 0]);
        assert!(board.slide(Direction::Right).unwrap().is_changed());
    }
}
