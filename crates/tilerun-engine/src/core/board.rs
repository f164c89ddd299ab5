use std::{fmt, str::FromStr};

use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::ParseBoardError;

/// Width and height of the board.
pub const BOARD_SIZE: usize = 4;

/// Number of cells on the board.
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// Number of quarter turns in a full rotation.
pub(crate) const QUARTER_TURNS: usize = 4;

/// Probability that a spawned tile is a 4 instead of a 2.
const FOUR_TILE_PROBABILITY: f64 = 0.1;

/// Square grid of tile values.
///
/// Cells are stored row-major with row 0 at the top. A cell holds 0 when empty,
/// otherwise a power of two >= 2. `Board` is a small `Copy` value, so
/// simulations clone it freely without sharing state.
///
/// # Serialized Form
///
/// A board is exchanged as [`CELL_COUNT`] whitespace-separated decimal
/// integers in row-major order. [`fmt::Display`] writes this form and
/// [`FromStr`] reads it back; serde uses the same string.
///
/// # Example
///
/// ```
/// use tilerun_engine::Board;
///
/// let board: Board = "2 0 0 2  0 0 0 0  0 4 0 0  0 0 0 0".parse().unwrap();
/// assert_eq!(board.get(0, 3), 2);
/// assert_eq!(board.empty_cells().count(), 13);
/// assert_eq!(board.to_string(), "2 0 0 2 0 0 0 0 0 4 0 0 0 0 0 0");
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    rows: [[u32; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    pub const EMPTY: Self = Self {
        rows: [[0; BOARD_SIZE]; BOARD_SIZE],
    };

    #[must_use]
    pub const fn from_rows(rows: [[u32; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        Self { rows }
    }

    #[must_use]
    pub const fn rows(&self) -> &[[u32; BOARD_SIZE]; BOARD_SIZE] {
        &self.rows
    }

    #[must_use]
    pub const fn get(&self, row: usize, col: usize) -> u32 {
        self.rows[row][col]
    }

    pub(crate) const fn set(&mut self, row: usize, col: usize, value: u32) {
        self.rows[row][col] = value;
    }

    #[must_use]
    pub const fn row(&self, row: usize) -> [u32; BOARD_SIZE] {
        self.rows[row]
    }

    #[must_use]
    pub fn column(&self, col: usize) -> [u32; BOARD_SIZE] {
        self.rows.map(|row| row[col])
    }

    pub(crate) fn set_column(&mut self, col: usize, values: [u32; BOARD_SIZE]) {
        for (row, value) in self.rows.iter_mut().zip(values) {
            row[col] = value;
        }
    }

    /// Iterates over all cell values in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = u32> + '_ {
        self.rows.iter().flatten().copied()
    }

    /// Iterates over `(row, col)` of every empty cell in row-major order.
    pub fn empty_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, value)| **value == 0)
                .map(move |(c, _)| (r, c))
        })
    }

    #[must_use]
    pub fn has_empty_cell(&self) -> bool {
        self.cells().any(|value| value == 0)
    }

    #[must_use]
    pub fn max_tile(&self) -> u32 {
        self.cells().max().unwrap_or(0)
    }

    /// Sum of all tile values.
    #[must_use]
    pub fn tile_sum(&self) -> u64 {
        self.cells().map(u64::from).sum()
    }

    /// Places a new tile on a uniformly chosen empty cell.
    ///
    /// The tile is a 4 with probability 0.1, otherwise a 2. Returns the
    /// position of the new tile, or `None` (leaving the board untouched) if
    /// the board is full.
    pub fn spawn_random_tile<R>(&mut self, rng: &mut R) -> Option<(usize, usize)>
    where
        R: Rng + ?Sized,
    {
        let empty_count = self.empty_cells().count();
        if empty_count == 0 {
            return None;
        }
        let (row, col) = self.empty_cells().nth(rng.random_range(0..empty_count))?;
        let value = if rng.random_bool(FOUR_TILE_PROBABILITY) {
            4
        } else {
            2
        };
        self.set(row, col, value);
        Some((row, col))
    }

    /// Returns a copy of the board turned counter-clockwise `quarter_turns` times.
    ///
    /// One turn moves the left column to the bottom row, so a leftward slide
    /// becomes a downward one. Turning by `k` and then by `4 - k` restores the
    /// original board.
    #[must_use]
    pub fn rotated(self, quarter_turns: usize) -> Self {
        (0..quarter_turns % QUARTER_TURNS).fold(self, |board, _| board.rotated_once())
    }

    fn rotated_once(self) -> Self {
        let mut rows = [[0; BOARD_SIZE]; BOARD_SIZE];
        for (r, row) in rows.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = self.rows[c][BOARD_SIZE - 1 - r];
            }
        }
        Self { rows }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.cells().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{value}")?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens = s.split_whitespace().collect::<Vec<_>>();
        if tokens.len() != CELL_COUNT {
            return Err(ParseBoardError::CellCount {
                expected: CELL_COUNT,
                found: tokens.len(),
            });
        }

        let mut board = Self::EMPTY;
        for (i, token) in tokens.into_iter().enumerate() {
            // `u32::from_str` alone would also take a leading `+`
            if !token.bytes().all(|b| b.is_ascii_digit()) {
                return Err(ParseBoardError::NotDecimal {
                    token: token.to_owned(),
                });
            }
            let value = token
                .parse::<u32>()
                .map_err(|source| ParseBoardError::InvalidValue {
                    token: token.to_owned(),
                    source,
                })?;
            board.set(i / BOARD_SIZE, i % BOARD_SIZE, value);
        }
        Ok(board)
    }
}

impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse()
            .map_err(|e| serde::de::Error::custom(format!("invalid board {s:?}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    const SAMPLE: [[u32; BOARD_SIZE]; BOARD_SIZE] = [
        [2, 4, 8, 16],
        [0, 0, 2, 0],
        [32, 0, 0, 4],
        [0, 2, 0, 0],
    ];

    #[test]
    fn test_parse_row_major() {
        let board: Board = "2 4 8 16 0 0 2 0 32 0 0 4 0 2 0 0".parse().unwrap();
        assert_eq!(board, Board::from_rows(SAMPLE));
        assert_eq!(board.get(2, 0), 32);
        assert_eq!(board.get(2, 3), 4);
    }

    #[test]
    fn test_parse_accepts_any_whitespace() {
        let board: Board = "  2 4 8 16\n0 0 2 0\t32 0 0 4\r\n0 2 0 0  ".parse().unwrap();
        assert_eq!(board, Board::from_rows(SAMPLE));
    }

    #[test]
    fn test_parse_wrong_count() {
        assert_eq!(
            "2 4 8".parse::<Board>(),
            Err(ParseBoardError::CellCount {
                expected: 16,
                found: 3
            })
        );
        assert_eq!(
            "".parse::<Board>(),
            Err(ParseBoardError::CellCount {
                expected: 16,
                found: 0
            })
        );
        let too_many = vec!["0"; 17].join(" ");
        assert!(matches!(
            too_many.parse::<Board>(),
            Err(ParseBoardError::CellCount { found: 17, .. })
        ));
    }

    #[test]
    fn test_parse_non_integer() {
        for (bad, token) in [
            ("2 4 8 x 0 0 0 0 0 0 0 0 0 0 0 0", "x"),
            ("2 -4 0 0 0 0 0 0 0 0 0 0 0 0 0 0", "-4"),
            ("2 4 0 0 0 0 0 0 0 0 0 0 0 0 0 0x8", "0x8"),
        ] {
            assert_eq!(
                bad.parse::<Board>(),
                Err(ParseBoardError::NotDecimal {
                    token: token.to_owned()
                })
            );
        }

        let overflow = "2 4 0 0 0 0 0 0 0 0 0 0 0 0 0 99999999999";
        assert!(matches!(
            overflow.parse::<Board>(),
            Err(ParseBoardError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_plus_sign() {
        assert_eq!(
            "+2 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0".parse::<Board>(),
            Err(ParseBoardError::NotDecimal {
                token: "+2".to_owned()
            })
        );
        let plain: Board = "2 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0".parse().unwrap();
        assert_eq!(plain.get(0, 0), 2);
    }

    #[test]
    fn test_serialized_roundtrip() {
        let boards = [
            Board::EMPTY,
            Board::from_rows(SAMPLE),
            Board::from_rows([[1 << 17; BOARD_SIZE]; BOARD_SIZE]),
        ];
        for board in boards {
            let serialized = board.to_string();
            assert_eq!(serialized.parse::<Board>().unwrap(), board);
        }
    }

    #[test]
    fn test_serde_roundtrip() {
        let board = Board::from_rows(SAMPLE);
        let json = serde_json::to_string(&board).unwrap();
        assert_eq!(json, "\"2 4 8 16 0 0 2 0 32 0 0 4 0 2 0 0\"");
        let deserialized: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, board);

        assert!(serde_json::from_str::<Board>("\"2 4\"").is_err());
    }

    #[test]
    fn test_empty_cells_row_major() {
        let board = Board::from_rows(SAMPLE);
        let empty = board.empty_cells().collect::<Vec<_>>();
        assert_eq!(
            empty,
            [(1, 0), (1, 1), (1, 3), (2, 1), (2, 2), (3, 0), (3, 2), (3, 3)]
        );
        assert_eq!(Board::EMPTY.empty_cells().count(), CELL_COUNT);
    }

    #[test]
    fn test_spawn_fills_an_empty_cell() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut board = Board::from_rows(SAMPLE);
        let before = board;
        let (row, col) = board.spawn_random_tile(&mut rng).unwrap();

        assert_eq!(before.get(row, col), 0);
        assert!(matches!(board.get(row, col), 2 | 4));
        assert_eq!(board.empty_cells().count(), before.empty_cells().count() - 1);
    }

    #[test]
    fn test_spawn_on_full_board_is_noop() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut board = Board::from_rows([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
        let before = board;
        assert_eq!(board.spawn_random_tile(&mut rng), None);
        assert_eq!(board, before);
    }

    #[test]
    fn test_spawn_distribution() {
        let mut rng = Pcg32::seed_from_u64(42);
        let mut fours = 0;
        let mut corners = 0;
        let trials = 10_000;
        for _ in 0..trials {
            let mut board = Board::EMPTY;
            let (row, col) = board.spawn_random_tile(&mut rng).unwrap();
            if board.get(row, col) == 4 {
                fours += 1;
            }
            if (row, col) == (0, 0) {
                corners += 1;
            }
        }
        // 10% fours, 1/16 per cell
        assert!((800..1200).contains(&fours), "fours = {fours}");
        assert!((450..800).contains(&corners), "corners = {corners}");
    }

    #[test]
    fn test_spawn_is_reproducible() {
        let spawn_all = |seed| {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut board = Board::EMPTY;
            while board.spawn_random_tile(&mut rng).is_some() {}
            board
        };
        assert_eq!(spawn_all(3), spawn_all(3));
    }

    #[test]
    fn test_rotation_identity_and_inverse() {
        let board = Board::from_rows(SAMPLE);
        assert_eq!(board.rotated(0), board);
        assert_eq!(board.rotated(QUARTER_TURNS), board);
        for k in 0..QUARTER_TURNS {
            assert_eq!(board.rotated(k).rotated(QUARTER_TURNS - k), board, "k = {k}");
        }
    }

    #[test]
    fn test_rotation_moves_left_column_to_bottom_row() {
        let board = Board::from_rows(SAMPLE);
        let turned = board.rotated(1);
        // left column read top to bottom lands on the bottom row left to right
        assert_eq!(turned.row(BOARD_SIZE - 1), board.column(0));
        // top row read right to left lands on the left column top to bottom
        let mut top = board.row(0);
        top.reverse();
        assert_eq!(turned.column(0), top);
    }

    #[test]
    fn test_board_metrics() {
        let board = Board::from_rows(SAMPLE);
        assert_eq!(board.max_tile(), 32);
        assert_eq!(board.tile_sum(), 2 + 4 + 8 + 16 + 2 + 32 + 4 + 2);
        assert!(board.has_empty_cell());
        assert_eq!(Board::EMPTY.max_tile(), 0);
    }
}
