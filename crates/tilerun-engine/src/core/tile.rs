use crate::CorruptTileError;

/// Largest exponent of a tile that may still be merged.
///
/// Merging two `2^30` tiles yields `2^31`, the largest power of two a `u32` cell holds.
pub const MAX_MERGE_EXPONENT: usize = 30;

/// Score awarded for a merge, indexed by the exponent of the two merged tiles.
///
/// Merging two tiles of value `v` awards `2v`, the value of the tile it creates:
/// - `[1]`: 2 + 2 => 4 points
/// - `[2]`: 4 + 4 => 8 points
/// - `[10]`: 1024 + 1024 => 2048 points
///
/// Index 0 (value 1) is not a tile and stays 0.
const MERGE_BONUS_TABLE: [u64; MAX_MERGE_EXPONENT + 1] = build_merge_bonus_table();

const fn build_merge_bonus_table() -> [u64; MAX_MERGE_EXPONENT + 1] {
    let mut table = [0; MAX_MERGE_EXPONENT + 1];
    let mut exp = 1;
    while exp <= MAX_MERGE_EXPONENT {
        table[exp] = 1 << (exp + 1);
        exp += 1;
    }
    table
}

/// Returns `log2(value)` if `value` is a power of two.
#[must_use]
pub fn tile_exponent(value: u32) -> Option<usize> {
    value
        .is_power_of_two()
        .then(|| value.trailing_zeros() as usize)
}

/// Returns whether `value` may appear on a board (empty or a power of two >= 2).
#[must_use]
pub fn is_valid_tile(value: u32) -> bool {
    value == 0 || (value >= 2 && value.is_power_of_two())
}

/// Looks up the score for merging two tiles of `value`.
///
/// # Example
///
/// ```
/// use tilerun_engine::merge_bonus;
///
/// assert_eq!(merge_bonus(2), Ok(4));
/// assert_eq!(merge_bonus(1024), Ok(2048));
/// assert!(merge_bonus(3).is_err());
/// ```
pub fn merge_bonus(value: u32) -> Result<u64, CorruptTileError> {
    tile_exponent(value)
        .filter(|exp| (1..=MAX_MERGE_EXPONENT).contains(exp))
        .map(|exp| MERGE_BONUS_TABLE[exp])
        .ok_or(CorruptTileError { value })
}
