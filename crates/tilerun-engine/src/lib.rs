use std::num::ParseIntError;

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Error returned when a serialized board cannot be decoded.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseBoardError {
    #[display("expected {expected} tile values, found {found}")]
    CellCount { expected: usize, found: usize },
    #[display("tile value {token:?} is not a plain decimal number")]
    NotDecimal { token: String },
    #[display("invalid tile value {token:?}")]
    InvalidValue { token: String, source: ParseIntError },
}

/// A tile value outside the merge bonus table was about to be merged.
///
/// Only boards built from malformed input can contain such tiles, so this
/// signals a broken invariant upstream of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("tile value {value} cannot be merged: not a power of two within the bonus table")]
pub struct CorruptTileError {
    pub value: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseSeedError {
    #[display("invalid seed: expected 1 to 32 hex characters, got {found}")]
    Length { found: usize },
    #[display("invalid hex seed")]
    Hex { source: ParseIntError },
}
