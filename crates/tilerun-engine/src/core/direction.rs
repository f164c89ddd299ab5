use serde::{Deserialize, Serialize};

/// Direction in which all tiles slide.
///
/// The declaration order `[Down, Left, Up, Right]` is significant: a variant's
/// index is the number of quarter turns that make the move act like
/// [`Direction::Down`], and strategies iterate and break ties in this order.
///
/// The string form (`down`, `left`, `up`, `right`) is the token exchanged
/// with whatever drives the real game.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    derive_more::Display,
    derive_more::FromStr,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[display("down")]
    Down,
    #[display("left")]
    Left,
    #[display("up")]
    Up,
    #[display("right")]
    Right,
}

impl Direction {
    pub const LEN: usize = 4;

    pub const ALL: [Self; Self::LEN] = [Self::Down, Self::Left, Self::Up, Self::Right];

    /// Number of quarter turns that map this move onto a downward slide.
    #[must_use]
    pub const fn quarter_turns(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Down => "down",
            Self::Left => "left",
            Self::Up => "up",
            Self::Right => "right",
        }
    }
}
