pub use self::{board::*, direction::*, slide::*, tile::*};

pub(crate) mod board;
pub(crate) mod direction;
pub(crate) mod slide;
pub(crate) mod tile;
