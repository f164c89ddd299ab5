use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::ParseSeedError;

/// Pseudo-random stream used for tile spawns and rollouts.
pub type GameRng = Pcg32;

/// Seed for a deterministic [`GameRng`].
///
/// A 128-bit (16-byte) seed written as hex. The same seed always produces the
/// same tile spawns and the same rollouts, which makes games and move
/// selections reproducible.
///
/// # Example
///
/// ```
/// use rand::Rng as _;
/// use tilerun_engine::RngSeed;
///
/// let seed: RngSeed = "2048".parse().unwrap();
/// assert_eq!(seed.to_string(), "00000000000000000000000000002048");
///
/// let mut a = seed.rng();
/// let mut b = seed.rng();
/// assert_eq!(a.random::<u64>(), b.random::<u64>());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RngSeed([u8; 16]);

impl RngSeed {
    /// Draws a seed from the thread-local OS-seeded generator.
    #[must_use]
    pub fn random() -> Self {
        rand::rng().random()
    }

    #[must_use]
    pub fn rng(self) -> GameRng {
        Pcg32::from_seed(self.0)
    }
}

impl fmt::Display for RngSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for RngSeed {
    type Err = ParseSeedError;

    /// Parses up to 32 hex digits; shorter strings are zero-extended on the left.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || s.len() > 32 {
            return Err(ParseSeedError::Length { found: s.len() });
        }
        let num = u128::from_str_radix(s, 16).map_err(|source| ParseSeedError::Hex { source })?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for RngSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RngSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str
            .parse()
            .map_err(|e| serde::de::Error::custom(format!("{e}: {hex_str}")))
    }
}

/// Allows generating random `RngSeed` values using the standard random distribution.
impl Distribution<RngSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> RngSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        RngSeed(seed)
    }
}
