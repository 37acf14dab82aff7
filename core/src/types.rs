use serde::{Deserialize, Serialize};

/// Stable position of a card within a dealt deck.
pub type CardId = u8;

/// Count type used for pair counts and board axes.
pub type PairCount = u8;

pub type MoveCount = u32;

pub type Score = u32;

pub type Seconds = u32;

/// Engine clock resolution.
pub type Millis = u64;

/// Identifies one game session, later sessions always compare greater.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Generation(pub(crate) u64);

impl Generation {
    pub const fn get(self) -> u64 {
        self.0
    }

    pub(crate) const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl core::fmt::Display for Generation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
