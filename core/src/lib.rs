#![no_std]

extern crate alloc;

pub use card::*;
pub use config::*;
pub use deck::*;
pub use engine::*;
pub use error::*;
pub use hint::*;
pub use scheduler::*;
pub use scoring::*;
pub use session::*;
pub use snapshot::*;
pub use theme::*;
pub use time::*;
pub use types::*;

mod card;
mod config;
mod deck;
mod engine;
mod error;
mod hint;
mod scheduler;
mod scoring;
mod session;
mod snapshot;
mod theme;
mod time;
mod types;

/// Outcome of selecting a card
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    NoChange,
    Flipped,
    /// Second card of a pair, resolution is now pending
    PairSelected,
}

impl SelectOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Flipped => true,
            Self::PairSelected => true,
        }
    }
}

/// Outcome of resolving a pending pair
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ResolveOutcome {
    NoChange,
    Mismatch,
    Match,
    /// Last pair matched
    Won,
}

impl ResolveOutcome {
    pub const fn has_update(self) -> bool {
        use ResolveOutcome::*;
        match self {
            NoChange => false,
            Mismatch => true,
            Match => true,
            Won => true,
        }
    }

    pub const fn is_match(self) -> bool {
        matches!(self, Self::Match | Self::Won)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HintOutcome {
    NoChange,
    Revealed([CardId; 2]),
}

impl HintOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Revealed(_))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    NoChange,
    Ticked,
}

impl TickOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Ticked)
    }
}
