use alloc::string::String;
use serde::{Deserialize, Serialize};

use crate::*;

/// Canonical player-visible state of a single card.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardState {
    #[default]
    Hidden,
    Flipped,
    Matched,
}

impl CardState {
    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden)
    }

    pub const fn is_face_up(self) -> bool {
        matches!(self, Self::Flipped | Self::Matched)
    }

    pub const fn is_matched(self) -> bool {
        matches!(self, Self::Matched)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    id: CardId,
    symbol: String,
    state: CardState,
}

impl Card {
    pub(crate) fn new(id: CardId, symbol: String) -> Self {
        Self {
            id,
            symbol,
            state: CardState::Hidden,
        }
    }

    pub fn id(&self) -> CardId {
        self.id
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn state(&self) -> CardState {
        self.state
    }

    pub(crate) fn set_state(&mut self, state: CardState) {
        self.state = state;
    }

    /// Symbol as the player currently sees it, `None` while face down.
    pub fn visible_symbol(&self) -> Option<&str> {
        self.state.is_face_up().then_some(self.symbol.as_str())
    }
}
