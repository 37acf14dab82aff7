use serde::{Deserialize, Serialize};

use crate::*;

pub const MATCH_BONUS: Score = 50;
pub const OVERRUN_PENALTY: Score = 10;

/// Points awarded per match and taken per selection past the move allowance.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringPolicy {
    pub match_bonus: Score,
    pub overrun_penalty: Score,
}

impl ScoringPolicy {
    /// Score after an accepted selection, `moves` already counts that selection.
    pub const fn after_selection(
        &self,
        score: Score,
        moves: MoveCount,
        board: &BoardConfig,
    ) -> Score {
        if moves > board.move_allowance() {
            score.saturating_sub(self.overrun_penalty)
        } else {
            score
        }
    }

    pub const fn after_match(&self, score: Score) -> Score {
        score.saturating_add(self.match_bonus)
    }
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            match_bonus: MATCH_BONUS,
            overrun_penalty: OVERRUN_PENALTY,
        }
    }
}
