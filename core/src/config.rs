use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
}

impl Difficulty {
    pub const ALL: [Difficulty; 2] = [Difficulty::Easy, Difficulty::Medium];

    pub const fn board_config(self) -> BoardConfig {
        match self {
            Self::Easy => BoardConfig::new_unchecked(4, 4, 8),
            // 24 cards laid out six to a row
            Self::Medium => BoardConfig::new_unchecked(4, 6, 12),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
        }
    }

    /// Largest pair count over every difficulty, themes have to cover at least this many symbols.
    pub const fn max_pair_count() -> PairCount {
        let mut max = 0;
        let mut i = 0;
        while i < Self::ALL.len() {
            let pairs = Self::ALL[i].board_config().pair_count;
            if pairs > max {
                max = pairs;
            }
            i += 1;
        }
        max
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.as_str().eq_ignore_ascii_case(s))
            .ok_or(GameError::InvalidDifficulty)
    }
}

/// Board shape, always holds exactly two cards per pair.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub rows: PairCount,
    pub cols: PairCount,
    pub pair_count: PairCount,
}

impl BoardConfig {
    pub(crate) const fn new_unchecked(
        rows: PairCount,
        cols: PairCount,
        pair_count: PairCount,
    ) -> Self {
        Self {
            rows,
            cols,
            pair_count,
        }
    }

    pub fn new(rows: PairCount, cols: PairCount, pair_count: PairCount) -> Result<Self> {
        let config = Self::new_unchecked(rows, cols, pair_count);
        if pair_count == 0 || config.grid_cells() != config.total_cards() {
            return Err(GameError::InvalidBoardShape);
        }
        Ok(config)
    }

    pub const fn total_cards(&self) -> usize {
        2 * self.pair_count as usize
    }

    pub const fn grid_cells(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    /// Moves a player can make before every further selection costs points.
    pub const fn move_allowance(&self) -> MoveCount {
        2 * self.pair_count as MoveCount
    }
}

/// Everything needed to deal a deck: the board shape and the symbols to pair up.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealConfig {
    pub difficulty: Difficulty,
    pub theme: String,
    pub board: BoardConfig,
    pub symbols: Vec<String>,
}

/// Resolves host-provided names into a deal configuration.
pub fn resolve_config(
    difficulty: &str,
    theme: &str,
    catalog: &ThemeCatalog,
) -> Result<DealConfig> {
    resolve_config_for(difficulty.parse()?, theme, catalog)
}

pub fn resolve_config_for(
    difficulty: Difficulty,
    theme: &str,
    catalog: &ThemeCatalog,
) -> Result<DealConfig> {
    let theme = catalog.get(theme)?;
    let board = difficulty.board_config();
    let pair_count = usize::from(board.pair_count);

    if theme.symbols().len() < pair_count {
        return Err(GameError::ThemeTooSmall);
    }

    Ok(DealConfig {
        difficulty,
        theme: theme.name().to_string(),
        board,
        symbols: theme.symbols()[..pair_count].to_vec(),
    })
}
