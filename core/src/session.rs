use alloc::string::String;
use core::fmt;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Cards that can be face up awaiting match resolution at once.
pub const SELECTION_SIZE: usize = 2;

pub type Selection = SmallVec<[CardId; SELECTION_SIZE]>;

/// Valid transitions:
/// - InProgress -> Won
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    #[default]
    InProgress,
    Won,
}

impl SessionStatus {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won)
    }
}

/// Final tally of a won session.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinSummary {
    pub moves: MoveCount,
    pub elapsed_secs: Seconds,
    pub score: Score,
}

impl fmt::Display for WinSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Congratulations! You won in {} moves and {}!",
            self.moves,
            format_time(self.elapsed_secs)
        )
    }
}

/// State of one game from deal to win. Only the engine mutates it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    generation: Generation,
    difficulty: Difficulty,
    theme: String,
    deck: Deck,
    selection: Selection,
    matched_pairs: PairCount,
    moves: MoveCount,
    score: Score,
    elapsed_secs: Seconds,
    hints_remaining: u8,
    status: SessionStatus,
    scoring: ScoringPolicy,
}

impl Session {
    pub(crate) fn new(
        generation: Generation,
        deal: &DealConfig,
        deck: Deck,
        hints: u8,
        scoring: ScoringPolicy,
    ) -> Self {
        Self {
            generation,
            difficulty: deal.difficulty,
            theme: deal.theme.clone(),
            deck,
            selection: Selection::new(),
            matched_pairs: 0,
            moves: 0,
            score: 0,
            elapsed_secs: 0,
            hints_remaining: hints,
            status: SessionStatus::InProgress,
            scoring,
        }
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn theme(&self) -> &str {
        &self.theme
    }

    pub fn board(&self) -> BoardConfig {
        self.deck.board()
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn cards(&self) -> &[Card] {
        self.deck.cards()
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.deck.card(id)
    }

    pub fn selection(&self) -> &[CardId] {
        &self.selection
    }

    /// Two cards are face up and no further selection is accepted until they are resolved.
    pub fn awaiting_resolution(&self) -> bool {
        self.selection.len() >= SELECTION_SIZE
    }

    pub fn matched_pairs(&self) -> PairCount {
        self.matched_pairs
    }

    pub fn pair_count(&self) -> PairCount {
        self.board().pair_count
    }

    pub fn moves(&self) -> MoveCount {
        self.moves
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn elapsed_secs(&self) -> Seconds {
        self.elapsed_secs
    }

    pub fn elapsed(&self) -> String {
        format_time(self.elapsed_secs)
    }

    pub fn hints_remaining(&self) -> u8 {
        self.hints_remaining
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_won(&self) -> bool {
        self.status.is_finished()
    }

    pub fn win_summary(&self) -> Option<WinSummary> {
        self.is_won().then_some(WinSummary {
            moves: self.moves,
            elapsed_secs: self.elapsed_secs,
            score: self.score,
        })
    }

    pub(crate) fn select(&mut self, id: CardId) -> Result<SelectOutcome> {
        if self.status.is_finished() || self.awaiting_resolution() {
            log::trace!("selection of card {} ignored, input closed", id);
            return Ok(SelectOutcome::NoChange);
        }
        let id = self.deck.validate_id(id)?;

        let card = self.deck.card_mut(id).ok_or(GameError::InvalidCardId)?;
        if !card.state().is_hidden() {
            log::trace!("selection of card {} ignored, {:?}", id, card.state());
            return Ok(SelectOutcome::NoChange);
        }

        card.set_state(CardState::Flipped);
        self.selection.push(id);
        self.moves = self.moves.saturating_add(1);
        self.score = self
            .scoring
            .after_selection(self.score, self.moves, &self.deck.board());
        log::trace!("flipped card {}, move {}, score {}", id, self.moves, self.score);

        Ok(if self.awaiting_resolution() {
            SelectOutcome::PairSelected
        } else {
            SelectOutcome::Flipped
        })
    }

    pub(crate) fn resolve(&mut self) -> ResolveOutcome {
        let &[first, second] = self.selection.as_slice() else {
            return ResolveOutcome::NoChange;
        };
        self.selection.clear();

        let matched = self.deck[first].symbol() == self.deck[second].symbol();
        let state = if matched {
            CardState::Matched
        } else {
            CardState::Hidden
        };
        for id in [first, second] {
            if let Some(card) = self.deck.card_mut(id) {
                card.set_state(state);
            }
        }

        if !matched {
            log::debug!("cards {} and {} do not match", first, second);
            return ResolveOutcome::Mismatch;
        }

        self.matched_pairs += 1;
        self.score = self.scoring.after_match(self.score);
        log::debug!(
            "cards {} and {} match, {}/{} pairs found",
            first,
            second,
            self.matched_pairs,
            self.pair_count()
        );

        if self.matched_pairs == self.pair_count() {
            self.status = SessionStatus::Won;
            log::debug!(
                "session {} won in {} moves, {}",
                self.generation,
                self.moves,
                self.elapsed()
            );
            ResolveOutcome::Won
        } else {
            ResolveOutcome::Match
        }
    }

    pub(crate) fn reveal_hint(&mut self) -> HintOutcome {
        if self.status.is_finished() || self.hints_remaining == 0 {
            return HintOutcome::NoChange;
        }

        let Some(pair) = find_hint_pair(self.deck.cards()) else {
            return HintOutcome::NoChange;
        };

        for id in pair {
            if let Some(card) = self.deck.card_mut(id) {
                card.set_state(CardState::Flipped);
            }
        }
        self.hints_remaining -= 1;
        log::debug!("hint reveals {:?}, {} left", pair, self.hints_remaining);

        HintOutcome::Revealed(pair)
    }

    /// Turns hinted cards face down again, cards that left the flipped state are kept.
    pub(crate) fn hide_hint(&mut self, pair: [CardId; 2]) -> bool {
        let mut changed = false;
        for id in pair {
            if self.selection.contains(&id) {
                continue;
            }
            if let Some(card) = self.deck.card_mut(id) {
                if card.state() == CardState::Flipped {
                    card.set_state(CardState::Hidden);
                    changed = true;
                }
            }
        }
        changed
    }

    pub(crate) fn tick(&mut self) -> TickOutcome {
        if self.status.is_finished() {
            return TickOutcome::NoChange;
        }
        self.elapsed_secs = self.elapsed_secs.saturating_add(1);
        TickOutcome::Ticked
    }
}
