use alloc::string::{String, ToString};
use alloc::vec::Vec;
use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};

use crate::*;

/// What a host may show for one card, the symbol stays secret while the card is face down.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardView {
    pub id: CardId,
    pub state: CardState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}

impl From<&Card> for CardView {
    fn from(card: &Card) -> Self {
        Self {
            id: card.id(),
            state: card.state(),
            symbol: card.visible_symbol().map(ToString::to_string),
        }
    }
}

/// Read-only copy of a session handed to hosts for rendering.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub generation: Generation,
    pub difficulty: Difficulty,
    pub theme: String,
    pub board: BoardConfig,
    pub cards: Vec<CardView>,
    pub selection: Vec<CardId>,
    pub matched_pairs: PairCount,
    pub moves: MoveCount,
    pub score: Score,
    pub elapsed_secs: Seconds,
    pub elapsed: String,
    pub hints_remaining: u8,
    pub status: SessionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<WinSummary>,
}

impl SessionSnapshot {
    pub fn from_session(session: &Session) -> Self {
        Self {
            generation: session.generation(),
            difficulty: session.difficulty(),
            theme: session.theme().to_string(),
            board: session.board(),
            cards: session.cards().iter().map(CardView::from).collect(),
            selection: session.selection().to_vec(),
            matched_pairs: session.matched_pairs(),
            moves: session.moves(),
            score: session.score(),
            elapsed_secs: session.elapsed_secs(),
            elapsed: session.elapsed(),
            hints_remaining: session.hints_remaining(),
            status: session.status(),
            summary: session.win_summary(),
        }
    }

    /// Row-major `rows × cols` view of the cards.
    pub fn grid(&self) -> Result<ArrayView2<'_, CardView>> {
        let shape = (usize::from(self.board.rows), usize::from(self.board.cols));
        ArrayView2::from_shape(shape, &self.cards).map_err(|_| GameError::InvalidBoardShape)
    }
}

impl From<&Session> for SessionSnapshot {
    fn from(session: &Session) -> Self {
        Self::from_session(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        let deal = resolve_config("easy", "food", &ThemeCatalog::builtin()).unwrap();
        let deck = build_deck(&deal, &mut OrderedDeckGenerator).unwrap();
        Session::new(Generation(4), &deal, deck, 3, ScoringPolicy::default())
    }

    #[test]
    fn face_down_symbols_are_not_exposed() {
        let mut session = session();
        session.select(2).unwrap();

        let snapshot = SessionSnapshot::from_session(&session);

        assert_eq!(snapshot.cards[2].symbol.as_deref(), Some("🍇"));
        assert!(
            snapshot
                .cards
                .iter()
                .filter(|card| card.id != 2)
                .all(|card| card.symbol.is_none())
        );
        assert_eq!(snapshot.grid().unwrap().dim(), (4, 4));
    }

    #[test]
    fn medium_grid_has_six_columns() {
        let deal = resolve_config("medium", "animals", &ThemeCatalog::builtin()).unwrap();
        let deck = build_deck(&deal, &mut OrderedDeckGenerator).unwrap();
        let session = Session::new(Generation(1), &deal, deck, 3, ScoringPolicy::default());

        let snapshot = SessionSnapshot::from_session(&session);
        let grid = snapshot.grid().unwrap();

        assert_eq!(grid.dim(), (4, 6));
        assert_eq!(grid[(1, 0)].id, 6);
        assert_eq!(grid[(3, 5)].id, 23);
    }

    #[test]
    fn mismatched_shape_is_reported() {
        let mut snapshot = SessionSnapshot::from_session(&session());
        snapshot.cards.pop();

        assert_eq!(snapshot.grid().err(), Some(GameError::InvalidBoardShape));
    }

    #[test]
    fn serializes_for_hosts() {
        let mut session = session();
        session.select(0).unwrap();
        session.select(8).unwrap();
        session.resolve();

        let json = serde_json::to_value(SessionSnapshot::from(&session)).unwrap();

        assert_eq!(json["difficulty"], "easy");
        assert_eq!(json["status"], "in_progress");
        assert_eq!(json["cards"][0]["state"], "matched");
        assert_eq!(json["cards"][0]["symbol"], "🍎");
        assert!(json["cards"][1].get("symbol").is_none());
        assert_eq!(json["score"], 50);
        assert_eq!(json["elapsed"], "00:00");
        assert!(json.get("summary").is_none());

        let back: SessionSnapshot = serde_json::from_value(json).unwrap();
        assert_eq!(back.generation, Generation(4));
    }
}
