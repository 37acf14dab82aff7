use crate::*;

/// First face-down card that still has a face-down partner, together with that partner.
pub fn find_hint_pair(cards: &[Card]) -> Option<[CardId; 2]> {
    let face_down = || cards.iter().filter(|card| card.state().is_hidden());

    face_down().find_map(|first| {
        face_down()
            .find(|other| other.id() != first.id() && other.symbol() == first.symbol())
            .map(|partner| [first.id(), partner.id()])
    })
}
