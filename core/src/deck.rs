use alloc::string::String;
use alloc::vec::Vec;
use core::ops::Index;
use hashbrown::HashMap;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::*;

/// Cards of one session in board order, a card's id is its position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    board: BoardConfig,
    cards: Vec<Card>,
}

impl Deck {
    /// Lays symbols out in the given order, the result must pair every symbol exactly twice.
    pub fn from_symbols(board: BoardConfig, symbols: Vec<String>) -> Result<Self> {
        let cards = symbols
            .into_iter()
            .enumerate()
            .map(|(index, symbol)| {
                let id = CardId::try_from(index).map_err(|_| GameError::InvalidBoardShape)?;
                Ok(Card::new(id, symbol))
            })
            .collect::<Result<Vec<_>>>()?;

        let deck = Self { board, cards };
        deck.validate()?;
        Ok(deck)
    }

    pub fn validate(&self) -> Result<()> {
        if self.cards.len() != self.board.total_cards()
            || self.board.grid_cells() != self.board.total_cards()
        {
            return Err(GameError::InvalidBoardShape);
        }

        let mut counts: HashMap<&str, u8> = HashMap::with_capacity(self.board.pair_count.into());
        for card in &self.cards {
            *counts.entry(card.symbol()).or_default() += 1;
        }

        if counts.len() != usize::from(self.board.pair_count) || counts.values().any(|&n| n != 2)
        {
            return Err(GameError::InvalidBoardShape);
        }

        Ok(())
    }

    pub fn board(&self) -> BoardConfig {
        self.board
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.get(usize::from(id))
    }

    pub(crate) fn card_mut(&mut self, id: CardId) -> Option<&mut Card> {
        self.cards.get_mut(usize::from(id))
    }

    pub fn validate_id(&self, id: CardId) -> Result<CardId> {
        if usize::from(id) < self.cards.len() {
            Ok(id)
        } else {
            Err(GameError::InvalidCardId)
        }
    }
}

impl Index<CardId> for Deck {
    type Output = Card;

    fn index(&self, id: CardId) -> &Self::Output {
        &self.cards[usize::from(id)]
    }
}

/// Every chosen symbol twice, unshuffled.
fn paired_symbols(deal: &DealConfig) -> Vec<String> {
    let mut symbols = Vec::with_capacity(deal.board.total_cards());
    symbols.extend_from_slice(&deal.symbols);
    symbols.extend_from_slice(&deal.symbols);
    symbols
}

pub trait DeckGenerator {
    fn generate(&mut self, deal: &DealConfig) -> Result<Deck>;
}

impl<G: DeckGenerator + ?Sized> DeckGenerator for &mut G {
    fn generate(&mut self, deal: &DealConfig) -> Result<Deck> {
        (**self).generate(deal)
    }
}

/// Deals a uniformly shuffled deck from a seeded stream, every call continues the same stream.
#[derive(Clone, Debug)]
pub struct RandomDeckGenerator {
    rng: SmallRng,
}

impl RandomDeckGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl DeckGenerator for RandomDeckGenerator {
    fn generate(&mut self, deal: &DealConfig) -> Result<Deck> {
        let mut symbols = paired_symbols(deal);
        symbols.shuffle(&mut self.rng);
        log::debug!(
            "dealt {} cards for {}/{}",
            symbols.len(),
            deal.difficulty,
            deal.theme
        );
        Deck::from_symbols(deal.board, symbols)
    }
}

/// Deals without shuffling: card `i` pairs with card `i + pair_count`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct OrderedDeckGenerator;

impl DeckGenerator for OrderedDeckGenerator {
    fn generate(&mut self, deal: &DealConfig) -> Result<Deck> {
        Deck::from_symbols(deal.board, paired_symbols(deal))
    }
}

/// Deals a fresh deck for `deal` with the given generator.
pub fn build_deck(deal: &DealConfig, generator: &mut impl DeckGenerator) -> Result<Deck> {
    generator.generate(deal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn deal(difficulty: Difficulty) -> DealConfig {
        resolve_config_for(difficulty, "animals", &ThemeCatalog::builtin()).unwrap()
    }

    #[test]
    fn every_symbol_is_dealt_twice() {
        for difficulty in Difficulty::ALL {
            let deal = deal(difficulty);
            let deck = build_deck(&deal, &mut RandomDeckGenerator::new(7)).unwrap();

            assert_eq!(deck.len(), deal.board.total_cards());
            for symbol in &deal.symbols {
                let copies = deck.cards().iter().filter(|c| c.symbol() == symbol).count();
                assert_eq!(copies, 2, "{symbol} in {difficulty}");
            }
        }
    }

    #[test]
    fn ids_follow_positions_and_cards_start_hidden() {
        let deck = build_deck(&deal(Difficulty::Medium), &mut RandomDeckGenerator::new(1)).unwrap();

        for (index, card) in deck.cards().iter().enumerate() {
            assert_eq!(usize::from(card.id()), index);
            assert_eq!(card.state(), CardState::Hidden);
        }
    }

    #[test]
    fn ordered_generator_pairs_card_with_offset() {
        let deal = deal(Difficulty::Easy);
        let deck = build_deck(&deal, &mut OrderedDeckGenerator).unwrap();

        for id in 0..8 {
            assert_eq!(deck[id].symbol(), deck[id + 8].symbol());
        }
    }

    #[test]
    fn medium_deck_pairs_twelve_symbols() {
        let deal = deal(Difficulty::Medium);
        let deck = build_deck(&deal, &mut RandomDeckGenerator::new(3)).unwrap();

        assert_eq!(deck.len(), 24);
        assert_eq!(deal.symbols, &ANIMALS[..]);
        for symbol in ANIMALS {
            let copies = deck.cards().iter().filter(|c| c.symbol() == symbol).count();
            assert_eq!(copies, 2, "{symbol}");
        }
    }

    #[test]
    fn unpaired_symbols_are_rejected() {
        let board = BoardConfig::new(1, 4, 2).unwrap();
        let symbols = vec!["a", "a", "a", "b"].into_iter().map(String::from).collect();

        assert_eq!(
            Deck::from_symbols(board, symbols),
            Err(GameError::InvalidBoardShape)
        );
    }

    #[test]
    fn shuffle_spreads_symbols_uniformly() {
        const TRIALS: u32 = 16_000;

        let deal = deal(Difficulty::Easy);
        let target = deal.symbols[0].as_str();
        let mut generator = RandomDeckGenerator::new(0x5eed);
        let mut hits = [0u32; 16];

        for _ in 0..TRIALS {
            let deck = generator.generate(&deal).unwrap();
            for card in deck.cards() {
                if card.symbol() == target {
                    hits[usize::from(card.id())] += 1;
                }
            }
        }

        // each position holds the target symbol with probability 2/16
        let expected = TRIALS * 2 / 16;
        for (position, &count) in hits.iter().enumerate() {
            assert!(
                count.abs_diff(expected) < expected / 8,
                "position {position} got {count}, expected about {expected}"
            );
        }
    }
}
