use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

use crate::card::{Rank, Suit};
use crate::error::DeckError;
use crate::Card;

pub const DECK_SIZE: usize = 52;

/// A single 52-card deck. The top of the deck is the end of `cards`.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Unshuffled deck, suits Hearts..Spades, ranks Two..Ace within each suit.
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push(Card::new(rank, suit));
            }
        }
        Self { cards }
    }

    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::standard();
        deck.cards.shuffle(rng);
        deck
    }

    /// Full deck with `top` drawn first, in order, and the rest of a standard deck beneath.
    pub fn stacked(top: &[Card]) -> Result<Self, DeckError> {
        let mut seen = HashSet::with_capacity(top.len());
        for card in top {
            if !seen.insert(*card) {
                return Err(DeckError::Duplicate(*card));
            }
        }

        let mut cards: Vec<Card> = Self::standard()
            .cards
            .into_iter()
            .filter(|c| !seen.contains(c))
            .collect();
        cards.extend(top.iter().rev().copied());
        Ok(Self { cards })
    }

    /// Draw the top card.
    ///
    /// # Panics
    ///
    /// When the deck is empty. A round never draws more than a fraction of the deck.
    pub fn draw(&mut self) -> Card {
        self.cards
            .pop()
            .expect("drew from an empty deck; a single round cannot exhaust 52 cards")
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Remaining cards, bottom first.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::standard()
    }
}
