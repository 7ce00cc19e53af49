use crate::Card;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const BLACKJACK: u8 = 21;

/// Calculate the value of a blackjack hand.
///
/// Non-ace cards are summed first, then each ace is counted as 11 unless that
/// would take the running total past 21, in which case it counts as 1. One
/// point is held back for every ace still to be counted, so `[K, A, A]` is 12
/// rather than 22.
pub fn calculate_hand_value(cards: &[Card]) -> u8 {
    let mut total = cards
        .iter()
        .filter(|c| !c.is_ace())
        .fold(0u8, |acc, c| acc.saturating_add(c.value()));
    let mut aces_left = cards.iter().filter(|c| c.is_ace()).count() as u8;

    while aces_left > 0 {
        aces_left -= 1;
        if total.saturating_add(11).saturating_add(aces_left) <= BLACKJACK {
            total += 11;
        } else {
            total = total.saturating_add(1);
        }
    }

    total
}

/// Total with every ace counted as 1
fn hard_total(cards: &[Card]) -> u8 {
    cards
        .iter()
        .map(|c| if c.is_ace() { 1 } else { c.value() })
        .fold(0u8, |acc, v| acc.saturating_add(v))
}

/// Check if a hand is soft (has an ace counted as 11)
pub fn is_soft_hand(cards: &[Card]) -> bool {
    cards.iter().any(|c| c.is_ace()) && calculate_hand_value(cards) == hard_total(cards) + 10
}

/// Check if a hand is busted
pub fn is_busted(cards: &[Card]) -> bool {
    calculate_hand_value(cards) > BLACKJACK
}

/// Check if a hand is a natural: 21 on exactly two cards, one of them ten-valued
pub fn is_blackjack(cards: &[Card]) -> bool {
    cards.len() == 2
        && calculate_hand_value(cards) == BLACKJACK
        && cards.iter().any(|c| c.rank.is_ten_value())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    pub cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        Self {
            cards: cards.into_iter().collect(),
        }
    }

    pub fn value(&self) -> u8 {
        calculate_hand_value(&self.cards)
    }

    pub fn is_soft(&self) -> bool {
        is_soft_hand(&self.cards)
    }

    pub fn is_busted(&self) -> bool {
        is_busted(&self.cards)
    }

    pub fn is_blackjack(&self) -> bool {
        is_blackjack(&self.cards)
    }

    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn first(&self) -> Option<&Card> {
        self.cards.first()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, card) in self.cards.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{card}")?;
        }
        Ok(())
    }
}
