//! Seams between the engine and whatever sits at the table.
//!
//! The engine never touches a terminal. It asks a [`PlayerInput`] for bets and
//! decisions and hands render-ready data to a [`TableView`]. All calls block
//! until the collaborator has an answer; returning [`GameError::Aborted`]
//! abandons the session at that point.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{DecisionError, GameError};
use crate::{Bankrolls, Card, Chips, Hand};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    Hit,
    Stand,
}

impl FromStr for Decision {
    type Err = DecisionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hit" => Ok(Decision::Hit),
            "stand" => Ok(Decision::Stand),
            other => Err(DecisionError::Unrecognized(other.to_string())),
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Hit => write!(f, "Hit"),
            Decision::Stand => write!(f, "Stand"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Party {
    Player,
    Dealer,
}

/// Yes/no questions the session asks between rounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    /// After a settled round while the player still has chips
    AnotherRound,
    /// After a bankroll has run dry
    PlayAgain,
    /// After the player walked away from a session
    NewSession,
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prompt::AnotherRound => write!(f, "Would you like to play another round? (y/n)"),
            Prompt::PlayAgain => write!(f, "Would you like to play again? (y/n)"),
            Prompt::NewSession => write!(f, "Would you like to start a new game? (y/n)"),
        }
    }
}

/// Source of player choices
pub trait PlayerInput {
    /// A bet in `min..=max`. Implementations re-prompt on malformed input.
    fn request_bet(&mut self, min: Chips, max: Chips) -> Result<Chips, GameError>;

    /// Hit or stand for `player` with the dealer showing `dealer_up`.
    fn request_decision(&mut self, player: &Hand, dealer_up: &Card) -> Result<Decision, GameError>;

    fn request_yes_no(&mut self, prompt: Prompt) -> Result<bool, GameError>;
}

/// Sink for everything the player gets to see
pub trait TableView {
    fn show_bankrolls(&mut self, bankrolls: &Bankrolls) -> Result<(), GameError>;

    /// With `reveal_all` unset only the first card of the hand is face up.
    fn show_hand(&mut self, party: Party, hand: &Hand, reveal_all: bool) -> Result<(), GameError>;

    fn show_outcome(
        &mut self,
        message: &str,
        dealer_total: u8,
        player_total: u8,
    ) -> Result<(), GameError>;

    fn show_message(&mut self, message: &str) -> Result<(), GameError>;
}

/// Anything that can both take input and display the table
pub trait Table: PlayerInput + TableView {}

impl<T: PlayerInput + TableView> Table for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_parse_is_case_insensitive() {
        assert_eq!("hit".parse::<Decision>(), Ok(Decision::Hit));
        assert_eq!("HIT".parse::<Decision>(), Ok(Decision::Hit));
        assert_eq!(" Stand\n".parse::<Decision>(), Ok(Decision::Stand));
    }

    #[test]
    fn test_decision_parse_rejects_other_tokens() {
        assert_eq!(
            "double".parse::<Decision>(),
            Err(DecisionError::Unrecognized("double".to_string()))
        );
        assert!("h".parse::<Decision>().is_err());
        assert_eq!(
            DecisionError::Unrecognized(String::new()).to_string(),
            "Invalid input...Please enter a hit or stand."
        );
    }

    #[test]
    fn test_prompt_text() {
        assert_eq!(
            Prompt::AnotherRound.to_string(),
            "Would you like to play another round? (y/n)"
        );
        assert_eq!(Prompt::PlayAgain.to_string(), "Would you like to play again? (y/n)");
    }
}
