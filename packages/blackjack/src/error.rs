use thiserror::Error;

use crate::{Card, Chips, RoundPhase};

/// Rejected bet input. The player is asked again; nothing is mutated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BetError {
    #[error("Please enter a valid number.")]
    NotANumber(String),
    #[error("Invalid bet. You can bet between $1 and ${bankroll}.")]
    NotPositive { bet: Chips, bankroll: Chips },
    #[error("Invalid bet. You can bet between $1 and ${bankroll}.")]
    ExceedsBankroll { bet: Chips, bankroll: Chips },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecisionError {
    #[error("Invalid input...Please enter a hit or stand.")]
    Unrecognized(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RulesError {
    #[error("Starting bankroll must be positive, got {0}")]
    NonPositiveBankroll(Chips),
    #[error("Denominator cannot be zero")]
    ZeroDenominator,
    #[error("Invalid payout ratio '{0}', expected N:D (e.g. 3:2)")]
    MalformedPayout(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeckError {
    #[error("Card {0} is stacked more than once")]
    Duplicate(Card),
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundError {
    #[error("Cannot {action} during {phase:?}")]
    OutOfTurn {
        action: &'static str,
        phase: RoundPhase,
    },
}

/// Failure surfaced by a table collaborator or the engine driving it.
#[derive(Error, Debug)]
pub enum GameError {
    #[error("Table closed by the player")]
    Aborted,
    #[error("Terminal error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Round(#[from] RoundError),
}
