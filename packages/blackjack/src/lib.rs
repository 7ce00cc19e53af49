mod bet;
mod card;
mod deck;
pub mod error;
mod hand;
mod round;
mod rules;
mod session;
mod settlement;
pub mod strategy;
pub mod table;

pub use bet::{Bet, Chips};
pub use card::{Card, Rank, Suit};
pub use deck::{Deck, DECK_SIZE};
pub use error::{BetError, DecisionError, DeckError, GameError, RoundError, RulesError};
pub use hand::{calculate_hand_value, is_blackjack, is_busted, is_soft_hand, Hand, BLACKJACK};
pub use round::{dealer_should_hit, Round, RoundPhase};
pub use rules::{GameRules, PayoutRatio, DEALER_STANDS_ON};
pub use session::{
    OutcomeTally, Session, SessionSummary, FAREWELL, HOUSE_BROKE, OUT_OF_MONEY, RESTARTING,
};
pub use settlement::{settle, Bankrolls, RoundOutcome, Settlement};
pub use strategy::{optimal_move, AutoPlayer};
pub use table::{Decision, Party, PlayerInput, Prompt, Table, TableView};
