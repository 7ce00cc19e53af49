use serde::{Deserialize, Serialize};

use crate::hand::BLACKJACK;
use crate::{Bet, Chips, Hand, PayoutRatio};

/// Player and house balances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bankrolls {
    pub player: Chips,
    pub house: Chips,
}

impl Bankrolls {
    pub fn new(player: Chips, house: Chips) -> Self {
        Self { player, house }
    }

    /// Balances saturate at the `Chips` bounds.
    pub fn apply(self, player_delta: Chips, house_delta: Chips) -> Self {
        Self {
            player: self.player.saturating_add(player_delta),
            house: self.house.saturating_add(house_delta),
        }
    }

    pub fn total(&self) -> Chips {
        self.player.saturating_add(self.house)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundOutcome {
    PlayerBust,
    PlayerBlackjack,
    DealerBust,
    PlayerHigher,
    DealerHigher,
    Push,
}

impl RoundOutcome {
    pub const ALL: [RoundOutcome; 6] = [
        RoundOutcome::PlayerBust,
        RoundOutcome::PlayerBlackjack,
        RoundOutcome::DealerBust,
        RoundOutcome::PlayerHigher,
        RoundOutcome::DealerHigher,
        RoundOutcome::Push,
    ];

    /// Decide the outcome, first matching rule wins
    pub fn resolve(player: &Hand, dealer: &Hand) -> Self {
        let player_total = player.value();
        let dealer_total = dealer.value();

        if player_total > BLACKJACK {
            RoundOutcome::PlayerBust
        } else if player.is_blackjack() {
            RoundOutcome::PlayerBlackjack
        } else if dealer_total > BLACKJACK {
            RoundOutcome::DealerBust
        } else if player_total > dealer_total {
            RoundOutcome::PlayerHigher
        } else if player_total < dealer_total {
            RoundOutcome::DealerHigher
        } else {
            RoundOutcome::Push
        }
    }

    pub fn player_wins(&self) -> bool {
        matches!(
            self,
            RoundOutcome::PlayerBlackjack | RoundOutcome::DealerBust | RoundOutcome::PlayerHigher
        )
    }

    pub fn message(&self, dealer_total: u8) -> String {
        let headline = match self {
            RoundOutcome::PlayerBust => "Dealer wins, Player busted!",
            RoundOutcome::PlayerBlackjack => "Blackjack! Player wins!",
            RoundOutcome::DealerBust => "Player wins! Dealer Busted!",
            RoundOutcome::PlayerHigher => "Player wins!",
            RoundOutcome::DealerHigher => "Dealer wins!",
            RoundOutcome::Push => "It's a tie!",
        };
        format!("{headline} Dealer's final score: {dealer_total}")
    }
}

/// Result of settling one round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub outcome: RoundOutcome,
    pub message: String,
    pub bet: Chips,
    pub player_total: u8,
    pub dealer_total: u8,
    pub player_delta: Chips,
    pub house_delta: Chips,
    /// Balances after the deltas are applied
    pub bankrolls: Bankrolls,
}

/// Settle a finished round against the balances it was played from.
pub fn settle(
    player: &Hand,
    dealer: &Hand,
    bet: Bet,
    bankrolls: Bankrolls,
    blackjack_payout: PayoutRatio,
) -> Settlement {
    let outcome = RoundOutcome::resolve(player, dealer);
    let stake = bet.amount();

    let player_delta = match outcome {
        RoundOutcome::PlayerBust | RoundOutcome::DealerHigher => -stake,
        RoundOutcome::PlayerBlackjack => blackjack_payout.calculate_payout(stake),
        RoundOutcome::DealerBust | RoundOutcome::PlayerHigher => stake,
        RoundOutcome::Push => 0,
    };
    let house_delta = -player_delta;
    let dealer_total = dealer.value();

    Settlement {
        outcome,
        message: outcome.message(dealer_total),
        bet: stake,
        player_total: player.value(),
        dealer_total,
        player_delta,
        house_delta,
        bankrolls: bankrolls.apply(player_delta, house_delta),
    }
}
