use serde::{Deserialize, Serialize};

use crate::error::{GameError, RoundError};
use crate::hand::BLACKJACK;
use crate::rules::DEALER_STANDS_ON;
use crate::settlement::settle;
use crate::table::{Decision, Party, Table};
use crate::{Bankrolls, Bet, Card, Deck, Hand, PayoutRatio, Settlement};

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    AwaitingBet,
    Dealt,
    PlayerTurn,
    DealerTurn,
    Settled,
}

/// The dealer draws on anything below 17, soft or hard.
pub fn dealer_should_hit(cards: &[Card]) -> bool {
    crate::calculate_hand_value(cards) < DEALER_STANDS_ON
}

/// One round of play: its own deck, both hands and the wager.
#[derive(Debug, Clone)]
pub struct Round {
    deck: Deck,
    bet: Bet,
    player: Hand,
    dealer: Hand,
    phase: RoundPhase,
    dealer_done: bool,
}

impl Round {
    /// Deal two cards to the player, then two to the dealer, off the top of `deck`.
    pub fn deal(bet: Bet, mut deck: Deck) -> Self {
        let mut player = Hand::new();
        let mut dealer = Hand::new();
        player.add_card(deck.draw());
        player.add_card(deck.draw());
        dealer.add_card(deck.draw());
        dealer.add_card(deck.draw());

        log::info!(
            "Dealt {} ({}) for ${}, dealer shows {}",
            player,
            player.value(),
            bet.amount(),
            dealer.cards[0]
        );

        Self {
            deck,
            bet,
            player,
            dealer,
            phase: RoundPhase::Dealt,
            dealer_done: false,
        }
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn bet(&self) -> Bet {
        self.bet
    }

    pub fn player_hand(&self) -> &Hand {
        &self.player
    }

    pub fn dealer_hand(&self) -> &Hand {
        &self.dealer
    }

    /// The dealer card shown face up; the second stays hidden until settlement
    pub fn dealer_up_card(&self) -> Card {
        self.dealer.cards[0]
    }

    pub fn cards_left(&self) -> usize {
        self.deck.len()
    }

    /// True while the player is on turn and still below 21
    pub fn needs_decision(&self) -> bool {
        self.phase == RoundPhase::PlayerTurn && self.player.value() < BLACKJACK
    }

    fn out_of_turn(&self, action: &'static str) -> RoundError {
        RoundError::OutOfTurn {
            action,
            phase: self.phase,
        }
    }

    pub fn start_player_turn(&mut self) -> Result<(), RoundError> {
        if self.phase != RoundPhase::Dealt {
            return Err(self.out_of_turn("start the player turn"));
        }
        self.phase = RoundPhase::PlayerTurn;
        if !self.needs_decision() {
            self.end_player_turn();
        }
        Ok(())
    }

    pub fn hit(&mut self) -> Result<Card, RoundError> {
        if !self.needs_decision() {
            return Err(self.out_of_turn("hit"));
        }
        let card = self.deck.draw();
        self.player.add_card(card);
        log::debug!("Player hits {card}, total {}", self.player.value());

        if self.player.value() >= BLACKJACK {
            self.end_player_turn();
        }
        Ok(card)
    }

    pub fn stand(&mut self) -> Result<(), RoundError> {
        if !self.needs_decision() {
            return Err(self.out_of_turn("stand"));
        }
        log::debug!("Player stands on {}", self.player.value());
        self.end_player_turn();
        Ok(())
    }

    /// Apply a decision, returning the card drawn on a hit
    pub fn apply(&mut self, decision: Decision) -> Result<Option<Card>, RoundError> {
        match decision {
            Decision::Hit => self.hit().map(Some),
            Decision::Stand => self.stand().map(|()| None),
        }
    }

    // A busted player stays in PlayerTurn; settlement skips the dealer.
    fn end_player_turn(&mut self) {
        if self.player.is_busted() {
            log::debug!("Player busts with {}", self.player.value());
        } else {
            self.phase = RoundPhase::DealerTurn;
        }
    }

    /// Draw for the dealer until 17 or more, returning the drawn cards
    pub fn play_dealer(&mut self) -> Result<Vec<Card>, RoundError> {
        if self.phase != RoundPhase::DealerTurn || self.dealer_done {
            return Err(self.out_of_turn("play the dealer"));
        }
        let mut drawn = Vec::new();
        while dealer_should_hit(&self.dealer.cards) {
            let card = self.deck.draw();
            self.dealer.add_card(card);
            log::debug!("Dealer draws {card}, total {}", self.dealer.value());
            drawn.push(card);
        }
        self.dealer_done = true;
        Ok(drawn)
    }

    fn ready_to_settle(&self) -> bool {
        match self.phase {
            RoundPhase::PlayerTurn => self.player.is_busted(),
            RoundPhase::DealerTurn => self.dealer_done,
            _ => false,
        }
    }

    pub fn settle(
        &mut self,
        bankrolls: Bankrolls,
        blackjack_payout: PayoutRatio,
    ) -> Result<Settlement, RoundError> {
        if !self.ready_to_settle() {
            return Err(self.out_of_turn("settle"));
        }
        let settlement = settle(
            &self.player,
            &self.dealer,
            self.bet,
            bankrolls,
            blackjack_payout,
        );
        self.phase = RoundPhase::Settled;
        log::info!(
            "{:?}: player {} vs dealer {}, player {:+}",
            settlement.outcome,
            settlement.player_total,
            settlement.dealer_total,
            settlement.player_delta
        );
        Ok(settlement)
    }

    /// Drive the round from the deal to settlement against `table`.
    pub fn play<T: Table + ?Sized>(
        &mut self,
        table: &mut T,
        bankrolls: Bankrolls,
        blackjack_payout: PayoutRatio,
    ) -> Result<Settlement, GameError> {
        table.show_hand(Party::Dealer, &self.dealer, false)?;
        self.start_player_turn()?;

        loop {
            table.show_hand(Party::Player, &self.player, true)?;
            if !self.needs_decision() {
                break;
            }
            let decision = table.request_decision(&self.player, &self.dealer_up_card())?;
            self.apply(decision)?;
        }

        if self.phase == RoundPhase::DealerTurn {
            self.play_dealer()?;
        }
        let settlement = self.settle(bankrolls, blackjack_payout)?;

        table.show_hand(Party::Dealer, &self.dealer, true)?;
        table.show_hand(Party::Player, &self.player, true)?;
        table.show_outcome(
            &settlement.message,
            settlement.dealer_total,
            settlement.player_total,
        )?;
        Ok(settlement)
    }
}
