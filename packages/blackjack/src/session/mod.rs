use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::table::{Prompt, Table};
use crate::{Bankrolls, Bet, Deck, GameRules, Round, RoundOutcome, Settlement};

pub const OUT_OF_MONEY: &str = "You've run out of money!";
pub const HOUSE_BROKE: &str = "The house is broke!";
pub const RESTARTING: &str = "Restarting the game...";
pub const FAREWELL: &str = "Thank you for playing!";

/// Count of settled rounds per outcome
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeTally {
    pub player_bust: u32,
    pub player_blackjack: u32,
    pub dealer_bust: u32,
    pub player_higher: u32,
    pub dealer_higher: u32,
    pub push: u32,
}

impl OutcomeTally {
    pub fn record(&mut self, outcome: RoundOutcome) {
        *self.slot(outcome) += 1;
    }

    pub fn get(&self, outcome: RoundOutcome) -> u32 {
        match outcome {
            RoundOutcome::PlayerBust => self.player_bust,
            RoundOutcome::PlayerBlackjack => self.player_blackjack,
            RoundOutcome::DealerBust => self.dealer_bust,
            RoundOutcome::PlayerHigher => self.player_higher,
            RoundOutcome::DealerHigher => self.dealer_higher,
            RoundOutcome::Push => self.push,
        }
    }

    fn slot(&mut self, outcome: RoundOutcome) -> &mut u32 {
        match outcome {
            RoundOutcome::PlayerBust => &mut self.player_bust,
            RoundOutcome::PlayerBlackjack => &mut self.player_blackjack,
            RoundOutcome::DealerBust => &mut self.dealer_bust,
            RoundOutcome::PlayerHigher => &mut self.player_higher,
            RoundOutcome::DealerHigher => &mut self.dealer_higher,
            RoundOutcome::Push => &mut self.push,
        }
    }

    pub fn total(&self) -> u32 {
        RoundOutcome::ALL.iter().map(|o| self.get(*o)).sum()
    }

    pub fn player_wins(&self) -> u32 {
        RoundOutcome::ALL
            .iter()
            .filter(|o| o.player_wins())
            .map(|o| self.get(*o))
            .sum()
    }
}

/// What happened over the life of a [`Session`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Sessions started, counting the first one and every restart
    pub sessions: u32,
    pub rounds: u32,
    pub bankrolls: Bankrolls,
    /// Player winnings across every round, restarts included
    pub player_net: i64,
    pub outcomes: OutcomeTally,
}

/// Owns the bankrolls and the shuffle source; plays rounds until the player walks away.
pub struct Session<R: Rng> {
    rules: GameRules,
    bankrolls: Bankrolls,
    rng: R,
    sessions: u32,
    rounds: u32,
    player_net: i64,
    outcomes: OutcomeTally,
}

impl<R: Rng> Session<R> {
    pub fn new(rules: GameRules, rng: R) -> Self {
        log::info!(
            "Starting session with ${} against a ${} house",
            rules.player_bankroll,
            rules.house_bankroll
        );
        Self {
            rules,
            bankrolls: Bankrolls::new(rules.player_bankroll, rules.house_bankroll),
            rng,
            sessions: 1,
            rounds: 0,
            player_net: 0,
            outcomes: OutcomeTally::default(),
        }
    }

    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    pub fn bankrolls(&self) -> Bankrolls {
        self.bankrolls
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            sessions: self.sessions,
            rounds: self.rounds,
            bankrolls: self.bankrolls,
            player_net: self.player_net,
            outcomes: self.outcomes,
        }
    }

    /// Reset both bankrolls to their starting values and count a new session.
    pub fn restart(&mut self) {
        self.bankrolls = Bankrolls::new(self.rules.player_bankroll, self.rules.house_bankroll);
        self.sessions += 1;
        log::info!("Session {} started", self.sessions);
    }

    /// Announcement for a bankroll that can no longer cover a round
    fn broke_message(&self) -> Option<&'static str> {
        if self.bankrolls.player <= 0 {
            Some(OUT_OF_MONEY)
        } else if self.bankrolls.house <= 0 {
            Some(HOUSE_BROKE)
        } else {
            None
        }
    }

    /// Ask until the table hands back an amount the player can cover.
    pub fn place_bet<T: Table + ?Sized>(&mut self, table: &mut T) -> Result<Bet, GameError> {
        table.show_bankrolls(&self.bankrolls)?;
        let bankroll = self.bankrolls.player;
        loop {
            let amount = table.request_bet(1, bankroll)?;
            match Bet::new(amount, bankroll) {
                Ok(bet) => return Ok(bet),
                Err(e) => {
                    log::warn!("Rejected bet of {amount}: {e}");
                    table.show_message(&e.to_string())?;
                }
            }
        }
    }

    /// Take a bet, play one round on a freshly shuffled deck and apply the result.
    pub fn play_round<T: Table + ?Sized>(&mut self, table: &mut T) -> Result<Settlement, GameError> {
        let bet = self.place_bet(table)?;
        let deck = Deck::shuffled(&mut self.rng);
        let mut round = Round::deal(bet, deck);
        let settlement = round.play(table, self.bankrolls, self.rules.blackjack_payout)?;

        self.bankrolls = settlement.bankrolls;
        self.rounds += 1;
        self.player_net = self.player_net.saturating_add(settlement.player_delta);
        self.outcomes.record(settlement.outcome);
        Ok(settlement)
    }

    /// Play until the player declines to go on, restarting whenever they ask to.
    pub fn run<T: Table + ?Sized>(&mut self, table: &mut T) -> Result<SessionSummary, GameError> {
        loop {
            if let Some(announcement) = self.broke_message() {
                table.show_message(announcement)?;
                if table.request_yes_no(Prompt::PlayAgain)? {
                    table.show_message(RESTARTING)?;
                    self.restart();
                    continue;
                }
                break;
            }

            self.play_round(table)?;

            if self.broke_message().is_some() {
                continue;
            }
            if !table.request_yes_no(Prompt::AnotherRound)? {
                table.show_message(&format!(
                    "Thanks for playing! You ended the game with ${}.",
                    self.bankrolls.player
                ))?;
                if table.request_yes_no(Prompt::NewSession)? {
                    self.restart();
                    continue;
                }
                break;
            }
        }

        table.show_message(FAREWELL)?;
        let summary = self.summary();
        log::info!(
            "Finished after {} rounds over {} sessions, player net {:+}",
            summary.rounds,
            summary.sessions,
            summary.player_net
        );
        Ok(summary)
    }
}
