use crate::error::GameError;
use crate::hand::{calculate_hand_value, is_soft_hand};
use crate::table::{Decision, Party, PlayerInput, Prompt, TableView};
use crate::{Bankrolls, Card, Chips, Hand};

/// Basic strategy restricted to hit and stand
pub fn optimal_move(player_cards: &[Card], dealer_up_card: &Card) -> Decision {
    let player_value = calculate_hand_value(player_cards);
    let dealer_value = dealer_up_card.value();

    if is_soft_hand(player_cards) {
        // Soft hands
        if player_value >= 19 {
            Decision::Stand
        } else if player_value == 18 {
            if dealer_value >= 9 {
                Decision::Hit
            } else {
                Decision::Stand
            }
        } else {
            Decision::Hit
        }
    } else {
        // Hard hands
        if player_value >= 17 {
            Decision::Stand
        } else if (13..=16).contains(&player_value) {
            if (2..=6).contains(&dealer_value) {
                Decision::Stand
            } else {
                Decision::Hit
            }
        } else if player_value == 12 {
            if (4..=6).contains(&dealer_value) {
                Decision::Stand
            } else {
                Decision::Hit
            }
        } else {
            Decision::Hit
        }
    }
}

/// Plays basic strategy with a flat bet for a fixed number of rounds, then walks away.
///
/// Bets are capped at the bankroll on offer. Every yes/no prompt is answered
/// with "no" except [`Prompt::AnotherRound`] while rounds remain.
#[derive(Debug, Clone)]
pub struct AutoPlayer {
    bet: Chips,
    rounds_left: u32,
    outcomes: Vec<String>,
}

impl AutoPlayer {
    pub fn new(bet: Chips, rounds: u32) -> Self {
        Self {
            bet,
            rounds_left: rounds,
            outcomes: Vec::new(),
        }
    }

    pub fn rounds_left(&self) -> u32 {
        self.rounds_left
    }

    /// Outcome messages in the order they were shown
    pub fn outcomes(&self) -> &[String] {
        &self.outcomes
    }
}

impl PlayerInput for AutoPlayer {
    fn request_bet(&mut self, min: Chips, max: Chips) -> Result<Chips, GameError> {
        self.rounds_left = self.rounds_left.saturating_sub(1);
        Ok(self.bet.clamp(min, max.max(min)))
    }

    fn request_decision(&mut self, player: &Hand, dealer_up: &Card) -> Result<Decision, GameError> {
        Ok(optimal_move(&player.cards, dealer_up))
    }

    fn request_yes_no(&mut self, prompt: Prompt) -> Result<bool, GameError> {
        Ok(prompt == Prompt::AnotherRound && self.rounds_left > 0)
    }
}

impl TableView for AutoPlayer {
    fn show_bankrolls(&mut self, bankrolls: &Bankrolls) -> Result<(), GameError> {
        log::trace!("Bankrolls {}/{}", bankrolls.player, bankrolls.house);
        Ok(())
    }

    fn show_hand(&mut self, _party: Party, _hand: &Hand, _reveal_all: bool) -> Result<(), GameError> {
        Ok(())
    }

    fn show_outcome(
        &mut self,
        message: &str,
        _dealer_total: u8,
        _player_total: u8,
    ) -> Result<(), GameError> {
        self.outcomes.push(message.to_string());
        Ok(())
    }

    fn show_message(&mut self, message: &str) -> Result<(), GameError> {
        log::debug!("{message}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Rank, Suit};

    fn cards(ranks: &[Rank]) -> Vec<Card> {
        ranks
            .iter()
            .zip(Suit::ALL.iter().cycle())
            .map(|(&r, &s)| Card::new(r, s))
            .collect()
    }

    fn up(rank: Rank) -> Card {
        Card::new(rank, Suit::Clubs)
    }

    #[test]
    fn test_hard_17_stands() {
        let hand = cards(&[Rank::Ten, Rank::Seven]);
        assert_eq!(optimal_move(&hand, &up(Rank::Ace)), Decision::Stand);
    }

    #[test]
    fn test_hard_16_against_high_card_hits() {
        let hand = cards(&[Rank::Ten, Rank::Six]);
        assert_eq!(optimal_move(&hand, &up(Rank::Ten)), Decision::Hit);
        assert_eq!(optimal_move(&hand, &up(Rank::Six)), Decision::Stand);
    }

    #[test]
    fn test_hard_12() {
        let hand = cards(&[Rank::Ten, Rank::Two]);
        assert_eq!(optimal_move(&hand, &up(Rank::Three)), Decision::Hit);
        assert_eq!(optimal_move(&hand, &up(Rank::Four)), Decision::Stand);
        assert_eq!(optimal_move(&hand, &up(Rank::Seven)), Decision::Hit);
    }

    #[test]
    fn test_soft_hands() {
        let soft_18 = cards(&[Rank::Ace, Rank::Seven]);
        assert_eq!(optimal_move(&soft_18, &up(Rank::Eight)), Decision::Stand);
        assert_eq!(optimal_move(&soft_18, &up(Rank::Nine)), Decision::Hit);

        let soft_17 = cards(&[Rank::Ace, Rank::Six]);
        assert_eq!(optimal_move(&soft_17, &up(Rank::Six)), Decision::Hit);

        let soft_19 = cards(&[Rank::Ace, Rank::Eight]);
        assert_eq!(optimal_move(&soft_19, &up(Rank::Ace)), Decision::Stand);
    }

    #[test]
    fn test_low_totals_always_hit() {
        let hand = cards(&[Rank::Five, Rank::Six]);
        for dealer in Rank::ALL {
            assert_eq!(optimal_move(&hand, &up(dealer)), Decision::Hit);
        }
    }

    #[test]
    fn test_auto_player_stops_after_its_rounds() {
        let mut player = AutoPlayer::new(10, 2);

        assert_eq!(player.request_bet(1, 100).unwrap(), 10);
        assert!(player.request_yes_no(Prompt::AnotherRound).unwrap());
        assert_eq!(player.request_bet(1, 4).unwrap(), 4);
        assert!(!player.request_yes_no(Prompt::AnotherRound).unwrap());
        assert!(!player.request_yes_no(Prompt::NewSession).unwrap());
        assert!(!player.request_yes_no(Prompt::PlayAgain).unwrap());
        assert_eq!(player.rounds_left(), 0);
    }
}
