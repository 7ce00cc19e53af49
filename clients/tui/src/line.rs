use std::io::{BufRead, Write};

use blackjack::{
    Bankrolls, Bet, Card, Chips, Decision, GameError, Hand, Party, PlayerInput, Prompt, TableView,
};

use crate::card_art::render_hand;

/// Prompted console table over any reader/writer pair. End of input aborts.
pub struct LineTable<R, W> {
    input: R,
    output: W,
    // Set once the dealer's final hand is out, so the next player hand is labelled final too
    final_hands: bool,
}

impl<R: BufRead, W: Write> LineTable<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            final_hands: false,
        }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    fn ask(&mut self, question: &str) -> Result<String, GameError> {
        write!(self.output, "{question}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(GameError::Aborted);
        }
        Ok(line)
    }

    fn print_cards(&mut self, hand: &Hand, reveal_all: bool) -> Result<(), GameError> {
        for row in render_hand(hand, reveal_all) {
            writeln!(self.output, "{row}")?;
        }
        Ok(())
    }
}

impl<R: BufRead, W: Write> PlayerInput for LineTable<R, W> {
    fn request_bet(&mut self, _min: Chips, max: Chips) -> Result<Chips, GameError> {
        loop {
            let line = self.ask("Place your bet: ")?;
            match Bet::parse(&line, max) {
                Ok(bet) => return Ok(bet.amount()),
                Err(e) => writeln!(self.output, "{e}")?,
            }
        }
    }

    fn request_decision(&mut self, _player: &Hand, _dealer_up: &Card) -> Result<Decision, GameError> {
        loop {
            let line = self.ask("Do you want to hit or stand? (hit/stand): ")?;
            match line.parse::<Decision>() {
                Ok(decision) => return Ok(decision),
                Err(e) => writeln!(self.output, "{e}")?,
            }
        }
    }

    fn request_yes_no(&mut self, prompt: Prompt) -> Result<bool, GameError> {
        let line = self.ask(&format!("{prompt}: "))?;
        let answer = line.trim().to_lowercase();
        Ok(answer == "y" || answer == "yes")
    }
}

impl<R: BufRead, W: Write> TableView for LineTable<R, W> {
    fn show_bankrolls(&mut self, bankrolls: &Bankrolls) -> Result<(), GameError> {
        writeln!(
            self.output,
            "Player's money: ${}, Dealer's money: ${}",
            bankrolls.player, bankrolls.house
        )?;
        Ok(())
    }

    fn show_hand(&mut self, party: Party, hand: &Hand, reveal_all: bool) -> Result<(), GameError> {
        match (party, reveal_all) {
            (Party::Dealer, false) => {
                writeln!(self.output, "Dealer's visible card:")?;
                self.print_cards(hand, false)?;
            }
            (Party::Dealer, true) => {
                writeln!(self.output, "\nFinal hands:\nDealer's hand:")?;
                self.print_cards(hand, true)?;
                writeln!(self.output, "Dealer's total: {}", hand.value())?;
                self.final_hands = true;
            }
            (Party::Player, _) if self.final_hands => {
                writeln!(self.output, "\nPlayer's hand:")?;
                self.print_cards(hand, true)?;
                writeln!(self.output, "Player's total: {}", hand.value())?;
                self.final_hands = false;
            }
            (Party::Player, _) => {
                writeln!(self.output, "Your current hand:")?;
                self.print_cards(hand, true)?;
                writeln!(self.output, "Total value: {}\n", hand.value())?;
            }
        }
        Ok(())
    }

    fn show_outcome(
        &mut self,
        message: &str,
        _dealer_total: u8,
        _player_total: u8,
    ) -> Result<(), GameError> {
        writeln!(self.output, "\n{message}")?;
        Ok(())
    }

    fn show_message(&mut self, message: &str) -> Result<(), GameError> {
        writeln!(self.output, "{message}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blackjack::{GameRules, Rank, Session, Suit};
    use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};
    use std::io::Cursor;

    fn table(input: &str) -> LineTable<Cursor<Vec<u8>>, Vec<u8>> {
        LineTable::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output(table: LineTable<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(table.into_output()).unwrap()
    }

    #[test]
    fn test_bet_reprompts_until_valid() {
        let mut table = table("abc\n0\n500\n25\n");
        assert_eq!(table.request_bet(1, 100).unwrap(), 25);

        let out = output(table);
        assert_eq!(out.matches("Place your bet: ").count(), 4);
        assert_eq!(out.matches("Please enter a valid number.").count(), 1);
        assert_eq!(
            out.matches("Invalid bet. You can bet between $1 and $100.").count(),
            2
        );
    }

    #[test]
    fn test_decision_is_case_insensitive() {
        let mut table = table("double\nHIT\n");
        let hand = Hand::new();
        let up = Card::new(Rank::Six, Suit::Clubs);
        assert_eq!(table.request_decision(&hand, &up).unwrap(), Decision::Hit);
        assert!(output(table).contains("Invalid input...Please enter a hit or stand."));
    }

    #[test]
    fn test_yes_no() {
        let mut table = table("y\nN\nYes\n\n");
        assert!(table.request_yes_no(Prompt::AnotherRound).unwrap());
        assert!(!table.request_yes_no(Prompt::AnotherRound).unwrap());
        assert!(table.request_yes_no(Prompt::PlayAgain).unwrap());
        assert!(!table.request_yes_no(Prompt::NewSession).unwrap());
        assert!(output(table).contains("Would you like to play another round? (y/n): "));
    }

    #[test]
    fn test_end_of_input_aborts() {
        let mut table = table("");
        assert!(matches!(table.request_bet(1, 100), Err(GameError::Aborted)));
    }

    #[test]
    fn test_hidden_dealer_card() {
        let mut table = table("");
        let dealer = Hand::from_cards([
            Card::new(Rank::King, Suit::Hearts),
            Card::new(Rank::Ace, Suit::Spades),
        ]);
        table.show_hand(Party::Dealer, &dealer, false).unwrap();

        let out = output(table);
        assert!(out.starts_with("Dealer's visible card:\n"));
        assert!(out.contains('♥'));
        assert!(!out.contains('♠'));
    }

    #[test]
    fn test_session_over_console() {
        // Bet, stand, then decline both follow-up questions.
        let mut table = table("10\nstand\nn\nn\n");
        let mut session = Session::new(GameRules::default(), ChaCha8Rng::seed_from_u64(8));
        let result = session.run(&mut table);

        let out = output(table);
        assert!(out.starts_with("Player's money: $100, Dealer's money: $1000\n"));
        assert!(out.contains("Dealer's final score:"));
        assert!(out.trim_end().ends_with("Thank you for playing!"));
        // On a natural "stand" is read as the answer to another round, which is still a no.
        let summary = result.unwrap();
        assert_eq!(summary.rounds, 1);
    }
}
