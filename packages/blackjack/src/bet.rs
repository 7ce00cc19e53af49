use serde::{Deserialize, Serialize};

use crate::error::BetError;

/// Signed chip balance; bankrolls may in principle run negative for the house.
pub type Chips = i64;

/// A wager accepted for one round, always within `1..=bankroll` when placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bet(Chips);

impl Bet {
    pub fn new(amount: Chips, bankroll: Chips) -> Result<Self, BetError> {
        if amount <= 0 {
            return Err(BetError::NotPositive {
                bet: amount,
                bankroll,
            });
        }
        if amount > bankroll {
            return Err(BetError::ExceedsBankroll {
                bet: amount,
                bankroll,
            });
        }
        Ok(Self(amount))
    }

    /// Parse typed input such as `" 25\n"`.
    pub fn parse(input: &str, bankroll: Chips) -> Result<Self, BetError> {
        let trimmed = input.trim();
        let amount: Chips = trimmed
            .parse()
            .map_err(|_| BetError::NotANumber(trimmed.to_string()))?;
        Self::new(amount, bankroll)
    }

    pub fn amount(&self) -> Chips {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_whole_bankroll() {
        assert_eq!(Bet::new(100, 100).unwrap().amount(), 100);
        assert_eq!(Bet::new(1, 100).unwrap().amount(), 1);
    }

    #[test]
    fn test_rejects_zero_and_negative() {
        assert_eq!(
            Bet::new(0, 100),
            Err(BetError::NotPositive { bet: 0, bankroll: 100 })
        );
        assert_eq!(
            Bet::new(-10, 100),
            Err(BetError::NotPositive { bet: -10, bankroll: 100 })
        );
    }

    #[test]
    fn test_rejects_more_than_bankroll() {
        assert_eq!(
            Bet::new(101, 100),
            Err(BetError::ExceedsBankroll { bet: 101, bankroll: 100 })
        );
    }

    #[test]
    fn test_parse() {
        assert_eq!(Bet::parse(" 25\n", 100).unwrap().amount(), 25);
        assert_eq!(
            Bet::parse("ten", 100),
            Err(BetError::NotANumber("ten".to_string()))
        );
        assert_eq!(Bet::parse("", 100), Err(BetError::NotANumber(String::new())));
        assert_eq!(Bet::parse("2.5", 100), Err(BetError::NotANumber("2.5".to_string())));
        assert!(matches!(Bet::parse("-3", 100), Err(BetError::NotPositive { .. })));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            BetError::ExceedsBankroll { bet: 500, bankroll: 80 }.to_string(),
            "Invalid bet. You can bet between $1 and $80."
        );
        assert_eq!(
            BetError::NotANumber("abc".into()).to_string(),
            "Please enter a valid number."
        );
    }
}
