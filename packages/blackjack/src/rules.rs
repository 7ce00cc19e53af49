use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::RulesError;
use crate::Chips;

/// The dealer draws below this total and stands at or above it. Not configurable.
pub const DEALER_STANDS_ON: u8 = 17;

/// Blackjack payout multiplier as a ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutRatio {
    pub numerator: u16,
    pub denominator: u16,
}

impl PayoutRatio {
    pub const THREE_TO_TWO: Self = Self {
        numerator: 3,
        denominator: 2,
    };
    pub const SIX_TO_FIVE: Self = Self {
        numerator: 6,
        denominator: 5,
    };
    pub const ONE_TO_ONE: Self = Self {
        numerator: 1,
        denominator: 1,
    };

    pub fn new(numerator: u16, denominator: u16) -> Result<Self, RulesError> {
        if denominator == 0 {
            return Err(RulesError::ZeroDenominator);
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// Winnings for `bet`, truncated toward zero (3:2 on 11 pays 16) and
    /// clamped to the `Chips` range.
    pub fn calculate_payout(&self, bet: Chips) -> Chips {
        let payout = i128::from(bet) * i128::from(self.numerator) / i128::from(self.denominator);
        payout.clamp(i128::from(Chips::MIN), i128::from(Chips::MAX)) as Chips
    }
}

impl Default for PayoutRatio {
    fn default() -> Self {
        Self::THREE_TO_TWO
    }
}

impl FromStr for PayoutRatio {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || RulesError::MalformedPayout(s.to_string());
        let (num, den) = s.trim().split_once(':').ok_or_else(malformed)?;
        let num: u16 = num.trim().parse().map_err(|_| malformed())?;
        let den: u16 = den.trim().parse().map_err(|_| malformed())?;
        Self::new(num, den)
    }
}

/// Table configuration for a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRules {
    /// Player bankroll at the start of every session
    pub player_bankroll: Chips,

    /// House bankroll at the start of every session
    pub house_bankroll: Chips,

    /// Payout on a two-card 21
    pub blackjack_payout: PayoutRatio,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            player_bankroll: 100,
            house_bankroll: 1000,
            blackjack_payout: PayoutRatio::THREE_TO_TWO,
        }
    }
}

impl GameRules {
    pub fn new(
        player_bankroll: Chips,
        house_bankroll: Chips,
        blackjack_payout: PayoutRatio,
    ) -> Result<Self, RulesError> {
        for bankroll in [player_bankroll, house_bankroll] {
            if bankroll <= 0 {
                return Err(RulesError::NonPositiveBankroll(bankroll));
            }
        }
        Ok(Self {
            player_bankroll,
            house_bankroll,
            blackjack_payout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payout_ratio_three_to_two() {
        let ratio = PayoutRatio::THREE_TO_TWO;
        assert_eq!(ratio.calculate_payout(100), 150);
        assert_eq!(ratio.calculate_payout(10), 15);
        assert_eq!(ratio.calculate_payout(11), 16);
        assert_eq!(ratio.calculate_payout(1), 1);
    }

    #[test]
    fn test_payout_ratio_six_to_five() {
        let ratio = PayoutRatio::SIX_TO_FIVE;
        assert_eq!(ratio.calculate_payout(100), 120);
        assert_eq!(ratio.calculate_payout(10), 12);
        assert_eq!(ratio.calculate_payout(7), 8);
    }

    #[test]
    fn test_payout_on_huge_bets_does_not_overflow() {
        let bet = Chips::MAX / 2;
        assert_eq!(PayoutRatio::THREE_TO_TWO.calculate_payout(bet), 6_917_529_027_641_081_854);
        assert_eq!(PayoutRatio::new(3, 1).unwrap().calculate_payout(Chips::MAX), Chips::MAX);
    }

    #[test]
    fn test_payout_ratio_one_to_one() {
        assert_eq!(PayoutRatio::ONE_TO_ONE.calculate_payout(25), 25);
    }

    #[test]
    fn test_payout_ratio_zero_denominator() {
        assert_eq!(PayoutRatio::new(3, 0), Err(RulesError::ZeroDenominator));
    }

    #[test]
    fn test_payout_ratio_parse() {
        assert_eq!("3:2".parse::<PayoutRatio>(), Ok(PayoutRatio::THREE_TO_TWO));
        assert_eq!(" 6 : 5 ".parse::<PayoutRatio>(), Ok(PayoutRatio::SIX_TO_FIVE));
        assert_eq!("3:0".parse::<PayoutRatio>(), Err(RulesError::ZeroDenominator));
        assert!(matches!(
            "3/2".parse::<PayoutRatio>(),
            Err(RulesError::MalformedPayout(_))
        ));
        assert!(matches!(
            "x:2".parse::<PayoutRatio>(),
            Err(RulesError::MalformedPayout(_))
        ));
    }

    #[test]
    fn test_game_rules_default() {
        let rules = GameRules::default();
        assert_eq!(rules.player_bankroll, 100);
        assert_eq!(rules.house_bankroll, 1000);
        assert_eq!(rules.blackjack_payout, PayoutRatio::THREE_TO_TWO);
    }

    #[test]
    fn test_game_rules_rejects_empty_bankrolls() {
        assert_eq!(
            GameRules::new(0, 1000, PayoutRatio::default()),
            Err(RulesError::NonPositiveBankroll(0))
        );
        assert_eq!(
            GameRules::new(100, -5, PayoutRatio::default()),
            Err(RulesError::NonPositiveBankroll(-5))
        );
        assert!(GameRules::new(50, 500, PayoutRatio::SIX_TO_FIVE).is_ok());
    }
}
