use blackjack::{
    AutoPlayer, Bankrolls, Bet, Card, Deck, GameRules, PayoutRatio, Rank, Round, RoundOutcome,
    RoundPhase, Session, Suit,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn simulate(seed: u64, bet: i64, rounds: u32) -> (blackjack::SessionSummary, AutoPlayer) {
    let mut session = Session::new(GameRules::default(), ChaCha8Rng::seed_from_u64(seed));
    let mut player = AutoPlayer::new(bet, rounds);
    let summary = session.run(&mut player).unwrap();
    (summary, player)
}

#[test]
fn auto_player_plays_a_fixed_number_of_rounds() {
    let (summary, player) = simulate(2024, 1, 100);

    assert_eq!(summary.rounds, 100);
    assert_eq!(summary.sessions, 1);
    assert_eq!(summary.outcomes.total(), 100);
    assert_eq!(player.outcomes().len(), 100);
    assert_eq!(summary.bankrolls.total(), 1100);
    assert_eq!(summary.bankrolls.player, 100 + summary.player_net);
}

#[test]
fn seeded_sessions_are_reproducible() {
    let (first, _) = simulate(77, 10, 50);
    let (second, _) = simulate(77, 10, 50);
    assert_eq!(first, second);
}

#[test]
fn large_flat_bets_end_when_a_bankroll_runs_dry() {
    let (summary, _) = simulate(5, 100, 10_000);

    assert!(summary.rounds < 10_000);
    assert!(summary.bankrolls.player <= 0 || summary.bankrolls.house <= 0);
    assert_eq!(summary.sessions, 1);
    assert_eq!(summary.bankrolls.total(), 1100);
}

#[test]
fn stacked_natural_pays_the_configured_ratio() {
    let deck = Deck::stacked(&[
        Card::new(Rank::Ace, Suit::Spades),
        Card::new(Rank::Queen, Suit::Hearts),
        Card::new(Rank::Ten, Suit::Clubs),
        Card::new(Rank::Nine, Suit::Clubs),
    ])
    .unwrap();
    let mut round = Round::deal(Bet::new(10, 100).unwrap(), deck);
    let mut player = AutoPlayer::new(10, 1);

    let settlement = round
        .play(&mut player, Bankrolls::new(100, 1000), PayoutRatio::SIX_TO_FIVE)
        .unwrap();

    assert_eq!(round.phase(), RoundPhase::Settled);
    assert_eq!(settlement.outcome, RoundOutcome::PlayerBlackjack);
    assert_eq!(settlement.player_delta, 12);
    assert_eq!(settlement.bankrolls, Bankrolls::new(112, 988));
    assert_eq!(round.dealer_hand().len(), 2);
}

#[test]
fn stacked_deck_rejects_duplicates() {
    let ace = Card::new(Rank::Ace, Suit::Spades);
    assert!(Deck::stacked(&[ace, ace]).is_err());
}
