use blackjack::{Card, Hand};

pub const CARD_HEIGHT: usize = 7;

/// Cards as dealt to view, `None` for a face-down card.
///
/// Without `reveal_all` only the first card is face up.
pub fn visible_cards(hand: &Hand, reveal_all: bool) -> impl Iterator<Item = Option<&Card>> {
    hand.cards
        .iter()
        .enumerate()
        .map(move |(i, card)| (reveal_all || i == 0).then_some(card))
}

pub fn card_face(card: &Card) -> [String; CARD_HEIGHT] {
    let rank = card.rank.symbol();
    let suit = card.suit.symbol();
    [
        "┌─────────┐".to_string(),
        format!("│ {rank:<2}      │"),
        "│         │".to_string(),
        format!("│    {suit}    │"),
        "│         │".to_string(),
        format!("│      {rank:>2} │"),
        "└─────────┘".to_string(),
    ]
}

pub fn card_back() -> [String; CARD_HEIGHT] {
    let mut rows: [String; CARD_HEIGHT] = std::array::from_fn(|_| "│░░░░░░░░░│".to_string());
    rows[0] = "┌─────────┐".to_string();
    rows[CARD_HEIGHT - 1] = "└─────────┘".to_string();
    rows
}

pub fn card_art(card: Option<&Card>) -> [String; CARD_HEIGHT] {
    match card {
        Some(card) => card_face(card),
        None => card_back(),
    }
}

/// The hand drawn side by side, one string per row
pub fn render_hand(hand: &Hand, reveal_all: bool) -> Vec<String> {
    let arts: Vec<[String; CARD_HEIGHT]> = visible_cards(hand, reveal_all).map(card_art).collect();
    (0..CARD_HEIGHT)
        .map(|row| {
            arts.iter()
                .map(|art| art[row].as_str())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}
