use thiserror::Error;
use turbodeck_core::{Card, Rank, Suit};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CardParseError {
    #[error("empty card literal")]
    Empty,
    #[error("unknown rank in {0:?}")]
    UnknownRank(String),
    #[error("unknown suit in {0:?}")]
    UnknownSuit(String),
}

/// Parse a card literal: rank token followed by a suit token, ignoring case.
/// Accepts `AH`, `10s`, `Tc`, `Kspades` and suit symbols such as `Q♥`.
pub fn parse_card(literal: &str) -> Result<Card, CardParseError> {
    let text = literal.trim().to_lowercase();
    if text.is_empty() {
        return Err(CardParseError::Empty);
    }
    let (rank, rest) =
        split_rank(&text).ok_or_else(|| CardParseError::UnknownRank(literal.to_string()))?;
    let suit =
        parse_suit(rest).ok_or_else(|| CardParseError::UnknownSuit(literal.to_string()))?;
    Ok(Card::standard(suit, rank))
}

pub fn parse_cards<'a, I>(literals: I) -> Result<Vec<Card>, CardParseError>
where
    I: IntoIterator<Item = &'a str>,
{
    literals.into_iter().map(parse_card).collect()
}

fn split_rank(text: &str) -> Option<(Rank, &str)> {
    if let Some(rest) = text.strip_prefix("10") {
        return Some((Rank::Ten, rest));
    }
    let first = text.chars().next()?;
    let rank = match first {
        '2' => Rank::Two,
        '3' => Rank::Three,
        '4' => Rank::Four,
        '5' => Rank::Five,
        '6' => Rank::Six,
        '7' => Rank::Seven,
        '8' => Rank::Eight,
        '9' => Rank::Nine,
        't' => Rank::Ten,
        'j' => Rank::Jack,
        'q' => Rank::Queen,
        'k' => Rank::King,
        'a' => Rank::Ace,
        _ => return None,
    };
    Some((rank, &text[first.len_utf8()..]))
}

fn parse_suit(text: &str) -> Option<Suit> {
    match text.trim() {
        "h" | "heart" | "hearts" | "♥" => Some(Suit::Hearts),
        "d" | "diamond" | "diamonds" | "♦" => Some(Suit::Diamonds),
        "c" | "club" | "clubs" | "♣" => Some(Suit::Clubs),
        "s" | "spade" | "spades" | "♠" => Some(Suit::Spades),
        _ => None,
    }
}
