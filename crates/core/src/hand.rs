use crate::{Card, Rank};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandKind {
    HighCard,
    OnePair,
    TwoPair,
    ThreeOfAKind,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
}

impl HandKind {
    pub const ALL: [HandKind; 9] = [
        HandKind::HighCard,
        HandKind::OnePair,
        HandKind::TwoPair,
        HandKind::ThreeOfAKind,
        HandKind::Straight,
        HandKind::Flush,
        HandKind::FullHouse,
        HandKind::FourOfAKind,
        HandKind::StraightFlush,
    ];

    pub fn id(self) -> &'static str {
        match self {
            HandKind::HighCard => "high_card",
            HandKind::OnePair => "one_pair",
            HandKind::TwoPair => "two_pair",
            HandKind::ThreeOfAKind => "three_of_a_kind",
            HandKind::Straight => "straight",
            HandKind::Flush => "flush",
            HandKind::FullHouse => "full_house",
            HandKind::FourOfAKind => "four_of_a_kind",
            HandKind::StraightFlush => "straight_flush",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            HandKind::HighCard => "High Card",
            HandKind::OnePair => "One Pair",
            HandKind::TwoPair => "Two Pair",
            HandKind::ThreeOfAKind => "Three of a Kind",
            HandKind::Straight => "Straight",
            HandKind::Flush => "Flush",
            HandKind::FullHouse => "Full House",
            HandKind::FourOfAKind => "Four of a Kind",
            HandKind::StraightFlush => "Straight Flush",
        }
    }
}

/// Classify 1..=5 cards. Flushes and straights need all five cards; smaller
/// selections are ranked on multiplicities alone.
pub fn classify_hand(cards: &[Card]) -> HandKind {
    if cards.is_empty() {
        return HandKind::HighCard;
    }
    let rank_counts = count_ranks(cards);
    let mut counts: Vec<usize> = rank_counts.values().copied().collect();
    counts.sort_by(|a, b| b.cmp(a));

    if cards.len() == 5 {
        let is_flush = cards.iter().all(|card| card.suit == cards[0].suit);
        let is_straight = is_straight(cards);
        if is_flush && is_straight {
            return HandKind::StraightFlush;
        }
        if counts[0] == 4 {
            return HandKind::FourOfAKind;
        }
        if counts == [3, 2] {
            return HandKind::FullHouse;
        }
        if is_flush {
            return HandKind::Flush;
        }
        if is_straight {
            return HandKind::Straight;
        }
        if counts[0] == 3 {
            return HandKind::ThreeOfAKind;
        }
        if counts == [2, 2, 1] {
            return HandKind::TwoPair;
        }
        if counts[0] == 2 {
            return HandKind::OnePair;
        }
        return HandKind::HighCard;
    }

    match counts[0] {
        4 => HandKind::FourOfAKind,
        3 => HandKind::ThreeOfAKind,
        2 if cards.len() == 4 && counts == [2, 2] => HandKind::TwoPair,
        2 => HandKind::OnePair,
        _ => HandKind::HighCard,
    }
}

/// Indices (in hand order) of the cards whose effects apply for `kind`.
pub fn triggered_indices(cards: &[Card], kind: HandKind) -> Vec<usize> {
    if cards.is_empty() {
        return Vec::new();
    }
    let rank_counts = count_ranks(cards);
    match kind {
        HandKind::HighCard => highest_card_index(cards).into_iter().collect(),
        HandKind::OnePair => pick_indices_by_count(cards, &rank_counts, 2, 1),
        HandKind::TwoPair => pick_indices_by_count(cards, &rank_counts, 2, 2),
        HandKind::ThreeOfAKind => pick_indices_by_count(cards, &rank_counts, 3, 1),
        HandKind::FourOfAKind => pick_indices_by_count(cards, &rank_counts, 4, 1),
        HandKind::Straight | HandKind::Flush | HandKind::FullHouse | HandKind::StraightFlush => {
            (0..cards.len()).collect()
        }
    }
}

/// Human-readable summary naming the deciding ranks.
pub fn describe_hand(cards: &[Card], kind: HandKind) -> String {
    let rank_counts = count_ranks(cards);
    let ranks_with = |count: usize| -> Vec<Rank> {
        let mut ranks: Vec<Rank> = rank_counts
            .iter()
            .filter(|(_, &c)| c == count)
            .map(|(r, _)| *r)
            .collect();
        ranks.sort_by(|a, b| b.value().cmp(&a.value()));
        ranks
    };
    let high = highest_rank(cards);
    match kind {
        HandKind::StraightFlush => format!("Straight Flush, {} high", straight_high(cards).name()),
        HandKind::FourOfAKind => match ranks_with(4).first() {
            Some(rank) => format!("Four of a Kind, {}", rank.plural()),
            None => "Four of a Kind".to_string(),
        },
        HandKind::FullHouse => match (ranks_with(3).first(), ranks_with(2).first()) {
            (Some(trips), Some(pair)) => {
                format!("Full House, {} over {}", trips.plural(), pair.plural())
            }
            _ => "Full House".to_string(),
        },
        HandKind::Flush => format!("Flush, {} high", high.name()),
        HandKind::Straight => format!("Straight, {} high", straight_high(cards).name()),
        HandKind::ThreeOfAKind => match ranks_with(3).first() {
            Some(rank) => format!("Three of a Kind, {}", rank.plural()),
            None => "Three of a Kind".to_string(),
        },
        HandKind::TwoPair => match ranks_with(2).as_slice() {
            [hi, lo, ..] => format!("Two Pair, {} and {}", hi.plural(), lo.plural()),
            _ => "Two Pair".to_string(),
        },
        HandKind::OnePair => match ranks_with(2).first() {
            Some(rank) => format!("Pair of {}", rank.plural()),
            None => "One Pair".to_string(),
        },
        HandKind::HighCard => format!("High Card, {}", high.name()),
    }
}

fn count_ranks(cards: &[Card]) -> HashMap<Rank, usize> {
    let mut rank_counts: HashMap<Rank, usize> = HashMap::new();
    for card in cards {
        *rank_counts.entry(card.rank).or_insert(0) += 1;
    }
    rank_counts
}

fn sorted_values(cards: &[Card]) -> Vec<u8> {
    let mut values: Vec<u8> = cards.iter().map(|card| card.rank.value()).collect();
    values.sort_unstable();
    values
}

fn is_low_ace_straight(values: &[u8]) -> bool {
    values == [2, 3, 4, 5, 14]
}

fn is_straight(cards: &[Card]) -> bool {
    if cards.len() != 5 {
        return false;
    }
    let values = sorted_values(cards);
    if is_low_ace_straight(&values) {
        return true;
    }
    values.windows(2).all(|w| w[1] == w[0] + 1)
}

fn straight_high(cards: &[Card]) -> Rank {
    if is_low_ace_straight(&sorted_values(cards)) {
        return Rank::Five;
    }
    highest_rank(cards)
}

fn highest_rank(cards: &[Card]) -> Rank {
    cards
        .iter()
        .map(|card| card.rank)
        .max_by_key(|rank| rank.value())
        .unwrap_or(Rank::Two)
}

fn highest_card_index(cards: &[Card]) -> Option<usize> {
    let mut best: Option<(usize, u8)> = None;
    for (idx, card) in cards.iter().enumerate() {
        let value = card.rank.value();
        if best.map(|(_, v)| value > v).unwrap_or(true) {
            best = Some((idx, value));
        }
    }
    best.map(|(idx, _)| idx)
}

fn pick_indices_by_count(
    cards: &[Card],
    rank_counts: &HashMap<Rank, usize>,
    count: usize,
    max_groups: usize,
) -> Vec<usize> {
    let mut ranks: Vec<Rank> = rank_counts
        .iter()
        .filter(|(_, &c)| c == count)
        .map(|(r, _)| *r)
        .collect();
    ranks.sort_by(|a, b| b.value().cmp(&a.value()));
    ranks.truncate(max_groups);

    cards
        .iter()
        .enumerate()
        .filter(|(_, card)| ranks.contains(&card.rank))
        .map(|(idx, _)| idx)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Suit::*;
    use crate::{Card, Rank::*, Suit};

    fn c(suit: Suit, rank: Rank) -> Card {
        Card::standard(suit, rank)
    }

    #[test]
    fn classifies_every_full_hand_category() {
        let cases = [
            (vec![c(Hearts, Five), c(Hearts, Six), c(Hearts, Seven), c(Hearts, Eight), c(Hearts, Nine)], HandKind::StraightFlush),
            (vec![c(Hearts, King), c(Spades, King), c(Diamonds, King), c(Clubs, King), c(Hearts, Two)], HandKind::FourOfAKind),
            (vec![c(Hearts, Ace), c(Spades, Ace), c(Diamonds, Ace), c(Clubs, King), c(Hearts, King)], HandKind::FullHouse),
            (vec![c(Clubs, Two), c(Clubs, Nine), c(Clubs, Jack), c(Clubs, Four), c(Clubs, King)], HandKind::Flush),
            (vec![c(Hearts, Ten), c(Spades, Jack), c(Diamonds, Queen), c(Clubs, King), c(Hearts, Ace)], HandKind::Straight),
            (vec![c(Hearts, Seven), c(Spades, Seven), c(Diamonds, Seven), c(Clubs, Two), c(Hearts, Nine)], HandKind::ThreeOfAKind),
            (vec![c(Hearts, Seven), c(Spades, Seven), c(Diamonds, Two), c(Clubs, Two), c(Hearts, Nine)], HandKind::TwoPair),
            (vec![c(Hearts, Seven), c(Spades, Seven), c(Diamonds, Three), c(Clubs, Two), c(Hearts, Nine)], HandKind::OnePair),
            (vec![c(Hearts, Seven), c(Spades, King), c(Diamonds, Three), c(Clubs, Two), c(Hearts, Nine)], HandKind::HighCard),
        ];
        for (cards, expected) in cases {
            assert_eq!(classify_hand(&cards), expected, "{cards:?}");
        }
    }

    #[test]
    fn low_ace_straight_reports_five_high() {
        let cards = vec![c(Hearts, Ace), c(Spades, Two), c(Diamonds, Three), c(Clubs, Four), c(Hearts, Five)];
        assert_eq!(classify_hand(&cards), HandKind::Straight);
        assert_eq!(describe_hand(&cards, HandKind::Straight), "Straight, Five high");
    }

    #[test]
    fn wrap_around_is_not_a_straight() {
        let cards = vec![c(Hearts, Queen), c(Spades, King), c(Diamonds, Ace), c(Clubs, Two), c(Hearts, Three)];
        assert_eq!(classify_hand(&cards), HandKind::HighCard);
    }

    #[test]
    fn partial_selections_use_multiplicities_only() {
        let four_suited = vec![c(Hearts, Two), c(Hearts, Three), c(Hearts, Four), c(Hearts, Five)];
        assert_eq!(classify_hand(&four_suited), HandKind::HighCard);
        let two_pair = vec![c(Hearts, Two), c(Spades, Two), c(Hearts, Nine), c(Clubs, Nine)];
        assert_eq!(classify_hand(&two_pair), HandKind::TwoPair);
        let trips = vec![c(Hearts, Two), c(Spades, Two), c(Clubs, Two)];
        assert_eq!(classify_hand(&trips), HandKind::ThreeOfAKind);
        let quads = vec![c(Hearts, Two), c(Spades, Two), c(Clubs, Two), c(Diamonds, Two)];
        assert_eq!(classify_hand(&quads), HandKind::FourOfAKind);
        let pair = vec![c(Hearts, Two), c(Spades, Two), c(Clubs, Five)];
        assert_eq!(classify_hand(&pair), HandKind::OnePair);
        assert_eq!(classify_hand(&[c(Clubs, Ace)]), HandKind::HighCard);
    }

    #[test]
    fn triggered_cards_follow_category() {
        let pair = vec![c(Hearts, Three), c(Spades, Seven), c(Diamonds, King), c(Clubs, Seven), c(Hearts, Nine)];
        assert_eq!(triggered_indices(&pair, HandKind::OnePair), vec![1, 3]);

        let high = vec![c(Hearts, Three), c(Spades, Seven), c(Diamonds, King), c(Clubs, Two), c(Hearts, Nine)];
        assert_eq!(triggered_indices(&high, HandKind::HighCard), vec![2]);

        let two_pair = vec![c(Hearts, Nine), c(Spades, Two), c(Diamonds, Nine), c(Clubs, Two), c(Hearts, Ace)];
        assert_eq!(triggered_indices(&two_pair, HandKind::TwoPair), vec![0, 1, 2, 3]);

        let quads = vec![c(Hearts, Four), c(Spades, Four), c(Diamonds, Jack), c(Clubs, Four), c(Diamonds, Four)];
        assert_eq!(triggered_indices(&quads, HandKind::FourOfAKind), vec![0, 1, 3, 4]);

        let full = vec![c(Hearts, Ace), c(Spades, Ace), c(Diamonds, Ace), c(Clubs, King), c(Hearts, King)];
        assert_eq!(triggered_indices(&full, HandKind::FullHouse), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn descriptions_name_deciding_ranks() {
        let full = vec![c(Hearts, Ace), c(Spades, Ace), c(Diamonds, Ace), c(Clubs, King), c(Hearts, King)];
        assert_eq!(describe_hand(&full, HandKind::FullHouse), "Full House, Aces over Kings");
        let two_pair = vec![c(Hearts, Six), c(Spades, Two), c(Diamonds, Six), c(Clubs, Two), c(Hearts, Ace)];
        assert_eq!(describe_hand(&two_pair, HandKind::TwoPair), "Two Pair, Sixes and Twos");
        let pair = vec![c(Hearts, Jack), c(Spades, Jack)];
        assert_eq!(describe_hand(&pair, HandKind::OnePair), "Pair of Jacks");
        let high = vec![c(Hearts, Three), c(Spades, Queen)];
        assert_eq!(describe_hand(&high, HandKind::HighCard), "High Card, Queen");
    }
}
