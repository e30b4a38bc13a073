use crate::{Card, Rank, RngState, Suit};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeckError {
    #[error("cannot draw {requested} cards, only {remaining} remaining")]
    InsufficientCards { requested: usize, remaining: usize },
}

/// Draw pile and discard pile. Cards are dealt from the tail of `draw`.
#[derive(Debug, Default, Clone)]
pub struct Deck {
    pub draw: Vec<Card>,
    pub discard: Vec<Card>,
}

impl Deck {
    pub fn standard52() -> Self {
        let mut draw = Vec::with_capacity(52);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                draw.push(Card::standard(suit, rank));
            }
        }
        Self {
            draw,
            discard: Vec::new(),
        }
    }

    pub fn shuffled(rng: &mut RngState) -> Self {
        let mut deck = Self::standard52();
        deck.shuffle(rng);
        deck
    }

    /// Replace both piles with a freshly shuffled 52-card deck.
    pub fn reset(&mut self, rng: &mut RngState) {
        *self = Self::shuffled(rng);
    }

    pub fn shuffle(&mut self, rng: &mut RngState) {
        rng.shuffle(&mut self.draw);
    }

    /// Pop exactly `count` cards, last-shuffled position first.
    pub fn draw(&mut self, count: usize) -> Result<Vec<Card>, DeckError> {
        if count > self.draw.len() {
            return Err(DeckError::InsufficientCards {
                requested: count,
                remaining: self.draw.len(),
            });
        }
        Ok(self.draw_up_to(count))
    }

    /// Pop up to `count` cards, stopping early when the pile runs dry.
    pub fn draw_up_to(&mut self, count: usize) -> Vec<Card> {
        let mut cards = Vec::with_capacity(count.min(self.draw.len()));
        for _ in 0..count {
            if let Some(card) = self.draw.pop() {
                cards.push(card);
            } else {
                break;
            }
        }
        cards
    }

    pub fn discard(&mut self, mut cards: Vec<Card>) {
        self.discard.append(&mut cards);
    }

    pub fn remaining_count(&self) -> usize {
        self.draw.len()
    }

    /// Add a card to the draw pile and reshuffle it so the card can come up
    /// anywhere.
    pub fn shuffle_in(&mut self, card: Card, rng: &mut RngState) {
        self.draw.push(card);
        self.shuffle(rng);
    }

    /// Remove the first draw-pile card with the same suit and rank.
    pub fn remove_first_match(&mut self, card: &Card) -> Option<Card> {
        let pos = self.draw.iter().position(|c| c.same_face(card))?;
        Some(self.draw.remove(pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn reset_partitions_a_full_deck() {
        let mut rng = RngState::from_seed(7);
        let mut deck = Deck::standard52();
        let dealt = deck.draw_up_to(10);
        deck.discard(dealt);
        deck.reset(&mut rng);
        assert_eq!(deck.draw.len() + deck.discard.len(), 52);
        assert!(deck.discard.is_empty());
        let unique: HashSet<(Suit, Rank)> = deck.draw.iter().map(|c| (c.suit, c.rank)).collect();
        assert_eq!(unique.len(), 52);
    }

    #[test]
    fn draw_pops_from_the_tail() {
        let mut deck = Deck::standard52();
        let last = deck.draw.last().cloned().expect("card");
        let drawn = deck.draw(3).expect("draw");
        assert_eq!(drawn[0], last);
        assert_eq!(deck.remaining_count(), 49);
    }

    #[test]
    fn draw_more_than_remaining_fails_without_mutation() {
        let mut deck = Deck::standard52();
        deck.draw_up_to(50);
        let err = deck.draw(3).unwrap_err();
        assert_eq!(
            err,
            DeckError::InsufficientCards {
                requested: 3,
                remaining: 2
            }
        );
        assert_eq!(deck.remaining_count(), 2);
    }

    #[test]
    fn remove_first_match_only_takes_one_copy() {
        let mut rng = RngState::from_seed(3);
        let mut deck = Deck::standard52();
        let dup = Card::with_effects(Suit::Hearts, Rank::Ace, ["bonus_chips_50"]);
        deck.shuffle_in(dup, &mut rng);
        assert_eq!(deck.remaining_count(), 53);
        let probe = Card::standard(Suit::Hearts, Rank::Ace);
        assert!(deck.remove_first_match(&probe).is_some());
        assert_eq!(deck.remaining_count(), 52);
        assert_eq!(deck.draw.iter().filter(|c| c.same_face(&probe)).count(), 1);
    }
}
