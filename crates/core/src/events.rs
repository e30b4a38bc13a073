use crate::{HandKind, ShopOfferKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    RoundStarted {
        round: u8,
        target: i64,
        deck_size: usize,
    },
    HandDealt {
        count: usize,
    },
    CardsDrawn {
        discarded: usize,
        drawn: usize,
        draws_used: u32,
    },
    HandScored {
        hand: HandKind,
        base_score: i64,
        final_score: i64,
        round_score: i64,
    },
    MoneyEarned {
        amount: i64,
        money: i64,
    },
    RoundCleared {
        round: u8,
        score: i64,
        reward: i64,
        money: i64,
    },
    ShopEntered {
        cards: usize,
        turbos: usize,
    },
    ShopRerolled {
        cost: i64,
        money: i64,
    },
    ShopBought {
        offer: ShopOfferKind,
        cost: i64,
        money: i64,
    },
    GameLost {
        round: u8,
        score: i64,
    },
    GameWon {
        score: i64,
        money: i64,
    },
}

#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<Event>,
}

impl EventBus {
    pub fn push(&mut self, event: Event) {
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.queue.drain(..)
    }
}
