use crate::{Card, ShopState, Suit};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Phase {
    Dealing,
    Active,
    Shop,
    GameOver,
    Victory,
}

impl Phase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::GameOver | Phase::Victory)
    }
}

/// Session-wide boss that blocks one suit from scoring.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Boss {
    Vampire,
    VipOnly,
    FrozenGround,
    BlondeVixen,
}

impl Boss {
    pub fn blocked_suit(self) -> Suit {
        match self {
            Boss::Vampire => Suit::Hearts,
            Boss::VipOnly => Suit::Clubs,
            Boss::FrozenGround => Suit::Spades,
            Boss::BlondeVixen => Suit::Diamonds,
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "vampire" => Some(Boss::Vampire),
            "vip_only" => Some(Boss::VipOnly),
            "frozen_ground" => Some(Boss::FrozenGround),
            "blonde_vixen" => Some(Boss::BlondeVixen),
            _ => None,
        }
    }
}

/// Mutable counters of one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: Phase,
    pub current_round: u8,
    pub hands_played: u32,
    pub draws_used: u32,
    /// Score within the current round.
    pub total_score: i64,
    /// Money across the whole game.
    pub money: i64,
    #[serde(default)]
    pub boss: Option<Boss>,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            phase: Phase::Dealing,
            current_round: 1,
            hands_played: 0,
            draws_used: 0,
            total_score: 0,
            money: 0,
            boss: None,
        }
    }

    pub fn blocked_suit(&self) -> Option<Suit> {
        self.boss.map(Boss::blocked_suit)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

/// Serializable snapshot handed to callers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionState {
    pub session_id: String,
    pub phase: Phase,
    pub current_round: u8,
    pub hands_played: u32,
    pub draws_used: u32,
    pub total_score: i64,
    pub money: i64,
    pub hand: Vec<Card>,
    pub deck_remaining: usize,
    pub round_target: i64,
    pub in_shop: bool,
    pub shop_cards: Vec<Card>,
    pub shop: Option<ShopState>,
    pub active_turbo_modifiers: Vec<String>,
    pub purchased_cards: usize,
    pub max_hands: u32,
    pub max_hand_size: usize,
    pub max_draws: u32,
    pub boss: Option<Boss>,
    pub is_game_over: bool,
    pub is_victory: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bosses_block_distinct_suits() {
        let ids = ["vampire", "vip_only", "frozen_ground", "blonde_vixen"];
        let mut suits: Vec<Suit> = ids
            .iter()
            .filter_map(|id| Boss::from_id(id))
            .map(Boss::blocked_suit)
            .collect();
        suits.sort();
        assert_eq!(suits, Suit::ALL.to_vec());
        assert_eq!(Boss::from_id("dragon"), None);
    }

    #[test]
    fn boss_id_matches_serde_name() {
        let json = serde_json::to_string(&Boss::FrozenGround).expect("encode");
        assert_eq!(json, "\"frozen_ground\"");
    }
}
