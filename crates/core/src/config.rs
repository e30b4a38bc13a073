use crate::{HandKind, Rank};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandRule {
    pub kind: HandKind,
    pub base_chips: i64,
    pub base_mult: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RankRule {
    pub rank: Rank,
    pub chips: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundRule {
    pub round: u8,
    pub target: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EconomyRule {
    /// Money for clearing round 1.
    pub reward_base: i64,
    /// Extra money per round after the first.
    pub reward_step: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShopRule {
    pub card_slots: usize,
    pub turbo_slots: usize,
    pub card_price: i64,
    pub reroll_price: i64,
    pub turbo_price: i64,
    pub max_active_turbos: usize,
}

/// Missing fields in a config file fall back to [`GameConfig::standard`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GameConfig {
    pub rounds: Vec<RoundRule>,
    pub max_hands: u32,
    pub max_hand_size: usize,
    pub max_draws: u32,
    pub play_size: usize,
    pub hands: Vec<HandRule>,
    pub ranks: Vec<RankRule>,
    pub economy: EconomyRule,
    pub shop: ShopRule,
}

impl GameConfig {
    pub fn standard() -> Self {
        Self {
            rounds: vec![
                RoundRule { round: 1, target: 300 },
                RoundRule { round: 2, target: 750 },
                RoundRule { round: 3, target: 1250 },
            ],
            max_hands: 4,
            max_hand_size: 8,
            max_draws: 3,
            play_size: 5,
            hands: HandKind::ALL
                .iter()
                .map(|&kind| {
                    let (base_chips, base_mult) = default_hand_base(kind);
                    HandRule {
                        kind,
                        base_chips,
                        base_mult,
                    }
                })
                .collect(),
            ranks: Rank::ALL
                .iter()
                .map(|&rank| RankRule {
                    rank,
                    chips: rank.chip_value(),
                })
                .collect(),
            economy: EconomyRule {
                reward_base: 5,
                reward_step: 1,
            },
            shop: ShopRule {
                card_slots: 3,
                turbo_slots: 2,
                card_price: 3,
                reroll_price: 1,
                turbo_price: 1,
                max_active_turbos: 8,
            },
        }
    }

    pub fn round_target(&self, round: u8) -> Option<i64> {
        self.rounds
            .iter()
            .find(|rule| rule.round == round)
            .map(|rule| rule.target)
    }

    pub fn final_round(&self) -> u8 {
        self.rounds.iter().map(|rule| rule.round).max().unwrap_or(1)
    }

    pub fn reward_for(&self, round: u8) -> i64 {
        let extra = i64::from(round.saturating_sub(1));
        self.economy.reward_base + self.economy.reward_step * extra
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::standard()
    }
}

pub fn default_hand_base(kind: HandKind) -> (i64, i64) {
    match kind {
        HandKind::StraightFlush => (75, 10),
        HandKind::FourOfAKind => (60, 8),
        HandKind::FullHouse => (50, 7),
        HandKind::Flush => (40, 6),
        HandKind::Straight => (30, 5),
        HandKind::ThreeOfAKind => (25, 4),
        HandKind::TwoPair => (20, 3),
        HandKind::OnePair => (15, 2),
        HandKind::HighCard => (10, 2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_round_table() {
        let config = GameConfig::standard();
        assert_eq!(config.round_target(1), Some(300));
        assert_eq!(config.round_target(2), Some(750));
        assert_eq!(config.round_target(3), Some(1250));
        assert_eq!(config.round_target(4), None);
        assert_eq!(config.final_round(), 3);
    }

    #[test]
    fn rewards_grow_per_round() {
        let config = GameConfig::standard();
        assert_eq!(config.reward_for(1), 5);
        assert_eq!(config.reward_for(2), 6);
        assert_eq!(config.reward_for(3), 7);
    }
}
