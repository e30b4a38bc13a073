use crate::{
    classify_hand, default_hand_base, describe_hand, triggered_indices, Card, EffectCatalog,
    EffectKind, GameConfig, HandKind, Rank, RngState, RuleEffect, Score, Suit,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

pub const MAX_HAND_CARDS: usize = 5;

const MYSTERY_MONEY: i64 = 1;
const MYSTERY_MULT: i64 = 5;
const MYSTERY_CHIPS: i64 = 25;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EvalError {
    #[error("hand must contain 1 to 5 cards, got {0}")]
    InvalidHandSize(usize),
}

#[derive(Debug, Clone)]
pub struct ScoreTables {
    hand_rules: HashMap<HandKind, (i64, i64)>,
    rank_chips: HashMap<Rank, i64>,
}

impl ScoreTables {
    pub fn from_config(config: &GameConfig) -> Self {
        let hand_rules = config
            .hands
            .iter()
            .map(|rule| (rule.kind, (rule.base_chips, rule.base_mult)))
            .collect();
        let rank_chips = config
            .ranks
            .iter()
            .map(|rule| (rule.rank, rule.chips))
            .collect();
        Self {
            hand_rules,
            rank_chips,
        }
    }

    pub fn standard() -> Self {
        Self::from_config(&GameConfig::standard())
    }

    pub fn hand_base(&self, kind: HandKind) -> (i64, i64) {
        self.hand_rules
            .get(&kind)
            .copied()
            .unwrap_or_else(|| default_hand_base(kind))
    }

    pub fn rank_chips(&self, rank: Rank) -> i64 {
        self.rank_chips
            .get(&rank)
            .copied()
            .unwrap_or_else(|| rank.chip_value())
    }
}

/// Everything scoring needs beyond the cards. Session-scoped state such as
/// the blocked suit is passed here explicitly.
#[derive(Debug, Clone, Copy)]
pub struct ScoringContext<'a> {
    pub tables: &'a ScoreTables,
    pub effects: &'a EffectCatalog,
    pub blocked_suit: Option<Suit>,
}

impl<'a> ScoringContext<'a> {
    pub fn new(tables: &'a ScoreTables, effects: &'a EffectCatalog) -> Self {
        Self {
            tables,
            effects,
            blocked_suit: None,
        }
    }

    pub fn with_blocked_suit(mut self, suit: Option<Suit>) -> Self {
        self.blocked_suit = suit;
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandResult {
    pub hand_type: HandKind,
    pub base_chips: i64,
    /// Base multiplier plus every multiplier bonus.
    pub multiplier: i64,
    /// Face value of unblocked cards plus chip bonuses.
    pub card_chips: i64,
    pub total_score: i64,
    pub description: String,
    pub triggered_indices: Vec<usize>,
    pub bonus_descriptions: Vec<String>,
    pub money_bonus: i64,
}

/// Score 1..=5 cards. Five is a full play; fewer is a live preview.
pub fn evaluate_hand(
    cards: &[Card],
    ctx: &ScoringContext<'_>,
    rng: &mut RngState,
) -> Result<HandResult, EvalError> {
    if cards.is_empty() || cards.len() > MAX_HAND_CARDS {
        return Err(EvalError::InvalidHandSize(cards.len()));
    }

    let hand_type = classify_hand(cards);
    let triggered = triggered_indices(cards, hand_type);

    // A hand made entirely of the blocked suit scores as if nothing were blocked.
    let blocked = match ctx.blocked_suit {
        Some(suit) if cards.iter().all(|card| card.suit == suit) => None,
        other => other,
    };
    let is_blocked = |card: &Card| blocked == Some(card.suit);

    let mut bonus = Score::default();
    let mut money_bonus = 0;
    let mut bonus_descriptions = Vec::new();

    for &idx in &triggered {
        let card = &cards[idx];
        if is_blocked(card) {
            continue;
        }
        for id in &card.effects {
            let Some(kind) = ctx.effects.resolve(id) else {
                debug!(effect = %id, card = %card, "unknown card effect ignored");
                continue;
            };
            let effect = match kind {
                EffectKind::BonusChips(value) => RuleEffect::AddChips(value),
                EffectKind::BonusMultiplier(value) => RuleEffect::AddMult(value),
                _ => continue,
            };
            bonus.apply(&effect);
            bonus_descriptions.push(describe_bonus(card, &effect));
        }
    }

    for &idx in &triggered {
        let card = &cards[idx];
        if is_blocked(card) {
            continue;
        }
        for id in &card.effects {
            match ctx.effects.resolve(id) {
                Some(EffectKind::BonusMoney(amount)) => {
                    money_bonus += amount;
                    bonus_descriptions.push(format!("{card}: +${amount}"));
                }
                Some(EffectKind::Mystery) => match rng.index(3) {
                    0 => {
                        money_bonus += MYSTERY_MONEY;
                        bonus_descriptions.push(format!("{card}: Mystery +${MYSTERY_MONEY}"));
                    }
                    1 => {
                        bonus.apply(&RuleEffect::AddMult(MYSTERY_MULT));
                        bonus_descriptions
                            .push(format!("{card}: Mystery +{MYSTERY_MULT} multiplier"));
                    }
                    _ => {
                        bonus.apply(&RuleEffect::AddChips(MYSTERY_CHIPS));
                        bonus_descriptions.push(format!("{card}: Mystery +{MYSTERY_CHIPS} chips"));
                    }
                },
                _ => {}
            }
        }
    }

    let face_chips: i64 = cards
        .iter()
        .filter(|card| !is_blocked(*card))
        .map(|card| ctx.tables.rank_chips(card.rank))
        .sum();
    let card_chips = face_chips + bonus.chips;
    let (base_chips, base_mult) = ctx.tables.hand_base(hand_type);
    let multiplier = base_mult + bonus.mult;
    let total_score = (card_chips + base_chips).saturating_mul(multiplier);

    Ok(HandResult {
        hand_type,
        base_chips,
        multiplier,
        card_chips,
        total_score,
        description: describe_hand(cards, hand_type),
        triggered_indices: triggered,
        bonus_descriptions,
        money_bonus,
    })
}

/// Live preview of a selection. An empty selection has no result.
pub fn preview_hand(
    cards: &[Card],
    ctx: &ScoringContext<'_>,
    rng: &mut RngState,
) -> Result<Option<HandResult>, EvalError> {
    if cards.is_empty() {
        return Ok(None);
    }
    evaluate_hand(cards, ctx, rng).map(Some)
}

fn describe_bonus(card: &Card, effect: &RuleEffect) -> String {
    match effect {
        RuleEffect::AddChips(value) => format!("{card}: +{value} chips"),
        RuleEffect::AddMult(value) => format!("{card}: +{value} multiplier"),
    }
}
