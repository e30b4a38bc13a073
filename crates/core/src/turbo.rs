use crate::{CatalogError, Card, HandResult, Suit};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const SUIT_MULTIPLIER_BONUS: i64 = 3;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TurboKind {
    /// Doubles the final multiplier; applied to the final integer.
    DoubleMultiplier,
    /// Doubles the final chip payout; numerically the same as above.
    DoubleChips,
    /// +3 multiplier when a triggered card of the suit was played.
    SuitMultiplier(Suit),
}

impl TurboKind {
    pub fn apply(self, total: i64, result: &HandResult, played: &[Card]) -> i64 {
        match self {
            TurboKind::DoubleMultiplier | TurboKind::DoubleChips => total.saturating_mul(2),
            TurboKind::SuitMultiplier(suit) => {
                let scored = result
                    .triggered_indices
                    .iter()
                    .filter_map(|&idx| played.get(idx))
                    .any(|card| card.suit == suit);
                if !scored || result.multiplier == 0 {
                    return total;
                }
                let base_total = total / result.multiplier;
                base_total.saturating_mul(result.multiplier + SUIT_MULTIPLIER_BONUS)
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TurboDef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "effect")]
    pub kind: TurboKind,
}

impl TurboDef {
    pub fn new(id: &str, name: &str, description: &str, kind: TurboKind) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            kind,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TurboCatalog {
    entries: Vec<TurboDef>,
    by_id: HashMap<String, usize>,
}

impl TurboCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn standard() -> Self {
        let mut catalog = Self::new();
        for def in default_turbos() {
            let _ = catalog.register(def);
        }
        catalog
    }

    pub fn register(&mut self, def: TurboDef) -> Result<(), CatalogError> {
        if self.by_id.contains_key(&def.id) {
            return Err(CatalogError::DuplicateEntry(def.id));
        }
        self.by_id.insert(def.id.clone(), self.entries.len());
        self.entries.push(def);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&TurboDef> {
        self.by_id.get(id).map(|&idx| &self.entries[idx])
    }

    pub fn entries(&self) -> &[TurboDef] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Run `total` through each active modifier in acquisition order. Ids
    /// missing from the catalog are skipped. Returns the final total and the
    /// names of modifiers that changed it.
    pub fn apply_all<S: AsRef<str>>(
        &self,
        active: &[S],
        total: i64,
        result: &HandResult,
        played: &[Card],
    ) -> (i64, Vec<String>) {
        let mut current = total;
        let mut applied = Vec::new();
        for id in active {
            let Some(def) = self.get(id.as_ref()) else {
                continue;
            };
            let next = def.kind.apply(current, result, played);
            if next != current {
                applied.push(format!("{}: {} -> {}", def.name, current, next));
            }
            current = next;
        }
        (current, applied)
    }
}

fn suit_turbo(id: &str, name: &str, suit: Suit) -> TurboDef {
    TurboDef::new(
        id,
        name,
        &format!("+3 multiplier when a {} card is scored.", suit.singular()),
        TurboKind::SuitMultiplier(suit),
    )
}

pub fn default_turbos() -> Vec<TurboDef> {
    vec![
        TurboDef::new(
            "mul_score_x2",
            "The Multer",
            "Doubles the final multiplier.",
            TurboKind::DoubleMultiplier,
        ),
        TurboDef::new(
            "push_score_x2",
            "The Pusher",
            "Doubles the final chip payout.",
            TurboKind::DoubleChips,
        ),
        suit_turbo("mult_plus3_clubs", "In the Club", Suit::Clubs),
        suit_turbo("mult_plus3_diamonds", "Girls Best Friend", Suit::Diamonds),
        suit_turbo("mult_plus3_spades", "The Digger", Suit::Spades),
        suit_turbo("mult_plus3_hearts", "Cupido", Suit::Hearts),
    ]
}
