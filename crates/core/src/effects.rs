use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

pub const MONEY_EFFECT_PREFIX: &str = "bonus_money_";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("duplicate catalog entry: {0}")]
    DuplicateEntry(String),
}

/// What a card effect does when its card is triggered.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    BonusChips(i64),
    BonusMultiplier(i64),
    BonusMoney(i64),
    /// Rolls one of the mystery outcomes per triggered card.
    Mystery,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EffectDef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "effect")]
    pub kind: EffectKind,
}

impl EffectDef {
    pub fn new(id: &str, name: &str, description: &str, kind: EffectKind) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            kind,
        }
    }
}

/// Registry of card effects keyed by identifier. Built once at start-up and
/// shared read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct EffectCatalog {
    entries: Vec<EffectDef>,
    by_id: HashMap<String, usize>,
}

impl EffectCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn standard() -> Self {
        let mut catalog = Self::new();
        for def in default_effects() {
            // ids below are distinct
            let _ = catalog.register(def);
        }
        catalog
    }

    pub fn register(&mut self, def: EffectDef) -> Result<(), CatalogError> {
        if self.by_id.contains_key(&def.id) {
            return Err(CatalogError::DuplicateEntry(def.id));
        }
        self.by_id.insert(def.id.clone(), self.entries.len());
        self.entries.push(def);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&EffectDef> {
        self.by_id.get(id).map(|&idx| &self.entries[idx])
    }

    /// Resolve an identifier stored on a card. Unregistered `bonus_money_<N>`
    /// ids still resolve so older saved cards keep paying out; any other
    /// unknown id resolves to nothing.
    pub fn resolve(&self, id: &str) -> Option<EffectKind> {
        if let Some(def) = self.get(id) {
            return Some(def.kind);
        }
        id.strip_prefix(MONEY_EFFECT_PREFIX)
            .and_then(|amount| amount.parse::<u32>().ok())
            .map(|amount| EffectKind::BonusMoney(i64::from(amount)))
    }

    pub fn entries(&self) -> &[EffectDef] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn default_effects() -> Vec<EffectDef> {
    vec![
        EffectDef::new(
            "bonus_chips_50",
            "Bonus Chips",
            "Adds +50 Chips to this card when scored.",
            EffectKind::BonusChips(50),
        ),
        EffectDef::new(
            "bonus_multiplier_5",
            "Bonus Multiplier",
            "Adds +5 to the hand multiplier when this card is part of a scored hand.",
            EffectKind::BonusMultiplier(5),
        ),
        EffectDef::new(
            "bonus_money_3",
            "Golden Touch",
            "Earn $3 when this card is scored.",
            EffectKind::BonusMoney(3),
        ),
        EffectDef::new(
            "bonus_random",
            "Mystery",
            "When scored, grants one of: +$1, +5 multiplier or +25 chips.",
            EffectKind::Mystery,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_has_static_defaults() {
        let catalog = EffectCatalog::standard();
        assert_eq!(catalog.resolve("bonus_chips_50"), Some(EffectKind::BonusChips(50)));
        assert_eq!(
            catalog.resolve("bonus_multiplier_5"),
            Some(EffectKind::BonusMultiplier(5))
        );
    }

    #[test]
    fn duplicate_registration_fails() {
        let mut catalog = EffectCatalog::standard();
        let err = catalog
            .register(EffectDef::new("bonus_chips_50", "Again", "", EffectKind::BonusChips(1)))
            .unwrap_err();
        assert_eq!(err, CatalogError::DuplicateEntry("bonus_chips_50".to_string()));
        assert_eq!(catalog.get("bonus_chips_50").map(|d| d.kind), Some(EffectKind::BonusChips(50)));
    }

    #[test]
    fn resolves_unregistered_money_ids() {
        let catalog = EffectCatalog::new();
        assert_eq!(catalog.resolve("bonus_money_7"), Some(EffectKind::BonusMoney(7)));
        assert_eq!(catalog.resolve("bonus_money_x"), None);
        assert_eq!(catalog.resolve("bonus_money_-3"), None);
        assert_eq!(catalog.resolve("mystery_glow"), None);
    }

    #[test]
    fn effect_def_json_shape() {
        let def: EffectDef = serde_json::from_str(
            r#"{"id":"chips_10","name":"Chips","effect":{"bonus_chips":10}}"#,
        )
        .expect("parse");
        assert_eq!(def.kind, EffectKind::BonusChips(10));
        let mystery: EffectDef =
            serde_json::from_str(r#"{"id":"m","name":"M","effect":"mystery"}"#).expect("parse");
        assert_eq!(mystery.kind, EffectKind::Mystery);
    }
}
