use crate::{Card, EffectCatalog, Rank, RngState, Suit, TurboCatalog, TurboDef};
use std::collections::HashSet;

/// Read-only catalogs shared by every session.
#[derive(Debug, Clone, Default)]
pub struct Content {
    pub effects: EffectCatalog,
    pub turbos: TurboCatalog,
}

impl Content {
    pub fn new(effects: EffectCatalog, turbos: TurboCatalog) -> Self {
        Self { effects, turbos }
    }

    pub fn standard() -> Self {
        Self::new(EffectCatalog::standard(), TurboCatalog::standard())
    }

    /// A random suit and rank carrying exactly one random catalog effect.
    pub fn random_shop_card(&self, rng: &mut RngState) -> Card {
        let suit = Suit::ALL[rng.index(Suit::ALL.len())];
        let rank = Rank::ALL[rng.index(Rank::ALL.len())];
        let mut card = Card::standard(suit, rank);
        if let Some(effect) = rng.choose(self.effects.entries()) {
            card.effects.push(effect.id.clone());
        }
        card
    }

    /// Up to `count` distinct turbos not in `owned`.
    pub fn pick_turbos(
        &self,
        count: usize,
        owned: &HashSet<String>,
        rng: &mut RngState,
    ) -> Vec<TurboDef> {
        let mut pool: Vec<&TurboDef> = self
            .turbos
            .entries()
            .iter()
            .filter(|turbo| !owned.contains(&turbo.id))
            .collect();
        rng.shuffle(&mut pool);
        pool.into_iter().take(count).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shop_cards_carry_one_catalog_effect() {
        let content = Content::standard();
        let mut rng = RngState::from_seed(5);
        for _ in 0..20 {
            let card = content.random_shop_card(&mut rng);
            assert_eq!(card.effects.len(), 1);
            assert!(content.effects.get(&card.effects[0]).is_some());
        }
    }

    #[test]
    fn turbo_picks_skip_owned() {
        let content = Content::standard();
        let mut rng = RngState::from_seed(9);
        let owned: HashSet<String> = content
            .turbos
            .entries()
            .iter()
            .skip(1)
            .map(|t| t.id.clone())
            .collect();
        let picks = content.pick_turbos(2, &owned, &mut rng);
        assert_eq!(picks.len(), 1);
        assert_eq!(picks[0].id, "mul_score_x2");
    }
}
