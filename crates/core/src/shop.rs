use crate::{Card, Content, RngState, ShopRule};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CardOffer {
    pub card: Card,
    pub price: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TurboOffer {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShopOfferKind {
    Card,
    Turbo,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShopState {
    pub cards: Vec<CardOffer>,
    pub turbos: Vec<TurboOffer>,
    pub reroll_cost: i64,
}

impl ShopState {
    pub fn generate(
        rule: &ShopRule,
        content: &Content,
        rng: &mut RngState,
        owned_turbos: &HashSet<String>,
    ) -> Self {
        Self {
            cards: generate_cards(rule, content, rng),
            turbos: generate_turbos(rule, content, rng, owned_turbos),
            reroll_cost: rule.reroll_price,
        }
    }

    pub fn reroll(
        &mut self,
        rule: &ShopRule,
        content: &Content,
        rng: &mut RngState,
        owned_turbos: &HashSet<String>,
    ) {
        self.cards = generate_cards(rule, content, rng);
        self.turbos = generate_turbos(rule, content, rng, owned_turbos);
    }

    pub fn card_price(&self, index: usize) -> Option<i64> {
        self.cards.get(index).map(|offer| offer.price)
    }

    pub fn turbo_offer(&self, index: usize) -> Option<&TurboOffer> {
        self.turbos.get(index)
    }

    pub fn take_card(&mut self, index: usize) -> Option<CardOffer> {
        if index < self.cards.len() {
            Some(self.cards.remove(index))
        } else {
            None
        }
    }

    pub fn take_turbo(&mut self, index: usize) -> Option<TurboOffer> {
        if index < self.turbos.len() {
            Some(self.turbos.remove(index))
        } else {
            None
        }
    }

    pub fn shop_cards(&self) -> Vec<Card> {
        self.cards.iter().map(|offer| offer.card.clone()).collect()
    }
}

fn generate_cards(rule: &ShopRule, content: &Content, rng: &mut RngState) -> Vec<CardOffer> {
    (0..rule.card_slots)
        .map(|_| CardOffer {
            card: content.random_shop_card(rng),
            price: rule.card_price,
        })
        .collect()
}

fn generate_turbos(
    rule: &ShopRule,
    content: &Content,
    rng: &mut RngState,
    owned: &HashSet<String>,
) -> Vec<TurboOffer> {
    content
        .pick_turbos(rule.turbo_slots, owned, rng)
        .into_iter()
        .map(|turbo| TurboOffer {
            id: turbo.id,
            name: turbo.name,
            description: turbo.description,
            price: rule.turbo_price,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameConfig;

    #[test]
    fn generates_configured_slots() {
        let config = GameConfig::standard();
        let content = Content::standard();
        let mut rng = RngState::from_seed(4);
        let shop = ShopState::generate(&config.shop, &content, &mut rng, &HashSet::new());
        assert_eq!(shop.cards.len(), 3);
        assert_eq!(shop.turbos.len(), 2);
        assert!(shop.cards.iter().all(|offer| offer.price == 3));
        assert!(shop.turbos.iter().all(|offer| offer.price == 1));
        assert_ne!(shop.turbos[0].id, shop.turbos[1].id);
    }

    #[test]
    fn take_removes_the_offer() {
        let config = GameConfig::standard();
        let content = Content::standard();
        let mut rng = RngState::from_seed(4);
        let mut shop = ShopState::generate(&config.shop, &content, &mut rng, &HashSet::new());
        let second = shop.cards[1].clone();
        assert_eq!(shop.take_card(1), Some(second));
        assert_eq!(shop.cards.len(), 2);
        assert_eq!(shop.take_card(5), None);
    }
}
