use super::*;
use crate::{Event, EventBus, ShopOfferKind};
use tracing::debug;

impl GameSession {
    pub(super) fn enter_shop(&mut self, events: &mut EventBus) {
        let owned = self.inventory.owned_turbos();
        let shop = ShopState::generate(&self.config.shop, &self.content, &mut self.rng, &owned);
        events.push(Event::ShopEntered {
            cards: shop.cards.len(),
            turbos: shop.turbos.len(),
        });
        self.shop = Some(shop);

        let held = std::mem::take(&mut self.hand);
        self.deck.discard(held);
        self.hand = self.deck.draw_up_to(self.config.max_hand_size);
        events.push(Event::HandDealt {
            count: self.hand.len(),
        });
        self.state.phase = Phase::Shop;
        debug!(session = %self.id, round = self.state.current_round, "shop opened");
    }

    pub fn shop(&self) -> Result<&ShopState, SessionError> {
        self.ensure_phase(Phase::Shop)?;
        self.shop
            .as_ref()
            .ok_or(SessionError::WrongPhase(self.state.phase))
    }

    pub fn reroll_shop(&mut self, events: &mut EventBus) -> Result<(), SessionError> {
        self.ensure_phase(Phase::Shop)?;
        let cost = self
            .shop
            .as_ref()
            .map(|shop| shop.reroll_cost)
            .unwrap_or(self.config.shop.reroll_price);
        self.ensure_funds(cost)?;
        let owned = self.inventory.owned_turbos();
        let Some(shop) = self.shop.as_mut() else {
            return Err(SessionError::WrongPhase(self.state.phase));
        };
        shop.reroll(&self.config.shop, &self.content, &mut self.rng, &owned);
        self.state.money -= cost;
        events.push(Event::ShopRerolled {
            cost,
            money: self.state.money,
        });
        Ok(())
    }

    /// Buy a card: it goes into the current draw pile now and is queued for
    /// the next deck rebuild.
    pub fn buy_card(&mut self, index: usize, events: &mut EventBus) -> Result<(), SessionError> {
        self.ensure_phase(Phase::Shop)?;
        self.ensure_funds(self.config.shop.card_price)?;
        let Some(shop) = self.shop.as_mut() else {
            return Err(SessionError::WrongPhase(self.state.phase));
        };
        let price = shop
            .card_price(index)
            .ok_or(SessionError::InvalidCardIndex(index))?;
        if self.state.money < price {
            return Err(SessionError::InsufficientFunds {
                needed: price,
                available: self.state.money,
            });
        }
        let offer = shop
            .take_card(index)
            .ok_or(SessionError::InvalidCardIndex(index))?;
        self.state.money -= offer.price;
        self.deck.shuffle_in(offer.card.clone(), &mut self.rng);
        debug!(session = %self.id, card = %offer.card, "card bought");
        self.purchased_cards.push(offer.card);
        events.push(Event::ShopBought {
            offer: ShopOfferKind::Card,
            cost: offer.price,
            money: self.state.money,
        });
        Ok(())
    }

    pub fn buy_turbo(&mut self, index: usize, events: &mut EventBus) -> Result<(), SessionError> {
        self.ensure_phase(Phase::Shop)?;
        self.ensure_funds(self.config.shop.turbo_price)?;
        let Some(shop) = self.shop.as_mut() else {
            return Err(SessionError::WrongPhase(self.state.phase));
        };
        let offer = shop
            .turbo_offer(index)
            .ok_or(SessionError::InvalidCardIndex(index))?;
        if self.state.money < offer.price {
            return Err(SessionError::InsufficientFunds {
                needed: offer.price,
                available: self.state.money,
            });
        }
        self.inventory.check_add_turbo(&offer.id)?;
        let offer = shop
            .take_turbo(index)
            .ok_or(SessionError::InvalidCardIndex(index))?;
        self.state.money -= offer.price;
        self.inventory.add_turbo(offer.id.clone())?;
        debug!(session = %self.id, turbo = %offer.id, "turbo bought");
        events.push(Event::ShopBought {
            offer: ShopOfferKind::Turbo,
            cost: offer.price,
            money: self.state.money,
        });
        Ok(())
    }
}
