use super::*;
use crate::{Boss, EventBus, Event};
use tracing::debug;

impl GameSession {
    /// Build a session in `Dealing` with a freshly shuffled deck. Call
    /// [`GameSession::start`] to deal the opening hand.
    pub fn new(
        id: impl Into<String>,
        config: Arc<GameConfig>,
        content: Arc<Content>,
        mut rng: RngState,
    ) -> Self {
        let tables = ScoreTables::from_config(&config);
        let deck = Deck::shuffled(&mut rng);
        let inventory = Inventory::new(config.shop.max_active_turbos);
        Self {
            id: id.into(),
            config,
            tables,
            content,
            rng,
            deck,
            hand: Vec::new(),
            state: GameState::new(),
            shop: None,
            purchased_cards: Vec::new(),
            inventory,
        }
    }

    pub fn with_boss(mut self, boss: Option<Boss>) -> Self {
        self.state.boss = boss;
        self
    }

    pub fn start(&mut self, events: &mut EventBus) -> Result<(), SessionError> {
        if self.state.phase != Phase::Dealing {
            return Err(SessionError::WrongPhase(self.state.phase));
        }
        let dealt = self.deck.draw_up_to(self.config.max_hand_size);
        let count = dealt.len();
        self.hand = dealt;
        self.state.phase = Phase::Active;
        events.push(Event::RoundStarted {
            round: self.state.current_round,
            target: self.round_target(),
            deck_size: self.deck.remaining_count(),
        });
        events.push(Event::HandDealt { count });
        debug!(
            session = %self.id,
            seed = self.rng.seed(),
            boss = ?self.state.boss,
            "session started"
        );
        Ok(())
    }

    pub fn round_target(&self) -> i64 {
        self.config
            .round_target(self.state.current_round)
            .unwrap_or(0)
    }

    pub fn is_game_over(&self) -> bool {
        self.state.phase.is_terminal()
    }

    pub fn is_victory(&self) -> bool {
        self.state.phase == Phase::Victory
    }

    pub fn snapshot(&self) -> SessionState {
        SessionState {
            session_id: self.id.clone(),
            phase: self.state.phase,
            current_round: self.state.current_round,
            hands_played: self.state.hands_played,
            draws_used: self.state.draws_used,
            total_score: self.state.total_score,
            money: self.state.money,
            hand: self.hand.clone(),
            deck_remaining: self.deck.remaining_count(),
            round_target: self.round_target(),
            in_shop: self.state.phase == Phase::Shop,
            shop_cards: self
                .shop
                .as_ref()
                .map(ShopState::shop_cards)
                .unwrap_or_default(),
            shop: self.shop.clone(),
            active_turbo_modifiers: self.inventory.turbos.clone(),
            purchased_cards: self.purchased_cards.len(),
            max_hands: self.config.max_hands,
            max_hand_size: self.config.max_hand_size,
            max_draws: self.config.max_draws,
            boss: self.state.boss,
            is_game_over: self.is_game_over(),
            is_victory: self.is_victory(),
        }
    }

    /// Cards left in the draw pile, ordered by suit then rank.
    pub fn remaining_deck(&self) -> Vec<Card> {
        let mut cards = self.deck.draw.clone();
        cards.sort_by(|a, b| {
            a.suit
                .cmp(&b.suit)
                .then(a.rank.cmp(&b.rank))
                .then_with(|| a.effects.cmp(&b.effects))
        });
        cards
    }

    pub(super) fn ensure_phase(&self, phase: Phase) -> Result<(), SessionError> {
        if self.state.phase.is_terminal() {
            return Err(SessionError::GameAlreadyOver);
        }
        if self.state.phase != phase {
            return Err(SessionError::WrongPhase(self.state.phase));
        }
        Ok(())
    }

    pub(super) fn ensure_funds(&self, needed: i64) -> Result<(), SessionError> {
        if self.state.money < needed {
            return Err(SessionError::InsufficientFunds {
                needed,
                available: self.state.money,
            });
        }
        Ok(())
    }
}
