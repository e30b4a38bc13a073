use crate::{
    Card, Content, Deck, EvalError, GameConfig, GameState, HandResult, Inventory,
    InventoryError, Phase, RngState, ScoreTables, SessionState, ShopState,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

mod hand;
mod helpers;
mod round;
mod shop;
mod state;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("game is already over")]
    GameAlreadyOver,
    #[error("action not allowed in phase {0:?}")]
    WrongPhase(Phase),
    #[error("invalid card index: {0}")]
    InvalidCardIndex(usize),
    #[error("invalid selection size: expected {expected}, got {got}")]
    InvalidSelectionSize { expected: usize, got: usize },
    #[error("no draws remaining")]
    NoDrawsRemaining,
    #[error("not enough money: need ${needed}, have ${available}")]
    InsufficientFunds { needed: i64, available: i64 },
    #[error("no turbo slots left")]
    TurboLimitReached,
    #[error("turbo already active: {0}")]
    TurboAlreadyActive(String),
    #[error("evaluation error: {0}")]
    Eval(#[from] EvalError),
}

impl From<InventoryError> for SessionError {
    fn from(err: InventoryError) -> Self {
        match err {
            InventoryError::NoTurboSlots => SessionError::TurboLimitReached,
            InventoryError::AlreadyActive(id) => SessionError::TurboAlreadyActive(id),
        }
    }
}

/// One player's game. Mutated by a single caller at a time; the owner is
/// responsible for serialising access.
#[derive(Debug)]
pub struct GameSession {
    pub id: String,
    pub config: Arc<GameConfig>,
    pub tables: ScoreTables,
    pub content: Arc<Content>,
    pub rng: RngState,
    pub deck: Deck,
    pub hand: Vec<Card>,
    pub state: GameState,
    pub shop: Option<ShopState>,
    /// Bought cards waiting for the next deck rebuild.
    pub purchased_cards: Vec<Card>,
    pub inventory: Inventory,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayOutcome {
    pub hand_result: HandResult,
    /// Hand score after turbo modifiers.
    pub final_score: i64,
    pub turbo_applied: Vec<String>,
    pub round_complete: bool,
    pub money_awarded: i64,
    pub state: SessionState,
}
