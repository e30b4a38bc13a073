//! Core game logic. Keep this crate free of IO and platform concerns.

pub mod cards;
pub mod config;
pub mod content;
pub mod deck;
pub mod effects;
pub mod events;
pub mod hand;
pub mod inventory;
pub mod rng;
pub mod rules;
pub mod scoring;
pub mod session;
pub mod shop;
pub mod state;
pub mod turbo;

pub use cards::*;
pub use config::*;
pub use content::*;
pub use deck::*;
pub use effects::*;
pub use events::*;
pub use hand::*;
pub use inventory::*;
pub use rng::*;
pub use rules::*;
pub use scoring::*;
pub use session::*;
pub use shop::*;
pub use state::*;
pub use turbo::*;
