pub use turbodeck_core::{Content, EffectCatalog, EffectDef, GameConfig, TurboCatalog, TurboDef};

pub const GAME_CONFIG_FILE: &str = "game.json";
pub const EFFECTS_FILE: &str = "effects.json";
pub const TURBOS_FILE: &str = "turbos.json";
