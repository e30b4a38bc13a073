use crate::schema::{
    Content, EffectCatalog, EffectDef, GameConfig, TurboCatalog, TurboDef, EFFECTS_FILE,
    GAME_CONFIG_FILE, TURBOS_FILE,
};
use anyhow::{bail, Context};
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{debug, info};
use turbodeck_core::MAX_HAND_CARDS;

/// Read `game.json` from `dir`. A missing file yields the standard rules;
/// fields absent from the file keep their standard values.
pub fn load_game_config(dir: &Path) -> anyhow::Result<GameConfig> {
    let path = dir.join(GAME_CONFIG_FILE);
    if !path.exists() {
        debug!(path = %path.display(), "no game config, using standard rules");
        return Ok(GameConfig::standard());
    }
    let config: GameConfig = load_json(&path)?;
    validate_config(&config).with_context(|| format!("validate {}", path.display()))?;
    info!(
        path = %path.display(),
        rounds = config.rounds.len(),
        "game config loaded"
    );
    Ok(config)
}

pub fn validate_config(config: &GameConfig) -> anyhow::Result<()> {
    if config.rounds.is_empty() {
        bail!("at least one round is required");
    }
    let mut seen = HashSet::new();
    for rule in &config.rounds {
        if !seen.insert(rule.round) {
            bail!("duplicate round {}", rule.round);
        }
        if rule.target <= 0 {
            bail!("round {} target must be positive", rule.round);
        }
    }
    for round in 1..=config.final_round() {
        if config.round_target(round).is_none() {
            bail!("missing target for round {round}");
        }
    }
    if config.play_size == 0 || config.play_size > MAX_HAND_CARDS {
        bail!("play_size must be between 1 and {MAX_HAND_CARDS}");
    }
    if config.max_hand_size < config.play_size {
        bail!(
            "max_hand_size {} is smaller than play_size {}",
            config.max_hand_size,
            config.play_size
        );
    }
    if config.max_hands == 0 {
        bail!("max_hands must be positive");
    }
    Ok(())
}

/// Effect and turbo catalogs from `dir`. Either file may be absent, in which
/// case the built-in catalog is used for it.
pub fn load_content(dir: &Path) -> anyhow::Result<Content> {
    let effects = load_effects(dir)?;
    let turbos = load_turbos(dir)?;
    Ok(Content::new(effects, turbos))
}

pub fn load_effects(dir: &Path) -> anyhow::Result<EffectCatalog> {
    let path = dir.join(EFFECTS_FILE);
    if !path.exists() {
        debug!(path = %path.display(), "no effects file, using built-in catalog");
        return Ok(EffectCatalog::standard());
    }
    let defs: Vec<EffectDef> = load_json(&path)?;
    let mut catalog = EffectCatalog::new();
    for def in defs {
        if def.id.trim().is_empty() {
            bail!("effect id cannot be empty in {}", path.display());
        }
        let id = def.id.clone();
        catalog
            .register(def)
            .with_context(|| format!("register effect {id} from {}", path.display()))?;
    }
    info!(path = %path.display(), count = catalog.len(), "effects loaded");
    Ok(catalog)
}

pub fn load_turbos(dir: &Path) -> anyhow::Result<TurboCatalog> {
    let path = dir.join(TURBOS_FILE);
    if !path.exists() {
        debug!(path = %path.display(), "no turbos file, using built-in catalog");
        return Ok(TurboCatalog::standard());
    }
    let defs: Vec<TurboDef> = load_json(&path)?;
    let mut catalog = TurboCatalog::new();
    for def in defs {
        if def.id.trim().is_empty() {
            bail!("turbo id cannot be empty in {}", path.display());
        }
        let id = def.id.clone();
        catalog
            .register(def)
            .with_context(|| format!("register turbo {id} from {}", path.display()))?;
    }
    info!(path = %path.display(), count = catalog.len(), "turbos loaded");
    Ok(catalog)
}

fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> anyhow::Result<T> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let value = serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(value)
}
