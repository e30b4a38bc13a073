use std::fs;
use std::path::PathBuf;
use turbodeck_core::{EffectKind, GameConfig, Suit, TurboKind};
use turbodeck_data::{load_content, load_game_config, EFFECTS_FILE, GAME_CONFIG_FILE, TURBOS_FILE};

fn assets_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("assets")
}

#[test]
fn bundled_assets_match_standard_rules() {
    let config = load_game_config(&assets_root()).expect("load config");
    assert_eq!(config, GameConfig::standard());

    let content = load_content(&assets_root()).expect("load content");
    assert_eq!(
        content.effects.resolve("bonus_chips_50"),
        Some(EffectKind::BonusChips(50))
    );
    assert_eq!(content.effects.resolve("bonus_random"), Some(EffectKind::Mystery));
    assert_eq!(content.turbos.len(), 6);
    let cupido = content.turbos.get("mult_plus3_hearts").expect("cupido");
    assert_eq!(cupido.name, "Cupido");
    assert_eq!(cupido.kind, TurboKind::SuitMultiplier(Suit::Hearts));
}

#[test]
fn missing_files_fall_back_to_builtins() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = load_game_config(dir.path()).expect("config");
    assert_eq!(config, GameConfig::standard());
    let content = load_content(dir.path()).expect("content");
    assert_eq!(content.effects.len(), 4);
    assert_eq!(content.turbos.len(), 6);
}

#[test]
fn partial_config_keeps_standard_values() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(
        dir.path().join(GAME_CONFIG_FILE),
        r#"{"max_hands": 6, "rounds": [{"round": 1, "target": 100}]}"#,
    )
    .expect("write");
    let config = load_game_config(dir.path()).expect("config");
    assert_eq!(config.max_hands, 6);
    assert_eq!(config.final_round(), 1);
    assert_eq!(config.round_target(1), Some(100));
    assert_eq!(config.max_hand_size, 8);
}

#[test]
fn invalid_config_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(
        dir.path().join(GAME_CONFIG_FILE),
        r#"{"rounds": [{"round": 1, "target": 100}, {"round": 3, "target": 300}]}"#,
    )
    .expect("write");
    let err = load_game_config(dir.path()).expect_err("gap in rounds");
    assert!(format!("{err:#}").contains("missing target for round 2"));
}

#[test]
fn duplicate_effect_ids_fail() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(
        dir.path().join(EFFECTS_FILE),
        r#"[
            {"id": "bonus_chips_10", "name": "Ten", "effect": {"bonus_chips": 10}},
            {"id": "bonus_chips_10", "name": "Ten again", "effect": {"bonus_chips": 10}}
        ]"#,
    )
    .expect("write");
    let err = load_content(dir.path()).expect_err("duplicate");
    assert!(format!("{err:#}").contains("duplicate catalog entry: bonus_chips_10"));
}

#[test]
fn custom_catalogs_replace_builtins() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(
        dir.path().join(EFFECTS_FILE),
        r#"[{"id": "lucky", "name": "Lucky", "effect": "mystery"}]"#,
    )
    .expect("write");
    fs::write(
        dir.path().join(TURBOS_FILE),
        r#"[{"id": "spade_boost", "name": "Spades", "effect": {"suit_multiplier": "spades"}}]"#,
    )
    .expect("write");
    let content = load_content(dir.path()).expect("content");
    assert_eq!(content.effects.len(), 1);
    assert_eq!(content.effects.resolve("lucky"), Some(EffectKind::Mystery));
    assert!(content.effects.get("bonus_chips_50").is_none());
    assert_eq!(
        content.turbos.get("spade_boost").map(|def| def.kind),
        Some(TurboKind::SuitMultiplier(Suit::Spades))
    );
}

#[test]
fn malformed_json_names_the_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join(TURBOS_FILE), "not json").expect("write");
    let err = load_content(dir.path()).expect_err("malformed");
    assert!(format!("{err:#}").contains(TURBOS_FILE));
}
