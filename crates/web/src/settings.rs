use std::env;
use std::path::PathBuf;

pub const ADDR_ENV: &str = "TURBODECK_ADDR";
pub const ASSETS_ENV: &str = "TURBODECK_ASSETS";
pub const HIGHSCORES_ENV: &str = "TURBODECK_HIGHSCORES";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub addr: String,
    pub assets_dir: PathBuf,
    pub highscores_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            addr: "0.0.0.0:8001".to_string(),
            assets_dir: PathBuf::from("assets"),
            highscores_path: PathBuf::from("highscores.json"),
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from any key lookup; unset or blank keys keep defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let value = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();
        Self {
            addr: value(ADDR_ENV).unwrap_or(defaults.addr),
            assets_dir: value(ASSETS_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.assets_dir),
            highscores_path: value(HIGHSCORES_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.highscores_path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_keys_use_defaults() {
        assert_eq!(Settings::from_lookup(|_| None), Settings::default());
    }

    #[test]
    fn lookup_overrides_defaults() {
        let settings = Settings::from_lookup(|key| match key {
            ADDR_ENV => Some("127.0.0.1:9000".to_string()),
            HIGHSCORES_ENV => Some("  ".to_string()),
            _ => None,
        });
        assert_eq!(settings.addr, "127.0.0.1:9000");
        assert_eq!(settings.highscores_path, PathBuf::from("highscores.json"));
    }
}
