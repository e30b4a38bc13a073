use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::{info, warn};

pub const MAX_HIGH_SCORES: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HighScore {
    pub name: String,
    pub score: i64,
    /// RFC 3339, UTC.
    pub timestamp: String,
}

/// Best scores, highest first. Storage is best effort: read and write
/// failures are logged and never reach the caller.
#[derive(Debug, Default)]
pub struct HighScoreStore {
    path: Option<PathBuf>,
    scores: Vec<HighScore>,
}

impl HighScoreStore {
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let scores = if path.exists() {
            match read_scores(&path) {
                Ok(scores) => scores,
                Err(err) => {
                    warn!(error = %format!("{err:#}"), "high scores unreadable, starting empty");
                    Vec::new()
                }
            }
        } else {
            Vec::new()
        };
        info!(path = %path.display(), count = scores.len(), "high scores loaded");
        let mut store = Self {
            path: Some(path),
            scores,
        };
        store.normalize();
        store
    }

    pub fn scores(&self) -> &[HighScore] {
        &self.scores
    }

    pub fn record(&mut self, name: &str, score: i64) -> &[HighScore] {
        self.scores.push(HighScore {
            name: name.to_string(),
            score,
            timestamp: now_rfc3339(),
        });
        self.normalize();
        self.persist();
        &self.scores
    }

    // Stable sort keeps the earlier entry ahead on ties.
    fn normalize(&mut self) {
        self.scores.sort_by(|a, b| b.score.cmp(&a.score));
        self.scores.truncate(MAX_HIGH_SCORES);
    }

    fn persist(&self) {
        let Some(path) = &self.path else {
            return;
        };
        if let Err(err) = write_scores(path, &self.scores) {
            warn!(error = %format!("{err:#}"), "failed to save high scores");
        }
    }
}

fn read_scores(path: &Path) -> anyhow::Result<Vec<HighScore>> {
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let scores =
        serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(scores)
}

fn write_scores(path: &Path, scores: &[HighScore]) -> anyhow::Result<()> {
    let body = serde_json::to_vec_pretty(scores).context("encode high scores")?;
    fs::write(path, body).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default()
}
