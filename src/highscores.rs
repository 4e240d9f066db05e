//! Score history
//!
//! Append-only list of past run scores, kept sorted descending and trimmed
//! to the top 10. Persisted as a plain JSON number list in the user data
//! directory; I/O failures are logged and never surfaced.

use std::fs;
use std::path::PathBuf;

/// Maximum number of scores to keep
pub const MAX_SCORES: usize = 10;

const SCORES_FILE: &str = "scores.json";

/// Past run scores, best first
#[derive(Debug, Clone, Default)]
pub struct ScoreHistory {
    entries: Vec<u32>,
    path: Option<PathBuf>,
}

impl ScoreHistory {
    /// In-memory history with no backing file (tests, headless runs)
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Load the persisted history, or start fresh
    pub fn load() -> Self {
        let path = data_file(SCORES_FILE);
        let Some(path) = path else {
            log::warn!("no data directory available, scores will not persist");
            return Self::default();
        };

        let entries = match fs::read_to_string(&path) {
            Ok(json) => match serde_json::from_str::<Vec<u32>>(&json) {
                Ok(mut entries) => {
                    entries.sort_unstable_by(|a, b| b.cmp(a));
                    entries.truncate(MAX_SCORES);
                    log::info!("loaded {} past scores", entries.len());
                    entries
                }
                Err(err) => {
                    log::warn!("score file corrupt ({err}), starting fresh");
                    Vec::new()
                }
            },
            Err(_) => Vec::new(),
        };

        Self {
            entries,
            path: Some(path),
        }
    }

    /// Record a finished run. Returns true if this is a new best score.
    pub fn save(&mut self, score: u32) -> bool {
        let new_best = score > self.best();
        let pos = self
            .entries
            .iter()
            .position(|&e| score > e)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, score);
        self.entries.truncate(MAX_SCORES);
        self.persist();
        new_best
    }

    /// Best past score, 0 when empty
    pub fn best(&self) -> u32 {
        self.entries.first().copied().unwrap_or(0)
    }

    pub fn entries(&self) -> &[u32] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn persist(&self) {
        let Some(path) = &self.path else { return };
        let result = path
            .parent()
            .map(fs::create_dir_all)
            .unwrap_or(Ok(()))
            .and_then(|_| {
                let json = serde_json::to_string(&self.entries).unwrap_or_default();
                fs::write(path, json)
            });
        match result {
            Ok(()) => log::debug!("scores saved ({} entries)", self.entries.len()),
            Err(err) => log::warn!("failed to save scores: {err}"),
        }
    }
}

/// Path of a persisted file inside the game's data directory
pub(crate) fn data_file(name: &str) -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("flip-runner").join(name))
}
