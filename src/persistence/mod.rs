//! High score persistence
//!
//! The core needs exactly one scalar with get / set-if-greater semantics.
//! The trait keeps the storage backend out of the simulation; the game-over
//! transition is the only caller.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Persistence port consumed by the game-over transition
pub trait HighScoreStore {
    /// Stored best score; 0 when nothing has been recorded yet
    fn high_score(&self) -> i64;

    /// Overwrite the stored best. Only called with a score strictly
    /// greater than the stored one.
    fn set_high_score(&mut self, score: i64);
}

/// In-memory store for tests and ephemeral sessions
#[derive(Debug, Clone, Default)]
pub struct MemoryHighScoreStore {
    best: i64,
}

impl MemoryHighScoreStore {
    pub fn new(best: i64) -> Self {
        Self { best }
    }
}

impl HighScoreStore for MemoryHighScoreStore {
    fn high_score(&self) -> i64 {
        self.best
    }

    fn set_high_score(&mut self, score: i64) {
        self.best = score;
    }
}

/// On-disk JSON envelope
#[derive(Debug, Serialize, Deserialize)]
struct HighScoreFile {
    high_score: i64,
}

/// JSON-file-backed store
///
/// Read once at startup; a missing or corrupt file reads as 0 (logged, not
/// fatal). Writes go straight through on every update.
#[derive(Debug)]
pub struct FileHighScoreStore {
    path: PathBuf,
    best: i64,
}

impl FileHighScoreStore {
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let best = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<HighScoreFile>(&contents) {
                Ok(file) => {
                    log::info!(
                        "Loaded high score {} from {}",
                        file.high_score,
                        path.display()
                    );
                    file.high_score
                }
                Err(err) => {
                    log::warn!(
                        "Corrupt high score file {}: {err}; treating as 0",
                        path.display()
                    );
                    0
                }
            },
            Err(_) => {
                log::info!("No high score file at {}, starting at 0", path.display());
                0
            }
        };
        Self { path, best }
    }

    fn persist(&self) {
        let envelope = HighScoreFile {
            high_score: self.best,
        };
        let json = match serde_json::to_string_pretty(&envelope) {
            Ok(json) => json,
            Err(err) => {
                log::error!("Failed to serialize high score: {err}");
                return;
            }
        };
        if let Err(err) = fs::write(&self.path, json) {
            log::error!("Failed to write {}: {err}", self.path.display());
        }
    }
}

impl HighScoreStore for FileHighScoreStore {
    fn high_score(&self) -> i64 {
        self.best
    }

    fn set_high_score(&mut self, score: i64) {
        self.best = score;
        self.persist();
        log::info!("High score {} saved", score);
    }
}
