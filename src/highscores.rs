//! High score record and persistence boundary
//!
//! The simulation only needs a get/set pair; where the record actually lives
//! is the embedder's business. Two stores ship with the crate: an in-memory
//! one for tests and embedding, and a JSON file store.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreRecord {
    /// Player's name
    pub name: String,
    /// Player's score
    pub score: u32,
}

impl HighScoreRecord {
    pub fn new(name: &str, score: u32) -> Self {
        Self {
            name: name.to_string(),
            score,
        }
    }
}

/// Does a final score beat the stored record?
pub fn qualifies(current: Option<&HighScoreRecord>, score: u32) -> bool {
    if score == 0 {
        return false;
    }
    current.map_or(true, |record| score > record.score)
}

/// The persistence boundary: a stored (score, name) pair
pub trait HighScoreStore {
    fn get(&self) -> Option<HighScoreRecord>;
    fn set(&mut self, record: &HighScoreRecord);
}

/// In-memory store for tests and embedders with their own persistence
#[derive(Debug, Clone, Default)]
pub struct MemoryHighScores {
    record: Option<HighScoreRecord>,
}

impl MemoryHighScores {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HighScoreStore for MemoryHighScores {
    fn get(&self) -> Option<HighScoreRecord> {
        self.record.clone()
    }

    fn set(&mut self, record: &HighScoreRecord) {
        self.record = Some(record.clone());
    }
}

/// JSON file store. Load and save failures are logged and swallowed — a
/// missing or corrupt file just means no record yet.
#[derive(Debug, Clone)]
pub struct JsonHighScores {
    path: PathBuf,
    record: Option<HighScoreRecord>,
}

impl JsonHighScores {
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let record = match fs::read_to_string(&path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(record) => {
                    log::info!("loaded high score from {}", path.display());
                    Some(record)
                }
                Err(err) => {
                    log::warn!("ignoring corrupt high score file: {err}");
                    None
                }
            },
            Err(_) => {
                log::info!("no high score file, starting fresh");
                None
            }
        };
        Self { path, record }
    }
}

impl HighScoreStore for JsonHighScores {
    fn get(&self) -> Option<HighScoreRecord> {
        self.record.clone()
    }

    fn set(&mut self, record: &HighScoreRecord) {
        self.record = Some(record.clone());
        match serde_json::to_string(record) {
            Ok(json) => {
                if let Err(err) = fs::write(&self.path, json) {
                    log::warn!("failed to write high score: {err}");
                } else {
                    log::info!("high score saved ({} by {})", record.score, record.name);
                }
            }
            Err(err) => log::warn!("failed to encode high score: {err}"),
        }
    }
}
