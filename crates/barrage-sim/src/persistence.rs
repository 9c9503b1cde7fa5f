//! Scoreboard persistence.
//!
//! The simulation only needs "load a list under a key" and "save a list
//! under a key". `JsonFileStore` writes one pretty-printed JSON file per
//! key; `MemoryStore` keeps raw JSON strings in memory for tests and
//! headless runs.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use barrage_core::state::ScoreEntry;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("scoreboard storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("scoreboard data is malformed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Key/value storage for the scoreboard list.
pub trait ScoreStore {
    /// A missing key is an empty list, not an error.
    fn load_list(&self, key: &str) -> Result<Vec<ScoreEntry>, StoreError>;
    fn save_list(&mut self, key: &str, entries: &[ScoreEntry]) -> Result<(), StoreError>;
}

/// One `<key>.json` file per list inside `dir`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl ScoreStore for JsonFileStore {
    fn load_list(&self, key: &str) -> Result<Vec<ScoreEntry>, StoreError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let json = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&json)?)
    }

    fn save_list(&mut self, key: &str, entries: &[ScoreEntry]) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(entries)?;
        fs::write(self.path_for(key), json)?;
        Ok(())
    }
}

/// In-memory store holding the serialized JSON, so malformed data can be
/// injected the same way a corrupted file would appear.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store raw text under `key`, bypassing serialization.
    pub fn insert_raw(&mut self, key: &str, raw: impl Into<String>) {
        self.data.insert(key.to_string(), raw.into());
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }
}

impl ScoreStore for MemoryStore {
    fn load_list(&self, key: &str) -> Result<Vec<ScoreEntry>, StoreError> {
        match self.data.get(key) {
            Some(json) => Ok(serde_json::from_str(json)?),
            None => Ok(Vec::new()),
        }
    }

    fn save_list(&mut self, key: &str, entries: &[ScoreEntry]) -> Result<(), StoreError> {
        let json = serde_json::to_string(entries)?;
        self.data.insert(key.to_string(), json);
        Ok(())
    }
}
