//! Key-value persistence for scoreboard state
//!
//! Two logical keys mirror the in-memory state: `currentMatch` holds the
//! active match (absent when none), `matchHistory` the full completed-match
//! array. `Storage` degrades missing or unreadable slots to empty state so
//! a broken data directory never takes the scoreboard down.

use std::collections::HashMap;
use std::fs::{remove_file, rename, File};
use std::io::Write;
use std::path::PathBuf;

use thiserror::Error;
use tracing::warn;

use crate::game::Match;
use crate::history::MatchHistory;

/// Stored key for the active match
pub const CURRENT_MATCH_KEY: &str = "currentMatch";

/// Stored key for the completed-match record
pub const MATCH_HISTORY_KEY: &str = "matchHistory";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// ============================================================================
// BACKENDS
// ============================================================================

/// String-keyed storage with get/set/remove semantics
pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// One JSON file per key under a data directory.
///
/// Writes go to a temp file first and are renamed into place, so a crash
/// mid-write leaves the previous value intact.
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KvStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(path)?))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.key_path(key);
        let temp_path = path.with_extension("tmp");

        {
            let mut file = File::create(&temp_path)?;
            file.write_all(value.as_bytes())?;
            file.flush()?;
            file.sync_all()?;
        }

        rename(&temp_path, path)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let path = self.key_path(key);
        if path.exists() {
            remove_file(path)?;
        }
        Ok(())
    }
}

/// HashMap-backed store for tests and ephemeral sessions
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

// ============================================================================
// SCOREBOARD STORAGE
// ============================================================================

/// State rehydrated from storage at startup
#[derive(Debug, Default)]
pub struct LoadedState {
    pub current: Option<Match>,
    pub history: MatchHistory,
}

/// Adapter mapping scoreboard state onto the two stored keys
pub struct Storage<S: KvStore> {
    store: S,
}

impl<S: KvStore> Storage<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Give the backend back, e.g. to rebuild storage over the same data.
    pub fn into_inner(self) -> S {
        self.store
    }

    /// Read both slots. A missing key yields empty state for that slot; a
    /// slot that fails to read or parse is logged and treated as empty.
    /// Never an error to the caller.
    pub fn load(&self) -> LoadedState {
        LoadedState {
            current: self.read_slot(CURRENT_MATCH_KEY).unwrap_or_default(),
            history: self.read_slot(MATCH_HISTORY_KEY).unwrap_or_default(),
        }
    }

    /// Mirror the current-match slot: `Some` overwrites, `None` removes.
    pub fn save_current(&mut self, current: Option<&Match>) -> Result<(), StoreError> {
        match current {
            Some(m) => {
                let json = serde_json::to_string(m)?;
                self.store.set(CURRENT_MATCH_KEY, &json)
            }
            None => self.store.remove(CURRENT_MATCH_KEY),
        }
    }

    /// Overwrite the stored history with the full serialized record.
    pub fn save_history(&mut self, history: &MatchHistory) -> Result<(), StoreError> {
        let json = serde_json::to_string(history)?;
        self.store.set(MATCH_HISTORY_KEY, &json)
    }

    fn read_slot<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                warn!("Failed to read stored {}: {}", key, err);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!("Failed to parse stored {}, starting empty: {}", key, err);
                None
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
