//! Bounded generation history.
//!
//! Each successful generation (or fix) is recorded with its prompt and
//! the produced code, newest first, capped at a configurable size.
//! History is persisted as JSON in the user data directory so a later
//! run can restore or repair a previous script.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

/// One recorded generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// When the script was produced
    pub timestamp: DateTime<Utc>,

    /// The description (or fix note) that produced it
    pub prompt: String,

    /// The generated script, as returned by the provider
    pub code: String,
}

/// Bounded, newest-first store of past generations.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl History {
    /// Creates an empty history keeping at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Records a generation at the front, evicting the oldest entry once
    /// over capacity.
    pub fn push(&mut self, prompt: impl Into<String>, code: impl Into<String>) {
        self.entries.push_front(HistoryEntry {
            timestamp: Utc::now(),
            prompt: prompt.into(),
            code: code.into(),
        });
        while self.entries.len() > self.capacity {
            self.entries.pop_back();
        }
    }

    /// Returns the entry at `index` (0 = newest).
    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    /// Returns the most recent entry.
    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    /// Iterates entries newest first.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Number of recorded entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Default persistence path in the user data directory.
    pub fn default_path() -> Result<PathBuf, HistoryError> {
        let data_dir = dirs::data_dir().ok_or(HistoryError::NoDataDir)?;
        Ok(data_dir.join("scriptforge").join("history.json"))
    }

    /// Loads history from `path`; a missing file is an empty history.
    pub fn load_from(path: impl AsRef<Path>, capacity: usize) -> Result<Self, HistoryError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::new(capacity));
        }
        let content = std::fs::read_to_string(path)?;
        let mut entries: VecDeque<HistoryEntry> = serde_json::from_str(&content)?;
        entries.truncate(capacity);
        Ok(Self { entries, capacity })
    }

    /// Writes history to `path` as JSON.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), HistoryError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// History persistence errors.
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("Data directory not found")]
    NoDataDir,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
