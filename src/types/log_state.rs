//! Persisted desk state (`log.json`)

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use crate::types::{DetectionSnapshot, Rect, Score};

/// One `(timestamp, score)` pair in the rolling history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub timestamp: String,
    pub score: Score,
}

impl HistoryEntry {
    pub fn new(timestamp: impl Into<String>, score: impl Into<Score>) -> Self {
        Self { timestamp: timestamp.into(), score: score.into() }
    }
}

/// Current desk state plus bounded history
///
/// Current fields are absent until the first accepted snapshot. Unknown keys
/// written by other tools are kept in `extra` and written back untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<Score>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_height: Option<u32>,
    #[serde(default)]
    pub objects: Vec<Rect>,
    /// Oldest first
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl LogState {
    /// Empty state used on first run
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the current fields with an (already normalized) snapshot
    pub fn set_current(&mut self, snapshot: &DetectionSnapshot) {
        self.score = Some(snapshot.score.clone());
        self.timestamp = Some(snapshot.timestamp.clone());
        self.image_width = Some(snapshot.image_width);
        self.image_height = Some(snapshot.image_height);
        self.objects = snapshot.objects.clone();
    }

    /// Append to history, then drop the oldest entries beyond `max_history`
    pub fn push_history(&mut self, entry: HistoryEntry, max_history: usize) {
        self.history.push(entry);
        if self.history.len() > max_history {
            let excess = self.history.len() - max_history;
            self.history.drain(..excess);
        }
    }

    /// Has any snapshot ever been accepted?
    pub fn has_current(&self) -> bool {
        self.timestamp.is_some()
    }
}
