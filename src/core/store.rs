//! Persisted log store
//!
//! A store holds the single `LogState` document. "Never written" is a normal
//! state (`Ok(None)`); a document that exists but cannot be parsed is an
//! error and is never replaced with an empty history.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{DeskError, DeskResult};
use crate::types::LogState;

/// Single-document read/write of the log state
pub trait LogStore {
    /// Current document, `None` if none was ever saved
    fn load(&self) -> DeskResult<Option<LogState>>;

    /// Replace the document
    fn save(&mut self, state: &LogState) -> DeskResult<()>;
}

/// `log.json` on disk, pretty-printed with 2-space indent
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl LogStore for JsonFileStore {
    fn load(&self) -> DeskResult<Option<LogState>> {
        let json = match std::fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("no log at {}, starting fresh", self.path.display());
                return Ok(None);
            }
            Err(e) => return Err(DeskError::Io(e)),
        };

        serde_json::from_str(&json)
            .map(Some)
            .map_err(|source| DeskError::StoreCorrupt {
                path: self.path.clone(),
                source,
            })
    }

    fn save(&mut self, state: &LogState) -> DeskResult<()> {
        let json = serde_json::to_string_pretty(state)?;

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }

        // Write beside the target then rename, so readers never see half a file
        let tmp = self.temp_path();
        if let Err(e) = std::fs::write(&tmp, json).and_then(|()| std::fs::rename(&tmp, &self.path)) {
            let _ = std::fs::remove_file(&tmp);
            return Err(DeskError::Io(e));
        }

        log::debug!("log written to {}", self.path.display());
        Ok(())
    }
}

/// Store kept in memory, for tests and embedding
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Option<LogState>,
    saves: usize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing document
    pub fn with_state(state: LogState) -> Self {
        Self {
            state: Some(state),
            saves: 0,
        }
    }

    /// Number of successful `save` calls
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl LogStore for InMemoryStore {
    fn load(&self) -> DeskResult<Option<LogState>> {
        Ok(self.state.clone())
    }

    fn save(&mut self, state: &LogState) -> DeskResult<()> {
        self.state = Some(state.clone());
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DetectionSnapshot, HistoryEntry, Rect};

    fn sample_state() -> LogState {
        let mut state = LogState::new();
        state.set_current(&DetectionSnapshot::new(
            30.0,
            "2025-06-06 09:00",
            640,
            480,
            vec![Rect::new(1, 2, 3, 4)],
        ));
        state.push_history(HistoryEntry::new("2025-06-06 09:00", 30.0), 10);
        state
    }

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("log.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("nested/data/log.json"));
        let state = sample_state();

        store.save(&state).unwrap();
        assert_eq!(store.load().unwrap(), Some(state));
        assert!(!store.temp_path().exists());
    }

    #[test]
    fn test_corrupt_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = JsonFileStore::new(&path).load().unwrap_err();
        assert!(matches!(err, DeskError::StoreCorrupt { .. }));
    }

    #[test]
    fn test_wrong_typed_history_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.json");
        std::fs::write(&path, r#"{"history": "yesterday"}"#).unwrap();

        assert!(matches!(
            JsonFileStore::new(&path).load(),
            Err(DeskError::StoreCorrupt { .. })
        ));
    }

    #[test]
    fn test_in_memory_counts_saves() {
        let mut store = InMemoryStore::new();
        assert!(store.load().unwrap().is_none());
        store.save(&sample_state()).unwrap();
        store.save(&sample_state()).unwrap();
        assert_eq!(store.save_count(), 2);
        assert_eq!(store.load().unwrap(), Some(sample_state()));
    }

    #[test]
    fn test_failed_rename_removes_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.json");
        // A directory in the target's place makes the rename fail
        std::fs::create_dir_all(path.join("occupied")).unwrap();

        let mut store = JsonFileStore::new(&path);
        assert!(matches!(store.save(&sample_state()), Err(DeskError::Io(_))));
        assert!(!store.temp_path().exists());
        assert!(path.join("occupied").is_dir());
    }
}
