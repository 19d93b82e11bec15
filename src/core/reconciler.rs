//! Log reconciler: folds one detection snapshot into the persisted log
//!
//! Steps:
//! 1. snapshot document must exist (else U002, nothing touched); unreadable
//!    is U007, unparsable is U004
//! 2. load current log, absent = empty history
//! 3. equal timestamp = duplicate (U003); any other timestamp is accepted,
//!    older ones included
//! 4. normalize orientation (coordinates out of range: U004)
//! 5. overwrite current fields, append history, trim to `max_history`
//! 6. save
//!
//! Either the whole commit is saved or the store is not written at all.
//! Callers with more than one writer must serialize calls per document.

use std::io::ErrorKind;
use std::path::Path;

use crate::core::orientation;
use crate::core::store::LogStore;
use crate::error::{DeskError, DeskResult};
use crate::types::{DetectionSnapshot, HistoryEntry, LogState, UpdateOutcome, UpdateReason};

/// Decision for one snapshot against one log state
#[derive(Debug, Clone, PartialEq)]
pub enum Reconciliation {
    /// Same timestamp as the stored state
    Duplicate,
    /// New state to persist
    Updated(LogState),
}

/// Reconciler with a fixed history bound
#[derive(Debug, Clone)]
pub struct LogReconciler {
    max_history: usize,
}

impl Default for LogReconciler {
    fn default() -> Self {
        Self::new(crate::DEFAULT_MAX_HISTORY)
    }
}

impl LogReconciler {
    /// `max_history` below 1 is raised to 1
    pub fn new(max_history: usize) -> Self {
        Self {
            max_history: max_history.max(1),
        }
    }

    pub fn max_history(&self) -> usize {
        self.max_history
    }

    /// Pure step: decide and build the next state, no I/O
    pub fn reconcile(
        &self,
        current: Option<LogState>,
        snapshot: DetectionSnapshot,
    ) -> DeskResult<Reconciliation> {
        let mut state = current.unwrap_or_default();

        if state.timestamp.as_deref() == Some(snapshot.timestamp.as_str()) {
            return Ok(Reconciliation::Duplicate);
        }

        let snapshot = orientation::normalize(snapshot)?;

        state.set_current(&snapshot);
        state.push_history(
            HistoryEntry::new(snapshot.timestamp.clone(), snapshot.score),
            self.max_history,
        );

        Ok(Reconciliation::Updated(state))
    }

    /// Fold an already-read snapshot into the store
    ///
    /// `None` means no snapshot was available at the input location.
    pub fn apply<S: LogStore + ?Sized>(
        &self,
        snapshot: Option<DetectionSnapshot>,
        store: &mut S,
    ) -> UpdateOutcome {
        let Some(snapshot) = snapshot else {
            log::info!("no new snapshot available");
            return UpdateOutcome::rejected(UpdateReason::U002_INPUT_MISSING);
        };

        let current = match store.load() {
            Ok(current) => current,
            Err(e) => {
                log::error!("cannot read log: {}", e);
                return UpdateOutcome::rejected_with(UpdateReason::U005_STORE_UNAVAILABLE, e);
            }
        };

        let timestamp = snapshot.timestamp.clone();
        let rotated = snapshot.is_portrait();

        match self.reconcile(current, snapshot) {
            Err(e) => {
                log::warn!("rejecting snapshot {}: {}", timestamp, e);
                UpdateOutcome::rejected_with(UpdateReason::U004_MALFORMED_INPUT, e)
            }
            Ok(Reconciliation::Duplicate) => {
                log::debug!("snapshot {} already recorded", timestamp);
                UpdateOutcome::rejected(UpdateReason::U003_ALREADY_UP_TO_DATE)
            }
            Ok(Reconciliation::Updated(state)) => {
                if let Err(e) = store.save(&state) {
                    log::error!("cannot write log: {}", e);
                    return UpdateOutcome::rejected_with(UpdateReason::U006_STORE_WRITE_FAILED, e);
                }
                log::info!(
                    "log updated: timestamp={} score={} objects={} rotated={} history={}",
                    timestamp,
                    state.score.clone().unwrap_or_default(),
                    state.objects.len(),
                    rotated,
                    state.history.len()
                );
                UpdateOutcome::accepted(state)
            }
        }
    }

    /// Read the snapshot document at `input_path` and fold it into the store
    pub fn update_log<S: LogStore + ?Sized>(&self, input_path: &Path, store: &mut S) -> UpdateOutcome {
        match read_snapshot(input_path) {
            Ok(snapshot) => self.apply(snapshot, store),
            Err(e @ DeskError::Io(_)) => {
                log::error!("cannot read snapshot {}: {}", input_path.display(), e);
                UpdateOutcome::rejected_with(UpdateReason::U007_INPUT_UNREADABLE, e)
            }
            Err(e) => {
                log::warn!("rejecting snapshot: {}", e);
                UpdateOutcome::rejected_with(UpdateReason::U004_MALFORMED_INPUT, e)
            }
        }
    }
}

/// Read a snapshot document; `Ok(None)` when the file does not exist
///
/// A file that exists but cannot be read is `DeskError::Io`; one that cannot
/// be parsed is `DeskError::MalformedSnapshot`.
pub fn read_snapshot(path: &Path) -> DeskResult<Option<DetectionSnapshot>> {
    let json = match std::fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(DeskError::Io(e)),
    };

    serde_json::from_str(&json)
        .map(Some)
        .map_err(|source| DeskError::MalformedSnapshot {
            path: path.to_path_buf(),
            source,
        })
}
