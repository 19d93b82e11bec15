//! Crate-wide error type.
//! Store, converter, detector and config code all return `DeskError`; the
//! reconciler folds it into an `UpdateOutcome` before it reaches a caller.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeskError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Snapshot input
    // ---------------------------
    #[error("Snapshot not found: {}", .0.display())]
    InputMissing(PathBuf),

    #[error("Malformed snapshot {}: {source}", path.display())]
    MalformedSnapshot {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    // ---------------------------
    // Log store
    // ---------------------------
    #[error("Log store corrupt at {}: {source}", path.display())]
    StoreCorrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    // ---------------------------
    // Config
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Collaborators
    // ---------------------------
    #[error("Detector error: {0}")]
    Detector(String),

    #[error("Image error: {0}")]
    Image(String),
}

pub type DeskResult<T> = Result<T, DeskError>;
