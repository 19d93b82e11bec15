//! Core types for deskwatch

mod rect;
mod score;
mod snapshot;
mod log_state;
mod detection;
mod outcome;

pub use rect::Rect;
pub use score::Score;
pub use snapshot::DetectionSnapshot;
pub use log_state::{LogState, HistoryEntry};
pub use detection::{Detection, ScoreOutput, ClutterLevel};
pub use outcome::{UpdateOutcome, UpdateReason};
