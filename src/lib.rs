//! deskwatch: desk clutter monitor
//!
//! camera snapshot → detector → score → converter → orientation normalizer
//! → log reconciler → `log.json` (+ HTTP feed for the display page)

pub mod config;
pub mod core;
pub mod error;
pub mod types;

pub use config::DeskConfig;
pub use error::{DeskError, DeskResult};

// =============================================================================
// DEFAULTS
// =============================================================================

/// Where the converter drops the newest snapshot
pub const DEFAULT_INPUT_PATH: &str = "data/new_input.json";

/// The persisted log document
pub const DEFAULT_LOG_PATH: &str = "data/log.json";

/// Detector + score output consumed by the converter
pub const DEFAULT_SCORE_OUTPUT_PATH: &str = "input/score_output.json";

/// History entries kept in the log
pub const DEFAULT_MAX_HISTORY: usize = 10;

/// HTTP API bind address
pub const DEFAULT_API_ADDR: &str = "127.0.0.1:5000";

// =============================================================================
// SCORING [C]
// =============================================================================

/// Object count that maps to a clutter score of 100
pub const CLUTTER_MAX_OBJECTS: usize = 20;

/// Detections below this confidence are not counted
pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.5;

/// Timestamp format written into score output
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
