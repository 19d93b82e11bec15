//! Detection snapshot: the unit of input to the reconciler
//!
//! One snapshot is produced per detection run (`new_input.json`). Every field
//! is required; a document missing `image_width` is malformed, not defaulted.

use serde::{Deserialize, Serialize};
use crate::types::{Rect, Score};

/// One detection run's output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionSnapshot {
    /// Clutter score (conventionally 0-100)
    pub score: Score,
    /// Capture timestamp, compared by equality only
    pub timestamp: String,
    /// Frame width as captured
    pub image_width: u32,
    /// Frame height as captured
    pub image_height: u32,
    /// Detected objects, in detection order
    pub objects: Vec<Rect>,
}

impl DetectionSnapshot {
    /// Create a new snapshot
    pub fn new(
        score: impl Into<Score>,
        timestamp: impl Into<String>,
        image_width: u32,
        image_height: u32,
        objects: Vec<Rect>,
    ) -> Self {
        Self {
            score: score.into(),
            timestamp: timestamp.into(),
            image_width,
            image_height,
            objects,
        }
    }

    /// Taller than wide
    pub fn is_portrait(&self) -> bool {
        self.image_height > self.image_width
    }
}
