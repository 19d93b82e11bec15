//! Detector output and the score document built from it

use serde::{Deserialize, Serialize};
use crate::types::Score;

/// One detector hit, corner format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub class_name: String,
    pub confidence: f64,
    /// `[x1, y1, x2, y2]`
    pub bbox: [i64; 4],
}

impl Detection {
    pub fn new(class_name: impl Into<String>, confidence: f64, bbox: [i64; 4]) -> Self {
        Self {
            class_name: class_name.into(),
            confidence,
            bbox,
        }
    }
}

/// `score_output.json`: detections plus the derived clutter score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreOutput {
    pub score: Score,
    pub timestamp: String,
    /// Source image, used by the converter to read the true frame size
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
    pub objects: Vec<Detection>,
}

/// Clutter bands for a 0-100 score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClutterLevel {
    /// Nothing detected
    Tidy,
    /// 1-24
    Organized,
    /// 25-49
    SlightlyCluttered,
    /// 50-74
    Cluttered,
    /// 75-100
    VeryCluttered,
}

impl ClutterLevel {
    /// Band for a score
    pub fn from_score(score: u32) -> Self {
        match score {
            0 => Self::Tidy,
            1..=24 => Self::Organized,
            25..=49 => Self::SlightlyCluttered,
            50..=74 => Self::Cluttered,
            _ => Self::VeryCluttered,
        }
    }

    /// Human-readable assessment
    pub fn message(&self) -> &'static str {
        match self {
            Self::Tidy => "Very tidy, no objects detected",
            Self::Organized => "Organized, a few objects detected",
            Self::SlightlyCluttered => "Slightly cluttered, several objects detected",
            Self::Cluttered => "Cluttered, many objects detected",
            Self::VeryCluttered => "Very cluttered, a large number of objects detected",
        }
    }
}

impl std::fmt::Display for ClutterLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Tidy => "TIDY",
            Self::Organized => "ORGANIZED",
            Self::SlightlyCluttered => "SLIGHTLY_CLUTTERED",
            Self::Cluttered => "CLUTTERED",
            Self::VeryCluttered => "VERY_CLUTTERED",
        };
        write!(f, "{}", name)
    }
}
