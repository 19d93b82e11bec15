//! Clutter scoring: object count → 0-100 score

use chrono::{DateTime, Local, TimeZone};

use crate::types::{ClutterLevel, Detection, Score, ScoreOutput};
use crate::{CLUTTER_MAX_OBJECTS, TIMESTAMP_FORMAT};

/// Linear in object count, saturating at `CLUTTER_MAX_OBJECTS`
pub fn clutter_score(object_count: usize) -> u32 {
    let capped = object_count.min(CLUTTER_MAX_OBJECTS);
    (capped * 100 / CLUTTER_MAX_OBJECTS) as u32
}

/// Keep detections at or above `min_confidence`, in order
pub fn filter_confident(detections: Vec<Detection>, min_confidence: f64) -> Vec<Detection> {
    let total = detections.len();
    let kept: Vec<Detection> = detections
        .into_iter()
        .filter(|det| det.confidence >= min_confidence)
        .collect();
    if kept.len() < total {
        log::debug!(
            "dropped {} of {} detections below confidence {:.2}",
            total - kept.len(),
            total,
            min_confidence
        );
    }
    kept
}

/// Build the score document for a detection run captured at `captured_at`
pub fn score_output<Tz: TimeZone>(
    detections: Vec<Detection>,
    image_path: Option<String>,
    captured_at: &DateTime<Tz>,
) -> ScoreOutput
where
    Tz::Offset: std::fmt::Display,
{
    let score = clutter_score(detections.len());
    let level = ClutterLevel::from_score(score);
    log::info!(
        "{} objects → score {} ({})",
        detections.len(),
        score,
        level
    );

    ScoreOutput {
        score: Score::from(score),
        timestamp: captured_at.format(TIMESTAMP_FORMAT).to_string(),
        image_path,
        objects: detections,
    }
}

/// `score_output` stamped with the local wall clock
pub fn score_output_now(detections: Vec<Detection>, image_path: Option<String>) -> ScoreOutput {
    score_output(detections, image_path, &Local::now())
}
