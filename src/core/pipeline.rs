//! detect → score → convert → update, wired to a `DeskConfig`

use std::path::Path;

use crate::config::DeskConfig;
use crate::core::converter::{convert_file, write_json};
use crate::core::detector::Detector;
use crate::core::reconciler::LogReconciler;
use crate::core::scoring::{filter_confident, score_output_now};
use crate::core::store::JsonFileStore;
use crate::error::DeskResult;
use crate::types::UpdateOutcome;

/// One `update_log` run against the configured input and log files
pub fn update_log(config: &DeskConfig) -> UpdateOutcome {
    let mut store = JsonFileStore::new(&config.log_path);
    LogReconciler::new(config.max_history).update_log(&config.input_path, &mut store)
}

/// Full capture pipeline for one image
///
/// Detector and converter failures are returned as errors; once a snapshot
/// is written the reconciler's outcome is returned as-is.
pub fn run_pipeline<D: Detector + ?Sized>(
    detector: &mut D,
    image: &Path,
    config: &DeskConfig,
) -> DeskResult<UpdateOutcome> {
    log::info!("running {} detector on {}", detector.name(), image.display());
    let detections = filter_confident(detector.detect(image)?, config.min_confidence);

    let score = score_output_now(detections, Some(image.to_string_lossy().to_string()));
    write_json(&config.score_output_path, &score)?;

    convert_file(&config.score_output_path, &config.input_path)?;
    Ok(update_log(config))
}
