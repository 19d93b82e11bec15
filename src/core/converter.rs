//! Converter: `score_output.json` → `new_input.json`
//!
//! Corner boxes become `{x, y, width, height}` and the true frame size is
//! read from the source image header.

use std::io::ErrorKind;
use std::path::Path;

use serde::Serialize;

use crate::error::{DeskError, DeskResult};
use crate::types::{DetectionSnapshot, Rect, ScoreOutput};

/// Build a snapshot from score output and a known frame size
pub fn convert(score: &ScoreOutput, image_width: u32, image_height: u32) -> DeskResult<DetectionSnapshot> {
    let objects = score
        .objects
        .iter()
        .map(|det| {
            Rect::from_corners(det.bbox).ok_or_else(|| {
                DeskError::InvalidSnapshot(format!(
                    "{} has inverted or out-of-range bbox {:?}",
                    det.class_name, det.bbox
                ))
            })
        })
        .collect::<DeskResult<Vec<_>>>()?;

    Ok(DetectionSnapshot::new(
        score.score.clone(),
        score.timestamp.clone(),
        image_width,
        image_height,
        objects,
    ))
}

/// Frame size from an image header, without decoding pixels
pub fn image_dimensions(path: &Path) -> DeskResult<(u32, u32)> {
    if !path.exists() {
        return Err(DeskError::Image(format!("image not found: {}", path.display())));
    }
    image::image_dimensions(path)
        .map_err(|e| DeskError::Image(format!("{}: {}", path.display(), e)))
}

/// Read score output, attach the image's frame size, write the snapshot
pub fn convert_file(score_output_path: &Path, output_path: &Path) -> DeskResult<DetectionSnapshot> {
    let json = std::fs::read_to_string(score_output_path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DeskError::InputMissing(score_output_path.to_path_buf()),
        _ => DeskError::Io(e),
    })?;
    let score: ScoreOutput = serde_json::from_str(&json).map_err(|source| {
        DeskError::MalformedSnapshot {
            path: score_output_path.to_path_buf(),
            source,
        }
    })?;

    let image_path = score
        .image_path
        .as_deref()
        .ok_or_else(|| DeskError::InvalidSnapshot("score output has no image_path".to_string()))?;
    let (width, height) = image_dimensions(Path::new(image_path))?;

    let snapshot = convert(&score, width, height)?;
    write_json(output_path, &snapshot)?;
    log::info!(
        "snapshot {} written to {} ({}x{}, {} objects)",
        snapshot.timestamp,
        output_path.display(),
        width,
        height,
        snapshot.objects.len()
    );
    Ok(snapshot)
}

/// Pretty JSON to `path`, creating parent directories
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> DeskResult<()> {
    let json = serde_json::to_string_pretty(value)?;
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::write(path, json)?;
    Ok(())
}
