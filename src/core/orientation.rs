//! Orientation normalizer
//!
//! The display page draws everything in a landscape frame. Portrait captures
//! (height > width) are rotated 90° into that frame before they are stored:
//!
//! - x' = y
//! - y' = W - x - w      (W = original image width)
//! - w' = h, h' = w
//! - frame: W' = H, H' = W
//!
//! Pure coordinate permutation, integer exact. Zero or odd dimensions pass
//! through arithmetically; a corner whose rotated coordinate leaves the `i64`
//! range is an invalid snapshot.

use crate::error::{DeskError, DeskResult};
use crate::types::{DetectionSnapshot, Rect};

/// Rotate a portrait snapshot into the landscape frame; landscape passes through
pub fn normalize(snapshot: DetectionSnapshot) -> DeskResult<DetectionSnapshot> {
    if !snapshot.is_portrait() {
        return Ok(snapshot);
    }

    let original_width = i64::from(snapshot.image_width);
    let objects = snapshot
        .objects
        .iter()
        .map(|rect| rotate_rect_to_landscape(rect, original_width))
        .collect::<DeskResult<Vec<_>>>()?;

    Ok(DetectionSnapshot {
        image_width: snapshot.image_height,
        image_height: snapshot.image_width,
        objects,
        ..snapshot
    })
}

/// Undo `normalize` for a snapshot that was rotated out of portrait
///
/// Only meaningful for snapshots `normalize` actually rotated; it swaps the
/// frame unconditionally.
pub fn rotate_to_portrait(snapshot: DetectionSnapshot) -> DeskResult<DetectionSnapshot> {
    // Landscape height is the portrait capture's width
    let portrait_width = i64::from(snapshot.image_height);
    let objects = snapshot
        .objects
        .iter()
        .map(|rect| rotate_rect_to_portrait(rect, portrait_width))
        .collect::<DeskResult<Vec<_>>>()?;

    Ok(DetectionSnapshot {
        image_width: snapshot.image_height,
        image_height: snapshot.image_width,
        objects,
        ..snapshot
    })
}

fn rotate_rect_to_landscape(rect: &Rect, original_width: i64) -> DeskResult<Rect> {
    let y = original_width
        .checked_sub(rect.x)
        .and_then(|v| v.checked_sub(i64::from(rect.width)))
        .ok_or_else(|| out_of_range(rect))?;
    Ok(Rect {
        x: rect.y,
        y,
        width: rect.height,
        height: rect.width,
    })
}

fn rotate_rect_to_portrait(rect: &Rect, portrait_width: i64) -> DeskResult<Rect> {
    let x = portrait_width
        .checked_sub(rect.y)
        .and_then(|v| v.checked_sub(i64::from(rect.height)))
        .ok_or_else(|| out_of_range(rect))?;
    Ok(Rect {
        x,
        y: rect.x,
        width: rect.height,
        height: rect.width,
    })
}

fn out_of_range(rect: &Rect) -> DeskError {
    DeskError::InvalidSnapshot(format!("object {:?} cannot be rotated, coordinates out of range", rect))
}
