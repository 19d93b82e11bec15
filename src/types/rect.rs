//! Axis-aligned bounding boxes in image-pixel coordinates

use serde::{Deserialize, Serialize};

/// A detected object's bounding box
///
/// `x`/`y` is the top-left corner. A negative corner only shows up when
/// upstream data is already broken; it is carried through, not clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    /// Create a new rectangle
    pub fn new(x: i64, y: i64, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Build from detector corner format `[x1, y1, x2, y2]`
    ///
    /// Returns `None` when the corners are inverted (negative size) or the
    /// size does not fit a `u32`.
    pub fn from_corners(bbox: [i64; 4]) -> Option<Self> {
        let [x1, y1, x2, y2] = bbox;
        let width = u32::try_from(x2.checked_sub(x1)?).ok()?;
        let height = u32::try_from(y2.checked_sub(y1)?).ok()?;
        Some(Self::new(x1, y1, width, height))
    }

    /// Area in square pixels
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}
