//! ROI records and backend payloads.

use serde::{Deserialize, Serialize};

/// A single filtered region of interest.
///
/// Records are identified by their position in the fetched sequence; the
/// backend does not hand out persistent IDs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoiRecord {
    /// World X coordinate (pixel column in the source image).
    pub x: f64,
    /// World Y coordinate (pixel row in the source image).
    pub y: f64,
    /// Output value associated with row 0.
    pub cy0: f64,
    /// Output value associated with row 1.
    pub cy1: f64,
}

impl RoiRecord {
    /// Creates a new ROI record.
    pub fn new(x: f64, y: f64, cy0: f64, cy1: f64) -> Self {
        Self { x, y, cy0, cy1 }
    }

    /// Returns the output value for a grid row (`cy0` for row 0, `cy1` otherwise).
    #[must_use]
    pub fn output_for_row(&self, row: u8) -> f64 {
        if row == 0 {
            self.cy0
        } else {
            self.cy1
        }
    }

    /// Euclidean distance from this ROI to a world point.
    #[inline]
    #[must_use]
    pub fn distance_to(&self, x: f64, y: f64) -> f64 {
        (self.x - x).hypot(self.y - y)
    }
}

/// Body of `GET /api/roi/all`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoiList {
    pub data: Vec<RoiRecord>,
}

/// Body of `GET /api/stats`.
///
/// Purely informational; fields the backend omits fall back to their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stats {
    /// ROIs remaining after the backend filter.
    pub filtered_rois: u64,
    /// Total rows in the backend CSV.
    pub total_rois_in_csv: u64,
    /// Human-readable filter description.
    pub filter_criteria: String,
    /// Whether the row 0 source image is loaded on the backend.
    pub row0_image_loaded: bool,
    /// Whether the row 1 source image is loaded on the backend.
    pub row1_image_loaded: bool,
}

impl Stats {
    /// True when both source images are available on the backend.
    #[must_use]
    pub fn images_loaded(&self) -> bool {
        self.row0_image_loaded && self.row1_image_loaded
    }
}
