//! Image grid layout: two rows of five channel crops per ROI.

use std::fmt;

use crate::error::{Error, Result};
use crate::roi::RoiRecord;

/// Number of image rows (one per source image).
pub const ROWS: u8 = 2;
/// Number of channel crops per row.
pub const CHANNELS: u8 = 5;

/// Identity of one grid cell: (ROI index, row, channel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellKey {
    pub roi_index: usize,
    pub row: u8,
    pub channel: u8,
}

impl CellKey {
    /// Creates a cell key, rejecting rows and channels outside the grid.
    pub fn new(roi_index: usize, row: u8, channel: u8) -> Result<Self> {
        if row >= ROWS || channel >= CHANNELS {
            return Err(Error::InvalidCell { row, channel });
        }
        Ok(Self {
            roi_index,
            row,
            channel,
        })
    }

    /// Relative request path for this cell at a given crop size.
    #[must_use]
    pub fn image_path(&self, crop_size: u32) -> String {
        format!(
            "/api/roi/{}/image?row={}&channel={}&size={}",
            self.roi_index, self.row, self.channel, crop_size
        )
    }
}

impl fmt::Display for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ROI {} Row {} Ch {}",
            self.roi_index, self.row, self.channel
        )
    }
}

/// One image cell of the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridCell {
    pub key: CellKey,
    pub crop_size: u32,
    /// Path and query relative to the API base address.
    pub path: String,
}

impl GridCell {
    /// Label shown in the top-left corner (`Ch1`..`Ch5`).
    pub fn channel_label(&self) -> String {
        format!("Ch{}", self.key.channel + 1)
    }

    /// Label shown in the bottom-left corner (`5×5`).
    pub fn size_label(&self) -> String {
        format!("{0}×{0}", self.crop_size)
    }
}

/// The full 2×5 image layout for one ROI at one crop size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageGrid {
    pub roi_index: usize,
    pub crop_size: u32,
    pub rows: Vec<Vec<GridCell>>,
}

impl ImageGrid {
    /// Builds all cells for a ROI.
    pub fn for_roi(roi_index: usize, crop_size: u32) -> Self {
        let rows = (0..ROWS)
            .map(|row| {
                (0..CHANNELS)
                    .map(|channel| {
                        let key = CellKey {
                            roi_index,
                            row,
                            channel,
                        };
                        GridCell {
                            key,
                            crop_size,
                            path: key.image_path(crop_size),
                        }
                    })
                    .collect()
            })
            .collect();

        Self {
            roi_index,
            crop_size,
            rows,
        }
    }

    /// Iterates over every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &GridCell> {
        self.rows.iter().flatten()
    }
}

/// Content of the sixth (non-image) column of a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputCell {
    /// Output value with no decimals, or `-` when no ROI is selected.
    pub value: String,
    /// Position lines (`x: 12.3`, `y: 45.6`), empty when no ROI is selected.
    pub position: Vec<String>,
}

impl OutputCell {
    /// Formats the output column for `row` of `roi`.
    pub fn for_row(roi: Option<&RoiRecord>, row: u8) -> Self {
        match roi {
            Some(roi) => Self {
                value: format!("{:.0}", roi.output_for_row(row)),
                position: vec![format!("x: {:.1}", roi.x), format!("y: {:.1}", roi.y)],
            },
            None => Self {
                value: "-".to_string(),
                position: Vec::new(),
            },
        }
    }
}
