//! Error types for roiview-core.

use thiserror::Error;

/// Result type alias for roiview operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for roiview operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Grid cell outside the 2-row by 5-channel layout.
    #[error("invalid grid cell: row {row}, channel {channel}")]
    InvalidCell { row: u8, channel: u8 },

    /// Crop size that is not an odd number of at least 3 pixels.
    #[error("invalid crop size: {0} (must be odd and >= 3)")]
    InvalidCropSize(u32),

    /// Backend base address that cannot be used to build request URLs.
    #[error("invalid backend URL: {0}")]
    InvalidBackendUrl(String),
}
