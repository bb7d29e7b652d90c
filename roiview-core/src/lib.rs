//! roiview-core: core types for the multi-channel ROI viewer.
//!
//! This crate holds everything that does not need a window or a socket:
//! the ROI data model, the minimap coordinate mapping, the navigation
//! session and the image grid layout.
//!

pub mod config;
pub mod error;
pub mod grid;
pub mod mapping;
pub mod minimap;
pub mod roi;
pub mod session;

pub use config::{BackendConfig, BACKEND_URL_ENV, DEFAULT_BACKEND_URL};
pub use error::{Error, Result};
pub use grid::{CellKey, GridCell, ImageGrid, OutputCell, CHANNELS, ROWS};
pub use mapping::{
    canvas_to_world, nearest_roi, world_to_canvas, BoundingBox, CanvasTransform,
    MinimapGeometry, Point,
};
pub use minimap::{MinimapMarker, MinimapScene};
pub use roi::{RoiList, RoiRecord, Stats};
pub use session::{CropSize, LoadStatus, LoadTicket, LoadedData, Session, ViewKey};
