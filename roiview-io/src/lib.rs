//! roiview-io: HTTP access to the ROI image backend.
//!
//! This crate provides a blocking client for the three backend
//! endpoints: the ROI list, the aggregate stats and per-cell crops.
//!

mod client;
mod error;

pub use client::{BackendClient, ImagePayload, DEFAULT_IMAGE_CONTENT_TYPE, DEFAULT_TIMEOUT};
pub use error::{Error, Result};
