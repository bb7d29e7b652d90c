//! roiview-server: HTTP proxy in front of the ROI image backend.
//!
//! The proxy exposes `/api/roi/{idx}/image`, `/api/roi/all` and
//! `/api/stats`, forwarding each to the configured backend.
//!

mod error;
mod proxy;

pub use error::ProxyError;
pub use proxy::{router, ProxyState, DEFAULT_IMAGE_CONTENT_TYPE};
