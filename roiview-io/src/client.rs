//! Blocking client for the ROI image API.
//!
//! Works against either the upstream backend or the `roiview serve` proxy,
//! which expose the same paths. Calls block, so run them off the UI thread.

use std::time::Duration;

use log::{debug, info, warn};
use reqwest::blocking::{Client, Response};
use reqwest::header::CONTENT_TYPE;
use roiview_core::{BackendConfig, GridCell, LoadedData, RoiList, RoiRecord, Stats};

use crate::{Error, Result};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Content type assumed when the backend does not send one.
pub const DEFAULT_IMAGE_CONTENT_TYPE: &str = "image/png";

/// Encoded image returned for one grid cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// HTTP client bound to one API base address.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: Client,
    config: BackendConfig,
}

impl BackendClient {
    /// Creates a client for `config` with a per-request timeout.
    ///
    /// # Errors
    /// Returns an error if the TLS backend cannot be initialised.
    pub fn new(config: BackendConfig, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::http(config.base_url(), e))?;
        Ok(Self { http, config })
    }

    /// Base address this client talks to.
    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// Fetches `GET /api/roi/all`.
    ///
    /// # Errors
    /// Fails on transport errors, non-success status or a malformed body.
    pub fn fetch_rois(&self) -> Result<Vec<RoiRecord>> {
        let url = self.config.roi_list_url();
        let body = self.get_text(&url)?;
        let list: RoiList =
            serde_json::from_str(&body).map_err(|source| Error::Decode { url, source })?;
        Ok(list.data)
    }

    /// Fetches `GET /api/stats`.
    ///
    /// # Errors
    /// Fails on transport errors, non-success status or a malformed body.
    pub fn fetch_stats(&self) -> Result<Stats> {
        let url = self.config.stats_url();
        let body = self.get_text(&url)?;
        serde_json::from_str(&body).map_err(|source| Error::Decode { url, source })
    }

    /// Loads the ROI list and the stats.
    ///
    /// Only the ROI list is required; a stats failure is logged and reported
    /// as `stats: None`.
    ///
    /// # Errors
    /// Fails when the ROI list cannot be fetched.
    pub fn load_all(&self) -> Result<LoadedData> {
        let rois = self.fetch_rois()?;
        let stats = match self.fetch_stats() {
            Ok(stats) => Some(stats),
            Err(e) => {
                warn!("stats unavailable: {e}");
                None
            }
        };
        info!(
            "loaded {} ROIs from {} (stats: {})",
            rois.len(),
            self.config.base_url(),
            if stats.is_some() { "yes" } else { "no" }
        );
        Ok(LoadedData { rois, stats })
    }

    /// Fetches the encoded crop for one grid cell.
    ///
    /// # Errors
    /// Fails on transport errors or a non-success status.
    pub fn fetch_image(&self, cell: &GridCell) -> Result<ImagePayload> {
        let url = self.config.join(&cell.path);
        debug!("GET {url}");
        let response = self.send(&url)?;
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(DEFAULT_IMAGE_CONTENT_TYPE)
            .to_string();
        let bytes = response.bytes().map_err(|e| Error::http(&url, e))?;
        Ok(ImagePayload {
            content_type,
            bytes: bytes.to_vec(),
        })
    }

    fn get_text(&self, url: &str) -> Result<String> {
        debug!("GET {url}");
        self.send(url)?.text().map_err(|e| Error::http(url, e))
    }

    fn send(&self, url: &str) -> Result<Response> {
        let response = self
            .http
            .get(url)
            .send()
            .map_err(|e| Error::http(url, e))?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }
}
