//! Backend proxy routes.
//!
//! Each handler substitutes the configured backend address, forwards the
//! request with its path segment and query string untouched and relays the
//! answer. The backend is trusted to validate parameters.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::extract::{OriginalUri, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use log::{debug, warn};
use roiview_core::config::{ROI_LIST_PATH, STATS_PATH};
use roiview_core::BackendConfig;
use serde_json::Value;

use crate::error::ProxyError;

/// Route of one ROI crop; the index segment is forwarded as received.
const IMAGE_ROUTE: &str = "/api/roi/:roi_idx/image";

/// Content type sent when the backend omits one on an image.
pub const DEFAULT_IMAGE_CONTENT_TYPE: &str = "image/png";

/// Shared, read-only proxy state.
#[derive(Clone)]
pub struct ProxyState {
    config: Arc<BackendConfig>,
    http: reqwest::Client,
}

impl ProxyState {
    /// Builds the state with one pooled upstream client.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: BackendConfig, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            config: Arc::new(config),
            http,
        })
    }

    /// Backend this proxy forwards to.
    pub fn config(&self) -> &BackendConfig {
        &self.config
    }
}

/// Builds the proxy router.
pub fn router(state: ProxyState) -> Router {
    Router::new()
        .route(ROI_LIST_PATH, get(roi_list))
        .route(IMAGE_ROUTE, get(roi_image))
        .route(STATS_PATH, get(stats))
        .with_state(state)
}

async fn roi_image(State(state): State<ProxyState>, OriginalUri(uri): OriginalUri) -> Response {
    let Some(roi_idx) = raw_roi_segment(uri.path()) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let url = state.config.image_url(roi_idx, uri.query());
    match forward_image(&state, &url).await {
        Ok(response) => response,
        Err(e) => {
            warn!("image proxy failed for {url}: {e}");
            e.into_response()
        }
    }
}

/// ROI index segment of an image path, still percent-encoded.
fn raw_roi_segment(path: &str) -> Option<&str> {
    path.strip_prefix("/api/roi/")?.strip_suffix("/image")
}

async fn forward_image(state: &ProxyState, url: &str) -> Result<Response, ProxyError> {
    debug!("proxy GET {url}");
    let upstream = state.http.get(url).send().await?;

    let status = upstream_status(&upstream);
    let content_type = upstream
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| HeaderValue::from_bytes(v.as_bytes()).ok())
        .unwrap_or_else(|| HeaderValue::from_static(DEFAULT_IMAGE_CONTENT_TYPE));
    let bytes = upstream.bytes().await?;

    let mut response = Response::new(Body::from(bytes));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, content_type);
    Ok(response)
}

/// Stats are always answered with 200 once the body parses.
async fn stats(State(state): State<ProxyState>) -> Response {
    relay_json(&state, &state.config.stats_url(), false).await
}

/// The ROI list keeps the upstream status so clients can detect a failed load.
async fn roi_list(State(state): State<ProxyState>) -> Response {
    relay_json(&state, &state.config.roi_list_url(), true).await
}

/// Relays an upstream JSON document with caching disabled.
async fn relay_json(state: &ProxyState, url: &str, keep_status: bool) -> Response {
    match fetch_json(state, url).await {
        Ok((upstream, value)) => {
            let status = if keep_status {
                upstream
            } else {
                StatusCode::OK
            };
            (status, [(header::CACHE_CONTROL, "no-store")], Json(value)).into_response()
        }
        Err(e) => {
            warn!("proxy GET {url} failed: {e}");
            e.into_response()
        }
    }
}

async fn fetch_json(state: &ProxyState, url: &str) -> Result<(StatusCode, Value), ProxyError> {
    debug!("proxy GET {url}");
    let upstream = state
        .http
        .get(url)
        .header(reqwest::header::CACHE_CONTROL, "no-store")
        .send()
        .await?;
    let status = upstream_status(&upstream);
    Ok((status, upstream.json::<Value>().await?))
}

fn upstream_status(upstream: &reqwest::Response) -> StatusCode {
    StatusCode::from_u16(upstream.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY)
}
