//! Data and image loading workers.
//!
//! Each worker runs on its own thread, performs one blocking request and
//! reports back through the application channel. The UI thread decides
//! whether the answer is still relevant.

use std::sync::mpsc::Sender;
use std::time::Instant;

use log::{debug, error};
use roiview_core::{GridCell, LoadTicket, ViewKey};
use roiview_io::BackendClient;

use crate::message::AppMessage;
use crate::viewer::decode_image;

/// Load the ROI list and stats.
pub fn load_data_worker(client: &BackendClient, ticket: LoadTicket, tx: &Sender<AppMessage>) {
    let start = Instant::now();
    let msg = match client.load_all() {
        Ok(data) => AppMessage::DataLoaded(ticket, data, start.elapsed()),
        Err(e) => {
            error!("failed to load ROI data: {e}");
            AppMessage::DataLoadError(ticket, load_error_message(&e))
        }
    };
    let _ = tx.send(msg);
}

/// User-facing text for a failed ROI list load.
pub fn load_error_message(e: &roiview_io::Error) -> String {
    if e.is_upstream_unavailable() {
        format!("Backend unavailable: {e}")
    } else {
        format!("Failed to load ROI data: {e}")
    }
}

/// Fetch and decode the crop for one grid cell, requested while `view` was
/// on screen.
pub fn fetch_image_worker(
    client: &BackendClient,
    cell: &GridCell,
    view: ViewKey,
    tx: &Sender<AppMessage>,
) {
    let result = client
        .fetch_image(cell)
        .map_err(anyhow::Error::from)
        .and_then(|payload| decode_image(&payload.bytes, &payload.content_type));

    let msg = match result {
        Ok(image) => AppMessage::ImageLoaded {
            key: cell.key,
            view,
            image,
        },
        Err(e) => {
            debug!("image {} failed: {e:#}", cell.key);
            AppMessage::ImageFailed {
                key: cell.key,
                view,
                error: format!("{e:#}"),
            }
        }
    };
    let _ = tx.send(msg);
}
