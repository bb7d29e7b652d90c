//! Application message types for async communication.
//!
//! Messages are sent from background worker threads to the main UI thread
//! via channels to report finished loads and image fetches.

use std::time::Duration;

use egui::ColorImage;
use roiview_core::{CellKey, LoadTicket, LoadedData, ViewKey};

/// Messages sent from background workers to the UI thread.
pub enum AppMessage {
    /// ROI list (and possibly stats) loaded.
    ///
    /// Contains:
    /// - `LoadTicket`: The load attempt this answers
    /// - `LoadedData`: ROI records and optional stats
    /// - `Duration`: Time taken to load
    DataLoaded(LoadTicket, LoadedData, Duration),

    /// ROI list could not be loaded.
    DataLoadError(LoadTicket, String),

    /// One grid cell image decoded.
    ///
    /// `view` is the view the request was made for.
    ImageLoaded {
        key: CellKey,
        view: ViewKey,
        image: ColorImage,
    },

    /// One grid cell image could not be fetched or decoded.
    ImageFailed {
        key: CellKey,
        view: ViewKey,
        error: String,
    },
}
