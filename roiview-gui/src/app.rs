//! Main application state and logic.
//!
//! Contains the `RoiViewerApp` struct which owns the navigation session,
//! the per-cell texture cache and the worker channel.

use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;
use std::time::Duration;

use eframe::egui;
use log::{debug, warn};
use roiview_core::{CellKey, GridCell, LoadedData, MinimapGeometry, Session, ViewKey};
use roiview_io::BackendClient;

use crate::message::AppMessage;
use crate::pipeline::{fetch_image_worker, load_data_worker};
use crate::state::{CellImages, UiState};

/// Main application state.
pub struct RoiViewerApp {
    /// Client for the API (proxy or backend).
    pub(crate) client: BackendClient,
    /// ROI data, selection and crop size.
    pub(crate) session: Session,
    /// Textures for the cells on screen.
    pub(crate) images: CellImages,
    /// Minimap canvas geometry.
    pub(crate) geometry: MinimapGeometry,
    /// UI display state.
    pub(crate) ui_state: UiState,
    /// Duration of the last successful load.
    pub(crate) last_load: Option<Duration>,

    /// Message receiver for async operations.
    rx: Receiver<AppMessage>,
    /// Message sender for async operations.
    tx: Sender<AppMessage>,
}

impl RoiViewerApp {
    /// Create the app and start the initial data load.
    pub fn new(client: BackendClient) -> Self {
        let (tx, rx) = channel();
        let mut app = Self {
            client,
            session: Session::new(),
            images: CellImages::default(),
            geometry: MinimapGeometry::default(),
            ui_state: UiState::default(),
            last_load: None,
            rx,
            tx,
        };
        app.load_data();
        app
    }

    /// Load the ROI list and stats asynchronously.
    ///
    /// Ignored while another load is in flight.
    pub fn load_data(&mut self) {
        let Some(ticket) = self.session.begin_load() else {
            debug!("load already in flight");
            return;
        };
        let client = self.client.clone();
        let tx = self.tx.clone();
        thread::spawn(move || load_data_worker(&client, ticket, &tx));
    }

    /// Clear a cell's failure so the next frame fetches it again.
    pub fn retry_cell(&mut self, key: &CellKey) {
        if self.session.retry_cell(key) {
            debug!("retrying image {key}");
        }
    }

    /// Drop cached textures when the ROI, crop size or data changed.
    fn sync_view(&mut self) {
        if self.images.reset_if_changed(self.session.view()) {
            debug!("view changed to {:?}", self.session.view());
        }
    }

    /// Start a fetch for every visible cell that has no texture yet.
    fn request_images(&mut self) {
        self.sync_view();
        let Some(grid) = self.session.image_grid() else {
            return;
        };
        let view = self.session.view();
        for cell in grid.cells() {
            if self.session.is_image_failed(&cell.key) || !self.images.mark_pending(cell.key) {
                continue;
            }
            self.spawn_image_fetch(cell.clone(), view);
        }
    }

    fn spawn_image_fetch(&self, cell: GridCell, view: ViewKey) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        thread::spawn(move || fetch_image_worker(&client, &cell, view, &tx));
    }

    /// Handle pending messages from async workers.
    pub fn handle_messages(&mut self, ctx: &egui::Context) {
        self.sync_view();
        while let Ok(msg) = self.rx.try_recv() {
            match msg {
                AppMessage::DataLoaded(ticket, data, dur) => {
                    if self.session.finish_load(ticket, Ok::<LoadedData, String>(data)) {
                        self.last_load = Some(dur);
                        self.sync_view();
                    }
                }
                AppMessage::DataLoadError(ticket, e) => {
                    self.session.finish_load(ticket, Err::<LoadedData, String>(e));
                }
                AppMessage::ImageLoaded { key, view, image } => {
                    if !self.session.is_current_cell(&key, view) {
                        debug!("dropping late image {key} for {view:?}");
                        continue;
                    }
                    let name = format!("cell-{key}");
                    let texture = ctx.load_texture(name, image, egui::TextureOptions::NEAREST);
                    self.images.insert(key, texture);
                }
                AppMessage::ImageFailed { key, view, error } => {
                    if !self.session.mark_image_failed(key, view) {
                        continue;
                    }
                    warn!("image {key} unavailable: {error}");
                    self.images.finish(&key);
                }
            }
        }
    }

    /// Apply keyboard shortcuts for navigation and zoom.
    fn handle_keyboard(&mut self, ctx: &egui::Context) {
        if !self.ui_state.keyboard_shortcuts || ctx.wants_keyboard_input() {
            return;
        }
        let (prev, next, zoom_in, zoom_out, random) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::ArrowLeft),
                i.key_pressed(egui::Key::ArrowRight),
                i.key_pressed(egui::Key::Plus) || i.key_pressed(egui::Key::Equals),
                i.key_pressed(egui::Key::Minus),
                i.key_pressed(egui::Key::R),
            )
        });

        if prev {
            self.session.previous();
        }
        if next {
            self.session.next();
        }
        if zoom_in {
            self.session.zoom_in();
        }
        if zoom_out {
            self.session.zoom_out();
        }
        if random {
            self.session.random_sample(&mut rand::thread_rng());
        }
    }
}

impl eframe::App for RoiViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_messages(ctx);
        self.handle_keyboard(ctx);

        self.render_top_panel(ctx);
        if self.ui_state.show_side_panel {
            self.render_side_panel(ctx);
        }
        self.render_central_panel(ctx);

        self.request_images();

        if self.session.is_loading() || self.images.has_pending() {
            ctx.request_repaint_after(Duration::from_millis(50));
        }
    }
}
