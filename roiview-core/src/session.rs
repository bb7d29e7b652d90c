//! Viewer session state: loaded ROI data plus navigation.
//!
//! The ROI set is immutable between loads. Only the selected index and the
//! crop size change in response to user input, and every such change clears
//! the per-cell image failure flags so a stale failure from another ROI or
//! size never hides a fresh image.

use std::collections::HashSet;
use std::fmt;

use rand::Rng;

use crate::error::{Error, Result};
use crate::grid::{CellKey, ImageGrid};
use crate::mapping::{nearest_roi, BoundingBox, MinimapGeometry, Point};
use crate::minimap::MinimapScene;
use crate::roi::{RoiRecord, Stats};

/// Side length of the square crop requested for each channel.
///
/// Always odd and at least [`CropSize::MIN`] so the crop stays centred on the
/// ROI coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CropSize(u32);

impl CropSize {
    /// Smallest allowed crop.
    pub const MIN: u32 = 3;
    /// Initial crop.
    pub const DEFAULT: u32 = 5;
    /// Zoom step.
    pub const STEP: u32 = 2;

    /// Creates a crop size.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCropSize`] for even values or values below 3.
    pub fn new(size: u32) -> Result<Self> {
        if size < Self::MIN || size % 2 == 0 {
            return Err(Error::InvalidCropSize(size));
        }
        Ok(Self(size))
    }

    /// Side length in pixels.
    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }

    /// Smaller crop, or `None` at the floor.
    #[must_use]
    pub fn zoomed_in(self) -> Option<Self> {
        (self.0 > Self::MIN).then(|| Self(self.0 - Self::STEP))
    }

    /// Larger crop. Saturates at the largest odd `u32`.
    #[must_use]
    pub fn zoomed_out(self) -> Self {
        self.0.checked_add(Self::STEP).map_or(self, Self)
    }
}

impl Default for CropSize {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl fmt::Display for CropSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{0}×{0}", self.0)
    }
}

/// Lifecycle of the combined ROI list + stats load.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadStatus {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// A load is in flight.
    Loading,
    /// Data is available (possibly empty).
    Ready,
    /// The last load failed; previous data, if any, is kept.
    Failed(String),
}

/// Result of a successful load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedData {
    pub rois: Vec<RoiRecord>,
    /// `None` when the stats request failed independently of the ROI list.
    pub stats: Option<Stats>,
}

/// Token identifying one load attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// What is currently on screen: changes here invalidate images.
///
/// `epoch` identifies the load the ROI set came from, so the same index and
/// crop size after a reload is a different view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewKey {
    pub index: Option<usize>,
    pub crop_size: u32,
    pub epoch: u64,
}

/// Viewer session.
#[derive(Debug, Default)]
pub struct Session {
    rois: Vec<RoiRecord>,
    bbox: Option<BoundingBox>,
    stats: Option<Stats>,
    current: Option<usize>,
    crop_size: CropSize,
    image_failures: HashSet<CellKey>,
    status: LoadStatus,
    generation: u64,
    in_flight: Option<u64>,
    data_epoch: u64,
}

impl Session {
    /// Creates an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    // --- data store -------------------------------------------------------

    /// Marks a load as started.
    ///
    /// Returns `None` while another load is still in flight, so a repeated
    /// refresh cannot race an earlier one.
    pub fn begin_load(&mut self) -> Option<LoadTicket> {
        if self.in_flight.is_some() {
            return None;
        }
        self.generation += 1;
        self.in_flight = Some(self.generation);
        self.status = LoadStatus::Loading;
        Some(LoadTicket(self.generation))
    }

    /// Applies the outcome of a load started with `ticket`.
    ///
    /// On success the ROI set and stats are replaced wholesale, the bounding
    /// box is recomputed and the selection is clamped into range. On failure
    /// the previous data is left untouched. Returns `false` if the ticket is
    /// stale.
    pub fn finish_load<E: fmt::Display>(
        &mut self,
        ticket: LoadTicket,
        outcome: std::result::Result<LoadedData, E>,
    ) -> bool {
        if self.in_flight != Some(ticket.0) {
            return false;
        }
        self.in_flight = None;

        match outcome {
            Ok(data) => {
                self.bbox = BoundingBox::from_rois(&data.rois);
                self.current = match data.rois.len() {
                    0 => None,
                    n => Some(self.current.unwrap_or(0).min(n - 1)),
                };
                self.rois = data.rois;
                self.stats = data.stats;
                self.image_failures.clear();
                self.data_epoch = ticket.0;
                self.status = LoadStatus::Ready;
            }
            Err(e) => {
                self.status = LoadStatus::Failed(e.to_string());
            }
        }
        true
    }

    /// Current load status.
    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    /// Whether a load is in flight.
    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Error message of the last failed load.
    pub fn error(&self) -> Option<&str> {
        match &self.status {
            LoadStatus::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    /// All ROI records in backend order.
    pub fn rois(&self) -> &[RoiRecord] {
        &self.rois
    }

    /// Number of ROIs.
    pub fn len(&self) -> usize {
        self.rois.len()
    }

    /// True when no ROI is loaded.
    pub fn is_empty(&self) -> bool {
        self.rois.is_empty()
    }

    /// Aggregate stats, if the last successful load got them.
    pub fn stats(&self) -> Option<&Stats> {
        self.stats.as_ref()
    }

    /// Bounding box of the loaded ROIs.
    pub fn bounding_box(&self) -> Option<&BoundingBox> {
        self.bbox.as_ref()
    }

    // --- navigation -------------------------------------------------------

    /// Selected ROI index; `None` exactly when no ROI is loaded.
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// Selected ROI record.
    pub fn current_roi(&self) -> Option<&RoiRecord> {
        self.current.and_then(|i| self.rois.get(i))
    }

    /// Current crop size.
    pub fn crop_size(&self) -> CropSize {
        self.crop_size
    }

    /// Key identifying the displayed ROI and crop size.
    pub fn view(&self) -> ViewKey {
        ViewKey {
            index: self.current,
            crop_size: self.crop_size.get(),
            epoch: self.data_epoch,
        }
    }

    /// Whether `previous` would move.
    pub fn can_previous(&self) -> bool {
        self.current.is_some_and(|i| i > 0)
    }

    /// Whether `next` would move.
    pub fn can_next(&self) -> bool {
        self.current.is_some_and(|i| i + 1 < self.rois.len())
    }

    /// Whether `zoom_in` would shrink the crop.
    pub fn can_zoom_in(&self) -> bool {
        !self.rois.is_empty() && self.crop_size.zoomed_in().is_some()
    }

    /// Whether `zoom_out` would grow the crop. Only false with no data.
    pub fn can_zoom_out(&self) -> bool {
        !self.rois.is_empty()
    }

    /// Selects the previous ROI. No-op at index 0.
    pub fn previous(&mut self) -> bool {
        match self.current {
            Some(i) if i > 0 => self.set_index(i - 1),
            _ => false,
        }
    }

    /// Selects the next ROI. No-op at the last index.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> bool {
        match self.current {
            Some(i) if i + 1 < self.rois.len() => self.set_index(i + 1),
            _ => false,
        }
    }

    /// Selects a uniformly random ROI. No-op with no data.
    pub fn random_sample<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if self.rois.is_empty() {
            return false;
        }
        let idx = rng.gen_range(0..self.rois.len());
        self.set_index(idx)
    }

    /// Selects `idx` directly. Out-of-range indices are ignored.
    pub fn jump_to(&mut self, idx: usize) -> bool {
        if idx >= self.rois.len() {
            return false;
        }
        self.set_index(idx)
    }

    /// Selects the ROI nearest to a minimap click.
    ///
    /// Returns the selected index, or `None` when there is no data.
    pub fn select_at_canvas(&mut self, click: Point, geometry: &MinimapGeometry) -> Option<usize> {
        let bbox = self.bbox?;
        let world = geometry.transform(&bbox).canvas_to_world(click);
        let idx = nearest_roi(&self.rois, world)?;
        self.jump_to(idx);
        Some(idx)
    }

    /// Shrinks the crop by 2 pixels, never below 3. No-op with no data.
    pub fn zoom_in(&mut self) -> bool {
        if self.rois.is_empty() {
            return false;
        }
        match self.crop_size.zoomed_in() {
            Some(size) => self.set_crop_size(size),
            None => false,
        }
    }

    /// Grows the crop by 2 pixels. No-op with no data.
    pub fn zoom_out(&mut self) -> bool {
        if self.rois.is_empty() {
            return false;
        }
        self.set_crop_size(self.crop_size.zoomed_out())
    }

    fn set_index(&mut self, idx: usize) -> bool {
        if self.current == Some(idx) {
            return false;
        }
        self.current = Some(idx);
        self.image_failures.clear();
        true
    }

    fn set_crop_size(&mut self, size: CropSize) -> bool {
        if self.crop_size == size {
            return false;
        }
        self.crop_size = size;
        self.image_failures.clear();
        true
    }

    // --- image grid -------------------------------------------------------

    /// Image cells for the selected ROI.
    pub fn image_grid(&self) -> Option<ImageGrid> {
        self.current.map(|idx| ImageGrid::for_roi(idx, self.crop_size.get()))
    }

    /// Whether a response for `key`, requested while `view` was on screen,
    /// still belongs there.
    pub fn is_current_cell(&self, key: &CellKey, view: ViewKey) -> bool {
        view == self.view() && view.index == Some(key.roi_index)
    }

    /// Records a failed image fetch.
    ///
    /// Late failures for a superseded ROI, crop size or load are dropped.
    pub fn mark_image_failed(&mut self, key: CellKey, view: ViewKey) -> bool {
        if !self.is_current_cell(&key, view) {
            return false;
        }
        self.image_failures.insert(key)
    }

    /// Whether a cell is flagged as failed.
    pub fn is_image_failed(&self, key: &CellKey) -> bool {
        self.image_failures.contains(key)
    }

    /// Clears the failure flag of one cell so it is requested again.
    pub fn retry_cell(&mut self, key: &CellKey) -> bool {
        self.image_failures.remove(key)
    }

    /// Number of cells currently flagged as failed.
    pub fn failed_cell_count(&self) -> usize {
        self.image_failures.len()
    }

    /// Minimap scene for the current selection.
    pub fn minimap_scene(&self, geometry: MinimapGeometry) -> MinimapScene {
        MinimapScene::build(&self.rois, self.bbox.as_ref(), self.current, geometry)
    }
}
