//! Per-cell texture cache for the image grid.

use std::collections::{HashMap, HashSet};

use roiview_core::{CellKey, ViewKey};

/// Textures and outstanding requests for the cells on screen.
///
/// Everything is keyed by [`CellKey`] and scoped to one [`ViewKey`]. When the
/// view moves to another ROI, crop size or data load the cache is emptied so
/// no stale crop is ever shown.
pub struct CellImages<T = egui::TextureHandle> {
    view: Option<ViewKey>,
    textures: HashMap<CellKey, T>,
    pending: HashSet<CellKey>,
}

impl<T> Default for CellImages<T> {
    fn default() -> Self {
        Self {
            view: None,
            textures: HashMap::new(),
            pending: HashSet::new(),
        }
    }
}

impl<T> CellImages<T> {
    /// Drops everything if `view` differs from the cached one.
    ///
    /// Returns `true` when the cache was reset.
    pub fn reset_if_changed(&mut self, view: ViewKey) -> bool {
        if self.view == Some(view) {
            return false;
        }
        self.view = Some(view);
        self.textures.clear();
        self.pending.clear();
        true
    }

    /// Claims a cell for fetching.
    ///
    /// Returns `false` if the cell already has a texture or a request in flight.
    pub fn mark_pending(&mut self, key: CellKey) -> bool {
        if self.textures.contains_key(&key) {
            return false;
        }
        self.pending.insert(key)
    }

    /// Releases a pending claim without storing anything.
    pub fn finish(&mut self, key: &CellKey) {
        self.pending.remove(key);
    }

    /// Stores a decoded texture for a cell.
    pub fn insert(&mut self, key: CellKey, texture: T) {
        self.pending.remove(&key);
        self.textures.insert(key, texture);
    }

    pub fn texture(&self, key: &CellKey) -> Option<&T> {
        self.textures.get(key)
    }

    pub fn is_pending(&self, key: &CellKey) -> bool {
        self.pending.contains(key)
    }

    /// Whether any request is still outstanding.
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(row: u8, channel: u8) -> CellKey {
        CellKey::new(3, row, channel).unwrap()
    }

    fn view(index: usize, crop_size: u32) -> ViewKey {
        ViewKey {
            index: Some(index),
            crop_size,
            epoch: 1,
        }
    }

    #[test]
    fn test_first_view_resets() {
        let mut images = CellImages::<u32>::default();
        assert!(images.reset_if_changed(view(3, 5)));
        assert!(!images.reset_if_changed(view(3, 5)));
    }

    #[test]
    fn test_pending_claimed_once() {
        let mut images = CellImages::<u32>::default();
        images.reset_if_changed(view(3, 5));

        assert!(images.mark_pending(key(0, 0)));
        assert!(!images.mark_pending(key(0, 0)));
        assert!(images.is_pending(&key(0, 0)));

        images.finish(&key(0, 0));
        assert!(!images.has_pending());
        assert!(images.mark_pending(key(0, 0)));
    }

    #[test]
    fn test_loaded_cell_not_refetched() {
        let mut images = CellImages::<u32>::default();
        images.reset_if_changed(view(3, 5));
        images.mark_pending(key(1, 4));
        images.insert(key(1, 4), 42);

        assert!(!images.is_pending(&key(1, 4)));
        assert!(!images.mark_pending(key(1, 4)));
        assert_eq!(images.texture(&key(1, 4)), Some(&42));
    }

    #[test]
    fn test_view_change_clears() {
        let mut images = CellImages::<u32>::default();
        images.reset_if_changed(view(3, 5));
        images.insert(key(0, 1), 1);
        images.mark_pending(key(0, 2));

        assert!(images.reset_if_changed(view(3, 7)));
        assert!(images.texture(&key(0, 1)).is_none());
        assert!(!images.is_pending(&key(0, 2)));
    }

    #[test]
    fn test_reload_clears() {
        let mut images = CellImages::<u32>::default();
        let before = view(3, 5);
        images.reset_if_changed(before);
        images.insert(key(1, 0), 7);

        let reloaded = ViewKey { epoch: 2, ..before };
        assert!(images.reset_if_changed(reloaded));
        assert!(images.texture(&key(1, 0)).is_none());
        assert!(images.mark_pending(key(1, 0)));
    }
}
