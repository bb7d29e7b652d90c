//! Coordinate mapping between ROI world space and the minimap canvas.
//!
//! A single uniform scale is used for both axes so the minimap keeps the true
//! spatial layout of the ROIs. The point cloud is centred inside the padded
//! canvas on each axis independently.

use crate::roi::RoiRecord;

/// A 2D point, in either world or canvas units depending on context.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Minimal axis-aligned rectangle containing all ROI world coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Computes the bounding box of a ROI set, or `None` if it is empty.
    pub fn from_rois(rois: &[RoiRecord]) -> Option<Self> {
        let first = rois.first()?;
        let init = Self {
            min_x: first.x,
            max_x: first.x,
            min_y: first.y,
            max_y: first.y,
        };
        Some(rois.iter().skip(1).fold(init, |bb, roi| Self {
            min_x: bb.min_x.min(roi.x),
            max_x: bb.max_x.max(roi.x),
            min_y: bb.min_y.min(roi.y),
            max_y: bb.max_y.max(roi.y),
        }))
    }

    /// Horizontal extent.
    #[inline]
    pub fn span_x(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Vertical extent.
    #[inline]
    pub fn span_y(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Fixed-size canvas the minimap is drawn into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinimapGeometry {
    /// Canvas width in pixels.
    pub width: f64,
    /// Canvas height in pixels.
    pub height: f64,
    /// Empty margin kept on every side.
    pub padding: f64,
}

impl Default for MinimapGeometry {
    fn default() -> Self {
        Self {
            width: 300.0,
            height: 300.0,
            padding: 20.0,
        }
    }
}

impl MinimapGeometry {
    /// Drawable width inside the padding.
    #[inline]
    pub fn inner_width(&self) -> f64 {
        self.width - 2.0 * self.padding
    }

    /// Drawable height inside the padding.
    #[inline]
    pub fn inner_height(&self) -> f64 {
        self.height - 2.0 * self.padding
    }

    /// Builds the transform for a given bounding box.
    pub fn transform(&self, bbox: &BoundingBox) -> CanvasTransform {
        CanvasTransform::new(bbox, self)
    }
}

/// Precomputed world-to-canvas affine transform (uniform scale plus offset).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasTransform {
    scale: f64,
    offset_x: f64,
    offset_y: f64,
    min_x: f64,
    min_y: f64,
}

impl CanvasTransform {
    /// Computes scale and centring offsets.
    ///
    /// A zero span on either axis is replaced by 1 when computing the scale.
    pub fn new(bbox: &BoundingBox, geometry: &MinimapGeometry) -> Self {
        let span_x = bbox.span_x();
        let span_y = bbox.span_y();
        let scale_x = geometry.inner_width() / non_zero(span_x);
        let scale_y = geometry.inner_height() / non_zero(span_y);
        let scale = scale_x.min(scale_y);

        Self {
            scale,
            offset_x: geometry.padding + (geometry.inner_width() - span_x * scale) / 2.0,
            offset_y: geometry.padding + (geometry.inner_height() - span_y * scale) / 2.0,
            min_x: bbox.min_x,
            min_y: bbox.min_y,
        }
    }

    /// Uniform world-to-canvas scale factor.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Maps a world point to canvas pixels.
    #[inline]
    pub fn world_to_canvas(&self, world: Point) -> Point {
        Point {
            x: self.offset_x + (world.x - self.min_x) * self.scale,
            y: self.offset_y + (world.y - self.min_y) * self.scale,
        }
    }

    /// Maps canvas pixels back to world coordinates.
    #[inline]
    pub fn canvas_to_world(&self, canvas: Point) -> Point {
        Point {
            x: (canvas.x - self.offset_x) / self.scale + self.min_x,
            y: (canvas.y - self.offset_y) / self.scale + self.min_y,
        }
    }
}

#[allow(clippy::float_cmp)]
fn non_zero(span: f64) -> f64 {
    if span == 0.0 {
        1.0
    } else {
        span
    }
}

/// Maps a world point to canvas pixels.
pub fn world_to_canvas(point: Point, bbox: &BoundingBox, geometry: &MinimapGeometry) -> Point {
    geometry.transform(bbox).world_to_canvas(point)
}

/// Maps canvas pixels back to world coordinates.
pub fn canvas_to_world(point: Point, bbox: &BoundingBox, geometry: &MinimapGeometry) -> Point {
    geometry.transform(bbox).canvas_to_world(point)
}

/// Index of the ROI closest to `world` by Euclidean distance.
///
/// Linear scan; ties resolve to the lowest index. Returns `None` for an empty set.
pub fn nearest_roi(rois: &[RoiRecord], world: Point) -> Option<usize> {
    let mut nearest: Option<(usize, f64)> = None;
    for (idx, roi) in rois.iter().enumerate() {
        let dist = roi.distance_to(world.x, world.y);
        match nearest {
            Some((_, best)) if dist >= best => {}
            _ => nearest = Some((idx, dist)),
        }
    }
    nearest.map(|(idx, _)| idx)
}
