//! Minimap scene description.
//!
//! The scene is a toolkit-independent list of shapes; the GUI paints it.

use crate::mapping::{BoundingBox, CanvasTransform, MinimapGeometry, Point};
use crate::roi::RoiRecord;

/// RGB colour.
pub type Rgb = [u8; 3];

/// Canvas background.
pub const BACKGROUND: Rgb = [0x1f, 0x29, 0x37];
/// Ordinary ROI marker.
pub const POINT: Rgb = [0x60, 0xa5, 0xfa];
/// Currently selected ROI marker.
pub const HIGHLIGHT: Rgb = [0xfb, 0xbf, 0x24];
/// Outline around the selected marker.
pub const HIGHLIGHT_OUTLINE: Rgb = [0xff, 0xff, 0xff];
/// Border drawn along the padding.
pub const BORDER: Rgb = [0x4b, 0x55, 0x63];

/// Radius of an ordinary marker.
pub const POINT_RADIUS: f64 = 2.0;
/// Radius of the selected marker.
pub const HIGHLIGHT_RADIUS: f64 = 5.0;
/// Stroke width of the selected marker outline.
pub const HIGHLIGHT_STROKE: f64 = 2.0;
/// Stroke width of the border rectangle.
pub const BORDER_STROKE: f64 = 1.0;

/// One ROI marker in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinimapMarker {
    pub index: usize,
    pub center: Point,
    pub radius: f64,
    pub fill: Rgb,
    /// Outline colour and width, only set for the selected ROI.
    pub outline: Option<(Rgb, f64)>,
}

/// Axis-aligned rectangle in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasRect {
    pub min: Point,
    pub max: Point,
}

/// Everything needed to draw one frame of the minimap.
#[derive(Debug, Clone, PartialEq)]
pub struct MinimapScene {
    pub geometry: MinimapGeometry,
    pub background: Rgb,
    /// Markers in draw order. The selected marker is moved to the end so it
    /// is painted on top of its neighbours.
    pub markers: Vec<MinimapMarker>,
    pub border: CanvasRect,
}

impl MinimapScene {
    /// Builds the scene for a ROI set.
    ///
    /// With no bounding box (empty data) only the background and border are
    /// produced.
    pub fn build(
        rois: &[RoiRecord],
        bbox: Option<&BoundingBox>,
        current: Option<usize>,
        geometry: MinimapGeometry,
    ) -> Self {
        let border = CanvasRect {
            min: Point::new(geometry.padding, geometry.padding),
            max: Point::new(
                geometry.width - geometry.padding,
                geometry.height - geometry.padding,
            ),
        };

        let markers = bbox.map_or_else(Vec::new, |bbox| {
            build_markers(rois, &geometry.transform(bbox), current)
        });

        Self {
            geometry,
            background: BACKGROUND,
            markers,
            border,
        }
    }

    /// The selected marker, if any.
    pub fn highlighted(&self) -> Option<&MinimapMarker> {
        self.markers.iter().find(|m| m.outline.is_some())
    }
}

fn build_markers(
    rois: &[RoiRecord],
    transform: &CanvasTransform,
    current: Option<usize>,
) -> Vec<MinimapMarker> {
    let mut markers = Vec::with_capacity(rois.len());
    let mut selected = None;

    for (index, roi) in rois.iter().enumerate() {
        let center = transform.world_to_canvas(Point::new(roi.x, roi.y));
        if Some(index) == current {
            selected = Some(MinimapMarker {
                index,
                center,
                radius: HIGHLIGHT_RADIUS,
                fill: HIGHLIGHT,
                outline: Some((HIGHLIGHT_OUTLINE, HIGHLIGHT_STROKE)),
            });
        } else {
            markers.push(MinimapMarker {
                index,
                center,
                radius: POINT_RADIUS,
                fill: POINT,
                outline: None,
            });
        }
    }

    markers.extend(selected);
    markers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_highlights_current() {
        let rois: Vec<_> = (0..4)
            .map(|i| RoiRecord::new(f64::from(i) * 10.0, 0.0, 255.0, 255.0))
            .collect();
        let bbox = BoundingBox::from_rois(&rois).unwrap();
        let scene = MinimapScene::build(&rois, Some(&bbox), Some(1), MinimapGeometry::default());

        assert_eq!(scene.markers.len(), 4);
        let hl = scene.highlighted().unwrap();
        assert_eq!(hl.index, 1);
        assert_eq!(hl.fill, HIGHLIGHT);
        assert!((hl.radius - HIGHLIGHT_RADIUS).abs() < f64::EPSILON);
        assert_eq!(scene.markers.last().map(|m| m.index), Some(1));
        assert_eq!(
            scene.markers.iter().filter(|m| m.outline.is_none()).count(),
            3
        );
    }

    #[test]
    fn test_scene_border_inside_padding() {
        let scene = MinimapScene::build(&[], None, None, MinimapGeometry::default());
        assert!(scene.markers.is_empty());
        assert!((scene.border.min.x - 20.0).abs() < f64::EPSILON);
        assert!((scene.border.max.y - 280.0).abs() < f64::EPSILON);
        assert_eq!(scene.background, BACKGROUND);
    }
}
