//! Paints a [`MinimapScene`] with egui shapes.

use egui::{Color32, Pos2, Rect, Rounding, Stroke};
use roiview_core::minimap::{Rgb, BORDER_STROKE};
use roiview_core::{MinimapScene, Point};

use crate::util::f64_to_f32;

/// Convert a scene colour to egui.
pub fn to_color(rgb: Rgb) -> Color32 {
    Color32::from_rgb(rgb[0], rgb[1], rgb[2])
}

fn to_pos(origin: Pos2, point: Point) -> Pos2 {
    Pos2::new(origin.x + f64_to_f32(point.x), origin.y + f64_to_f32(point.y))
}

/// Convert a screen position inside the canvas to canvas coordinates.
pub fn to_canvas_point(canvas: Rect, pos: Pos2) -> Point {
    let local = pos - canvas.min;
    Point::new(f64::from(local.x), f64::from(local.y))
}

/// Draw the scene into `canvas`, whose top-left is the scene origin.
pub fn paint_scene(painter: &egui::Painter, canvas: Rect, scene: &MinimapScene) {
    painter.rect_filled(canvas, Rounding::same(4.0), to_color(scene.background));

    let border = Rect::from_min_max(
        to_pos(canvas.min, scene.border.min),
        to_pos(canvas.min, scene.border.max),
    );
    painter.rect_stroke(
        border,
        Rounding::ZERO,
        Stroke::new(f64_to_f32(BORDER_STROKE), to_color(roiview_core::minimap::BORDER)),
    );

    for marker in &scene.markers {
        let center = to_pos(canvas.min, marker.center);
        let radius = f64_to_f32(marker.radius);
        painter.circle_filled(center, radius, to_color(marker.fill));
        if let Some((color, width)) = marker.outline {
            painter.circle_stroke(center, radius, Stroke::new(f64_to_f32(width), to_color(color)));
        }
    }
}
