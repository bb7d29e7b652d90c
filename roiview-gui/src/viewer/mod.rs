//! Rendering helpers for the grid images and the minimap.

mod minimap;
mod texture;

pub use minimap::{paint_scene, to_canvas_point, to_color};
pub use texture::decode_image;
