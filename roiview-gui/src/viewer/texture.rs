//! Decoding of backend crops into egui images.

use anyhow::Context;
use egui::ColorImage;
use image::ImageFormat;

/// Decode an encoded crop (PNG, JPEG or TIFF) into an egui image.
///
/// The declared `content_type` picks the decoder; when it is unknown or does
/// not match the bytes the format is guessed from the data.
pub fn decode_image(bytes: &[u8], content_type: &str) -> anyhow::Result<ColorImage> {
    let mime = content_type.split(';').next().unwrap_or_default().trim();
    let decoded = ImageFormat::from_mime_type(mime)
        .and_then(|format| image::load_from_memory_with_format(bytes, format).ok())
        .map_or_else(|| image::load_from_memory(bytes), Ok)
        .with_context(|| format!("undecodable image ({content_type})"))?;
    let rgba = decoded.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use image::{Rgb, RgbImage};

    use super::*;

    fn encoded(format: ImageFormat) -> Vec<u8> {
        let mut img = RgbImage::new(5, 3);
        img.put_pixel(2, 1, Rgb([255, 0, 0]));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), format).unwrap();
        bytes
    }

    #[test]
    fn test_decode_png() {
        let color = decode_image(&encoded(ImageFormat::Png), "image/png").unwrap();
        assert_eq!(color.size, [5, 3]);
        assert_eq!(color.pixels[5 + 2], egui::Color32::from_rgb(255, 0, 0));
        assert_eq!(color.pixels[0], egui::Color32::from_rgb(0, 0, 0));
    }

    #[test]
    fn test_decode_declared_tiff() {
        let color = decode_image(&encoded(ImageFormat::Tiff), "image/tiff").unwrap();
        assert_eq!(color.size, [5, 3]);
    }

    #[test]
    fn test_mislabelled_or_parameterised_type() {
        let png = encoded(ImageFormat::Png);
        assert_eq!(decode_image(&png, "image/jpeg").unwrap().size, [5, 3]);
        assert_eq!(decode_image(&png, "image/png; q=1").unwrap().size, [5, 3]);
        assert_eq!(decode_image(&png, "application/octet-stream").unwrap().size, [5, 3]);
    }

    #[test]
    fn test_decode_garbage() {
        let err = decode_image(b"<html>not an image</html>", "text/html").unwrap_err();
        assert!(err.to_string().contains("text/html"));
    }
}
