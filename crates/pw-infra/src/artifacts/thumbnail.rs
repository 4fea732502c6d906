use anyhow::{Context, Result};
use image::{codecs::webp::WebPEncoder, imageops::FilterType, ColorType, GenericImageView};

/// Longest thumbnail edge in pixels. Aspect ratio is always preserved.
pub const THUMBNAIL_MAX_EDGE: u32 = 320;

pub struct RenderedThumbnail {
    pub webp_bytes: Vec<u8>,
    pub source_width: u32,
    pub source_height: u32,
}

/// Scales raster bytes down to a bounded thumbnail, encoded as lossless WebP.
pub struct Thumbnailer {
    max_edge: u32,
}

impl Thumbnailer {
    pub fn new(max_edge: u32) -> Self {
        Self { max_edge }
    }

    pub fn render(&self, image_bytes: &[u8]) -> Result<RenderedThumbnail> {
        let decoded =
            image::load_from_memory(image_bytes).context("decode image bytes for thumbnail")?;
        let (source_width, source_height) = decoded.dimensions();
        let (target_width, target_height) =
            target_size(source_width, source_height, self.max_edge);

        let rgba = if (target_width, target_height) == (source_width, source_height) {
            decoded.to_rgba8()
        } else {
            image::imageops::resize(&decoded, target_width, target_height, FilterType::Triangle)
        };

        let mut webp_bytes = Vec::new();
        let encoder = WebPEncoder::new_lossless(&mut webp_bytes);
        encoder
            .encode(
                rgba.as_raw(),
                target_width,
                target_height,
                ColorType::Rgba8.into(),
            )
            .context("encode thumbnail to webp")?;

        Ok(RenderedThumbnail {
            webp_bytes,
            source_width,
            source_height,
        })
    }
}

impl Default for Thumbnailer {
    fn default() -> Self {
        Self::new(THUMBNAIL_MAX_EDGE)
    }
}

fn target_size(width: u32, height: u32, max_edge: u32) -> (u32, u32) {
    let longest = width.max(height);
    if longest <= max_edge {
        return (width, height);
    }
    let scale = max_edge as f64 / longest as f64;
    let shrink = |edge: u32| ((edge as f64) * scale).round().max(1.0) as u32;
    (shrink(width), shrink(height))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let image = image::RgbImage::new(width, height);
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgb8(image)
            .write_to(
                &mut std::io::Cursor::new(&mut bytes),
                image::ImageFormat::Png,
            )
            .unwrap();
        bytes
    }

    #[test]
    fn oversized_image_shrinks_to_max_edge() {
        let output = Thumbnailer::new(320).render(&png_bytes(800, 600)).unwrap();
        assert_eq!(output.source_width, 800);
        assert_eq!(output.source_height, 600);
        let decoded = image::load_from_memory(&output.webp_bytes).unwrap();
        assert_eq!(decoded.width(), 320);
        assert_eq!(decoded.height(), 240);
    }

    #[test]
    fn portrait_orientation_bounds_the_height() {
        let output = Thumbnailer::new(100).render(&png_bytes(50, 400)).unwrap();
        let decoded = image::load_from_memory(&output.webp_bytes).unwrap();
        assert_eq!(decoded.width(), 13);
        assert_eq!(decoded.height(), 100);
    }

    #[test]
    fn small_image_keeps_its_size() {
        let output = Thumbnailer::new(320).render(&png_bytes(64, 48)).unwrap();
        let decoded = image::load_from_memory(&output.webp_bytes).unwrap();
        assert_eq!(decoded.width(), 64);
        assert_eq!(decoded.height(), 48);
    }

    #[test]
    fn extreme_aspect_ratio_never_collapses_to_zero() {
        assert_eq!(target_size(2000, 1, 320), (320, 1));
        assert_eq!(target_size(1, 2000, 320), (1, 320));
    }

    #[test]
    fn garbage_bytes_fail_to_render() {
        assert!(Thumbnailer::default().render(b"not an image").is_err());
    }
}
