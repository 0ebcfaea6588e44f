//! Pure Rust compression backend built on the `image` crate.
//!
//! | Format | Encoder |
//! |---|---|
//! | JPEG | `image::codecs::jpeg::JpegEncoder` at the configured quality |
//! | PNG | `image::codecs::png::PngEncoder`, best compression, adaptive filter |
//! | WebP | none, left untouched |
//!
//! Files are decoded, re-encoded into memory, and only written back when the
//! new encoding is smaller than what is on disk.

use super::backend::{BackendError, CompressOutcome, ImageBackend};
use super::params::{Codec, CompressParams};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{DynamicImage, ImageReader};
use std::path::Path;

pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    ImageReader::open(path)
        .map_err(BackendError::Io)?
        .with_guessed_format()
        .map_err(BackendError::Io)?
        .decode()
        .map_err(|e| {
            BackendError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
        })
}

fn encode_jpeg(img: DynamicImage, quality: u8) -> Result<Vec<u8>, BackendError> {
    // JPEG has no alpha channel and no 16-bit mode
    let img = match img {
        DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgb8(_) => img,
        other => DynamicImage::ImageRgb8(other.to_rgb8()),
    };
    let mut buf = Vec::new();
    img.write_with_encoder(JpegEncoder::new_with_quality(&mut buf, quality))
        .map_err(|e| BackendError::ProcessingFailed(format!("JPEG encode failed: {}", e)))?;
    Ok(buf)
}

fn encode_png(img: DynamicImage) -> Result<Vec<u8>, BackendError> {
    let mut buf = Vec::new();
    let encoder = PngEncoder::new_with_quality(&mut buf, CompressionType::Best, FilterType::Adaptive);
    img.write_with_encoder(encoder)
        .map_err(|e| BackendError::ProcessingFailed(format!("PNG encode failed: {}", e)))?;
    Ok(buf)
}

/// Overwrite `path` with `bytes` if they are smaller than the current file.
fn replace_if_smaller(path: &Path, bytes: &[u8]) -> Result<CompressOutcome, BackendError> {
    let current = std::fs::metadata(path)?.len();
    if (bytes.len() as u64) < current {
        std::fs::write(path, bytes)?;
        Ok(CompressOutcome::Rewritten)
    } else {
        Ok(CompressOutcome::KeptOriginal)
    }
}

impl ImageBackend for RustBackend {
    fn compress(&self, params: &CompressParams) -> Result<CompressOutcome, BackendError> {
        let encoded = match params.codec {
            Codec::Passthrough => return Ok(CompressOutcome::Skipped),
            Codec::Jpeg => {
                let quality = params.quality.value().clamp(1, 100) as u8;
                encode_jpeg(load_image(&params.path)?, quality)?
            }
            Codec::Png => encode_png(load_image(&params.path)?)?,
        };
        replace_if_smaller(&params.path, &encoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::params::Quality;
    use image::{ImageEncoder, RgbImage, RgbaImage};

    /// A noisy gradient JPEG written at maximum quality, so re-encoding at a
    /// low quality has something to save.
    fn create_test_jpeg(path: &Path, width: u32, height: u32) {
        let img = RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x * 7 % 256) as u8, (y * 13 % 256) as u8, ((x ^ y) % 256) as u8])
        });
        let file = std::fs::File::create(path).unwrap();
        let writer = std::io::BufWriter::new(file);
        JpegEncoder::new_with_quality(writer, 100)
            .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
            .unwrap();
    }

    /// A flat PNG written with no compression effort.
    fn create_test_png(path: &Path, width: u32, height: u32) {
        let img = RgbaImage::from_pixel(width, height, image::Rgba([200, 100, 50, 255]));
        let file = std::fs::File::create(path).unwrap();
        let writer = std::io::BufWriter::new(file);
        PngEncoder::new_with_quality(writer, CompressionType::Fast, FilterType::NoFilter)
            .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgba8)
            .unwrap();
    }

    #[test]
    fn jpeg_recompressed_smaller() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("photo.jpg");
        create_test_jpeg(&path, 256, 256);
        let before = std::fs::metadata(&path).unwrap().len();

        let outcome = RustBackend::new()
            .compress(&CompressParams::new(&path, Quality::new(45)))
            .unwrap();

        assert_eq!(outcome, CompressOutcome::Rewritten);
        assert!(std::fs::metadata(&path).unwrap().len() < before);
        // Still a decodable JPEG of the same size
        assert_eq!(image::image_dimensions(&path).unwrap(), (256, 256));
    }

    #[test]
    fn png_never_grows() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("flat.png");
        create_test_png(&path, 64, 64);
        let before = std::fs::metadata(&path).unwrap().len();

        RustBackend::new()
            .compress(&CompressParams::new(&path, Quality::default()))
            .unwrap();

        assert!(std::fs::metadata(&path).unwrap().len() <= before);
        assert_eq!(image::image_dimensions(&path).unwrap(), (64, 64));
    }

    #[test]
    fn webp_left_untouched() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("hero.webp");
        std::fs::write(&path, b"not really webp").unwrap();

        let outcome = RustBackend::new()
            .compress(&CompressParams::new(&path, Quality::default()))
            .unwrap();

        assert_eq!(outcome, CompressOutcome::Skipped);
        assert_eq!(std::fs::read(&path).unwrap(), b"not really webp");
    }

    #[test]
    fn corrupt_jpeg_is_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("broken.jpg");
        std::fs::write(&path, b"definitely not a jpeg").unwrap();

        let result = RustBackend::new().compress(&CompressParams::new(&path, Quality::default()));
        assert!(matches!(result, Err(BackendError::ProcessingFailed(_))));
    }

    #[test]
    fn missing_file_is_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let result = RustBackend::new().compress(&CompressParams::new(
            &tmp.path().join("gone.png"),
            Quality::default(),
        ));
        assert!(result.is_err());
    }
}
