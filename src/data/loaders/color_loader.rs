//! Loader for 8-bit RGB color frames.
//!
//! Produces a channels-first `(3, H, W)` array normalized to 0.0-1.0.

use image::DynamicImage;
use ndarray::Array3;

use crate::data::loader::{FrameLoader, PNG_MAGIC};
use crate::error::{DataError, Result};

/// PNG color type 2: truecolor without an alpha channel.
const PNG_TRUECOLOR: u8 = 2;

/// Whether the PNG header declares 8-bit truecolor (RGB) samples.
///
/// The decoder expands a `tRNS` chunk on such files into an alpha channel;
/// the header still tells the original layout.
fn is_png_rgb8(data: &[u8]) -> bool {
    // Signature (8), IHDR length (4) and tag (4), width (4), height (4)
    data.get(12..16) == Some(b"IHDR".as_slice())
        && data.get(24) == Some(&8)
        && data.get(25) == Some(&PNG_TRUECOLOR)
}

/// Loader for the `_L.png` color frames.
///
/// Only 8-bit, 3-channel RGB sources are accepted. A transparency key
/// (`tRNS`) on an RGB file is ignored; grayscale, palette or true RGBA images
/// are rejected rather than converted.
pub struct ColorLoader;

impl FrameLoader for ColorLoader {
    type Output = Array3<f32>;

    fn id(&self) -> &'static str {
        "color"
    }

    fn can_load(&self, data: &[u8]) -> bool {
        data.starts_with(PNG_MAGIC)
    }

    fn load(&self, data: &[u8]) -> Result<Array3<f32>> {
        let rgb = match image::load_from_memory(data)? {
            DynamicImage::ImageRgb8(rgb) => rgb,
            DynamicImage::ImageRgba8(rgba) if is_png_rgb8(data) => {
                log::trace!("ColorLoader: dropping tRNS alpha from RGB frame");
                DynamicImage::ImageRgba8(rgba).to_rgb8()
            }
            other => {
                return Err(DataError::shape(format!(
                    "expected 8-bit RGB color image, got {:?}",
                    other.color()
                )));
            }
        };

        let (width, height) = rgb.dimensions();
        let mut color = Array3::<f32>::zeros((3, height as usize, width as usize));
        for (x, y, pixel) in rgb.enumerate_pixels() {
            for (c, &value) in pixel.0.iter().enumerate() {
                color[[c, y as usize, x as usize]] = f32::from(value) / 255.0;
            }
        }

        log::trace!("ColorLoader: decoded {}x{} RGB frame", width, height);
        Ok(color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, ImageFormat, Luma, Rgb, RgbImage, RgbaImage};
    use std::io::Cursor;

    fn encode_png(image: DynamicImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_loader_metadata() {
        assert_eq!(ColorLoader.id(), "color");
        assert!(ColorLoader.can_load(PNG_MAGIC));
        assert!(!ColorLoader.can_load(&[0x76, 0x2F, 0x31, 0x01]));
    }

    #[test]
    fn test_channels_first_normalized() {
        let mut img = RgbImage::new(3, 2);
        img.put_pixel(0, 0, Rgb([255, 0, 0]));
        img.put_pixel(2, 1, Rgb([0, 51, 255]));

        let color = ColorLoader
            .load(&encode_png(DynamicImage::ImageRgb8(img)))
            .unwrap();

        assert_eq!(color.shape(), &[3, 2, 3]);
        assert_eq!(color[[0, 0, 0]], 1.0);
        assert_eq!(color[[1, 0, 0]], 0.0);
        assert_eq!(color[[0, 1, 2]], 0.0);
        assert!((color[[1, 1, 2]] - 0.2).abs() < 1e-6);
        assert_eq!(color[[2, 1, 2]], 1.0);
    }

    #[test]
    fn test_rejects_non_rgb() {
        let gray = GrayImage::from_pixel(2, 2, Luma([10]));
        let err = ColorLoader
            .load(&encode_png(DynamicImage::ImageLuma8(gray)))
            .unwrap_err();
        assert!(matches!(err, DataError::Shape { .. }));

        let rgba = RgbaImage::new(2, 2);
        assert!(matches!(
            ColorLoader.load(&encode_png(DynamicImage::ImageRgba8(rgba))),
            Err(DataError::Shape { .. })
        ));
    }

    /// CRC-32 (ISO-HDLC) as used by PNG chunks.
    fn crc32(bytes: &[u8]) -> u32 {
        let mut crc = 0xFFFF_FFFF_u32;
        for &byte in bytes {
            crc ^= u32::from(byte);
            for _ in 0..8 {
                crc = if crc & 1 == 1 {
                    (crc >> 1) ^ 0xEDB8_8320
                } else {
                    crc >> 1
                };
            }
        }
        !crc
    }

    /// Insert an RGB `tRNS` chunk right after IHDR.
    fn with_trns(png: &[u8], key: [u8; 3]) -> Vec<u8> {
        let mut chunk_data = b"tRNS".to_vec();
        for value in key {
            chunk_data.extend_from_slice(&u16::from(value).to_be_bytes());
        }

        // Signature (8) + IHDR chunk (4 + 4 + 13 + 4)
        let ihdr_end = 33;
        let mut out = png[..ihdr_end].to_vec();
        out.extend_from_slice(&6u32.to_be_bytes());
        out.extend_from_slice(&chunk_data);
        out.extend_from_slice(&crc32(&chunk_data).to_be_bytes());
        out.extend_from_slice(&png[ihdr_end..]);
        out
    }

    #[test]
    fn test_crc32_reference() {
        assert_eq!(crc32(b"IEND"), 0xAE42_6082);
    }

    #[test]
    fn test_rgb_with_transparency_key_is_rgb() {
        let mut img = RgbImage::from_pixel(2, 2, Rgb([200, 100, 50]));
        img.put_pixel(0, 0, Rgb([10, 20, 30]));
        let png = with_trns(&encode_png(DynamicImage::ImageRgb8(img)), [10, 20, 30]);
        assert!(is_png_rgb8(&png));
        assert!(matches!(
            image::load_from_memory(&png).unwrap(),
            DynamicImage::ImageRgba8(_)
        ));

        let color = ColorLoader.load(&png).unwrap();
        assert_eq!(color.shape(), &[3, 2, 2]);
        // The keyed pixel keeps its color; alpha is discarded
        assert!((color[[0, 0, 0]] - 10.0 / 255.0).abs() < 1e-6);
        assert!((color[[2, 0, 0]] - 30.0 / 255.0).abs() < 1e-6);
        assert!((color[[0, 1, 1]] - 200.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(
            ColorLoader.load(&[0u8; 16]),
            Err(DataError::Image(_))
        ));
    }
}
