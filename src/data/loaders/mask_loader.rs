//! Loader for object masks.
//!
//! Mask PNGs mark the object with black pixels. Near-black pixels become 1.0
//! in the output; everything else becomes 0.0.

use image::{DynamicImage, GrayImage};
use ndarray::Array2;

use crate::data::loader::{FrameLoader, PNG_MAGIC};
use crate::error::Result;

/// Normalized intensity at or below which a pixel is masked.
pub const MASK_THRESHOLD: f32 = 0.01;

/// Mask value for a grayscale intensity in 0.0-1.0.
pub fn mask_value(intensity: f32) -> f32 {
    if intensity <= MASK_THRESHOLD { 1.0 } else { 0.0 }
}

/// ITU-R 601-2 luma in 16.16 fixed point, rounded.
fn luma_601(r: u8, g: u8, b: u8) -> u8 {
    let l = u32::from(r) * 19595 + u32::from(g) * 38470 + u32::from(b) * 7471 + 0x8000;
    (l >> 16) as u8
}

/// Reduce any decoded image to 8-bit luma.
///
/// Grayscale sources are used directly; color sources go through the 601-2
/// weights, ignoring alpha.
fn to_luma(image: DynamicImage) -> GrayImage {
    match image {
        DynamicImage::ImageLuma8(gray) => gray,
        DynamicImage::ImageLumaA8(gray_alpha) => {
            GrayImage::from_fn(gray_alpha.width(), gray_alpha.height(), |x, y| {
                image::Luma([gray_alpha.get_pixel(x, y)[0]])
            })
        }
        other => {
            let rgb = other.to_rgb8();
            GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| {
                let [r, g, b] = rgb.get_pixel(x, y).0;
                image::Luma([luma_601(r, g, b)])
            })
        }
    }
}

/// Loader for the `_mask.png` frames.
pub struct MaskLoader;

impl FrameLoader for MaskLoader {
    type Output = Array2<f32>;

    fn id(&self) -> &'static str {
        "mask"
    }

    fn can_load(&self, data: &[u8]) -> bool {
        data.starts_with(PNG_MAGIC)
    }

    fn load(&self, data: &[u8]) -> Result<Array2<f32>> {
        let gray = to_luma(image::load_from_memory(data)?);
        let (width, height) = gray.dimensions();

        let mask = Array2::from_shape_fn((height as usize, width as usize), |(y, x)| {
            mask_value(f32::from(gray.get_pixel(x as u32, y as u32)[0]) / 255.0)
        });

        log::trace!(
            "MaskLoader: {}x{} mask, {} masked pixels",
            width,
            height,
            mask.iter().filter(|&&v| v > 0.0).count()
        );
        Ok(mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Luma, Rgb, RgbImage};
    use std::io::Cursor;

    fn encode_png(image: DynamicImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_threshold_boundary() {
        assert_eq!(mask_value(0.0), 1.0);
        assert_eq!(mask_value(0.01), 1.0);
        assert_eq!(mask_value(0.011), 0.0);
        assert_eq!(mask_value(1.0), 0.0);
    }

    #[test]
    fn test_raw_value_boundary() {
        // 2/255 ≈ 0.0078 is masked, 3/255 ≈ 0.0118 is not
        let mut gray = GrayImage::new(4, 1);
        for (x, value) in [0u8, 2, 3, 255].into_iter().enumerate() {
            gray.put_pixel(x as u32, 0, Luma([value]));
        }

        let mask = MaskLoader
            .load(&encode_png(DynamicImage::ImageLuma8(gray)))
            .unwrap();
        assert_eq!(mask.shape(), &[1, 4]);
        assert_eq!(mask.row(0).to_vec(), vec![1.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_rgb_converted_to_luma() {
        let mut rgb = RgbImage::from_pixel(2, 2, Rgb([255, 255, 255]));
        rgb.put_pixel(0, 0, Rgb([0, 0, 0]));
        // Pure blue: luma 29, well above the threshold
        rgb.put_pixel(1, 0, Rgb([0, 0, 255]));

        let mask = MaskLoader
            .load(&encode_png(DynamicImage::ImageRgb8(rgb)))
            .unwrap();
        assert_eq!(mask[[0, 0]], 1.0);
        assert_eq!(mask[[0, 1]], 0.0);
        assert_eq!(mask[[1, 1]], 0.0);
    }

    #[test]
    fn test_luma_601() {
        assert_eq!(luma_601(0, 0, 0), 0);
        assert_eq!(luma_601(255, 255, 255), 255);
        assert_eq!(luma_601(255, 0, 0), 76);
        assert_eq!(luma_601(0, 255, 0), 150);
        assert_eq!(luma_601(0, 0, 255), 29);
    }
}
