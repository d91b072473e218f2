//! Anti-aliased linear resampling of `f32` arrays.
//!
//! This is the triangle ("bilinear") filter used by `image::imageops::resize`,
//! applied separably over `ndarray` arrays. Unlike the `image` version the
//! output is never clamped, so depth in meters keeps its range. When
//! shrinking, the filter support widens with the scale factor so every
//! input pixel contributes (area-like averaging instead of aliasing).

use ndarray::{Array2, Array3, ArrayView2, ArrayView3, Axis};

use crate::error::{DataError, Result};

/// Contributions of input samples to one output sample.
#[derive(Debug, Clone, PartialEq)]
struct Taps {
    /// First input index with a non-zero weight
    start: usize,
    /// Normalized weights for `start..start + weights.len()`
    weights: Vec<f32>,
}

impl Taps {
    fn apply(&self, sample: impl Fn(usize) -> f32) -> f32 {
        self.weights
            .iter()
            .enumerate()
            .map(|(k, &w)| w * sample(self.start + k))
            .sum()
    }
}

fn triangle(x: f64) -> f64 {
    (1.0 - x.abs()).max(0.0)
}

/// Filter taps mapping `in_len` samples onto `out_len` samples.
///
/// Sample centers sit at half-integer positions. Zero-weight taps are left
/// out, so a NaN or infinity only reaches outputs whose support covers it.
fn filter_taps(in_len: usize, out_len: usize) -> Vec<Taps> {
    let ratio = in_len as f64 / out_len as f64;
    let scale = ratio.max(1.0);

    (0..out_len)
        .map(|i| {
            let center = (i as f64 + 0.5) * ratio;
            let left = (center - scale).floor().max(0.0) as usize;
            let right = ((center + scale).ceil() as usize).min(in_len);

            let mut start = left;
            let mut weights = Vec::with_capacity(right.saturating_sub(left));
            for j in left..right {
                let w = triangle((j as f64 + 0.5 - center) / scale);
                if w > 0.0 {
                    if weights.is_empty() {
                        start = j;
                    }
                    weights.push(w);
                }
            }

            let total: f64 = weights.iter().sum();
            Taps {
                start,
                weights: weights.into_iter().map(|w| (w / total) as f32).collect(),
            }
        })
        .collect()
}

/// Resize a 2D `(H, W)` array to `(height, width)`.
pub fn resize_2d(
    input: ArrayView2<'_, f32>,
    (height, width): (usize, usize),
) -> Result<Array2<f32>> {
    let (in_height, in_width) = input.dim();
    if in_height == 0 || in_width == 0 || height == 0 || width == 0 {
        return Err(DataError::shape(format!(
            "cannot resize {}x{} to {}x{}",
            in_height, in_width, height, width
        )));
    }
    if (in_height, in_width) == (height, width) {
        return Ok(input.to_owned());
    }

    let column_taps = filter_taps(in_width, width);
    let row_taps = filter_taps(in_height, height);

    // Horizontal pass: (in_height, in_width) -> (in_height, width)
    let mut horizontal = Array2::<f32>::zeros((in_height, width));
    for (src, mut dst) in input.rows().into_iter().zip(horizontal.rows_mut()) {
        for (out, taps) in dst.iter_mut().zip(&column_taps) {
            *out = taps.apply(|j| src[j]);
        }
    }

    // Vertical pass: (in_height, width) -> (height, width)
    let mut output = Array2::<f32>::zeros((height, width));
    for (mut dst, taps) in output.rows_mut().into_iter().zip(&row_taps) {
        for (k, &w) in taps.weights.iter().enumerate() {
            dst.scaled_add(w, &horizontal.row(taps.start + k));
        }
    }

    Ok(output)
}

/// Resize every channel of a `(C, H, W)` array to `(C, height, width)`.
pub fn resize_3d(input: ArrayView3<'_, f32>, size: (usize, usize)) -> Result<Array3<f32>> {
    let channels = input.len_of(Axis(0));
    let mut output = Array3::<f32>::zeros((channels, size.0, size.1));
    for (src, mut dst) in input.outer_iter().zip(output.outer_iter_mut()) {
        dst.assign(&resize_2d(src, size)?);
    }
    Ok(output)
}
