//! In-place clean-up of depth maps.

use ndarray::{ArrayBase, ArrayView2, ArrayViewMut2, DataMut, Dimension, Zip};

use crate::error::{DataError, Result};

/// Set every value greater than `max_depth` to exactly `max_depth`.
///
/// Only the upper bound is enforced; negative values and NaN pass through.
pub fn clip_depth<S, D>(depth: &mut ArrayBase<S, D>, max_depth: f32)
where
    S: DataMut<Elem = f32>,
    D: Dimension,
{
    depth.mapv_inplace(|v| if v > max_depth { max_depth } else { v });
}

/// Replace NaN and infinite values with 0.0.
pub fn zero_non_finite<S, D>(depth: &mut ArrayBase<S, D>)
where
    S: DataMut<Elem = f32>,
    D: Dimension,
{
    depth.mapv_inplace(|v| if v.is_finite() { v } else { 0.0 });
}

/// Zero depth wherever the mask is exactly 0.
pub fn zero_outside_mask(
    mut depth: ArrayViewMut2<'_, f32>,
    mask: ArrayView2<'_, f32>,
) -> Result<()> {
    if depth.dim() != mask.dim() {
        return Err(DataError::shape(format!(
            "mask {:?} does not match depth {:?}",
            mask.dim(),
            depth.dim()
        )));
    }
    Zip::from(&mut depth).and(&mask).for_each(|d, &m| {
        if m == 0.0 {
            *d = 0.0;
        }
    });
    Ok(())
}
