//! A decoded training sample.

use std::collections::BTreeMap;

use ndarray::Array3;

/// Tensor names, in the order [`Sample::tensors`] yields them.
pub const TENSOR_NAMES: [&str; 4] = ["color", "raw_depth", "mask", "gt_depth"];

/// The four tensors of one frame, all `(C, H, W)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    /// RGB image, `(3, H, W)`, 0.0-1.0
    pub color: Array3<f32>,
    /// Sensor depth in meters, `(1, H, W)`, clipped
    pub raw_depth: Array3<f32>,
    /// Object mask, `(1, H, W)`, interpolated between 0.0 and 1.0
    pub mask: Array3<f32>,
    /// Rendered depth in meters, `(1, H, W)`, finite and clipped
    pub gt_depth: Array3<f32>,
}

impl Sample {
    /// Look up a tensor by name.
    pub fn get(&self, name: &str) -> Option<&Array3<f32>> {
        match name {
            "color" => Some(&self.color),
            "raw_depth" => Some(&self.raw_depth),
            "mask" => Some(&self.mask),
            "gt_depth" => Some(&self.gt_depth),
            _ => None,
        }
    }

    /// All tensors with their names.
    pub fn tensors(&self) -> [(&'static str, &Array3<f32>); 4] {
        [
            ("color", &self.color),
            ("raw_depth", &self.raw_depth),
            ("mask", &self.mask),
            ("gt_depth", &self.gt_depth),
        ]
    }

    /// Consume the sample into a name → tensor map.
    pub fn into_map(self) -> BTreeMap<&'static str, Array3<f32>> {
        BTreeMap::from([
            ("color", self.color),
            ("raw_depth", self.raw_depth),
            ("mask", self.mask),
            ("gt_depth", self.gt_depth),
        ])
    }

    /// Spatial size `(H, W)` shared by all tensors.
    pub fn size(&self) -> (usize, usize) {
        let (_, height, width) = self.color.dim();
        (height, width)
    }
}
