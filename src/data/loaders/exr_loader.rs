//! Loader for OpenEXR depth frames.
//!
//! Depth frames store meters as floating-point samples in named channels.
//! Most frames carry the value in "R"; depth-only encodings name it "D".
//!
//! **Output shapes** (height, width order):
//! - [`ExrChannels::Single`]: `(H, W)`
//! - [`ExrChannels::Rgb`]: `(3, H, W)`, channels stacked R, G, B

use std::io::Cursor;

use exr::prelude::*;
use ndarray::{Array2, ArrayD, Axis};

use crate::data::loader::{EXR_MAGIC, FrameLoader};
use crate::error::{DataError, Result};

type FlatLayer = Layer<AnyChannels<FlatSamples>>;

/// Which channels to pull out of an EXR frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExrChannels {
    /// One channel: "R", falling back to "D"
    Single,
    /// Three channels: "R", "G" and "B", all required
    Rgb,
}

/// Loader for `.exr` frames.
pub struct ExrLoader {
    channels: ExrChannels,
}

impl ExrLoader {
    /// Loader returning a single `(H, W)` channel.
    pub fn single() -> Self {
        Self {
            channels: ExrChannels::Single,
        }
    }

    /// Loader returning a `(3, H, W)` RGB stack.
    pub fn rgb() -> Self {
        Self {
            channels: ExrChannels::Rgb,
        }
    }

    /// Channels this loader extracts.
    pub fn channels(&self) -> ExrChannels {
        self.channels
    }

    /// Decode one named channel of the layer as an `(H, W)` array.
    fn channel(layer: &FlatLayer, name: &str) -> Option<Result<Array2<f32>>> {
        let channel = layer
            .channel_data
            .list
            .iter()
            .find(|c| c.name.to_string() == name)?;
        Some(Self::channel_to_array(layer, channel))
    }

    fn channel_to_array(
        layer: &FlatLayer,
        channel: &AnyChannel<FlatSamples>,
    ) -> Result<Array2<f32>> {
        // Layer size is the data window extent: max - min + 1 on each axis
        let width = layer.size.width();
        let height = layer.size.height();

        let values: Vec<f32> = match &channel.sample_data {
            FlatSamples::F16(samples) => samples.iter().map(|s| s.to_f32()).collect(),
            FlatSamples::F32(samples) => samples.clone(),
            FlatSamples::U32(samples) => samples.iter().map(|&s| s as f32).collect(),
        };

        let count = values.len();
        Array2::from_shape_vec((height, width), values).map_err(|_| {
            DataError::shape(format!(
                "channel {} has {} samples, expected {}x{}",
                channel.name, count, height, width
            ))
        })
    }

    fn channel_names(layer: &FlatLayer) -> Vec<String> {
        layer
            .channel_data
            .list
            .iter()
            .map(|c| c.name.to_string())
            .collect()
    }

    fn missing(layer: &FlatLayer, expected: &[&str]) -> DataError {
        DataError::MissingChannel {
            expected: expected.iter().map(|s| s.to_string()).collect(),
            found: Self::channel_names(layer),
        }
    }

    fn read_layer(data: &[u8]) -> Result<FlatLayer> {
        let image: Image<FlatLayer> = read()
            .no_deep_data()
            .largest_resolution_level()
            .all_channels()
            .first_valid_layer()
            .all_attributes()
            .from_buffered(Cursor::new(data))?;
        Ok(image.layer_data)
    }
}

impl FrameLoader for ExrLoader {
    type Output = ArrayD<f32>;

    fn id(&self) -> &'static str {
        "exr"
    }

    fn can_load(&self, data: &[u8]) -> bool {
        data.starts_with(EXR_MAGIC)
    }

    fn load(&self, data: &[u8]) -> Result<ArrayD<f32>> {
        let layer = Self::read_layer(data)?;
        log::trace!(
            "ExrLoader: {}x{} layer at {:?}, channels {:?}",
            layer.size.width(),
            layer.size.height(),
            layer.attributes.layer_position,
            Self::channel_names(&layer)
        );

        match self.channels {
            ExrChannels::Single => {
                let depth = Self::channel(&layer, "R")
                    .or_else(|| Self::channel(&layer, "D"))
                    .ok_or_else(|| Self::missing(&layer, &["R", "D"]))??;
                Ok(depth.into_dyn())
            }
            ExrChannels::Rgb => {
                const RGB: [&str; 3] = ["R", "G", "B"];
                let planes = RGB
                    .iter()
                    .map(|name| {
                        Self::channel(&layer, name).ok_or_else(|| Self::missing(&layer, &RGB))?
                    })
                    .collect::<Result<Vec<_>>>()?;
                let views: Vec<_> = planes.iter().map(|p| p.view()).collect();
                let stacked = ndarray::stack(Axis(0), &views)
                    .map_err(|e| DataError::shape(format!("cannot stack RGB planes: {e}")))?;
                Ok(stacked.into_dyn())
            }
        }
    }
}
