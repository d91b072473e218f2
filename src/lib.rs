//! KeyPose - depth-completion dataset loader
//!
//! Discovers aligned color / raw depth / ground-truth depth / mask frames in
//! a KeyPose split, decodes PNG and OpenEXR files, and resizes everything to
//! fixed-shape `f32` tensors for training.

pub mod config;
pub mod data;
mod dataset;
mod error;
pub mod sampler;

#[cfg(test)]
mod tests;

pub use config::DatasetConfig;
pub use data::{FrameLoader, Modality, Sample, parse_frame_index};
pub use dataset::{FramePaths, KeyPoseDataset, RECTIFIED_DEPTH_SUFFIX};
pub use error::{DataError, Result};
pub use sampler::IndexSampler;
