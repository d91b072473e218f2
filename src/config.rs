//! Dataset configuration.
//!
//! Settings can be loaded from a JSON file, so that a training run records
//! exactly which split, resolution and clipping it was fed with. Every field
//! has a default, and a partial file only overrides what it names.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DataError, Result};

/// Location of the KeyPose dataset on the lab file server.
pub const DEFAULT_ROOT: &str = "/h/helen/datasets_slow/keypose";

/// Output height of every tensor.
pub const DEFAULT_TARGET_HEIGHT: usize = 480;

/// Output width of every tensor.
pub const DEFAULT_TARGET_WIDTH: usize = 640;

/// Depth values above this many meters are clipped.
pub const DEFAULT_MAX_DEPTH: f32 = 1.5;

/// Configuration for a [`KeyPoseDataset`](crate::KeyPoseDataset).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Dataset root; the split lives under `root/{split}/data/{split}`
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Split name, used verbatim in path construction
    #[serde(default = "default_split")]
    pub split: String,

    /// Height every sample is resized to
    #[serde(default = "default_target_height")]
    pub target_height: usize,

    /// Width every sample is resized to
    #[serde(default = "default_target_width")]
    pub target_width: usize,

    /// Clip ceiling for raw and ground-truth depth, in meters
    #[serde(default = "default_max_depth")]
    pub max_depth: f32,

    /// Shuffle sample order each epoch
    #[serde(default)]
    pub shuffle: bool,

    /// Seed for any randomness in the data pipeline
    #[serde(default)]
    pub seed: u64,
}

fn default_root() -> PathBuf {
    PathBuf::from(DEFAULT_ROOT)
}

fn default_split() -> String {
    "train".to_string()
}

fn default_target_height() -> usize {
    DEFAULT_TARGET_HEIGHT
}

fn default_target_width() -> usize {
    DEFAULT_TARGET_WIDTH
}

fn default_max_depth() -> f32 {
    DEFAULT_MAX_DEPTH
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            split: default_split(),
            target_height: default_target_height(),
            target_width: default_target_width(),
            max_depth: default_max_depth(),
            shuffle: false,
            seed: 0,
        }
    }
}

impl DatasetConfig {
    /// Default configuration for the given root and split.
    pub fn new(root: impl Into<PathBuf>, split: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            split: split.into(),
            ..Self::default()
        }
    }

    /// Directory holding the placement subdirectories of this split.
    pub fn data_root(&self) -> PathBuf {
        self.root.join(&self.split).join("data").join(&self.split)
    }

    /// Output resolution as `(height, width)`.
    pub fn target_size(&self) -> (usize, usize) {
        (self.target_height, self.target_width)
    }

    /// Parse and validate a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load and validate a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| DataError::io(path, e))?;
        let config = Self::from_json(&json)?;
        log::debug!("Loaded dataset config from {}", path.display());
        Ok(config)
    }

    /// Check that the values can produce well-formed samples.
    pub fn validate(&self) -> Result<()> {
        if self.target_height == 0 || self.target_width == 0 {
            return Err(DataError::invalid_config(format!(
                "target size must be non-zero, got {}x{}",
                self.target_height, self.target_width
            )));
        }
        if !self.max_depth.is_finite() || self.max_depth <= 0.0 {
            return Err(DataError::invalid_config(format!(
                "max_depth must be finite and positive, got {}",
                self.max_depth
            )));
        }
        Ok(())
    }
}
