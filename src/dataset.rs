//! The KeyPose depth-completion dataset.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use keypose::KeyPoseDataset;
//!
//! let dataset = KeyPoseDataset::new("/data/keypose", "bottle_0")?;
//! let sample = dataset.get(0)?;
//! assert_eq!(sample.raw_depth.dim(), (1, 480, 640));
//! ```

use std::path::{Path, PathBuf};

use ndarray::{Array2, Axis, Ix2};

use crate::config::DatasetConfig;
use crate::data::depth::{clip_depth, zero_non_finite, zero_outside_mask};
use crate::data::loaders::{ColorLoader, ExrLoader, MaskLoader};
use crate::data::resize::{resize_2d, resize_3d};
use crate::data::{FrameFile, FrameGroups, FrameLoader, Modality, Sample, discover};
use crate::error::{DataError, Result};

/// Raw-depth file ending for which depth outside the mask is discarded.
///
/// Discovery only picks up `_Dt.exr` files, so with the current layout this
/// never matches.
pub const RECTIFIED_DEPTH_SUFFIX: &str = "depth-rectified.exr";

/// Paths of the four files making up one sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramePaths<'a> {
    /// Color image
    pub color: &'a Path,
    /// Raw depth
    pub raw_depth: &'a Path,
    /// Ground-truth depth
    pub gt_depth: &'a Path,
    /// Mask
    pub mask: &'a Path,
}

/// One split of the KeyPose dataset.
///
/// File lists are built once at construction. Every [`get`](Self::get)
/// re-reads and re-decodes its files, so the dataset can be shared freely
/// between threads.
#[derive(Debug, Clone)]
pub struct KeyPoseDataset {
    config: DatasetConfig,
    data_root: PathBuf,
    groups: FrameGroups,
}

impl KeyPoseDataset {
    /// Open a split with default settings otherwise.
    pub fn new(root: impl Into<PathBuf>, split: impl Into<String>) -> Result<Self> {
        Self::from_config(&DatasetConfig::new(root, split))
    }

    /// Open the split described by a configuration.
    ///
    /// Fails if the split directory cannot be read, a frame file name has no
    /// integer prefix, or the four file groups do not line up.
    pub fn from_config(config: &DatasetConfig) -> Result<Self> {
        config.validate()?;
        let data_root = config.data_root();
        let groups = discover(&data_root)?;
        groups.validate_alignment()?;

        log::info!(
            "KeyPose split '{}': {} samples at {}x{}",
            config.split,
            groups.raw_depth.len(),
            config.target_height,
            config.target_width
        );

        Ok(Self {
            config: config.clone(),
            data_root,
            groups,
        })
    }

    /// Number of samples (raw depth frames).
    pub fn len(&self) -> usize {
        self.groups.raw_depth.len()
    }

    /// Whether the split has no samples.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Split name.
    pub fn split(&self) -> &str {
        &self.config.split
    }

    /// Directory the placements were discovered in.
    pub fn data_root(&self) -> &Path {
        &self.data_root
    }

    /// Configuration the dataset was built with.
    pub fn config(&self) -> &DatasetConfig {
        &self.config
    }

    /// Discovered files of one modality, in sample order.
    pub fn files(&self, modality: Modality) -> &[FrameFile] {
        self.groups.group(modality)
    }

    /// Paths of the files behind sample `index`.
    pub fn frame(&self, index: usize) -> Option<FramePaths<'_>> {
        Some(FramePaths {
            color: &self.groups.color.get(index)?.path,
            raw_depth: &self.groups.raw_depth.get(index)?.path,
            gt_depth: &self.groups.gt_depth.get(index)?.path,
            mask: &self.groups.mask.get(index)?.path,
        })
    }

    /// Load, resize and clean sample `index`.
    pub fn get(&self, index: usize) -> Result<Sample> {
        let frame = self.frame(index).ok_or(DataError::IndexOutOfBounds {
            index,
            len: self.len(),
        })?;
        log::trace!("Loading sample {} ({})", index, frame.raw_depth.display());

        let color = ColorLoader.load_file(frame.color)?;
        let gt_depth = load_depth(frame.gt_depth)?;
        let mut raw_depth = load_depth(frame.raw_depth)?;
        let mask = MaskLoader.load_file(frame.mask)?;

        if frame
            .raw_depth
            .to_string_lossy()
            .ends_with(RECTIFIED_DEPTH_SUFFIX)
        {
            log::debug!(
                "Zeroing depth outside mask for {}",
                frame.raw_depth.display()
            );
            zero_outside_mask(raw_depth.view_mut(), mask.view())
                .map_err(|e| e.in_file(frame.raw_depth))?;
        }

        let size = self.config.target_size();
        let color = resize_3d(color.view(), size)?;
        let mut raw_depth = resize_2d(raw_depth.view(), size)?;
        let mut gt_depth = resize_2d(gt_depth.view(), size)?;
        let mask = resize_2d(mask.view(), size)?;

        zero_non_finite(&mut gt_depth);
        clip_depth(&mut raw_depth, self.config.max_depth);
        clip_depth(&mut gt_depth, self.config.max_depth);

        Ok(Sample {
            color,
            raw_depth: raw_depth.insert_axis(Axis(0)),
            mask: mask.insert_axis(Axis(0)),
            gt_depth: gt_depth.insert_axis(Axis(0)),
        })
    }

    /// Iterate over all samples in order.
    pub fn iter(&self) -> impl Iterator<Item = Result<Sample>> + '_ {
        (0..self.len()).map(move |index| self.get(index))
    }
}

/// Decode a single-channel depth frame as `(H, W)`.
fn load_depth(path: &Path) -> Result<Array2<f32>> {
    ExrLoader::single()
        .load_file(path)?
        .into_dimensionality::<Ix2>()
        .map_err(|_| DataError::shape("depth image is not two dimensional").in_file(path))
}
