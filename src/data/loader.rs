//! Trait-based frame decoding.
//!
//! Each modality on disk (color PNG, EXR depth, mask PNG) has a loader that
//! turns raw file bytes into an `ndarray` array. Loaders work on bytes so they
//! can be tested without touching the filesystem; [`FrameLoader::load_file`]
//! reads the file, checks its magic bytes and attributes any failure to its
//! path.

use std::path::Path;

use crate::error::{DataError, Result};

/// PNG magic bytes: 89 50 4E 47 0D 0A 1A 0A
pub(crate) const PNG_MAGIC: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// OpenEXR magic number: 76 2F 31 01
pub(crate) const EXR_MAGIC: &[u8] = &[0x76, 0x2F, 0x31, 0x01];

/// Decoder for one on-disk frame modality.
pub trait FrameLoader: Send + Sync {
    /// Decoded array type.
    type Output;

    /// Unique identifier for this loader (e.g., "color", "exr", "mask").
    fn id(&self) -> &'static str;

    /// Check magic bytes to see whether this loader can handle the data.
    fn can_load(&self, data: &[u8]) -> bool;

    /// Decode a frame from raw bytes.
    fn load(&self, data: &[u8]) -> Result<Self::Output>;

    /// Read and decode a frame file.
    ///
    /// Files whose magic bytes belong to another format are rejected before
    /// decoding, so a mislabeled file reports what it is instead of a decoder
    /// failure.
    fn load_file(&self, path: &Path) -> Result<Self::Output> {
        let data = std::fs::read(path).map_err(|e| DataError::io(path, e))?;
        if !self.can_load(&data) {
            return Err(DataError::shape(format!(
                "not a {} frame: unrecognized magic bytes",
                self.id()
            ))
            .in_file(path));
        }
        let output = self.load(&data).map_err(|e| e.in_file(path))?;
        log::trace!("{} loader decoded {}", self.id(), path.display());
        Ok(output)
    }
}
