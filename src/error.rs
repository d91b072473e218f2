//! Error types for dataset discovery, decoding and sample assembly.

use std::path::PathBuf;
use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur while building or reading a dataset.
#[derive(Error, Debug)]
pub enum DataError {
    /// I/O error while reading a directory or file
    #[error("IO error at {path:?}: {source}")]
    Io {
        /// Path that could not be read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// PNG (or other raster) decode error
    #[error("Image decode error: {0}")]
    Image(#[from] image::ImageError),

    /// OpenEXR container error
    #[error("EXR error: {0}")]
    Exr(#[from] exr::error::Error),

    /// Configuration parsing or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A decode failure attributed to a specific file
    #[error("Failed to decode {path:?}: {source}")]
    Decode {
        /// File that failed to decode
        path: PathBuf,
        /// What went wrong
        #[source]
        source: Box<DataError>,
    },

    /// Filename prefix is not an integer frame index
    #[error("Invalid frame index in '{name}': {source}")]
    InvalidFrameIndex {
        /// Offending file name
        name: String,
        /// Integer parse failure
        #[source]
        source: std::num::ParseIntError,
    },

    /// None of the requested EXR channels exist
    #[error("Missing EXR channel: expected one of {expected:?}, found {found:?}")]
    MissingChannel {
        /// Channel names that were looked up
        expected: Vec<String>,
        /// Channel names present in the file
        found: Vec<String>,
    },

    /// Array has an unexpected shape or channel layout
    #[error("Shape error: {message}")]
    Shape {
        /// Description of the mismatch
        message: String,
    },

    /// The four modality groups do not line up sample by sample
    #[error("Misaligned frame groups: {message}")]
    MisalignedGroups {
        /// Description of the first disagreement
        message: String,
    },

    /// Sample index beyond the dataset length
    #[error("Index {index} out of bounds for dataset of length {len}")]
    IndexOutOfBounds {
        /// Requested index
        index: usize,
        /// Dataset length
        len: usize,
    },

    /// Configuration value out of range
    #[error("Invalid config: {message}")]
    InvalidConfig {
        /// Description of the problem
        message: String,
    },
}

impl DataError {
    /// Create an I/O error attributed to a path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a shape error with a message.
    pub fn shape(message: impl Into<String>) -> Self {
        Self::Shape {
            message: message.into(),
        }
    }

    /// Create a misaligned-groups error with a message.
    pub fn misaligned(message: impl Into<String>) -> Self {
        Self::MisalignedGroups {
            message: message.into(),
        }
    }

    /// Create an invalid config error with a message.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Attach the file that was being decoded.
    pub fn in_file(self, path: impl Into<PathBuf>) -> Self {
        match self {
            // Already carries its own path.
            err @ (Self::Io { .. } | Self::Decode { .. }) => err,
            err => Self::Decode {
                path: path.into(),
                source: Box::new(err),
            },
        }
    }
}
