//! Built-in frame loaders.
//!
//! This module contains implementations of the `FrameLoader` trait for the
//! three on-disk encodings of a KeyPose frame.

mod color_loader;
mod exr_loader;
mod mask_loader;

pub use color_loader::ColorLoader;
pub use exr_loader::{ExrChannels, ExrLoader};
pub use mask_loader::{MASK_THRESHOLD, MaskLoader, mask_value};
