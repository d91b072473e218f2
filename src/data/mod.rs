//! Frame discovery, decoding and array processing.
//!
//! This module provides:
//! - `discover`: finds the four per-frame file groups of a split
//! - `FrameLoader`: decoders for color PNGs, EXR depth and mask PNGs
//! - `resize_2d` / `resize_3d`: anti-aliased resampling to the output size
//! - Depth clean-up (clipping, non-finite removal, mask zeroing)
//! - `Sample`: the named tensors handed to the training loop

pub mod depth;
pub mod discovery;
mod loader;
pub mod loaders;
pub mod resize;
mod sample;

pub use discovery::{FrameFile, FrameGroups, Modality, discover, parse_frame_index};
pub use loader::FrameLoader;
pub use sample::{Sample, TENSOR_NAMES};
