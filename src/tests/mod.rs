//! Dataset tests against fixture trees on disk.
//!
//! These tests write small PNG and EXR frames into a temporary split
//! directory and check discovery, decoding and sample assembly end to end.

mod fixtures;
