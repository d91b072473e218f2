//! Builders for on-disk KeyPose split fixtures.

use std::path::{Path, PathBuf};

use exr::image::write::WritableImage;
use exr::image::{AnyChannel, AnyChannels, FlatSamples, Image};
use image::{GrayImage, Luma, Rgb, RgbImage};
use tempfile::TempDir;

/// Install a test logger once; later calls are no-ops.
pub(crate) fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A temporary dataset root holding one split.
pub(crate) struct SplitFixture {
    root: TempDir,
    split: String,
}

impl SplitFixture {
    pub(crate) fn new(split: &str) -> Self {
        init_logging();
        let fixture = Self {
            root: tempfile::tempdir().unwrap(),
            split: split.to_string(),
        };
        std::fs::create_dir_all(fixture.data_root()).unwrap();
        fixture
    }

    pub(crate) fn root(&self) -> &Path {
        self.root.path()
    }

    pub(crate) fn split(&self) -> &str {
        &self.split
    }

    /// `root/{split}/data/{split}`
    pub(crate) fn data_root(&self) -> PathBuf {
        self.root
            .path()
            .join(&self.split)
            .join("data")
            .join(&self.split)
    }

    /// Create (if needed) and return a placement directory.
    pub(crate) fn placement(&self, name: &str) -> PathBuf {
        let dir = self.data_root().join(name);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// Write all four files of a frame with uniform content.
    pub(crate) fn write_frame(&self, placement: &str, index: i64, frame: &FrameSpec) {
        let dir = self.placement(placement);
        let (w, h) = (frame.width, frame.height);
        write_rgb_png(&dir.join(format!("{index}_L.png")), w, h, frame.color);
        write_exr(
            &dir.join(format!("{index}_Dt.exr")),
            w,
            h,
            &[("R", vec![frame.raw_depth; w * h])],
        );
        write_exr(
            &dir.join(format!("{index}_Do.exr")),
            w,
            h,
            &[("R", vec![frame.gt_depth; w * h])],
        );
        write_gray_png(&dir.join(format!("{index}_mask.png")), w, h, frame.mask);
    }

    /// Write empty placeholder files; enough for discovery-only tests.
    pub(crate) fn touch(&self, placement: &str, names: &[&str]) {
        let dir = self.placement(placement);
        for name in names {
            std::fs::write(dir.join(name), b"").unwrap();
        }
    }
}

/// Uniform content of one fixture frame.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FrameSpec {
    pub(crate) width: usize,
    pub(crate) height: usize,
    pub(crate) color: [u8; 3],
    pub(crate) raw_depth: f32,
    pub(crate) gt_depth: f32,
    pub(crate) mask: u8,
}

impl Default for FrameSpec {
    fn default() -> Self {
        Self {
            width: 4,
            height: 4,
            color: [255, 0, 0],
            raw_depth: 2.0,
            gt_depth: 1.0,
            mask: 255,
        }
    }
}

pub(crate) fn write_rgb_png(path: &Path, width: usize, height: usize, color: [u8; 3]) {
    RgbImage::from_pixel(width as u32, height as u32, Rgb(color))
        .save(path)
        .unwrap();
}

pub(crate) fn write_gray_png(path: &Path, width: usize, height: usize, value: u8) {
    GrayImage::from_pixel(width as u32, height as u32, Luma([value]))
        .save(path)
        .unwrap();
}

/// Write a single-part EXR with the given f32 channels (row-major samples).
pub(crate) fn write_exr(
    path: &Path,
    width: usize,
    height: usize,
    channels: &[(&str, Vec<f32>)],
) {
    let list: Vec<AnyChannel<FlatSamples>> = channels
        .iter()
        .map(|(name, values)| AnyChannel::new(*name, FlatSamples::F32(values.clone())))
        .collect();
    Image::from_channels((width, height), AnyChannels::sort(list.into()))
        .write()
        .to_file(path)
        .unwrap();
}
