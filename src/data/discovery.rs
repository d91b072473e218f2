//! Discovery of per-frame files in a split directory.
//!
//! A split directory holds one subdirectory per placement. Each placement
//! contains four files per frame, named `{frame}_L.png`, `{frame}_Dt.exr`,
//! `{frame}_Do.exr` and `{frame}_mask.png`. Within a placement every group is
//! ordered by the numeric frame index; placements are concatenated in
//! directory-listing order.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{DataError, Result};

/// One of the four per-frame modalities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modality {
    /// Left RGB image
    Color,
    /// Raw (sensor) depth
    RawDepth,
    /// Ground-truth (rendered) depth
    GtDepth,
    /// Object mask
    Mask,
}

impl Modality {
    /// All modalities, in group order.
    pub const ALL: [Modality; 4] = [
        Modality::Color,
        Modality::RawDepth,
        Modality::GtDepth,
        Modality::Mask,
    ];

    /// Filename suffix identifying this modality.
    pub fn suffix(&self) -> &'static str {
        match self {
            Modality::Color => "_L.png",
            Modality::RawDepth => "_Dt.exr",
            Modality::GtDepth => "_Do.exr",
            Modality::Mask => "_mask.png",
        }
    }

    /// Short name used in logs and errors.
    pub fn name(&self) -> &'static str {
        match self {
            Modality::Color => "color",
            Modality::RawDepth => "raw_depth",
            Modality::GtDepth => "gt_depth",
            Modality::Mask => "mask",
        }
    }

    /// Whether a file name belongs to this modality.
    ///
    /// Hidden files are never matched.
    pub fn matches(&self, file_name: &str) -> bool {
        !file_name.starts_with('.') && file_name.ends_with(self.suffix())
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parse the frame index from a file name.
///
/// The index is the part before the first underscore (`"12_Dt.exr"` → 12).
/// Surrounding whitespace and an explicit sign are accepted. Indices are
/// bounded to `i64`; a longer prefix such as `99999999999999999999` fails
/// with [`DataError::InvalidFrameIndex`].
pub fn parse_frame_index(file_name: &str) -> Result<i64> {
    let prefix = file_name.split('_').next().unwrap_or(file_name);
    prefix
        .trim()
        .parse::<i64>()
        .map_err(|source| DataError::InvalidFrameIndex {
            name: file_name.to_string(),
            source,
        })
}

/// A discovered frame file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameFile {
    /// Name of the placement directory the file was found in
    pub placement: String,
    /// Frame index parsed from the file name
    pub index: i64,
    /// Full path to the file
    pub path: PathBuf,
}

/// The four parallel, ordered file groups of a split.
#[derive(Debug, Clone, Default)]
pub struct FrameGroups {
    /// Color images
    pub color: Vec<FrameFile>,
    /// Raw depth images
    pub raw_depth: Vec<FrameFile>,
    /// Ground-truth depth images
    pub gt_depth: Vec<FrameFile>,
    /// Masks
    pub mask: Vec<FrameFile>,
}

impl FrameGroups {
    /// The group holding a given modality.
    pub fn group(&self, modality: Modality) -> &[FrameFile] {
        match modality {
            Modality::Color => &self.color,
            Modality::RawDepth => &self.raw_depth,
            Modality::GtDepth => &self.gt_depth,
            Modality::Mask => &self.mask,
        }
    }

    fn group_mut(&mut self, modality: Modality) -> &mut Vec<FrameFile> {
        match modality {
            Modality::Color => &mut self.color,
            Modality::RawDepth => &mut self.raw_depth,
            Modality::GtDepth => &mut self.gt_depth,
            Modality::Mask => &mut self.mask,
        }
    }

    /// Check that every position refers to the same frame in all groups.
    ///
    /// Groups must have equal length, and the entries at each position must
    /// come from the same placement with the same frame index.
    pub fn validate_alignment(&self) -> Result<()> {
        let expected = self.raw_depth.len();
        for modality in Modality::ALL {
            let len = self.group(modality).len();
            if len != expected {
                return Err(DataError::misaligned(format!(
                    "{} has {} files but {} has {}",
                    modality,
                    len,
                    Modality::RawDepth,
                    expected
                )));
            }
        }

        for (position, anchor) in self.raw_depth.iter().enumerate() {
            for modality in Modality::ALL {
                let other = &self.group(modality)[position];
                if other.placement != anchor.placement || other.index != anchor.index {
                    return Err(DataError::misaligned(format!(
                        "position {}: {} is {}/{} but {} is {}/{}",
                        position,
                        Modality::RawDepth,
                        anchor.placement,
                        anchor.index,
                        modality,
                        other.placement,
                        other.index
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Scan a split directory and collect the four frame groups.
pub fn discover(data_root: &Path) -> Result<FrameGroups> {
    let entries = std::fs::read_dir(data_root).map_err(|e| DataError::io(data_root, e))?;

    let mut groups = FrameGroups::default();
    for entry in entries {
        let entry = entry.map_err(|e| DataError::io(data_root, e))?;
        let path = entry.path();
        if !path.is_dir() {
            log::debug!("Skipping non-directory entry {}", path.display());
            continue;
        }

        let placement = entry.file_name().to_string_lossy().into_owned();
        let files = list_files(&path)?;

        for modality in Modality::ALL {
            let found = collect_group(&placement, &files, modality)?;
            log::debug!(
                "Placement '{}': {} {} files",
                placement,
                found.len(),
                modality
            );
            groups.group_mut(modality).extend(found);
        }
    }

    log::info!(
        "Discovered {} color, {} raw depth, {} gt depth, {} mask files in {}",
        groups.color.len(),
        groups.raw_depth.len(),
        groups.gt_depth.len(),
        groups.mask.len(),
        data_root.display()
    );

    Ok(groups)
}

/// A regular file in a placement directory.
#[derive(Debug, Clone)]
struct ListedFile {
    /// Lossy UTF-8 name, used only for matching and index parsing
    name: String,
    /// Path as returned by the filesystem
    path: PathBuf,
}

/// Regular files directly inside a placement directory.
fn list_files(dir: &Path) -> Result<Vec<ListedFile>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(|e| DataError::io(dir, e))? {
        let entry = entry.map_err(|e| DataError::io(dir, e))?;
        let path = entry.path();
        if path.is_file() {
            files.push(ListedFile {
                name: entry.file_name().to_string_lossy().into_owned(),
                path,
            });
        }
    }
    Ok(files)
}

/// Select and order the files of one modality within a placement.
fn collect_group(
    placement: &str,
    files: &[ListedFile],
    modality: Modality,
) -> Result<Vec<FrameFile>> {
    let mut found = files
        .iter()
        .filter(|file| modality.matches(&file.name))
        .map(|file| {
            Ok(FrameFile {
                placement: placement.to_string(),
                index: parse_frame_index(&file.name)?,
                path: file.path.clone(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    // Stable, so equal indices keep listing order.
    found.sort_by_key(|file| file.index);
    Ok(found)
}
