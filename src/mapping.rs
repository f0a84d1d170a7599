//! Output path derivation.
//!
//! Three observed policies for where a converted file lands, selectable
//! via `--policy`. The filename rule is shared: keep the stem (case
//! preserved), swap the extension for the target format's.

use std::path::{Path, PathBuf};

use clap::ValueEnum;

use crate::convert::Format;

/// Where the converted output for an input file is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MappingPolicy {
    /// Next to the input file.
    SameDir,
    /// `./<name of the input's parent directory>`, relative to the
    /// current working directory. Collapses the tree one level flat.
    ParentFolder,
    /// Like `parent-folder`, with the directory name lower-cased.
    ParentFolderLowercase,
}

impl MappingPolicy {
    /// Compute the output directory for `input`.
    ///
    /// For the parent-folder policies, an input whose parent directory has
    /// no usable name (e.g. a file at the filesystem root) maps to `.`.
    pub fn output_dir(&self, input: &Path) -> PathBuf {
        match self {
            MappingPolicy::SameDir => input
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(".")),
            MappingPolicy::ParentFolder => parent_folder(input, false),
            MappingPolicy::ParentFolderLowercase => parent_folder(input, true),
        }
    }

    /// Compute the full output path for `input` converted to `target`.
    pub fn output_path(&self, input: &Path, target: Format) -> PathBuf {
        self.output_dir(input).join(output_filename(input, target))
    }
}

fn parent_folder(input: &Path, lowercase: bool) -> PathBuf {
    let name = input
        .parent()
        .and_then(Path::file_name)
        .and_then(|n| n.to_str());
    match name {
        Some(n) if lowercase => PathBuf::from(".").join(n.to_lowercase()),
        Some(n) => PathBuf::from(".").join(n),
        None => PathBuf::from("."),
    }
}

/// Derive the output filename: input filename with only the final
/// extension replaced by the target format's. The stem is preserved
/// byte-for-byte, inner dots included.
pub fn output_filename(input: &Path, target: Format) -> PathBuf {
    let name = input
        .file_name()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| "untitled".into());
    PathBuf::from(name).with_extension(target.extension())
}
