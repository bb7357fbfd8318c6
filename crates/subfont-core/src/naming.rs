//! Output file naming
//!
//! Every output lands in one directory and is named after the source
//! font: `icons/myfont.ttf` becomes `subset/myfont.subset.svg`,
//! `subset/myfont.subset.woff` and so on.

use std::io;
use std::path::{Path, PathBuf};

use crate::config::Flavor;
use crate::error::{Result, SubsetError};

/// Directory used when none is configured
pub const DEFAULT_OUTPUT_DIR: &str = "subset";

/// File name of `path` without its last extension
pub fn font_basename(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// `<dir>/<basename>.subset.<ext>`
pub fn output_path(dir: &Path, font_path: &Path, ext: &str) -> PathBuf {
    dir.join(format!("{}.subset.{}", font_basename(font_path), ext))
}

pub fn svg_output_path(dir: &Path, font_path: &Path) -> PathBuf {
    output_path(dir, font_path, "svg")
}

pub fn binary_output_path(dir: &Path, font_path: &Path, flavor: Flavor) -> PathBuf {
    output_path(dir, font_path, flavor.as_str())
}

/// Create `dir` if needed; an existing directory is fine
pub fn ensure_output_dir(dir: &Path) -> Result<()> {
    match std::fs::create_dir_all(dir) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists && dir.is_dir() => Ok(()),
        Err(source) => Err(SubsetError::OutputDir {
            path: dir.to_path_buf(),
            source,
        }),
    }
}
