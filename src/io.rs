//! File helpers for converting Markdown documents.

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::Error;

/// Read a Markdown document as UTF-8.
///
/// # Errors
/// Returns [`Error::ReadInput`] if the file cannot be read or is not UTF-8.
pub fn read_markdown(path: &Path) -> Result<String, Error> {
    fs::read_to_string(path).map_err(|source| Error::ReadInput {
        path: path.to_path_buf(),
        source,
    })
}

/// Directory pages are written to when none is given: the input's own.
#[must_use]
pub fn default_output_dir(input: &Path) -> PathBuf {
    match input.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Base file name used when none is given: the input's stem.
#[must_use]
pub fn default_base_name(input: &Path) -> String {
    input
        .file_stem()
        .map_or_else(|| "page".to_string(), |stem| stem.to_string_lossy().into_owned())
}
