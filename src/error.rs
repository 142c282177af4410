//! Error types for the `mdpages` library.
//!
//! Input and output failures are fatal and abort a conversion. A font that
//! cannot be loaded is not: [`Error::FontLoad`] is only reported in the
//! warning emitted when the built-in font is substituted.

use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read input '{path}': {source}")]
    ReadInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to create output directory '{path}': {source}")]
    CreateOutputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write image '{path}': {source}")]
    WriteImage {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to read style file '{path}': {source}")]
    ReadStyle {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid style file '{path}': {source}")]
    ParseStyle {
        path: PathBuf,
        #[source]
        source: Box<toml::de::Error>,
    },

    #[error("failed to load font '{path}': {reason}")]
    FontLoad { path: PathBuf, reason: String },
}
