//! Library for turning Markdown documents into paginated page images.
//!
//! A conversion runs in stages:
//! - [`preprocess`] promotes single line breaks to paragraph breaks.
//! - [`blocks`] splits the text into headings, paragraphs, code blocks,
//!   quotes, lists and rules.
//! - [`inline`] tokenizes block text into formatted spans.
//! - [`wrap`] and [`layout`] break spans into lines and compute block heights.
//! - [`paginate`] groups blocks into pages.
//! - [`render`] rasterizes each page and writes it to disk.

use std::path::{Path, PathBuf};

use image::RgbImage;
use tracing::{debug, info};

#[macro_use]
mod macros;

pub mod blocks;
pub mod error;
pub mod fonts;
pub mod inline;
pub mod io;
pub mod layout;
pub mod measure;
pub mod paginate;
pub mod preprocess;
pub mod render;
pub mod style;
pub mod wrap;

pub use blocks::{Block, parse_blocks};
pub use error::Error;
pub use fonts::FontSet;
pub use inline::{Span, SpanKind, tokenize};
pub use layout::estimate_height;
pub use paginate::{Page, paginate};
pub use preprocess::promote_line_breaks;
pub use render::{OutputFormat, render_page, write_pages};
pub use style::StyleConfig;
pub use wrap::{Line, wrap};

/// Where and how the pages of one document are written.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Output directory; defaults to the input's directory.
    pub output_dir: Option<PathBuf>,
    /// File name prefix; defaults to the input's stem.
    pub base_name: Option<String>,
    pub format: OutputFormat,
}

/// Preprocess, parse and paginate `markdown`.
#[must_use]
pub fn markdown_to_pages<M: measure::Metrics + ?Sized>(
    markdown: &str,
    metrics: &M,
    style: &StyleConfig,
) -> Vec<Page> {
    let text = promote_line_breaks(markdown);
    let blocks = parse_blocks(&text);
    debug!(blocks = blocks.len(), "parsed document");
    paginate(blocks, metrics, style)
}

/// Render `markdown` into one image per page.
#[must_use]
pub fn render_markdown(markdown: &str, fonts: &FontSet, style: &StyleConfig) -> Vec<RgbImage> {
    markdown_to_pages(markdown, fonts, style)
        .iter()
        .map(|page| render_page(page, fonts, style))
        .collect()
}

/// Convert the Markdown file at `input` into page images.
///
/// Returns the written paths in page order. A document without content
/// writes nothing and returns an empty list.
///
/// # Errors
/// Returns an error if the input cannot be read, the output directory
/// cannot be created or an image cannot be written.
pub fn convert_file(
    input: &Path,
    opts: &ConvertOptions,
    style: &StyleConfig,
    fonts: &FontSet,
) -> Result<Vec<PathBuf>, Error> {
    let markdown = io::read_markdown(input)?;
    let dir = opts
        .output_dir
        .clone()
        .unwrap_or_else(|| io::default_output_dir(input));
    let base = opts
        .base_name
        .clone()
        .unwrap_or_else(|| io::default_base_name(input));
    let images = render_markdown(&markdown, fonts, style);
    let paths = write_pages(&images, &dir, &base, opts.format)?;
    info!(
        input = %input.display(),
        pages = paths.len(),
        dir = %dir.display(),
        "converted document"
    );
    Ok(paths)
}
