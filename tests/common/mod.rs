//! Utility helpers shared across integration tests.
#![allow(dead_code, reason = "each test crate uses a subset of the helpers")]

use std::{
    fs,
    path::{Path, PathBuf},
};

use assert_cmd::Command;
use mdpages::{FontSet, StyleConfig, style::FontConfig};

/// Write `content` to `dir/name` and return the path.
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("failed to write test file");
    path
}

/// Font configuration naming files that do not exist.
pub fn missing_fonts() -> FontConfig {
    FontConfig {
        regular: PathBuf::from("/nonexistent/mdpages/regular.ttf"),
        bold: PathBuf::from("/nonexistent/mdpages/bold.ttf"),
        ..FontConfig::default()
    }
}

/// Style file that forces the built-in font, so layouts do not depend on the
/// fonts installed on the machine.
pub fn builtin_style_file(dir: &Path) -> PathBuf {
    write_file(
        dir,
        "style.toml",
        "[fonts]\nregular = \"/nonexistent/mdpages/regular.ttf\"\n\
         bold = \"/nonexistent/mdpages/bold.ttf\"\n",
    )
}

/// Built-in fonts with default sizes.
pub fn builtin_fonts() -> FontSet { FontSet::load(&missing_fonts()) }

pub fn default_style() -> StyleConfig { StyleConfig::default() }

/// `count` short paragraphs, one per source line.
pub fn paragraphs(count: usize) -> String {
    (1..=count)
        .map(|i| format!("Paragraph number {i}."))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The `mdpages` binary with logging left at its defaults.
pub fn mdpages() -> Command {
    let mut cmd = Command::cargo_bin("mdpages").expect("Failed to create cargo command for mdpages");
    cmd.env_remove("RUST_LOG");
    cmd
}
