//! Page geometry, fonts, spacing and colours for one conversion run.
//!
//! Every field has a default so a TOML override file only needs the keys it
//! changes:
//!
//! ```toml
//! [page]
//! height = 1200
//!
//! [palette]
//! highlight_bg = [255, 240, 200]
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::{Error, inline::SpanKind, measure::TextRole};

/// 8-bit RGB colour, written in TOML as `[r, g, b]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    pub const WHITE: Color = Color(255, 255, 255);
    pub const BLACK: Color = Color(0, 0, 0);
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub page: PageConfig,
    pub fonts: FontConfig,
    pub spacing: SpacingConfig,
    pub palette: Palette,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub width: u32,
    pub height: u32,
    pub margin_left: u32,
    pub margin_right: u32,
    pub margin_top: u32,
    pub margin_bottom: u32,
    /// Extra space kept free above the bottom margin.
    pub safety_margin: u32,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            width: 900,
            height: 1600,
            margin_left: 50,
            margin_right: 50,
            margin_top: 50,
            margin_bottom: 50,
            safety_margin: 20,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    pub regular: PathBuf,
    pub bold: PathBuf,
    pub italic: Option<PathBuf>,
    pub bold_italic: Option<PathBuf>,
    pub code: Option<PathBuf>,
    pub h1_size: f32,
    pub h2_size: f32,
    pub h3_size: f32,
    pub body_size: f32,
    pub code_size: f32,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            regular: PathBuf::from("/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf"),
            bold: PathBuf::from("/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf"),
            italic: None,
            bold_italic: None,
            code: None,
            h1_size: 52.0,
            h2_size: 44.0,
            h3_size: 40.0,
            body_size: 36.0,
            code_size: 28.0,
        }
    }
}

impl FontConfig {
    /// Pixel size used for a run of `kind` in `role`.
    #[must_use]
    pub fn size_for(&self, role: TextRole, kind: SpanKind) -> f32 {
        match role {
            TextRole::Heading(1) => self.h1_size,
            TextRole::Heading(2) => self.h2_size,
            TextRole::Heading(_) => self.h3_size,
            TextRole::Code => self.code_size,
            TextRole::Body if kind == SpanKind::Code => self.code_size,
            TextRole::Body => self.body_size,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SpacingConfig {
    pub h1_line: u32,
    pub h2_line: u32,
    pub h3_line: u32,
    pub body_line: u32,
    pub code_line: u32,
    /// Gap after a paragraph.
    pub paragraph: u32,
    /// Gap after a heading, per level.
    pub heading_gaps: [u32; 3],
    /// Vertical padding inside a code box, split evenly above and below.
    pub code_padding: u32,
    /// Horizontal inset of code text inside its box.
    pub code_inset: u32,
    pub code_gap: u32,
    /// Width reserved on the left of a quote.
    pub quote_indent: u32,
    /// Horizontal offset of quote text from the left edge.
    pub quote_text_offset: u32,
    pub quote_bar_width: u32,
    pub quote_padding: u32,
    pub quote_gap: u32,
    pub list_item_gap: u32,
    pub list_padding: u32,
    pub rule_height: u32,
    pub rule_thickness: u32,
    /// Horizontal padding of code and highlight span backgrounds.
    pub span_padding: u32,
}

impl Default for SpacingConfig {
    fn default() -> Self {
        Self {
            h1_line: 72,
            h2_line: 64,
            h3_line: 56,
            body_line: 64,
            code_line: 50,
            paragraph: 40,
            heading_gaps: [20, 15, 10],
            code_padding: 30,
            code_inset: 15,
            code_gap: 20,
            quote_indent: 50,
            quote_text_offset: 15,
            quote_bar_width: 6,
            quote_padding: 20,
            quote_gap: 20,
            list_item_gap: 10,
            list_padding: 10,
            rule_height: 40,
            rule_thickness: 2,
            span_padding: 4,
        }
    }
}

impl SpacingConfig {
    #[must_use]
    pub fn heading_line(&self, level: u8) -> u32 {
        match level {
            1 => self.h1_line,
            2 => self.h2_line,
            _ => self.h3_line,
        }
    }

    #[must_use]
    pub fn heading_gap(&self, level: u8) -> u32 {
        let idx = usize::from(level.clamp(1, 3)) - 1;
        self.heading_gaps[idx]
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub title: Color,
    pub highlight_bg: Color,
    pub highlight_text: Color,
    pub code_bg: Color,
    pub code_span_text: Color,
    pub code_block_text: Color,
    pub border: Color,
    pub quote_bar: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color::WHITE,
            text: Color::BLACK,
            title: Color::BLACK,
            highlight_bg: Color(255, 230, 235),
            highlight_text: Color::BLACK,
            code_bg: Color(240, 240, 240),
            code_span_text: Color(200, 50, 80),
            code_block_text: Color(80, 80, 80),
            border: Color(220, 220, 220),
            quote_bar: Color(150, 150, 150),
        }
    }
}

impl StyleConfig {
    /// Parse overrides from TOML text.
    ///
    /// # Errors
    /// Returns [`Error::ParseStyle`] if the text is not a valid style file.
    pub fn from_toml_str(text: &str, origin: &Path) -> Result<Self, Error> {
        toml::from_str(text).map_err(|source| Error::ParseStyle {
            path: origin.to_path_buf(),
            source: Box::new(source),
        })
    }

    /// Load overrides from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let text = fs::read_to_string(path).map_err(|source| Error::ReadStyle {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text, path)
    }

    /// Page width minus the left and right margins.
    #[must_use]
    pub fn content_width(&self) -> u32 {
        self.page
            .width
            .saturating_sub(self.page.margin_left)
            .saturating_sub(self.page.margin_right)
    }

    /// Lowest y coordinate block content may reach on a page.
    #[must_use]
    pub fn usable_height(&self) -> u32 {
        self.page
            .height
            .saturating_sub(self.page.margin_bottom)
            .saturating_sub(self.page.safety_margin)
    }
}
