//! Font loading and metrics.
//!
//! Outline fonts are read with `fontdue`. If any configured face cannot be
//! loaded the whole set switches to the built-in 10x20 bitmap font from
//! `embedded-graphics` so that every kind keeps consistent metrics.

use std::{fs, path::Path};

use embedded_graphics::mono_font::{MonoFont, ascii::FONT_10X20};
use fontdue::{Font, FontSettings};
use tracing::{debug, warn};
use unicode_width::UnicodeWidthChar;

use crate::{
    Error,
    inline::SpanKind,
    measure::{Metrics, TextRole},
    style::FontConfig,
};

/// Bitmap font used when outline fonts are unavailable.
pub const BUILTIN_FONT: &MonoFont<'static> = &FONT_10X20;

struct OutlineFaces {
    regular: Font,
    bold: Font,
    italic: Option<Font>,
    bold_italic: Option<Font>,
    code: Option<Font>,
}

enum Faces {
    Outline(Box<OutlineFaces>),
    Builtin,
}

/// Face and pixel size selected for one run of text.
#[derive(Clone, Copy)]
pub enum Face<'a> {
    Outline { font: &'a Font, px: f32 },
    Builtin(&'static MonoFont<'static>),
}

/// The fonts of one conversion run, shared read-only across documents.
pub struct FontSet {
    faces: Faces,
    config: FontConfig,
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "advances are small non-negative pixel values"
)]
pub(crate) fn round_px(value: f32) -> u32 { value.round().max(0.0) as u32 }

fn load_face(path: &Path) -> Result<Font, Error> {
    let bytes = fs::read(path).map_err(|err| Error::FontLoad {
        path: path.to_path_buf(),
        reason: err.to_string(),
    })?;
    Font::from_bytes(bytes, FontSettings::default()).map_err(|reason| Error::FontLoad {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    })
}

fn load_optional(path: Option<&Path>) -> Result<Option<Font>, Error> {
    path.map(load_face).transpose()
}

/// Cell advance of `ch` in a monospaced bitmap font.
pub(crate) fn builtin_advance(font: &MonoFont<'_>, ch: char) -> u32 {
    let cells = u32::try_from(ch.width().unwrap_or(0)).unwrap_or(0);
    cells * (font.character_size.width + font.character_spacing)
}

impl FontSet {
    /// Load every face named in `config`.
    ///
    /// # Errors
    /// Returns [`Error::FontLoad`] for the first face that cannot be read
    /// or parsed.
    pub fn try_load(config: &FontConfig) -> Result<Self, Error> {
        let faces = OutlineFaces {
            regular: load_face(&config.regular)?,
            bold: load_face(&config.bold)?,
            italic: load_optional(config.italic.as_deref())?,
            bold_italic: load_optional(config.bold_italic.as_deref())?,
            code: load_optional(config.code.as_deref())?,
        };
        debug!(regular = %config.regular.display(), bold = %config.bold.display(), "loaded fonts");
        Ok(Self {
            faces: Faces::Outline(Box::new(faces)),
            config: config.clone(),
        })
    }

    /// Load `config`, substituting the built-in font for every kind when
    /// any face fails.
    #[must_use]
    pub fn load(config: &FontConfig) -> Self {
        Self::try_load(config).unwrap_or_else(|err| {
            warn!(error = %err, "falling back to the built-in font");
            Self::builtin_with(config)
        })
    }

    /// The built-in bitmap font with default sizes.
    #[must_use]
    pub fn builtin() -> Self { Self::builtin_with(&FontConfig::default()) }

    #[must_use]
    pub fn builtin_with(config: &FontConfig) -> Self {
        Self {
            faces: Faces::Builtin,
            config: config.clone(),
        }
    }

    #[must_use]
    pub fn is_builtin(&self) -> bool { matches!(self.faces, Faces::Builtin) }

    /// Face used to set a run of `kind` in `role`.
    #[must_use]
    pub fn face(&self, role: TextRole, kind: SpanKind) -> Face<'_> {
        let Faces::Outline(faces) = &self.faces else {
            return Face::Builtin(BUILTIN_FONT);
        };
        let font = match (role, kind) {
            (TextRole::Heading(_), _) => &faces.bold,
            (TextRole::Code, _) | (TextRole::Body, SpanKind::Code) => {
                faces.code.as_ref().unwrap_or(&faces.regular)
            }
            (TextRole::Body, SpanKind::Bold) => &faces.bold,
            (TextRole::Body, SpanKind::Italic) => faces.italic.as_ref().unwrap_or(&faces.regular),
            (TextRole::Body, SpanKind::BoldItalic) => {
                faces.bold_italic.as_ref().unwrap_or(&faces.bold)
            }
            (TextRole::Body, SpanKind::Normal | SpanKind::Highlight) => &faces.regular,
        };
        Face::Outline {
            font,
            px: self.config.size_for(role, kind),
        }
    }
}

impl Face<'_> {
    /// Horizontal advance of `ch`, rounded to whole pixels.
    #[must_use]
    pub fn advance(&self, ch: char) -> u32 {
        match self {
            Face::Outline { font, px } => round_px(font.metrics(ch, *px).advance_width),
            Face::Builtin(font) => builtin_advance(font, ch),
        }
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        match self {
            Face::Outline { px, .. } => round_px(*px),
            Face::Builtin(font) => font.character_size.height,
        }
    }

    /// Whether bold has to be imitated because the face has no bold weight.
    #[must_use]
    pub fn fake_bold(&self, kind: SpanKind) -> bool {
        matches!(self, Face::Builtin(_)) && matches!(kind, SpanKind::Bold | SpanKind::BoldItalic)
    }
}

impl Metrics for FontSet {
    fn text_width(&self, text: &str, role: TextRole, kind: SpanKind) -> u32 {
        let face = self.face(role, kind);
        text.chars()
            .map(|ch| face.advance(ch))
            .fold(0, u32::saturating_add)
    }

    fn line_height(&self, role: TextRole, kind: SpanKind) -> u32 { self.face(role, kind).height() }
}
