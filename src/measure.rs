//! Text measurement seam between layout and font metrics.
//!
//! Layout never touches fonts directly. It asks a [`Metrics`] provider for
//! widths, and the rasterizer draws with the same provider, so wrapping
//! decisions made while paginating are the ones drawn on the page.

use crate::inline::SpanKind;

/// Font family a run of text is set in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextRole {
    /// Heading text at the given level (1 to 3).
    Heading(u8),
    /// Paragraphs, quotes and list items.
    Body,
    /// Fenced code block lines.
    Code,
}

/// Pixel width of a run of text of a given kind.
pub trait Measure {
    fn width(&self, text: &str, kind: SpanKind) -> u32;
}

impl<F> Measure for F
where
    F: Fn(&str, SpanKind) -> u32,
{
    fn width(&self, text: &str, kind: SpanKind) -> u32 { self(text, kind) }
}

/// Font metrics shared by layout and drawing.
///
/// Widths must be additive over characters: the width of a string equals
/// the sum of the widths of its characters.
pub trait Metrics: Sync {
    fn text_width(&self, text: &str, role: TextRole, kind: SpanKind) -> u32;

    /// Nominal glyph height used to size span backgrounds.
    fn line_height(&self, role: TextRole, kind: SpanKind) -> u32;
}

/// [`Measure`] view of a [`Metrics`] provider fixed to one role.
#[derive(Clone, Copy)]
pub struct RoleMeasure<'a, M: ?Sized> {
    metrics: &'a M,
    role: TextRole,
}

impl<'a, M: Metrics + ?Sized> RoleMeasure<'a, M> {
    #[must_use]
    pub fn new(metrics: &'a M, role: TextRole) -> Self { Self { metrics, role } }
}

impl<M: Metrics + ?Sized> Measure for RoleMeasure<'_, M> {
    fn width(&self, text: &str, kind: SpanKind) -> u32 {
        self.metrics.text_width(text, self.role, kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Cells;

    impl Metrics for Cells {
        fn text_width(&self, text: &str, role: TextRole, _kind: SpanKind) -> u32 {
            let cell = if role == TextRole::Code { 5 } else { 10 };
            cell * u32::try_from(text.chars().count()).unwrap_or(u32::MAX)
        }

        fn line_height(&self, _role: TextRole, _kind: SpanKind) -> u32 { 20 }
    }

    #[test]
    fn closures_measure_text() {
        let measure = |text: &str, _kind: SpanKind| u32::try_from(text.len()).unwrap_or(0);
        assert_eq!(measure.width("abc", SpanKind::Bold), 3);
    }

    #[test]
    fn role_measure_forwards_role() {
        assert_eq!(
            RoleMeasure::new(&Cells, TextRole::Code).width("abcd", SpanKind::Normal),
            20
        );
        assert_eq!(
            RoleMeasure::new(&Cells, TextRole::Body).width("abcd", SpanKind::Normal),
            40
        );
    }
}
