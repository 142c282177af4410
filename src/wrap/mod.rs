//! Greedy line wrapping over formatted spans.
//!
//! Widths come from a [`Measure`] so the same wrap runs while estimating
//! block heights and while drawing. A span that does not fit on the current
//! line moves to a fresh line whole; only spans wider than a full line are
//! split per character.

mod line_buffer;

use line_buffer::LineBuffer;

use crate::{
    inline::{Span, SpanKind},
    measure::Measure,
};

/// One laid-out row of spans.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    spans: Vec<Span>,
    width: u32,
}

impl Line {
    #[must_use]
    pub fn spans(&self) -> &[Span] { &self.spans }

    /// Sum of the measured widths of the spans.
    #[must_use]
    pub fn width(&self) -> u32 { self.width }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.spans.is_empty() }

    #[must_use]
    pub fn text(&self) -> String { crate::inline::plain_text(&self.spans) }
}

fn split_chars<M: Measure + ?Sized>(
    buffer: &mut LineBuffer,
    lines: &mut Vec<Line>,
    kind: SpanKind,
    text: &str,
    measure: &M,
    max_width: u32,
) {
    let mut utf8 = [0u8; 4];
    for ch in text.chars() {
        let piece: &str = ch.encode_utf8(&mut utf8);
        let width = measure.width(piece, kind);
        if !buffer.fits(width, max_width) {
            buffer.flush_into(lines);
        }
        buffer.push(kind, piece, width);
    }
}

/// Wrap `spans` into lines no wider than `max_width`.
///
/// A line only exceeds `max_width` when it holds a single character that is
/// wider than the limit on its own. Empty input yields one empty line.
///
/// # Examples
///
/// ```
/// use mdpages::{inline::{Span, SpanKind}, wrap::wrap};
/// let cells = |text: &str, _kind: SpanKind| 10 * text.chars().count() as u32;
/// let lines = wrap(
///     &[Span::normal("ab "), Span::new(SpanKind::Bold, "bold")],
///     &cells,
///     50,
/// );
/// assert_eq!(lines.len(), 2);
/// assert_eq!(lines[0].text(), "ab ");
/// assert_eq!(lines[1].text(), "bold");
/// ```
#[must_use]
pub fn wrap<M: Measure + ?Sized>(spans: &[Span], measure: &M, max_width: u32) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut buffer = LineBuffer::new();

    for span in spans {
        let width = measure.width(&span.text, span.kind);
        if buffer.fits(width, max_width) {
            buffer.push(span.kind, &span.text, width);
            continue;
        }

        if width <= max_width {
            buffer.flush_into(&mut lines);
            buffer.push(span.kind, &span.text, width);
            continue;
        }

        split_chars(
            &mut buffer,
            &mut lines,
            span.kind,
            &span.text,
            measure,
            max_width,
        );
    }

    buffer.flush_into(&mut lines);
    if lines.is_empty() {
        lines.push(Line::default());
    }
    lines
}

#[cfg(test)]
mod tests;
