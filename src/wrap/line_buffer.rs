//! Line buffer used by [`wrap`](super::wrap).
//!
//! This module holds the spans of the line being filled together with its
//! running width, and hands finished lines over to the output.

use super::Line;
use crate::inline::{Span, SpanKind};

#[derive(Default)]
pub(crate) struct LineBuffer {
    spans: Vec<Span>,
    width: u32,
}

impl LineBuffer {
    pub(crate) fn new() -> Self { Self::default() }

    /// Whether `extra` more pixels still fit within `max_width`.
    pub(crate) fn fits(&self, extra: u32, max_width: u32) -> bool {
        self.width.saturating_add(extra) <= max_width
    }

    /// Append text, merging into the last span when the kinds match.
    pub(crate) fn push(&mut self, kind: SpanKind, text: &str, width: u32) {
        match self.spans.last_mut() {
            Some(last) if last.kind == kind => last.text.push_str(text),
            _ => self.spans.push(Span::new(kind, text)),
        }
        self.width = self.width.saturating_add(width);
    }

    pub(crate) fn flush_into(&mut self, lines: &mut Vec<Line>) {
        if self.spans.is_empty() {
            return;
        }
        lines.push(Line {
            spans: std::mem::take(&mut self.spans),
            width: self.width,
        });
        self.width = 0;
    }
}
