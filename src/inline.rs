//! Inline span tokenizer.
//!
//! Splits a run of block text into formatted [`Span`]s. Delimiters are
//! recognised in a fixed precedence order at each position and only open a
//! span when a matching closer follows; anything else is literal text.
//! Spans do not nest: the first delimiter that closes wins and any markers
//! inside it are kept as literal characters.

/// Formatting applied to a run of inline text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpanKind {
    Normal,
    Bold,
    Italic,
    BoldItalic,
    Code,
    Highlight,
}

impl SpanKind {
    /// Whether the span is drawn over a background rectangle.
    #[must_use]
    pub fn has_background(self) -> bool { matches!(self, SpanKind::Code | SpanKind::Highlight) }
}

/// A run of inline text sharing one [`SpanKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub kind: SpanKind,
    pub text: String,
}

impl Span {
    #[must_use]
    pub fn new(kind: SpanKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn normal(text: impl Into<String>) -> Self { Self::new(SpanKind::Normal, text) }
}

/// Delimiters in the order they are tried at each position.
const DELIMITERS: [(&str, SpanKind); 7] = [
    ("***", SpanKind::BoldItalic),
    ("**", SpanKind::Bold),
    ("__", SpanKind::Bold),
    ("*", SpanKind::Italic),
    ("_", SpanKind::Italic),
    ("`", SpanKind::Code),
    ("==", SpanKind::Highlight),
];

fn is_special(c: char) -> bool { matches!(c, '*' | '_' | '`' | '=') }

/// Find the closer for `delim` opened at `start`.
///
/// Single `*` and `_` refuse an opener or closer that is part of a doubled
/// run, so `**` is never read as two italics.
fn find_closer(text: &str, start: usize, delim: &str) -> Option<usize> {
    let rest = &text[start..];
    if !rest.starts_with(delim) {
        return None;
    }
    let single = delim.len() == 1 && delim != "`";
    if single && rest[1..].starts_with(delim) {
        return None;
    }
    let body = start + delim.len();
    let end = body + text[body..].find(delim)?;
    if single && text[end + 1..].starts_with(delim) {
        return None;
    }
    Some(end)
}

fn push_span(spans: &mut Vec<Span>, kind: SpanKind, text: &str) {
    if text.is_empty() {
        return;
    }
    match spans.last_mut() {
        Some(last) if last.kind == kind => last.text.push_str(text),
        _ => spans.push(Span::new(kind, text)),
    }
}

/// Split `text` into formatted spans.
///
/// Adjacent spans of the same kind are merged and empty delimiter pairs are
/// dropped. Text with no recognised structure yields a single normal span;
/// empty text yields no spans.
///
/// # Examples
///
/// ```
/// use mdpages::inline::{Span, SpanKind, tokenize};
/// assert_eq!(
///     tokenize("Hello **world**"),
///     vec![Span::normal("Hello "), Span::new(SpanKind::Bold, "world")]
/// );
/// ```
#[must_use]
pub fn tokenize(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut i = 0;

    'outer: while i < text.len() {
        for (delim, kind) in DELIMITERS {
            if let Some(end) = find_closer(text, i, delim) {
                push_span(&mut spans, kind, &text[i + delim.len()..end]);
                i = end + delim.len();
                continue 'outer;
            }
        }

        let Some(first) = text[i..].chars().next() else {
            break;
        };
        let run_start = i;
        i += first.len_utf8();
        i = text[i..]
            .find(is_special)
            .map_or(text.len(), |offset| i + offset);
        push_span(&mut spans, SpanKind::Normal, &text[run_start..i]);
    }

    if spans.is_empty() && !text.is_empty() {
        spans.push(Span::normal(text));
    }
    spans
}

/// Concatenate span text in order.
#[must_use]
pub fn plain_text(spans: &[Span]) -> String {
    spans.iter().map(|span| span.text.as_str()).collect()
}
