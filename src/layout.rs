//! Block layout and height estimation.
//!
//! [`layout_block`] wraps a block's text and computes the vertical space it
//! occupies. The paginator keeps the resulting [`BlockLayout`] and the
//! rasterizer draws from it, advancing its cursor by the same amounts, so a
//! page never holds more than was estimated for it.

use crate::{
    blocks::Block,
    inline::{Span, SpanKind, tokenize},
    measure::{Metrics, RoleMeasure, TextRole},
    style::StyleConfig,
    wrap::{Line, wrap},
};

/// Marker drawn before unordered list items.
pub const BULLET: &str = "• ";

/// Wrapped content of one block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutBody {
    Heading { level: u8, lines: Vec<Line> },
    Paragraph { lines: Vec<Line> },
    /// Raw code lines, never wrapped.
    Code { lines: Vec<String> },
    Quote { lines: Vec<Line> },
    /// Wrapped lines per item, markers included.
    List { items: Vec<Vec<Line>> },
    Rule,
}

/// Wrapped content of a block together with its height in pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockLayout {
    pub body: LayoutBody,
    pub height: u32,
}

fn stacked(count: usize, spacing: u32) -> u32 {
    u32::try_from(count)
        .unwrap_or(u32::MAX)
        .saturating_mul(spacing)
}

/// Spans of a list item with its marker prepended.
///
/// The marker joins a leading normal span, otherwise it becomes its own
/// normal span.
///
/// # Examples
///
/// ```
/// use mdpages::{inline::Span, layout::list_item_spans};
/// assert_eq!(list_item_spans("1. ", "a"), vec![Span::normal("1. a")]);
/// ```
#[must_use]
pub fn list_item_spans(marker: &str, item: &str) -> Vec<Span> {
    let mut spans = tokenize(item);
    match spans.first_mut() {
        Some(first) if first.kind == SpanKind::Normal => first.text.insert_str(0, marker),
        _ => spans.insert(0, Span::normal(marker)),
    }
    spans
}

/// Marker for the item at `index` of a list.
#[must_use]
pub fn list_marker(ordered: bool, index: usize) -> String {
    if ordered {
        format!("{}. ", index + 1)
    } else {
        BULLET.to_string()
    }
}

fn layout_items<M: Metrics + ?Sized>(
    items: &[String],
    ordered: bool,
    content_width: u32,
    metrics: &M,
    style: &StyleConfig,
) -> BlockLayout {
    let measure = RoleMeasure::new(metrics, TextRole::Body);
    let spacing = &style.spacing;
    let wrapped: Vec<Vec<Line>> = items
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            let spans = list_item_spans(&list_marker(ordered, idx), item);
            wrap(&spans, &measure, content_width)
        })
        .collect();
    let height = wrapped
        .iter()
        .map(|lines| stacked(lines.len(), spacing.body_line).saturating_add(spacing.list_item_gap))
        .fold(spacing.list_padding, u32::saturating_add);
    BlockLayout {
        body: LayoutBody::List { items: wrapped },
        height,
    }
}

/// Wrap `block` at `content_width` and compute its height.
#[must_use]
pub fn layout_block<M: Metrics + ?Sized>(
    block: &Block,
    content_width: u32,
    metrics: &M,
    style: &StyleConfig,
) -> BlockLayout {
    let spacing = &style.spacing;
    match block {
        Block::Heading { level, content } => {
            let measure = RoleMeasure::new(metrics, TextRole::Heading(*level));
            let lines = wrap(&tokenize(content), &measure, content_width);
            let height = stacked(lines.len(), spacing.heading_line(*level))
                .saturating_add(spacing.heading_gap(*level));
            BlockLayout {
                body: LayoutBody::Heading {
                    level: *level,
                    lines,
                },
                height,
            }
        }
        Block::Paragraph { content } => {
            let measure = RoleMeasure::new(metrics, TextRole::Body);
            let lines = wrap(&tokenize(content), &measure, content_width);
            let height = stacked(lines.len(), spacing.body_line).saturating_add(spacing.paragraph);
            BlockLayout {
                body: LayoutBody::Paragraph { lines },
                height,
            }
        }
        Block::Code { content, .. } => {
            let lines: Vec<String> = content.split('\n').map(str::to_string).collect();
            let height = stacked(lines.len(), spacing.code_line)
                .saturating_add(spacing.code_padding)
                .saturating_add(spacing.code_gap);
            BlockLayout {
                body: LayoutBody::Code { lines },
                height,
            }
        }
        Block::Quote { content } => {
            let measure = RoleMeasure::new(metrics, TextRole::Body);
            let width = content_width.saturating_sub(spacing.quote_indent);
            let lines = wrap(&tokenize(content), &measure, width);
            let height = stacked(lines.len(), spacing.body_line)
                .saturating_add(spacing.quote_padding)
                .saturating_add(spacing.quote_gap);
            BlockLayout {
                body: LayoutBody::Quote { lines },
                height,
            }
        }
        Block::List { items } => layout_items(items, false, content_width, metrics, style),
        Block::OrderedList { items } => layout_items(items, true, content_width, metrics, style),
        Block::Rule => BlockLayout {
            body: LayoutBody::Rule,
            height: spacing.rule_height,
        },
    }
}

/// Height `block` occupies when laid out at `content_width`.
#[must_use]
pub fn estimate_height<M: Metrics + ?Sized>(
    block: &Block,
    content_width: u32,
    metrics: &M,
    style: &StyleConfig,
) -> u32 {
    layout_block(block, content_width, metrics, style).height
}
