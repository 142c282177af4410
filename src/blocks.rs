//! Block-level parsing of the supported Markdown dialect.
//!
//! The parser is line based: each trimmed line is classified by its prefix
//! and consecutive lines of the same kind are folded into one [`Block`].
//! Input is expected to have passed through
//! [`promote_line_breaks`](crate::preprocess::promote_line_breaks).

use std::sync::LazyLock;

use regex::Regex;

use crate::preprocess::is_fence;

static BULLET_RE: LazyLock<Regex> =
    lazy_regex!(r"^[*+-]\s+(.+)$", "bullet item regex should compile");

static ORDERED_RE: LazyLock<Regex> =
    lazy_regex!(r"^\d+\.\s+(.+)$", "ordered item regex should compile");

/// Block-level elements parsed from Markdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading {
        /// Level between 1 and 3.
        level: u8,
        content: String,
    },
    Paragraph {
        content: String,
    },
    Code {
        language: Option<String>,
        content: String,
    },
    Quote {
        content: String,
    },
    List {
        items: Vec<String>,
    },
    OrderedList {
        items: Vec<String>,
    },
    Rule,
}

impl Block {
    /// Short name of the block kind, used in log output.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Block::Heading { .. } => "heading",
            Block::Paragraph { .. } => "paragraph",
            Block::Code { .. } => "code",
            Block::Quote { .. } => "quote",
            Block::List { .. } => "list",
            Block::OrderedList { .. } => "ordered_list",
            Block::Rule => "horizontal_rule",
        }
    }
}

fn heading(trimmed: &str) -> Option<(u8, &str)> {
    let (level, rest) = if let Some(rest) = trimmed.strip_prefix("### ") {
        (3, rest)
    } else if let Some(rest) = trimmed.strip_prefix("## ") {
        (2, rest)
    } else if let Some(rest) = trimmed.strip_prefix("# ") {
        (1, rest)
    } else {
        return None;
    };
    let content = rest.trim();
    (!content.is_empty()).then_some((level, content))
}

fn is_rule(trimmed: &str) -> bool { matches!(trimmed, "---" | "***" | "___") }

fn bullet_item(trimmed: &str) -> Option<&str> {
    BULLET_RE
        .captures(trimmed)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().trim())
}

fn ordered_item(trimmed: &str) -> Option<&str> {
    ORDERED_RE
        .captures(trimmed)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().trim())
}

/// Whether `trimmed` opens a block other than a paragraph.
fn starts_block(trimmed: &str) -> bool {
    heading(trimmed).is_some()
        || is_fence(trimmed)
        || trimmed.starts_with('>')
        || is_rule(trimmed)
        || bullet_item(trimmed).is_some()
        || ordered_item(trimmed).is_some()
}

/// Collect consecutive list items matched by `item`.
fn collect_items<'a>(
    lines: &[&'a str],
    idx: &mut usize,
    item: fn(&'a str) -> Option<&'a str>,
) -> Vec<String> {
    let mut items = Vec::new();
    while let Some(text) = lines.get(*idx).and_then(|line| item(line.trim())) {
        items.push(text.to_string());
        *idx += 1;
    }
    items
}

/// Parse preprocessed Markdown text into an ordered list of blocks.
///
/// Blank lines separate blocks and are otherwise discarded.
///
/// # Examples
///
/// ```
/// use mdpages::blocks::{Block, parse_blocks};
/// let blocks = parse_blocks("# Title\n\nHello **world**");
/// assert_eq!(
///     blocks,
///     vec![
///         Block::Heading { level: 1, content: "Title".into() },
///         Block::Paragraph { content: "Hello **world**".into() },
///     ]
/// );
/// ```
#[must_use]
pub fn parse_blocks(text: &str) -> Vec<Block> {
    let lines: Vec<&str> = text.lines().collect();
    let mut blocks = Vec::new();
    let mut idx = 0;

    while idx < lines.len() {
        let trimmed = lines[idx].trim();

        if trimmed.is_empty() {
            idx += 1;
            continue;
        }

        if let Some((level, content)) = heading(trimmed) {
            blocks.push(Block::Heading {
                level,
                content: content.to_string(),
            });
            idx += 1;
            continue;
        }

        if is_fence(trimmed) {
            let language = trimmed.trim_start_matches('`').trim();
            let language = (!language.is_empty()).then(|| language.to_string());
            idx += 1;
            let start = idx;
            while idx < lines.len() && !is_fence(lines[idx]) {
                idx += 1;
            }
            let content = lines[start..idx].join("\n");
            // skip the closing fence when present
            idx += 1;
            blocks.push(Block::Code { language, content });
            continue;
        }

        if trimmed.starts_with('>') {
            let mut parts = Vec::new();
            while let Some(rest) = lines.get(idx).and_then(|l| l.trim().strip_prefix('>')) {
                let rest = rest.trim();
                if !rest.is_empty() {
                    parts.push(rest);
                }
                idx += 1;
            }
            if !parts.is_empty() {
                blocks.push(Block::Quote {
                    content: parts.join(" "),
                });
            }
            continue;
        }

        if is_rule(trimmed) {
            blocks.push(Block::Rule);
            idx += 1;
            continue;
        }

        if bullet_item(trimmed).is_some() {
            let items = collect_items(&lines, &mut idx, bullet_item);
            blocks.push(Block::List { items });
            continue;
        }

        if ordered_item(trimmed).is_some() {
            let items = collect_items(&lines, &mut idx, ordered_item);
            blocks.push(Block::OrderedList { items });
            continue;
        }

        let mut parts = vec![trimmed];
        idx += 1;
        while let Some(next) = lines.get(idx).map(|l| l.trim()) {
            if next.is_empty() || starts_block(next) {
                break;
            }
            parts.push(next);
            idx += 1;
        }
        blocks.push(Block::Paragraph {
            content: parts.join(" "),
        });
    }

    blocks
}
