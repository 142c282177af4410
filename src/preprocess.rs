//! Newline promotion applied before block parsing.
//!
//! Source paragraphs are written one sentence per line, so every soft line
//! break is promoted to a paragraph break. Fenced code, and the lines of a
//! single quote or list run, keep their single newlines so those runs still
//! parse as one block.

use std::sync::LazyLock;

use regex::Regex;

static BULLET_RE: LazyLock<Regex> =
    lazy_regex!(r"^[*+-]\s", "bullet marker regex should compile");

static ORDERED_RE: LazyLock<Regex> =
    lazy_regex!(r"^\d+\.\s", "ordered marker regex should compile");

/// Run membership of a trimmed source line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Run {
    Quote,
    Bullet,
    Ordered,
    Other,
}

fn classify(line: &str) -> Run {
    let trimmed = line.trim();
    if trimmed.starts_with('>') {
        Run::Quote
    } else if BULLET_RE.is_match(trimmed) {
        Run::Bullet
    } else if ORDERED_RE.is_match(trimmed) {
        Run::Ordered
    } else {
        Run::Other
    }
}

pub(crate) fn is_fence(line: &str) -> bool { line.trim().starts_with("```") }

/// Promote single newlines between non-blank lines to blank lines.
///
/// Existing runs of blank lines are preserved as they are.
///
/// # Examples
///
/// ```
/// use mdpages::preprocess::promote_line_breaks;
/// assert_eq!(promote_line_breaks("# Title\nHello"), "# Title\n\nHello");
/// assert_eq!(promote_line_breaks("a\n\n\nb"), "a\n\n\nb");
/// ```
#[must_use]
pub fn promote_line_breaks(text: &str) -> String {
    let normalised = text.replace("\r\n", "\n");
    let lines: Vec<&str> = normalised.split('\n').collect();
    let mut out = String::with_capacity(normalised.len() + lines.len());
    let mut in_fence = false;

    for (idx, line) in lines.iter().enumerate() {
        if idx > 0 {
            out.push('\n');
            let prev = lines[idx - 1];
            if !in_fence
                && !prev.trim().is_empty()
                && !line.trim().is_empty()
                && !same_run(prev, line)
            {
                out.push('\n');
            }
        }
        out.push_str(line);

        if is_fence(line) {
            in_fence = !in_fence;
        }
    }
    out
}

fn same_run(prev: &str, line: &str) -> bool {
    let kind = classify(line);
    kind != Run::Other && kind == classify(prev)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("# Title\nHello **world**", "# Title\n\nHello **world**")]
    #[case("a\nb\nc", "a\n\nb\n\nc")]
    #[case("a\n\nb", "a\n\nb")]
    #[case("a\n\n\n\nb", "a\n\n\n\nb")]
    #[case("a\r\nb", "a\n\nb")]
    #[case("", "")]
    fn promotes_single_breaks(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(promote_line_breaks(input), expected);
    }

    #[test]
    fn keeps_fenced_code_intact() {
        let input = "intro\n```rust\nlet a = 1;\nlet b = 2;\n```\nafter";
        assert_eq!(
            promote_line_breaks(input),
            "intro\n\n```rust\nlet a = 1;\nlet b = 2;\n```\n\nafter"
        );
    }

    #[test]
    fn keeps_list_and_quote_runs_together() {
        let input = "- a\n- b\n1. x\n2. y\n> q\n> r";
        assert_eq!(
            promote_line_breaks(input),
            "- a\n- b\n\n1. x\n2. y\n\n> q\n> r"
        );
    }
}
