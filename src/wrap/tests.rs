//! Unit tests for span wrapping.
//!
//! Metrics here are fixed-width cells: every character is ten pixels wide,
//! bold characters twelve, so expected breaks can be worked out by hand.

use rstest::{fixture, rstest};

use super::{Line, line_buffer::LineBuffer, wrap};
use crate::inline::{Span, SpanKind, plain_text, tokenize};

fn cells(text: &str, kind: SpanKind) -> u32 {
    let cell = if matches!(kind, SpanKind::Bold | SpanKind::BoldItalic) {
        12
    } else {
        10
    };
    cell * u32::try_from(text.chars().count()).expect("test text is short")
}

#[fixture]
fn sentence() -> Vec<Span> {
    tokenize("Keep **this phrase** together and `code` too, ==highlight== last")
}

fn texts(lines: &[Line]) -> Vec<String> { lines.iter().map(Line::text).collect() }

#[test]
fn line_buffer_merges_same_kind() {
    let mut buffer = LineBuffer::new();
    buffer.push(SpanKind::Normal, "ab", 20);
    buffer.push(SpanKind::Normal, "c", 10);
    buffer.push(SpanKind::Code, "x", 10);

    let mut lines = Vec::new();
    buffer.flush_into(&mut lines);
    assert_eq!(
        lines[0].spans(),
        &[Span::normal("abc"), Span::new(SpanKind::Code, "x")]
    );
    assert_eq!(lines[0].width(), 40);

    buffer.push(SpanKind::Bold, "y", 12);
    buffer.flush_into(&mut lines);
    assert_eq!(lines[1].width(), 12);
}

#[test]
fn line_buffer_flush_skips_empty_line() {
    let mut buffer = LineBuffer::new();
    let mut lines = Vec::new();
    buffer.flush_into(&mut lines);
    assert!(lines.is_empty());
}

#[test]
fn empty_input_yields_single_empty_line() {
    let lines = wrap(&[], &cells, 100);
    assert_eq!(lines, vec![Line::default()]);
    assert!(lines[0].is_empty());
}

#[test]
fn short_text_stays_on_one_line() {
    let lines = wrap(&tokenize("Hello **world**"), &cells, 1000);
    assert_eq!(lines.len(), 1);
    assert_eq!(
        lines[0].spans(),
        &[Span::normal("Hello "), Span::new(SpanKind::Bold, "world")]
    );
    assert_eq!(lines[0].width(), 60 + 60);
}

#[test]
fn formatted_span_moves_to_next_line_whole() {
    // "ab " is 30px, the bold run is 48px, the limit 60px.
    let spans = tokenize("ab **bold**");
    let lines = wrap(&spans, &cells, 60);
    assert_eq!(texts(&lines), vec!["ab ", "bold"]);
    assert_eq!(lines[1].spans(), &[Span::new(SpanKind::Bold, "bold")]);
}

#[test]
fn overlong_normal_text_splits_per_character() {
    let lines = wrap(&[Span::normal("abcdefgh")], &cells, 50);
    assert_eq!(texts(&lines), vec!["abcde", "fgh"]);
}

#[test]
fn normal_span_after_formatted_run_moves_whole() {
    // Bold "ab" is 24px; " cdef" is 50px and would overflow 60px.
    let spans = vec![Span::new(SpanKind::Bold, "ab"), Span::normal(" cdef")];
    let lines = wrap(&spans, &cells, 60);
    assert_eq!(texts(&lines), vec!["ab", " cdef"]);
}

#[test]
fn overlong_formatted_span_splits_per_character() {
    let spans = vec![Span::normal("ab"), Span::new(SpanKind::Code, "0123456789")];
    let lines = wrap(&spans, &cells, 60);
    assert_eq!(texts(&lines), vec!["ab0123", "456789"]);
    assert_eq!(
        lines[0].spans(),
        &[Span::normal("ab"), Span::new(SpanKind::Code, "0123")]
    );
}

#[test]
fn character_wider_than_limit_gets_its_own_line() {
    let lines = wrap(&[Span::normal("abc")], &cells, 5);
    assert_eq!(texts(&lines), vec!["a", "b", "c"]);
    assert!(lines.iter().all(|line| line.width() == 10));
}

#[rstest]
fn repeated_wraps_are_identical(sentence: Vec<Span>) {
    assert_eq!(wrap(&sentence, &cells, 170), wrap(&sentence, &cells, 170));
}

#[rstest]
#[case(40)]
#[case(90)]
#[case(170)]
#[case(400)]
fn lines_respect_width_and_conserve_text(sentence: Vec<Span>, #[case] width: u32) {
    let lines = wrap(&sentence, &cells, width);
    for line in &lines {
        let measured: u32 = line.spans().iter().map(|s| cells(&s.text, s.kind)).sum();
        assert_eq!(measured, line.width());
        let single_char = line.text().chars().count() == 1;
        assert!(line.width() <= width || single_char, "{line:?} exceeds {width}");
    }
    let wrapped: String = lines.iter().map(Line::text).collect();
    assert_eq!(wrapped, plain_text(&sentence));
}

#[test]
fn wide_paragraph_on_narrow_page() {
    let spans = tokenize("中文**粗体**文本");
    let lines = wrap(&spans, &cells, 30);
    assert_eq!(texts(&lines), vec!["中文", "粗体", "文本"]);
}
