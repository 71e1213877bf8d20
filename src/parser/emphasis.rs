//! Inline emphasis resolution.

use regex::Regex;

use crate::model::InlineSpan;

/// Split a line into spans of uniform emphasis.
///
/// Emphasis is marked by paired `**` delimiters, matched non-greedily and
/// without nesting. Text between a matched pair becomes a strong span with
/// the delimiters stripped; everything else stays plain. An
/// unmatched `**` is literal text. Empty runs produce no span, so
/// concatenating the returned spans' text always reproduces the input line
/// minus the delimiter markers.
pub fn resolve_spans(line: &str) -> Vec<InlineSpan> {
    let pair = Regex::new(r"\*\*(.*?)\*\*").unwrap();

    let mut spans = Vec::new();
    let mut cursor = 0;

    for caps in pair.captures_iter(line) {
        let whole = caps.get(0).unwrap();
        let inner = caps.get(1).unwrap();

        if whole.start() > cursor {
            spans.push(InlineSpan::plain(&line[cursor..whole.start()]));
        }
        if !inner.as_str().is_empty() {
            spans.push(InlineSpan::strong(inner.as_str()));
        }
        cursor = whole.end();
    }

    if cursor < line.len() {
        spans.push(InlineSpan::plain(&line[cursor..]));
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejoin(spans: &[InlineSpan]) -> String {
        spans.iter().map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn test_single_pair() {
        let spans = resolve_spans("Great use of **Strength** tones here");
        assert_eq!(
            spans,
            vec![
                InlineSpan::plain("Great use of "),
                InlineSpan::strong("Strength"),
                InlineSpan::plain(" tones here"),
            ]
        );
    }

    #[test]
    fn test_round_trip_strips_only_delimiters() {
        let line = "mix **bold** and **more bold** text";
        let spans = resolve_spans(line);
        assert_eq!(rejoin(&spans), "mix bold and more bold text");
    }

    #[test]
    fn test_no_delimiters() {
        let spans = resolve_spans("plain line");
        assert_eq!(spans, vec![InlineSpan::plain("plain line")]);
    }

    #[test]
    fn test_unmatched_delimiter_is_literal() {
        let spans = resolve_spans("a ** dangling marker");
        assert_eq!(spans, vec![InlineSpan::plain("a ** dangling marker")]);
    }

    #[test]
    fn test_empty_pair_emits_nothing() {
        let spans = resolve_spans("before **** after");
        assert_eq!(
            spans,
            vec![InlineSpan::plain("before "), InlineSpan::plain(" after")]
        );
        assert_eq!(rejoin(&spans), "before  after");
    }

    #[test]
    fn test_emphasis_at_line_edges() {
        let spans = resolve_spans("**Lead** middle **tail**");
        assert_eq!(
            spans,
            vec![
                InlineSpan::strong("Lead"),
                InlineSpan::plain(" middle "),
                InlineSpan::strong("tail"),
            ]
        );
    }

    #[test]
    fn test_non_greedy_matching() {
        // Three markers: the first two pair up, the third is literal.
        let spans = resolve_spans("**a** b **c");
        assert_eq!(
            spans,
            vec![InlineSpan::strong("a"), InlineSpan::plain(" b **c")]
        );
    }

    #[test]
    fn test_empty_line() {
        assert!(resolve_spans("").is_empty());
    }
}
