//! Greedy word wrapping over styled spans.

use crate::model::InlineSpan;

use super::fonts::{text_width, Face};

/// A styled run within one wrapped line, positioned relative to the line
/// start.
#[derive(Debug, Clone, PartialEq)]
pub struct TextChunk {
    pub text: String,
    pub bold: bool,
    /// Horizontal offset from the line's left edge.
    pub x: f32,
}

/// One visual line produced by wrapping.
#[derive(Debug, Clone, PartialEq)]
pub struct WrappedLine {
    pub chunks: Vec<TextChunk>,
    /// Total advance width of the line.
    pub width: f32,
}

/// A word unit: maximal run of non-space text, possibly crossing emphasis
/// boundaries. Words never break mid-wrap, so mixed-style text wraps as a
/// single unit rather than splitting at a style change.
struct Word {
    segs: Vec<(String, bool)>,
    width: f32,
}

impl Word {
    fn new() -> Self {
        Self {
            segs: Vec::new(),
            width: 0.0,
        }
    }

    fn push(&mut self, piece: &str, bold: bool, size: f32) {
        let face = if bold { Face::Bold } else { Face::Regular };
        self.width += text_width(piece, face, size);
        match self.segs.last_mut() {
            Some((text, b)) if *b == bold => text.push_str(piece),
            _ => self.segs.push((piece.to_string(), bold)),
        }
    }

    fn is_empty(&self) -> bool {
        self.segs.is_empty()
    }
}

/// Wrap spans into lines no wider than `max_width`.
///
/// Words accumulate greedily: a word moves to the next line when appending
/// it (plus a joining space) would exceed the limit. A single word wider
/// than the limit is placed alone and allowed to overflow; there is no
/// mid-word breaking.
pub fn wrap_spans(spans: &[InlineSpan], size: f32, max_width: f32) -> Vec<WrappedLine> {
    let words = split_words(spans, size);
    if words.is_empty() {
        return Vec::new();
    }

    let space = text_width(" ", Face::Regular, size);
    let mut lines = Vec::new();
    let mut current: Vec<Word> = Vec::new();
    let mut current_width = 0.0;

    for word in words {
        let needed = if current.is_empty() {
            word.width
        } else {
            space + word.width
        };
        if !current.is_empty() && current_width + needed > max_width {
            lines.push(build_line(std::mem::take(&mut current), size, space));
            current_width = word.width;
            current.push(word);
        } else {
            current_width += needed;
            current.push(word);
        }
    }
    if !current.is_empty() {
        lines.push(build_line(current, size, space));
    }

    lines
}

fn split_words(spans: &[InlineSpan], size: f32) -> Vec<Word> {
    let mut words = Vec::new();
    let mut current = Word::new();

    for span in spans {
        let bold = span.is_strong();
        for (i, piece) in span.text.split(' ').enumerate() {
            if i > 0 && !current.is_empty() {
                words.push(std::mem::replace(&mut current, Word::new()));
            }
            if !piece.is_empty() {
                current.push(piece, bold, size);
            }
        }
    }
    if !current.is_empty() {
        words.push(current);
    }

    words
}

fn build_line(words: Vec<Word>, size: f32, space: f32) -> WrappedLine {
    let mut chunks: Vec<TextChunk> = Vec::new();
    let mut x = 0.0;

    for (wi, word) in words.iter().enumerate() {
        if wi > 0 {
            // The joining space attaches to the preceding chunk so each
            // chunk stays a single show operation.
            if let Some(last) = chunks.last_mut() {
                last.text.push(' ');
            }
            x += space;
        }
        for (text, bold) in &word.segs {
            let face = if *bold { Face::Bold } else { Face::Regular };
            let width = text_width(text, face, size);
            match chunks.last_mut() {
                Some(last) if last.bold == *bold => last.text.push_str(text),
                _ => chunks.push(TextChunk {
                    text: text.clone(),
                    bold: *bold,
                    x,
                }),
            }
            x += width;
        }
    }

    WrappedLine { chunks, width: x }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::resolve_spans;

    #[test]
    fn test_short_line_stays_single() {
        let spans = resolve_spans("short line");
        let lines = wrap_spans(&spans, 10.0, 500.0);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].chunks.len(), 1);
        assert_eq!(lines[0].chunks[0].text, "short line");
    }

    #[test]
    fn test_wrapping_respects_width() {
        let spans = resolve_spans("one two three four five six seven eight nine ten");
        let lines = wrap_spans(&spans, 12.0, 100.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(line.width <= 100.0 + f32::EPSILON);
        }
    }

    #[test]
    fn test_rejoined_text_preserved() {
        let text = "alpha beta gamma delta epsilon zeta";
        let lines = wrap_spans(&resolve_spans(text), 11.0, 80.0);
        let rejoined = lines
            .iter()
            .map(|l| {
                l.chunks
                    .iter()
                    .map(|c| c.text.as_str())
                    .collect::<String>()
                    .trim_end()
                    .to_string()
            })
            .collect::<Vec<_>>()
            .join(" ");
        assert_eq!(rejoined, text);
    }

    #[test]
    fn test_mixed_emphasis_single_visual_line() {
        let spans = resolve_spans("Great use of **Strength** tones");
        let lines = wrap_spans(&spans, 10.5, 500.0);
        assert_eq!(lines.len(), 1);
        let bolds: Vec<bool> = lines[0].chunks.iter().map(|c| c.bold).collect();
        assert_eq!(bolds, vec![false, true, false]);
        // Chunk offsets increase monotonically.
        let xs: Vec<f32> = lines[0].chunks.iter().map(|c| c.x).collect();
        assert!(xs.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_emphasis_crossing_word_stays_together() {
        // "re**draw**n" is one word with three style segments.
        let spans = resolve_spans("aaaa bbbb re**draw**n");
        let lines = wrap_spans(&spans, 12.0, 60.0);
        for line in &lines {
            let text: String = line.chunks.iter().map(|c| c.text.as_str()).collect();
            // The mixed word never splits across lines.
            assert!(!text.trim_end().ends_with("re"));
        }
    }

    #[test]
    fn test_oversized_word_overflows_alone() {
        let spans = resolve_spans("tiny Pneumonoultramicroscopicsilicovolcanoconiosis tiny");
        let lines = wrap_spans(&spans, 12.0, 50.0);
        assert_eq!(lines.len(), 3);
        assert!(lines[1].width > 50.0);
    }

    #[test]
    fn test_empty_spans_yield_no_lines() {
        assert!(wrap_spans(&[], 10.0, 100.0).is_empty());
    }
}
