//! Inline span types.

use serde::{Deserialize, Serialize};

/// Emphasis state of an inline run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emphasis {
    /// Regular text.
    #[default]
    Plain,
    /// Strong (bold) text from a matched delimiter pair.
    Strong,
}

/// A contiguous run of text with one emphasis state.
///
/// Spans are produced by the emphasis resolver; concatenating the `text`
/// fields of a line's spans in order reproduces the line with the delimiter
/// markers removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineSpan {
    /// The run's text, delimiters stripped.
    pub text: String,

    /// Emphasis state.
    pub emphasis: Emphasis,
}

impl InlineSpan {
    /// Create a plain span.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            emphasis: Emphasis::Plain,
        }
    }

    /// Create a strong span.
    pub fn strong(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            emphasis: Emphasis::Strong,
        }
    }

    /// Check whether the span is emphasized.
    pub fn is_strong(&self) -> bool {
        self.emphasis == Emphasis::Strong
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_constructors() {
        let plain = InlineSpan::plain("tones here");
        assert!(!plain.is_strong());

        let strong = InlineSpan::strong("Strength");
        assert!(strong.is_strong());
        assert_eq!(strong.text, "Strength");
    }
}
