//! Line-oriented feedback parser.
//!
//! Critique text arrives as untrusted free text with a light structure:
//! `# ` opens a section, `## ` opens a subsection, a list marker prefixes
//! bullet lines, and everything else is literal paragraph text. The parser
//! makes a single left-to-right pass with no backtracking and never fails;
//! text that fits no rule simply contributes nothing.

use unicode_normalization::UnicodeNormalization;

use crate::model::Section;

use super::ParseOptions;

/// Prefix that opens a top-level section.
pub const SECTION_MARKER: &str = "# ";

/// Prefix that opens a subsection.
pub const SUBSECTION_MARKER: &str = "## ";

/// Parse feedback text with default options.
pub fn parse(raw: &str) -> Vec<Section> {
    FeedbackParser::new(ParseOptions::default()).parse(raw)
}

/// Feedback text parser.
pub struct FeedbackParser {
    options: ParseOptions,
}

impl FeedbackParser {
    /// Create a parser with the given options.
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Parse feedback text into an ordered section sequence.
    ///
    /// Empty or whitespace-only input yields an empty sequence; that is a
    /// valid "no content" result, not an error. Lines seen before the first
    /// section heading are dropped silently.
    pub fn parse(&self, raw: &str) -> Vec<Section> {
        let text: String = if self.options.normalize_unicode {
            raw.nfc().collect()
        } else {
            raw.to_string()
        };

        let mut sections: Vec<Section> = Vec::new();
        let mut current: Option<Section> = None;
        let mut open_subsection: Option<String> = None;

        for line in text.lines() {
            let trimmed = line.trim();

            if let Some(title) = trimmed.strip_prefix(SECTION_MARKER) {
                if let Some(done) = current.take() {
                    sections.push(done);
                }
                current = Some(Section::new(title));
                open_subsection = None;
            } else if let Some(title) = trimmed.strip_prefix(SUBSECTION_MARKER) {
                if let Some(section) = current.as_mut() {
                    section.open_subsection(title);
                    open_subsection = Some(title.to_string());
                }
            } else if !trimmed.is_empty() {
                let Some(section) = current.as_mut() else {
                    continue;
                };
                let content = trimmed
                    .strip_prefix(self.options.list_marker)
                    .unwrap_or(trimmed);
                match &open_subsection {
                    Some(title) => section.push_subsection_line(title, content),
                    None => section.push_content(content),
                }
            }
        }

        if let Some(done) = current {
            sections.push(done);
        }

        log::debug!(
            "parsed {} section(s), {} line(s) total",
            sections.len(),
            sections.iter().map(Section::line_count).sum::<usize>()
        );

        sections
    }
}
