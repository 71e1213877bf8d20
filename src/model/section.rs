//! Section-level types.

use serde::{Deserialize, Serialize};

/// One top-level heading block of a parsed critique.
///
/// A section owns the free lines that appear directly under its heading
/// (before any subsection) plus an ordered list of named subsections.
/// Sections are immutable after the parse pass that built them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Heading text. Unique only by position, never enforced unique.
    pub title: String,

    /// Free lines directly under the heading, before any subsection.
    pub main_content: Vec<String>,

    /// Named subsections in insertion order.
    pub subsections: Vec<Subsection>,
}

impl Section {
    /// Create a new section with the given title and no content.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            main_content: Vec::new(),
            subsections: Vec::new(),
        }
    }

    /// Append a free content line.
    pub fn push_content(&mut self, line: impl Into<String>) {
        self.main_content.push(line.into());
    }

    /// Open a subsection with the given title.
    ///
    /// A colliding title keeps its original position but drops the earlier
    /// entry's lines (last write wins, no merge).
    pub fn open_subsection(&mut self, title: impl Into<String>) {
        let title = title.into();
        if let Some(existing) = self.subsections.iter_mut().find(|s| s.title == title) {
            existing.lines.clear();
        } else {
            self.subsections.push(Subsection::new(title));
        }
    }

    /// Append a line to the named subsection, if present.
    pub fn push_subsection_line(&mut self, title: &str, line: impl Into<String>) {
        if let Some(sub) = self.subsections.iter_mut().find(|s| s.title == title) {
            sub.lines.push(line.into());
        }
    }

    /// Look up a subsection's lines by title.
    pub fn subsection(&self, title: &str) -> Option<&[String]> {
        self.subsections
            .iter()
            .find(|s| s.title == title)
            .map(|s| s.lines.as_slice())
    }

    /// Check whether the section carries any content beyond its title.
    pub fn is_title_only(&self) -> bool {
        self.main_content.is_empty() && self.subsections.is_empty()
    }

    /// Total number of content lines, including subsection lines.
    pub fn line_count(&self) -> usize {
        self.main_content.len() + self.subsections.iter().map(|s| s.lines.len()).sum::<usize>()
    }
}

/// A named, ordered list of content lines nested under a [`Section`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subsection {
    /// Subsection title.
    pub title: String,

    /// Content lines in document order.
    pub lines: Vec<String>,
}

impl Subsection {
    /// Create a new empty subsection.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            lines: Vec::new(),
        }
    }
}
