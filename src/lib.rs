//! # critiq
//!
//! Artwork critique feedback parsing, screen rendering, and paginated PDF
//! export.
//!
//! This library takes the semi-structured text a multimodal critique
//! service returns, parses it into an ordered section model, and renders
//! that model two ways: keyed display blocks for immediate on-screen
//! presentation, and a paginated A4 document with an embedded artwork
//! image and page-numbered footers.
//!
//! ## Quick Start
//!
//! ```no_run
//! use critiq::{export_pdf, render_blocks, ExportOptions, Feedback};
//!
//! fn main() -> critiq::Result<()> {
//!     let feedback = Feedback::success(
//!         "# Art Style\nRealism with strong shading.\n## Composition\n- Good balance",
//!     );
//!
//!     // Display blocks for screen mounting
//!     let blocks = render_blocks(&feedback);
//!     println!("{} blocks", blocks.len());
//!
//!     // Paginated PDF export
//!     let pdf = export_pdf(&feedback, &ExportOptions::new())?;
//!     std::fs::write("critique.pdf", pdf)?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **One parse, two surfaces**: screen blocks and exported pages share the
//!   same section boundaries and emphasis spans
//! - **Never fails on text**: malformed feedback degrades to a placeholder
//! - **Deterministic export**: identical input and options yield identical
//!   pages; only the generation timestamp varies between runs
//! - **Optional fetch collaborator** (`fetch` feature): validated, retried,
//!   always-resolving critique requests

pub mod app;
pub mod artwork;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;

#[cfg(feature = "fetch")]
pub mod fetch;

// Re-export commonly used types
pub use app::{AppState, Event, ExportLock, View};
pub use artwork::Artwork;
pub use error::{Error, Result};
pub use model::{BlockKind, Emphasis, Feedback, InlineSpan, RenderBlock, Section, Subsection};
pub use parser::{parse, resolve_spans, FeedbackParser, ParseOptions};
pub use render::{
    export_pdf, render_blocks, render_pages, to_json, ExportOptions, JsonFormat, PageGeometry,
    PagePlan, Theme, NO_FEEDBACK_MESSAGE,
};

/// Builder for parsing and rendering critique feedback.
///
/// # Example
///
/// ```no_run
/// use critiq::{Critiq, PageGeometry};
///
/// let pdf = Critiq::new()
///     .with_title("Portfolio Review")
///     .with_geometry(PageGeometry::letter())
///     .feedback("# Art Style\nWatercolor study.")
///     .to_pdf()?;
/// # Ok::<(), critiq::Error>(())
/// ```
pub struct Critiq {
    parse_options: ParseOptions,
    export_options: ExportOptions,
}

impl Critiq {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            parse_options: ParseOptions::default(),
            export_options: ExportOptions::default(),
        }
    }

    /// Set the list marker stripped from content lines.
    pub fn with_list_marker(mut self, marker: &'static str) -> Self {
        self.parse_options = self.parse_options.with_list_marker(marker);
        self
    }

    /// Set the exported document's title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.export_options = self.export_options.with_title(title);
        self
    }

    /// Set the export page geometry.
    pub fn with_geometry(mut self, geometry: PageGeometry) -> Self {
        self.export_options = self.export_options.with_geometry(geometry);
        self
    }

    /// Set the export theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.export_options = self.export_options.with_theme(theme);
        self
    }

    /// Attach artwork bytes for embedding in the export.
    pub fn with_artwork(mut self, bytes: Vec<u8>) -> Self {
        self.export_options = self.export_options.with_artwork(bytes);
        self
    }

    /// Wrap successful feedback text and finish the builder.
    pub fn feedback(self, text: impl Into<String>) -> CritiqResult {
        self.outcome(Feedback::success(text))
    }

    /// Finish the builder with an already-tagged outcome.
    pub fn outcome(self, feedback: Feedback) -> CritiqResult {
        let sections = match &feedback {
            Feedback::Success(text) => FeedbackParser::new(self.parse_options).parse(text),
            Feedback::Failure(_) => Vec::new(),
        };
        CritiqResult {
            feedback,
            sections,
            export_options: self.export_options,
        }
    }
}

impl Default for Critiq {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of preparing feedback for rendering.
pub struct CritiqResult {
    feedback: Feedback,
    sections: Vec<Section>,
    export_options: ExportOptions,
}

impl CritiqResult {
    /// The parsed section sequence (empty for failures).
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Render display blocks for screen mounting.
    pub fn to_blocks(&self) -> Vec<RenderBlock> {
        if self.feedback.is_success() && !self.sections.is_empty() {
            render::section_blocks(&self.sections)
        } else {
            render_blocks(&self.feedback)
        }
    }

    /// Render display blocks as JSON.
    pub fn to_block_json(&self, format: JsonFormat) -> Result<String> {
        to_json(&self.to_blocks(), format)
    }

    /// Export a paginated PDF.
    pub fn to_pdf(&self) -> Result<Vec<u8>> {
        match &self.feedback {
            Feedback::Success(_) => render::pdf::export_sections(&self.sections, &self.export_options),
            Feedback::Failure(_) => export_pdf(&self.feedback, &self.export_options),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_parses_sections() {
        let result = Critiq::new().feedback("# Art Style\nRealism.");
        assert_eq!(result.sections().len(), 1);
        assert_eq!(result.sections()[0].title, "Art Style");
    }

    #[test]
    fn test_builder_failure_has_no_sections() {
        let result = Critiq::new().outcome(Feedback::failure("rate limited"));
        assert!(result.sections().is_empty());
        let blocks = result.to_blocks();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].plain_text(), "rate limited");
    }

    #[test]
    fn test_builder_custom_marker_flows_through() {
        let result = Critiq::new()
            .with_list_marker("\u{2022} ")
            .feedback("# A\n\u{2022} stripped");
        assert_eq!(result.sections()[0].main_content, vec!["stripped"]);
    }

    #[test]
    fn test_builder_pdf_roundtrip() {
        let pdf = Critiq::new()
            .with_title("Study Review")
            .feedback("# A\nline")
            .to_pdf()
            .unwrap();
        assert!(pdf.starts_with(b"%PDF-"));
    }
}
