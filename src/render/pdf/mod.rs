//! Paginated PDF export.
//!
//! The export runs in two layers: [`render_pages`] walks the section model
//! with one [`PageCursor`] and produces deterministic [`PagePlan`]s, and the
//! writer serializes those plans into PDF bytes. Only the embedded
//! generation timestamp differs between runs on identical input.

mod cursor;
mod fonts;
mod geometry;
mod layout;
mod wrap;
mod writer;

pub use cursor::PageCursor;
pub use geometry::PageGeometry;
pub use layout::{render_pages, DrawOp, PagePlan};
pub use wrap::{TextChunk, WrappedLine};

use chrono::{DateTime, Utc};

use crate::artwork::Artwork;
use crate::error::Result;
use crate::model::{Feedback, Section};
use crate::parser::parse;
use crate::render::screen::NO_FEEDBACK_MESSAGE;
use crate::render::Theme;

/// Configuration for one export operation.
///
/// Per-revision cosmetic differences live in [`Theme`]; everything here is
/// data, so there is exactly one export implementation.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Page geometry (A4 by default).
    pub geometry: PageGeometry,

    /// Typography, spacing, and accent configuration.
    pub theme: Theme,

    /// Document title shown in the first page's title block.
    pub title: String,

    /// Generation timestamp. `None` captures the time at render start;
    /// tests inject a fixed value to keep output fully deterministic.
    pub generated_at: Option<DateTime<Utc>>,

    /// Raw uploaded artwork bytes to embed on the first page.
    pub artwork: Option<Vec<u8>>,
}

impl ExportOptions {
    /// Create export options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page geometry.
    pub fn with_geometry(mut self, geometry: PageGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    /// Set the theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Pin the generation timestamp.
    pub fn with_generated_at(mut self, at: DateTime<Utc>) -> Self {
        self.generated_at = Some(at);
        self
    }

    /// Attach artwork bytes for embedding.
    pub fn with_artwork(mut self, bytes: Vec<u8>) -> Self {
        self.artwork = Some(bytes);
        self
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            geometry: PageGeometry::a4(),
            theme: Theme::default(),
            title: "Artwork Critique".to_string(),
            generated_at: None,
            artwork: None,
        }
    }
}

/// Export a feedback outcome as a paginated PDF.
///
/// Mirrors the screen renderer's degradation policy: a failure outcome or
/// unparseable text produces a one-page document carrying the placeholder
/// message rather than an error. Artwork that fails to decode is dropped
/// with a warning and the export proceeds without it.
pub fn export_pdf(feedback: &Feedback, options: &ExportOptions) -> Result<Vec<u8>> {
    match feedback {
        Feedback::Failure(message) => {
            let plans = layout::render_placeholder(message, options);
            write_with_artwork(&plans, options)
        }
        Feedback::Success(text) => export_sections(&parse(text), options),
    }
}

/// Export an already-parsed section sequence as a paginated PDF.
///
/// An empty sequence produces the one-page placeholder document.
pub fn export_sections(sections: &[Section], options: &ExportOptions) -> Result<Vec<u8>> {
    let plans = if sections.is_empty() {
        layout::render_placeholder(NO_FEEDBACK_MESSAGE, options)
    } else {
        render_pages(sections, options)
    };
    write_with_artwork(&plans, options)
}

fn write_with_artwork(plans: &[PagePlan], options: &ExportOptions) -> Result<Vec<u8>> {
    let artwork = options.artwork.as_deref().and_then(|bytes| {
        match Artwork::decode(bytes) {
            Ok(artwork) => Some(artwork),
            Err(err) => {
                log::warn!("artwork could not be decoded, exporting without it: {err}");
                None
            }
        }
    });

    writer::write_pdf(plans, options, artwork.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_options_builder() {
        let options = ExportOptions::new()
            .with_title("Study Review")
            .with_geometry(PageGeometry::letter());
        assert_eq!(options.title, "Study Review");
        assert_eq!(options.geometry.width, 612.0);
    }

    #[test]
    fn test_export_failure_produces_pdf() {
        let bytes = export_pdf(&Feedback::failure("rate limited"), &ExportOptions::new()).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_export_with_bad_artwork_degrades() {
        let options = ExportOptions::new().with_artwork(b"definitely not an image".to_vec());
        let bytes = export_pdf(&Feedback::success("# A\nline"), &options).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }
}
