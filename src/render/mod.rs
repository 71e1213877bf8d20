//! Rendering module: screen blocks and paginated PDF export.

mod json;
pub mod pdf;
mod screen;
mod theme;

pub use json::{to_json, JsonFormat};
pub use pdf::{export_pdf, render_pages, DrawOp, ExportOptions, PageGeometry, PagePlan};
pub use screen::{render_blocks, section_blocks, NO_FEEDBACK_MESSAGE};
pub use theme::{Rgb, Theme};
