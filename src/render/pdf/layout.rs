//! Page layout: section sequence to page plans.
//!
//! Layout and serialization are split so the pagination logic stays a pure
//! function from sections and options to [`PagePlan`]s; writing actual PDF
//! bytes happens afterwards in the writer.

use crate::model::Section;
use crate::parser::resolve_spans;
use crate::render::theme::{accent_for, Rgb};

use super::cursor::PageCursor;
use super::wrap::{wrap_spans, WrappedLine};
use super::ExportOptions;

/// One laid-out page: 1-based number plus draw operations in paint order.
#[derive(Debug, Clone)]
pub struct PagePlan {
    /// Page number, 1-based and gapless across a plan sequence.
    pub number: u32,

    /// Draw operations, vertical offsets measured from the page top.
    pub ops: Vec<DrawOp>,
}

/// A single draw operation on a page.
#[derive(Debug, Clone)]
pub enum DrawOp {
    /// Section heading lines with their accent bar.
    SectionHeading {
        lines: Vec<WrappedLine>,
        accent: Rgb,
        offset: f32,
    },

    /// Subsection heading lines.
    SubsectionHeading { lines: Vec<WrappedLine>, offset: f32 },

    /// Highlighted callout: tinted box with body lines inside.
    Callout {
        lines: Vec<WrappedLine>,
        fill: Rgb,
        offset: f32,
        height: f32,
    },

    /// One wrapped body line; list items carry a bullet on their first line.
    TextLine {
        line: WrappedLine,
        offset: f32,
        indent: f32,
        bullet: bool,
    },

    /// Page-number footer, stamped in a separate pass.
    Footer { text: String },
}

/// Classified layout input derived from the section model.
enum LayoutBlock {
    Heading { text: String, accent: Rgb },
    Subheading { text: String },
    Callout { text: String, fill: Rgb },
    Paragraph { text: String, bullet: bool },
}

/// Lay out a section sequence into page plans.
///
/// Deterministic for identical sections and options; page order equals
/// section-traversal order. Footers are stamped before returning.
pub fn render_pages(sections: &[Section], options: &ExportOptions) -> Vec<PagePlan> {
    let blocks = section_layout_blocks(sections, options);
    let mut plans = paginate(&blocks, options);
    stamp_footers(&mut plans);
    log::debug!(
        "laid out {} section(s) onto {} page(s)",
        sections.len(),
        plans.len()
    );
    plans
}

/// Lay out a single placeholder message (no-feedback and failure paths).
pub(super) fn render_placeholder(message: &str, options: &ExportOptions) -> Vec<PagePlan> {
    let blocks = vec![LayoutBlock::Paragraph {
        text: message.to_string(),
        bullet: false,
    }];
    let mut plans = paginate(&blocks, options);
    stamp_footers(&mut plans);
    plans
}

fn section_layout_blocks(sections: &[Section], options: &ExportOptions) -> Vec<LayoutBlock> {
    let mut blocks = Vec::new();

    for (si, section) in sections.iter().enumerate() {
        let (primary, secondary) = accent_for(&section.title);
        blocks.push(LayoutBlock::Heading {
            text: section.title.clone(),
            accent: primary,
        });

        let lead = si == 0 && options.theme.highlight_lead;
        for line in &section.main_content {
            if lead {
                blocks.push(LayoutBlock::Callout {
                    text: line.clone(),
                    fill: secondary,
                });
            } else {
                blocks.push(LayoutBlock::Paragraph {
                    text: line.clone(),
                    bullet: false,
                });
            }
        }

        for sub in &section.subsections {
            blocks.push(LayoutBlock::Subheading {
                text: sub.title.clone(),
            });
            for line in &sub.lines {
                blocks.push(LayoutBlock::Paragraph {
                    text: line.clone(),
                    bullet: true,
                });
            }
        }
    }

    blocks
}

fn paginate(blocks: &[LayoutBlock], options: &ExportOptions) -> Vec<PagePlan> {
    let geometry = &options.geometry;
    let theme = &options.theme;
    let width = geometry.content_width();

    let mut cursor = PageCursor::new(geometry.clone());
    let mut pages: Vec<Vec<DrawOp>> = vec![Vec::new()];

    for block in blocks {
        match block {
            LayoutBlock::Heading { text, accent } => {
                let lines = wrap_spans(&resolve_spans(text), theme.heading_size, width);
                let height = theme
                    .heading_reserve
                    .max(lines.len() as f32 * theme.heading_line());
                cursor.ensure(height);
                sync_pages(&mut pages, cursor.page_index());
                pages[cursor.page_index()].push(DrawOp::SectionHeading {
                    lines,
                    accent: *accent,
                    offset: cursor.offset(),
                });
                cursor.advance(height);
            }

            LayoutBlock::Subheading { text } => {
                let lines = wrap_spans(&resolve_spans(text), theme.subheading_size, width);
                let height = theme
                    .subheading_reserve
                    .max(lines.len() as f32 * theme.subheading_line());
                cursor.ensure(height);
                sync_pages(&mut pages, cursor.page_index());
                pages[cursor.page_index()].push(DrawOp::SubsectionHeading {
                    lines,
                    offset: cursor.offset(),
                });
                cursor.advance(height);
            }

            LayoutBlock::Callout { text, fill } => {
                let inner = width - 2.0 * theme.callout_padding;
                let lines = wrap_spans(&resolve_spans(text), theme.body_size, inner);
                let box_height =
                    2.0 * theme.callout_padding + lines.len() as f32 * theme.body_line();
                let height = theme.callout_reserve.max(box_height);
                cursor.ensure(height);
                sync_pages(&mut pages, cursor.page_index());
                pages[cursor.page_index()].push(DrawOp::Callout {
                    lines,
                    fill: *fill,
                    offset: cursor.offset(),
                    height: box_height,
                });
                cursor.advance(height);
            }

            LayoutBlock::Paragraph { text, bullet } => {
                let indent = if *bullet { theme.bullet_indent } else { 0.0 };
                let lines = wrap_spans(&resolve_spans(text), theme.body_size, width - indent);
                if lines.is_empty() {
                    continue;
                }

                let line_height = theme.body_line();
                cursor.ensure(theme.paragraph_reserve.max(line_height));
                let measured = lines.len() as f32 * line_height;

                // Paragraph text is the one block type allowed to continue
                // across a page boundary, line by line.
                for (li, line) in lines.into_iter().enumerate() {
                    cursor.ensure(line_height);
                    sync_pages(&mut pages, cursor.page_index());
                    pages[cursor.page_index()].push(DrawOp::TextLine {
                        line,
                        offset: cursor.offset(),
                        indent,
                        bullet: *bullet && li == 0,
                    });
                    cursor.advance(line_height);
                }

                if measured < theme.paragraph_reserve {
                    cursor.advance(theme.paragraph_reserve - measured);
                }
            }
        }
        sync_pages(&mut pages, cursor.page_index());
    }

    pages
        .into_iter()
        .enumerate()
        .map(|(i, ops)| PagePlan {
            number: (i + 1) as u32,
            ops,
        })
        .collect()
}

/// Stamp a page-number footer onto every plan that does not carry one yet.
///
/// Idempotent and order-independent across pages: the footer text depends
/// only on the plan's own number.
fn stamp_footers(plans: &mut [PagePlan]) {
    for plan in plans.iter_mut() {
        let already = plan.ops.iter().any(|op| matches!(op, DrawOp::Footer { .. }));
        if !already {
            plan.ops.push(DrawOp::Footer {
                text: format!("Page {}", plan.number),
            });
        }
    }
}

fn sync_pages(pages: &mut Vec<Vec<DrawOp>>, index: usize) {
    while pages.len() <= index {
        pages.push(Vec::new());
    }
}
