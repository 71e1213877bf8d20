//! Screen rendering: sections to keyed display blocks.

use crate::model::{BlockKind, Feedback, InlineSpan, RenderBlock, Section};
use crate::parser::{parse, resolve_spans};

use super::theme::accent_for;

/// Fixed placeholder shown when no renderable feedback exists.
pub const NO_FEEDBACK_MESSAGE: &str = "No feedback available. Please try again.";

/// Render a feedback outcome into display blocks.
///
/// A failure outcome surfaces its message verbatim in the placeholder slot;
/// a success whose text parses to no sections gets the fixed
/// [`NO_FEEDBACK_MESSAGE`]. This never fails: malformed text degrades to the
/// placeholder rather than erroring.
pub fn render_blocks(feedback: &Feedback) -> Vec<RenderBlock> {
    match feedback {
        Feedback::Failure(message) => vec![placeholder(message)],
        Feedback::Success(text) => {
            let sections = parse(text);
            if sections.is_empty() {
                log::debug!("feedback text produced no sections, rendering placeholder");
                return vec![placeholder(NO_FEEDBACK_MESSAGE)];
            }
            section_blocks(&sections)
        }
    }
}

/// Render an already-parsed section sequence into display blocks.
///
/// Block keys are derived from position only, so re-rendering the same
/// sections always yields the same keys.
pub fn section_blocks(sections: &[Section]) -> Vec<RenderBlock> {
    let mut blocks = Vec::new();

    for (si, section) in sections.iter().enumerate() {
        let (primary, _) = accent_for(&section.title);
        blocks.push(
            RenderBlock::new(
                format!("s{si}"),
                BlockKind::SectionHeader,
                resolve_spans(&section.title),
            )
            .with_accent(primary.to_hex()),
        );

        for (pi, line) in section.main_content.iter().enumerate() {
            blocks.push(RenderBlock::new(
                format!("s{si}-p{pi}"),
                BlockKind::Paragraph,
                resolve_spans(line),
            ));
        }

        for (ki, sub) in section.subsections.iter().enumerate() {
            blocks.push(RenderBlock::new(
                format!("s{si}-sub{ki}"),
                BlockKind::SubsectionHeader,
                resolve_spans(&sub.title),
            ));
            for (li, line) in sub.lines.iter().enumerate() {
                blocks.push(RenderBlock::new(
                    format!("s{si}-sub{ki}-li{li}"),
                    BlockKind::ListItem,
                    resolve_spans(line),
                ));
            }
        }
    }

    blocks
}

fn placeholder(message: &str) -> RenderBlock {
    RenderBlock::new(
        "placeholder",
        BlockKind::Placeholder,
        vec![InlineSpan::plain(message)],
    )
}
