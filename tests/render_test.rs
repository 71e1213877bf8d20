//! Integration tests for the screen renderer.

use critiq::{
    parse, render_blocks, to_json, BlockKind, Feedback, JsonFormat, NO_FEEDBACK_MESSAGE,
};

#[test]
fn test_empty_feedback_shows_fixed_placeholder() {
    let blocks = render_blocks(&Feedback::success(""));
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].kind, BlockKind::Placeholder);
    assert_eq!(blocks[0].plain_text(), NO_FEEDBACK_MESSAGE);
}

#[test]
fn test_failure_message_rendered_verbatim() {
    let blocks = render_blocks(&Feedback::failure("rate limited"));
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].kind, BlockKind::Placeholder);
    assert_eq!(blocks[0].plain_text(), "rate limited");
}

#[test]
fn test_failure_and_empty_share_placeholder_slot() {
    // Visually indistinguishable cases, distinguishable only by text.
    let failed = render_blocks(&Feedback::failure("Server error occurred."));
    let empty = render_blocks(&Feedback::success("  \n "));
    assert_eq!(failed[0].kind, empty[0].kind);
    assert_ne!(failed[0].plain_text(), empty[0].plain_text());
}

#[test]
fn test_blocks_follow_document_order() {
    let text = "# Art Style\nRealism.\n## Composition\n- Balance\n# Next Steps\nPractice daily.";
    let blocks = render_blocks(&Feedback::success(text));

    let kinds: Vec<BlockKind> = blocks.iter().map(|b| b.kind).collect();
    assert_eq!(
        kinds,
        vec![
            BlockKind::SectionHeader,
            BlockKind::Paragraph,
            BlockKind::SubsectionHeader,
            BlockKind::ListItem,
            BlockKind::SectionHeader,
            BlockKind::Paragraph,
        ]
    );
}

#[test]
fn test_keys_are_stable_across_renders() {
    let feedback = Feedback::success("# A\nx\n## B\n- y");
    let first: Vec<String> = render_blocks(&feedback).into_iter().map(|b| b.key).collect();
    let second: Vec<String> = render_blocks(&feedback).into_iter().map(|b| b.key).collect();
    assert_eq!(first, second);
    assert_eq!(first, vec!["s0", "s0-p0", "s0-sub0", "s0-sub0-li0"]);
}

#[test]
fn test_emphasis_spans_match_parser_resolution() {
    let blocks = render_blocks(&Feedback::success("# A\nA **bold** claim"));
    let spans = &blocks[1].spans;
    assert_eq!(spans.len(), 3);
    assert!(!spans[0].is_strong());
    assert!(spans[1].is_strong());
    assert_eq!(spans[1].text, "bold");
}

#[test]
fn test_screen_and_export_classify_identically() {
    // Same section boundaries feed both surfaces.
    let text = "# Art Style\nRealism.\n## Composition\n- Balance\n- Horizon";
    let sections = parse(text);
    let blocks = render_blocks(&Feedback::success(text));

    let headings = blocks
        .iter()
        .filter(|b| b.kind == BlockKind::SectionHeader)
        .count();
    assert_eq!(headings, sections.len());

    let list_items = blocks
        .iter()
        .filter(|b| b.kind == BlockKind::ListItem)
        .count();
    let section_lines: usize = sections
        .iter()
        .flat_map(|s| s.subsections.iter())
        .map(|sub| sub.lines.len())
        .sum();
    assert_eq!(list_items, section_lines);
}

#[test]
fn test_json_output_is_parseable() {
    let blocks = render_blocks(&Feedback::success("# Art Style\n**Bold** start"));
    let json = to_json(&blocks, JsonFormat::Compact).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert!(value.is_array());
    assert_eq!(value[0]["kind"], "section_header");
    assert_eq!(value[0]["key"], "s0");
}
