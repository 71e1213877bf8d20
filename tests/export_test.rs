//! Integration tests for the paginated export.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use critiq::render::pdf::{export_sections, DrawOp};
use critiq::{export_pdf, parse, render_pages, ExportLock, ExportOptions, Feedback, PageGeometry};

fn synthetic_feedback(sections: usize, lines_per_section: usize) -> String {
    let mut text = String::new();
    for s in 0..sections {
        text.push_str(&format!("# Section number {s}\n"));
        text.push_str("Intro line for the section with a **highlighted** word.\n");
        text.push_str("## Details\n");
        for l in 0..lines_per_section {
            text.push_str(&format!(
                "- Point {l} long enough that the layout engine has to wrap it across the column\n"
            ));
        }
    }
    text
}

#[test]
fn test_page_numbers_are_gapless_and_one_based() {
    let sections = parse(&synthetic_feedback(10, 12));
    let plans = render_pages(&sections, &ExportOptions::new());
    assert!(plans.len() > 1);

    for (i, plan) in plans.iter().enumerate() {
        assert_eq!(plan.number, (i + 1) as u32);
    }
}

#[test]
fn test_every_page_carries_matching_footer() {
    let sections = parse(&synthetic_feedback(8, 10));
    let plans = render_pages(&sections, &ExportOptions::new());

    for plan in &plans {
        let footers: Vec<&str> = plan
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Footer { text } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(footers, vec![format!("Page {}", plan.number).as_str()]);
    }
}

#[test]
fn test_page_count_never_decreases_with_longer_input() {
    let options = ExportOptions::new();
    let mut previous = 0;
    for lines in [0, 2, 6, 12, 24, 48] {
        let sections = parse(&synthetic_feedback(3, lines));
        let pages = render_pages(&sections, &options).len();
        assert!(
            pages >= previous,
            "page count dropped from {previous} to {pages} at {lines} lines"
        );
        previous = pages;
    }
}

#[test]
fn test_layout_is_deterministic_for_fixed_options() {
    let sections = parse(&synthetic_feedback(5, 9));
    let options = ExportOptions::new();

    let first = render_pages(&sections, &options);
    let second = render_pages(&sections, &options);
    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.number, b.number);
        assert_eq!(a.ops.len(), b.ops.len());
    }
}

#[test]
fn test_export_bytes_look_like_pdf() {
    let feedback = Feedback::success(&synthetic_feedback(2, 4));
    let at = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();
    let bytes = export_pdf(&feedback, &ExportOptions::new().with_generated_at(at)).unwrap();

    assert!(bytes.starts_with(b"%PDF-"));
    let tail = String::from_utf8_lossy(&bytes[bytes.len().saturating_sub(64)..]).to_string();
    assert!(tail.contains("%%EOF"));
}

#[test]
fn test_pinned_timestamp_gives_reproducible_bytes() {
    let feedback = Feedback::success(&synthetic_feedback(3, 5));
    let at = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();
    let options = ExportOptions::new().with_generated_at(at);

    assert_eq!(
        export_pdf(&feedback, &options).unwrap(),
        export_pdf(&feedback, &options).unwrap()
    );
}

#[test]
fn test_failure_feedback_exports_placeholder_document() {
    let bytes = export_pdf(&Feedback::failure("rate limited"), &ExportOptions::new()).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
}

#[test]
fn test_empty_sections_export_one_page() {
    let plans = render_pages(&[], &ExportOptions::new());
    // renderPages on nothing still finalizes the open page.
    assert_eq!(plans.len(), 1);

    let bytes = export_sections(&[], &ExportOptions::new()).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
}

#[test]
fn test_undecodable_artwork_degrades_gracefully() {
    let options = ExportOptions::new().with_artwork(b"not an image".to_vec());
    let bytes = export_pdf(&Feedback::success("# A\nline"), &options).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
}

#[test]
fn test_letter_geometry_also_paginates() {
    let sections = parse(&synthetic_feedback(6, 10));
    let options = ExportOptions::new().with_geometry(PageGeometry::letter());
    let plans = render_pages(&sections, &options);
    assert!(!plans.is_empty());
    for plan in &plans {
        assert!(plan
            .ops
            .iter()
            .any(|op| matches!(op, DrawOp::Footer { .. })));
    }
}

#[test]
fn test_rapid_double_trigger_runs_exactly_one_export() {
    let lock = Arc::new(ExportLock::new());

    // Simulate two rapid triggers: the first acquires, the second must
    // observe the in-flight guard and no-op.
    let first = lock.try_begin();
    assert!(first.is_some());

    let contender = Arc::clone(&lock);
    let second = std::thread::spawn(move || contender.try_begin().is_some())
        .join()
        .unwrap();
    assert!(!second);

    // Releasing the guard re-admits exports on every exit path.
    drop(first);
    assert!(lock.try_begin().is_some());
}

#[test]
fn test_exported_file_round_trips_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("critique.pdf");

    let bytes = export_pdf(
        &Feedback::success("# Art Style\nRealism."),
        &ExportOptions::new(),
    )
    .unwrap();
    std::fs::write(&path, &bytes).unwrap();

    let read_back = std::fs::read(&path).unwrap();
    assert_eq!(read_back, bytes);
}
