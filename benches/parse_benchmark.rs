//! Benchmarks for critiq parsing and layout performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks use synthetic feedback text shaped like real critique
//! responses (sections, subsections, bullet lists, inline emphasis).

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use critiq::{parse, render_pages, resolve_spans, ExportOptions};

/// Creates synthetic feedback with the given number of sections.
fn create_feedback(section_count: usize) -> String {
    let mut text = String::new();
    for s in 0..section_count {
        text.push_str(&format!("# Section {s}\n"));
        text.push_str("An intro paragraph with **notable** emphasis and steady phrasing.\n");
        text.push_str("## Observations\n");
        for l in 0..6 {
            text.push_str(&format!(
                "- Observation {l} carries enough words to exercise wrapping and span resolution\n"
            ));
        }
        text.push('\n');
    }
    text
}

fn bench_parse(c: &mut Criterion) {
    let small = create_feedback(5);
    let large = create_feedback(50);

    c.bench_function("parse_5_sections", |b| {
        b.iter(|| parse(black_box(&small)))
    });

    c.bench_function("parse_50_sections", |b| {
        b.iter(|| parse(black_box(&large)))
    });
}

fn bench_resolve_spans(c: &mut Criterion) {
    let line = "Great use of **Strength** tones and **texture** throughout the piece";

    c.bench_function("resolve_spans", |b| {
        b.iter(|| resolve_spans(black_box(line)))
    });
}

fn bench_layout(c: &mut Criterion) {
    let sections = parse(&create_feedback(20));
    let options = ExportOptions::new();

    c.bench_function("render_pages_20_sections", |b| {
        b.iter(|| render_pages(black_box(&sections), black_box(&options)))
    });
}

criterion_group!(benches, bench_parse, bench_resolve_spans, bench_layout);
criterion_main!(benches);
