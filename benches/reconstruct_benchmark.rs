//! Benchmarks for reconstruction performance.
//!
//! Run with: cargo bench
//!
//! Documents are synthetic: every page carries body lines, a few stranded
//! reference digits and a footer with numbered notes.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use pdfexcerpt::parser::process_pages;
use pdfexcerpt::render::render_document;
use pdfexcerpt::{MemorySource, PageRuns, ReconstructOptions, TextRun};

/// Build `page_count` pages of runs with footnotes on every page.
fn synthetic_pages(page_count: u32) -> Vec<PageRuns> {
    (1..=page_count)
        .map(|number| {
            let mut page = PageRuns::letter(number);
            page.push(TextRun::new(format!("Chapter {}", number), 760.0, 80.0));
            for line in 0..30u32 {
                let y = 720.0 - line as f32 * 14.0;
                let note = number * 3 + line % 3;
                page.push(TextRun::new(
                    format!("Body line {} of page {} cites note {}.", line, number, note),
                    y,
                    220.0,
                ));
                if line % 10 == 0 {
                    page.push(TextRun::new(format!("{}", line % 9 + 1), y, 4.0));
                }
            }
            for i in 0..3u32 {
                page.push(TextRun::new(
                    format!("{}. Source for note {}. See also the archive.", number * 3 + i, i),
                    180.0 - i as f32 * 30.0,
                    260.0,
                ));
            }
            page
        })
        .collect()
}

/// Benchmark the page fold and footnote passes.
fn bench_reconstruction(c: &mut Criterion) {
    let mut group = c.benchmark_group("reconstruction");
    let options = ReconstructOptions::default();

    for page_count in [1, 10, 50].iter() {
        let pages = synthetic_pages(*page_count);

        group.bench_function(format!("{}_pages", page_count), |b| {
            b.iter(|| process_pages(black_box(pages.clone()), &options));
        });
    }

    group.finish();
}

/// Benchmark rendering with reference linking.
fn bench_rendering(c: &mut Criterion) {
    let doc = process_pages(synthetic_pages(20), &ReconstructOptions::default());

    c.bench_function("render_20_pages", |b| {
        b.iter(|| render_document(black_box(&doc)));
    });
}

/// Benchmark parsing runs JSON.
fn bench_runs_json(c: &mut Criterion) {
    let json = MemorySource::from_pages(synthetic_pages(10))
        .to_json()
        .unwrap_or_default();

    c.bench_function("runs_json_10_pages", |b| {
        b.iter(|| MemorySource::from_json(black_box(&json)).is_ok());
    });
}

criterion_group!(
    benches,
    bench_reconstruction,
    bench_rendering,
    bench_runs_json,
);
criterion_main!(benches);
