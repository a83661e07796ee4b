//! Benchmarks for the highlight pipeline.
//!
//! Run with: cargo bench

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use scriptforge_highlight::{Theme, Vocabulary, classify, escape_markup, highlight};

/// Generates a plausible script of the given length.
fn generate_script(lines: usize) -> String {
    (0..lines)
        .map(|i| {
            format!(
                "level_{i} = Level.Create(doc, {i}.0)  # create level at {i} m -> feet\n\
                 name_{i} = \"Level {i}\"\n"
            )
        })
        .collect()
}

/// Benchmarks the classifier alone.
fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");
    let vocab = Vocabulary::revit_python();

    for size in [100, 1000, 10000].iter() {
        let escaped = escape_markup(&generate_script(*size));

        group.bench_with_input(BenchmarkId::new("lines", size), &escaped, |b, text| {
            b.iter(|| black_box(classify(black_box(text), &vocab)))
        });
    }

    group.finish();
}

/// Benchmarks the full strip, escape, classify, render pipeline.
fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    let vocab = Vocabulary::revit_python();
    let theme = Theme::default();

    for size in [100, 1000, 10000].iter() {
        let script = format!("```python\n{}```", generate_script(*size));

        group.bench_with_input(BenchmarkId::new("lines", size), &script, |b, text| {
            b.iter(|| black_box(highlight(black_box(text), &vocab, &theme)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_classify, bench_pipeline);
criterion_main!(benches);
