use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use gitstandup_git::{MAX_DIFF_LINES_PER_COMMIT, is_relevant, truncate_diff};
use std::hint::black_box;

/// Build a patch-shaped string with the given number of lines
fn sample_patch(lines: usize) -> String {
    let mut patch = String::from("diff --git a/src/lib.rs b/src/lib.rs\n@@ -1,1 +1,1 @@\n");
    for i in 0..lines {
        patch.push_str(&format!("+    let value_{i} = compute({i});\n"));
    }
    patch
}

fn truncate_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("truncate");

    for size in [500, 5_000, 50_000].iter() {
        let patch = sample_patch(*size);
        group.bench_with_input(BenchmarkId::new("truncate_diff", size), &patch, |b, patch| {
            b.iter(|| truncate_diff(black_box(patch), MAX_DIFF_LINES_PER_COMMIT))
        });
    }

    group.finish();
}

fn filter_benchmarks(c: &mut Criterion) {
    let paths: Vec<String> = (0..1_000)
        .map(|i| match i % 4 {
            0 => format!("src/module_{i}.rs"),
            1 => format!("web/bundle_{i}.min.js"),
            2 => "package-lock.json".to_string(),
            _ => format!("crates/c{i}/Cargo.lock"),
        })
        .collect();

    let mut group = c.benchmark_group("filter");
    group.bench_function("is_relevant_1000", |b| {
        b.iter(|| paths.iter().filter(|p| is_relevant(black_box(p))).count())
    });
    group.finish();
}

criterion_group!(benches, truncate_benchmarks, filter_benchmarks);
criterion_main!(benches);
