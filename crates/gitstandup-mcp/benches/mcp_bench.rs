use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use gitstandup_git::{CommitRecord, CommitStats, RepoResult};
use gitstandup_mcp::handlers::StandupReport;
use gitstandup_mcp::store::{ConfigStore, RepoConfig};
use std::hint::black_box;

/// Build collection results with `repos` repositories of `commits` commits each
fn sample_results(repos: usize, commits: usize) -> Vec<RepoResult> {
    (0..repos)
        .map(|r| {
            let records = (0..commits)
                .map(|i| CommitRecord {
                    hash: format!("{:07x}", r * 1000 + i),
                    message: format!("Commit {i} in repo {r}"),
                    author: "dev@example.com".to_string(),
                    timestamp: "2026-03-01T09:00:00+00:00".to_string(),
                    files: vec![format!("src/file_{i}.rs")],
                    diff: "+line\n".repeat(200),
                    stats: CommitStats {
                        additions: 200,
                        deletions: 0,
                    },
                })
                .collect();
            RepoResult::success(format!("/work/repo_{r}"), records)
        })
        .collect()
}

fn report_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("report");

    for size in [1, 10, 50].iter() {
        let results = sample_results(*size, 20);
        group.bench_with_input(BenchmarkId::new("build_and_render", size), &results, |b, r| {
            b.iter(|| {
                let report = StandupReport::new(black_box(r.clone()), 24.0);
                report.text().expect("render failed")
            })
        });
    }

    group.finish();
}

fn store_benchmarks(c: &mut Criterion) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let store = ConfigStore::new(dir.path().join("config.json"));
    let mut config = RepoConfig::default();
    config.add((0..100).map(|i| format!("/work/repo_{i}")));
    store.save(&config).expect("Failed to save");

    let mut group = c.benchmark_group("store");

    group.bench_function("load_100", |b| b.iter(|| store.load()));

    group.bench_function("add_dedupe_100", |b| {
        b.iter(|| {
            let mut copy = config.clone();
            copy.add((0..100).map(|i| format!("/work/repo_{}", i * 2)))
        })
    });

    group.finish();
}

criterion_group!(benches, report_benchmarks, store_benchmarks);
criterion_main!(benches);
