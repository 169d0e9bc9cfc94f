//! Search benchmarks over a synthetic in-memory corpus.
//!
//! Run with: `cargo bench`

use criterion::{Criterion, criterion_group, criterion_main};
use logsift::{EntryDraft, Level, LogEngine, QueryRequest};

const CORPUS_SIZE: usize = 10_000;

fn seeded_engine() -> LogEngine {
    let engine = LogEngine::new();
    let components = [
        "DatabaseManager",
        "AuthenticationManager",
        "SecurityMonitoringManager",
        "PerformanceTracker",
        "Scheduler",
    ];
    let levels = [
        Level::Debug,
        Level::Info,
        Level::Warning,
        Level::Error,
        Level::Critical,
    ];

    for i in 0..CORPUS_SIZE {
        let component = components[i % components.len()];
        let level = levels[i % levels.len()];
        let message = if i % 7 == 0 {
            format!("cpu usage sample {i} above threshold")
        } else {
            format!("request {i} completed")
        };
        engine
            .ingest(EntryDraft::new(level, component, message))
            .unwrap();
    }
    engine
}

fn bench_search(c: &mut Criterion) {
    let engine = seeded_engine();

    let mut group = c.benchmark_group("search");

    group.bench_function("literal_10k", |b| {
        let request = QueryRequest::literal("cpu usage");
        b.iter(|| engine.search(&request).unwrap())
    });

    group.bench_function("pattern_10k_cached", |b| {
        let request = QueryRequest::pattern(r"cpu usage sample \d+");
        b.iter(|| engine.search(&request).unwrap())
    });

    group.bench_function("filtered_limited_10k", |b| {
        let request = QueryRequest {
            text: "request".to_string(),
            level: Some(Level::Error),
            limit: 50,
            ..QueryRequest::default()
        };
        b.iter(|| engine.search(&request).unwrap())
    });

    group.bench_function("stats_10k", |b| b.iter(|| engine.stats()));

    group.finish();
}

criterion_group!(benches, bench_search);
criterion_main!(benches);
