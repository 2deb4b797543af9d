//! Benchmarks for the filter pipeline and writers.
//!
//! Run with: `cargo bench`
//! Run specific group: `cargo bench --bench filtering -- pattern`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use slackdump::Message;
use slackdump::core::output::{to_csv, to_json};
use slackdump::core::{
    AuthorFilter, MessageFilter, PatternFilter, TimeRangeFilter, apply_filters, parse_datetime,
};

const SIZES: [usize; 4] = [100, 1_000, 10_000, 100_000];

// =============================================================================
// Test Data Generators
// =============================================================================

fn generate_messages(count: usize) -> Vec<Message> {
    let users = ["U01", "U02", "U03", "U04"];
    (0..count)
        .map(|i| {
            let text = if i % 5 == 0 {
                format!("deploy #{} finished with status ok", i)
            } else {
                format!("Message number {}", i)
            };
            // One message per minute, going back from mid-January 2024.
            let ts = 1_705_320_000.0 - (i as f64 * 60.0);
            Message::new(users[i % users.len()], text, ts, "C042")
        })
        .collect()
}

fn run(c: &mut Criterion, name: &str, make_filters: impl Fn() -> Vec<Box<dyn MessageFilter>>) {
    let mut group = c.benchmark_group(name);

    for size in SIZES {
        let messages = generate_messages(size);
        let filters = make_filters();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &messages, |b, messages| {
            b.iter(|| {
                let filtered = apply_filters(black_box(messages.clone()), &filters);
                black_box(filtered)
            });
        });
    }
    group.finish();
}

// =============================================================================
// Filter Benchmarks
// =============================================================================

fn bench_filter_by_author(c: &mut Criterion) {
    run(c, "filter_by_author", || {
        let filters: Vec<Box<dyn MessageFilter>> =
            vec![Box::new(AuthorFilter::new(["U01", "U03"]).unwrap())];
        filters
    });
}

fn bench_filter_by_pattern(c: &mut Criterion) {
    run(c, "filter_by_pattern", || {
        let filters: Vec<Box<dyn MessageFilter>> =
            vec![Box::new(PatternFilter::new(r"deploy #\d+", false).unwrap())];
        filters
    });
}

fn bench_filter_by_time(c: &mut Criterion) {
    run(c, "filter_by_time", || {
        let start = parse_datetime("2024-01-01").unwrap();
        let end = parse_datetime("2024-01-14 23:59:59").unwrap();
        let filters: Vec<Box<dyn MessageFilter>> =
            vec![Box::new(TimeRangeFilter::new(Some(start), Some(end)).unwrap())];
        filters
    });
}

fn bench_filter_combined(c: &mut Criterion) {
    run(c, "filter_combined", || {
        let start = parse_datetime("2024-01-01").unwrap();
        let filters: Vec<Box<dyn MessageFilter>> = vec![
            Box::new(TimeRangeFilter::new(Some(start), None).unwrap()),
            Box::new(PatternFilter::new("deploy", false).unwrap()),
            Box::new(AuthorFilter::new(["U01"]).unwrap()),
        ];
        filters
    });
}

// =============================================================================
// Output Benchmarks
// =============================================================================

fn bench_output(c: &mut Criterion) {
    let mut group = c.benchmark_group("output");

    for size in [1_000_usize, 10_000] {
        let messages = generate_messages(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("json", size), &messages, |b, messages| {
            b.iter(|| black_box(to_json(black_box(messages)).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("csv", size), &messages, |b, messages| {
            b.iter(|| black_box(to_csv(black_box(messages)).unwrap()));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_filter_by_author,
    bench_filter_by_pattern,
    bench_filter_by_time,
    bench_filter_combined,
    bench_output,
);
criterion_main!(benches);
