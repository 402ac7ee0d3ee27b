use std::hint::black_box;

use chrono::NaiveDate;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use datetime_recognizer::{Culture, DateTimeRecognizer, RecognizerOptions};

const SHORT: &str = "tomorrow at noon in PST";

const PARAGRAPH: &str = "We met on March 5, 2019 and agreed to talk again next Friday at 3pm or 4pm. \
    The review runs from Monday to Wednesday, then every other week until Christmas. \
    Budget 2 hours for setup, which should be done within 3 days; the last sync was 2 weeks ago \
    between 9am and 11:30am Pacific time.";

fn bench_recognize(c: &mut Criterion) {
    let reference = NaiveDate::from_ymd_opt(2016, 11, 7)
        .unwrap()
        .and_hms_opt(16, 12, 0)
        .unwrap();
    let sequential = DateTimeRecognizer::new(Culture::English, RecognizerOptions::default()).unwrap();
    let parallel =
        DateTimeRecognizer::new(Culture::English, RecognizerOptions::default().with_parallel_scan(true)).unwrap();

    let mut group = c.benchmark_group("recognize");
    for (name, text) in [("short", SHORT), ("paragraph", PARAGRAPH)] {
        group.bench_with_input(BenchmarkId::new("sequential", name), text, |b, text| {
            b.iter(|| sequential.recognize(black_box(text), reference))
        });
        group.bench_with_input(BenchmarkId::new("parallel", name), text, |b, text| {
            b.iter(|| parallel.recognize(black_box(text), reference))
        });
    }
    group.finish();
}

fn bench_construction(c: &mut Criterion) {
    c.bench_function("recognizer_new", |b| {
        b.iter(|| DateTimeRecognizer::new(black_box(Culture::English), RecognizerOptions::default()))
    });
}

criterion_group!(benches, bench_recognize, bench_construction);
criterion_main!(benches);
