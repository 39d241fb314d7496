//! Benchmark – number parsing and printing over a comma separated buffer
#![allow(missing_docs)]

use std::time::Duration;

use bufcodec::{
    Number, NumberKinds, parse_number, print_double, print_long, split, validate_number,
};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

/// A deterministic mix of ints, longs and doubles, `count` entries long.
fn make_numbers(count: usize) -> String {
    let mut s = String::with_capacity(count * 12);
    let mut x: u64 = 0x2545_F491_4F6C_DD1D;
    for i in 0..count {
        // xorshift keeps the input stable between runs
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        if i > 0 {
            s.push(',');
        }
        match i % 3 {
            0 => s.push_str(&(x % 100_000).to_string()),
            1 => s.push_str(&format!("{}L", x >> 2)),
            _ => s.push_str(&format!("{}.{:03}e-{}", x % 1000, x % 997, x % 20)),
        }
    }
    s
}

fn parse_all(buf: &[u8]) -> f64 {
    let mut sum = 0.0;
    for field in split(buf, b',') {
        let (_, n) = parse_number(field, 0, NumberKinds::ALL, true).expect("benchmark input is valid");
        sum += n.as_f64();
    }
    sum
}

fn validate_all(buf: &[u8]) -> usize {
    split(buf, b',')
        .into_iter()
        .filter_map(|field| validate_number(field, 0, NumberKinds::ALL, true).ok())
        .count()
}

fn print_all(numbers: &[Number], out: &mut [u8]) -> usize {
    let mut pos = 0;
    for n in numbers {
        let fill = match *n {
            Number::Int(v) => print_long(out, pos, i64::from(v)),
            Number::Long(v) => print_long(out, pos, v),
            Number::Float(v) => print_double(out, pos, f64::from(v)),
            Number::Double(v) => print_double(out, pos, v),
        };
        pos = fill.written().expect("output buffer is large enough");
    }
    pos
}

fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");

    for &count in &[100usize, 10_000] {
        let payload = make_numbers(count);
        let numbers: Vec<Number> = split(payload.as_bytes(), b',')
            .into_iter()
            .map(|f| parse_number(f, 0, NumberKinds::ALL, true).expect("valid").1)
            .collect();
        let mut out = vec![0u8; count * 32];

        group.bench_with_input(BenchmarkId::new("parse", count), &payload, |b, p| {
            b.iter(|| black_box(parse_all(black_box(p.as_bytes()))));
        });
        group.bench_with_input(BenchmarkId::new("validate", count), &payload, |b, p| {
            b.iter(|| black_box(validate_all(black_box(p.as_bytes()))));
        });
        group.bench_with_input(BenchmarkId::new("print", count), &numbers, |b, n| {
            b.iter(|| black_box(print_all(black_box(n), &mut out)));
        });
    }

    group.finish();
}

fn criterion() -> Criterion {
    let mut c = Criterion::default();
    if cfg!(feature = "bench-fast") {
        c = c
            .warm_up_time(Duration::from_millis(10))
            .measurement_time(Duration::from_millis(100))
            .sample_size(10);
    } else {
        c = c
            .warm_up_time(Duration::from_secs(3))
            .measurement_time(Duration::from_secs(5));
    }
    c
}

criterion_group! { name = benches; config = criterion(); targets = bench_codec }
criterion_main!(benches);
