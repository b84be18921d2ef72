use charconv::{
    format_float, format_hex, format_integer, parse_float, parse_integer, CharsFormat, F128, F80,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

// ---------------------------------------------------------------------------
// Input generation
// ---------------------------------------------------------------------------

/// Finite f64 values spread over the whole exponent range.
fn random_doubles(n: usize) -> Vec<f64> {
    let mut rng = SmallRng::seed_from_u64(42);
    let mut values = Vec::with_capacity(n);
    while values.len() < n {
        let value = f64::from_bits(rng.gen());
        if value.is_finite() {
            values.push(value);
        }
    }
    values
}

// ---------------------------------------------------------------------------
// Integer benchmarks
// ---------------------------------------------------------------------------

fn bench_integers(c: &mut Criterion) {
    let mut g = c.benchmark_group("integer");
    let mut buf = [0u8; 130];

    for base in [2u32, 10, 16, 36] {
        g.bench_with_input(BenchmarkId::new("format_u64", base), &base, |b, &base| {
            b.iter(|| format_integer(&mut buf, black_box(u64::MAX), base).unwrap());
        });
    }

    g.bench_function("format_i128/base10", |b| {
        b.iter(|| format_integer(&mut buf, black_box(i128::MIN), 10).unwrap());
    });

    let decimal = b"18446744073709551615";
    g.bench_function("parse_u64/base10", |b| {
        b.iter(|| parse_integer::<u64>(black_box(decimal), 10).unwrap());
    });
    let hex = b"ffffffffffffffff";
    g.bench_function("parse_u64/base16", |b| {
        b.iter(|| parse_integer::<u64>(black_box(hex), 16).unwrap());
    });
    let overflow = b"99999999999999999999999999";
    g.bench_function("parse_u8/overflow", |b| {
        b.iter(|| parse_integer::<u8>(black_box(overflow), 10).unwrap_err());
    });

    g.finish();
}

// ---------------------------------------------------------------------------
// Float formatting benchmarks
// ---------------------------------------------------------------------------

fn bench_format_float(c: &mut Criterion) {
    let mut g = c.benchmark_group("format_float");
    let mut buf = [0u8; 400];
    let values = random_doubles(256);

    let cases = [
        ("general", CharsFormat::General, None),
        ("scientific", CharsFormat::Scientific, None),
        ("hex", CharsFormat::Hex, None),
        ("general_p6", CharsFormat::General, Some(6)),
        ("scientific_p17", CharsFormat::Scientific, Some(17)),
    ];
    for (name, format, precision) in cases {
        g.bench_function(name, |b| {
            b.iter(|| {
                for &value in &values {
                    format_float(&mut buf, black_box(value), format, precision).unwrap();
                }
            });
        });
    }

    g.bench_function("fixed/pi", |b| {
        b.iter(|| format_float(&mut buf, black_box(std::f64::consts::PI), CharsFormat::Fixed, None));
    });
    g.bench_function("hex/f80", |b| {
        let value = F80::from_f64(0.1);
        b.iter(|| format_hex(&mut buf, black_box(value), None).unwrap());
    });
    g.bench_function("general/f128", |b| {
        let value = F128::from_f64(0.1);
        b.iter(|| format_float(&mut buf, black_box(value), CharsFormat::General, None).unwrap());
    });

    g.finish();
}

// ---------------------------------------------------------------------------
// Float parsing benchmarks
// ---------------------------------------------------------------------------

fn bench_parse_float(c: &mut Criterion) {
    let mut g = c.benchmark_group("parse_float");

    for (name, format) in [("general", CharsFormat::General), ("hex", CharsFormat::Hex)] {
        let texts: Vec<Vec<u8>> = random_doubles(256)
            .into_iter()
            .map(|value| {
                let mut buf = [0u8; 400];
                let n = format_float(&mut buf, value, format, None).unwrap();
                buf[..n].to_vec()
            })
            .collect();

        g.bench_function(name, |b| {
            b.iter(|| {
                for text in &texts {
                    parse_float::<f64>(black_box(text), format).unwrap();
                }
            });
        });
    }

    let tenth = b"0.1000000000000000055511151231257827";
    g.bench_function("general/f128", |b| {
        b.iter(|| parse_float::<F128>(black_box(tenth), CharsFormat::General).unwrap());
    });

    g.finish();
}

// ---------------------------------------------------------------------------
// Criterion harness
// ---------------------------------------------------------------------------

criterion_group!(
    benches,
    bench_integers,
    bench_format_float,
    bench_parse_float
);
criterion_main!(benches);
