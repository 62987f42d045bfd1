//! Benchmarks for formula parsing and printing.

use criterion::{criterion_group, criterion_main, Criterion};

use sbmlkit_math::{parse_formula, to_formula};

const KINETIC_LAW: &str = "Vmax*S1/(Km+S1) - k2*P*compartment";
const EVENT_TRIGGER: &str = "time >= 10 and (S1 < 1e-6 or geq(P, threshold))";

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse_kinetic_law", |b| {
        b.iter(|| parse_formula(std::hint::black_box(KINETIC_LAW)).unwrap());
    });

    c.bench_function("parse_event_trigger", |b| {
        b.iter(|| parse_formula(std::hint::black_box(EVENT_TRIGGER)).unwrap());
    });
}

fn bench_print(c: &mut Criterion) {
    let tree = parse_formula(KINETIC_LAW).unwrap();
    c.bench_function("print_kinetic_law", |b| {
        b.iter(|| to_formula(std::hint::black_box(&tree)));
    });
}

fn bench_round_trip(c: &mut Criterion) {
    c.bench_function("round_trip_kinetic_law", |b| {
        b.iter(|| {
            let tree = parse_formula(std::hint::black_box(KINETIC_LAW)).unwrap();
            to_formula(&tree)
        });
    });
}

criterion_group!(benches, bench_parse, bench_print, bench_round_trip);
criterion_main!(benches);
