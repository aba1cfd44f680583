use RustedPlotter::plotter::sampler::sample;
use RustedPlotter::plotter::validation::Range;
use RustedPlotter::symbolic::symbolic_engine::Expr;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn bench_sample_polynomial(c: &mut Criterion) {
    let range = Range::new(-10.0, 10.0);
    c.bench_function("sample 2*x^3 - x + 1, 500 points", |b| {
        b.iter(|| sample(black_box("2*x^3 - x + 1"), range, 500))
    });
}

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse nested expression", |b| {
        b.iter(|| Expr::parse_expression(black_box("((x + 1)**2 - (x - 1)**2) / (4*x + 0.5)")))
    });
}

criterion_group!(benches, bench_sample_polynomial, bench_parse);
criterion_main!(benches);
