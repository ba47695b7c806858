//! Benchmarks for the regression fitters

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use crowdstorm::model::{fit_logit, fit_ols, fit_poisson, Design};
use crowdstorm::pipeline::{ModelFormula, Term};
use polars::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn synthetic_design(rows: usize) -> Design {
    let mut rng = StdRng::seed_from_u64(42);

    let x1: Vec<f64> = (0..rows).map(|_| rng.gen::<f64>() * 2.0).collect();
    let x2: Vec<f64> = (0..rows).map(|_| rng.gen::<f64>() * 2.0).collect();
    let y: Vec<f64> = x1
        .iter()
        .zip(x2.iter())
        .map(|(&a, &b)| {
            let p = 1.0 / (1.0 + (-(a - b)).exp());
            f64::from(rng.gen::<f64>() < p)
        })
        .collect();
    let counts: Vec<f64> = y.iter().map(|&v| v + 1.0).collect();

    let df = df! { "y" => y, "counts" => counts, "x1" => x1, "x2" => x2 }.unwrap();
    let formula = ModelFormula::new("y", vec![Term::main("x1"), Term::main("x2")]);
    Design::from_frame(&df, &formula).unwrap()
}

fn count_design(rows: usize) -> Design {
    let mut rng = StdRng::seed_from_u64(43);

    let x: Vec<f64> = (0..rows).map(|_| rng.gen::<f64>() * 2.0).collect();
    let y: Vec<f64> = x.iter().map(|&v| (0.4 + 0.6 * v).exp().round()).collect();

    let df = df! { "y" => y, "x" => x }.unwrap();
    let formula = ModelFormula::new("y", vec![Term::main("x")]);
    Design::from_frame(&df, &formula).unwrap()
}

fn bench_fitters(c: &mut Criterion) {
    let mut group = c.benchmark_group("fitters");

    for rows in [1_000, 10_000] {
        let design = synthetic_design(rows);
        group.bench_with_input(BenchmarkId::new("ols", rows), &design, |b, d| {
            b.iter(|| fit_ols(black_box(d)).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("logit", rows), &design, |b, d| {
            b.iter(|| fit_logit(black_box(d)).unwrap())
        });

        let counts = count_design(rows);
        group.bench_with_input(BenchmarkId::new("poisson", rows), &counts, |b, d| {
            b.iter(|| fit_poisson(black_box(d)).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_fitters);
criterion_main!(benches);
