use std::sync::Arc;

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};

use bsm_instruments::OptionVariant;
use bsm_math::random_numbers::GaussianSequenceGenerator;
use bsm_methods::monte_carlo::{EuropeanPathPricer, MonteCarloModel, PathGenerator, TimeGrid};
use bsm_processes::BlackScholesMertonProcess;
use bsm_time::Date;

fn model(steps: usize, bridged: bool) -> MonteCarloModel<EuropeanPathPricer> {
    let reference = Date::from_ymd(2026, 1, 1).unwrap();
    let process =
        Arc::new(BlackScholesMertonProcess::new(100.0, 0.05, 0.01, 0.2, reference).unwrap());
    let grid = TimeGrid::regular(1.0, steps).unwrap();
    let gsg = GaussianSequenceGenerator::new(steps, 42);
    let generator = PathGenerator::new(process, grid, gsg, bridged).unwrap();
    let discount = (-0.05f64).exp();
    let pricer = EuropeanPathPricer::new(OptionVariant::Call, 100.0, discount).unwrap();
    MonteCarloModel::new(generator, pricer, true)
}

fn bench_sampling(c: &mut Criterion) {
    let mut group = c.benchmark_group("monte_carlo");
    for steps in [1usize, 16, 64] {
        group.bench_function(format!("incremental_{steps}_steps"), |b| {
            b.iter_batched(
                || model(steps, false),
                |mut m| m.sample(None, Some(10_000), 10_000).map(|s| s.samples()),
                BatchSize::SmallInput,
            )
        });
        group.bench_function(format!("bridged_{steps}_steps"), |b| {
            b.iter_batched(
                || model(steps, true),
                |mut m| m.sample(None, Some(10_000), 10_000).map(|s| s.samples()),
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_sampling);
criterion_main!(benches);
