use changeover::cost::CostModel;
use changeover::optimizer::grouping::group_by_priority;
use changeover::synth::{generate_job, SynthSpec};
use changeover::{optimize, OptimizeOptions};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("optimize");
    for orders in [50usize, 200, 500] {
        let job = generate_job(&SynthSpec {
            orders,
            attributes: 4,
            values_per_attribute: 6,
            groups: 2,
            matrix_density: 0.3,
            seed: 1,
        });
        let options = OptimizeOptions {
            use_matrix_lookup: true,
            matrix: job.matrix.clone(),
            ..Default::default()
        };
        group.bench_with_input(BenchmarkId::from_parameter(orders), &job, |b, job| {
            b.iter(|| optimize(black_box(&job.orders), black_box(&job.attributes), &options))
        });
    }
    group.finish();

    let job = generate_job(&SynthSpec {
        orders: 1000,
        attributes: 5,
        ..Default::default()
    });
    let model = CostModel::new(&job.orders, &job.attributes, None);
    let identity: Vec<usize> = (0..job.orders.len()).collect();

    c.bench_function("sequence_cost (1k orders)", |b| {
        b.iter(|| model.sequence_cost(black_box(&identity)))
    });
    c.bench_function("group_by_priority (1k orders)", |b| {
        b.iter(|| group_by_priority(&model, black_box(&identity)))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
