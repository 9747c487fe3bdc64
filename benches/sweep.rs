use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use sweepf1::dataset::synthetic_split;
use sweepf1::ml::eval::{MetricEval, SweepF1};

const ROWS: usize = 8_192;
const GRID_STEPS: usize = 64;

fn bench_threshold_sweep(c: &mut Criterion) {
    let (_, eval) = synthetic_split(ROWS * 2, 42);
    let raw: Vec<f32> = eval.x.iter().map(|row| row.iter().sum::<f32>()).collect();
    let targets: Vec<f32> = eval.y.iter().map(|&y| y as f32).collect();
    let approxes = vec![raw];

    c.bench_with_input(
        BenchmarkId::new("threshold_sweep", targets.len()),
        &(approxes, targets),
        |b, (approxes, targets)| {
            b.iter(|| {
                let mut metric = SweepF1::new(0.0, 1.0, GRID_STEPS).expect("grid");
                // Bookkeeping pass, then the measured report pass.
                let _ = metric.evaluate(black_box(approxes), targets, None);
                metric.evaluate(black_box(approxes), targets, None)
            });
        },
    );
}

criterion_group!(benches, bench_threshold_sweep);
criterion_main!(benches);
