use ampbench_core::Class;
use ampbench_eval::{top_k_fraction_of_ones, weight_grid, ConfusionMatrix, GridMode, GridSearch};
use ampbench_io::TrainingSet;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn random_unit(n: usize, seed: u64) -> Vec<f64> {
    let mut state = seed;
    (0..n)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            (state >> 11) as f64 / (1u64 << 53) as f64
        })
        .collect()
}

fn labels(n: usize, seed: u64) -> Vec<Class> {
    random_unit(n, seed)
        .into_iter()
        .map(|x| if x < 0.3 { Class::Positive } else { Class::Negative })
        .collect()
}

fn training_set(n: usize) -> TrainingSet {
    let a = random_unit(n, 1);
    let b = random_unit(n, 2);
    let c = random_unit(n, 3);
    TrainingSet {
        models: ["ampscanner_v2".into(), "amplify".into(), "campr3_rf".into()],
        scores: (0..n).map(|i| [a[i], b[i], c[i]]).collect(),
        labels: labels(n, 4),
    }
}

fn bench_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid");

    group.bench_function("weight_grid_0.01", |b| {
        b.iter(|| weight_grid(black_box(0.01), GridMode::UnitSum))
    });

    let training = training_set(1_000);
    let search = GridSearch {
        by: 0.05,
        mode: GridMode::UnitSum,
        top_k: 100,
    };
    group.bench_function("search_1k_by0.05", |b| b.iter(|| search.run(black_box(&training))));

    group.finish();
}

fn bench_top_k(c: &mut Criterion) {
    let scores = random_unit(10_000, 7);
    let labels = labels(10_000, 8);
    c.bench_function("top_k_10k", |b| {
        b.iter(|| top_k_fraction_of_ones(black_box(&scores), black_box(&labels), 100))
    });
}

fn bench_confusion(c: &mut Criterion) {
    let actual = labels(100_000, 11);
    let predicted: Vec<Option<Class>> = labels(100_000, 12).into_iter().map(Some).collect();
    c.bench_function("confusion_100k", |b| {
        b.iter(|| ConfusionMatrix::from_labels(black_box(&actual), black_box(&predicted)).map(|cm| cm.metrics()))
    });
}

criterion_group!(benches, bench_grid, bench_top_k, bench_confusion);
criterion_main!(benches);
