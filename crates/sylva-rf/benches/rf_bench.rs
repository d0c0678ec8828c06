//! Criterion benchmarks for sylva-rf: Random Forest training and prediction.

use criterion::{Criterion, criterion_group, criterion_main};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use sylva_rf::{Dataset, DecisionTreeConfig, RandomForestConfig, Value};

fn make_classification(
    n_samples: usize,
    n_features: usize,
    n_classes: usize,
    seed: u64,
) -> Dataset {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut features = Vec::with_capacity(n_samples);
    let mut labels = Vec::with_capacity(n_samples);
    for i in 0..n_samples {
        let class = i % n_classes;
        labels.push(Value::from(format!("class_{class}")));
        let row: Vec<Value> = (0..n_features)
            .map(|f| {
                let base = if f < 3 { class as f64 * 3.0 } else { 0.0 };
                Value::from(base + rng.r#gen::<f64>() * 0.5)
            })
            .collect();
        features.push(row);
    }
    let names: Vec<String> = (0..n_features).map(|f| format!("f{f}")).collect();
    Dataset::new(names, "label", features, labels).unwrap()
}

fn bench_rf_train(c: &mut Criterion) {
    let dataset = make_classification(500, 20, 5, 42);
    let cfg = RandomForestConfig::new(20)
        .unwrap()
        .with_n_features(Some(5))
        .with_seed(42);

    c.bench_function("rf_train_500x20_5class_20trees", |b| {
        b.iter(|| cfg.fit(&dataset).unwrap());
    });
}

fn bench_rf_predict_batch(c: &mut Criterion) {
    let dataset = make_classification(500, 20, 5, 42);
    let cfg = RandomForestConfig::new(20)
        .unwrap()
        .with_n_features(Some(5))
        .with_seed(42);
    let forest = cfg.fit(&dataset).unwrap().into_forest();

    c.bench_function("rf_predict_batch_500x20_20trees", |b| {
        b.iter(|| forest.predict_batch(&dataset).unwrap());
    });
}

fn bench_single_tree(c: &mut Criterion) {
    // Split search dominates a full-data single tree.
    let dataset = make_classification(500, 20, 5, 42);
    let cfg = DecisionTreeConfig::new().with_seed(42);

    c.bench_function("tree_fit_500x20_5class", |b| {
        b.iter(|| cfg.fit(&dataset).unwrap());
    });
}

criterion_group!(benches, bench_rf_train, bench_rf_predict_batch, bench_single_tree);
criterion_main!(benches);
