//! Accuracy regression tests for sylva-rf.
//!
//! These tests verify that algorithmic changes do not degrade Random Forest
//! classification accuracy on a deterministic synthetic dataset.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use sylva_rf::{Dataset, RandomForestConfig, TestSize, Value, accuracy, train_test_split};

// ---------------------------------------------------------------------------
// Helper: deterministic synthetic classification dataset
// ---------------------------------------------------------------------------

/// Generate a 300-sample, 10-feature, 3-class classification dataset.
///
/// Features 0-2 are informative (class * 3.0 + noise in [0, 0.5]).
/// Features 3-9 are pure noise in [0, 0.5].
/// Samples are assigned round-robin across classes.
fn make_classification() -> Dataset {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let n_samples = 300;
    let n_features = 10;
    let n_classes = 3;

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

fn holdout_accuracy(config: &RandomForestConfig, dataset: &Dataset) -> f64 {
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let (train, test) = train_test_split(dataset, TestSize::Fraction(0.2), &mut rng).unwrap();
    let result = config.fit(&train).unwrap();
    let predictions = result.forest().predict_batch(&test).unwrap();
    accuracy(&predictions, test.labels()).unwrap()
}

// ---------------------------------------------------------------------------
// a) holdout_accuracy_above_threshold
// ---------------------------------------------------------------------------

/// Holdout accuracy with every feature considered at each split must exceed 0.9.
#[test]
fn holdout_accuracy_above_threshold() {
    let dataset = make_classification();
    let config = RandomForestConfig::new(20).unwrap().with_seed(42);
    let acc = holdout_accuracy(&config, &dataset);
    assert!(acc > 0.9, "holdout accuracy {acc} <= 0.9");
}

// ---------------------------------------------------------------------------
// b) small_forest_with_feature_subsampling
// ---------------------------------------------------------------------------

/// Four shallow trees on oversized bootstrap samples, two features per split.
///
/// Matches the default command-line evaluation settings.
#[test]
fn small_forest_with_feature_subsampling() {
    let dataset = make_classification();
    let config = RandomForestConfig::new(4)
        .unwrap()
        .with_n_bootstrap(Some(800))
        .with_n_features(Some(2))
        .with_max_depth(4)
        .with_min_samples(2)
        .with_seed(0);
    let acc = holdout_accuracy(&config, &dataset);
    assert!(acc > 0.7, "holdout accuracy {acc} <= 0.7");
}

// ---------------------------------------------------------------------------
// c) deterministic_training
// ---------------------------------------------------------------------------

/// Same seed and data produce structurally identical forests and predictions.
#[test]
fn deterministic_training() {
    let dataset = make_classification();
    let config = RandomForestConfig::new(8)
        .unwrap()
        .with_n_features(Some(3))
        .with_seed(7);

    let forest1 = config.fit(&dataset).unwrap().into_forest();
    let forest2 = config.fit(&dataset).unwrap().into_forest();
    assert_eq!(forest1, forest2);

    let preds1 = forest1.predict_batch(&dataset).unwrap();
    let preds2 = forest1.predict_batch(&dataset).unwrap();
    assert_eq!(preds1, preds2);
}

// ---------------------------------------------------------------------------
// d) depth_bound_holds
// ---------------------------------------------------------------------------

/// No tree of the ensemble grows deeper than `max_depth`.
#[test]
fn depth_bound_holds() {
    let dataset = make_classification();
    for max_depth in [0, 1, 3] {
        let forest = RandomForestConfig::new(5)
            .unwrap()
            .with_max_depth(max_depth)
            .with_seed(11)
            .fit(&dataset)
            .unwrap()
            .into_forest();
        for tree in forest.trees() {
            assert!(tree.depth() <= max_depth, "depth {} > {max_depth}", tree.depth());
        }
    }
}

// ---------------------------------------------------------------------------
// e) informative_features_at_root
// ---------------------------------------------------------------------------

/// With all features available, every root question tests an informative column.
#[test]
fn informative_features_at_root() {
    let dataset = make_classification();
    let forest = RandomForestConfig::new(10)
        .unwrap()
        .with_seed(3)
        .fit(&dataset)
        .unwrap()
        .into_forest();
    for tree in forest.trees() {
        match tree.root() {
            sylva_rf::Node::Decision { question, .. } => {
                assert!(question.feature().index() < 3, "root splits on {question}");
            }
            sylva_rf::Node::Leaf { .. } => panic!("root should not be a leaf"),
        }
    }
}
