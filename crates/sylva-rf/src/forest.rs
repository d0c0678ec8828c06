//! Random Forest training: one entropy tree per bootstrap sample.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, instrument};

use crate::config::RandomForestConfig;
use crate::dataset::Dataset;
use crate::error::RfError;
use crate::feature::FeatureSchema;
use crate::result::{RandomForestResult, TrainingMetadata};
use crate::sampling::bootstrap_sample;
use crate::tree::DecisionTree;

/// A fitted Random Forest ensemble.
#[derive(Debug, Clone, PartialEq)]
pub struct RandomForest {
    pub(crate) trees: Vec<DecisionTree>,
    pub(crate) schema: FeatureSchema,
    pub(crate) n_classes: usize,
}

impl RandomForest {
    /// Return the trees in training order.
    #[must_use]
    pub fn trees(&self) -> &[DecisionTree] {
        &self.trees
    }

    /// Return the number of trees in the ensemble.
    #[must_use]
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Return the feature schema shared by every tree.
    #[must_use]
    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    /// Return the number of distinct labels seen in training.
    #[must_use]
    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    /// Return the feature names in training column order.
    #[must_use]
    pub fn feature_names(&self) -> Vec<&str> {
        self.schema.descriptors().iter().map(|d| d.name()).collect()
    }
}

/// Train the Random Forest ensemble.
#[instrument(skip_all, fields(n_trees = config.n_trees, n_samples = dataset.n_samples()))]
pub(crate) fn train(
    config: &RandomForestConfig,
    dataset: &Dataset,
) -> Result<RandomForestResult, RfError> {
    // --- Validate config ---
    if let Some(n_bootstrap) = config.n_bootstrap
        && n_bootstrap == 0
    {
        return Err(RfError::InvalidBootstrapCount { n_bootstrap });
    }
    config.tree.validate()?;

    // --- Shared schema ---
    let schema = FeatureSchema::infer(dataset)?;

    let n_samples = dataset.n_samples();
    let n_features = dataset.n_features();
    let n_classes = dataset.n_classes();
    let n_bootstrap = config.n_bootstrap.unwrap_or(n_samples);

    info!(
        n_trees = config.n_trees,
        n_samples,
        n_features,
        n_classes,
        n_bootstrap,
        n_continuous = schema.n_continuous(),
        "training random forest"
    );

    // Generate per-tree seeds from master RNG.
    let mut master_rng = ChaCha8Rng::seed_from_u64(config.tree.seed);
    let tree_seeds: Vec<u64> = (0..config.n_trees).map(|_| master_rng.r#gen()).collect();

    let mut trees = Vec::with_capacity(config.n_trees);
    for (tree_index, seed) in tree_seeds.into_iter().enumerate() {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let sample_indices = bootstrap_sample(n_samples, n_bootstrap, &mut rng)?;
        let tree = config
            .tree
            .clone()
            .with_seed(rng.r#gen())
            .grow(dataset, &schema, &sample_indices)?;

        debug!(
            tree_index,
            depth = tree.depth(),
            n_leaves = tree.n_leaves(),
            "tree trained"
        );
        trees.push(tree);
    }

    let metadata = TrainingMetadata {
        n_trees: config.n_trees,
        n_samples,
        n_features,
        n_classes,
        n_bootstrap,
        n_continuous: schema.n_continuous(),
        n_categorical: schema.n_categorical(),
    };

    let forest = RandomForest {
        trees,
        schema,
        n_classes,
    };

    info!(n_trees_trained = forest.n_trees(), "random forest training complete");

    Ok(RandomForestResult::new(forest, metadata))
}
