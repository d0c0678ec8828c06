//! Training result types for Random Forest.

use crate::forest::RandomForest;

/// Metadata about the training run.
#[derive(Debug, Clone, serde::Serialize)]
pub struct TrainingMetadata {
    /// Number of trees trained.
    pub n_trees: usize,
    /// Number of training samples.
    pub n_samples: usize,
    /// Number of feature columns.
    pub n_features: usize,
    /// Number of distinct labels in the training set.
    pub n_classes: usize,
    /// Rows drawn per tree.
    pub n_bootstrap: usize,
    /// Feature columns split by threshold.
    pub n_continuous: usize,
    /// Feature columns split by category.
    pub n_categorical: usize,
}

/// Result of Random Forest training.
#[derive(Debug)]
pub struct RandomForestResult {
    forest: RandomForest,
    metadata: TrainingMetadata,
}

impl RandomForestResult {
    /// Create a new training result.
    pub(crate) fn new(forest: RandomForest, metadata: TrainingMetadata) -> Self {
        Self { forest, metadata }
    }

    /// Borrow the fitted forest.
    #[must_use]
    pub fn forest(&self) -> &RandomForest {
        &self.forest
    }

    /// Consume the result and return the fitted forest.
    #[must_use]
    pub fn into_forest(self) -> RandomForest {
        self.forest
    }

    /// Return training metadata.
    #[must_use]
    pub fn metadata(&self) -> &TrainingMetadata {
        &self.metadata
    }
}
