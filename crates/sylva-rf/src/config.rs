//! Configuration builder for Random Forest training.

use crate::dataset::Dataset;
use crate::error::RfError;
use crate::result::RandomForestResult;
use crate::tree::DecisionTreeConfig;

/// Configuration for Random Forest training.
///
/// Construct via [`RandomForestConfig::new`], then chain `with_*` methods.
///
/// # Defaults
///
/// | Parameter     | Default                  |
/// |---------------|--------------------------|
/// | `n_bootstrap` | `None` (= training rows) |
/// | `n_features`  | `None` (all features)    |
/// | `max_depth`   | 5                        |
/// | `min_samples` | 2                        |
/// | `seed`        | 42                       |
#[derive(Debug, Clone)]
pub struct RandomForestConfig {
    pub(crate) n_trees: usize,
    pub(crate) n_bootstrap: Option<usize>,
    pub(crate) tree: DecisionTreeConfig,
}

impl RandomForestConfig {
    /// Create a new config with the given number of trees.
    ///
    /// # Errors
    ///
    /// Returns [`RfError::InvalidTreeCount`] if `n_trees` is zero.
    pub fn new(n_trees: usize) -> Result<Self, RfError> {
        if n_trees == 0 {
            return Err(RfError::InvalidTreeCount { n_trees });
        }
        Ok(Self {
            n_trees,
            n_bootstrap: None,
            tree: DecisionTreeConfig::new(),
        })
    }

    // --- Setters ---

    /// Set the number of rows drawn (with replacement) for each tree.
    ///
    /// `None` draws as many rows as the training set has. Larger counts
    /// than the training set are allowed.
    #[must_use]
    pub fn with_n_bootstrap(mut self, n_bootstrap: Option<usize>) -> Self {
        self.n_bootstrap = n_bootstrap;
        self
    }

    /// Set the number of random features considered at each split.
    #[must_use]
    pub fn with_n_features(mut self, n_features: Option<usize>) -> Self {
        self.tree = self.tree.with_n_features(n_features);
        self
    }

    /// Set the maximum tree depth.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.tree = self.tree.with_max_depth(max_depth);
        self
    }

    /// Set the minimum number of samples a partition needs to be split.
    #[must_use]
    pub fn with_min_samples(mut self, min_samples: usize) -> Self {
        self.tree = self.tree.with_min_samples(min_samples);
        self
    }

    /// Set the master random seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.tree = self.tree.with_seed(seed);
        self
    }

    // --- Getters ---

    /// Return the number of trees.
    #[must_use]
    pub fn n_trees(&self) -> usize {
        self.n_trees
    }

    /// Return the bootstrap draw count, if set.
    #[must_use]
    pub fn n_bootstrap(&self) -> Option<usize> {
        self.n_bootstrap
    }

    /// Return the per-split feature count, if set.
    #[must_use]
    pub fn n_features(&self) -> Option<usize> {
        self.tree.n_features()
    }

    /// Return the maximum depth.
    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.tree.max_depth()
    }

    /// Return the minimum samples required to split a partition.
    #[must_use]
    pub fn min_samples(&self) -> usize {
        self.tree.min_samples()
    }

    /// Return the master random seed.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.tree.seed()
    }

    /// Train a Random Forest on `dataset`.
    ///
    /// # Errors
    ///
    /// | Variant                            | When                                         |
    /// |------------------------------------|----------------------------------------------|
    /// | [`RfError::InvalidBootstrapCount`] | `n_bootstrap` is `Some(0)`                   |
    /// | [`RfError::InvalidFeatureCount`]   | `n_features` is `Some(0)`                    |
    /// | [`RfError::InvalidMinSamples`]     | `min_samples` is 0                           |
    /// | [`RfError::MixedColumnType`]       | a continuous column contains a textual value |
    pub fn fit(&self, dataset: &Dataset) -> Result<RandomForestResult, RfError> {
        crate::forest::train(self, dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = RandomForestConfig::new(10).unwrap();
        assert_eq!(config.n_trees(), 10);
        assert_eq!(config.n_bootstrap(), None);
        assert_eq!(config.n_features(), None);
        assert_eq!(config.max_depth(), 5);
        assert_eq!(config.min_samples(), 2);
        assert_eq!(config.seed(), 42);
    }

    #[test]
    fn setters_chain() {
        let config = RandomForestConfig::new(4)
            .unwrap()
            .with_n_bootstrap(Some(800))
            .with_n_features(Some(2))
            .with_max_depth(4)
            .with_min_samples(3)
            .with_seed(7);
        assert_eq!(config.n_bootstrap(), Some(800));
        assert_eq!(config.n_features(), Some(2));
        assert_eq!(config.max_depth(), 4);
        assert_eq!(config.min_samples(), 3);
        assert_eq!(config.seed(), 7);
    }

    #[test]
    fn zero_trees_rejected() {
        let err = RandomForestConfig::new(0).unwrap_err();
        assert!(matches!(err, RfError::InvalidTreeCount { n_trees: 0 }));
    }
}
