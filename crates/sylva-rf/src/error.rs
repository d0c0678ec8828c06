/// Errors from random forest training, prediction and evaluation.
#[derive(Debug, thiserror::Error)]
pub enum RfError {
    /// Returned when n_trees is zero.
    #[error("n_trees must be at least 1, got {n_trees}")]
    InvalidTreeCount {
        /// The invalid n_trees value provided.
        n_trees: usize,
    },

    /// Returned when n_bootstrap is zero.
    #[error("n_bootstrap must be at least 1, got {n_bootstrap}")]
    InvalidBootstrapCount {
        /// The invalid n_bootstrap value provided.
        n_bootstrap: usize,
    },

    /// Returned when the random feature count per split is zero.
    #[error("n_features must be at least 1 when set, got {n_features}")]
    InvalidFeatureCount {
        /// The invalid n_features value provided.
        n_features: usize,
    },

    /// Returned when min_samples is zero.
    #[error("min_samples must be at least 1, got {min_samples}")]
    InvalidMinSamples {
        /// The invalid min_samples value provided.
        min_samples: usize,
    },

    /// Returned when a test fraction lies outside [0.0, 1.0].
    #[error("test fraction must be in [0.0, 1.0], got {fraction}")]
    InvalidTestFraction {
        /// The invalid fraction provided.
        fraction: f64,
    },

    /// Returned when a holdout split would leave the train or test side empty.
    #[error("test size {test_size} leaves an empty side for a dataset of {n_samples} rows")]
    InvalidTestSize {
        /// The resolved number of test rows.
        test_size: usize,
        /// The number of rows available.
        n_samples: usize,
    },

    /// Returned when more rows are requested than the dataset can supply.
    #[error("requested {requested} rows but only {available} are available")]
    InsufficientData {
        /// The number of rows requested.
        requested: usize,
        /// The number of rows available.
        available: usize,
    },

    /// Returned when a dataset has zero rows.
    #[error("dataset has zero samples")]
    EmptyDataset,

    /// Returned when a dataset has zero feature columns.
    #[error("dataset has zero feature columns")]
    ZeroFeatures,

    /// Returned when a row has a different number of features than the header.
    #[error("sample {sample_index} has {got} features, expected {expected}")]
    FeatureCountMismatch {
        /// The expected number of features.
        expected: usize,
        /// The actual number of features in the sample.
        got: usize,
        /// The zero-based index of the offending sample.
        sample_index: usize,
    },

    /// Returned when the number of labels differs from the number of rows.
    #[error("dataset has {n_samples} rows but {n_labels} labels")]
    LabelCountMismatch {
        /// The number of feature rows.
        n_samples: usize,
        /// The number of labels.
        n_labels: usize,
    },

    /// Returned when a feature schema does not cover the dataset's columns.
    #[error("feature schema describes {expected} columns, dataset has {got}")]
    SchemaSizeMismatch {
        /// The number of columns described by the schema.
        expected: usize,
        /// The number of feature columns in the dataset.
        got: usize,
    },

    /// Returned when a continuous column holds a textual value.
    #[error("continuous feature \"{feature}\" has non-numeric value \"{value}\" at sample {sample_index}")]
    MixedColumnType {
        /// Name of the offending feature column.
        feature: String,
        /// The textual value found.
        value: String,
        /// The zero-based index of the offending sample.
        sample_index: usize,
    },

    /// Returned when two sequences that must align have different lengths.
    #[error("length mismatch: {left} vs {right}")]
    LengthMismatch {
        /// Length of the first sequence.
        left: usize,
        /// Length of the second sequence.
        right: usize,
    },

    /// Returned when an example lacks a feature column referenced by a tree.
    #[error("example has no column named \"{feature}\"")]
    SchemaMismatch {
        /// Name of the missing feature column.
        feature: String,
    },

    /// Returned when a textual value reaches a `<=` question.
    #[error("feature \"{feature}\" expects a number, got \"{value}\"")]
    NonNumericValue {
        /// Name of the feature being compared.
        feature: String,
        /// The value that could not be compared numerically.
        value: String,
    },

    /// Returned when a best-split search is asked to choose among zero candidates.
    #[error("no split candidates for a partition of {n_samples} samples")]
    EmptyPartition {
        /// Number of samples in the partition.
        n_samples: usize,
    },
}
