//! Random Forest classification with entropy decision trees.
//!
//! Trains an ensemble of recursive entropy-minimizing decision trees on
//! bootstrap samples of a labelled [`Dataset`], then predicts by majority
//! vote. Features are numeric or textual; each column is classified once per
//! run as continuous (split with `<=`) or categorical (split with `=`).
//!
//! ```no_run
//! use sylva_rf::{Dataset, RandomForestConfig, TestSize, Value, accuracy, train_test_split};
//! use rand::SeedableRng;
//!
//! # fn main() -> Result<(), sylva_rf::RfError> {
//! let dataset = Dataset::new(
//!     vec!["petal_width".to_string()],
//!     "label",
//!     vec![vec![Value::from(0.2)], vec![Value::from(1.8)]],
//!     vec![Value::from("setosa"), Value::from("virginica")],
//! )?;
//! let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(0);
//! let (train, test) = train_test_split(&dataset, TestSize::Count(1), &mut rng)?;
//! let result = RandomForestConfig::new(4)?.with_max_depth(4).fit(&train)?;
//! let predictions = result.forest().predict_batch(&test)?;
//! println!("accuracy = {}", accuracy(&predictions, test.labels())?);
//! # Ok(())
//! # }
//! ```

mod config;
mod dataset;
mod entropy;
mod error;
mod eval;
mod feature;
mod forest;
mod node;
mod predict;
mod result;
mod sampling;
mod split;
mod tree;
mod value;

pub use config::RandomForestConfig;
pub use dataset::Dataset;
pub use entropy::{class_counts, entropy, entropy_from_counts, weighted_entropy};
pub use error::RfError;
pub use eval::accuracy;
pub use feature::{CATEGORICAL_DISTINCT_THRESHOLD, FeatureDescriptor, FeatureKind, FeatureSchema};
pub use forest::RandomForest;
pub use node::{Comparison, FeatureIndex, Node, Question};
pub use predict::{ColumnLayout, Example, aggregate_votes, majority_vote};
pub use result::{RandomForestResult, TrainingMetadata};
pub use sampling::{TestSize, bootstrap_sample, train_test_split};
pub use split::SplitCandidates;
pub use tree::{DecisionTree, DecisionTreeConfig};
pub use value::Value;
