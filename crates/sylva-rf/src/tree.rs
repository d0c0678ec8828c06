use std::collections::BTreeMap;
use std::fmt;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, instrument, trace};

use crate::{
    RfError,
    dataset::Dataset,
    entropy::class_counts,
    feature::FeatureSchema,
    node::{Node, Question},
    predict::{ColumnLayout, Example},
    split::{best_split, potential_splits},
    value::Value,
};

/// Configuration for a single entropy decision tree.
///
/// Construct via [`DecisionTreeConfig::new`], then chain `with_*` methods.
///
/// # Defaults
///
/// | Parameter     | Default               |
/// |---------------|-----------------------|
/// | `n_features`  | `None` (all features) |
/// | `max_depth`   | 5                     |
/// | `min_samples` | 2                     |
/// | `seed`        | 42                    |
#[derive(Debug, Clone)]
pub struct DecisionTreeConfig {
    pub(crate) n_features: Option<usize>,
    pub(crate) max_depth: usize,
    pub(crate) min_samples: usize,
    pub(crate) seed: u64,
}

impl DecisionTreeConfig {
    /// Create a new config with default values.
    ///
    /// All parameters use the defaults shown in the struct-level documentation.
    #[must_use]
    pub fn new() -> Self {
        Self {
            n_features: None,
            max_depth: 5,
            min_samples: 2,
            seed: 42,
        }
    }

    /// Set the number of randomly chosen features considered at each split.
    ///
    /// `None` means consider all features. A count larger than the number
    /// of features also means all of them.
    #[must_use]
    pub fn with_n_features(mut self, n_features: Option<usize>) -> Self {
        self.n_features = n_features;
        self
    }

    /// Set the maximum tree depth.
    ///
    /// The root is depth 0; `0` produces a single leaf.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the minimum number of samples a partition needs to be split.
    #[must_use]
    pub fn with_min_samples(mut self, min_samples: usize) -> Self {
        self.min_samples = min_samples;
        self
    }

    /// Set the random seed for reproducibility.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    // --- Getters ---

    /// Return the per-split feature count, if set.
    #[must_use]
    pub fn n_features(&self) -> Option<usize> {
        self.n_features
    }

    /// Return the maximum depth.
    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Return the minimum samples required to split a partition.
    #[must_use]
    pub fn min_samples(&self) -> usize {
        self.min_samples
    }

    /// Return the random seed.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Train a decision tree, inferring feature kinds from `dataset`.
    ///
    /// # Errors
    ///
    /// | Variant                            | When                                         |
    /// |------------------------------------|----------------------------------------------|
    /// | [`RfError::InvalidFeatureCount`]   | `n_features` is `Some(0)`                    |
    /// | [`RfError::InvalidMinSamples`]     | `min_samples` is 0                           |
    /// | [`RfError::MixedColumnType`]       | a continuous column contains a textual value |
    pub fn fit(&self, dataset: &Dataset) -> Result<DecisionTree, RfError> {
        let schema = FeatureSchema::infer(dataset)?;
        self.fit_with_schema(dataset, &schema)
    }

    /// Train a decision tree with precomputed feature kinds.
    ///
    /// # Errors
    ///
    /// As [`DecisionTreeConfig::fit`], plus [`RfError::SchemaSizeMismatch`]
    /// when `schema` does not describe every column of `dataset`.
    #[instrument(skip_all, fields(n_samples = dataset.n_samples()))]
    pub fn fit_with_schema(
        &self,
        dataset: &Dataset,
        schema: &FeatureSchema,
    ) -> Result<DecisionTree, RfError> {
        self.validate()?;
        schema.validate(dataset)?;
        let sample_indices: Vec<usize> = (0..dataset.n_samples()).collect();
        self.grow(dataset, schema, &sample_indices)
    }

    /// Check the tree-level parameters.
    pub(crate) fn validate(&self) -> Result<(), RfError> {
        if let Some(n_features) = self.n_features
            && n_features == 0
        {
            return Err(RfError::InvalidFeatureCount { n_features });
        }
        if self.min_samples == 0 {
            return Err(RfError::InvalidMinSamples {
                min_samples: self.min_samples,
            });
        }
        Ok(())
    }

    /// Grow a tree on the rows `sample_indices` (repeats allowed).
    ///
    /// Inputs are assumed validated.
    pub(crate) fn grow(
        &self,
        dataset: &Dataset,
        schema: &FeatureSchema,
        sample_indices: &[usize],
    ) -> Result<DecisionTree, RfError> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let root = build_tree(dataset, schema, self, sample_indices, 0, &mut rng)?;

        debug!(
            n_samples = sample_indices.len(),
            depth = root.depth(),
            n_leaves = root.n_leaves(),
            "decision tree built"
        );

        Ok(DecisionTree {
            root,
            n_features: dataset.n_features(),
        })
    }
}

impl Default for DecisionTreeConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Most frequent label; ties go to the lowest label.
fn majority_label<'a>(counts: &BTreeMap<&'a Value, usize>) -> Option<&'a Value> {
    let mut best: Option<(&Value, usize)> = None;
    for (&label, &count) in counts {
        if best.is_none_or(|(_, c)| count > c) {
            best = Some((label, count));
        }
    }
    best.map(|(label, _)| label)
}

/// Recursively build the decision structure for one partition.
fn build_tree(
    dataset: &Dataset,
    schema: &FeatureSchema,
    config: &DecisionTreeConfig,
    sample_indices: &[usize],
    depth: usize,
    rng: &mut ChaCha8Rng,
) -> Result<Node, RfError> {
    let counts = class_counts(sample_indices.iter().map(|&si| dataset.label(si)));
    let make_leaf = || -> Result<Node, RfError> {
        let prediction = majority_label(&counts).ok_or(RfError::EmptyPartition {
            n_samples: sample_indices.len(),
        })?;
        Ok(Node::Leaf {
            prediction: prediction.clone(),
        })
    };

    // Stopping conditions → leaf.
    let pure = counts.len() == 1;
    let too_few = sample_indices.len() < config.min_samples;
    let depth_reached = depth >= config.max_depth;

    if pure || too_few || depth_reached {
        return make_leaf();
    }

    let candidates = potential_splits(dataset, sample_indices, config.n_features, rng);
    let split = best_split(dataset, schema, sample_indices, &candidates)?;

    if split.is_degenerate() {
        return make_leaf();
    }

    trace!(
        depth,
        feature = %split.feature,
        weighted_entropy = split.weighted_entropy,
        n_below = split.below.len(),
        n_above = split.above.len(),
        "split chosen"
    );

    let yes = build_tree(dataset, schema, config, &split.below, depth + 1, rng)?;
    let no = build_tree(dataset, schema, config, &split.above, depth + 1, rng)?;

    if yes == no {
        return Ok(yes);
    }

    Ok(Node::Decision {
        question: Question::new(schema.get(split.feature), split.value.clone()),
        yes: Box::new(yes),
        no: Box::new(no),
    })
}

/// A fitted entropy decision tree.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionTree {
    pub(crate) root: Node,
    pub(crate) n_features: usize,
}

impl DecisionTree {
    /// Predict the label of one example.
    ///
    /// Descends from the root: at each decision, follows `yes` when the
    /// example answers the question, `no` otherwise.
    ///
    /// # Errors
    ///
    /// | Variant                      | When                                             |
    /// |------------------------------|--------------------------------------------------|
    /// | [`RfError::SchemaMismatch`]  | the example lacks a column used by the tree      |
    /// | [`RfError::NonNumericValue`] | a textual value reaches a `<=` question          |
    pub fn predict(&self, example: &Example<'_>) -> Result<Value, RfError> {
        let mut node = &self.root;
        loop {
            match node {
                Node::Leaf { prediction } => return Ok(prediction.clone()),
                Node::Decision { question, yes, no } => {
                    node = if question.ask(example)? { yes } else { no };
                }
            }
        }
    }

    /// Predict the label of every row of `dataset`, in row order.
    ///
    /// Columns are matched by name, so `dataset` may order or extend its
    /// columns differently from the training data.
    ///
    /// # Errors
    ///
    /// Returns the first error of [`DecisionTree::predict`].
    pub fn predict_batch(&self, dataset: &Dataset) -> Result<Vec<Value>, RfError> {
        let layout = ColumnLayout::new(dataset.feature_names());
        dataset
            .features()
            .iter()
            .map(|row| self.predict(&layout.example(row)))
            .collect()
    }

    /// Return the root node.
    #[must_use]
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Return the number of feature columns the tree was trained on.
    #[must_use]
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Return the total number of nodes in the tree (both decisions and leaves).
    #[must_use]
    pub fn n_nodes(&self) -> usize {
        self.root.n_nodes()
    }

    /// Return the number of leaf nodes.
    #[must_use]
    pub fn n_leaves(&self) -> usize {
        self.root.n_leaves()
    }

    /// Return the maximum depth of the tree.
    ///
    /// A single-node tree (just a root leaf) has depth 0.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// Render the tree as indented text, one question or leaf per line.
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }
}

fn write_node(f: &mut fmt::Formatter<'_>, node: &Node, indent: usize, tag: &str) -> fmt::Result {
    let pad = "  ".repeat(indent);
    match node {
        Node::Leaf { prediction } => writeln!(f, "{pad}{tag}{prediction}"),
        Node::Decision { question, yes, no } => {
            writeln!(f, "{pad}{tag}{question}")?;
            write_node(f, yes, indent + 1, "yes: ")?;
            write_node(f, no, indent + 1, "no: ")
        }
    }
}

impl fmt::Display for DecisionTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_node(f, &self.root, 0, "")
    }
}
