//! Prediction methods for the Random Forest ensemble.

use std::collections::{BTreeMap, HashMap};

use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

use crate::dataset::Dataset;
use crate::error::RfError;
use crate::forest::RandomForest;
use crate::value::Value;

/// Column name → position lookup for rows presented at prediction time.
///
/// Trees address features by name, so rows only need to carry every column
/// a tree asks about, in any order.
#[derive(Debug, Clone)]
pub struct ColumnLayout {
    positions: HashMap<String, usize>,
}

impl ColumnLayout {
    /// Build a layout from column names in row order.
    ///
    /// A repeated name resolves to its first position.
    #[must_use]
    pub fn new(names: &[String]) -> Self {
        let mut positions = HashMap::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            positions.entry(name.clone()).or_insert(i);
        }
        Self { positions }
    }

    /// Build the layout of a dataset's feature columns.
    #[must_use]
    pub fn from_dataset(dataset: &Dataset) -> Self {
        Self::new(dataset.feature_names())
    }

    /// View one row through this layout.
    #[must_use]
    pub fn example<'a>(&'a self, values: &'a [Value]) -> Example<'a> {
        Example {
            layout: self,
            values,
        }
    }
}

/// One row of feature values addressed by column name.
#[derive(Debug, Clone, Copy)]
pub struct Example<'a> {
    layout: &'a ColumnLayout,
    values: &'a [Value],
}

impl Example<'_> {
    /// Return the value of the column called `name`, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.layout
            .positions
            .get(name)
            .and_then(|&i| self.values.get(i))
    }
}

/// Most frequent value of `votes`.
///
/// Among equally frequent values, the one that occurs first wins. Returns
/// `None` for an empty slice.
#[must_use]
pub fn majority_vote(votes: &[Value]) -> Option<&Value> {
    // (first position, count) per distinct vote.
    let mut tally: BTreeMap<&Value, (usize, usize)> = BTreeMap::new();
    for (i, vote) in votes.iter().enumerate() {
        tally.entry(vote).or_insert((i, 0)).1 += 1;
    }
    tally
        .into_iter()
        .max_by(|(_, (first_a, count_a)), (_, (first_b, count_b))| {
            count_a.cmp(count_b).then(first_b.cmp(first_a))
        })
        .map(|(vote, _)| vote)
}

/// Combine per-tree prediction columns into one ensemble prediction per row.
///
/// `columns[t][r]` is tree `t`'s prediction for row `r`. Row `r` receives
/// the [`majority_vote`] of `columns[0][r], columns[1][r], ...`.
///
/// # Errors
///
/// | Variant                     | When                                    |
/// |-----------------------------|-----------------------------------------|
/// | [`RfError::EmptyDataset`]   | `columns` is empty                      |
/// | [`RfError::LengthMismatch`] | two columns have different lengths      |
pub fn aggregate_votes(columns: &[Vec<Value>]) -> Result<Vec<Value>, RfError> {
    let first = columns.first().ok_or(RfError::EmptyDataset)?;
    let n_rows = first.len();
    if let Some(column) = columns.iter().find(|c| c.len() != n_rows) {
        return Err(RfError::LengthMismatch {
            left: n_rows,
            right: column.len(),
        });
    }

    let mut votes = Vec::with_capacity(columns.len());
    let mut predictions = Vec::with_capacity(n_rows);
    for r in 0..n_rows {
        votes.clear();
        votes.extend(columns.iter().map(|c| c[r].clone()));
        let winner = majority_vote(&votes).ok_or(RfError::EmptyDataset)?;
        predictions.push(winner.clone());
    }
    Ok(predictions)
}

impl RandomForest {
    /// Predict the label of one example by majority vote over all trees.
    ///
    /// # Errors
    ///
    /// Returns the first error of [`crate::DecisionTree::predict`], in tree
    /// order.
    pub fn predict(&self, example: &Example<'_>) -> Result<Value, RfError> {
        let votes = self
            .trees
            .iter()
            .map(|tree| tree.predict(example))
            .collect::<Result<Vec<_>, _>>()?;
        majority_vote(&votes)
            .cloned()
            .ok_or(RfError::InvalidTreeCount { n_trees: 0 })
    }

    /// Predict labels for every row of `dataset` in parallel.
    ///
    /// Output order equals row order. Columns are matched by name.
    ///
    /// # Errors
    ///
    /// Returns the first error of [`RandomForest::predict`].
    pub fn predict_batch(&self, dataset: &Dataset) -> Result<Vec<Value>, RfError> {
        let layout = ColumnLayout::from_dataset(dataset);
        self.predict_rows(&layout, dataset.features())
    }

    /// Predict labels for raw rows described by `layout`, in parallel.
    ///
    /// # Errors
    ///
    /// Returns the first error of [`RandomForest::predict`].
    pub fn predict_rows(
        &self,
        layout: &ColumnLayout,
        rows: &[Vec<Value>],
    ) -> Result<Vec<Value>, RfError> {
        rows.par_iter()
            .map(|row| self.predict(&layout.example(row)))
            .collect()
    }

    /// Return each tree's predictions for every row of `dataset`.
    ///
    /// Element `t` holds tree `t`'s predictions in row order. Trees are
    /// evaluated in parallel.
    ///
    /// # Errors
    ///
    /// Returns the first error of [`crate::DecisionTree::predict_batch`].
    pub fn tree_predictions(&self, dataset: &Dataset) -> Result<Vec<Vec<Value>>, RfError> {
        self.trees
            .par_iter()
            .map(|tree| tree.predict_batch(dataset))
            .collect()
    }
}
