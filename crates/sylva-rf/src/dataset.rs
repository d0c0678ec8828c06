//! Row-major labelled table consumed by training and prediction.

use std::collections::BTreeSet;

use crate::error::RfError;
use crate::node::FeatureIndex;
use crate::value::Value;

/// An immutable labelled dataset.
///
/// `features[sample_idx][feature_idx]`: row-major layout, columns ordered
/// like `feature_names`. `labels[sample_idx]` is the label of each row.
/// Partitions and bootstrap samples refer to rows by index; the rows
/// themselves are never rewritten.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    feature_names: Vec<String>,
    label_name: String,
    features: Vec<Vec<Value>>,
    labels: Vec<Value>,
}

impl Dataset {
    /// Build a dataset from named feature columns and one label per row.
    ///
    /// # Errors
    ///
    /// | Variant                           | When                                   |
    /// |-----------------------------------|----------------------------------------|
    /// | [`RfError::EmptyDataset`]         | `features` is empty                    |
    /// | [`RfError::ZeroFeatures`]         | `feature_names` is empty               |
    /// | [`RfError::FeatureCountMismatch`] | a row's length differs from the header |
    /// | [`RfError::LabelCountMismatch`]   | `labels.len() != features.len()`       |
    pub fn new(
        feature_names: Vec<String>,
        label_name: impl Into<String>,
        features: Vec<Vec<Value>>,
        labels: Vec<Value>,
    ) -> Result<Self, RfError> {
        if features.is_empty() {
            return Err(RfError::EmptyDataset);
        }
        if feature_names.is_empty() {
            return Err(RfError::ZeroFeatures);
        }
        let n_features = feature_names.len();
        for (sample_index, row) in features.iter().enumerate() {
            if row.len() != n_features {
                return Err(RfError::FeatureCountMismatch {
                    expected: n_features,
                    got: row.len(),
                    sample_index,
                });
            }
        }
        if labels.len() != features.len() {
            return Err(RfError::LabelCountMismatch {
                n_samples: features.len(),
                n_labels: labels.len(),
            });
        }
        Ok(Self {
            feature_names,
            label_name: label_name.into(),
            features,
            labels,
        })
    }

    /// Return a new dataset holding the given rows, in the given order.
    ///
    /// Indices may repeat. The caller guarantees `indices` is non-empty and
    /// in range.
    pub(crate) fn select(&self, indices: &[usize]) -> Self {
        Self {
            feature_names: self.feature_names.clone(),
            label_name: self.label_name.clone(),
            features: indices.iter().map(|&i| self.features[i].clone()).collect(),
            labels: indices.iter().map(|&i| self.labels[i].clone()).collect(),
        }
    }

    /// Return the feature column names.
    #[must_use]
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Return the label column name.
    #[must_use]
    pub fn label_name(&self) -> &str {
        &self.label_name
    }

    /// Return the feature rows.
    #[must_use]
    pub fn features(&self) -> &[Vec<Value>] {
        &self.features
    }

    /// Return the labels, one per row.
    #[must_use]
    pub fn labels(&self) -> &[Value] {
        &self.labels
    }

    /// Return the number of rows.
    #[must_use]
    pub fn n_samples(&self) -> usize {
        self.features.len()
    }

    /// Return the number of feature columns.
    #[must_use]
    pub fn n_features(&self) -> usize {
        self.feature_names.len()
    }

    /// Return the number of distinct labels.
    #[must_use]
    pub fn n_classes(&self) -> usize {
        self.labels.iter().collect::<BTreeSet<_>>().len()
    }

    /// Return the value of `feature` in row `sample`.
    #[must_use]
    pub fn value(&self, sample: usize, feature: FeatureIndex) -> &Value {
        &self.features[sample][feature.index()]
    }

    /// Return the label of row `sample`.
    #[must_use]
    pub fn label(&self, sample: usize) -> &Value {
        &self.labels[sample]
    }

    /// Iterate over the values of one feature column, top to bottom.
    pub fn column(&self, feature: FeatureIndex) -> impl Iterator<Item = &Value> + '_ {
        self.features.iter().map(move |row| &row[feature.index()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(n: &[&str]) -> Vec<String> {
        n.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn valid_dataset() {
        let ds = Dataset::new(
            names(&["x", "color"]),
            "label",
            vec![
                vec![Value::from(1.0), Value::from("red")],
                vec![Value::from(2.0), Value::from("blue")],
            ],
            vec![Value::from("A"), Value::from("B")],
        )
        .unwrap();
        assert_eq!(ds.n_samples(), 2);
        assert_eq!(ds.n_features(), 2);
        assert_eq!(ds.n_classes(), 2);
        assert_eq!(ds.label_name(), "label");
        assert_eq!(ds.value(1, FeatureIndex::new(1)), &Value::from("blue"));
        let column: Vec<&Value> = ds.column(FeatureIndex::new(0)).collect();
        assert_eq!(column, vec![&Value::from(1.0), &Value::from(2.0)]);
    }

    #[test]
    fn empty_dataset_error() {
        let err = Dataset::new(names(&["x"]), "label", vec![], vec![]).unwrap_err();
        assert!(matches!(err, RfError::EmptyDataset));
    }

    #[test]
    fn zero_features_error() {
        let err = Dataset::new(vec![], "label", vec![vec![]], vec![Value::from("A")]).unwrap_err();
        assert!(matches!(err, RfError::ZeroFeatures));
    }

    #[test]
    fn feature_count_mismatch_error() {
        let err = Dataset::new(
            names(&["x", "y"]),
            "label",
            vec![vec![Value::from(1.0), Value::from(2.0)], vec![Value::from(3.0)]],
            vec![Value::from("A"), Value::from("B")],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            RfError::FeatureCountMismatch { expected: 2, got: 1, sample_index: 1 }
        ));
    }

    #[test]
    fn label_count_mismatch_error() {
        let err = Dataset::new(
            names(&["x"]),
            "label",
            vec![vec![Value::from(1.0)], vec![Value::from(2.0)]],
            vec![Value::from("A")],
        )
        .unwrap_err();
        assert!(matches!(err, RfError::LabelCountMismatch { n_samples: 2, n_labels: 1 }));
    }

    #[test]
    fn select_keeps_order_and_duplicates() {
        let ds = Dataset::new(
            names(&["x"]),
            "label",
            vec![vec![Value::from(1.0)], vec![Value::from(2.0)], vec![Value::from(3.0)]],
            vec![Value::from("A"), Value::from("B"), Value::from("C")],
        )
        .unwrap();
        let picked = ds.select(&[2, 0, 2]);
        assert_eq!(
            picked.labels(),
            &[Value::from("C"), Value::from("A"), Value::from("C")]
        );
        assert_eq!(picked.feature_names(), ds.feature_names());
    }
}
