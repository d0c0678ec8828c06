//! Feature type classification: the per-run schema shared by every tree.

use std::collections::BTreeSet;

use tracing::{debug, instrument};

use crate::dataset::Dataset;
use crate::error::RfError;
use crate::node::FeatureIndex;

/// Columns with at most this many distinct values are treated as categorical.
pub const CATEGORICAL_DISTINCT_THRESHOLD: usize = 15;

/// Whether a feature is split by threshold or by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKind {
    /// Split with `value == category`.
    Categorical,
    /// Split with `value <= threshold`.
    Continuous,
}

/// A feature column's position, name and kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureDescriptor {
    index: FeatureIndex,
    name: String,
    kind: FeatureKind,
}

impl FeatureDescriptor {
    /// Create a descriptor for the column at zero-based position `index`.
    #[must_use]
    pub fn new(index: usize, name: impl Into<String>, kind: FeatureKind) -> Self {
        Self {
            index: FeatureIndex::new(index),
            name: name.into(),
            kind,
        }
    }

    /// Return the column index.
    #[must_use]
    pub fn index(&self) -> FeatureIndex {
        self.index
    }

    /// Return the column name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return the feature kind.
    #[must_use]
    pub fn kind(&self) -> FeatureKind {
        self.kind
    }
}

/// The feature descriptors of one training run.
///
/// Computed once from the full training set and then only read: every
/// recursive builder call and every tree of a forest sees the same schema,
/// even though each tree trains on a different bootstrap sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSchema {
    descriptors: Vec<FeatureDescriptor>,
}

impl FeatureSchema {
    /// Classify every feature column of `dataset`.
    ///
    /// A column is categorical when its first value is textual or when it
    /// holds at most [`CATEGORICAL_DISTINCT_THRESHOLD`] distinct values;
    /// otherwise it is continuous.
    ///
    /// # Errors
    ///
    /// Returns [`RfError::MixedColumnType`] when a continuous column contains
    /// a textual value.
    #[instrument(skip_all, fields(n_features = dataset.n_features()))]
    pub fn infer(dataset: &Dataset) -> Result<Self, RfError> {
        let descriptors: Vec<FeatureDescriptor> = dataset
            .feature_names()
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let feature = FeatureIndex::new(i);
                let first_is_text = dataset.value(0, feature).is_text();
                let n_distinct = dataset.column(feature).collect::<BTreeSet<_>>().len();
                let kind = if first_is_text || n_distinct <= CATEGORICAL_DISTINCT_THRESHOLD {
                    FeatureKind::Categorical
                } else {
                    FeatureKind::Continuous
                };
                FeatureDescriptor::new(i, name.clone(), kind)
            })
            .collect();

        let schema = Self { descriptors };
        schema.validate(dataset)?;

        debug!(
            n_continuous = schema.n_continuous(),
            n_categorical = schema.n_categorical(),
            "feature types inferred"
        );

        Ok(schema)
    }

    /// Build a schema from explicit descriptors.
    ///
    /// Descriptor `i` must describe column `i`; the descriptors are
    /// re-indexed by position.
    #[must_use]
    pub fn from_descriptors(descriptors: Vec<FeatureDescriptor>) -> Self {
        let descriptors = descriptors
            .into_iter()
            .enumerate()
            .map(|(i, d)| FeatureDescriptor::new(i, d.name, d.kind))
            .collect();
        Self { descriptors }
    }

    /// Check that this schema can drive training on `dataset`.
    ///
    /// # Errors
    ///
    /// | Variant                        | When                                         |
    /// |--------------------------------|----------------------------------------------|
    /// | [`RfError::SchemaSizeMismatch`] | the column counts differ                    |
    /// | [`RfError::MixedColumnType`]   | a continuous column contains a textual value |
    pub fn validate(&self, dataset: &Dataset) -> Result<(), RfError> {
        if self.descriptors.len() != dataset.n_features() {
            return Err(RfError::SchemaSizeMismatch {
                expected: self.descriptors.len(),
                got: dataset.n_features(),
            });
        }
        for descriptor in &self.descriptors {
            if descriptor.kind != FeatureKind::Continuous {
                continue;
            }
            if let Some((sample_index, value)) = dataset
                .column(descriptor.index)
                .enumerate()
                .find(|(_, v)| v.is_text())
            {
                return Err(RfError::MixedColumnType {
                    feature: descriptor.name.clone(),
                    value: value.to_string(),
                    sample_index,
                });
            }
        }
        Ok(())
    }

    /// Return all descriptors in column order.
    #[must_use]
    pub fn descriptors(&self) -> &[FeatureDescriptor] {
        &self.descriptors
    }

    /// Return the descriptor of one column.
    ///
    /// `feature` must index a described column.
    #[must_use]
    pub(crate) fn get(&self, feature: FeatureIndex) -> &FeatureDescriptor {
        &self.descriptors[feature.index()]
    }

    /// Return the kind of one column.
    ///
    /// `feature` must index a described column.
    #[must_use]
    pub(crate) fn kind(&self, feature: FeatureIndex) -> FeatureKind {
        self.descriptors[feature.index()].kind
    }

    /// Return the number of described columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Return `true` if the schema describes no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Return the number of continuous columns.
    #[must_use]
    pub fn n_continuous(&self) -> usize {
        self.descriptors
            .iter()
            .filter(|d| d.kind == FeatureKind::Continuous)
            .count()
    }

    /// Return the number of categorical columns.
    #[must_use]
    pub fn n_categorical(&self) -> usize {
        self.len() - self.n_continuous()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    fn dataset(columns: Vec<Vec<Value>>) -> Dataset {
        let n_rows = columns[0].len();
        let names = (0..columns.len()).map(|i| format!("f{i}")).collect();
        let rows = (0..n_rows)
            .map(|r| columns.iter().map(|c| c[r].clone()).collect())
            .collect();
        let labels = (0..n_rows).map(|r| Value::from((r % 2) as f64)).collect();
        Dataset::new(names, "label", rows, labels).unwrap()
    }

    fn numbers(n: usize) -> Vec<Value> {
        (0..n).map(|i| Value::from(i as f64 * 0.5)).collect()
    }

    #[test]
    fn many_distinct_numbers_are_continuous() {
        let schema = FeatureSchema::infer(&dataset(vec![numbers(16)])).unwrap();
        assert_eq!(schema.kind(FeatureIndex::new(0)), FeatureKind::Continuous);
    }

    #[test]
    fn fifteen_distinct_numbers_are_categorical() {
        let schema = FeatureSchema::infer(&dataset(vec![numbers(15)])).unwrap();
        assert_eq!(schema.kind(FeatureIndex::new(0)), FeatureKind::Categorical);
    }

    #[test]
    fn textual_first_value_is_categorical() {
        let mut col: Vec<Value> = numbers(20);
        col[0] = Value::from("first");
        let schema = FeatureSchema::infer(&dataset(vec![col])).unwrap();
        assert_eq!(schema.kind(FeatureIndex::new(0)), FeatureKind::Categorical);
    }

    #[test]
    fn later_text_in_continuous_column_is_rejected() {
        let mut col: Vec<Value> = numbers(20);
        col[7] = Value::from("oops");
        let err = FeatureSchema::infer(&dataset(vec![col])).unwrap_err();
        assert!(matches!(
            err,
            RfError::MixedColumnType { ref feature, sample_index: 7, .. } if feature == "f0"
        ));
    }

    #[test]
    fn preserves_column_order_and_names() {
        let as_text: Vec<Value> = numbers(20)
            .into_iter()
            .map(|v| Value::from(v.to_string()))
            .collect();
        let schema = FeatureSchema::infer(&dataset(vec![numbers(20), as_text])).unwrap();
        assert_eq!(schema.len(), 2);
        assert_eq!(schema.descriptors()[0].name(), "f0");
        assert_eq!(schema.descriptors()[1].name(), "f1");
        assert_eq!(schema.n_continuous(), 1);
        assert_eq!(schema.n_categorical(), 1);
    }

    #[test]
    fn from_descriptors_reindexes_by_position() {
        let schema = FeatureSchema::from_descriptors(vec![
            FeatureDescriptor::new(5, "a", FeatureKind::Continuous),
            FeatureDescriptor::new(9, "b", FeatureKind::Categorical),
        ]);
        assert_eq!(schema.get(FeatureIndex::new(1)).index().index(), 1);
        assert_eq!(schema.get(FeatureIndex::new(1)).name(), "b");
    }

    #[test]
    fn validate_rejects_wrong_width() {
        let schema = FeatureSchema::from_descriptors(vec![
            FeatureDescriptor::new(0, "a", FeatureKind::Continuous),
            FeatureDescriptor::new(1, "b", FeatureKind::Continuous),
        ]);
        let err = schema.validate(&dataset(vec![numbers(4)])).unwrap_err();
        assert!(matches!(err, RfError::SchemaSizeMismatch { expected: 2, got: 1 }));
    }
}
