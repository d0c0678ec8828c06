use std::collections::{BTreeMap, BTreeSet};

use rand::Rng;

use crate::dataset::Dataset;
use crate::entropy::weighted_entropy;
use crate::error::RfError;
use crate::feature::FeatureSchema;
use crate::node::{Comparison, FeatureIndex};
use crate::value::Value;

/// Distinct values observed per candidate feature in one partition.
///
/// Iterates in ascending feature index, and within a feature in ascending
/// value order: the order in which the best-split search visits candidates.
pub type SplitCandidates<'a> = BTreeMap<FeatureIndex, BTreeSet<&'a Value>>;

/// Result of the best-split search for a partition.
#[derive(Debug, Clone)]
pub(crate) struct SplitResult<'a> {
    /// Feature used for the split.
    pub(crate) feature: FeatureIndex,
    /// Threshold or category the split was made on.
    pub(crate) value: &'a Value,
    /// Weighted post-split entropy.
    pub(crate) weighted_entropy: f64,
    /// Sample indices answering "yes".
    pub(crate) below: Vec<usize>,
    /// Sample indices answering "no".
    pub(crate) above: Vec<usize>,
}

impl SplitResult<'_> {
    /// Return `true` when the split left one side empty.
    pub(crate) fn is_degenerate(&self) -> bool {
        self.below.is_empty() || self.above.is_empty()
    }
}

/// Collect the split candidates of a partition.
///
/// With `n_features = Some(k)` and `k` no larger than the number of feature
/// columns, `k` columns are drawn uniformly without replacement and only
/// those are candidates. Otherwise every column is.
///
/// # Layout
///
/// `dataset` is row-major; `partition` holds row indices into it and may
/// contain repeats (bootstrap samples do).
pub(crate) fn potential_splits<'a>(
    dataset: &'a Dataset,
    partition: &[usize],
    n_features: Option<usize>,
    rng: &mut impl Rng,
) -> SplitCandidates<'a> {
    let total = dataset.n_features();

    let selected: Vec<usize> = match n_features {
        Some(k) if k <= total => {
            // Partial Fisher-Yates: shuffle only the first `k` positions.
            let mut order: Vec<usize> = (0..total).collect();
            for i in 0..k {
                let j = rng.gen_range(i..total);
                order.swap(i, j);
            }
            order.truncate(k);
            order
        }
        _ => (0..total).collect(),
    };

    selected
        .into_iter()
        .map(|i| {
            let feature = FeatureIndex::new(i);
            let values: BTreeSet<&Value> = partition
                .iter()
                .map(|&si| dataset.value(si, feature))
                .collect();
            (feature, values)
        })
        .collect()
}

/// Divide a partition on `feature` at `value`.
///
/// Continuous features send `x <= value` to `below`; categorical features
/// send `x == value` to `below`. Everything else goes to `above`. Both sides
/// keep the input order and together hold exactly the input indices.
pub(crate) fn partition(
    dataset: &Dataset,
    schema: &FeatureSchema,
    partition: &[usize],
    feature: FeatureIndex,
    value: &Value,
) -> (Vec<usize>, Vec<usize>) {
    let comparison = Comparison::for_kind(schema.kind(feature));
    partition
        .iter()
        .partition(|&&si| comparison.holds(dataset.value(si, feature), value))
}

/// Find the candidate with the lowest weighted entropy.
///
/// Candidates are visited feature by feature, values ascending. A candidate
/// only replaces the incumbent when strictly better, so the first of several
/// tied candidates wins. Degenerate candidates (one empty side) compete like
/// any other.
///
/// # Errors
///
/// Returns [`RfError::EmptyPartition`] when `candidates` holds no value.
pub(crate) fn best_split<'a>(
    dataset: &Dataset,
    schema: &FeatureSchema,
    rows: &[usize],
    candidates: &SplitCandidates<'a>,
) -> Result<SplitResult<'a>, RfError> {
    let mut best: Option<(FeatureIndex, &'a Value, f64)> = None;

    for (&feature, values) in candidates {
        let comparison = Comparison::for_kind(schema.kind(feature));
        for &value in values {
            let goes_below = |si: usize| comparison.holds(dataset.value(si, feature), value);
            let below = rows.iter().filter(|&&si| goes_below(si)).map(|&si| dataset.label(si));
            let above = rows.iter().filter(|&&si| !goes_below(si)).map(|&si| dataset.label(si));
            let score = weighted_entropy(below, above);

            if best.is_none_or(|(_, _, incumbent)| score < incumbent) {
                best = Some((feature, value, score));
            }
        }
    }

    let (feature, value, score) = best.ok_or(RfError::EmptyPartition {
        n_samples: rows.len(),
    })?;
    let (below, above) = partition(dataset, schema, rows, feature, value);

    Ok(SplitResult {
        feature,
        value,
        weighted_entropy: score,
        below,
        above,
    })
}
