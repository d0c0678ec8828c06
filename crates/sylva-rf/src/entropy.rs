//! Shannon entropy of label distributions.

use std::collections::BTreeMap;

use crate::value::Value;

/// Count how many times each label occurs, keyed in ascending label order.
#[must_use]
pub fn class_counts<'a>(labels: impl IntoIterator<Item = &'a Value>) -> BTreeMap<&'a Value, usize> {
    let mut counts = BTreeMap::new();
    for label in labels {
        *counts.entry(label).or_insert(0) += 1;
    }
    counts
}

/// Entropy in bits of a distribution given by class counts.
///
/// `-Σ(p_i · log2(p_i))` summed only over classes where `p_i > 0`.
/// Returns 0.0 when `n_samples` is zero.
#[must_use]
pub fn entropy_from_counts(counts: impl IntoIterator<Item = usize>, n_samples: usize) -> f64 {
    if n_samples == 0 {
        return 0.0;
    }
    let n = n_samples as f64;
    let sum: f64 = counts
        .into_iter()
        .filter(|&c| c > 0)
        .map(|c| {
            let p = c as f64 / n;
            p * p.log2()
        })
        .sum();
    // Avoid reporting -0.0 for pure partitions.
    if sum == 0.0 { 0.0 } else { -sum }
}

/// Entropy in bits of a sequence of labels.
#[must_use]
pub fn entropy<'a>(labels: impl IntoIterator<Item = &'a Value>) -> f64 {
    let counts = class_counts(labels);
    let n: usize = counts.values().sum();
    entropy_from_counts(counts.into_values(), n)
}

/// Size-weighted entropy of the two sides of a split.
///
/// `(|below| / n) · H(below) + (|above| / n) · H(above)` with
/// `n = |below| + |above|`. An empty side contributes nothing.
#[must_use]
pub fn weighted_entropy<'a>(
    below: impl IntoIterator<Item = &'a Value>,
    above: impl IntoIterator<Item = &'a Value>,
) -> f64 {
    let below = class_counts(below);
    let above = class_counts(above);
    let n_below: usize = below.values().sum();
    let n_above: usize = above.values().sum();
    let n = n_below + n_above;
    if n == 0 {
        return 0.0;
    }
    let n = n as f64;
    (n_below as f64 / n) * entropy_from_counts(below.into_values(), n_below)
        + (n_above as f64 / n) * entropy_from_counts(above.into_values(), n_above)
}
