//! Holdout evaluation.

use crate::error::RfError;
use crate::value::Value;

/// Fraction of positions where `predictions` equals `truth`.
///
/// # Errors
///
/// | Variant                     | When                             |
/// |-----------------------------|----------------------------------|
/// | [`RfError::LengthMismatch`] | the slices have different length |
/// | [`RfError::EmptyDataset`]   | both slices are empty            |
pub fn accuracy(predictions: &[Value], truth: &[Value]) -> Result<f64, RfError> {
    if predictions.len() != truth.len() {
        return Err(RfError::LengthMismatch {
            left: predictions.len(),
            right: truth.len(),
        });
    }
    if truth.is_empty() {
        return Err(RfError::EmptyDataset);
    }
    let correct = predictions.iter().zip(truth).filter(|(p, t)| p == t).count();
    Ok(correct as f64 / truth.len() as f64)
}
