//! Row sampling: bootstrap draws and the train/test holdout split.

use rand::Rng;
use rand::seq::index;

use crate::dataset::Dataset;
use crate::error::RfError;

/// Draw `n_bootstrap` row indices uniformly with replacement from `0..n_rows`.
///
/// Indices are returned in draw order. `n_bootstrap` may exceed `n_rows`.
///
/// # Errors
///
/// Returns [`RfError::InsufficientData`] when `n_rows` is 0.
pub fn bootstrap_sample(
    n_rows: usize,
    n_bootstrap: usize,
    rng: &mut impl Rng,
) -> Result<Vec<usize>, RfError> {
    if n_rows == 0 {
        return Err(RfError::InsufficientData {
            requested: n_bootstrap,
            available: n_rows,
        });
    }
    Ok((0..n_bootstrap).map(|_| rng.gen_range(0..n_rows)).collect())
}

/// Size of the holdout set for [`train_test_split`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TestSize {
    /// A share of the rows, rounded to the nearest count.
    Fraction(f64),
    /// An exact number of rows.
    Count(usize),
}

impl TestSize {
    /// Resolve to a row count for a dataset of `n_samples` rows.
    fn resolve(self, n_samples: usize) -> Result<usize, RfError> {
        match self {
            TestSize::Fraction(fraction) => {
                if !(0.0..=1.0).contains(&fraction) {
                    return Err(RfError::InvalidTestFraction { fraction });
                }
                Ok((fraction * n_samples as f64).round() as usize)
            }
            TestSize::Count(count) => Ok(count),
        }
    }
}

/// Split `dataset` into `(train, test)`.
///
/// Test rows are drawn uniformly without replacement and kept in draw order;
/// the remaining rows form the training set in their original order.
///
/// # Errors
///
/// | Variant                           | When                                   |
/// |-----------------------------------|----------------------------------------|
/// | [`RfError::InvalidTestFraction`]  | a fraction lies outside `[0, 1]`       |
/// | [`RfError::InsufficientData`]     | more test rows than rows               |
/// | [`RfError::InvalidTestSize`]      | either side of the split would be empty |
pub fn train_test_split(
    dataset: &Dataset,
    test_size: TestSize,
    rng: &mut impl Rng,
) -> Result<(Dataset, Dataset), RfError> {
    let n_samples = dataset.n_samples();
    let n_test = test_size.resolve(n_samples)?;
    if n_test > n_samples {
        return Err(RfError::InsufficientData {
            requested: n_test,
            available: n_samples,
        });
    }
    if n_test == 0 || n_test == n_samples {
        return Err(RfError::InvalidTestSize {
            test_size: n_test,
            n_samples,
        });
    }

    let test_indices = index::sample(rng, n_samples, n_test).into_vec();
    let mut in_test = vec![false; n_samples];
    for &i in &test_indices {
        in_test[i] = true;
    }
    let train_indices: Vec<usize> = (0..n_samples).filter(|&i| !in_test[i]).collect();

    Ok((dataset.select(&train_indices), dataset.select(&test_indices)))
}
