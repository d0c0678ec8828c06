//! CSV reader producing a labelled [`Dataset`].

use std::path::{Path, PathBuf};

use sylva_rf::{Dataset, Value};
use tracing::{debug, info, instrument};

use crate::IoError;

/// Name given to the label column, whatever its header says.
pub const LABEL_COLUMN: &str = "label";

/// Replace spaces in a header cell with underscores.
#[must_use]
pub fn sanitize_column_name(name: &str) -> String {
    name.trim().replace(' ', "_")
}

/// Whether every cell of each column parses as a finite number.
fn numeric_columns(rows: &[Vec<String>], n_cols: usize) -> Vec<bool> {
    (0..n_cols)
        .map(|c| {
            rows.iter()
                .all(|row| Value::parse(&row[c]).as_number().is_some())
        })
        .collect()
}

/// Reads a labelled table from a CSV file.
///
/// Expected CSV format:
/// - Header row required; the last column holds the labels
/// - `feature1,feature2,...,featureN,class`
/// - All rows must have the same number of columns
///
/// Column names have spaces replaced with underscores and the label column
/// is renamed to [`LABEL_COLUMN`]. Every cell is trimmed. Columns are typed
/// as a whole: a column whose cells all parse to finite `f64` is numeric,
/// any other column keeps every cell as text.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`IoError::FileNotFound`] | File doesn't exist or is unreadable |
/// | [`IoError::CsvParse`] | Malformed CSV record |
/// | [`IoError::NoFeatureColumns`] | Fewer than two columns |
/// | [`IoError::EmptyDataset`] | Zero data rows after header |
/// | [`IoError::InconsistentRowLength`] | Row has different column count than header |
/// | [`IoError::Dataset`] | Rows rejected by [`Dataset::new`] |
pub struct DatasetReader {
    path: PathBuf,
}

impl DatasetReader {
    /// Create a new reader for the given CSV file path.
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Read and validate the CSV file, returning a [`Dataset`].
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn read(&self) -> Result<Dataset, IoError> {
        let file = std::fs::File::open(&self.path).map_err(|e| IoError::FileNotFound {
            path: self.path.clone(),
            source: e,
        })?;

        // flexible(true) so short or long rows reach the InconsistentRowLength
        // check instead of failing inside the parser.
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(file);

        let header = rdr.headers().map_err(|e| self.csv_error(e))?;
        let expected_cols = header.len();
        debug!(expected_cols, "read CSV header");

        if expected_cols < 2 {
            return Err(IoError::NoFeatureColumns {
                path: self.path.clone(),
            });
        }

        let feature_names: Vec<String> = header
            .iter()
            .take(expected_cols - 1)
            .map(sanitize_column_name)
            .collect();

        let mut raw_rows: Vec<Vec<String>> = Vec::new();

        for (row_index, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| self.csv_error(e))?;

            if record.len() != expected_cols {
                return Err(IoError::InconsistentRowLength {
                    path: self.path.clone(),
                    row_index,
                    expected: expected_cols,
                    got: record.len(),
                });
            }

            raw_rows.push(record.iter().map(|cell| cell.trim().to_string()).collect());
        }

        if raw_rows.is_empty() {
            return Err(IoError::EmptyDataset {
                path: self.path.clone(),
            });
        }

        let numeric = numeric_columns(&raw_rows, expected_cols);
        debug!(
            n_text_columns = numeric.iter().filter(|&&n| !n).count(),
            "column types resolved"
        );

        let mut features = Vec::with_capacity(raw_rows.len());
        let mut labels = Vec::with_capacity(raw_rows.len());
        for row in raw_rows {
            let mut values: Vec<Value> = row
                .into_iter()
                .zip(&numeric)
                .map(|(cell, &is_numeric)| {
                    if is_numeric {
                        Value::parse(&cell)
                    } else {
                        Value::from(cell)
                    }
                })
                .collect();
            if let Some(label) = values.pop() {
                labels.push(label);
            }
            features.push(values);
        }

        let dataset =
            Dataset::new(feature_names, LABEL_COLUMN, features, labels).map_err(|e| {
                IoError::Dataset {
                    path: self.path.clone(),
                    source: e,
                }
            })?;

        info!(
            n_samples = dataset.n_samples(),
            n_features = dataset.n_features(),
            n_classes = dataset.n_classes(),
            "dataset loaded"
        );

        Ok(dataset)
    }

    fn csv_error(&self, e: csv::Error) -> IoError {
        IoError::CsvParse {
            path: self.path.clone(),
            offset: e.position().map_or(0, |p| p.byte()),
            source: e,
        }
    }
}
