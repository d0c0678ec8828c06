//! CSV loading for the sylva random forest.

mod error;
mod reader;

pub use error::IoError;
pub use reader::{DatasetReader, LABEL_COLUMN, sanitize_column_name};
