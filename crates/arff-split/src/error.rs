//! Error types for dataset splitting.

use thiserror::Error;

/// Errors that can occur when splitting a dataset.
#[derive(Debug, Error, PartialEq)]
pub enum SplitError {
    /// Stratify column is not an attribute of the dataset.
    #[error("stratify column '{column}' not found in dataset")]
    UnknownColumn { column: String },

    /// Stratification needs shuffled sampling.
    #[error("stratified splitting requires shuffling")]
    StratifyWithoutShuffle,

    /// Fraction outside the open interval (0, 1).
    #[error("split fraction must be between 0 and 1 (exclusive), got {fraction}")]
    InvalidFraction { fraction: f64 },
}

/// Result type for splitting operations.
pub type Result<T> = std::result::Result<T, SplitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SplitError::UnknownColumn {
            column: "label".to_string(),
        };
        assert_eq!(err.to_string(), "stratify column 'label' not found in dataset");
    }
}
