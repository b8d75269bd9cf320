//! Train/validation/test splitting for ARFF datasets.
//!
//! Splitting happens in two seeded stages. The first holds out 40% of the
//! rows from training, the second divides the held-out rows evenly between
//! validation and test. Optionally each stage keeps the class proportions of
//! a stratify column.
//!
//! # Example
//!
//! ```
//! use arff_model::{Attribute, AttributeType, Dataset, Row, Value};
//! use arff_split::{SplitOptions, train_val_test_split};
//!
//! let names = vec!["x".to_string()];
//! let rows = (0..10)
//!     .map(|i| Row::aligned(&names, vec![Value::Number(i as f64)]))
//!     .collect();
//! let dataset = Dataset::new(vec![Attribute::new("x", AttributeType::Numeric)], rows);
//!
//! let parts = train_val_test_split(&dataset, &SplitOptions::default())?;
//! assert_eq!(parts.sizes().train, 6);
//! assert_eq!(parts.sizes().total(), 10);
//! # Ok::<(), arff_split::SplitError>(())
//! ```

mod error;
mod options;
pub mod partition;
mod split;

pub use error::{Result, SplitError};
pub use options::{DEFAULT_HELD_OUT_FRACTION, DEFAULT_SEED, DEFAULT_TEST_FRACTION, SplitOptions};
pub use split::{SplitResult, SplitSizes, class_counts, train_val_test_split};
