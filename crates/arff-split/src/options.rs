//! Split configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SplitError};

/// Seed used when none is given.
pub const DEFAULT_SEED: u64 = 42;

/// Share of rows held out from training in the first stage.
pub const DEFAULT_HELD_OUT_FRACTION: f64 = 0.4;

/// Share of the held-out rows that become the test set.
pub const DEFAULT_TEST_FRACTION: f64 = 0.5;

/// How a dataset is partitioned into train, validation and test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitOptions {
    /// Seed for both shuffle stages.
    pub seed: u64,
    /// Column whose class proportions are preserved, if any.
    pub stratify: Option<String>,
    /// Shuffle before cutting. Without it the cut follows input order.
    pub shuffle: bool,
    /// First stage: fraction of all rows held out from training.
    pub held_out_fraction: f64,
    /// Second stage: fraction of held-out rows assigned to test.
    pub test_fraction: f64,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            stratify: None,
            shuffle: true,
            held_out_fraction: DEFAULT_HELD_OUT_FRACTION,
            test_fraction: DEFAULT_TEST_FRACTION,
        }
    }
}

impl SplitOptions {
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the stratify column. Empty or blank names disable stratification.
    #[must_use]
    pub fn with_stratify(mut self, column: impl Into<String>) -> Self {
        let column = column.into();
        self.stratify = (!column.trim().is_empty()).then_some(column);
        self
    }

    #[must_use]
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// The stratify column, treating blank names as absent.
    pub fn stratify_column(&self) -> Option<&str> {
        self.stratify
            .as_deref()
            .filter(|name| !name.trim().is_empty())
    }

    pub(crate) fn validate(&self) -> Result<()> {
        for fraction in [self.held_out_fraction, self.test_fraction] {
            if !(fraction > 0.0 && fraction < 1.0) {
                return Err(SplitError::InvalidFraction { fraction });
            }
        }
        if self.stratify_column().is_some() && !self.shuffle {
            return Err(SplitError::StratifyWithoutShuffle);
        }
        Ok(())
    }
}
