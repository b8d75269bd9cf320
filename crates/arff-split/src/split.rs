//! Two-stage train/validation/test splitting.

use arff_codec::render_value;
use arff_model::Dataset;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{Result, SplitError};
use crate::options::SplitOptions;
use crate::partition::{Partition, ordered_partition, shuffled_partition, stratified_partition};

/// The three disjoint parts of a dataset.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SplitResult {
    pub train: Dataset,
    pub validation: Dataset,
    pub test: Dataset,
}

/// Row counts of a [`SplitResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SplitSizes {
    pub train: usize,
    pub validation: usize,
    pub test: usize,
}

impl SplitSizes {
    pub fn total(&self) -> usize {
        self.train + self.validation + self.test
    }
}

impl SplitResult {
    pub fn sizes(&self) -> SplitSizes {
        SplitSizes {
            train: self.train.len(),
            validation: self.validation.len(),
            test: self.test.len(),
        }
    }

    /// Parts in output order with their conventional names.
    pub fn parts(&self) -> [(&'static str, &Dataset); 3] {
        [
            ("train", &self.train),
            ("validation", &self.validation),
            ("test", &self.test),
        ]
    }
}

/// Split a dataset into train, validation and test.
///
/// Stage one holds out `held_out_fraction` of all rows; stage two sends
/// `test_fraction` of the held-out rows to test and the rest to validation.
/// With the defaults this yields 60/20/20. Every input row lands in exactly
/// one part, and the same input and options always give the same parts.
///
/// # Errors
///
/// Fails for an unknown stratify column, for stratification without
/// shuffling, and for fractions outside (0, 1).
pub fn train_val_test_split(dataset: &Dataset, options: &SplitOptions) -> Result<SplitResult> {
    options.validate()?;

    let labels = match options.stratify_column() {
        Some(column) => Some(class_labels(dataset, column)?),
        None => None,
    };

    if dataset.is_empty() {
        debug!("empty dataset, returning empty parts");
        return Ok(SplitResult {
            train: dataset.empty_like(),
            validation: dataset.empty_like(),
            test: dataset.empty_like(),
        });
    }

    let first = two_way(
        dataset.len(),
        labels.as_deref(),
        options.held_out_fraction,
        options,
    );

    // Second stage runs on the held-out rows only, with positions local to them.
    let held_labels: Option<Vec<String>> = labels.as_ref().map(|labels| {
        first
            .held_out
            .iter()
            .map(|&idx| labels[idx].clone())
            .collect()
    });
    let second = two_way(
        first.held_out.len(),
        held_labels.as_deref(),
        options.test_fraction,
        options,
    );

    let to_global = |local: &[usize]| -> Vec<usize> {
        local.iter().map(|&pos| first.held_out[pos]).collect()
    };
    let result = SplitResult {
        train: dataset.select(&first.kept),
        validation: dataset.select(&to_global(&second.kept)),
        test: dataset.select(&to_global(&second.held_out)),
    };

    let sizes = result.sizes();
    info!(
        rows = dataset.len(),
        train = sizes.train,
        validation = sizes.validation,
        test = sizes.test,
        stratify = options.stratify_column().unwrap_or("none"),
        seed = options.seed,
        "split dataset"
    );
    Ok(result)
}

fn two_way(n: usize, labels: Option<&[String]>, fraction: f64, options: &SplitOptions) -> Partition {
    match (options.shuffle, labels) {
        (false, _) => ordered_partition(n, fraction),
        (true, None) => shuffled_partition(n, fraction, options.seed),
        (true, Some(labels)) => stratified_partition(labels, fraction, options.seed),
    }
}

/// Class label of every row for `column`.
///
/// Labels are the values as written in ARFF data, so a missing value (`?`)
/// and the quoted string `'?'` are different classes.
fn class_labels(dataset: &Dataset, column: &str) -> Result<Vec<String>> {
    let unknown = || SplitError::UnknownColumn {
        column: column.to_string(),
    };
    let kind = &dataset.attribute(column).ok_or_else(unknown)?.kind;
    let values = dataset.column(column).ok_or_else(unknown)?;
    Ok(values
        .into_iter()
        .map(|value| render_value(value, kind))
        .collect())
}

/// Per-class row counts for `column`, classes in order of first appearance.
pub fn class_counts(dataset: &Dataset, column: &str) -> Result<Vec<(String, usize)>> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for label in class_labels(dataset, column)? {
        match counts.iter_mut().find(|(name, _)| *name == label) {
            Some((_, count)) => *count += 1,
            None => counts.push((label, 1)),
        }
    }
    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arff_model::{Attribute, AttributeType, Row, Value};

    fn dataset(n: usize) -> Dataset {
        let attributes = vec![
            Attribute::new("id", AttributeType::Integer),
            Attribute::new("label", AttributeType::nominal(["A", "B"])),
        ];
        let names: Vec<String> = attributes.iter().map(|a| a.name.clone()).collect();
        let rows = (0..n)
            .map(|i| {
                let label = if i % 10 < 7 { "A" } else { "B" };
                Row::aligned(&names, vec![Value::Number(i as f64), Value::text(label)])
            })
            .collect();
        Dataset::new(attributes, rows)
    }

    #[test]
    fn default_split_is_sixty_twenty_twenty() {
        let result = train_val_test_split(&dataset(100), &SplitOptions::default()).unwrap();
        assert_eq!(
            result.sizes(),
            SplitSizes {
                train: 60,
                validation: 20,
                test: 20
            }
        );
    }

    #[test]
    fn ordered_cut_without_shuffle() {
        let options = SplitOptions::default().with_shuffle(false);
        let result = train_val_test_split(&dataset(10), &options).unwrap();
        let ids = |ds: &Dataset| -> Vec<f64> {
            ds.column("id")
                .unwrap()
                .into_iter()
                .filter_map(Value::as_f64)
                .collect()
        };
        assert_eq!(ids(&result.train), vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(ids(&result.validation), vec![6.0, 7.0]);
        assert_eq!(ids(&result.test), vec![8.0, 9.0]);
    }

    #[test]
    fn class_counts_follow_first_appearance() {
        let counts = class_counts(&dataset(10), "label").unwrap();
        assert_eq!(counts, vec![("A".to_string(), 7), ("B".to_string(), 3)]);
        assert!(matches!(
            class_counts(&dataset(10), "nope"),
            Err(SplitError::UnknownColumn { .. })
        ));
    }

    #[test]
    fn quoted_question_mark_is_not_missing() {
        let attributes = vec![Attribute::new("note", AttributeType::String)];
        let names = vec!["note".to_string()];
        let rows = (0..10)
            .map(|i| {
                let value = if i < 5 { Value::text("?") } else { Value::Missing };
                Row::aligned(&names, vec![value])
            })
            .collect();
        let dataset = Dataset::new(attributes, rows);
        assert_eq!(
            class_counts(&dataset, "note").unwrap(),
            vec![("'?'".to_string(), 5), ("?".to_string(), 5)]
        );

        let options = SplitOptions::default().with_stratify("note");
        let result = train_val_test_split(&dataset, &options).unwrap();
        let missing_in_train = result
            .train
            .column("note")
            .unwrap()
            .into_iter()
            .filter(|value| value.is_missing())
            .count();
        assert_eq!(missing_in_train, 3);
    }

    #[test]
    fn unknown_column_fails_even_when_empty() {
        let options = SplitOptions::default().with_stratify("nope");
        assert_eq!(
            train_val_test_split(&dataset(0), &options),
            Err(SplitError::UnknownColumn {
                column: "nope".to_string()
            })
        );
    }
}
