//! Upload-to-splits pipeline.
//!
//! Takes raw uploaded bytes plus split parameters and returns the three
//! re-encoded ARFF files, or a client-facing error payload.

use arff_codec::encode_dataset;
use arff_ingest::{IngestError, LoadOptions, TextEncoding, load_relation_with_options};
use arff_split::{
    SplitError, SplitOptions, SplitResult, SplitSizes, class_counts, train_val_test_split,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, info_span};

pub const TRAIN_FILE: &str = "train_set.arff";
pub const VAL_FILE: &str = "val_set.arff";
pub const TEST_FILE: &str = "test_set.arff";

/// Output file names in archive order.
pub const OUTPUT_FILES: [&str; 3] = [TRAIN_FILE, VAL_FILE, TEST_FILE];

/// HTTP status used for every pipeline failure.
pub const CLIENT_ERROR_STATUS: u16 = 400;

/// One upload request.
#[derive(Debug, Clone)]
pub struct Upload {
    /// File content; `None` when nothing was uploaded.
    pub file: Option<Vec<u8>>,
    /// Stratify column. Empty means no stratification.
    pub stratify: Option<String>,
    /// Seed override; defaults to 42.
    pub seed: Option<u64>,
    pub shuffle: bool,
}

impl Default for Upload {
    fn default() -> Self {
        Self {
            file: None,
            stratify: None,
            seed: None,
            shuffle: true,
        }
    }
}

impl Upload {
    pub fn new(file: Vec<u8>) -> Self {
        Self {
            file: Some(file),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_stratify(mut self, column: impl Into<String>) -> Self {
        self.stratify = Some(column.into());
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    fn split_options(&self) -> SplitOptions {
        let mut options = SplitOptions::default().with_shuffle(self.shuffle);
        if let Some(seed) = self.seed {
            options = options.with_seed(seed);
        }
        if let Some(column) = &self.stratify {
            options = options.with_stratify(column.as_str());
        }
        options
    }
}

/// A named ARFF text produced by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    pub name: &'static str,
    pub text: String,
}

/// The three output files in train, validation, test order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitBundle {
    files: [OutputFile; 3],
}

impl SplitBundle {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.files
            .iter()
            .find(|file| file.name == name)
            .map(|file| file.text.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &OutputFile> {
        self.files.iter()
    }

    pub fn train(&self) -> &str {
        &self.files[0].text
    }

    pub fn validation(&self) -> &str {
        &self.files[1].text
    }

    pub fn test(&self) -> &str {
        &self.files[2].text
    }
}

/// Per-class counts across the three parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassBreakdown {
    pub column: String,
    /// `(class, [train, validation, test])`, classes in input order.
    pub classes: Vec<(String, [usize; 3])>,
}

/// Everything a caller might report about a successful run.
#[derive(Debug, Clone)]
pub struct SplitOutcome {
    pub bundle: SplitBundle,
    pub relation: String,
    pub encoding: TextEncoding,
    pub dropped_rows: usize,
    pub sizes: SplitSizes,
    pub classes: Option<ClassBreakdown>,
}

/// Client-visible failure body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub error: String,
    pub detail: String,
}

/// Errors returned to the uploader. All of them are client errors.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("no file was provided under key 'file'")]
    MissingUpload,

    #[error("could not parse the ARFF file")]
    Unparseable(#[from] IngestError),

    #[error("invalid split request")]
    InvalidSplit(#[from] SplitError),
}

impl PipelineError {
    pub fn status_code(&self) -> u16 {
        CLIENT_ERROR_STATUS
    }

    /// `{ "error": ..., "detail": ... }` body for this failure.
    ///
    /// For parse failures the detail carries the last underlying decode or
    /// parse message.
    pub fn payload(&self) -> ErrorPayload {
        let detail = match self {
            Self::MissingUpload => "the request did not contain an ARFF upload".to_string(),
            Self::Unparseable(err) => format!("encoding/parse error: {}", err.last_failure()),
            Self::InvalidSplit(err) => err.to_string(),
        };
        ErrorPayload {
            error: self.to_string(),
            detail,
        }
    }
}

/// Decode, split and re-encode one upload.
///
/// # Errors
///
/// [`PipelineError::MissingUpload`] when no file is present, before any
/// parsing. [`PipelineError::Unparseable`] when no candidate encoding yields
/// valid ARFF. [`PipelineError::InvalidSplit`] for an unknown stratify column
/// or an inconsistent split configuration.
pub fn process_upload(upload: &Upload) -> Result<SplitOutcome, PipelineError> {
    process_upload_with_options(upload, &LoadOptions::default())
}

pub fn process_upload_with_options(
    upload: &Upload,
    load_options: &LoadOptions,
) -> Result<SplitOutcome, PipelineError> {
    let bytes = upload.file.as_deref().ok_or(PipelineError::MissingUpload)?;
    let span = info_span!("upload", bytes = bytes.len());
    let _guard = span.enter();

    let loaded = load_relation_with_options(bytes, load_options)?;
    let relation = loaded.relation.name.clone();
    let dataset = loaded.relation.into_dataset();

    let options = upload.split_options();
    let parts = train_val_test_split(&dataset, &options)?;
    let classes = match options.stratify_column() {
        Some(column) => Some(class_breakdown(&parts, column)?),
        None => None,
    };

    let bundle = SplitBundle {
        files: [
            OutputFile {
                name: TRAIN_FILE,
                text: encode_dataset(&parts.train, "train_set"),
            },
            OutputFile {
                name: VAL_FILE,
                text: encode_dataset(&parts.validation, "val_set"),
            },
            OutputFile {
                name: TEST_FILE,
                text: encode_dataset(&parts.test, "test_set"),
            },
        ],
    };

    let sizes = parts.sizes();
    info!(
        relation = %relation,
        encoding = %loaded.encoding,
        train = sizes.train,
        validation = sizes.validation,
        test = sizes.test,
        "encoded split files"
    );

    Ok(SplitOutcome {
        bundle,
        relation,
        encoding: loaded.encoding,
        dropped_rows: loaded.dropped_rows.len(),
        sizes,
        classes,
    })
}

fn class_breakdown(parts: &SplitResult, column: &str) -> Result<ClassBreakdown, SplitError> {
    let mut classes: Vec<(String, [usize; 3])> = Vec::new();
    for (slot, (_, part)) in parts.parts().into_iter().enumerate() {
        for (label, count) in class_counts(part, column)? {
            match classes.iter_mut().find(|(name, _)| *name == label) {
                Some((_, counts)) => counts[slot] = count,
                None => {
                    let mut counts = [0; 3];
                    counts[slot] = count;
                    classes.push((label, counts));
                }
            }
        }
    }
    Ok(ClassBreakdown {
        column: column.to_string(),
        classes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "@relation kdd\n\
                          @attribute duration numeric\n\
                          @attribute class { 'normal', 'anomaly' }\n\
                          @data\n\
                          0,normal\n1,anomaly\n2,normal\n3,anomaly\n4,normal\n\
                          5,anomaly\n6,normal\n7,anomaly\n8,normal\n9,anomaly\n";

    #[test]
    fn missing_upload_fails_before_parsing() {
        let err = process_upload(&Upload::default()).unwrap_err();
        assert!(matches!(err, PipelineError::MissingUpload));
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn bundle_uses_fixed_names_and_relations() {
        let outcome = process_upload(&Upload::new(SAMPLE.as_bytes().to_vec())).unwrap();
        let names: Vec<&str> = outcome.bundle.iter().map(|file| file.name).collect();
        assert_eq!(names, OUTPUT_FILES);
        assert!(outcome.bundle.train().starts_with("@RELATION train_set\n"));
        assert!(outcome.bundle.validation().starts_with("@RELATION val_set\n"));
        assert!(outcome.bundle.test().starts_with("@RELATION test_set\n"));
        assert_eq!(outcome.bundle.get(VAL_FILE), Some(outcome.bundle.validation()));
        assert_eq!(outcome.sizes.total(), 10);
        assert!(outcome.classes.is_none());
    }

    #[test]
    fn stratified_outcome_reports_class_counts() {
        let upload = Upload::new(SAMPLE.as_bytes().to_vec()).with_stratify("class");
        let outcome = process_upload(&upload).unwrap();
        let classes = outcome.classes.unwrap();
        assert_eq!(classes.column, "class");
        let total: usize = classes.classes.iter().flat_map(|(_, c)| c.iter()).sum();
        assert_eq!(total, 10);
        assert!(
            classes
                .classes
                .iter()
                .all(|(_, counts)| counts == &[3, 1, 1])
        );
    }

    #[test]
    fn unknown_stratify_column_is_a_client_error() {
        let upload = Upload::new(SAMPLE.as_bytes().to_vec()).with_stratify("label");
        let err = process_upload(&upload).unwrap_err();
        assert_eq!(err.status_code(), 400);
        let payload = err.payload();
        assert_eq!(payload.error, "invalid split request");
        assert_eq!(payload.detail, "stratify column 'label' not found in dataset");
    }
}
