//! Error types for ARFF ingestion.

use std::path::PathBuf;

use arff_codec::CodecError;
use thiserror::Error;

use crate::encoding::TextEncoding;

/// Errors that can occur while loading an uploaded ARFF file.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// ARFF file not found.
    #[error("ARFF file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Decoding Errors ===
    /// The bytes are not valid in the given encoding.
    #[error("input is not valid {encoding}")]
    Undecodable { encoding: TextEncoding },

    /// The text decoded but is not valid ARFF.
    #[error("ARFF parse failed under {encoding}: {source}")]
    Parse {
        encoding: TextEncoding,
        #[source]
        source: CodecError,
    },

    /// Every candidate encoding failed; carries the last failure.
    #[error("no candidate encoding produced valid ARFF (tried {tried}): {last}")]
    NoCandidateSucceeded {
        tried: String,
        #[source]
        last: Box<IngestError>,
    },

    /// The candidate encoding list was empty.
    #[error("no candidate encodings configured")]
    NoCandidates,
}

impl IngestError {
    /// The innermost decode or parse failure.
    pub fn last_failure(&self) -> &IngestError {
        match self {
            Self::NoCandidateSucceeded { last, .. } => last.last_failure(),
            other => other,
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/path/to/KDDTrain+.arff"),
        };
        assert_eq!(err.to_string(), "ARFF file not found: /path/to/KDDTrain+.arff");

        let err = IngestError::Undecodable {
            encoding: TextEncoding::Utf8,
        };
        assert_eq!(err.to_string(), "input is not valid utf-8");
    }

    #[test]
    fn test_last_failure_unwraps_exhaustion() {
        let err = IngestError::NoCandidateSucceeded {
            tried: "utf-8".to_string(),
            last: Box::new(IngestError::Parse {
                encoding: TextEncoding::Utf8,
                source: CodecError::MissingData,
            }),
        };
        assert!(matches!(err.last_failure(), IngestError::Parse { .. }));
        assert!(err.to_string().ends_with("missing @DATA section"));
    }
}
