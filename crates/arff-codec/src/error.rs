//! Error types for ARFF reading and writing.

use thiserror::Error;

/// Errors that can occur when reading or writing ARFF text.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Malformed header or data syntax.
    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },

    /// No `@RELATION` line before the first declaration.
    #[error("missing @RELATION declaration")]
    MissingRelation,

    /// Header ended without an `@DATA` marker.
    #[error("missing @DATA section")]
    MissingData,

    /// `@DATA` reached with no attribute declared.
    #[error("relation declares no attributes")]
    NoAttributes,

    /// The same attribute name declared twice.
    #[error("line {line}: duplicate attribute name '{name}'")]
    DuplicateAttribute { line: usize, name: String },

    /// Attribute type this reader does not handle.
    #[error("line {line}: unsupported attribute type '{kind}'")]
    UnsupportedType { line: usize, kind: String },

    /// Data line with more values than declared attributes.
    #[error("line {line}: expected at most {expected} values, found {actual}")]
    TooManyValues {
        line: usize,
        expected: usize,
        actual: usize,
    },

    /// Non-numeric token in a numeric attribute.
    #[error("line {line}: invalid numeric value '{value}' for attribute '{attribute}'")]
    BadNumeric {
        line: usize,
        attribute: String,
        value: String,
    },

    /// Value outside the declared nominal set.
    #[error("line {line}: value '{value}' is not declared for nominal attribute '{attribute}'")]
    BadNominal {
        line: usize,
        attribute: String,
        value: String,
    },

    /// Escape sequences produced bytes that are not UTF-8 where text is required.
    #[error("line {line}: {context} is not valid UTF-8")]
    InvalidText { line: usize, context: &'static str },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;

impl CodecError {
    /// Create a Syntax error.
    pub fn syntax(line: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            line,
            message: message.into(),
        }
    }

    /// Create a DuplicateAttribute error.
    pub fn duplicate_attribute(line: usize, name: impl Into<String>) -> Self {
        Self::DuplicateAttribute {
            line,
            name: name.into(),
        }
    }

    /// Create an UnsupportedType error.
    pub fn unsupported_type(line: usize, kind: impl Into<String>) -> Self {
        Self::UnsupportedType {
            line,
            kind: kind.into(),
        }
    }

    /// Line the error points at, when it has one.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Syntax { line, .. }
            | Self::DuplicateAttribute { line, .. }
            | Self::UnsupportedType { line, .. }
            | Self::TooManyValues { line, .. }
            | Self::BadNumeric { line, .. }
            | Self::BadNominal { line, .. }
            | Self::InvalidText { line, .. } => Some(*line),
            Self::MissingRelation | Self::MissingData | Self::NoAttributes | Self::Io(_) => None,
        }
    }
}
