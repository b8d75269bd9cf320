//! Relation loading with encoding fallback.

use std::path::Path;

use arff_codec::{Declaration, DroppedRow, decode};
use arff_model::Relation;
use tracing::{debug, info, warn};

use crate::encoding::TextEncoding;
use crate::error::{IngestError, Result};
use crate::normalize::normalize_nominal_lists;

/// Options controlling how uploaded bytes are turned into a relation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    /// Encodings tried in order; the first that decodes and parses wins.
    pub encodings: Vec<TextEncoding>,
    /// Repair nominal-list whitespace before parsing.
    pub normalize: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            encodings: TextEncoding::CANDIDATES.to_vec(),
            normalize: true,
        }
    }
}

impl LoadOptions {
    #[must_use]
    pub fn with_encodings(mut self, encodings: Vec<TextEncoding>) -> Self {
        self.encodings = encodings;
        self
    }

    #[must_use]
    pub fn with_normalize(mut self, enable: bool) -> Self {
        self.normalize = enable;
        self
    }
}

/// A relation plus how it was obtained.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedRelation {
    pub relation: Relation,
    /// The candidate encoding that succeeded.
    pub encoding: TextEncoding,
    pub declarations: Vec<Declaration>,
    /// Rows skipped during decoding. Not an error for the caller.
    pub dropped_rows: Vec<DroppedRow>,
}

/// Load a relation from raw bytes with the default options.
pub fn load_relation(bytes: &[u8]) -> Result<LoadedRelation> {
    load_relation_with_options(bytes, &LoadOptions::default())
}

/// Load a relation, trying each candidate encoding in order.
///
/// A candidate succeeds only when both byte decoding and ARFF parsing
/// succeed. When none does, the error carries the last failure.
pub fn load_relation_with_options(bytes: &[u8], options: &LoadOptions) -> Result<LoadedRelation> {
    let mut last_error: Option<IngestError> = None;

    for &encoding in &options.encodings {
        match try_candidate(bytes, encoding, options.normalize) {
            Ok(loaded) => {
                info!(
                    %encoding,
                    relation = %loaded.relation.name,
                    attributes = loaded.relation.attributes.len(),
                    rows = loaded.relation.rows.len(),
                    "loaded ARFF relation"
                );
                if !loaded.dropped_rows.is_empty() {
                    warn!(
                        dropped = loaded.dropped_rows.len(),
                        "some data rows could not be read and were dropped"
                    );
                }
                return Ok(loaded);
            }
            Err(err) => {
                debug!(%encoding, error = %err, "candidate encoding failed");
                last_error = Some(err);
            }
        }
    }

    let Some(last) = last_error else {
        return Err(IngestError::NoCandidates);
    };
    let tried: Vec<&str> = options
        .encodings
        .iter()
        .copied()
        .map(TextEncoding::label)
        .collect();
    Err(IngestError::NoCandidateSucceeded {
        tried: tried.join(", "),
        last: Box::new(last),
    })
}

fn try_candidate(bytes: &[u8], encoding: TextEncoding, normalize: bool) -> Result<LoadedRelation> {
    let text = encoding.decode(bytes)?;
    let text = if normalize {
        normalize_nominal_lists(&text)
    } else {
        text.into_owned()
    };
    let decoded = decode(&text).map_err(|source| IngestError::Parse { encoding, source })?;
    Ok(LoadedRelation {
        relation: decoded.relation,
        encoding,
        declarations: decoded.declarations,
        dropped_rows: decoded.dropped_rows,
    })
}

/// Read and load an ARFF file from disk.
pub fn read_arff_file(path: &Path) -> Result<LoadedRelation> {
    read_arff_file_with_options(path, &LoadOptions::default())
}

pub fn read_arff_file_with_options(path: &Path, options: &LoadOptions) -> Result<LoadedRelation> {
    let bytes = std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    load_relation_with_options(&bytes, options)
}
