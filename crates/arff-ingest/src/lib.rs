//! ARFF ingestion utilities.
//!
//! This crate turns uploaded bytes into an [`arff_model::Relation`].
//!
//! # Features
//!
//! - **Encoding fallback**: try UTF-8, Latin-1, ISO-8859-1 and Windows-1252
//!   in order, keeping the first candidate that both decodes and parses
//! - **Nominal-list repair**: strip whitespace between quoted nominal values
//!   and their `{`, `,` and `}` delimiters before parsing
//! - **Dropped-row accounting**: rows the reader could not materialize are
//!   reported alongside the relation
//!
//! # Example
//!
//! ```
//! use arff_ingest::{TextEncoding, load_relation};
//!
//! let bytes = b"@relation kdd\n@attribute flag { 'S0', 'SF' }\n@data\nSF\n";
//! let loaded = load_relation(bytes)?;
//! assert_eq!(loaded.encoding, TextEncoding::Utf8);
//! assert_eq!(loaded.relation.rows.len(), 1);
//! # Ok::<(), arff_ingest::IngestError>(())
//! ```

mod encoding;
mod error;
mod load;
mod normalize;

// === Error Types ===
pub use error::{IngestError, Result};

// === Encodings ===
pub use encoding::TextEncoding;

// === Normalization ===
pub use normalize::normalize_nominal_lists;

// === Loading ===
pub use load::{
    LoadOptions, LoadedRelation, load_relation, load_relation_with_options, read_arff_file,
    read_arff_file_with_options,
};
