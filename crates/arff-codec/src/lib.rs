//! ARFF (Attribute-Relation File Format) reader and writer.
//!
//! The reader accepts dense ARFF text with `NUMERIC`, `REAL`, `INTEGER`,
//! `STRING`, `DATE` and nominal attributes. Nominal lists follow a strict
//! grammar: quoted values must touch their `{`, `,` and `}` delimiters.
//! Run text through a normalizer first when the source is loose about that.
//!
//! # Example
//!
//! ```
//! use arff_codec::{decode, encode_relation};
//!
//! let text = "@relation demo\n\
//!             @attribute x numeric\n\
//!             @attribute class {yes,no}\n\
//!             @data\n\
//!             1.5,yes\n\
//!             ?,no\n";
//!
//! let decoded = decode(text).unwrap();
//! assert_eq!(decoded.relation.rows.len(), 2);
//!
//! let written = encode_relation(&decoded.relation);
//! assert!(written.starts_with("@RELATION demo"));
//! assert_eq!(decode(&written).unwrap().relation, decoded.relation);
//! ```

mod error;
mod header;
mod lexer;
mod reader;
mod writer;

pub use error::{CodecError, Result};
pub use header::Declaration;
pub use reader::{Decoded, DroppedRow, decode};
pub use writer::{ArffWriter, encode, encode_dataset, encode_relation, render_value};
