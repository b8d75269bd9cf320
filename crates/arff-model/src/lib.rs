//! Data model for ARFF relations.
//!
//! A [`Relation`] is a named schema (ordered [`Attribute`] declarations) plus
//! the rows that were read under it. Rows are keyed by attribute name and
//! always carry exactly one [`Value`] per attribute; missing values are
//! explicit rather than absent.
//!
//! [`Dataset`] is the working tabular form handed from the decoder to the
//! splitter: the attribute list and the rows, without a relation name.
//!
//! # Example
//!
//! ```
//! use arff_model::{Attribute, AttributeType, Dataset, Row, Value};
//!
//! let attributes = vec![
//!     Attribute::new("duration", AttributeType::Numeric),
//!     Attribute::new("label", AttributeType::nominal(["normal", "attack"])),
//! ];
//! let names: Vec<String> = attributes.iter().map(|a| a.name.clone()).collect();
//! let row = Row::aligned(&names, vec![Value::Number(0.0)]);
//!
//! // Short rows are padded with the missing marker.
//! assert_eq!(row.get("label"), Some(&Value::Missing));
//!
//! let dataset = Dataset::new(attributes, vec![row]);
//! assert_eq!(dataset.len(), 1);
//! ```

mod attribute;
mod dataset;
mod row;
mod value;

#[cfg(feature = "polars")]
mod polars_ext;

pub use attribute::{Attribute, AttributeType};
pub use dataset::{Dataset, Relation};
pub use row::Row;
pub use value::Value;
