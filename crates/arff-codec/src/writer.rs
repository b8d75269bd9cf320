//! ARFF text writer.
//!
//! Renders a relation header followed by one data line per row. Attribute
//! declarations are written exactly as they were decoded.

use std::io::{BufWriter, Write};

use arff_model::{Attribute, AttributeType, Dataset, Relation, Row, Value};

use crate::error::Result;
use crate::header::render_type;
use crate::lexer::{quote_bytes, quote_text};

/// ARFF writer over any byte sink.
pub struct ArffWriter<W: Write> {
    writer: BufWriter<W>,
}

impl<W: Write> ArffWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
        }
    }

    /// Write a complete relation and flush.
    pub fn write_relation(mut self, relation: &Relation) -> Result<()> {
        let text = encode(&relation.name, &relation.attributes, &relation.rows);
        self.writer.write_all(text.as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Encode a relation to ARFF text.
pub fn encode_relation(relation: &Relation) -> String {
    encode(&relation.name, &relation.attributes, &relation.rows)
}

/// Encode a dataset under the given relation name.
pub fn encode_dataset(dataset: &Dataset, relation_name: &str) -> String {
    encode(relation_name, &dataset.attributes, &dataset.rows)
}

/// Encode rows under a relation name and attribute declarations.
pub fn encode(relation_name: &str, attributes: &[Attribute], rows: &[Row]) -> String {
    let mut out = String::new();
    out.push_str("@RELATION ");
    out.push_str(&quote_text(relation_name));
    out.push_str("\n\n");

    for attribute in attributes {
        out.push_str("@ATTRIBUTE ");
        out.push_str(&quote_text(&attribute.name));
        out.push(' ');
        out.push_str(&render_type(&attribute.kind));
        out.push('\n');
    }

    out.push_str("\n@DATA\n");

    let names: Vec<String> = attributes.iter().map(|a| a.name.clone()).collect();
    for row in rows {
        let line: Vec<String> = row
            .values_in(&names)
            .zip(attributes)
            .map(|(value, attribute)| render_value(value, &attribute.kind))
            .collect();
        out.push_str(&line.join(","));
        out.push('\n');
    }
    out
}

/// Render one value in the ARFF value grammar.
pub fn render_value(value: &Value, kind: &AttributeType) -> String {
    match value {
        Value::Missing => "?".to_string(),
        Value::Number(v) if *kind == AttributeType::Integer && v.fract() == 0.0 && v.is_finite() => {
            format!("{v:.0}")
        }
        Value::Number(v) => v.to_string(),
        Value::Text(text) => quote_text(text),
        Value::Bytes(bytes) => quote_bytes(bytes),
    }
}
