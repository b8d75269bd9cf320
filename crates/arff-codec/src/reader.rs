//! ARFF text reader.
//!
//! Parses normalized ARFF text into a [`Relation`]. Header problems and
//! typed-value violations abort the parse; data lines that cannot be read as
//! a dense value sequence are dropped and counted.

use std::collections::HashSet;

use arff_model::{Attribute, AttributeType, Relation, Row, Value};
use tracing::{debug, warn};

use crate::error::{CodecError, Result};
use crate::header::{Declaration, HeaderLine, parse_header_line};
use crate::lexer::Cursor;

/// Outcome of decoding one ARFF document.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    pub relation: Relation,
    /// Declarations as written, including whether a type was given.
    pub declarations: Vec<Declaration>,
    /// Data lines skipped because they were not dense value sequences.
    pub dropped_rows: Vec<DroppedRow>,
}

/// A data line that could not be materialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedRow {
    pub line: usize,
    pub reason: String,
}

/// Token read from a data line, before type conversion.
#[derive(Debug, Clone, PartialEq)]
enum RawValue {
    Missing,
    Bare(String),
    Quoted(Vec<u8>),
}

/// Decode ARFF text into a relation.
///
/// A leading byte-order mark is ignored.
pub fn decode(text: &str) -> Result<Decoded> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut relation_name: Option<String> = None;
    let mut declarations: Vec<Declaration> = Vec::new();
    let mut seen_names: HashSet<String> = HashSet::new();
    let mut attributes: Vec<Attribute> = Vec::new();
    let mut names: Vec<String> = Vec::new();
    let mut in_data = false;
    let mut rows = Vec::new();
    let mut dropped_rows = Vec::new();

    for (idx, raw_line) in text.lines().enumerate() {
        let line = idx + 1;
        let trimmed = raw_line.trim();
        if trimmed.is_empty() || trimmed.starts_with('%') {
            continue;
        }

        if in_data {
            match split_data_line(trimmed, line) {
                Ok(values) => {
                    let values = convert_values(values, &attributes, line)?;
                    rows.push(Row::aligned(&names, values));
                }
                Err(err) => {
                    let reason = err.to_string();
                    warn!(line, %reason, "dropping unreadable data row");
                    dropped_rows.push(DroppedRow { line, reason });
                }
            }
            continue;
        }

        match parse_header_line(trimmed, line)? {
            HeaderLine::Relation(name) => {
                if relation_name.is_some() {
                    return Err(CodecError::syntax(line, "duplicate @RELATION declaration"));
                }
                relation_name = Some(name);
            }
            HeaderLine::Attribute(decl) => {
                if relation_name.is_none() {
                    return Err(CodecError::MissingRelation);
                }
                if !seen_names.insert(decl.name.clone()) {
                    return Err(CodecError::duplicate_attribute(line, decl.name));
                }
                let attribute = decl.clone().into_attribute();
                names.push(attribute.name.clone());
                attributes.push(attribute);
                declarations.push(decl);
            }
            HeaderLine::Data => {
                if relation_name.is_none() {
                    return Err(CodecError::MissingRelation);
                }
                if attributes.is_empty() {
                    return Err(CodecError::NoAttributes);
                }
                in_data = true;
            }
        }
    }

    let Some(name) = relation_name else {
        return Err(CodecError::MissingRelation);
    };
    if !in_data {
        return Err(CodecError::MissingData);
    }

    debug!(
        relation = %name,
        attributes = attributes.len(),
        rows = rows.len(),
        dropped = dropped_rows.len(),
        "decoded ARFF relation"
    );

    Ok(Decoded {
        relation: Relation::new(name, attributes, rows),
        declarations,
        dropped_rows,
    })
}

/// Split a dense data line into raw tokens.
///
/// Sparse rows (`{index value, ...}`) and lines with broken quoting are
/// rejected here; the caller drops them.
fn split_data_line(text: &str, line: usize) -> Result<Vec<RawValue>> {
    if text.starts_with('{') {
        return Err(CodecError::syntax(line, "sparse rows are not supported"));
    }
    let mut cursor = Cursor::new(text, line);
    let mut values = Vec::new();
    loop {
        cursor.skip_ws();
        let value = match cursor.peek() {
            Some('\'' | '"') => {
                let bytes = cursor.read_quoted()?;
                cursor.skip_ws();
                RawValue::Quoted(bytes)
            }
            _ => {
                let token = cursor.take_while(|c| c != ',');
                if token.contains(['\'', '"']) {
                    return Err(CodecError::syntax(line, "quote character inside unquoted value"));
                }
                match token.trim() {
                    "" => return Err(CodecError::syntax(line, "empty value")),
                    "?" => RawValue::Missing,
                    other => RawValue::Bare(other.to_string()),
                }
            }
        };
        values.push(value);
        match cursor.bump() {
            Some(',') => continue,
            None => break,
            Some(other) => {
                return Err(CodecError::syntax(
                    line,
                    format!("unexpected '{other}' after quoted value"),
                ));
            }
        }
    }
    Ok(values)
}

fn convert_values(values: Vec<RawValue>, attributes: &[Attribute], line: usize) -> Result<Vec<Value>> {
    if values.len() > attributes.len() {
        return Err(CodecError::TooManyValues {
            line,
            expected: attributes.len(),
            actual: values.len(),
        });
    }
    values
        .into_iter()
        .zip(attributes)
        .map(|(raw, attribute)| convert_value(raw, attribute, line))
        .collect()
}

fn convert_value(raw: RawValue, attribute: &Attribute, line: usize) -> Result<Value> {
    if raw == RawValue::Missing {
        return Ok(Value::Missing);
    }
    match &attribute.kind {
        kind if kind.is_numeric() => {
            let text = raw_text(raw, line, "numeric value")?;
            text.trim()
                .parse::<f64>()
                .map(Value::Number)
                .map_err(|_| CodecError::BadNumeric {
                    line,
                    attribute: attribute.name.clone(),
                    value: text,
                })
        }
        AttributeType::Nominal(allowed) => {
            let text = raw_text(raw, line, "nominal value")?;
            if allowed.contains(&text) {
                Ok(Value::Text(text))
            } else {
                Err(CodecError::BadNominal {
                    line,
                    attribute: attribute.name.clone(),
                    value: text,
                })
            }
        }
        _ => Ok(match raw {
            RawValue::Bare(text) => Value::Text(text),
            RawValue::Quoted(bytes) => Value::from_bytes(bytes),
            RawValue::Missing => Value::Missing,
        }),
    }
}

fn raw_text(raw: RawValue, line: usize, context: &'static str) -> Result<String> {
    match raw {
        RawValue::Bare(text) => Ok(text),
        RawValue::Quoted(bytes) => {
            String::from_utf8(bytes).map_err(|_| CodecError::InvalidText { line, context })
        }
        RawValue::Missing => Ok("?".to_string()),
    }
}
