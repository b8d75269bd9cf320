//! Scalar cell values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single cell of a row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Value {
    Number(f64),
    Text(String),
    /// Byte content that was not valid UTF-8. Passed through untouched.
    Bytes(Vec<u8>),
    Missing,
}

impl Value {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Build a value from raw bytes, preferring UTF-8 text.
    ///
    /// Falls back to [`Value::Bytes`] when the bytes do not decode.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        match String::from_utf8(bytes) {
            Ok(text) => Self::Text(text),
            Err(err) => Self::Bytes(err.into_bytes()),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(v) => write!(f, "{v}"),
            Self::Text(s) => f.write_str(s),
            Self::Bytes(bytes) => f.write_str(&String::from_utf8_lossy(bytes)),
            Self::Missing => f.write_str("?"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_bytes_prefers_text() {
        assert_eq!(
            Value::from_bytes("caf\u{e9}".as_bytes().to_vec()),
            Value::text("caf\u{e9}")
        );
        assert_eq!(
            Value::from_bytes(vec![0x66, 0xff]),
            Value::Bytes(vec![0x66, 0xff])
        );
    }

    #[test]
    fn display_uses_shortest_form() {
        assert_eq!(Value::Number(2.0).to_string(), "2");
        assert_eq!(Value::Number(0.25).to_string(), "0.25");
        assert_eq!(Value::Missing.to_string(), "?");
    }
}
