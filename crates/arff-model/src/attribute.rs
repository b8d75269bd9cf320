//! Attribute declarations.

use serde::{Deserialize, Serialize};

/// Type descriptor of an ARFF attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum AttributeType {
    Numeric,
    Real,
    Integer,
    String,
    /// `DATE` with its optional date format, kept verbatim.
    Date(Option<String>),
    /// Enumerated nominal values in declaration order.
    Nominal(Vec<String>),
}

impl AttributeType {
    /// Build a nominal type from any list of values.
    pub fn nominal<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Nominal(values.into_iter().map(Into::into).collect())
    }

    /// True for NUMERIC, REAL and INTEGER attributes.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Numeric | Self::Real | Self::Integer)
    }

    pub fn is_nominal(&self) -> bool {
        matches!(self, Self::Nominal(_))
    }

    /// Declared nominal values, if this is a nominal attribute.
    pub fn nominal_values(&self) -> Option<&[String]> {
        match self {
            Self::Nominal(values) => Some(values),
            _ => None,
        }
    }

    /// Short label used in summaries and logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Real => "real",
            Self::Integer => "integer",
            Self::String => "string",
            Self::Date(_) => "date",
            Self::Nominal(_) => "nominal",
        }
    }
}

/// A named, typed column of a relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub kind: AttributeType,
}

impl Attribute {
    pub fn new(name: impl Into<String>, kind: AttributeType) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// A declaration that carried no explicit type. Treated as numeric.
    pub fn untyped(name: impl Into<String>) -> Self {
        Self::new(name, AttributeType::Numeric)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untyped_defaults_to_numeric() {
        let attr = Attribute::untyped("src_bytes");
        assert_eq!(attr.kind, AttributeType::Numeric);
        assert!(attr.kind.is_numeric());
    }

    #[test]
    fn nominal_values_keep_order() {
        let kind = AttributeType::nominal(["tcp", "udp", "icmp"]);
        assert!(kind.is_nominal());
        assert_eq!(
            kind.nominal_values(),
            Some(&["tcp".to_string(), "udp".to_string(), "icmp".to_string()][..])
        );
        assert_eq!(AttributeType::Real.nominal_values(), None);
    }
}
