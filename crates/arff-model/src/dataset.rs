//! Relations and the tabular working form.

use serde::{Deserialize, Serialize};

use crate::{Attribute, Row, Value};

/// A named relation: schema plus rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub rows: Vec<Row>,
}

impl Relation {
    pub fn new(name: impl Into<String>, attributes: Vec<Attribute>, rows: Vec<Row>) -> Self {
        Self {
            name: name.into(),
            attributes,
            rows,
        }
    }

    pub fn attribute_names(&self) -> Vec<String> {
        self.attributes.iter().map(|a| a.name.clone()).collect()
    }

    /// Drop the relation name and keep the tabular part.
    pub fn into_dataset(self) -> Dataset {
        Dataset::new(self.attributes, self.rows)
    }
}

/// Attribute list plus rows, the handoff between decoding and splitting.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Dataset {
    pub attributes: Vec<Attribute>,
    pub rows: Vec<Row>,
}

impl Dataset {
    pub fn new(attributes: Vec<Attribute>, rows: Vec<Row>) -> Self {
        Self { attributes, rows }
    }

    /// Same schema, no rows.
    pub fn empty_like(&self) -> Self {
        Self::new(self.attributes.clone(), Vec::new())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.attributes.iter().map(|a| a.name.clone()).collect()
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Values of one column in row order, or `None` for an unknown column.
    pub fn column(&self, name: &str) -> Option<Vec<&Value>> {
        self.attribute(name)?;
        Some(
            self.rows
                .iter()
                .map(|row| row.get(name).unwrap_or(&Value::Missing))
                .collect(),
        )
    }

    /// New dataset holding the rows at `indices`, in that order.
    ///
    /// Out-of-range indices are skipped.
    pub fn select(&self, indices: &[usize]) -> Self {
        let rows = indices
            .iter()
            .filter_map(|&idx| self.rows.get(idx).cloned())
            .collect();
        Self::new(self.attributes.clone(), rows)
    }

    /// Attach a relation name.
    pub fn to_relation(&self, name: impl Into<String>) -> Relation {
        Relation::new(name, self.attributes.clone(), self.rows.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AttributeType;

    fn sample() -> Dataset {
        let attributes = vec![
            Attribute::new("x", AttributeType::Numeric),
            Attribute::new("label", AttributeType::nominal(["a", "b"])),
        ];
        let names: Vec<String> = attributes.iter().map(|a| a.name.clone()).collect();
        let rows = vec![
            Row::aligned(&names, vec![Value::Number(1.0), Value::text("a")]),
            Row::aligned(&names, vec![Value::Number(2.0), Value::text("b")]),
            Row::aligned(&names, vec![Value::Number(3.0)]),
        ];
        Dataset::new(attributes, rows)
    }

    #[test]
    fn column_returns_values_in_row_order() {
        let ds = sample();
        let labels: Vec<String> = ds
            .column("label")
            .unwrap()
            .into_iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(labels, vec!["a", "b", "?"]);
        assert!(ds.column("missing").is_none());
    }

    #[test]
    fn select_keeps_schema() {
        let ds = sample();
        let subset = ds.select(&[2, 0, 99]);
        assert_eq!(subset.len(), 2);
        assert_eq!(subset.attributes, ds.attributes);
        assert_eq!(subset.rows[0], ds.rows[2]);
    }
}
