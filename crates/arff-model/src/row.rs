//! Rows keyed by attribute name.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::Value;

/// One observation of a relation.
///
/// Keys always match the owning relation's attribute names.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Row {
    cells: BTreeMap<String, Value>,
}

impl Row {
    /// Align positional values to attribute names.
    ///
    /// Attributes past the end of `values` receive [`Value::Missing`].
    /// Surplus values are ignored; the codec rejects such lines earlier.
    pub fn aligned(names: &[String], values: Vec<Value>) -> Self {
        let mut values = values.into_iter();
        let cells = names
            .iter()
            .map(|name| (name.clone(), values.next().unwrap_or(Value::Missing)))
            .collect();
        Self { cells }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.cells.get(name)
    }

    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.cells.insert(name.into(), value);
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Values in the order of `names`. Unknown names yield `Missing`.
    pub fn values_in<'a>(&'a self, names: &'a [String]) -> impl Iterator<Item = &'a Value> + 'a {
        const MISSING: &Value = &Value::Missing;
        names
            .iter()
            .map(move |name| self.cells.get(name).unwrap_or(MISSING))
    }

    /// True when the row holds exactly the given attribute names.
    pub fn matches_schema(&self, names: &[String]) -> bool {
        self.cells.len() == names.len() && names.iter().all(|name| self.cells.contains_key(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn aligned_pads_missing_trailing_values() {
        let names = names(&["a", "b", "c"]);
        let row = Row::aligned(&names, vec![Value::Number(1.0)]);
        assert_eq!(row.len(), 3);
        assert_eq!(row.get("a"), Some(&Value::Number(1.0)));
        assert_eq!(row.get("b"), Some(&Value::Missing));
        assert_eq!(row.get("c"), Some(&Value::Missing));
        assert!(row.matches_schema(&names));
    }

    #[test]
    fn values_in_follows_attribute_order() {
        let names = names(&["z", "a"]);
        let row = Row::aligned(&names, vec![Value::text("first"), Value::text("second")]);
        let ordered: Vec<String> = row.values_in(&names).map(ToString::to_string).collect();
        assert_eq!(ordered, vec!["first", "second"]);
    }
}
