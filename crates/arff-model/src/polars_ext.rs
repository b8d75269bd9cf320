//! Polars conversion for tabular inspection.

use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, PolarsResult, Series};

use crate::{Dataset, Value};

impl Dataset {
    /// Build a `DataFrame` with one column per attribute.
    ///
    /// Numeric attributes become `Float64` columns; every other attribute
    /// becomes a `String` column. Missing values are nulls.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let columns: Vec<Column> = self
            .attributes
            .iter()
            .map(|attribute| {
                let cells = self
                    .rows
                    .iter()
                    .map(|row| row.get(&attribute.name).unwrap_or(&Value::Missing));
                let series = if attribute.kind.is_numeric() {
                    let values: Vec<Option<f64>> = cells.map(Value::as_f64).collect();
                    Series::new(attribute.name.as_str().into(), values)
                } else {
                    let values: Vec<Option<String>> = cells
                        .map(|value| (!value.is_missing()).then(|| value.to_string()))
                        .collect();
                    Series::new(attribute.name.as_str().into(), values)
                };
                series.into_column()
            })
            .collect();
        DataFrame::new(columns)
    }
}
