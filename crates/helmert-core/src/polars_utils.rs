//! Polars column helpers.
//!
//! Column-type detection and value rendering shared by the resolver,
//! the expansion step and the array conversion.

use polars::prelude::*;

use crate::error::Result;

/// Returns the column names of a frame as owned strings, in frame order.
pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect()
}

/// Returns true for dtypes that hold category labels rather than numbers.
pub fn is_string_like(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::String | DataType::Categorical(..) | DataType::Enum(..)
    )
}

/// Returns true for dtypes that can be cast to `f64` without losing meaning.
pub fn is_numeric(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Names of every string or categorical column in frame order.
pub fn string_columns(df: &DataFrame) -> Vec<String> {
    df.get_columns()
        .iter()
        .filter(|column| is_string_like(column.dtype()))
        .map(|column| column.name().to_string())
        .collect()
}

/// Renders every cell of a column as a string; nulls stay `None`.
///
/// Non-string columns are cast, so `1` and `"1"` render identically.
pub fn rendered_values(column: &Column) -> Result<Vec<Option<String>>> {
    let rendered = column.cast(&DataType::String)?;
    let values = rendered
        .str()?
        .iter()
        .map(|value| value.map(str::to_string))
        .collect();
    Ok(values)
}
