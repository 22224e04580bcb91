//! Invariant column detection and removal.

use std::collections::HashSet;

use polars::prelude::*;

use crate::error::Result;

/// Sample variance at or below which a generated column counts as constant.
pub const INVARIANT_VARIANCE_THRESHOLD: f64 = 1e-5;

/// Columns of `transformed` that did not come through `original` untouched.
///
/// Original columns listed in `mapped_cols` were replaced, so anything not in
/// `original \ mapped_cols` is generated. This includes `intercept`.
pub fn generated_columns(
    original: &DataFrame,
    transformed: &DataFrame,
    mapped_cols: &[String],
) -> Vec<String> {
    let untouched: HashSet<&str> = original
        .get_column_names()
        .into_iter()
        .map(|name| name.as_str())
        .filter(|name| !mapped_cols.iter().any(|col| col == name))
        .collect();
    transformed
        .get_column_names()
        .into_iter()
        .map(|name| name.as_str())
        .filter(|name| !untouched.contains(name))
        .map(str::to_string)
        .collect()
}

/// Generated columns whose sample variance is at most
/// [`INVARIANT_VARIANCE_THRESHOLD`].
///
/// Variance uses `ddof = 1` and skips nulls. Columns with fewer than two
/// non-null values have no variance and are kept.
pub fn compute_drop_list(
    original: &DataFrame,
    transformed: &DataFrame,
    mapped_cols: &[String],
) -> Result<Vec<String>> {
    let mut drop_cols = Vec::new();
    for name in generated_columns(original, transformed, mapped_cols) {
        let values = transformed.column(&name)?.cast(&DataType::Float64)?;
        let variance = values.f64()?.var(1);
        if variance.is_some_and(|var| var <= INVARIANT_VARIANCE_THRESHOLD) {
            drop_cols.push(name);
        }
    }
    Ok(drop_cols)
}

/// Removes every listed column that is present; absent names are skipped.
///
/// The row count is kept even when every column is dropped.
pub fn apply_drop(df: &DataFrame, drop_cols: &[String]) -> Result<DataFrame> {
    if drop_cols.is_empty() {
        return Ok(df.clone());
    }
    let kept: Vec<Column> = df
        .get_columns()
        .iter()
        .filter(|column| !drop_cols.iter().any(|drop| drop == column.name().as_str()))
        .cloned()
        .collect();
    if kept.is_empty() {
        return Ok(DataFrame::empty_with_height(df.height()));
    }
    Ok(DataFrame::new(kept)?)
}
