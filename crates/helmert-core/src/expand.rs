//! Contrast column expansion.
//!
//! Replaces each coded column with one `Float64` column per contrast and
//! prepends a constant `intercept` column.

use std::collections::HashSet;

use polars::prelude::*;

use crate::contrast::ColumnContrast;
use crate::error::{EncodeError, Result};

/// Name of the constant column placed first in every encoded frame.
pub const INTERCEPT_COLUMN: &str = "intercept";

/// Expands coded columns into their contrast columns.
///
/// `df` must hold resolver codes (`UInt32`) in every mapped column. Each
/// mapped column is replaced in place by `<col>_0 .. <col>_{k-2}`; a column
/// with fewer than two levels is removed. Unmapped columns keep their
/// relative order and the result starts with `intercept`.
pub fn expand_columns(df: &DataFrame, mapping: &[ColumnContrast]) -> Result<DataFrame> {
    check_output_names(df, mapping)?;
    let height = df.height();
    let mut columns: Vec<Column> = Vec::with_capacity(df.width() + 1);
    columns.push(Column::new(INTERCEPT_COLUMN.into(), vec![1i64; height]));

    for column in df.get_columns() {
        match mapping.iter().find(|entry| entry.column == column.name().as_str()) {
            Some(entry) => columns.extend(contrast_columns(column, entry)?),
            None => columns.push(column.clone()),
        }
    }

    Ok(DataFrame::new(columns)?)
}

/// Fails if the expanded frame of `df` would hold the same name twice.
///
/// Generated `<col>_<i>` names and `intercept` share one namespace with the
/// pass-through columns.
pub fn check_output_names(df: &DataFrame, mapping: &[ColumnContrast]) -> Result<()> {
    let mut seen: HashSet<String> = HashSet::new();
    seen.insert(INTERCEPT_COLUMN.to_string());
    for column in df.get_columns() {
        let names = match mapping.iter().find(|entry| entry.column == column.name().as_str()) {
            Some(entry) => entry.output_columns(),
            None => vec![column.name().to_string()],
        };
        for name in names {
            if !seen.insert(name.clone()) {
                return Err(EncodeError::DuplicateOutputColumn { column: name });
            }
        }
    }
    Ok(())
}

/// Looks up every row's code in the entry's matrix, one column per contrast.
fn contrast_columns(codes: &Column, entry: &ColumnContrast) -> Result<Vec<Column>> {
    let matrix = &entry.matrix;
    if matrix.n_contrasts() == 0 {
        return Ok(Vec::new());
    }

    let codes = codes.cast(&DataType::UInt32)?;
    let codes = codes.u32()?;
    let mut rows: Vec<Option<&[f64]>> = Vec::with_capacity(codes.len());
    for code in codes.iter() {
        let row = match code {
            Some(code) => Some(matrix.row(code).ok_or_else(|| EncodeError::CodeOutOfRange {
                column: entry.column.clone(),
                code,
                levels: matrix.levels(),
            })?),
            None => None,
        };
        rows.push(row);
    }

    let generated = entry
        .output_columns()
        .into_iter()
        .enumerate()
        .map(|(contrast, name)| {
            let values: Vec<Option<f64>> = rows
                .iter()
                .map(|row| row.map(|coefficients| coefficients[contrast]))
                .collect();
            Column::new(name.into(), values)
        })
        .collect();
    Ok(generated)
}
