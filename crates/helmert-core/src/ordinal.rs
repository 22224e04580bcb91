//! Category-to-code resolution.
//!
//! Each target column is fitted to the ordered set of its distinct values,
//! in order of first appearance. The value at position `i` gets code `i + 1`;
//! code [`UNKNOWN_CODE`] is left for values the fit never saw.

use std::collections::{HashMap, HashSet};

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::contrast::UNKNOWN_CODE;
use crate::error::{EncodeError, Result};
use crate::options::HandleUnknown;
use crate::polars_utils::rendered_values;

/// Fitted levels of a single column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnOrdinal {
    pub column: String,
    /// Distinct rendered values; position `i` has code `i + 1`.
    pub levels: Vec<String>,
}

impl ColumnOrdinal {
    fn fit(column: &Column) -> Result<Self> {
        let mut levels = Vec::new();
        let mut seen = HashSet::new();
        for value in rendered_values(column)?.into_iter().flatten() {
            if seen.insert(value.clone()) {
                levels.push(value);
            }
        }
        Ok(Self {
            column: column.name().to_string(),
            levels,
        })
    }

    /// `(value, code)` pairs ordered by code.
    pub fn codes(&self) -> impl Iterator<Item = (&str, u32)> {
        self.levels
            .iter()
            .enumerate()
            .map(|(idx, value)| (value.as_str(), idx as u32 + 1))
    }
}

/// Ordinal pre-encoder mapping raw categories to integer codes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrdinalResolver {
    mapping: Vec<ColumnOrdinal>,
    handle_unknown: HandleUnknown,
    impute_missing: bool,
}

impl OrdinalResolver {
    /// Learns the level set of every column in `cols`.
    pub fn fit(
        df: &DataFrame,
        cols: &[String],
        handle_unknown: HandleUnknown,
        impute_missing: bool,
    ) -> Result<Self> {
        let mut mapping = Vec::with_capacity(cols.len());
        for name in cols {
            let column = df
                .column(name)
                .map_err(|_| EncodeError::ColumnNotFound {
                    column: name.clone(),
                })?;
            let ordinal = ColumnOrdinal::fit(column)?;
            trace!(column = %name, levels = ordinal.levels.len(), "fitted ordinal levels");
            mapping.push(ordinal);
        }
        Ok(Self {
            mapping,
            handle_unknown,
            impute_missing,
        })
    }

    /// Fitted level sets, in target-column order.
    pub fn category_mapping(&self) -> &[ColumnOrdinal] {
        &self.mapping
    }

    /// Policy applied to unseen and missing values.
    pub fn handle_unknown(&self) -> HandleUnknown {
        self.handle_unknown
    }

    /// Replaces every fitted column with a nullable `UInt32` code column.
    ///
    /// Columns keep their position. Unseen and null values follow the
    /// unknown-value policy; with imputation disabled they stay null.
    pub fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
        let mut columns: Vec<Column> = df.get_columns().to_vec();
        for ordinal in &self.mapping {
            let position = df
                .get_column_index(&ordinal.column)
                .ok_or_else(|| EncodeError::ColumnNotFound {
                    column: ordinal.column.clone(),
                })?;
            let lookup: HashMap<&str, u32> = ordinal.codes().collect();
            let values = rendered_values(&columns[position])?;
            let mut codes: Vec<Option<u32>> = Vec::with_capacity(values.len());
            for value in &values {
                let known = value.as_deref().and_then(|v| lookup.get(v).copied());
                codes.push(match known {
                    Some(code) => Some(code),
                    None => self.resolve_unknown(&ordinal.column, value.as_deref())?,
                });
            }
            columns[position] = Column::new(ordinal.column.as_str().into(), codes);
        }
        Ok(DataFrame::new(columns)?)
    }

    pub fn impute_missing(&self) -> bool {
        self.impute_missing
    }

    fn resolve_unknown(&self, column: &str, value: Option<&str>) -> Result<Option<u32>> {
        if !self.impute_missing {
            return Ok(None);
        }
        match self.handle_unknown {
            HandleUnknown::Impute => Ok(Some(UNKNOWN_CODE)),
            HandleUnknown::Ignore => Ok(None),
            HandleUnknown::Error => Err(EncodeError::UnknownCategory {
                column: column.to_string(),
                value: value.unwrap_or("null").to_string(),
            }),
        }
    }
}
