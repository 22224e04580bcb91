//! Helmert contrast matrices.
//!
//! A fitted column with `k` levels is encoded by a matrix with `k + 1` rows
//! and `k - 1` contrast columns. Row `c` holds the coefficients for code `c`;
//! row [`UNKNOWN_CODE`] is all zeros so unknown or missing categories encode
//! as the grand mean instead of failing.
//!
//! The coefficients are the unscaled Helmert contrasts (R's `contr.helmert`):
//! contrast `j` compares level `j + 1` against the mean of levels `0..=j`.
//!
//! ```text
//! k = 3      c0   c1
//! code 0      0    0
//! code 1     -1   -1
//! code 2      1   -1
//! code 3      0    2
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Code reserved for unknown or missing categories.
pub const UNKNOWN_CODE: u32 = 0;

/// Contrast coefficients for one categorical column, indexed by code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContrastMatrix {
    levels: usize,
    rows: Vec<Vec<f64>>,
}

impl ContrastMatrix {
    /// Builds the Helmert matrix for `levels` categories.
    ///
    /// Fewer than two levels yields a matrix with no contrast columns.
    pub fn helmert(levels: usize) -> Self {
        let contrasts = levels.saturating_sub(1);
        let mut rows = Vec::with_capacity(levels + 1);
        rows.push(vec![0.0; contrasts]);
        for level in 0..levels {
            let row = (0..contrasts)
                .map(|j| {
                    if level <= j {
                        -1.0
                    } else if level == j + 1 {
                        (j + 1) as f64
                    } else {
                        0.0
                    }
                })
                .collect();
            rows.push(row);
        }
        Self { levels, rows }
    }

    /// Number of category levels the matrix was built for.
    pub fn levels(&self) -> usize {
        self.levels
    }

    /// Number of contrast (output) columns.
    pub fn n_contrasts(&self) -> usize {
        self.levels.saturating_sub(1)
    }

    /// Number of rows, including the unknown row.
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Coefficients for `code`, or `None` if the code has no row.
    pub fn row(&self, code: u32) -> Option<&[f64]> {
        self.rows.get(code as usize).map(Vec::as_slice)
    }

    /// Single coefficient lookup.
    pub fn value(&self, code: u32, contrast: usize) -> Option<f64> {
        self.row(code)?.get(contrast).copied()
    }

    /// Positional contrast names, `"0"` through `"k-2"`.
    pub fn contrast_names(&self) -> Vec<String> {
        (0..self.n_contrasts()).map(|i| i.to_string()).collect()
    }
}

impl fmt::Display for ContrastMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (code, row) in self.rows.iter().enumerate() {
            let values: Vec<String> = row.iter().map(|v| v.to_string()).collect();
            writeln!(f, "{code}: [{}]", values.join(", "))?;
        }
        Ok(())
    }
}

/// Contrast matrix bound to the column it encodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnContrast {
    pub column: String,
    pub matrix: ContrastMatrix,
}

impl ColumnContrast {
    pub fn new(column: impl Into<String>, matrix: ContrastMatrix) -> Self {
        Self {
            column: column.into(),
            matrix,
        }
    }

    /// Names of the columns generated for this entry: `<column>_<i>`.
    pub fn output_columns(&self) -> Vec<String> {
        (0..self.matrix.n_contrasts())
            .map(|i| format!("{}_{i}", self.column))
            .collect()
    }
}

/// Builds the contrast matrix for an ordered set of fitted levels.
pub fn fit_helmert_coding<T>(levels: &[T]) -> ContrastMatrix {
    ContrastMatrix::helmert(levels.len())
}
