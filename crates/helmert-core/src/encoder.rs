//! Helmert encoder façade.
//!
//! [`HelmertEncoder`] holds the configuration and, once fitted, a
//! [`FittedHelmert`] with everything learned from the fit frame: the column
//! count, the ordinal resolver, one contrast matrix per encoded column and the
//! invariant-drop list. The fitted state is immutable and serializable.

use ndarray::Array2;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span, info};

use crate::contrast::{ColumnContrast, fit_helmert_coding};
use crate::error::{EncodeError, Result};
use crate::expand::{INTERCEPT_COLUMN, check_output_names, expand_columns};
use crate::invariant::{apply_drop, compute_drop_list};
use crate::options::{EncoderOptions, OutputKind};
use crate::ordinal::OrdinalResolver;
use crate::polars_utils::{column_names, is_numeric, string_columns};
use crate::traits::CategoricalEncoder;

/// Result of a transform: a frame or a dense numeric array.
#[derive(Debug, Clone)]
pub enum Encoded {
    Frame(DataFrame),
    Array(Array2<f64>),
}

impl Encoded {
    pub fn as_frame(&self) -> Option<&DataFrame> {
        match self {
            Encoded::Frame(df) => Some(df),
            Encoded::Array(_) => None,
        }
    }

    pub fn into_frame(self) -> Option<DataFrame> {
        match self {
            Encoded::Frame(df) => Some(df),
            Encoded::Array(_) => None,
        }
    }

    pub fn into_array(self) -> Option<Array2<f64>> {
        match self {
            Encoded::Frame(_) => None,
            Encoded::Array(array) => Some(array),
        }
    }

    /// `(rows, columns)` of the encoded data.
    pub fn shape(&self) -> (usize, usize) {
        match self {
            Encoded::Frame(df) => df.shape(),
            Encoded::Array(array) => array.dim(),
        }
    }
}

/// Converts a frame of numeric columns to a row-major `Array2<f64>`.
///
/// Nulls become `NaN`. Any non-numeric column is an error rather than being
/// silently coerced.
pub fn to_array(df: &DataFrame) -> Result<Array2<f64>> {
    if let Some(column) = df.get_columns().iter().find(|c| !is_numeric(c.dtype())) {
        return Err(EncodeError::NonNumericOutput {
            column: column.name().to_string(),
        });
    }
    Ok(df.to_ndarray::<Float64Type>(IndexOrder::C)?)
}

/// State learned by fitting a Helmert encoder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedHelmert {
    options: EncoderOptions,
    dim: usize,
    input_columns: Vec<String>,
    cols: Vec<String>,
    ordinal: OrdinalResolver,
    mapping: Vec<ColumnContrast>,
    drop_cols: Vec<String>,
}

impl FittedHelmert {
    /// Fits contrast matrices for the target columns of `df`.
    pub fn fit(df: &DataFrame, options: &EncoderOptions) -> Result<Self> {
        options.validate()?;
        let span = debug_span!("helmert_fit", rows = df.height(), columns = df.width());
        let _guard = span.enter();

        let cols = match &options.cols {
            Some(cols) => {
                for col in cols {
                    if df.get_column_index(col).is_none() {
                        return Err(EncodeError::ColumnNotFound {
                            column: col.clone(),
                        });
                    }
                }
                cols.clone()
            }
            None => string_columns(df),
        };

        let ordinal =
            OrdinalResolver::fit(df, &cols, options.handle_unknown, options.impute_missing)?;
        let mapping: Vec<ColumnContrast> = ordinal
            .category_mapping()
            .iter()
            .map(|switch| {
                ColumnContrast::new(switch.column.as_str(), fit_helmert_coding(&switch.levels))
            })
            .collect();
        check_output_names(df, &mapping)?;

        let mut fitted = Self {
            options: options.clone(),
            dim: df.width(),
            input_columns: column_names(df),
            cols,
            ordinal,
            mapping,
            drop_cols: Vec::new(),
        };

        if options.drop_invariant && !fitted.cols.is_empty() {
            let trial = fitted.encode_frame(df)?;
            fitted.drop_cols = compute_drop_list(df, &trial, &fitted.cols)?;
        }

        let contrasts: usize = fitted.mapping.iter().map(|m| m.matrix.n_contrasts()).sum();
        if options.verbose > 0 {
            info!(
                columns = ?fitted.cols,
                contrasts,
                dropped = ?fitted.drop_cols,
                "fitted Helmert encoder"
            );
        } else {
            debug!(
                columns = ?fitted.cols,
                contrasts,
                dropped = ?fitted.drop_cols,
                "fitted Helmert encoder"
            );
        }

        Ok(fitted)
    }

    /// Encodes `df`, returning the configured output kind.
    pub fn transform(&self, df: &DataFrame) -> Result<Encoded> {
        let frame = self.transform_frame(df)?;
        match self.options.output {
            OutputKind::Frame => Ok(Encoded::Frame(frame)),
            OutputKind::Array => Ok(Encoded::Array(to_array(&frame)?)),
        }
    }

    /// Encodes `df` and always returns a frame.
    pub fn transform_frame(&self, df: &DataFrame) -> Result<DataFrame> {
        if df.width() != self.dim {
            return Err(EncodeError::DimensionMismatch {
                expected: self.dim,
                got: df.width(),
            });
        }
        if self.cols.is_empty() {
            return Ok(df.clone());
        }

        let span = debug_span!("helmert_transform", rows = df.height());
        let _guard = span.enter();
        let encoded = self.encode_frame(df)?;
        if self.options.verbose > 0 {
            info!(columns = encoded.width(), "encoded frame");
        } else {
            debug!(columns = encoded.width(), "encoded frame");
        }
        Ok(encoded)
    }

    fn encode_frame(&self, df: &DataFrame) -> Result<DataFrame> {
        let coded = self.ordinal.transform(df)?;
        let expanded = expand_columns(&coded, &self.mapping)?;
        apply_drop(&expanded, &self.drop_cols)
    }

    /// Output column names for a frame with the fitted columns.
    pub fn feature_names(&self) -> Vec<String> {
        if self.cols.is_empty() {
            return self.input_columns.clone();
        }
        let mut names = vec![INTERCEPT_COLUMN.to_string()];
        for column in &self.input_columns {
            match self.mapping.iter().find(|entry| &entry.column == column) {
                Some(entry) => names.extend(entry.output_columns()),
                None => names.push(column.clone()),
            }
        }
        names.retain(|name| !self.drop_cols.contains(name));
        names
    }

    /// Column count of the fit frame.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Encoded columns, in fit order.
    pub fn cols(&self) -> &[String] {
        &self.cols
    }

    pub fn mapping(&self) -> &[ColumnContrast] {
        &self.mapping
    }

    pub fn ordinal(&self) -> &OrdinalResolver {
        &self.ordinal
    }

    /// Generated columns removed from every transform.
    pub fn drop_cols(&self) -> &[String] {
        &self.drop_cols
    }

    pub fn options(&self) -> &EncoderOptions {
        &self.options
    }
}

/// Helmert contrast encoder with a fit/transform lifecycle.
#[derive(Debug, Clone, Default)]
pub struct HelmertEncoder {
    options: EncoderOptions,
    fitted: Option<FittedHelmert>,
}

impl HelmertEncoder {
    /// Creates an unfitted encoder after validating `options`.
    pub fn new(options: EncoderOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            options,
            fitted: None,
        })
    }

    /// Wraps previously fitted state, e.g. one loaded from disk.
    pub fn from_fitted(fitted: FittedHelmert) -> Self {
        Self {
            options: fitted.options.clone(),
            fitted: Some(fitted),
        }
    }

    pub fn options(&self) -> &EncoderOptions {
        &self.options
    }

    pub fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }

    pub fn fitted(&self) -> Result<&FittedHelmert> {
        self.fitted.as_ref().ok_or(EncodeError::NotFitted)
    }

    pub fn into_fitted(self) -> Result<FittedHelmert> {
        self.fitted.ok_or(EncodeError::NotFitted)
    }
}

impl CategoricalEncoder for HelmertEncoder {
    fn fit(&mut self, df: &DataFrame) -> Result<&mut Self> {
        self.fitted = Some(FittedHelmert::fit(df, &self.options)?);
        Ok(self)
    }

    fn transform(&self, df: &DataFrame) -> Result<Encoded> {
        self.fitted()?.transform(df)
    }
}
