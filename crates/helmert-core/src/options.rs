//! Configuration options for the Helmert encoder.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EncodeError, Result};

/// Policy for categories that were not seen during fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HandleUnknown {
    /// Fail the transform with [`EncodeError::UnknownCategory`].
    Error,
    /// Leave the code missing; generated columns hold nulls for that row.
    Ignore,
    /// Map to code 0, which selects the all-zero contrast row.
    #[default]
    Impute,
}

impl HandleUnknown {
    pub fn as_str(self) -> &'static str {
        match self {
            HandleUnknown::Error => "error",
            HandleUnknown::Ignore => "ignore",
            HandleUnknown::Impute => "impute",
        }
    }
}

impl fmt::Display for HandleUnknown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HandleUnknown {
    type Err = EncodeError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "error" => Ok(HandleUnknown::Error),
            "ignore" => Ok(HandleUnknown::Ignore),
            "impute" => Ok(HandleUnknown::Impute),
            other => Err(EncodeError::InvalidOption(format!(
                "handle_unknown must be one of error, ignore, impute (got '{other}')"
            ))),
        }
    }
}

/// Shape of the value returned by `transform`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputKind {
    /// A polars `DataFrame` with named columns.
    #[default]
    Frame,
    /// A dense row-major `Array2<f64>`.
    Array,
}

/// Options controlling which columns are encoded and how.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncoderOptions {
    /// Columns to encode. `None` encodes every string column.
    pub cols: Option<Vec<String>>,

    /// Drop generated columns whose variance on the fit data is near zero.
    pub drop_invariant: bool,

    /// Return a `DataFrame` or a raw numeric array.
    pub output: OutputKind,

    /// Unknown-category policy applied by the ordinal resolver.
    pub handle_unknown: HandleUnknown,

    /// Apply `handle_unknown` at all. When false, unknown values stay missing.
    pub impute_missing: bool,

    /// Verbosity; promotes fit and transform log events from debug to info.
    pub verbose: u8,
}

impl Default for EncoderOptions {
    fn default() -> Self {
        Self {
            cols: None,
            drop_invariant: false,
            output: OutputKind::Frame,
            handle_unknown: HandleUnknown::Impute,
            impute_missing: true,
            verbose: 0,
        }
    }
}

impl EncoderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_cols<I, S>(mut self, cols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cols = Some(cols.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_drop_invariant(mut self, enable: bool) -> Self {
        self.drop_invariant = enable;
        self
    }

    #[must_use]
    pub fn with_output(mut self, output: OutputKind) -> Self {
        self.output = output;
        self
    }

    #[must_use]
    pub fn with_handle_unknown(mut self, policy: HandleUnknown) -> Self {
        self.handle_unknown = policy;
        self
    }

    #[must_use]
    pub fn with_impute_missing(mut self, enable: bool) -> Self {
        self.impute_missing = enable;
        self
    }

    #[must_use]
    pub fn with_verbose(mut self, level: u8) -> Self {
        self.verbose = level;
        self
    }

    /// Check the options for internal consistency.
    ///
    /// An explicit empty column list is valid and makes the encoder a
    /// pass-through. Duplicate column names are rejected.
    pub fn validate(&self) -> Result<()> {
        if let Some(cols) = &self.cols {
            let mut seen = BTreeSet::new();
            for col in cols {
                if !seen.insert(col.as_str()) {
                    return Err(EncodeError::InvalidOption(format!(
                        "column '{col}' listed more than once"
                    )));
                }
            }
        }
        Ok(())
    }
}
