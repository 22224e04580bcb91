//! Helmert contrast coding for categorical columns.
//!
//! This crate turns categorical columns of a polars `DataFrame` into numeric
//! Helmert contrast columns:
//!
//! - **contrast**: Helmert contrast matrices, one per encoded column
//! - **ordinal**: category-to-code resolution with an unknown-value policy
//! - **expand**: row-wise matrix lookup that replaces coded columns
//! - **invariant**: near-constant generated column detection and removal
//! - **encoder**: the fit/transform façade and its serializable fitted state
//!
//! # Example
//!
//! ```ignore
//! use helmert_core::{CategoricalEncoder, EncoderOptions, HelmertEncoder};
//!
//! let mut encoder = HelmertEncoder::new(EncoderOptions::new().with_cols(["color"]))?;
//! let encoded = encoder.fit(&train)?.transform(&test)?;
//! ```

pub mod contrast;
pub mod encoder;
pub mod error;
pub mod expand;
pub mod invariant;
pub mod options;
pub mod ordinal;
pub mod polars_utils;
pub mod traits;

pub use contrast::{ColumnContrast, ContrastMatrix, UNKNOWN_CODE, fit_helmert_coding};
pub use encoder::{Encoded, FittedHelmert, HelmertEncoder, to_array};
pub use error::{EncodeError, Result};
pub use expand::{INTERCEPT_COLUMN, check_output_names, expand_columns};
pub use invariant::{
    INVARIANT_VARIANCE_THRESHOLD, apply_drop, compute_drop_list, generated_columns,
};
pub use options::{EncoderOptions, HandleUnknown, OutputKind};
pub use ordinal::{ColumnOrdinal, OrdinalResolver};
pub use traits::CategoricalEncoder;
