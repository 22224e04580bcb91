//! Two-phase estimator interface shared by categorical encoders.

use polars::prelude::DataFrame;

use crate::encoder::Encoded;
use crate::error::Result;

/// A categorical encoder that learns from one frame and encodes others.
///
/// `fit` replaces any previously fitted state and returns the encoder so
/// calls can be chained:
///
/// ```ignore
/// let encoded = HelmertEncoder::default().fit(&train)?.transform(&test)?;
/// ```
pub trait CategoricalEncoder {
    /// Learn the encoding from `df`.
    fn fit(&mut self, df: &DataFrame) -> Result<&mut Self>;

    /// Encode `df` with the fitted state.
    ///
    /// # Errors
    /// Fails if the encoder has not been fitted or `df` has a different
    /// number of columns than the fit frame.
    fn transform(&self, df: &DataFrame) -> Result<Encoded>;

    /// Fit on `df`, then encode the same frame.
    fn fit_transform(&mut self, df: &DataFrame) -> Result<Encoded> {
        self.fit(df)?;
        self.transform(df)
    }
}
