use anyhow::{Context, Result};
use helmert_core::{
    CategoricalEncoder, EncoderOptions, FittedHelmert, HandleUnknown, HelmertEncoder,
};
use polars::prelude::DataFrame;
use tracing::{info, info_span};

use crate::cli::{EncodeArgs, EncoderArgs, FitArgs, HandleUnknownArg, InspectArgs, TransformArgs};
use crate::io::{load_encoder, read_frame, save_encoder, write_frame};
use crate::summary::{print_contrast_tables, print_fit_summary};

pub fn run_encode(args: &EncodeArgs, verbose: u8) -> Result<()> {
    let span = info_span!("encode", input = %args.input.display());
    let _guard = span.enter();
    let df = read_frame(&args.input)?;
    let fitted = fit(&df, &args.encoder, verbose)?;
    let mut encoded = fitted.transform_frame(&df).context("transform input")?;
    write_frame(&mut encoded, args.output.as_deref())?;
    if let Some(path) = &args.save_encoder {
        save_encoder(&fitted, path)?;
        info!(path = %path.display(), "saved encoder");
    }
    info!(rows = encoded.height(), columns = encoded.width(), "encoded");
    if args.output.is_some() {
        print_fit_summary(&fitted);
    }
    Ok(())
}

pub fn run_fit(args: &FitArgs, verbose: u8) -> Result<()> {
    let span = info_span!("fit", input = %args.input.display());
    let _guard = span.enter();
    let df = read_frame(&args.input)?;
    let fitted = fit(&df, &args.encoder, verbose)?;
    save_encoder(&fitted, &args.encoder_path)?;
    info!(path = %args.encoder_path.display(), "saved encoder");
    print_fit_summary(&fitted);
    Ok(())
}

pub fn run_transform(args: &TransformArgs) -> Result<()> {
    let span = info_span!("transform", input = %args.input.display());
    let _guard = span.enter();
    let fitted = load_encoder(&args.encoder_path)?;
    let df = read_frame(&args.input)?;
    let mut encoded = fitted.transform_frame(&df).context("transform input")?;
    write_frame(&mut encoded, args.output.as_deref())?;
    info!(rows = encoded.height(), columns = encoded.width(), "encoded");
    Ok(())
}

pub fn run_inspect(args: &InspectArgs) -> Result<()> {
    let fitted = load_encoder(&args.encoder_path)?;
    print_fit_summary(&fitted);
    print_contrast_tables(&fitted);
    Ok(())
}

fn fit(df: &DataFrame, args: &EncoderArgs, verbose: u8) -> Result<FittedHelmert> {
    let mut encoder =
        HelmertEncoder::new(encoder_options(args, verbose)).context("invalid encoder options")?;
    encoder.fit(df).context("fit encoder")?;
    Ok(encoder.into_fitted()?)
}

/// Maps the shared encoder flags onto [`EncoderOptions`].
pub fn encoder_options(args: &EncoderArgs, verbose: u8) -> EncoderOptions {
    let mut options = EncoderOptions::new()
        .with_drop_invariant(args.drop_invariant)
        .with_handle_unknown(match args.handle_unknown {
            HandleUnknownArg::Error => HandleUnknown::Error,
            HandleUnknownArg::Ignore => HandleUnknown::Ignore,
            HandleUnknownArg::Impute => HandleUnknown::Impute,
        })
        .with_impute_missing(!args.no_impute_missing)
        .with_verbose(verbose);
    if let Some(cols) = &args.cols {
        options = options.with_cols(cols.iter().cloned());
    }
    options
}
