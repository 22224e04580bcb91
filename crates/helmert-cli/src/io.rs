//! CSV and fitted-encoder file handling.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use helmert_core::FittedHelmert;
use polars::prelude::*;
use tracing::debug;

/// Reads a CSV file with a header row into a DataFrame.
pub fn read_frame(path: &Path) -> Result<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(100))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .with_context(|| format!("open {}", path.display()))?
        .finish()
        .with_context(|| format!("parse CSV {}", path.display()))?;
    debug!(path = %path.display(), rows = df.height(), columns = df.width(), "read CSV");
    Ok(df)
}

/// Writes `df` as CSV to `output`, or to stdout when `None`.
pub fn write_frame(df: &mut DataFrame, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            let file =
                File::create(path).with_context(|| format!("create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            CsvWriter::new(&mut writer)
                .include_header(true)
                .finish(df)
                .with_context(|| format!("write CSV {}", path.display()))?;
            writer
                .flush()
                .with_context(|| format!("flush {}", path.display()))?;
        }
        None => {
            let mut stdout = io::stdout().lock();
            CsvWriter::new(&mut stdout)
                .include_header(true)
                .finish(df)
                .context("write CSV to stdout")?;
        }
    }
    Ok(())
}

/// Saves fitted encoder state as pretty-printed JSON.
pub fn save_encoder(fitted: &FittedHelmert, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), fitted)
        .with_context(|| format!("write encoder {}", path.display()))?;
    Ok(())
}

/// Loads fitted encoder state written by [`save_encoder`].
pub fn load_encoder(path: &Path) -> Result<FittedHelmert> {
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let fitted = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("read encoder {}", path.display()))?;
    Ok(fitted)
}
