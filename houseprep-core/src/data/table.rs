//! CSV → DataFrame loading for the raw competition files.
//!
//! Comma-delimited, header row, standard quoting. Column types are sniffed
//! from the leading rows. The literal `NA` (the dataset's missing marker) and
//! empty fields load as nulls.

use polars::prelude::*;
use std::path::Path;

use super::provider::DataError;

/// Rows inspected when sniffing column types.
pub const INFER_SCHEMA_ROWS: usize = 10_000;

/// Token the dataset uses for missing values.
pub const MISSING_TOKEN: &str = "NA";

/// Read a CSV file into a DataFrame.
///
/// Fails with [`DataError::Parse`] when the file is empty, has no data rows,
/// or is not valid CSV.
pub fn read_table(path: &Path) -> Result<DataFrame, DataError> {
    let parse_err = |reason: String| DataError::Parse {
        path: path.to_path_buf(),
        reason,
    };

    let meta = std::fs::metadata(path).map_err(|e| DataError::io(path, e))?;
    if meta.len() == 0 {
        return Err(parse_err("file is empty".into()));
    }

    let parse_options = CsvParseOptions::default()
        .with_separator(b',')
        .with_quote_char(Some(b'"'))
        .with_null_values(Some(NullValues::AllColumnsSingle(MISSING_TOKEN.into())));

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .with_parse_options(parse_options)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| parse_err(e.to_string()))?
        .finish()
        .map_err(|e| parse_err(e.to_string()))?;

    if df.width() == 0 {
        return Err(parse_err("no columns".into()));
    }
    if df.height() == 0 {
        return Err(parse_err("header present but no data rows".into()));
    }

    tracing::debug!(
        path = %path.display(),
        rows = df.height(),
        cols = df.width(),
        "parsed table"
    );
    Ok(df)
}
