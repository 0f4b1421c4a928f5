//! CSV input and output for the CLI.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::*;
use recode_common::missing_token_spellings;
use recode_core::{LabelMap, RecodedColumn};

/// Read a CSV file with a header row into a DataFrame.
///
/// Missing-value tokens (`NA`, `.`, `NULL`, ...) are read as nulls in every
/// column, so a token appearing after the schema inference window does not
/// fail a numeric column.
pub fn read_csv(path: &Path) -> Result<DataFrame> {
    let null_values = missing_token_spellings()
        .into_iter()
        .map(PlSmallStr::from)
        .collect();
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(100))
        .with_parse_options(
            CsvParseOptions::default().with_null_values(Some(NullValues::AllColumns(null_values))),
        )
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .with_context(|| format!("open {}", path.display()))?
        .finish()
        .with_context(|| format!("parse CSV {}", path.display()))
}

/// Write a DataFrame as CSV to `path`, or to stdout when `path` is None.
pub fn write_csv(df: &mut DataFrame, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            let mut file =
                File::create(path).with_context(|| format!("create {}", path.display()))?;
            CsvWriter::new(&mut file)
                .include_header(true)
                .finish(df)
                .with_context(|| format!("write CSV {}", path.display()))
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            CsvWriter::new(&mut handle)
                .include_header(true)
                .finish(df)
                .context("write CSV to stdout")?;
            handle.flush().context("flush stdout")
        }
    }
}

/// Label maps keyed by output column name.
pub fn label_maps(columns: &[RecodedColumn]) -> BTreeMap<String, LabelMap> {
    columns
        .iter()
        .map(|column| (column.summary.output.clone(), column.values.labels().clone()))
        .collect()
}

/// Write the label maps of recoded columns as pretty-printed JSON.
pub fn write_label_maps(columns: &[RecodedColumn], path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    serde_json::to_writer_pretty(file, &label_maps(columns))
        .with_context(|| format!("write labels {}", path.display()))
}
