//! DataFrame adapter.
//!
//! The core engine works on `&[Option<f64>]`. This module turns Polars
//! columns into that shape, runs the engine, and writes the results back as
//! new columns. Each column resolves its own `min`/`max`.

use polars::prelude::*;
use recode_common::column_to_values;
use recode_model::{LabelledSequence, RecodeError, RecodeOptions, RecodeSpec, Result};

use crate::evaluator::evaluate_detailed;
use crate::labels::attach_labels;
use crate::parser::parse;

/// Counts describing one recoded column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecodeSummary {
    /// Source column name as found in the frame.
    pub column: String,
    /// Name of the column written to the output frame.
    pub output: String,
    pub rows: usize,
    /// Rows missing (null, NaN, or unparseable) before recoding.
    pub source_missing: usize,
    /// Rows that received a code.
    pub recoded: usize,
    /// Non-missing rows that no rule matched.
    pub unmatched: usize,
}

/// A recoded column: labelled codes plus its summary.
#[derive(Debug, Clone)]
pub struct RecodedColumn {
    pub summary: RecodeSummary,
    pub values: LabelledSequence,
}

impl RecodedColumn {
    /// Codes as an `Int64` series named after the output column.
    pub fn codes_series(&self) -> Series {
        Series::new(self.summary.output.as_str().into(), self.values.codes())
    }

    /// Display labels as a `String` series; missing rows use
    /// `options.missing_display`.
    pub fn labels_series(&self, options: &RecodeOptions) -> Series {
        let labels: Vec<String> = (0..self.values.len())
            .filter_map(|idx| self.values.display(idx, options))
            .collect();
        Series::new(self.summary.output.as_str().into(), labels)
    }

    /// The series written to the frame, codes or labels per `options`.
    pub fn to_series(&self, options: &RecodeOptions) -> Series {
        if options.write_labels {
            self.labels_series(options)
        } else {
            self.codes_series()
        }
    }
}

/// A frame with recoded columns added or substituted.
#[derive(Debug, Clone)]
pub struct RecodedFrame {
    pub data: DataFrame,
    pub columns: Vec<RecodedColumn>,
}

/// Find a column by name, falling back to a case-insensitive match.
pub fn find_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
    if let Ok(column) = df.column(name) {
        return Ok(column);
    }
    let actual = df
        .get_column_names()
        .into_iter()
        .find(|candidate| candidate.as_str().eq_ignore_ascii_case(name))
        .ok_or_else(|| RecodeError::ColumnNotFound(name.to_string()))?;
    Ok(df.column(actual.as_str())?)
}

fn recode_with_spec(
    df: &DataFrame,
    column: &str,
    spec: &RecodeSpec,
    options: &RecodeOptions,
) -> Result<RecodedColumn> {
    let source = find_column(df, column)?;
    let values = column_to_values(source)?;
    let evaluation = evaluate_detailed(spec, &values)?;

    let summary = RecodeSummary {
        column: source.name().to_string(),
        output: options.output_name(source.name().as_str()),
        rows: values.len(),
        source_missing: evaluation.source_missing,
        recoded: values.len() - evaluation.output_missing(),
        unmatched: evaluation.unmatched,
    };
    tracing::debug!(
        column = %summary.column,
        output = %summary.output,
        recoded = summary.recoded,
        source_missing = summary.source_missing,
        unmatched = summary.unmatched,
        "recoded column"
    );

    Ok(RecodedColumn {
        summary,
        values: attach_labels(evaluation.codes, spec),
    })
}

/// Recode a single column of `df`.
///
/// The frame is not modified; use [`RecodedColumn::to_series`] to obtain the
/// output column.
pub fn recode_column(
    df: &DataFrame,
    column: &str,
    spec: &str,
    options: &RecodeOptions,
) -> Result<RecodedColumn> {
    let spec = parse(spec)?;
    recode_with_spec(df, column, &spec, options)
}

/// Recode several columns of `df` with one spec.
///
/// With `options.append` each recoded column is added under
/// `<column><suffix>`; otherwise it replaces its source column in place.
pub fn recode_columns(
    df: &DataFrame,
    columns: &[&str],
    spec: &str,
    options: &RecodeOptions,
) -> Result<RecodedFrame> {
    let spec = parse(spec)?;
    let mut data = df.clone();
    let mut recoded = Vec::with_capacity(columns.len());

    for column in columns {
        let result = recode_with_spec(df, column, &spec, options)?;
        data.with_column(result.to_series(options).into_column())?;
        recoded.push(result);
    }

    Ok(RecodedFrame {
        data,
        columns: recoded,
    })
}
