//! Polars AnyValue utility functions.
//!
//! This module provides helper functions for reading numeric values out of
//! Polars columns. Every helper maps nulls, NaN, blank strings, and the usual
//! missing tokens to `None`.

use std::collections::BTreeSet;

use polars::prelude::*;

/// Tokens treated as missing when they appear in a string column.
pub const MISSING_TOKENS: &[&str] = &["NA", "N/A", "NAN", "NULL", "."];

/// Spellings of [`MISSING_TOKENS`] for readers that match null values exactly.
///
/// Each token appears upper-case, lower-case and capitalized (`NA`, `na`, `Na`).
pub fn missing_token_spellings() -> Vec<String> {
    let mut spellings = BTreeSet::new();
    for token in MISSING_TOKENS {
        let lower = token.to_ascii_lowercase();
        let mut capitalized = lower.clone();
        if let Some(first) = capitalized.get_mut(..1) {
            first.make_ascii_uppercase();
        }
        spellings.insert((*token).to_string());
        spellings.insert(lower);
        spellings.insert(capitalized);
    }
    spellings.into_iter().collect()
}

/// Returns true if a string cell denotes a missing value.
pub fn is_missing_token(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty()
        || MISSING_TOKENS
            .iter()
            .any(|token| trimmed.eq_ignore_ascii_case(token))
}

/// Parses a string as `f64`, returning `None` for missing or invalid strings.
///
/// NaN is reported as missing so that callers never see it as a value.
pub fn parse_f64(value: &str) -> Option<f64> {
    if is_missing_token(value) {
        return None;
    }
    value.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// Converts an `AnyValue` to `f64`, returning `None` for non-numeric or null values.
///
/// Handles integer types, floating-point types, booleans (0/1), and string parsing.
pub fn any_to_f64(value: AnyValue<'_>) -> Option<f64> {
    let number = match value {
        AnyValue::Null => None,
        AnyValue::Int8(v) => Some(f64::from(v)),
        AnyValue::Int16(v) => Some(f64::from(v)),
        AnyValue::Int32(v) => Some(f64::from(v)),
        AnyValue::Int64(v) => Some(v as f64),
        AnyValue::UInt8(v) => Some(f64::from(v)),
        AnyValue::UInt16(v) => Some(f64::from(v)),
        AnyValue::UInt32(v) => Some(f64::from(v)),
        AnyValue::UInt64(v) => Some(v as f64),
        AnyValue::Float32(v) => Some(f64::from(v)),
        AnyValue::Float64(v) => Some(v),
        AnyValue::Boolean(b) => Some(if b { 1.0 } else { 0.0 }),
        AnyValue::String(s) => parse_f64(s),
        AnyValue::StringOwned(s) => parse_f64(&s),
        _ => None,
    };
    number.filter(|v| !v.is_nan())
}

/// Extracts a column as a numeric sequence with `None` as the missing marker.
///
/// Unparseable string cells become `None`; callers that care can compare the
/// null count of the input with the number of `None`s returned.
pub fn column_to_values(column: &Column) -> PolarsResult<Vec<Option<f64>>> {
    let mut values = Vec::with_capacity(column.len());
    for idx in 0..column.len() {
        values.push(any_to_f64(column.get(idx)?));
    }
    Ok(values)
}
