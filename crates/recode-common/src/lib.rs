//! Shared utilities for recode crates.
//!
//! This crate provides the Polars helpers used to turn DataFrame columns into
//! plain numeric sequences with a missing marker.

pub mod polars;

// Re-export commonly used functions at crate root for convenience
pub use polars::{
    MISSING_TOKENS, any_to_f64, column_to_values, is_missing_token, missing_token_spellings,
    parse_f64,
};
