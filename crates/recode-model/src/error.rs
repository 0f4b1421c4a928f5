//! Error type shared by the recode crates.

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors raised while parsing or applying a recode specification.
#[derive(Debug, Error)]
pub enum RecodeError {
    /// A recode expression is malformed.
    #[error("syntax error in clause {clause} ('{text}'): {message}")]
    Syntax {
        /// 1-based clause index (0 when the whole spec is at fault).
        clause: usize,
        text: String,
        message: String,
    },

    /// A range bound is inverted once `min`/`max` have been resolved.
    #[error("clause {clause}: lower bound {lower} is greater than upper bound {upper}")]
    Domain { clause: usize, lower: f64, upper: f64 },

    /// `min` or `max` was referenced but the input has no non-missing values.
    #[error("cannot resolve min/max: input has no non-missing values")]
    EmptyInput,

    #[error("column not found: {0}")]
    ColumnNotFound(String),

    #[error("polars error: {0}")]
    Polars(#[from] PolarsError),
}

impl RecodeError {
    /// Build a [`RecodeError::Syntax`] for the given clause.
    pub fn syntax(clause: usize, text: &str, message: impl Into<String>) -> Self {
        Self::Syntax {
            clause,
            text: text.trim().to_string(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RecodeError>;
