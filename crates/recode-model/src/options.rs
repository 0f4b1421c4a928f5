//! Configuration options for recoding.

use serde::{Deserialize, Serialize};

/// Options controlling frame-level recoding and label display.
///
/// Passed explicitly to every call that needs it; there is no global state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecodeOptions {
    /// Suffix appended to a column name to name its recoded copy.
    /// Default: `"_r"`.
    pub suffix: String,

    /// Keep the source column and add the recoded one next to it.
    /// When false the recoded column replaces the source column.
    /// Default: true.
    pub append: bool,

    /// Text shown for missing codes when rendering labels.
    /// Default: `"NA"`.
    pub missing_display: String,

    /// Write display labels instead of integer codes into recoded columns.
    /// Default: false.
    pub write_labels: bool,
}

impl Default for RecodeOptions {
    fn default() -> Self {
        Self {
            suffix: "_r".to_string(),
            append: true,
            missing_display: "NA".to_string(),
            write_labels: false,
        }
    }
}

impl RecodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    pub fn with_append(mut self, append: bool) -> Self {
        self.append = append;
        self
    }

    pub fn with_missing_display(mut self, display: impl Into<String>) -> Self {
        self.missing_display = display.into();
        self
    }

    pub fn with_write_labels(mut self, enable: bool) -> Self {
        self.write_labels = enable;
        self
    }

    /// Name of the output column for a source column.
    ///
    /// Replacing keeps the source name; appending adds the suffix.
    pub fn output_name(&self, column: &str) -> String {
        if self.append {
            format!("{column}{}", self.suffix)
        } else {
            column.to_string()
        }
    }
}
