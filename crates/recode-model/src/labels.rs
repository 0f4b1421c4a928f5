//! Labelled categorical output.
//!
//! A recoded sequence carries one integer code (or missing) per input element
//! and a single [`LabelMap`] shared by every element:
//!
//! ```text
//! codes:  [1, 1, 2, NA, 3]
//! labels: {1: "low", 2: "moderate", 3: "high"}
//! ```
//!
//! Codes without a label display as the raw code.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::options::RecodeOptions;

/// Mapping from output code to display label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelMap {
    labels: BTreeMap<i64, String>,
}

impl LabelMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a label for a code.
    ///
    /// The first label registered for a code is kept; later ones are ignored.
    /// Returns true if the label was stored.
    pub fn insert(&mut self, code: i64, label: impl Into<String>) -> bool {
        if self.labels.contains_key(&code) {
            return false;
        }
        self.labels.insert(code, label.into());
        true
    }

    pub fn get(&self, code: i64) -> Option<&str> {
        self.labels.get(&code).map(String::as_str)
    }

    pub fn contains(&self, code: i64) -> bool {
        self.labels.contains_key(&code)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Labelled codes in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, &str)> {
        self.labels.iter().map(|(code, label)| (*code, label.as_str()))
    }

    /// Display text for a code: its label, or the code itself.
    pub fn display(&self, code: i64) -> String {
        self.get(code)
            .map_or_else(|| code.to_string(), ToString::to_string)
    }
}

impl FromIterator<(i64, String)> for LabelMap {
    fn from_iter<I: IntoIterator<Item = (i64, String)>>(iter: I) -> Self {
        let mut map = LabelMap::new();
        for (code, label) in iter {
            map.insert(code, label);
        }
        map
    }
}

/// One element of a [`LabelledSequence`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelledValue<'a> {
    pub code: Option<i64>,
    pub label: Option<&'a str>,
}

/// Recoded values plus the label map they share.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelledSequence {
    codes: Vec<Option<i64>>,
    labels: Arc<LabelMap>,
}

impl LabelledSequence {
    pub fn new(codes: Vec<Option<i64>>, labels: LabelMap) -> Self {
        Self {
            codes,
            labels: Arc::new(labels),
        }
    }

    pub fn codes(&self) -> &[Option<i64>] {
        &self.codes
    }

    pub fn labels(&self) -> &LabelMap {
        &self.labels
    }

    /// Shared handle to the label map.
    pub fn shared_labels(&self) -> Arc<LabelMap> {
        Arc::clone(&self.labels)
    }

    pub fn label_for(&self, code: i64) -> Option<&str> {
        self.labels.get(code)
    }

    pub fn get(&self, idx: usize) -> Option<LabelledValue<'_>> {
        let code = *self.codes.get(idx)?;
        Some(LabelledValue {
            code,
            label: code.and_then(|c| self.labels.get(c)),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = LabelledValue<'_>> {
        self.codes.iter().map(|code| LabelledValue {
            code: *code,
            label: code.and_then(|c| self.labels.get(c)),
        })
    }

    /// Display text for the element at `idx`.
    ///
    /// Missing elements render as `options.missing_display`; out-of-range
    /// indices return `None`.
    pub fn display(&self, idx: usize, options: &RecodeOptions) -> Option<String> {
        let code = *self.codes.get(idx)?;
        Some(match code {
            Some(code) => self.labels.display(code),
            None => options.missing_display.clone(),
        })
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn missing_count(&self) -> usize {
        self.codes.iter().filter(|c| c.is_none()).count()
    }
}
