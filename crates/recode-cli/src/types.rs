use std::path::PathBuf;

use recode_core::RecodeSummary;

#[derive(Debug)]
pub struct ApplyResult {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub labels_json: Option<PathBuf>,
    pub rows: usize,
    pub columns: Vec<RecodeSummary>,
}

