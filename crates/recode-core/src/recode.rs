//! One-call recoding: parse, evaluate, attach labels.

use recode_model::{LabelledSequence, Result};

use crate::evaluator::evaluate;
use crate::labels::attach_labels;
use crate::parser::parse;

/// Recode a value sequence with a spec string.
///
/// The spec is parsed for this call only; `min`/`max` are resolved against
/// `values`.
pub fn recode(spec: &str, values: &[Option<f64>]) -> Result<LabelledSequence> {
    let spec = parse(spec)?;
    let codes = evaluate(&spec, values)?;
    Ok(attach_labels(codes, &spec))
}
