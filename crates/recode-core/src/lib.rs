//! Recode expression engine.
//!
//! Buckets numeric values into labelled integer codes using compact recode
//! specifications:
//!
//! ```text
//! min:9=1 [low]; 10:12=2 [moderate]; 13:max=3 [high]; else=NA
//! ```
//!
//! # Overview
//!
//! This crate provides:
//! - **Parsing**: [`parse`] turns a spec string into an ordered [`RecodeSpec`]
//! - **Evaluation**: [`evaluate`] resolves `min`/`max` against the input and
//!   maps every value through the first matching rule
//! - **Labelling**: [`attach_labels`] pairs the codes with the labels declared
//!   in the spec
//! - **Frames**: [`recode_columns`] applies a spec to Polars DataFrame columns
//!
//! # Example
//!
//! ```
//! use recode_core::recode;
//!
//! let values = [Some(5.0), Some(10.0), Some(20.0), None];
//! let result = recode("min:9=1 [low]; 10:12=2; 13:max=3 [high]", &values).unwrap();
//!
//! assert_eq!(result.codes(), &[Some(1), Some(2), Some(3), None]);
//! assert_eq!(result.label_for(3), Some("high"));
//! ```
//!
//! # Design Principles
//!
//! - **Ordered**: rules are scanned in declared order and the first match wins
//! - **Stateless functions**: every call parses and resolves afresh; nothing is cached
//! - **Explicit options**: frame-level behavior is driven by [`RecodeOptions`]

mod evaluator;
mod frame;
mod labels;
mod parser;
mod recode;

// Re-export the model so callers need a single dependency
pub use recode_model::{
    Bound, LabelMap, LabelledSequence, LabelledValue, RecodeError, RecodeOptions, RecodeSpec,
    Result, Rule, Target,
};

// Pipeline stages
pub use evaluator::{
    Evaluation, ResolvedRange, evaluate, evaluate_detailed, observed_range, resolve_range,
};
pub use labels::{attach_labels, label_map};
pub use parser::parse;
pub use recode::recode;

// DataFrame adapter
pub use frame::{
    RecodeSummary, RecodedColumn, RecodedFrame, find_column, recode_column, recode_columns,
};
