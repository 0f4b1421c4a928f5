//! Data model for recode specifications.
//!
//! A recode specification is a compact string such as
//! `"min:9=1 [low]; 10:12=2 [moderate]; 13:max=3 [high]; else=NA"` that
//! buckets numeric values into labelled integer codes. This crate holds the
//! parsed form of such a string, the labelled output it produces, the options
//! that control frame-level recoding, and the shared error type.

pub mod error;
pub mod labels;
pub mod options;
pub mod spec;

pub use error::{RecodeError, Result};
pub use labels::{LabelMap, LabelledSequence, LabelledValue};
pub use options::RecodeOptions;
pub use spec::{Bound, RecodeSpec, Rule, Target};
