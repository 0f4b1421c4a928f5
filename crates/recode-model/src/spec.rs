//! Parsed recode specification.
//!
//! A [`RecodeSpec`] is an ordered list of [`Rule`]s. Evaluation scans the rules
//! in declared order and the first match wins, so overlapping ranges and
//! duplicate target codes are both legal.
//!
//! ## Clause forms
//!
//! ```text
//! min:9=1 [low]      range, lower bound resolved from the input
//! 1,3,5=2            exact values
//! NA=0               source-missing values
//! else=NA            everything not matched above
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// One end of a range clause.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Bound {
    /// Literal number.
    Number(f64),
    /// Smallest non-missing value observed in the input.
    Min,
    /// Largest non-missing value observed in the input.
    Max,
}

impl Bound {
    /// Returns true for `min`/`max`.
    pub fn is_symbolic(&self) -> bool {
        matches!(self, Bound::Min | Bound::Max)
    }

    /// Substitute the realized extrema for symbolic bounds.
    pub fn resolve(&self, min: f64, max: f64) -> f64 {
        match self {
            Bound::Number(value) => *value,
            Bound::Min => min,
            Bound::Max => max,
        }
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Number(value) => write!(f, "{value}"),
            Bound::Min => f.write_str("min"),
            Bound::Max => f.write_str("max"),
        }
    }
}

/// Output of a matching rule: an integer code or the missing marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Target {
    Code(i64),
    Missing,
}

impl Target {
    /// The target as an optional code (`None` for the missing marker).
    pub fn code(&self) -> Option<i64> {
        match self {
            Target::Code(code) => Some(*code),
            Target::Missing => None,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Code(code) => write!(f, "{code}"),
            Target::Missing => f.write_str("NA"),
        }
    }
}

/// A single clause of a recode specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Rule {
    /// Inclusive interval `lower:upper`.
    Range {
        lower: Bound,
        upper: Bound,
        target: Target,
        label: Option<String>,
    },

    /// Exact match against one or more listed values.
    Value {
        values: Vec<f64>,
        target: Target,
        label: Option<String>,
    },

    /// Any non-missing value not matched by an earlier rule.
    Else {
        target: Target,
        label: Option<String>,
    },

    /// Source-missing values (`NA=...`).
    Missing {
        target: Target,
        label: Option<String>,
    },
}

impl Rule {
    pub fn target(&self) -> Target {
        match self {
            Rule::Range { target, .. }
            | Rule::Value { target, .. }
            | Rule::Else { target, .. }
            | Rule::Missing { target, .. } => *target,
        }
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            Rule::Range { label, .. }
            | Rule::Value { label, .. }
            | Rule::Else { label, .. }
            | Rule::Missing { label, .. } => label.as_deref(),
        }
    }

    /// Returns true if this rule needs the input's `min` or `max`.
    pub fn uses_symbolic_bound(&self) -> bool {
        match self {
            Rule::Range { lower, upper, .. } => lower.is_symbolic() || upper.is_symbolic(),
            _ => false,
        }
    }

    /// Short name of the clause kind, used in logs and listings.
    pub fn kind(&self) -> &'static str {
        match self {
            Rule::Range { .. } => "range",
            Rule::Value { .. } => "value",
            Rule::Else { .. } => "else",
            Rule::Missing { .. } => "missing",
        }
    }

    /// The condition half of the clause, rendered back in spec syntax.
    pub fn condition(&self) -> String {
        match self {
            Rule::Range { lower, upper, .. } => format!("{lower}:{upper}"),
            Rule::Value { values, .. } => values
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(","),
            Rule::Else { .. } => "else".to_string(),
            Rule::Missing { .. } => "NA".to_string(),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.condition(), self.target())?;
        if let Some(label) = self.label() {
            write!(f, " [{label}]")?;
        }
        Ok(())
    }
}

/// An ordered, immutable set of recode rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecodeSpec {
    rules: Vec<Rule>,
}

impl RecodeSpec {
    /// Wrap an already-validated rule list.
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Rules in declared order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Returns true if any range refers to `min` or `max`.
    pub fn uses_symbolic_bounds(&self) -> bool {
        self.rules.iter().any(Rule::uses_symbolic_bound)
    }

    /// The explicit `NA=...` rule, if any.
    pub fn missing_rule(&self) -> Option<&Rule> {
        self.rules.iter().find(|r| matches!(r, Rule::Missing { .. }))
    }

    /// The trailing `else=...` rule, if any.
    pub fn else_rule(&self) -> Option<&Rule> {
        self.rules.iter().find(|r| matches!(r, Rule::Else { .. }))
    }
}

impl fmt::Display for RecodeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, rule) in self.rules.iter().enumerate() {
            if idx > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{rule}")?;
        }
        Ok(())
    }
}
