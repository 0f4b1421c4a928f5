//! Rule evaluation.
//!
//! Evaluation runs in one pass over the input:
//!
//! 1. Compute `min`/`max` over the non-missing values.
//! 2. Resolve every range clause against those extrema.
//! 3. Map each value to the target of the first rule that matches it.
//!
//! Missing inputs only match an explicit `NA=...` clause; non-missing inputs
//! that match nothing fall through to `else`, or stay missing without one.

use recode_model::{Bound, RecodeError, RecodeSpec, Result, Rule, Target};

/// A range clause with `min`/`max` substituted by observed values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedRange {
    pub lower: f64,
    pub upper: f64,
}

impl ResolvedRange {
    /// Inclusive on both ends.
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }
}

#[derive(Debug, Clone, Copy)]
enum Matcher<'a> {
    Range(ResolvedRange),
    Values(&'a [f64]),
    Else,
    Missing,
}

#[derive(Debug, Clone, Copy)]
struct ResolvedRule<'a> {
    matcher: Matcher<'a>,
    target: Target,
}

/// Result of evaluating a spec, with per-rule match counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Evaluation {
    /// One output per input, in input order.
    pub codes: Vec<Option<i64>>,
    /// Number of inputs each rule matched, indexed like `spec.rules()`.
    pub rule_hits: Vec<usize>,
    /// Inputs that were missing before recoding.
    pub source_missing: usize,
    /// Non-missing inputs that no rule matched.
    pub unmatched: usize,
}

impl Evaluation {
    /// Outputs that are missing, whatever the reason.
    pub fn output_missing(&self) -> usize {
        self.codes.iter().filter(|c| c.is_none()).count()
    }
}

/// Smallest and largest non-missing value, or `None` if there are none.
///
/// NaN is treated as missing.
pub fn observed_range(values: &[Option<f64>]) -> Option<(f64, f64)> {
    values
        .iter()
        .filter_map(|v| v.filter(|x| !x.is_nan()))
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Resolve one range against the observed extrema.
///
/// `clause` is the 1-based clause index used in error reports.
pub fn resolve_range(
    clause: usize,
    lower: Bound,
    upper: Bound,
    extrema: Option<(f64, f64)>,
) -> Result<ResolvedRange> {
    let resolve = |bound: Bound| match (bound, extrema) {
        (Bound::Number(value), _) => Ok(value),
        (_, Some((min, max))) => Ok(bound.resolve(min, max)),
        (_, None) => Err(RecodeError::EmptyInput),
    };
    let range = ResolvedRange {
        lower: resolve(lower)?,
        upper: resolve(upper)?,
    };
    if range.lower > range.upper {
        return Err(RecodeError::Domain {
            clause,
            lower: range.lower,
            upper: range.upper,
        });
    }
    Ok(range)
}

fn resolve_rules(spec: &RecodeSpec, extrema: Option<(f64, f64)>) -> Result<Vec<ResolvedRule<'_>>> {
    spec.rules()
        .iter()
        .enumerate()
        .map(|(idx, rule)| {
            let matcher = match rule {
                Rule::Range { lower, upper, .. } => {
                    Matcher::Range(resolve_range(idx + 1, *lower, *upper, extrema)?)
                }
                Rule::Value { values, .. } => Matcher::Values(values),
                Rule::Else { .. } => Matcher::Else,
                Rule::Missing { .. } => Matcher::Missing,
            };
            Ok(ResolvedRule {
                matcher,
                target: rule.target(),
            })
        })
        .collect()
}

/// Index of the first rule matching a non-missing value, `else` included.
fn first_match(rules: &[ResolvedRule<'_>], value: f64) -> Option<usize> {
    rules.iter().position(|rule| match rule.matcher {
        Matcher::Range(range) => range.contains(value),
        Matcher::Values(values) => values.iter().any(|v| *v == value),
        Matcher::Else => true,
        Matcher::Missing => false,
    })
}

/// Evaluate a spec over a value sequence, recording how each rule was used.
///
/// # Errors
///
/// - [`RecodeError::EmptyInput`] if a range uses `min`/`max` and there is no
///   non-missing value to resolve it from.
/// - [`RecodeError::Domain`] if a resolved range has `lower > upper`.
pub fn evaluate_detailed(spec: &RecodeSpec, values: &[Option<f64>]) -> Result<Evaluation> {
    let extrema = observed_range(values);
    if extrema.is_none() && spec.uses_symbolic_bounds() {
        return Err(RecodeError::EmptyInput);
    }
    let rules = resolve_rules(spec, extrema)?;
    let missing_rule = rules
        .iter()
        .position(|rule| matches!(rule.matcher, Matcher::Missing));

    let mut evaluation = Evaluation {
        codes: Vec::with_capacity(values.len()),
        rule_hits: vec![0; rules.len()],
        ..Evaluation::default()
    };

    for value in values {
        let matched = match value.filter(|v| !v.is_nan()) {
            None => {
                evaluation.source_missing += 1;
                missing_rule
            }
            Some(v) => {
                let matched = first_match(&rules, v);
                if matched.is_none() {
                    evaluation.unmatched += 1;
                }
                matched
            }
        };
        let code = matched.and_then(|idx| {
            evaluation.rule_hits[idx] += 1;
            rules[idx].target.code()
        });
        evaluation.codes.push(code);
    }

    for (idx, hits) in evaluation.rule_hits.iter().enumerate() {
        tracing::debug!(
            clause = idx + 1,
            kind = spec.rules()[idx].kind(),
            hits,
            "recode rule matches"
        );
    }
    if evaluation.unmatched > 0 {
        tracing::debug!(
            unmatched = evaluation.unmatched,
            "values matched no rule and were set to missing"
        );
    }

    Ok(evaluation)
}

/// Evaluate a spec over a value sequence.
///
/// Returns one code per input in input order; `None` is the missing marker.
pub fn evaluate(spec: &RecodeSpec, values: &[Option<f64>]) -> Result<Vec<Option<i64>>> {
    evaluate_detailed(spec, values).map(|evaluation| evaluation.codes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn run(spec: &str, values: &[Option<f64>]) -> Result<Vec<Option<i64>>> {
        evaluate(&parse(spec)?, values)
    }

    #[test]
    fn test_observed_range_skips_missing() {
        assert_eq!(
            observed_range(&[None, Some(4.0), Some(f64::NAN), Some(-1.0)]),
            Some((-1.0, 4.0))
        );
        assert_eq!(observed_range(&[None, None]), None);
        assert_eq!(observed_range(&[]), None);
    }

    #[test]
    fn test_resolved_bounds_are_inclusive() {
        let codes = run("min:3=1; 4:max=2", &[Some(1.0), Some(3.0), Some(4.0), Some(7.0)]).unwrap();
        assert_eq!(codes, vec![Some(1), Some(1), Some(2), Some(2)]);
    }

    #[test]
    fn test_gap_between_ranges_is_missing() {
        let codes = run("1:3=1; 4:6=2", &[Some(3.5)]).unwrap();
        assert_eq!(codes, vec![None]);
    }

    #[test]
    fn test_value_list() {
        let codes = run("1,3,5=1; 2,4=2", &[Some(1.0), Some(2.0), Some(5.0), Some(6.0)]).unwrap();
        assert_eq!(codes, vec![Some(1), Some(2), Some(1), None]);
    }

    #[test]
    fn test_value_before_overlapping_range_wins() {
        let codes = run("3=9; 1:5=1", &[Some(3.0), Some(4.0)]).unwrap();
        assert_eq!(codes, vec![Some(9), Some(1)]);

        let codes = run("1:5=1; 3=9", &[Some(3.0)]).unwrap();
        assert_eq!(codes, vec![Some(1)]);
    }

    #[test]
    fn test_missing_rule_and_else() {
        let codes = run("1:2=1; NA=0; else=9", &[None, Some(1.0), Some(7.0)]).unwrap();
        assert_eq!(codes, vec![Some(0), Some(1), Some(9)]);
    }

    #[test]
    fn test_else_does_not_capture_missing() {
        let codes = run("1:2=1; else=9", &[None, Some(f64::NAN)]).unwrap();
        assert_eq!(codes, vec![None, None]);
    }

    #[test]
    fn test_missing_rule_on_empty_literal_spec() {
        let codes = run("1:2=1; NA=0", &[None]).unwrap();
        assert_eq!(codes, vec![Some(0)]);
    }

    #[test]
    fn test_symbolic_bound_on_all_missing_input() {
        let err = run("min:5=1", &[None, None]).unwrap_err();
        assert!(matches!(err, RecodeError::EmptyInput));
    }

    #[test]
    fn test_literal_spec_on_empty_input() {
        assert_eq!(run("1:5=1", &[]).unwrap(), Vec::<Option<i64>>::new());
    }

    #[test]
    fn test_inversion_after_resolution() {
        // max is 3, so 5:max resolves to 5:3
        let err = run("1:2=1; 5:max=2", &[Some(1.0), Some(3.0)]).unwrap_err();
        match err {
            RecodeError::Domain {
                clause,
                lower,
                upper,
            } => {
                assert_eq!(clause, 2);
                assert_eq!(lower, 5.0);
                assert_eq!(upper, 3.0);
            }
            other => panic!("expected domain error, got {other:?}"),
        }
    }

    #[test]
    fn test_evaluation_counts() {
        let err = parse("1:2=1; 3=NA; else=3; NA=0").unwrap_err();
        assert!(matches!(err, RecodeError::Syntax { clause: 4, .. }));

        let spec = parse("1:2=1; 3=NA; NA=0; else=3").unwrap();
        let evaluation = evaluate_detailed(
            &spec,
            &[Some(1.0), Some(2.0), Some(3.0), None, Some(8.0)],
        )
        .unwrap();

        assert_eq!(evaluation.codes, vec![Some(1), Some(1), None, Some(0), Some(3)]);
        assert_eq!(evaluation.rule_hits, vec![2, 1, 1, 1]);
        assert_eq!(evaluation.source_missing, 1);
        assert_eq!(evaluation.unmatched, 0);
        assert_eq!(evaluation.output_missing(), 1);
    }
}
