//! Property tests for parsing and evaluation.

use proptest::prelude::*;
use recode_core::{Rule, evaluate, observed_range, parse};

/// Integer-valued inputs with some missing entries.
fn values_strategy() -> impl Strategy<Value = Vec<Option<f64>>> {
    prop::collection::vec(prop::option::weighted(0.85, -50i32..50), 1..40)
        .prop_map(|values| values.into_iter().map(|v| v.map(f64::from)).collect())
}

/// One literal clause: a range or a value list, with its target code.
#[derive(Debug, Clone)]
enum Clause {
    Range(i32, i32, i64),
    Values(Vec<i32>, i64),
}

impl Clause {
    fn matches(&self, value: f64) -> bool {
        match self {
            Clause::Range(low, high, _) => f64::from(*low) <= value && value <= f64::from(*high),
            Clause::Values(values, _) => values.iter().any(|v| f64::from(*v) == value),
        }
    }

    fn code(&self) -> i64 {
        match self {
            Clause::Range(_, _, code) | Clause::Values(_, code) => *code,
        }
    }
}

fn clause_strategy() -> impl Strategy<Value = Clause> {
    prop_oneof![
        (-60i32..60, 0i32..30, 1i64..6)
            .prop_map(|(low, width, code)| Clause::Range(low, low + width, code)),
        (prop::collection::vec(-50i32..50, 1..4), 1i64..6)
            .prop_map(|(values, code)| Clause::Values(values, code)),
    ]
}

/// Overlapping range and value clauses, optionally closed by `else=<code>`.
fn clauses_strategy() -> impl Strategy<Value = (Vec<Clause>, Option<i64>)> {
    (
        prop::collection::vec(clause_strategy(), 1..6),
        prop::option::of(10i64..13),
    )
}

fn render(clauses: &[Clause], else_code: Option<i64>) -> String {
    let mut rendered: Vec<String> = clauses
        .iter()
        .map(|clause| match clause {
            Clause::Range(low, high, code) => format!("{low}:{high}={code}"),
            Clause::Values(values, code) => {
                let values: Vec<String> = values.iter().map(ToString::to_string).collect();
                format!("{}={code}", values.join(","))
            }
        })
        .collect();
    if let Some(code) = else_code {
        rendered.push(format!("else={code}"));
    }
    rendered.join("; ")
}

proptest! {
    #[test]
    fn parse_is_deterministic((clauses, else_code) in clauses_strategy()) {
        let spec = render(&clauses, else_code);
        prop_assert_eq!(parse(&spec).unwrap(), parse(&spec).unwrap());
    }

    #[test]
    fn output_is_first_matching_target(
        (clauses, else_code) in clauses_strategy(),
        values in values_strategy(),
    ) {
        let spec = parse(&render(&clauses, else_code)).unwrap();
        let codes = evaluate(&spec, &values).unwrap();
        prop_assert_eq!(codes.len(), values.len());

        for (value, code) in values.iter().zip(&codes) {
            let expected = value.and_then(|v| {
                clauses
                    .iter()
                    .find(|clause| clause.matches(v))
                    .map(Clause::code)
                    .or(else_code)
            });
            prop_assert_eq!(*code, expected);
        }
    }

    #[test]
    fn partition_of_observed_domain_leaves_no_gaps(
        values in values_strategy(),
        cut in -50i32..50,
    ) {
        prop_assume!(observed_range(&values).is_some());
        let spec = parse(&format!("min:{cut}=1; {cut}:max=2")).unwrap();
        // cut may fall outside the observed range, making one side inverted
        let Ok(codes) = evaluate(&spec, &values) else {
            return Ok(());
        };

        for (value, code) in values.iter().zip(&codes) {
            prop_assert_eq!(value.is_some(), code.is_some());
        }
    }

    #[test]
    fn full_range_matches_every_value(values in values_strategy()) {
        prop_assume!(observed_range(&values).is_some());
        let spec = parse("min:max=1").unwrap();
        let codes = evaluate(&spec, &values).unwrap();

        for (value, code) in values.iter().zip(&codes) {
            prop_assert_eq!(*code, value.map(|_| 1));
        }
    }

    #[test]
    fn display_reparses_to_same_spec((clauses, else_code) in clauses_strategy()) {
        let spec = parse(&render(&clauses, else_code)).unwrap();
        prop_assert_eq!(parse(&spec.to_string()).unwrap(), spec.clone());
        prop_assert_eq!(spec.len(), clauses.len() + usize::from(else_code.is_some()));
        prop_assert_eq!(
            spec.else_rule().map(|rule| rule.target().code()),
            else_code.map(Some)
        );
        let has_missing_rule = spec.rules().iter().any(|rule| matches!(rule, Rule::Missing { .. }));
        prop_assert!(!has_missing_rule);
    }
}
