//! Rule listings for `recode check`.

use recode_core::{RecodeSpec, Rule};
use serde_json::{Value, json};

/// One line per rule: clause number, kind, and the clause in spec syntax.
pub fn describe_rules(spec: &RecodeSpec) -> String {
    spec.rules()
        .iter()
        .enumerate()
        .map(|(idx, rule)| format!("{}. {:<7} {rule}", idx + 1, rule.kind()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn rule_to_json(clause: usize, rule: &Rule) -> Value {
    json!({
        "clause": clause,
        "kind": rule.kind(),
        "condition": rule.condition(),
        "target": rule.target().code(),
        "label": rule.label(),
    })
}

/// The parsed rules as a JSON array.
pub fn rules_to_json(spec: &RecodeSpec) -> Value {
    Value::Array(
        spec.rules()
            .iter()
            .enumerate()
            .map(|(idx, rule)| rule_to_json(idx + 1, rule))
            .collect(),
    )
}
