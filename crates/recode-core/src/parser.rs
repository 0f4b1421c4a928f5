//! Recode specification parser.
//!
//! Turns a string such as `"min:9=1 [low]; 10:12=2; else=NA"` into a
//! [`RecodeSpec`]. Clauses are separated by `;` and each has the shape
//! `condition=target [label]`:
//!
//! - `condition`: `low:high`, a value or comma-separated value list, `else`, or `NA`
//! - `low`/`high`: a number, `min`/`lo`, or `max`/`hi`
//! - `target`: an integer or `NA`
//!
//! Keywords are case-insensitive and whitespace around tokens is ignored.

use recode_model::{Bound, RecodeError, RecodeSpec, Result, Rule, Target};

/// Parse a recode specification.
///
/// Clauses keep their source order. Overlapping ranges and duplicate target
/// codes are accepted; evaluation resolves them by declared order.
pub fn parse(spec: &str) -> Result<RecodeSpec> {
    if spec.trim().is_empty() {
        return Err(RecodeError::syntax(0, spec, "recode specification is empty"));
    }

    let clauses = split_clauses(spec)?;
    let last = clauses.len() - 1;
    let mut rules = Vec::with_capacity(clauses.len());
    let mut else_clause: Option<usize> = None;
    let mut missing_clause: Option<usize> = None;

    for (idx, text) in clauses.iter().enumerate() {
        let clause = idx + 1;
        if text.trim().is_empty() {
            // A single trailing ';' is fine
            if idx == last && idx > 0 {
                continue;
            }
            return Err(RecodeError::syntax(clause, text, "empty clause"));
        }

        let rule = parse_clause(clause, text)?;
        if let Some(first) = else_clause {
            let message = if matches!(rule, Rule::Else { .. }) {
                format!("multiple else clauses (first at clause {first})")
            } else {
                format!("else must be the last clause (found at clause {first})")
            };
            return Err(RecodeError::syntax(clause, text, message));
        }

        match rule {
            Rule::Else { .. } => else_clause = Some(clause),
            Rule::Missing { .. } => {
                if let Some(first) = missing_clause {
                    return Err(RecodeError::syntax(
                        clause,
                        text,
                        format!("multiple NA clauses (first at clause {first})"),
                    ));
                }
                missing_clause = Some(clause);
            }
            _ => {}
        }
        rules.push(rule);
    }

    tracing::debug!(rules = rules.len(), "parsed recode specification");
    Ok(RecodeSpec::new(rules))
}

/// Split on `;` outside of `[...]` labels, checking bracket balance.
fn split_clauses(spec: &str) -> Result<Vec<&str>> {
    let mut clauses = Vec::new();
    let mut start = 0;
    let mut in_label = false;

    for (pos, ch) in spec.char_indices() {
        let clause = clauses.len() + 1;
        match ch {
            '[' if in_label => {
                return Err(RecodeError::syntax(
                    clause,
                    &spec[start..],
                    "nested '[' inside label",
                ));
            }
            '[' => in_label = true,
            ']' if !in_label => {
                return Err(RecodeError::syntax(
                    clause,
                    &spec[start..],
                    "unbalanced ']'",
                ));
            }
            ']' => in_label = false,
            ';' if !in_label => {
                clauses.push(&spec[start..pos]);
                start = pos + 1;
            }
            _ => {}
        }
    }

    if in_label {
        return Err(RecodeError::syntax(
            clauses.len() + 1,
            &spec[start..],
            "unterminated label, missing ']'",
        ));
    }
    clauses.push(&spec[start..]);
    Ok(clauses)
}

fn parse_clause(clause: usize, text: &str) -> Result<Rule> {
    let (body, label) = split_label(clause, text)?;

    let mut parts = body.split('=');
    let condition = parts.next().unwrap_or_default().trim();
    let Some(target) = parts.next() else {
        return Err(RecodeError::syntax(clause, text, "missing '='"));
    };
    if parts.next().is_some() {
        return Err(RecodeError::syntax(clause, text, "more than one '='"));
    }
    if condition.is_empty() {
        return Err(RecodeError::syntax(clause, text, "missing condition before '='"));
    }
    let target = parse_target(clause, text, target.trim())?;

    if condition.eq_ignore_ascii_case("else") {
        return Ok(Rule::Else { target, label });
    }
    if condition.eq_ignore_ascii_case("na") {
        return Ok(Rule::Missing { target, label });
    }

    if let Some((lower, upper)) = condition.split_once(':') {
        if upper.contains(':') {
            return Err(RecodeError::syntax(clause, text, "more than one ':' in range"));
        }
        return Ok(Rule::Range {
            lower: parse_bound(clause, text, lower.trim())?,
            upper: parse_bound(clause, text, upper.trim())?,
            target,
            label,
        });
    }

    let values = condition
        .split(',')
        .map(|token| parse_value(clause, text, token.trim()))
        .collect::<Result<Vec<_>>>()?;
    Ok(Rule::Value {
        values,
        target,
        label,
    })
}

/// Separate the optional trailing `[label]` from the clause body.
fn split_label(clause: usize, text: &str) -> Result<(&str, Option<String>)> {
    let Some(open) = text.find('[') else {
        return Ok((text, None));
    };
    let close = text[open..]
        .find(']')
        .map(|offset| open + offset)
        .ok_or_else(|| RecodeError::syntax(clause, text, "unterminated label, missing ']'"))?;

    if !text[close + 1..].trim().is_empty() {
        return Err(RecodeError::syntax(
            clause,
            text,
            "unexpected text after label",
        ));
    }
    let label = text[open + 1..close].trim();
    if label.is_empty() {
        return Err(RecodeError::syntax(clause, text, "empty label"));
    }
    Ok((&text[..open], Some(label.to_string())))
}

fn parse_target(clause: usize, text: &str, token: &str) -> Result<Target> {
    if token.is_empty() {
        return Err(RecodeError::syntax(clause, text, "missing target after '='"));
    }
    if token.eq_ignore_ascii_case("na") {
        return Ok(Target::Missing);
    }
    if let Ok(code) = token.parse::<i64>() {
        return Ok(Target::Code(code));
    }
    if parse_number(token).is_some() {
        return Err(RecodeError::syntax(
            clause,
            text,
            format!("target '{token}' must be an integer"),
        ));
    }
    Err(RecodeError::syntax(
        clause,
        text,
        format!("unknown target '{token}'"),
    ))
}

fn parse_bound(clause: usize, text: &str, token: &str) -> Result<Bound> {
    match token.to_ascii_lowercase().as_str() {
        "min" | "lo" => return Ok(Bound::Min),
        "max" | "hi" => return Ok(Bound::Max),
        _ => {}
    }
    match parse_number(token) {
        Some(value) => Ok(Bound::Number(value)),
        None if token.is_empty() => Err(RecodeError::syntax(clause, text, "missing range bound")),
        None => Err(RecodeError::syntax(
            clause,
            text,
            format!("non-numeric bound '{token}'"),
        )),
    }
}

fn parse_value(clause: usize, text: &str, token: &str) -> Result<f64> {
    if token.is_empty() {
        return Err(RecodeError::syntax(clause, text, "empty value in list"));
    }
    if matches!(
        token.to_ascii_lowercase().as_str(),
        "min" | "max" | "lo" | "hi"
    ) {
        return Err(RecodeError::syntax(
            clause,
            text,
            format!("'{token}' is only allowed as a range bound"),
        ));
    }
    parse_number(token).ok_or_else(|| {
        RecodeError::syntax(clause, text, format!("unknown token '{token}'"))
    })
}

/// Finite decimal number; `inf`/`nan` spellings are rejected.
fn parse_number(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|v| v.is_finite())
}
