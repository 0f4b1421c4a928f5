#![allow(missing_docs)]

use recode_model::{Bound, LabelMap, LabelledSequence, RecodeOptions, RecodeSpec, Rule, Target};

fn severity_labels() -> LabelMap {
    let mut labels = LabelMap::new();
    labels.insert(1, "low");
    labels.insert(2, "moderate");
    labels.insert(3, "high");
    labels
}

#[test]
fn test_label_map_first_label_wins() {
    let mut labels = LabelMap::new();
    assert!(labels.insert(1, "low"));
    assert!(!labels.insert(1, "very low"));

    assert_eq!(labels.get(1), Some("low"));
    assert_eq!(labels.len(), 1);
}

#[test]
fn test_label_map_display_falls_back_to_code() {
    let labels = severity_labels();

    assert_eq!(labels.display(2), "moderate");
    assert_eq!(labels.display(9), "9");
    assert!(!labels.contains(9));
}

#[test]
fn test_labelled_sequence_shares_one_map() {
    let seq = LabelledSequence::new(vec![Some(1), None, Some(3), Some(7)], severity_labels());

    let values: Vec<_> = seq.iter().map(|v| (v.code, v.label)).collect();
    assert_eq!(
        values,
        vec![
            (Some(1), Some("low")),
            (None, None),
            (Some(3), Some("high")),
            (Some(7), None),
        ]
    );
    assert_eq!(seq.missing_count(), 1);
    assert_eq!(seq.len(), 4);

    let shared = seq.shared_labels();
    assert!(std::ptr::eq(shared.as_ref(), seq.labels()));
}

#[test]
fn test_labelled_sequence_display() {
    let seq = LabelledSequence::new(vec![Some(2), None, Some(5)], severity_labels());
    let options = RecodeOptions::new().with_missing_display("<missing>");

    assert_eq!(seq.display(0, &options).as_deref(), Some("moderate"));
    assert_eq!(seq.display(1, &options).as_deref(), Some("<missing>"));
    assert_eq!(seq.display(2, &options).as_deref(), Some("5"));
    assert_eq!(seq.display(3, &options), None);
}

#[test]
fn test_label_map_serializes_as_object() {
    let json = serde_json::to_string(&severity_labels()).expect("serialize labels");
    assert_eq!(json, r#"{"1":"low","2":"moderate","3":"high"}"#);
}

#[test]
fn test_rule_display_round_trips_syntax() {
    let spec = RecodeSpec::new(vec![
        Rule::Range {
            lower: Bound::Min,
            upper: Bound::Number(9.0),
            target: Target::Code(1),
            label: Some("low".to_string()),
        },
        Rule::Value {
            values: vec![10.0, 11.5],
            target: Target::Code(2),
            label: None,
        },
        Rule::Missing {
            target: Target::Code(0),
            label: None,
        },
        Rule::Else {
            target: Target::Missing,
            label: None,
        },
    ]);

    assert_eq!(
        spec.to_string(),
        "min:9=1 [low]; 10,11.5=2; NA=0; else=NA"
    );
    assert!(spec.uses_symbolic_bounds());
    assert!(spec.missing_rule().is_some());
    assert_eq!(spec.else_rule().map(Rule::target), Some(Target::Missing));
}

#[test]
fn test_options_output_name() {
    let options = RecodeOptions::default();
    assert_eq!(options.output_name("age"), "age_r");

    let replace = RecodeOptions::new().with_append(false);
    assert_eq!(replace.output_name("age"), "age");

    let custom = RecodeOptions::new().with_suffix("_grp");
    assert_eq!(custom.output_name("age"), "age_grp");
}
