//! Label attachment.

use recode_model::{LabelMap, LabelledSequence, RecodeSpec, Target};

/// Build the code → label map declared by a spec.
///
/// Only rules with both a label and an integer target contribute. When several
/// rules label the same code, the first one in declared order wins.
pub fn label_map(spec: &RecodeSpec) -> LabelMap {
    let mut labels = LabelMap::new();
    for rule in spec.rules() {
        let Some(label) = rule.label() else {
            continue;
        };
        match rule.target() {
            Target::Code(code) => {
                if !labels.insert(code, label) {
                    tracing::debug!(code, label, "code already labelled, keeping first label");
                }
            }
            Target::Missing => {
                tracing::debug!(label, "label on a missing target has no code to attach to");
            }
        }
    }
    labels
}

/// Pair recoded values with the labels declared in `spec`.
pub fn attach_labels(codes: Vec<Option<i64>>, spec: &RecodeSpec) -> LabelledSequence {
    LabelledSequence::new(codes, label_map(spec))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn test_first_label_for_a_code_wins() {
        let spec = parse("1:3=1 [low]; 4:6=1 [also low]; 7:9=2").unwrap();
        let labels = label_map(&spec);

        assert_eq!(labels.get(1), Some("low"));
        assert_eq!(labels.get(2), None);
        assert_eq!(labels.len(), 1);
    }

    #[test]
    fn test_label_on_missing_target_is_dropped() {
        let spec = parse("1=1 [one]; else=NA [other]").unwrap();
        let labels = label_map(&spec);

        assert_eq!(labels.len(), 1);
        assert_eq!(labels.get(1), Some("one"));
    }

    #[test]
    fn test_attach_labels_keeps_codes() {
        let spec = parse("1=1 [one]; 2=2").unwrap();
        let seq = attach_labels(vec![Some(1), Some(2), None], &spec);

        assert_eq!(seq.codes(), &[Some(1), Some(2), None]);
        assert_eq!(seq.label_for(1), Some("one"));
        assert_eq!(seq.label_for(2), None);
    }
}
