//! Extraction of the whistleblower-identity field.
//!
//! The identity field is authored as an ordinary step child tagged with a
//! reserved key, but is presented as a distinct sub-form outside the normal
//! step flow. Extraction pulls it out of its step and seeds empty answer
//! entries for its children.

use std::fmt;

use super::answers::AnswerSet;
use super::field::{Field, Questionnaire};

/// The identity field detached from its step, ready to render as its own
/// sub-form
#[derive(Debug, Clone)]
pub struct IdentitySubForm {
    pub field: Field,
    /// Empty-initialized entries for the sub-form's children
    pub answers: AnswerSet,
}

/// More than one field carries the identity key; the data invariant allows
/// at most one per questionnaire
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateIdentityKey {
    pub field_ids: Vec<String>,
}

impl fmt::Display for DuplicateIdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "multiple fields carry the whistleblower identity key: {}",
            self.field_ids.join(", ")
        )
    }
}

impl std::error::Error for DuplicateIdentityKey {}

/// Scan every step's direct children (never deeper) for the identity field,
/// detach it from its step and return it as a sub-form.
///
/// Returns `Ok(None)` when no step carries one. A duplicate tag is a
/// data-integrity error and is surfaced instead of silently resolved by
/// "first wins"; the questionnaire is left unmodified in that case.
pub fn extract_identity_field(
    questionnaire: &mut Questionnaire,
) -> Result<Option<IdentitySubForm>, DuplicateIdentityKey> {
    let mut matches: Vec<(usize, usize)> = Vec::new();
    for (step_index, step) in questionnaire.steps.iter().enumerate() {
        for (child_index, child) in step.children.iter().enumerate() {
            if child.is_identity() {
                matches.push((step_index, child_index));
            }
        }
    }

    match matches.as_slice() {
        [] => Ok(None),
        [(step_index, child_index)] => {
            let field = questionnaire.steps[*step_index]
                .children
                .remove(*child_index);
            let mut answers = AnswerSet::new();
            answers.init_for_children(&field);
            Ok(Some(IdentitySubForm { field, answers }))
        }
        _ => Err(DuplicateIdentityKey {
            field_ids: matches
                .iter()
                .map(|(s, c)| questionnaire.steps[*s].children[*c].id.clone())
                .collect(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questionnaire::field::{FieldType, Step, WHISTLEBLOWER_IDENTITY_KEY};

    fn identity_field(id: &str) -> Field {
        let mut field = Field::new("Identity", FieldType::Fieldgroup);
        field.id = id.to_string();
        field.key = WHISTLEBLOWER_IDENTITY_KEY.to_string();
        let mut name = Field::new("Name", FieldType::Inputbox);
        name.id = format!("{id}-name");
        field.add_child(name);
        field
    }

    fn questionnaire_with(fields: Vec<Vec<Field>>) -> Questionnaire {
        Questionnaire {
            id: "q1".to_string(),
            name: "Default".to_string(),
            steps: fields
                .into_iter()
                .enumerate()
                .map(|(i, children)| Step {
                    id: format!("s{i}"),
                    label: format!("Step {i}"),
                    children,
                    presentation_order: i as i64,
                })
                .collect(),
        }
    }

    #[test]
    fn test_extract_removes_exactly_one_field() {
        let mut q = questionnaire_with(vec![
            vec![Field::new("Q1", FieldType::Inputbox)],
            vec![identity_field("wbi"), Field::new("Q2", FieldType::Date)],
        ]);

        let extracted = extract_identity_field(&mut q).unwrap().unwrap();
        assert_eq!(extracted.field.id, "wbi");
        assert_eq!(q.steps[1].children.len(), 1);
        assert_eq!(q.steps[0].children.len(), 1);
        assert!(extracted.answers.entries("wbi-name").is_some());
    }

    #[test]
    fn test_extract_not_found() {
        let mut q = questionnaire_with(vec![vec![Field::new("Q1", FieldType::Inputbox)]]);
        assert!(extract_identity_field(&mut q).unwrap().is_none());
        assert_eq!(q.steps[0].children.len(), 1);
    }

    #[test]
    fn test_extract_ignores_nested_children() {
        let mut group = Field::new("Group", FieldType::Fieldgroup);
        group.id = "g1".to_string();
        group.add_child(identity_field("nested"));
        let mut q = questionnaire_with(vec![vec![group]]);

        assert!(extract_identity_field(&mut q).unwrap().is_none());
        assert_eq!(q.steps[0].children[0].children.len(), 1);
    }

    #[test]
    fn test_duplicate_key_surfaced_not_resolved() {
        let mut q = questionnaire_with(vec![
            vec![identity_field("first")],
            vec![identity_field("second")],
        ]);

        let err = extract_identity_field(&mut q).unwrap_err();
        assert_eq!(err.field_ids, vec!["first", "second"]);
        // tree left untouched
        assert_eq!(q.steps[0].children.len(), 1);
        assert_eq!(q.steps[1].children.len(), 1);
    }
}
