//! Full-tree data-integrity pass.
//!
//! Dangling trigger references and duplicate identity tags cannot be
//! detected locally while editing a single node; this pass walks the whole
//! questionnaire and reports every finding. Findings are not exceptions:
//! the tree stays usable, but submission should be blocked until the
//! offending nodes are fixed.

use std::collections::HashSet;
use std::fmt;

use super::field::Questionnaire;
use super::ordering::has_duplicate_positions;

/// One integrity problem found in a questionnaire
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrityFinding {
    /// An option's trigger_field names a field id that exists nowhere in
    /// the questionnaire
    DanglingFieldTrigger {
        option_id: String,
        owner_field_id: String,
        target: String,
    },
    /// An option's trigger_step names an unknown step id
    DanglingStepTrigger {
        option_id: String,
        owner_field_id: String,
        target: String,
    },
    /// More than one field carries the whistleblower identity key
    DuplicateIdentityKey { field_ids: Vec<String> },
    /// Two siblings share a position key, the signature of an interrupted
    /// reorder (only one side of the swap was persisted)
    DuplicatePositionKey { parent: String },
}

impl fmt::Display for IntegrityFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrityFinding::DanglingFieldTrigger {
                option_id,
                owner_field_id,
                target,
            } => write!(
                f,
                "option '{option_id}' of field '{owner_field_id}' triggers unknown field '{target}'"
            ),
            IntegrityFinding::DanglingStepTrigger {
                option_id,
                owner_field_id,
                target,
            } => write!(
                f,
                "option '{option_id}' of field '{owner_field_id}' triggers unknown step '{target}'"
            ),
            IntegrityFinding::DuplicateIdentityKey { field_ids } => write!(
                f,
                "multiple fields carry the whistleblower identity key: {}",
                field_ids.join(", ")
            ),
            IntegrityFinding::DuplicatePositionKey { parent } => {
                write!(f, "duplicate position keys among children of '{parent}'")
            }
        }
    }
}

/// Check the whole tree and return every finding; an empty list means the
/// questionnaire is fit for submission
pub fn validate_questionnaire(questionnaire: &Questionnaire) -> Vec<IntegrityFinding> {
    let mut findings = Vec::new();

    let mut field_ids: HashSet<&str> = HashSet::new();
    let mut identity_fields: Vec<String> = Vec::new();
    questionnaire.for_each_field(&mut |field| {
        if !field.id.is_empty() {
            field_ids.insert(field.id.as_str());
        }
        if field.is_identity() {
            identity_fields.push(field.id.clone());
        }
    });
    let step_ids: HashSet<&str> = questionnaire.steps.iter().map(|s| s.id.as_str()).collect();

    questionnaire.for_each_field(&mut |field| {
        for option in &field.options {
            if !option.trigger_field.is_empty()
                && !field_ids.contains(option.trigger_field.as_str())
            {
                findings.push(IntegrityFinding::DanglingFieldTrigger {
                    option_id: option.id.clone(),
                    owner_field_id: field.id.clone(),
                    target: option.trigger_field.clone(),
                });
            }
            if !option.trigger_step.is_empty() && !step_ids.contains(option.trigger_step.as_str())
            {
                findings.push(IntegrityFinding::DanglingStepTrigger {
                    option_id: option.id.clone(),
                    owner_field_id: field.id.clone(),
                    target: option.trigger_step.clone(),
                });
            }
        }
    });

    if identity_fields.len() > 1 {
        findings.push(IntegrityFinding::DuplicateIdentityKey {
            field_ids: identity_fields,
        });
    }

    if has_duplicate_positions(&questionnaire.steps) {
        findings.push(IntegrityFinding::DuplicatePositionKey {
            parent: questionnaire.id.clone(),
        });
    }
    for step in &questionnaire.steps {
        if has_duplicate_positions(&step.children) {
            findings.push(IntegrityFinding::DuplicatePositionKey {
                parent: step.id.clone(),
            });
        }
    }
    questionnaire.for_each_field(&mut |field| {
        if has_duplicate_positions(&field.children) || has_duplicate_positions(&field.options) {
            findings.push(IntegrityFinding::DuplicatePositionKey {
                parent: field.id.clone(),
            });
        }
    });

    findings
}
