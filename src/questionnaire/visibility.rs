//! Option-trigger resolution.
//!
//! Options may name a field or step that only becomes visible once the
//! option is selected. A target referenced by at least one trigger is
//! hidden by default ("gated") and revealed when any of its triggering
//! options is selected in the answer set. Template-instance fields are
//! authoring material: their options never gate or reveal anything in a
//! live submission.

use serde_json::Value;
use std::collections::HashSet;

use super::answers::AnswerSet;
use super::field::{Field, FieldInstance, Questionnaire, Step};

/// Resolved trigger state for one questionnaire + answer set
#[derive(Debug, Clone, Default)]
pub struct Visibility {
    gated_fields: HashSet<String>,
    gated_steps: HashSet<String>,
    triggered_fields: HashSet<String>,
    triggered_steps: HashSet<String>,
}

impl Visibility {
    /// A field is visible unless it is gated by some trigger and none of
    /// its triggering options is selected
    pub fn field_visible(&self, field: &Field) -> bool {
        !self.gated_fields.contains(&field.id) || self.triggered_fields.contains(&field.id)
    }

    pub fn step_visible(&self, step: &Step) -> bool {
        !self.gated_steps.contains(&step.id) || self.triggered_steps.contains(&step.id)
    }
}

/// Walk the questionnaire and resolve all triggers against `answers`
pub fn resolve(questionnaire: &Questionnaire, answers: &AnswerSet) -> Visibility {
    let mut visibility = Visibility::default();

    questionnaire.for_each_field(&mut |field| {
        if field.instance == FieldInstance::Template {
            return;
        }

        for option in &field.options {
            let selected = option_selected(answers, &field.id, &option.id);

            if !option.trigger_field.is_empty() {
                visibility.gated_fields.insert(option.trigger_field.clone());
                if selected {
                    visibility
                        .triggered_fields
                        .insert(option.trigger_field.clone());
                }
            }

            if !option.trigger_step.is_empty() {
                visibility.gated_steps.insert(option.trigger_step.clone());
                if selected {
                    visibility
                        .triggered_steps
                        .insert(option.trigger_step.clone());
                }
            }
        }
    });

    visibility
}

/// Whether `option_id` is selected among the answers recorded for
/// `field_id`. Selectboxes store the option id as a plain value,
/// multi-selection types store either an id array or an id-keyed map.
fn option_selected(answers: &AnswerSet, field_id: &str, option_id: &str) -> bool {
    let Some(entries) = answers.entries(field_id) else {
        return false;
    };

    entries.iter().any(|entry| {
        entry.get("value").is_some_and(|value| match value {
            Value::String(id) => id == option_id,
            Value::Array(ids) => ids.iter().any(|v| v.as_str() == Some(option_id)),
            Value::Object(map) => map.get(option_id).and_then(Value::as_bool) == Some(true),
            _ => false,
        })
    })
}
