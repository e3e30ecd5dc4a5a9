//! Collected answer values, keyed by field id.
//!
//! Multi-entry fields hold a sequence of entries; each entry mirrors the
//! shape of the field's subtree (child field id -> value), so group fields
//! nest recursively.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

use super::field::{Field, FieldType};

/// One filled-in instance of a field: child field id -> value, or a bare
/// `value` slot for leaf fields
pub type AnswerEntry = Map<String, Value>;

/// All collected answers of a submission, keyed by field id
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnswerSet(pub HashMap<String, Vec<AnswerEntry>>);

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initialize one empty entry per direct child of `field`
    pub fn init_for_children(&mut self, field: &Field) {
        for child in &field.children {
            self.0
                .insert(child.id.clone(), vec![prepare_entry(child)]);
        }
    }

    pub fn entries(&self, field_id: &str) -> Option<&Vec<AnswerEntry>> {
        self.0.get(field_id)
    }

    /// Append another empty entry for a multi-entry field
    pub fn add_entry(&mut self, field: &Field) {
        self.0
            .entry(field.id.clone())
            .or_default()
            .push(prepare_entry(field));
    }

    pub fn has_multiple_entries(&self, field_id: &str) -> bool {
        self.entries(field_id).map_or(false, |e| e.len() > 1)
    }

    /// Record a leaf value for a field, replacing any previous entries
    pub fn set_value(&mut self, field_id: &str, value: Value) {
        let mut entry = AnswerEntry::new();
        entry.insert("value".to_string(), value);
        self.0.insert(field_id.to_string(), vec![entry]);
    }
}

/// Build an empty entry mirroring the subtree shape of `field`: leaves get
/// a blank `value`, composite fields get one nested empty entry per child
pub fn prepare_entry(field: &Field) -> AnswerEntry {
    let mut entry = AnswerEntry::new();

    if field.children.is_empty() {
        entry.insert("value".to_string(), Value::String(String::new()));
    } else {
        for child in &field.children {
            entry.insert(
                child.id.clone(),
                Value::Array(vec![Value::Object(prepare_entry(child))]),
            );
        }
    }

    entry
}

/// Fields a submitter actually answers inline; file uploads go through the
/// upload flow instead
pub fn answerable_fields(fields: &[Field]) -> Vec<&Field> {
    fields
        .iter()
        .filter(|f| f.field_type != FieldType::Fileupload)
        .collect()
}
