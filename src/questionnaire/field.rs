//! Core questionnaire tree types: fields, options, steps

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

use super::ordering::{Positioned, next_position};
use super::sync::SyncState;

/// Key tag marking the field that collects the whistleblower's identity
pub const WHISTLEBLOWER_IDENTITY_KEY: &str = "whistleblower_identity";

/// Concrete type of a field, driving rendering and capability checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Inputbox,
    Textarea,
    Checkbox,
    Selectbox,
    Multichoice,
    Fieldgroup,
    Fileupload,
    Tos,
    Date,
}

impl FieldType {
    /// Every known field type, for totality checks and CLI listings
    pub const ALL: [FieldType; 9] = [
        FieldType::Inputbox,
        FieldType::Textarea,
        FieldType::Checkbox,
        FieldType::Selectbox,
        FieldType::Multichoice,
        FieldType::Fieldgroup,
        FieldType::Fileupload,
        FieldType::Tos,
        FieldType::Date,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Inputbox => "inputbox",
            FieldType::Textarea => "textarea",
            FieldType::Checkbox => "checkbox",
            FieldType::Selectbox => "selectbox",
            FieldType::Multichoice => "multichoice",
            FieldType::Fieldgroup => "fieldgroup",
            FieldType::Fileupload => "fileupload",
            FieldType::Tos => "tos",
            FieldType::Date => "date",
        }
    }

    /// Whether this type carries an option list
    pub fn has_options(&self) -> bool {
        matches!(
            self,
            FieldType::Checkbox | FieldType::Selectbox | FieldType::Multichoice
        )
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Instance kind of a field within the questionnaire lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldInstance {
    /// Reusable definition edited in the template library
    Template,
    /// Pointer to a template, not editable in place
    Reference,
    /// Standalone field owned by its questionnaire
    #[default]
    Concrete,
}

fn default_true() -> bool {
    true
}

/// A node in the questionnaire tree.
///
/// An empty `id` means the field has not yet been accepted by the backend;
/// persisted fields always carry a non-empty server-assigned id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Field {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub instance: FieldInstance,
    #[serde(default = "default_true")]
    pub editable: bool,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub multi_entry: bool,
    #[serde(default)]
    pub preview: bool,
    #[serde(default)]
    pub stats_enabled: bool,
    /// Type-specific configuration (e.g. min_len/max_len for inputbox)
    #[serde(default)]
    pub attrs: HashMap<String, Value>,
    #[serde(default)]
    pub children: Vec<Field>,
    #[serde(default)]
    pub options: Vec<FieldOption>,
    /// Position key establishing sibling order
    #[serde(default)]
    pub y: i64,
    /// Semantic tag, empty for ordinary fields
    #[serde(default)]
    pub key: String,
    /// Local persistence marker, never serialized
    #[serde(skip)]
    pub sync: SyncState,
}

impl Field {
    /// Create an unsaved field with type-appropriate defaults
    pub fn new(label: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            id: String::new(),
            label: label.into(),
            field_type,
            instance: FieldInstance::default(),
            editable: true,
            required: false,
            // File uploads always collect repeated entries
            multi_entry: field_type == FieldType::Fileupload,
            preview: false,
            stats_enabled: false,
            attrs: default_attrs(field_type),
            children: Vec::new(),
            options: Vec::new(),
            y: 0,
            key: String::new(),
            sync: SyncState::default(),
        }
    }

    /// Whether the backend has accepted this field
    pub fn is_saved(&self) -> bool {
        !self.id.is_empty()
    }

    pub fn is_identity(&self) -> bool {
        self.key == WHISTLEBLOWER_IDENTITY_KEY
    }

    /// Build a child field inheriting this field's instance, positioned
    /// after the current last child
    pub fn new_child(&self, label: impl Into<String>, field_type: FieldType) -> Field {
        let mut child = Field::new(label, field_type);
        child.instance = self.instance;
        child.y = next_position(&self.children);
        child
    }

    /// Append a child; the caller is responsible for having assigned a
    /// position key (see [`new_child`](Self::new_child))
    pub fn add_child(&mut self, child: Field) {
        self.children.push(child);
    }

    /// Append a blank option at the next presentation position
    pub fn add_option(&mut self) -> &mut FieldOption {
        let mut option = FieldOption::new();
        option.presentation_order = next_position(&self.options);
        self.options.push(option);
        self.options.last_mut().unwrap()
    }

    /// Remove an option locally. Options are persisted embedded in their
    /// field, so no separate backend call is involved.
    pub fn remove_option(&mut self, option_id: &str) -> Option<FieldOption> {
        let index = self.options.iter().position(|o| o.id == option_id)?;
        Some(self.options.remove(index))
    }
}

impl Positioned for Field {
    fn position(&self) -> i64 {
        self.y
    }

    fn set_position(&mut self, position: i64) {
        self.y = position;
    }
}

/// A selectable option belonging to a choice-type field
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldOption {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub score_points: i64,
    /// Id of a field revealed when this option is selected, or empty
    #[serde(default)]
    pub trigger_field: String,
    /// Id of a step revealed when this option is selected, or empty
    #[serde(default)]
    pub trigger_step: String,
    #[serde(default)]
    pub presentation_order: i64,
}

impl FieldOption {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Positioned for FieldOption {
    fn position(&self) -> i64 {
        self.presentation_order
    }

    fn set_position(&mut self, position: i64) {
        self.presentation_order = position;
    }
}

/// Top-level container of fields within a questionnaire
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Step {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub children: Vec<Field>,
    #[serde(default)]
    pub presentation_order: i64,
}

impl Step {
    /// Build a field positioned after the current last child of this step
    pub fn new_field(&self, label: impl Into<String>, field_type: FieldType) -> Field {
        let mut field = Field::new(label, field_type);
        field.y = next_position(&self.children);
        field
    }

    pub fn add_field(&mut self, field: Field) {
        self.children.push(field);
    }
}

impl Positioned for Step {
    fn position(&self) -> i64 {
        self.presentation_order
    }

    fn set_position(&mut self, position: i64) {
        self.presentation_order = position;
    }
}

/// An ordered list of steps forming a complete form definition
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Questionnaire {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Questionnaire {
    /// Visit every field in the tree, depth-first in step order
    pub fn for_each_field<'a>(&'a self, f: &mut impl FnMut(&'a Field)) {
        fn walk<'a>(field: &'a Field, f: &mut impl FnMut(&'a Field)) {
            f(field);
            for child in &field.children {
                walk(child, f);
            }
        }
        for step in &self.steps {
            for field in &step.children {
                walk(field, f);
            }
        }
    }
}

/// Seed type-specific configuration for a freshly created field
pub fn default_attrs(field_type: FieldType) -> HashMap<String, Value> {
    let mut attrs = HashMap::new();
    match field_type {
        FieldType::Inputbox | FieldType::Textarea => {
            attrs.insert("min_len".to_string(), Value::from(0));
            attrs.insert("max_len".to_string(), Value::from(4096));
            attrs.insert("regexp".to_string(), Value::from(""));
        }
        FieldType::Tos => {
            attrs.insert("clause".to_string(), Value::from(""));
            attrs.insert("agreement_statement".to_string(), Value::from(""));
        }
        _ => {}
    }
    attrs
}

/// Clear server-assigned ids from a field and its whole subtree, marking it
/// (and its options) as new for the backend
pub fn clear_ids(field: &mut Field) {
    field.id.clear();
    for option in &mut field.options {
        option.id.clear();
    }
    for child in &mut field.children {
        clear_ids(child);
    }
}
