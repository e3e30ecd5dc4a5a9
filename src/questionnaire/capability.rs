//! Presentation-capability predicates over field types.
//!
//! These are pure queries used by the editor UI to decide which toggles and
//! panels to offer for a given field. Each predicate is driven by a fixed
//! exclusion set; the rendering-family mapping is an exhaustive match so a
//! new field type fails compilation until it is classified.

use super::field::{Field, FieldInstance, FieldType};

/// Whether the field can be marked required. Groups and file uploads have
/// no single answer to require.
pub fn is_markable_required(field_type: FieldType) -> bool {
    !matches!(field_type, FieldType::Fieldgroup | FieldType::Fileupload)
}

/// Whether the field can be toggled multi-entry
pub fn is_markable_multi_entry(field_type: FieldType) -> bool {
    !matches!(
        field_type,
        FieldType::Checkbox | FieldType::Selectbox | FieldType::Tos
    )
}

/// Whether the field's answers can feed aggregate statistics
pub fn is_markable_subject_to_stats(field_type: FieldType) -> bool {
    !matches!(
        field_type,
        FieldType::Inputbox | FieldType::Textarea | FieldType::Fieldgroup
    )
}

/// Whether the field can be included in the submission preview
pub fn is_markable_subject_to_preview(field_type: FieldType) -> bool {
    !matches!(field_type, FieldType::Fieldgroup | FieldType::Fileupload)
}

/// Map a concrete type to its rendering family, used to select a shared
/// editor template. Total over [`FieldType`]: extending the enum without
/// classifying the new type here is a compile error.
pub fn type_switch(field_type: FieldType) -> &'static str {
    match field_type {
        FieldType::Inputbox | FieldType::Textarea => "inputbox_or_textarea",
        FieldType::Checkbox | FieldType::Selectbox | FieldType::Multichoice => {
            "checkbox_selectbox_multichoice"
        }
        FieldType::Fieldgroup => "fieldgroup",
        FieldType::Fileupload => "fileupload",
        FieldType::Tos => "tos",
        FieldType::Date => "date",
    }
}

/// Whether the editor shows a type-specific configuration panel
pub fn show_configuration(field: &Field) -> bool {
    if matches!(
        field.field_type,
        FieldType::Inputbox
            | FieldType::Textarea
            | FieldType::Checkbox
            | FieldType::Multichoice
            | FieldType::Tos
            | FieldType::Date
    ) {
        return true;
    }

    field.instance == FieldInstance::Template && field.is_identity()
}

/// Whether the editor shows the option list
pub fn show_options(field: &Field) -> bool {
    field.field_type.has_options()
}
