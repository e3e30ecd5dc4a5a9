//! Export/import payload handling for the template library.
//!
//! Export payloads are plain JSON, either an array of fields or a single
//! object. Import accepts both shapes: a single object is normalized to a
//! one-element sequence, and every imported field's id is cleared so the
//! backend treats the whole subtree as new.

use anyhow::{Context, Result};
use log::info;
use serde_json::Value;

use super::gateway::{ExportSelector, FieldGateway};
use crate::questionnaire::field::{Field, FieldInstance, clear_ids};

/// Parse an import payload into fields ready for submission: single object
/// normalized to a one-element list, all ids cleared, and every root field
/// tagged as a template so it lands in the template library
pub fn normalize_import(payload: &str) -> Result<Vec<Field>> {
    let value: Value =
        serde_json::from_str(payload).context("import payload is not valid JSON")?;

    let items = match value {
        Value::Array(items) => items,
        other => vec![other],
    };

    let mut fields = Vec::with_capacity(items.len());
    for item in items {
        let mut field: Field =
            serde_json::from_value(item).context("import payload is not a field")?;
        clear_ids(&mut field);
        field.instance = FieldInstance::Template;
        fields.push(field);
    }
    Ok(fields)
}

/// Import templates: normalize the payload and submit one create per field
pub async fn import_templates(gateway: &dyn FieldGateway, payload: &str) -> Result<Vec<Field>> {
    let created = gateway.import(payload).await?;
    info!("imported {} template(s)", created.len());
    Ok(created)
}

/// Export templates as pretty-printed JSON
pub async fn export_templates(
    gateway: &dyn FieldGateway,
    selector: ExportSelector,
) -> Result<String> {
    let value = gateway.export(selector).await?;
    Ok(serde_json::to_string_pretty(&value)?)
}
