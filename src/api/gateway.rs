//! Persistence gateway trait for questionnaire fields.
//!
//! The tree model never talks HTTP directly; every create/update/delete
//! goes through this trait so the HTTP client and the in-memory test
//! gateway are interchangeable.

use anyhow::Result;
use async_trait::async_trait;
use futures::future::try_join_all;
use serde_json::Value;

use crate::questionnaire::field::{Field, FieldInstance};

/// What to export from the template library
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportSelector {
    /// Every root template, as a JSON array
    All,
    /// A single template by id, as a JSON object
    One(String),
}

/// Constraints on a field query; the default matches everything
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryFilter {
    pub instance: Option<FieldInstance>,
}

impl QueryFilter {
    /// Only template-library entries
    pub fn templates() -> Self {
        Self {
            instance: Some(FieldInstance::Template),
        }
    }
}

/// Backend CRUD surface for fields and field templates.
///
/// `create` returns the stored field with its server-assigned id; the
/// caller adopts that id to clear the local unsaved marker. `delete` must
/// be awaited before any local removal (two-phase delete) and carries the
/// field's instance so it targets the same collection the field was
/// created in.
#[async_trait]
pub trait FieldGateway: Send + Sync {
    async fn create(&self, field: &Field) -> Result<Field>;

    async fn update(&self, field: &Field) -> Result<()>;

    async fn delete(&self, id: &str, instance: FieldInstance) -> Result<()>;

    /// List root fields matching `filter`
    async fn query(&self, filter: QueryFilter) -> Result<Vec<Field>>;

    /// Serialized template payload, a JSON array for [`ExportSelector::All`]
    /// or a single object for [`ExportSelector::One`]
    async fn export(&self, selector: ExportSelector) -> Result<Value>;

    /// Import a serialized payload into the template library: a single
    /// object is normalized to a one-element sequence and every id is
    /// cleared, so the backend treats the whole batch as new templates
    async fn import(&self, payload: &str) -> Result<Vec<Field>> {
        let fields = super::transfer::normalize_import(payload)?;
        try_join_all(fields.iter().map(|field| self.create(field))).await
    }
}
