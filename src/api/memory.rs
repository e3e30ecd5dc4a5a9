//! In-memory gateway used by tests and `--dry-run` runs.

use anyhow::{Result, bail};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use uuid::Uuid;

use super::gateway::{ExportSelector, FieldGateway, QueryFilter};
use crate::questionnaire::field::{Field, FieldInstance};

/// Gateway backed by a process-local store. Ids are assigned on create the
/// way the backend would; `fail_deletes` injects gateway failures for
/// two-phase-delete tests.
#[derive(Default)]
pub struct MemoryGateway {
    store: Mutex<Vec<Field>>,
    fail_deletes: AtomicBool,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent delete call fail, simulating a backend outage
    pub fn fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.store.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, id: &str) -> Option<Field> {
        self.store
            .lock()
            .unwrap()
            .iter()
            .find(|f| f.id == id)
            .cloned()
    }
}

#[async_trait]
impl FieldGateway for MemoryGateway {
    async fn create(&self, field: &Field) -> Result<Field> {
        if field.is_saved() {
            bail!("field '{}' already has an id", field.id);
        }
        let mut stored = field.clone();
        stored.id = Uuid::new_v4().to_string();
        for option in &mut stored.options {
            if option.id.is_empty() {
                option.id = Uuid::new_v4().to_string();
            }
        }
        self.store.lock().unwrap().push(stored.clone());
        Ok(stored)
    }

    async fn update(&self, field: &Field) -> Result<()> {
        let mut store = self.store.lock().unwrap();
        match store.iter_mut().find(|f| f.id == field.id) {
            Some(slot) => {
                *slot = field.clone();
                Ok(())
            }
            None => bail!("no field with id '{}'", field.id),
        }
    }

    async fn delete(&self, id: &str, instance: FieldInstance) -> Result<()> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            bail!("injected gateway failure");
        }
        let mut store = self.store.lock().unwrap();
        // a mismatched instance means the caller targeted the wrong
        // collection, which a real backend would answer with 404
        match store.iter().position(|f| f.id == id && f.instance == instance) {
            Some(index) => {
                store.remove(index);
                Ok(())
            }
            None => bail!("no field with id '{id}' in the {instance:?} collection"),
        }
    }

    async fn query(&self, filter: QueryFilter) -> Result<Vec<Field>> {
        let store = self.store.lock().unwrap();
        Ok(store
            .iter()
            .filter(|f| filter.instance.is_none_or(|i| f.instance == i))
            .cloned()
            .collect())
    }

    async fn export(&self, selector: ExportSelector) -> Result<Value> {
        let store = self.store.lock().unwrap();
        match selector {
            ExportSelector::All => Ok(serde_json::to_value(&*store)?),
            ExportSelector::One(id) => match store.iter().find(|f| f.id == id) {
                Some(field) => Ok(serde_json::to_value(field)?),
                None => bail!("no field with id '{id}'"),
            },
        }
    }
}
