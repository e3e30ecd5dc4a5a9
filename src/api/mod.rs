//! Persistence gateway: trait, HTTP client, in-memory store, import/export.

pub mod client;
pub mod gateway;
pub mod memory;
pub mod transfer;

pub use client::HttpGateway;
pub use gateway::{ExportSelector, FieldGateway, QueryFilter};
pub use memory::MemoryGateway;
pub use transfer::{export_templates, import_templates, normalize_import};
