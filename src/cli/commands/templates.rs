//! Template library subcommands: list, export, import, delete-all.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use log::info;
use std::path::PathBuf;

use crate::api::{ExportSelector, FieldGateway, QueryFilter, export_templates, import_templates};
use crate::questionnaire::sync::delete_all_fields;

#[derive(Args)]
pub struct TemplateCommands {
    #[command(subcommand)]
    pub command: TemplateSubcommands,
}

#[derive(Subcommand)]
pub enum TemplateSubcommands {
    /// List root templates in the library
    List,
    /// Export templates as JSON (all of them, or one by id)
    Export {
        /// Export a single template instead of the whole library
        #[arg(long)]
        id: Option<String>,
        /// Write to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Import templates from a JSON file (array or single object)
    Import {
        /// Path to the JSON file to import
        file: PathBuf,
    },
    /// Delete every template in the library
    DeleteAll,
}

pub async fn handle(gateway: &dyn FieldGateway, command: TemplateSubcommands) -> Result<()> {
    match command {
        TemplateSubcommands::List => list(gateway).await,
        TemplateSubcommands::Export { id, output } => export(gateway, id, output).await,
        TemplateSubcommands::Import { file } => import(gateway, file).await,
        TemplateSubcommands::DeleteAll => delete_all(gateway).await,
    }
}

async fn list(gateway: &dyn FieldGateway) -> Result<()> {
    let templates = gateway.query(QueryFilter::templates()).await?;
    if templates.is_empty() {
        println!("No templates in the library.");
        return Ok(());
    }
    for template in templates {
        println!(
            "{}  {:<12}  {}",
            template.id, template.field_type, template.label
        );
    }
    Ok(())
}

async fn export(
    gateway: &dyn FieldGateway,
    id: Option<String>,
    output: Option<PathBuf>,
) -> Result<()> {
    let selector = match id {
        Some(id) => ExportSelector::One(id),
        None => ExportSelector::All,
    };
    let json = export_templates(gateway, selector).await?;

    match output {
        Some(path) => {
            std::fs::write(&path, &json)
                .with_context(|| format!("Failed to write export to {path:?}"))?;
            info!("exported templates to {path:?}");
        }
        None => println!("{json}"),
    }
    Ok(())
}

async fn import(gateway: &dyn FieldGateway, file: PathBuf) -> Result<()> {
    let payload = std::fs::read_to_string(&file)
        .with_context(|| format!("Failed to read import file: {file:?}"))?;
    let created = import_templates(gateway, &payload).await?;
    println!("Imported {} template(s).", created.len());
    Ok(())
}

async fn delete_all(gateway: &dyn FieldGateway) -> Result<()> {
    let mut templates = gateway.query(QueryFilter::templates()).await?;
    let deleted = delete_all_fields(gateway, &mut templates).await?;
    println!("Deleted {deleted} template(s).");
    Ok(())
}
