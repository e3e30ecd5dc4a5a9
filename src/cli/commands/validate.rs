//! Questionnaire integrity check over a local JSON file.

use anyhow::{Context, Result, bail};
use std::path::PathBuf;

use crate::questionnaire::field::Questionnaire;
use crate::questionnaire::validate::validate_questionnaire;

pub fn handle(file: PathBuf) -> Result<()> {
    let contents = std::fs::read_to_string(&file)
        .with_context(|| format!("Failed to read questionnaire file: {file:?}"))?;
    let questionnaire: Questionnaire =
        serde_json::from_str(&contents).context("file is not a questionnaire JSON document")?;

    let findings = validate_questionnaire(&questionnaire);
    if findings.is_empty() {
        println!("OK: no integrity problems found.");
        return Ok(());
    }

    for finding in &findings {
        eprintln!("integrity: {finding}");
    }
    bail!("{} integrity problem(s) found", findings.len());
}
