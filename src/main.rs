use anyhow::Result;
use clap::Parser;

use questionnaire_cli::api::{FieldGateway, HttpGateway, MemoryGateway};
use questionnaire_cli::cli::commands::{templates, validate};
use questionnaire_cli::cli::{Cli, Commands};
use questionnaire_cli::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { file } => validate::handle(file),
        Commands::Templates(template_commands) => {
            let gateway = build_gateway(cli.profile.as_deref(), cli.dry_run)?;
            templates::handle(gateway.as_ref(), template_commands.command).await
        }
    }
}

fn build_gateway(profile: Option<&str>, dry_run: bool) -> Result<Box<dyn FieldGateway>> {
    if dry_run {
        log::info!("dry run: using in-memory backend");
        return Ok(Box::new(MemoryGateway::new()));
    }

    let config = Config::load()?;
    let profile = config.profile(profile)?;
    log::debug!("using backend at {}", profile.base_url);
    Ok(Box::new(HttpGateway::new(
        profile.base_url.clone(),
        profile.token.clone(),
    )))
}
