use anyhow::Result;
use clap::Parser;
use painel::Gerador;
use painel::config::Config;
use painel::ha::HaClient;
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "painel")]
#[command(about = "Generate the retro smart panel page", long_about = None)]
struct Cli {
    /// Path to the configuration file (default: painel_config.yaml lookup)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Fire a single Home Assistant webhook and exit
    #[arg(long)]
    toggle: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::from_file(path),
        None => Config::load(),
    }
    .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;
    config.apply_env_overrides();
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?;

    painel::logging::init_logging(&config.logging)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    info!("Painel {} starting up", env!("APP_VERSION"));

    // Maintenance path: fire one webhook without generating the page
    if let Some(webhook) = &cli.toggle {
        let ha = HaClient::new(config.ha.clone())?;
        ha.trigger_webhook(webhook).await?;
        return Ok(());
    }

    match Gerador::new(config).executar().await {
        Ok(()) => {
            info!("Panel generated");
            Ok(())
        }
        Err(e) => {
            error!("Panel generation failed: {}", e);
            Err(anyhow::anyhow!("Generation error: {}", e))
        }
    }
}
