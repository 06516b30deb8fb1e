//! Config command - manage saved configuration.

use anyhow::Result;
use clap::{Args, Subcommand};
use tracing::info;

use aipatch_store::{default_config_dir, default_config_path, SavedConfig};

use crate::output::JsonFormatter;
use crate::{Cli, OutputFormat};

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration.
    Show,

    /// Show configuration paths.
    Path,

    /// Enable or disable telemetry permanently.
    Telemetry {
        /// "on" or "off".
        state: String,
    },
}

/// Runs the config command.
pub async fn run(args: &ConfigArgs, cli: &Cli) -> Result<()> {
    match &args.action {
        ConfigAction::Show => show_config(cli).await,
        ConfigAction::Path => show_paths(cli),
        ConfigAction::Telemetry { state } => set_telemetry(state).await,
    }
}

async fn show_config(cli: &Cli) -> Result<()> {
    let config = SavedConfig::load().await;

    match cli.format {
        OutputFormat::Text => {
            println!("AI Patch Configuration");
            println!("{}", "─".repeat(40));
            println!();
            println!(
                "Telemetry: {}",
                match config.telemetry_enabled {
                    Some(false) => "disabled",
                    Some(true) => "enabled",
                    None => "enabled (default)",
                }
            );
            println!(
                "Install id: {}",
                config.install_id.as_deref().unwrap_or("(not yet generated)")
            );
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&config)?);
        }
    }

    Ok(())
}

fn show_paths(cli: &Cli) -> Result<()> {
    let config_dir = default_config_dir();
    let config_path = default_config_path();

    match cli.format {
        OutputFormat::Text => {
            println!("Configuration Paths");
            println!("{}", "─".repeat(40));
            println!();
            println!("Config dir:  {}", config_dir.display());
            println!("Config file: {}", config_path.display());
        }
        OutputFormat::Json => {
            let paths = serde_json::json!({
                "config_dir": config_dir.display().to_string(),
                "config_file": config_path.display().to_string(),
            });
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&paths)?);
        }
    }

    Ok(())
}

async fn set_telemetry(state: &str) -> Result<()> {
    let enabled = match state.to_lowercase().as_str() {
        "on" | "enable" | "enabled" => true,
        "off" | "disable" | "disabled" => false,
        _ => anyhow::bail!("Unknown state: {}. Use: on, off", state),
    };

    let mut config = SavedConfig::load().await;
    config.telemetry_enabled = Some(enabled);
    config.save().await?;

    info!(enabled, "Telemetry setting updated");
    println!(
        "Telemetry {}",
        if enabled { "enabled" } else { "disabled" }
    );

    Ok(())
}
