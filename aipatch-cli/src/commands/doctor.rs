//! Doctor command - run checks, write a report, emit telemetry.

use anyhow::Result;
use clap::Args;
use std::time::Instant;
use tracing::{debug, info};

use aipatch_checks::{CheckContext, CheckRunner, CheckTarget};
use aipatch_core::{ProviderConfig, ProviderKind, RunStatus};
use aipatch_store::{default_config_path, get_or_create_install_id, resolve, SavedConfig};
use aipatch_telemetry::{gate, TelemetryClient, TelemetryEvent};

use crate::output::{JsonFormatter, TextFormatter};
use crate::report::RunReport;
use crate::{Cli, ExitCode, OutputFormat, CLI_VERSION};

/// Arguments for the doctor command.
#[derive(Args, Default)]
pub struct DoctorArgs {
    /// Target to diagnose (streaming, retries, cost, trace, all).
    #[arg(long, short, default_value = "all")]
    pub target: String,

    /// Skip writing the report files.
    #[arg(long)]
    pub no_report: bool,
}

impl DoctorArgs {
    fn target_or_default(&self) -> &str {
        if self.target.is_empty() {
            "all"
        } else {
            &self.target
        }
    }
}

/// Runs the doctor command.
pub async fn run(args: &DoctorArgs, cli: &Cli) -> Result<()> {
    let provider = parse_provider(cli.provider.as_deref())?;
    let target_label = args.target_or_default().to_lowercase();
    let targets = parse_target_selection(&target_label)?;

    let config = resolve(provider);
    ensure_configured(&config, cli);

    info!(provider = %provider, target = %target_label, "Running doctor");

    let ctx = CheckContext::new();
    let runner = CheckRunner::for_targets(&targets);

    let start = Instant::now();
    let outcomes = runner.execute(&config, &ctx).await;
    let duration_s = start.elapsed().as_secs_f64();

    let report = RunReport::build(
        target_label.clone(),
        provider,
        config.base_url.clone(),
        outcomes,
        duration_s,
    );

    let report_dir = if args.no_report {
        None
    } else {
        match report.save(&std::env::current_dir()?) {
            Ok(dir) => Some(dir),
            Err(e) => {
                debug!(error = %e, "Failed to save report");
                None
            }
        }
    };

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_report(&report));
            if let Some(dir) = &report_dir {
                println!("📊 Report saved: {}", dir.display());
            }
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&report)?);
        }
    }

    send_telemetry(cli, &target_label, provider, report.summary.status, duration_s).await;

    if report.summary.status != RunStatus::Success {
        std::process::exit(ExitCode::Error as i32);
    }

    Ok(())
}

/// Parses the provider selection, defaulting to OpenAI-compatible.
pub fn parse_provider(arg: Option<&str>) -> Result<ProviderKind> {
    match arg {
        None => Ok(ProviderKind::OpenAiCompatible),
        Some(name) => Ok(name.parse()?),
    }
}

/// Parses the target selection into an ordered check list.
fn parse_target_selection(target: &str) -> Result<Vec<CheckTarget>> {
    match target {
        "all" | "prod" => Ok(CheckTarget::all().to_vec()),
        name => CheckTarget::from_name(name)
            .map(|t| vec![t])
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown target: {}. Use: streaming, retries, cost, trace, all",
                    name
                )
            }),
    }
}

/// Exits with a configuration error when required variables are missing.
pub fn ensure_configured(config: &ProviderConfig, cli: &Cli) {
    if config.is_valid() {
        return;
    }

    if !cli.quiet {
        eprintln!("❌ Missing configuration:");
        eprintln!("   Set {}", config.missing_vars().join(", "));
    }
    std::process::exit(ExitCode::ConfigMissing as i32);
}

/// Emits the anonymous doctor_run event when telemetry is enabled.
///
/// Best-effort throughout: a failure to read the saved config or install
/// id skips the event rather than surfacing an error.
async fn send_telemetry(
    cli: &Cli,
    target: &str,
    provider: ProviderKind,
    status: RunStatus,
    duration_s: f64,
) {
    let saved = SavedConfig::load().await;

    if !gate::is_enabled(cli.no_telemetry, saved.telemetry_enabled) {
        debug!("Telemetry disabled");
        return;
    }

    let Ok(install_id) = get_or_create_install_id(&default_config_path()).await else {
        debug!("No install id available, skipping telemetry");
        return;
    };

    let event = TelemetryEvent::doctor_run(
        install_id,
        CLI_VERSION,
        target,
        provider,
        status,
        duration_s,
    );
    TelemetryClient::default().emit(event);
}
