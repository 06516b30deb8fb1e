//! Check command - run a single check with plain pass/fail output.

use anyhow::Result;
use clap::Args;
use serde_json::json;
use tracing::info;

use aipatch_checks::{CheckContext, CheckRunner, CheckTarget};
use aipatch_core::CheckStatus;
use aipatch_store::resolve;

use crate::commands::doctor::{ensure_configured, parse_provider};
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, ExitCode, OutputFormat};

/// Arguments for the check command.
#[derive(Args)]
pub struct CheckArgs {
    /// Target to check (streaming, retries, cost, trace).
    pub target: String,
}

/// Runs the check command.
pub async fn run(args: &CheckArgs, cli: &Cli) -> Result<()> {
    let target = CheckTarget::from_name(&args.target).ok_or_else(|| {
        anyhow::anyhow!(
            "Unknown target: {}. Use: streaming, retries, cost, trace",
            args.target
        )
    })?;

    let provider = parse_provider(cli.provider.as_deref())?;
    let config = resolve(provider);
    ensure_configured(&config, cli);

    info!(target = %target, "Running single check");

    let ctx = CheckContext::new();
    let outcomes = CheckRunner::for_target(target).execute(&config, &ctx).await;
    let outcome = &outcomes[0];
    let passed = outcome.report.status == CheckStatus::Pass;

    match cli.format {
        OutputFormat::Text => {
            if passed {
                println!("✅ {} check passed", target.name().to_uppercase());
            } else {
                println!("❌ {} check {}", target.name().to_uppercase(), outcome.report.status);
                let formatter = TextFormatter::new(!cli.no_color);
                print!("{}", formatter.format_check(outcome.id, &outcome.report));
            }
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            let mut value = serde_json::to_value(&outcome.report)?;
            value["target"] = json!(target.name());
            println!("{}", formatter.format(&value)?);
        }
    }

    if !passed {
        std::process::exit(ExitCode::Error as i32);
    }

    Ok(())
}
