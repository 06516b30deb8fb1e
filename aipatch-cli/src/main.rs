// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! AI Patch CLI - fix-first diagnostics for AI API issues.
//!
//! # Examples
//!
//! ```bash
//! # Run every check against the default provider
//! ai-patch
//!
//! # Diagnose rate-limit behavior only
//! ai-patch doctor --target retries
//!
//! # Probe an Anthropic endpoint
//! ai-patch doctor --provider anthropic
//!
//! # Single check with plain pass/fail output
//! ai-patch check retries
//!
//! # JSON output
//! ai-patch --format json --pretty
//!
//! # List provider families and their env readiness
//! ai-patch providers
//!
//! # Opt out of telemetry permanently
//! ai-patch config telemetry off
//! ```

mod commands;
mod output;
mod report;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{check, config, doctor, providers};

/// CLI version reported in output and telemetry.
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// CLI Definition
// ============================================================================

/// AI Patch CLI - diagnose AI API issues.
#[derive(Parser)]
#[command(name = "ai-patch")]
#[command(about = "Fix-first diagnostics for AI API issues")]
#[command(long_about = r#"
AI Patch diagnoses production AI API issues with four wedge checks:

  • streaming   SSE stalls, partial output, slow first byte
  • retries     429s, Retry-After, rate-limit chaos
  • cost        cost spikes, token pricing
  • trace       request IDs, duplicate detection

Supported provider families:
  • openai-compatible (default; gateways like LiteLLM/Portkey/Helicone)
  • anthropic
  • gemini
  • other

Examples:
  ai-patch                             # All checks, default provider
  ai-patch doctor --target retries     # Rate-limit diagnosis only
  ai-patch doctor --provider anthropic # Probe an Anthropic endpoint
  ai-patch check streaming             # Single check, plain pass/fail
  ai-patch --format json               # JSON output
"#)]
#[command(version)]
#[command(author = "AI Patch Contributors")]
pub struct Cli {
    /// Subcommand to run. If none, runs 'doctor' by default.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Provider family to probe (openai-compatible, anthropic, gemini, other).
    #[arg(long, short, global = true)]
    pub provider: Option<String>,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Disable telemetry for this invocation.
    #[arg(long, global = true)]
    pub no_telemetry: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Run diagnosis and write a report (default if no command specified).
    #[command(visible_alias = "d")]
    Doctor(doctor::DoctorArgs),

    /// Run a single check with plain pass/fail output.
    #[command(visible_aliases = ["t", "test"])]
    Check(check::CheckArgs),

    /// List provider families and their environment readiness.
    #[command(visible_alias = "p")]
    Providers,

    /// Manage configuration.
    Config(config::ConfigArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[repr(i32)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// Checks failed or warned, or a general error occurred.
    Error = 1,
    /// Required configuration is missing.
    ConfigMissing = 2,
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return; // No logging in quiet mode
    }

    let filter = if verbose {
        EnvFilter::new("aipatch_cli=debug,aipatch_checks=debug,aipatch_store=debug,aipatch_telemetry=debug,info")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Some(Commands::Doctor(args)) => doctor::run(args, &cli).await,
        Some(Commands::Check(args)) => check::run(args, &cli).await,
        Some(Commands::Providers) => providers::run(&cli),
        Some(Commands::Config(args)) => config::run(args, &cli).await,
        None => {
            // Default to doctor command
            doctor::run(&doctor::DoctorArgs::default(), &cli).await
        }
    };

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {}", e);
        }
        std::process::exit(ExitCode::Error as i32);
    }

    Ok(())
}
