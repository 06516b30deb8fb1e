//! Providers command - list provider families and env readiness.

use anyhow::Result;
use serde_json::json;

use aipatch_core::ProviderKind;
use aipatch_store::resolve;

use crate::output::JsonFormatter;
use crate::{Cli, OutputFormat};

/// Runs the providers command.
pub fn run(cli: &Cli) -> Result<()> {
    if cli.format == OutputFormat::Json {
        let entries: Vec<_> = ProviderKind::all()
            .iter()
            .map(|kind| {
                let config = resolve(*kind);
                json!({
                    "provider": kind.cli_name(),
                    "configured": config.is_valid(),
                    "missing": config.missing_vars(),
                })
            })
            .collect();

        let formatter = JsonFormatter::new(cli.pretty);
        println!("{}", formatter.format(&entries)?);
        return Ok(());
    }

    for kind in ProviderKind::all() {
        let config = resolve(*kind);
        let status = if config.is_valid() {
            if cli.no_color {
                "✓ configured".to_string()
            } else {
                "\x1b[32m✓\x1b[0m configured".to_string()
            }
        } else {
            let missing = config.missing_vars().join(", ");
            if cli.no_color {
                format!("✗ missing: {}", missing)
            } else {
                format!("\x1b[31m✗\x1b[0m missing: {}", missing)
            }
        };

        println!("{:<20} {}", kind.display_name(), status);
    }

    Ok(())
}
