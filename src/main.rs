//! PBS Backup: Proxmox Backup Server client
//!
//! Entry point for the pbs-backup application.

use pbs_backup::config::{Cli, Command, ResolvedConfig, write_default_config};
use std::process::ExitCode;

mod app;

use app::{exit_code, print_config_hint, print_validation_failure, setup_tracing};

/// Main entry point.
///
/// Excluded from coverage as it's the thin wrapper around testable components.
#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let cli = Cli::parse_args();
    setup_tracing(cli.verbose);

    // Handle init subcommand
    if let Some(Command::Init { output }) = &cli.command {
        return handle_init(output);
    }

    // Load, merge and validate configuration
    let resolved = match ResolvedConfig::load(&cli) {
        Ok(resolved) => resolved,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            print_config_hint(&e);
            return exit_code::CONFIG_ERROR;
        }
    };

    if !resolved.is_valid() {
        print_validation_failure(&resolved.report);
        return exit_code::CONFIG_ERROR;
    }

    tracing::info!("{resolved}");
    if resolved.config.has_notification() {
        tracing::info!("Mail notification enabled");
    }

    println!("{resolved}");
    exit_code::SUCCESS
}

/// Handles the `init` subcommand.
fn handle_init(output: &std::path::Path) -> ExitCode {
    match write_default_config(output) {
        Ok(()) => {
            println!("Configuration template written to: {}", output.display());
            exit_code::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            exit_code::CONFIG_ERROR
        }
    }
}
