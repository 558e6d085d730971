//! Application startup and utilities.
//!
//! This module contains exit codes, tracing setup, and error hints
//! that support the main entry point.

use pbs_backup::config::{ConfigError, ValidationReport, Violation, field};
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;

/// Application exit codes.
pub mod exit_code {
    use std::process::ExitCode;

    /// Success (exit code 0).
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Configuration error (exit code 1) - unreadable or malformed file, incomplete configuration.
    pub const CONFIG_ERROR: ExitCode = ExitCode::FAILURE;
}

const INIT_HINT: &str = "\nRun 'pbs-backup init' to generate a configuration template.";

/// Returns a hint for a configuration loading error, if one applies.
pub const fn config_error_hint(error: &ConfigError) -> Option<&'static str> {
    match error {
        ConfigError::FileRead { .. } => Some(INIT_HINT),
        _ => None,
    }
}

/// Returns a hint for an incomplete configuration, if one applies.
///
/// Missing connection details usually mean no config file was given at all.
pub fn validation_hint(report: &ValidationReport) -> Option<&'static str> {
    report
        .violations()
        .iter()
        .any(|v| {
            matches!(v, Violation::MissingField(f) if *f == field::BASE_URL || *f == field::DATASTORE)
        })
        .then_some(INIT_HINT)
}

/// Prints helpful hints for common configuration errors.
pub fn print_config_hint(error: &ConfigError) {
    if let Some(hint) = config_error_hint(error) {
        eprintln!("{hint}");
    }
}

/// Prints every broken rule and a hint, if one applies.
pub fn print_validation_failure(report: &ValidationReport) {
    eprintln!("Invalid configuration:");
    for violation in report.violations() {
        eprintln!("  - {violation}");
    }
    if let Some(hint) = validation_hint(report) {
        eprintln!("{hint}");
    }
}

/// Sets up the tracing subscriber for logging.
pub fn setup_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
