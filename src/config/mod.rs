//! Configuration layer for PBS Backup.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`], [`Overrides`])
//! - JSON configuration file loading ([`load_source`])
//! - Override resolution ([`Config::apply_overrides`], [`ResolvedConfig`])
//! - Validation ([`Config::validate`], [`ValidationReport`])
//! - Configuration file generation ([`write_default_config`])
//!
//! # Priority
//!
//! Configuration is built from two layers, merged once at startup:
//!
//! 1. **Explicit CLI arguments** - Values passed via command line
//! 2. **JSON config file** - Values from the file named by `--config`
//!
//! There are no built-in defaults: a field missing from both layers stays empty.
//!
//! A CLI value replaces the file value only when it is non-empty. Passing an
//! empty string is the same as not passing the flag, so a value set in the
//! file cannot be cleared from the command line.
//!
//! # Mail Notification
//!
//! The `smtp` block is optional. It is created as soon as any `--mail-*` flag
//! is supplied, and once present it must be complete for the configuration to
//! be valid.
//!
//! - `--mail-from` / `--mail-to` always target the **first** recipient. Further
//!   recipients can only be listed in the config file and are left untouched.
//! - `--mail-subject-template` / `--mail-body-template` create the template
//!   section on demand. The template is never required.
//!
//! # Boolean Flag Semantics
//!
//! `--mail-insecure` only enables: once `insecure` is `true` in the file, the
//! CLI cannot turn it off, and passing the flag creates the `smtp` block.

mod cli;
mod error;
mod model;
mod resolve;
mod source;
mod template;
mod validate;

#[cfg(test)]
mod resolve_tests;

pub use cli::{Cli, Command, Overrides};
pub use error::{ConfigError, field};
pub use model::{BackupSource, Config, MessageTemplate, NotificationConfig, Recipient};
pub use resolve::ResolvedConfig;
pub use source::load_source;
pub use template::{default_config_template, example_config, write_default_config};
pub use validate::{ValidationReport, Violation};
