//! CLI argument parsing using clap.
//!
//! Defines the command-line interface: the `--config` path, one override
//! flag per configuration field, and the `init` subcommand.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// PBS Backup: Proxmox Backup Server client
///
/// Backs up a directory or a stream to a Proxmox Backup Server datastore
/// and optionally sends a notification mail about the result.
#[derive(Debug, Parser)]
#[command(name = "pbs-backup")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to JSON config file. All other flags override values loaded from it
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short)]
    pub verbose: bool,

    #[command(flatten)]
    pub overrides: Overrides,
}

/// Per-field overrides applied on top of the config file.
///
/// An empty string is the same as not passing the flag. Values may start
/// with `-`, so `--secret -abc` sets the secret to `-abc`.
#[derive(Debug, Clone, Default, Args)]
pub struct Overrides {
    /// Base URL for the backup server, example: https://192.168.1.10:8007
    #[arg(long = "baseurl", allow_hyphen_values = true)]
    pub base_url: Option<String>,

    /// Certificate fingerprint for SSL connection, example: ea:7d:06:f9...
    #[arg(long = "certfingerprint", allow_hyphen_values = true)]
    pub cert_fingerprint: Option<String>,

    /// Authentication ID (PBS API token)
    #[arg(long = "authid", allow_hyphen_values = true)]
    pub auth_id: Option<String>,

    /// Secret for authentication
    #[arg(long, allow_hyphen_values = true)]
    pub secret: Option<String>,

    /// Datastore name
    #[arg(long, allow_hyphen_values = true)]
    pub datastore: Option<String>,

    /// Namespace (optional)
    #[arg(long, allow_hyphen_values = true)]
    pub namespace: Option<String>,

    /// Backup ID (optional - if not specified, the hostname is used)
    #[arg(long = "backup-id", allow_hyphen_values = true)]
    pub backup_id: Option<String>,

    /// Backup source directory, must not be a symlink
    #[arg(long = "backupdir", allow_hyphen_values = true)]
    pub backup_source_dir: Option<String>,

    /// Filename for stream backup
    #[arg(long = "backupstream", allow_hyphen_values = true)]
    pub backup_stream_name: Option<String>,

    /// Output PXAR archive for debug purposes (optional)
    #[arg(long = "pxarout", allow_hyphen_values = true)]
    pub pxar_out: Option<String>,

    /// Mail notification: mail server host
    #[arg(long = "mail-host", allow_hyphen_values = true)]
    pub mail_host: Option<String>,

    /// Mail notification: mail server port
    #[arg(long = "mail-port", allow_hyphen_values = true)]
    pub mail_port: Option<String>,

    /// Mail notification: mail server username
    #[arg(long = "mail-username", allow_hyphen_values = true)]
    pub mail_username: Option<String>,

    /// Mail notification: mail server password
    #[arg(long = "mail-password", allow_hyphen_values = true)]
    pub mail_password: Option<String>,

    /// Mail notification: allow insecure communication with the mail server
    #[arg(long = "mail-insecure")]
    pub mail_insecure: bool,

    /// Mail notification: sender address
    #[arg(long = "mail-from", allow_hyphen_values = true)]
    pub mail_from: Option<String>,

    /// Mail notification: receiver address
    #[arg(long = "mail-to", allow_hyphen_values = true)]
    pub mail_to: Option<String>,

    /// Mail notification: subject template
    #[arg(long = "mail-subject-template", allow_hyphen_values = true)]
    pub mail_subject_template: Option<String>,

    /// Mail notification: body template
    #[arg(long = "mail-body-template", allow_hyphen_values = true)]
    pub mail_body_template: Option<String>,
}

/// Subcommands for pbs-backup
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a configuration file template
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = "pbs-backup.json")]
        output: PathBuf,
    },
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Some(Command::Init { .. }))
    }
}
