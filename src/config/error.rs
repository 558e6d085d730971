//! Error types for configuration loading.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for configuration operations.
///
/// Covers the fatal failures of reading and decoding the configuration file,
/// and writing the template for `init`. A configuration that loads but fails
/// validation is reported through [`ValidationReport`](super::ValidationReport)
/// instead.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("Failed to read config file '{}': {source}", path.display())]
    FileRead {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to decode the JSON configuration.
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),

    /// Failed to write configuration file (for init command).
    #[error("Failed to write config file '{}': {source}", path.display())]
    FileWrite {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Well-known field names, as spelled in the JSON document.
///
/// Used by validation violations so callers can match on them.
pub mod field {
    /// Backup server base URL.
    pub const BASE_URL: &str = "baseurl";
    /// API token id.
    pub const AUTH_ID: &str = "authid";
    /// API token secret.
    pub const SECRET: &str = "secret";
    /// Target datastore.
    pub const DATASTORE: &str = "datastore";
    /// Mail server host.
    pub const MAIL_HOST: &str = "smtp.host";
    /// Mail server port.
    pub const MAIL_PORT: &str = "smtp.port";
    /// Mail server username.
    pub const MAIL_USERNAME: &str = "smtp.username";
    /// Mail server password.
    pub const MAIL_PASSWORD: &str = "smtp.password";
    /// Recipient sender address.
    pub const FROM: &str = "from";
    /// Recipient receiver address.
    pub const TO: &str = "to";
}
