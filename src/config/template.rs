//! Configuration file template for the `init` subcommand.

use std::path::Path;

use super::ConfigError;
use super::model::{Config, MessageTemplate, NotificationConfig, Recipient};

/// Returns an example configuration with every field filled in.
///
/// Remove the `smtp` section to disable mail notification.
#[must_use]
pub fn example_config() -> Config {
    Config {
        base_url: "https://192.168.1.10:8007".to_string(),
        cert_fingerprint: "ea:7d:06:f9:00:00:00:00:00:00:00:00:00:00:00:00".to_string(),
        auth_id: "backup@pbs!client".to_string(),
        secret: "00000000-0000-0000-0000-000000000000".to_string(),
        datastore: "datastore".to_string(),
        namespace: String::new(),
        backup_id: String::new(),
        backup_source_dir: "/home".to_string(),
        backup_stream_name: String::new(),
        pxar_out: String::new(),
        notification: Some(NotificationConfig {
            host: "smtp.example.com".to_string(),
            port: "587".to_string(),
            username: "backup@example.com".to_string(),
            password: "password".to_string(),
            insecure: false,
            recipients: vec![Recipient {
                from: "backup@example.com".to_string(),
                to: "admin@example.com".to_string(),
            }],
            template: Some(MessageTemplate {
                subject: "Backup report".to_string(),
                body: "The scheduled backup has finished.".to_string(),
            }),
        }),
    }
}

/// Generates the default configuration file content.
#[must_use]
pub fn default_config_template() -> String {
    // Serializing plain strings and a bool into a map cannot fail.
    let mut content = serde_json::to_string_pretty(&example_config()).unwrap_or_default();
    content.push('\n');
    content
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    std::fs::write(path, default_config_template()).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
