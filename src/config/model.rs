//! Configuration data model shared by the loader, resolver and validator.
//!
//! The JSON shape mirrors these structs field by field. Every field is optional
//! in the document; missing strings default to empty and missing sub-sections
//! stay absent.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

/// Root configuration for a backup run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the backup server, e.g. `https://192.168.1.10:8007`
    #[serde(rename = "baseurl", deserialize_with = "null_as_default")]
    pub base_url: String,

    /// TLS certificate fingerprint of the server
    #[serde(rename = "certfingerprint", deserialize_with = "null_as_default")]
    pub cert_fingerprint: String,

    /// API token id
    #[serde(rename = "authid", deserialize_with = "null_as_default")]
    pub auth_id: String,

    /// API token secret
    #[serde(deserialize_with = "null_as_default")]
    pub secret: String,

    /// Target datastore
    #[serde(deserialize_with = "null_as_default")]
    pub datastore: String,

    /// Target namespace (may be empty)
    #[serde(deserialize_with = "null_as_default")]
    pub namespace: String,

    /// Backup id (may be empty)
    #[serde(rename = "backup-id", deserialize_with = "null_as_default")]
    pub backup_id: String,

    /// Directory to archive
    #[serde(rename = "backupdir", deserialize_with = "null_as_default")]
    pub backup_source_dir: String,

    /// Name of the stream to archive from standard input
    #[serde(rename = "backupstreamname", deserialize_with = "null_as_default")]
    pub backup_stream_name: String,

    /// Debug PXAR archive output path
    #[serde(rename = "pxarout", deserialize_with = "null_as_default")]
    pub pxar_out: String,

    /// Mail notification block, present only when configured
    #[serde(rename = "smtp", skip_serializing_if = "Option::is_none")]
    pub notification: Option<NotificationConfig>,
}

/// SMTP notification settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Mail server host
    #[serde(deserialize_with = "null_as_default")]
    pub host: String,

    /// Mail server port, kept as text
    #[serde(deserialize_with = "null_as_default")]
    pub port: String,

    /// Mail server username
    #[serde(deserialize_with = "null_as_default")]
    pub username: String,

    /// Mail server password
    #[serde(deserialize_with = "null_as_default")]
    pub password: String,

    /// Allow insecure communication with the mail server
    #[serde(deserialize_with = "null_as_default")]
    pub insecure: bool,

    /// Sender/receiver pairs, one mail per entry
    #[serde(rename = "mails", deserialize_with = "null_as_default")]
    pub recipients: Vec<Recipient>,

    /// Subject and body templates
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<MessageTemplate>,
}

/// A single sender/receiver address pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Recipient {
    /// Sender address
    #[serde(deserialize_with = "null_as_default")]
    pub from: String,
    /// Receiver address
    #[serde(deserialize_with = "null_as_default")]
    pub to: String,
}

/// Notification message template. Never required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageTemplate {
    /// Mail subject
    #[serde(deserialize_with = "null_as_default")]
    pub subject: String,
    /// Mail body
    #[serde(deserialize_with = "null_as_default")]
    pub body: String,
}

/// Reads a JSON `null` as the field's empty value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// What the backup pipeline archives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupSource<'a> {
    /// A directory tree on disk.
    Directory(&'a Path),
    /// A named stream read from standard input.
    Stream(&'a str),
}

impl Config {
    /// Returns the notification block, if any mail setting was supplied.
    #[must_use]
    pub const fn notification(&self) -> Option<&NotificationConfig> {
        self.notification.as_ref()
    }

    /// Returns true if the notification block exists.
    #[must_use]
    pub const fn has_notification(&self) -> bool {
        self.notification.is_some()
    }

    /// Returns the backup source.
    ///
    /// A source directory takes priority over a stream name when both are set.
    /// Returns `None` if neither is set.
    #[must_use]
    pub fn backup_source(&self) -> Option<BackupSource<'_>> {
        if !self.backup_source_dir.is_empty() {
            Some(BackupSource::Directory(Path::new(&self.backup_source_dir)))
        } else if !self.backup_stream_name.is_empty() {
            Some(BackupSource::Stream(&self.backup_stream_name))
        } else {
            None
        }
    }

    /// Returns the debug archive path, if set.
    #[must_use]
    pub fn pxar_out(&self) -> Option<&Path> {
        (!self.pxar_out.is_empty()).then(|| Path::new(&self.pxar_out))
    }
}

impl fmt::Display for BackupSource<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Directory(path) => write!(f, "dir:{}", path.display()),
            Self::Stream(name) => write!(f, "stream:{name}"),
        }
    }
}

/// Renders a secret as a fixed mask, or `none` when empty.
fn redact(value: &str) -> &'static str {
    if value.is_empty() { "none" } else { "***" }
}

fn or_none(value: &str) -> &str {
    if value.is_empty() { "none" } else { value }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = self
            .backup_source()
            .map_or_else(|| "none".to_string(), |s| s.to_string());

        write!(
            f,
            "Config {{ baseurl: {}, authid: {}, secret: {}, datastore: {}, namespace: {}, \
             backup_id: {}, source: {}, pxarout: {}",
            or_none(&self.base_url),
            or_none(&self.auth_id),
            redact(&self.secret),
            or_none(&self.datastore),
            or_none(&self.namespace),
            or_none(&self.backup_id),
            source,
            or_none(&self.pxar_out),
        )?;

        match &self.notification {
            Some(smtp) => write!(f, ", smtp: {smtp} }}"),
            None => write!(f, ", smtp: none }}"),
        }
    }
}

impl fmt::Display for NotificationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} (user: {}, password: {}, insecure: {}, recipients: {})",
            or_none(&self.host),
            or_none(&self.port),
            or_none(&self.username),
            redact(&self.password),
            self.insecure,
            self.recipients.len(),
        )
    }
}
