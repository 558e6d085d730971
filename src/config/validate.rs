//! Completeness checks on the merged configuration.
//!
//! Validation never fails hard: it returns a [`ValidationReport`] listing
//! every rule the configuration breaks, and the caller decides what to do.

use std::fmt;

use thiserror::Error;

use super::error::field;
use super::model::{Config, NotificationConfig};

/// A single broken validation rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    /// A required top-level field is empty.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Neither a source directory nor a stream name is set.
    #[error("missing backup source: set backupdir or backupstreamname")]
    MissingBackupSource,

    /// A required mail server field is empty.
    #[error("missing mail notification field: {0}")]
    MissingNotificationField(&'static str),

    /// The notification block has no recipients.
    #[error("mail notification has no recipients")]
    NoRecipients,

    /// A recipient has an empty address.
    #[error("mail recipient #{index} is missing '{field}'")]
    IncompleteRecipient {
        /// Position in the recipient list
        index: usize,
        /// The empty field (`from` or `to`)
        field: &'static str,
    },
}

impl Violation {
    /// Returns true if this violation concerns the notification block.
    #[must_use]
    pub const fn is_notification(&self) -> bool {
        matches!(
            self,
            Self::MissingNotificationField(_) | Self::NoRecipients | Self::IncompleteRecipient { .. }
        )
    }
}

/// Outcome of validating a [`Config`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    violations: Vec<Violation>,
}

impl ValidationReport {
    /// Returns true if no rule was broken.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Broken rules, in the order they were checked.
    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            return write!(f, "configuration is valid");
        }

        let messages: Vec<String> = self.violations.iter().map(ToString::to_string).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl Config {
    /// Checks that the configuration is complete enough to run a backup.
    ///
    /// The base rules (server, credentials, datastore and a backup source) are
    /// checked first. If any of them fails, the notification block is not
    /// inspected at all. An absent notification block is valid; a present one
    /// needs its server fields and at least one complete recipient. The
    /// message template is never required.
    #[must_use]
    pub fn validate(&self) -> ValidationReport {
        let mut violations = self.base_violations();

        if violations.is_empty() {
            if let Some(smtp) = &self.notification {
                violations.extend(notification_violations(smtp));
            }
        }

        ValidationReport { violations }
    }

    /// Shorthand for `self.validate().is_valid()`.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validate().is_valid()
    }

    fn base_violations(&self) -> Vec<Violation> {
        let mut violations: Vec<Violation> = [
            (field::BASE_URL, &self.base_url),
            (field::AUTH_ID, &self.auth_id),
            (field::SECRET, &self.secret),
            (field::DATASTORE, &self.datastore),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| Violation::MissingField(name))
        .collect();

        // Either source is enough; having both is accepted.
        if self.backup_source_dir.is_empty() && self.backup_stream_name.is_empty() {
            violations.push(Violation::MissingBackupSource);
        }

        violations
    }
}

fn notification_violations(smtp: &NotificationConfig) -> Vec<Violation> {
    let mut violations: Vec<Violation> = [
        (field::MAIL_HOST, &smtp.host),
        (field::MAIL_PORT, &smtp.port),
        (field::MAIL_USERNAME, &smtp.username),
        (field::MAIL_PASSWORD, &smtp.password),
    ]
    .into_iter()
    .filter(|(_, value)| value.is_empty())
    .map(|(name, _)| Violation::MissingNotificationField(name))
    .collect();

    if smtp.recipients.is_empty() {
        violations.push(Violation::NoRecipients);
    }

    for (index, recipient) in smtp.recipients.iter().enumerate() {
        if recipient.from.is_empty() {
            violations.push(Violation::IncompleteRecipient {
                index,
                field: field::FROM,
            });
        }
        if recipient.to.is_empty() {
            violations.push(Violation::IncompleteRecipient {
                index,
                field: field::TO,
            });
        }
    }

    violations
}
