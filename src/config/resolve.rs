//! Applying command-line overrides on top of the loaded configuration.
//!
//! Overrides are applied in four passes: top-level scalars, mail server
//! scalars, the first recipient, then the message template. A pass may rely
//! on sub-structures created by an earlier one.

use std::fmt;

use super::ConfigError;
use super::cli::{Cli, Overrides};
use super::model::{Config, MessageTemplate, NotificationConfig, Recipient};
use super::source::load_source;
use super::validate::ValidationReport;

/// Configuration after loading and overriding, with its validation verdict.
///
/// Whether an invalid configuration is fatal is up to the caller.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// The merged configuration
    pub config: Config,

    /// Result of validating `config`
    pub report: ValidationReport,
}

impl ResolvedConfig {
    /// Loads the config file named by `cli.config` (if any), applies the CLI
    /// overrides and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = load_source(cli.config.as_deref())?;
        config.apply_overrides(&cli.overrides);
        Ok(Self::from_config(config))
    }

    /// Validates an already merged configuration.
    #[must_use]
    pub fn from_config(config: Config) -> Self {
        let report = config.validate();
        Self { config, report }
    }

    /// Returns true if the configuration passed validation.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.report.is_valid()
    }
}

impl fmt::Display for ResolvedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.config, f)
    }
}

/// Returns the override value if it was supplied and is non-empty.
fn supplied(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.is_empty())
}

/// Overwrites `target` with `value` if supplied. Returns whether it did.
fn replace(target: &mut String, value: Option<&String>) -> bool {
    match supplied(value) {
        Some(v) => {
            v.clone_into(target);
            true
        }
        None => false,
    }
}

impl Config {
    /// Applies command-line overrides in place.
    ///
    /// A supplied, non-empty override replaces the loaded value; an empty or
    /// missing one leaves it untouched, so a value from the file can never be
    /// cleared from the command line.
    pub fn apply_overrides(&mut self, overrides: &Overrides) {
        let scalars = self.apply_scalars(overrides);
        let smtp = self.apply_notification_scalars(overrides);
        let recipient = self.apply_recipient(overrides);
        let template = self.apply_template(overrides);

        tracing::debug!(
            scalars,
            smtp,
            recipient,
            template,
            "Applied command-line overrides"
        );
    }

    /// Returns the notification block, creating an empty one if absent.
    fn notification_mut(&mut self) -> &mut NotificationConfig {
        self.notification.get_or_insert_with(NotificationConfig::default)
    }

    /// Returns the first recipient, creating the notification block and an
    /// empty recipient as needed.
    fn first_recipient_mut(&mut self) -> &mut Recipient {
        let smtp = self.notification_mut();
        if smtp.recipients.is_empty() {
            smtp.recipients.push(Recipient::default());
        }
        &mut smtp.recipients[0]
    }

    /// Returns the message template, creating the notification block and an
    /// empty template as needed.
    fn template_mut(&mut self) -> &mut MessageTemplate {
        self.notification_mut()
            .template
            .get_or_insert_with(MessageTemplate::default)
    }

    fn apply_scalars(&mut self, o: &Overrides) -> usize {
        [
            replace(&mut self.base_url, o.base_url.as_ref()),
            replace(&mut self.cert_fingerprint, o.cert_fingerprint.as_ref()),
            replace(&mut self.auth_id, o.auth_id.as_ref()),
            replace(&mut self.secret, o.secret.as_ref()),
            replace(&mut self.datastore, o.datastore.as_ref()),
            replace(&mut self.namespace, o.namespace.as_ref()),
            replace(&mut self.backup_id, o.backup_id.as_ref()),
            replace(&mut self.backup_source_dir, o.backup_source_dir.as_ref()),
            replace(&mut self.backup_stream_name, o.backup_stream_name.as_ref()),
            replace(&mut self.pxar_out, o.pxar_out.as_ref()),
        ]
        .into_iter()
        .filter(|applied| *applied)
        .count()
    }

    fn apply_notification_scalars(&mut self, o: &Overrides) -> usize {
        let mut applied = [
            self.replace_notification(o.mail_host.as_ref(), |s| &mut s.host),
            self.replace_notification(o.mail_port.as_ref(), |s| &mut s.port),
            self.replace_notification(o.mail_username.as_ref(), |s| &mut s.username),
            self.replace_notification(o.mail_password.as_ref(), |s| &mut s.password),
        ]
        .into_iter()
        .filter(|applied| *applied)
        .count();

        // Only `true` counts as supplied; `false` cannot be told apart from absence.
        if o.mail_insecure {
            self.notification_mut().insecure = true;
            applied += 1;
        }

        applied
    }

    /// Overwrites a notification field if `value` is supplied, creating the
    /// notification block first. An unsupplied value leaves the block absent.
    fn replace_notification(
        &mut self,
        value: Option<&String>,
        select: impl FnOnce(&mut NotificationConfig) -> &mut String,
    ) -> bool {
        match supplied(value) {
            Some(v) => {
                v.clone_into(select(self.notification_mut()));
                true
            }
            None => false,
        }
    }

    fn apply_recipient(&mut self, o: &Overrides) -> usize {
        let mut applied = 0;

        if let Some(from) = supplied(o.mail_from.as_ref()) {
            from.clone_into(&mut self.first_recipient_mut().from);
            applied += 1;
        }
        if let Some(to) = supplied(o.mail_to.as_ref()) {
            to.clone_into(&mut self.first_recipient_mut().to);
            applied += 1;
        }

        applied
    }

    fn apply_template(&mut self, o: &Overrides) -> usize {
        let mut applied = 0;

        if let Some(subject) = supplied(o.mail_subject_template.as_ref()) {
            subject.clone_into(&mut self.template_mut().subject);
            applied += 1;
        }
        if let Some(body) = supplied(o.mail_body_template.as_ref()) {
            body.clone_into(&mut self.template_mut().body);
            applied += 1;
        }

        applied
    }
}
