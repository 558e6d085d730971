//! Tests for applying CLI overrides on top of the config file.

use std::io::Write;

use tempfile::NamedTempFile;

use super::{Cli, Config, ConfigError, MessageTemplate, Overrides, Recipient, ResolvedConfig};

/// Helper to create CLI args from a slice
fn cli(args: &[&str]) -> Cli {
    let mut full_args = vec!["pbs-backup"];
    full_args.extend(args);
    Cli::parse_from_iter(full_args)
}

/// Helper to parse a JSON config
fn json(content: &str) -> Config {
    Config::from_json(content).unwrap()
}

/// Applies the overrides parsed from `args` to `config`.
fn resolve(mut config: Config, args: &[&str]) -> Config {
    config.apply_overrides(&cli(args).overrides);
    config
}

const BASE: &str = r#"{"baseurl":"https://h","authid":"a","secret":"s","datastore":"d","backupdir":"/x"}"#;

mod scalars {
    use super::*;

    #[test]
    fn no_overrides_keep_file_values() {
        let config = resolve(json(BASE), &[]);

        assert_eq!(config, json(BASE));
    }

    #[test]
    fn override_wins_over_file() {
        let config = resolve(
            json(BASE),
            &[
                "--baseurl",
                "https://other:8007",
                "--authid",
                "b",
                "--secret",
                "t",
                "--datastore",
                "e",
                "--backupdir",
                "/y",
            ],
        );

        assert_eq!(config.base_url, "https://other:8007");
        assert_eq!(config.auth_id, "b");
        assert_eq!(config.secret, "t");
        assert_eq!(config.datastore, "e");
        assert_eq!(config.backup_source_dir, "/y");
    }

    #[test]
    fn override_fills_missing_fields() {
        let config = resolve(
            json(BASE),
            &[
                "--certfingerprint",
                "ea:7d",
                "--namespace",
                "ns",
                "--backup-id",
                "web01",
                "--backupstream",
                "db.sql",
                "--pxarout",
                "/tmp/out.pxar",
            ],
        );

        assert_eq!(config.cert_fingerprint, "ea:7d");
        assert_eq!(config.namespace, "ns");
        assert_eq!(config.backup_id, "web01");
        assert_eq!(config.backup_stream_name, "db.sql");
        assert_eq!(config.pxar_out, "/tmp/out.pxar");
        // Untouched fields survive
        assert_eq!(config.base_url, "https://h");
    }

    #[test]
    fn empty_override_is_a_no_op() {
        let config = resolve(
            json(BASE),
            &["--baseurl", "", "--datastore", "", "--backupdir", ""],
        );

        assert_eq!(config.base_url, "https://h");
        assert_eq!(config.datastore, "d");
        assert_eq!(config.backup_source_dir, "/x");
    }

    #[test]
    fn overrides_only_without_file() {
        let config = resolve(
            Config::default(),
            &["--baseurl", "https://h", "--datastore", "d"],
        );

        assert_eq!(config.base_url, "https://h");
        assert_eq!(config.datastore, "d");
        assert!(config.auth_id.is_empty());
    }

    #[test]
    fn scalar_overrides_do_not_create_notification() {
        let config = resolve(Config::default(), &["--baseurl", "https://h"]);

        assert!(config.notification.is_none());
    }
}

mod notification_block {
    use super::*;

    #[test]
    fn each_mail_scalar_creates_block() {
        for args in [
            ["--mail-host", "smtp.example.com"],
            ["--mail-port", "25"],
            ["--mail-username", "u"],
            ["--mail-password", "p"],
        ] {
            let config = resolve(Config::default(), &args);
            let smtp = config.notification().unwrap();

            assert!(smtp.recipients.is_empty(), "{args:?}");
            assert!(smtp.template.is_none(), "{args:?}");
        }
    }

    #[test]
    fn insecure_flag_creates_block() {
        let config = resolve(Config::default(), &["--mail-insecure"]);

        assert!(config.notification().unwrap().insecure);
    }

    #[test]
    fn insecure_flag_cannot_disable_file_value() {
        let config = resolve(json(r#"{"smtp": {"insecure": true}}"#), &[]);

        assert!(config.notification().unwrap().insecure);
    }

    #[test]
    fn empty_mail_override_does_not_create_block() {
        let config = resolve(Config::default(), &["--mail-host", "", "--mail-to", ""]);

        assert!(config.notification.is_none());
    }

    #[test]
    fn hyphen_leading_password_reaches_config() {
        let config = resolve(Config::default(), &["--mail-password", "-s3cret"]);

        assert_eq!(config.notification().unwrap().password, "-s3cret");
    }

    #[test]
    fn mail_override_replaces_file_value() {
        let config = resolve(
            json(r#"{"smtp": {"host": "old", "port": "25", "username": "u", "password": "p"}}"#),
            &["--mail-host", "new", "--mail-port", "587"],
        );

        let smtp = config.notification().unwrap();
        assert_eq!(smtp.host, "new");
        assert_eq!(smtp.port, "587");
        assert_eq!(smtp.username, "u");
        assert_eq!(smtp.password, "p");
    }
}

mod recipients {
    use super::*;

    #[test]
    fn from_and_to_create_single_recipient() {
        let config = resolve(
            Config::default(),
            &["--mail-from", "a@x", "--mail-to", "b@x"],
        );

        let smtp = config.notification().unwrap();
        assert_eq!(
            smtp.recipients,
            vec![Recipient {
                from: "a@x".to_string(),
                to: "b@x".to_string(),
            }]
        );
    }

    #[test]
    fn only_to_creates_partial_recipient() {
        let config = resolve(Config::default(), &["--mail-to", "b@x"]);

        let smtp = config.notification().unwrap();
        assert_eq!(smtp.recipients.len(), 1);
        assert!(smtp.recipients[0].from.is_empty());
        assert_eq!(smtp.recipients[0].to, "b@x");
    }

    #[test]
    fn override_targets_first_recipient_only() {
        let config = resolve(
            json(
                r#"{"smtp": {"mails": [
                    {"from": "a@x", "to": "b@x"},
                    {"from": "c@x", "to": "d@x"}
                ]}}"#,
            ),
            &["--mail-to", "z@x"],
        );

        let smtp = config.notification().unwrap();
        assert_eq!(smtp.recipients.len(), 2);
        assert_eq!(smtp.recipients[0].from, "a@x");
        assert_eq!(smtp.recipients[0].to, "z@x");
        assert_eq!(smtp.recipients[1].from, "c@x");
        assert_eq!(smtp.recipients[1].to, "d@x");
    }

    #[test]
    fn override_fills_empty_recipient_list() {
        let config = resolve(json(r#"{"smtp": {"host": "h", "mails": []}}"#), &["--mail-from", "a@x"]);

        let smtp = config.notification().unwrap();
        assert_eq!(smtp.host, "h");
        assert_eq!(smtp.recipients.len(), 1);
        assert_eq!(smtp.recipients[0].from, "a@x");
    }
}

mod template {
    use super::*;

    #[test]
    fn subject_only_creates_block_and_template() {
        let config = resolve(Config::default(), &["--mail-subject-template", "Done"]);

        let smtp = config.notification().unwrap();
        assert_eq!(
            smtp.template,
            Some(MessageTemplate {
                subject: "Done".to_string(),
                body: String::new(),
            })
        );
        assert!(smtp.recipients.is_empty());
    }

    #[test]
    fn body_only_creates_block_and_template() {
        let config = resolve(Config::default(), &["--mail-body-template", "Text"]);

        let template = config.notification().unwrap().template.as_ref().unwrap();
        assert!(template.subject.is_empty());
        assert_eq!(template.body, "Text");
    }

    #[test]
    fn override_keeps_other_template_field_from_file() {
        let config = resolve(
            json(r#"{"smtp": {"template": {"subject": "S", "body": "B"}}}"#),
            &["--mail-body-template", "New body"],
        );

        let template = config.notification().unwrap().template.as_ref().unwrap();
        assert_eq!(template.subject, "S");
        assert_eq!(template.body, "New body");
    }
}

mod direct_overrides {
    use super::*;

    #[test]
    fn default_overrides_change_nothing() {
        let mut config = json(BASE);
        config.apply_overrides(&Overrides::default());

        assert_eq!(config, json(BASE));
    }

    #[test]
    fn struct_built_overrides_apply() {
        let overrides = Overrides {
            datastore: Some("other".to_string()),
            mail_host: Some("smtp".to_string()),
            ..Overrides::default()
        };
        let mut config = Config::default();
        config.apply_overrides(&overrides);

        assert_eq!(config.datastore, "other");
        assert_eq!(config.notification().unwrap().host, "smtp");
    }
}

mod resolved_config {
    use super::*;

    #[test]
    fn load_without_config_file() {
        let cli = cli(&[
            "--baseurl",
            "https://h",
            "--authid",
            "a",
            "--secret",
            "s",
            "--datastore",
            "d",
            "--backupstream",
            "db.sql",
        ]);

        let resolved = ResolvedConfig::load(&cli).unwrap();

        assert!(resolved.is_valid());
        assert_eq!(resolved.config.backup_stream_name, "db.sql");
    }

    #[test]
    fn load_file_then_apply_overrides() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{BASE}").unwrap();
        let path = file.path().to_str().unwrap();

        let resolved = ResolvedConfig::load(&cli(&["--config", path, "--datastore", "e"])).unwrap();

        assert_eq!(resolved.config.datastore, "e");
        assert_eq!(resolved.config.base_url, "https://h");
        assert!(resolved.is_valid());
    }

    #[test]
    fn scenario_file_only_is_valid_without_notification() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{BASE}").unwrap();
        let path = file.path().to_str().unwrap();

        let resolved = ResolvedConfig::load(&cli(&["--config", path])).unwrap();

        assert!(resolved.is_valid());
        assert!(resolved.config.notification.is_none());
    }

    #[test]
    fn scenario_file_plus_mail_host_is_invalid() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{BASE}").unwrap();
        let path = file.path().to_str().unwrap();

        let resolved =
            ResolvedConfig::load(&cli(&["--config", path, "--mail-host", "smtp.example.com"]))
                .unwrap();

        assert!(resolved.config.notification.is_some());
        assert!(!resolved.is_valid());
    }

    #[test]
    fn load_reports_unreadable_file() {
        let result = ResolvedConfig::load(&cli(&["--config", "/nonexistent/pbs-backup.json"]));

        assert!(matches!(result, Err(ConfigError::FileRead { .. })));
    }

    #[test]
    fn display_redacts_secrets() {
        let resolved = ResolvedConfig::from_config(resolve(
            json(BASE),
            &["--mail-host", "smtp", "--mail-password", "hunter2"],
        ));
        let shown = resolved.to_string();

        assert!(shown.contains("https://h"));
        assert!(shown.contains("dir:/x"));
        assert!(!shown.contains("hunter2"));
        assert!(!shown.contains("secret: s,"));
        assert!(shown.contains("secret: ***"));
    }
}
