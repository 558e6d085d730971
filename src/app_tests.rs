//! Tests for the app module.

use super::*;

use pbs_backup::config::Config;

mod hints {
    use super::*;

    #[test]
    fn read_error_suggests_init() {
        let error = ConfigError::FileRead {
            path: "missing.json".into(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };

        assert_eq!(config_error_hint(&error), Some(INIT_HINT));
    }

    #[test]
    fn parse_error_has_no_hint() {
        let error = Config::from_json("{").unwrap_err();

        assert_eq!(config_error_hint(&error), None);
    }

    #[test]
    fn empty_config_suggests_init() {
        let report = Config::default().validate();

        assert_eq!(validation_hint(&report), Some(INIT_HINT));
    }

    #[test]
    fn incomplete_notification_has_no_hint() {
        let config = Config::from_json(
            r#"{"baseurl":"https://h","authid":"a","secret":"s","datastore":"d","backupdir":"/x","smtp":{}}"#,
        )
        .unwrap();

        let report = config.validate();

        assert!(!report.is_valid());
        assert_eq!(validation_hint(&report), None);
    }
}
