//! JSON configuration file loading.

use std::path::{Path, PathBuf};

use serde_json::Value;

use super::ConfigError;
use super::model::Config;

impl Config {
    /// Loads configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let path = expand_tilde(path);
        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::FileRead {
            path: path.clone(),
            source: e,
        })?;

        Self::from_json(&content)
    }

    /// Parses configuration from a JSON string.
    ///
    /// Keys are matched case-insensitively, so `"BaseURL"` fills `baseurl`.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not a JSON object of the expected shape.
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let mut value: Value = serde_json::from_str(content)?;
        fold_keys(&mut value);
        serde_json::from_value(value).map_err(ConfigError::from)
    }
}

/// Produces the starting configuration before overrides.
///
/// With no path (or an empty one) this is the zero-valued [`Config`].
///
/// # Errors
///
/// Returns [`ConfigError::FileRead`] or [`ConfigError::Parse`] when a path is
/// given but cannot be loaded.
pub fn load_source(path: Option<&Path>) -> Result<Config, ConfigError> {
    match path {
        Some(path) if !path.as_os_str().is_empty() => {
            tracing::debug!("Loading config file: {}", path.display());
            Config::load(path)
        }
        _ => Ok(Config::default()),
    }
}

/// Lowercases every object key, recursively.
///
/// All field names of the file format are lowercase.
fn fold_keys(value: &mut Value) {
    match value {
        Value::Object(map) => {
            *map = std::mem::take(map)
                .into_iter()
                .map(|(key, mut value)| {
                    fold_keys(&mut value);
                    (key.to_lowercase(), value)
                })
                .collect();
        }
        Value::Array(items) => items.iter_mut().for_each(fold_keys),
        _ => {}
    }
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a leading `~` component, or systems without a known home
/// directory, are returned unchanged.
fn expand_tilde(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };

    dirs::home_dir().map_or_else(|| path.to_path_buf(), |home| home.join(rest))
}
