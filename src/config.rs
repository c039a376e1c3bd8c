/// Configuration module for countdown defaults
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::format::DEFAULT_TEMPLATE;

pub const DEFAULT_INTERVAL: &str = "1s";

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Redraw interval as a duration token, e.g. `"0.5"` or `"2s"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<String>,
    /// Progress line template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl Config {
    pub fn interval(&self) -> &str {
        self.interval.as_deref().unwrap_or(DEFAULT_INTERVAL)
    }

    pub fn template(&self) -> &str {
        self.format.as_deref().unwrap_or(DEFAULT_TEMPLATE)
    }
}

pub fn config_path() -> PathBuf {
    if let Some(home) = env::var_os("HOME") {
        PathBuf::from(home)
            .join(".config")
            .join("sleepy")
            .join("config.json")
    } else {
        PathBuf::from("sleepy-config.json")
    }
}

/// Load the config at `path`, falling back to defaults when the file is
/// missing, unreadable or malformed.
pub fn load_config(path: &Path) -> Config {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!("No config file at {}, using defaults", path.display());
            return Config::default();
        }
        Err(err) => {
            warn!("Could not read config file {}: {err}, using defaults", path.display());
            return Config::default();
        }
    };

    serde_json::from_str(&content).unwrap_or_else(|err| {
        warn!("Invalid config format in {}: {err}, using defaults", path.display());
        Config::default()
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("absent.json"));
        assert_eq!(config, Config::default());
        assert_eq!(config.interval(), "1s");
        assert_eq!(config.template(), DEFAULT_TEMPLATE);
    }

    #[test]
    fn reads_interval_and_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "interval": "0.5", "format": "{remaining}" }"#).unwrap();

        let config = load_config(&path);
        assert_eq!(config.interval(), "0.5");
        assert_eq!(config.template(), "{remaining}");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "interval": "2s" }"#).unwrap();

        let config = load_config(&path);
        assert_eq!(config.interval(), "2s");
        assert_eq!(config.template(), DEFAULT_TEMPLATE);
    }

    #[test]
    fn malformed_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ interval: ").unwrap();
        assert_eq!(load_config(&path), Config::default());

        fs::write(&path, r#"{ "hooks": {} }"#).unwrap();
        assert_eq!(load_config(&path), Config::default());
    }

    #[test]
    fn serializes_only_set_fields() {
        let config = Config {
            interval: Some("3s".to_string()),
            format: None,
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"interval":"3s"}"#);
    }
}
