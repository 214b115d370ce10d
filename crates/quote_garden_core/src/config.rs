//! Environment-driven configuration for native hosts.
//!
//! | variable | meaning | default |
//! |---|---|---|
//! | `QUOTE_GARDEN_STORE_PATH` | SQLite store file | `<temp>/quote_garden_store.sqlite3` |
//! | `QUOTE_GARDEN_LOG_LEVEL` | log level | build-mode default |
//! | `QUOTE_GARDEN_LOG_DIR` | absolute log directory | logging disabled |

use crate::logging::{default_log_level, normalize_level};
use log::warn;
use std::path::PathBuf;

pub const STORE_PATH_ENV: &str = "QUOTE_GARDEN_STORE_PATH";
pub const LOG_LEVEL_ENV: &str = "QUOTE_GARDEN_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "QUOTE_GARDEN_LOG_DIR";

const DEFAULT_STORE_FILE_NAME: &str = "quote_garden_store.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub store_path: PathBuf,
    pub log_level: &'static str,
    pub log_dir: Option<String>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            store_path: std::env::temp_dir().join(DEFAULT_STORE_FILE_NAME),
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

impl CoreConfig {
    /// Reads the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from any variable lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let mut config = Self::default();

        if let Some(path) = read(STORE_PATH_ENV) {
            config.store_path = PathBuf::from(path);
        }
        if let Some(level) = read(LOG_LEVEL_ENV) {
            match normalize_level(&level) {
                Ok(level) => config.log_level = level,
                Err(err) => warn!("event=config_load module=config status=invalid error={err}"),
            }
        }
        config.log_dir = read(LOG_DIR_ENV);

        config
    }
}

#[cfg(test)]
mod tests {
    use super::{CoreConfig, LOG_DIR_ENV, LOG_LEVEL_ENV, STORE_PATH_ENV};
    use crate::logging::default_log_level;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn config_from(pairs: &[(&str, &str)]) -> CoreConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        CoreConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            (STORE_PATH_ENV, "/data/garden.sqlite3"),
            (LOG_LEVEL_ENV, "Warning"),
            (LOG_DIR_ENV, " /var/log/garden "),
        ]);
        assert_eq!(config.store_path, PathBuf::from("/data/garden.sqlite3"));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir.as_deref(), Some("/var/log/garden"));
    }

    #[test]
    fn blank_and_invalid_values_keep_defaults() {
        let config = config_from(&[(STORE_PATH_ENV, "  "), (LOG_LEVEL_ENV, "loud")]);
        assert_eq!(config, CoreConfig::default());
        assert_eq!(config.log_level, default_log_level());
    }
}
