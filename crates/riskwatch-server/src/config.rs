//! Configuration loading for the risk event API.
//!
//! Configuration lives in `riskwatch.yaml` (or the path in
//! `RISKWATCH_CONFIG`). Every field is optional; a missing file means
//! defaults. Environment variables override the file:
//!
//! - `RISKWATCH_HOST` overrides `server.host`
//! - `RISKWATCH_PORT` overrides `server.port`
//! - `RISKWATCH_SEED_FILE` overrides `seed_file`

use std::path::{Path, PathBuf};

use riskwatch_api::ServerConfig;
use serde::Deserialize;

/// Default configuration file name, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "riskwatch.yaml";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// An environment override had an unusable value.
    #[error("invalid {name}: {message}")]
    Env {
        /// The environment variable name.
        name: &'static str,
        /// Why the value was rejected.
        message: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level server settings, mirroring `riskwatch.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Listen address.
    #[serde(default)]
    pub server: HttpConfig,

    /// Optional JSON file of risk events to seed the store with. The
    /// built-in seed is used when absent.
    #[serde(default)]
    pub seed_file: Option<PathBuf>,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP listen address.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HttpConfig {
    /// Host to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl From<&HttpConfig> for ServerConfig {
    fn from(http: &HttpConfig) -> Self {
        Self {
            host: http.host.clone(),
            port: http.port,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

impl Settings {
    /// Load settings from `RISKWATCH_CONFIG` (or [`DEFAULT_CONFIG_PATH`])
    /// and apply environment overrides.
    ///
    /// A missing file is not an error; defaults are used.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file exists but cannot be read or
    /// parsed, or an override is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("RISKWATCH_CONFIG")
            .map_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);

        let mut settings = if path.exists() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };
        settings.apply_overrides(|name| std::env::var(name).ok())?;
        Ok(settings)
    }

    /// Load settings from a YAML file, without environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse settings from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Apply overrides from a variable lookup (normally the process
    /// environment).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Env`] if `RISKWATCH_PORT` is not a port.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(host) = lookup("RISKWATCH_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("RISKWATCH_PORT") {
            self.server.port = port.parse().map_err(|e| ConfigError::Env {
                name: "RISKWATCH_PORT",
                message: format!("{port:?}: {e}"),
            })?;
        }
        if let Some(seed_file) = lookup("RISKWATCH_SEED_FILE") {
            self.seed_file = Some(PathBuf::from(seed_file));
        }
        Ok(())
    }
}

fn default_host() -> String {
    String::from("0.0.0.0")
}

const fn default_port() -> u16 {
    8000
}

fn default_log_level() -> String {
    String::from("info")
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: BTreeMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |name| map.get(name).cloned()
    }

    fn parse(yaml: &str) -> Settings {
        let result = Settings::parse(yaml);
        assert!(result.is_ok(), "{result:?}");
        result.unwrap_or_default()
    }

    #[test]
    fn empty_yaml_gives_defaults() {
        let settings = parse("");
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.server.port, 8000);
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.logging.level, "info");
        assert_eq!(settings.logging.format, LogFormat::Pretty);
        assert!(settings.seed_file.is_none());
    }

    #[test]
    fn parses_full_yaml() {
        let yaml = r"
server:
  host: 127.0.0.1
  port: 9100
seed_file: data/events.json
logging:
  level: debug
  format: json
";
        let settings = parse(yaml);
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.server.port, 9100);
        assert_eq!(settings.seed_file, Some(PathBuf::from("data/events.json")));
        assert_eq!(settings.logging.level, "debug");
        assert_eq!(settings.logging.format, LogFormat::Json);
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let settings = parse("server:\n  port: 9000\n");
        assert_eq!(settings.server.port, 9000);
        assert_eq!(settings.server.host, "0.0.0.0");
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        assert!(matches!(
            Settings::parse("server: [unclosed"),
            Err(ConfigError::Yaml { .. })
        ));
    }

    #[test]
    fn env_overrides_file_values() {
        let mut settings = Settings::default();
        let result = settings.apply_overrides(env(&[
            ("RISKWATCH_HOST", "127.0.0.1"),
            ("RISKWATCH_PORT", "8081"),
            ("RISKWATCH_SEED_FILE", "seed.json"),
        ]));
        assert!(result.is_ok());
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.server.port, 8081);
        assert_eq!(settings.seed_file, Some(PathBuf::from("seed.json")));
    }

    #[test]
    fn bad_port_override_is_rejected() {
        let mut settings = Settings::default();
        let result = settings.apply_overrides(env(&[("RISKWATCH_PORT", "eighty")]));
        assert!(matches!(
            result,
            Err(ConfigError::Env {
                name: "RISKWATCH_PORT",
                ..
            })
        ));
        assert_eq!(settings.server.port, 8000);
    }

    #[test]
    fn converts_to_server_config() {
        let config = ServerConfig::from(&HttpConfig::default());
        assert_eq!(config, ServerConfig::default());
    }
}
