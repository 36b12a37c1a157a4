//! Server configuration.
//!
//! Layered lowest to highest: built-in defaults, TOML file, environment
//! (`TICTACTOE_HOST`, `TICTACTOE_PORT`, `TICTACTOE_SEED`, `TICTACTOE_LOG_DIR`,
//! `RUST_LOG`), then command-line flags.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Default `EnvFilter` directive for the server.
pub const DEFAULT_LOG_FILTER: &str = "info,tictactoe_server=debug,tictactoe_core=info";

/// Configuration for the HTTP game server.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind.
    #[serde(default = "default_host")]
    host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    port: u16,

    /// Tracing filter directive.
    #[serde(default = "default_log_filter")]
    log_filter: String,

    /// Directory for the daily log files.
    #[serde(default = "default_log_dir")]
    log_dir: PathBuf,

    /// Fixed seed for the opponent, for reproducible sessions.
    #[serde(default)]
    seed: Option<u64>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("logs")
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_filter: default_log_filter(),
            log_dir: default_log_dir(),
            seed: None,
        }
    }
}

impl ServerConfig {
    /// Loads configuration from a TOML file. Missing keys fall back to defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(host = %config.host, port = config.port, "Config loaded successfully");
        Ok(config)
    }

    /// Applies overrides from the process environment.
    pub fn apply_env(self) -> Result<Self, ConfigError> {
        self.apply_env_with(|key| std::env::var(key).ok())
    }

    /// Applies overrides from an arbitrary variable lookup.
    #[instrument(skip(self, lookup))]
    pub fn apply_env_with(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(host) = lookup("TICTACTOE_HOST") {
            debug!(%host, "Host from environment");
            self.host = host;
        }
        if let Some(port) = lookup("TICTACTOE_PORT") {
            self.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::new(format!("Invalid TICTACTOE_PORT: {:?}", port)))?;
            debug!(port = self.port, "Port from environment");
        }
        if let Some(seed) = lookup("TICTACTOE_SEED") {
            let seed = seed
                .trim()
                .parse()
                .map_err(|_| ConfigError::new(format!("Invalid TICTACTOE_SEED: {:?}", seed)))?;
            self.seed = Some(seed);
        }
        if let Some(dir) = lookup("TICTACTOE_LOG_DIR") {
            self.log_dir = PathBuf::from(dir);
        }
        if let Some(filter) = lookup("RUST_LOG") {
            self.log_filter = filter;
        }
        Ok(self)
    }

    /// Applies command-line overrides.
    pub fn with_overrides(mut self, host: Option<String>, port: Option<u16>) -> Self {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        self
    }

    /// Returns `host:port` for binding.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.host(), "127.0.0.1");
        assert_eq!(*config.port(), 5000);
        assert_eq!(config.log_filter(), DEFAULT_LOG_FILTER);
        assert_eq!(*config.seed(), None);
        assert_eq!(config.log_dir(), Path::new("logs"));
        assert_eq!(config.bind_address(), "127.0.0.1:5000");
    }

    #[test]
    fn test_from_file_partial() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "port = 8080\nseed = 7").unwrap();

        let config = ServerConfig::from_file(file.path()).unwrap();
        assert_eq!(*config.port(), 8080);
        assert_eq!(*config.seed(), Some(7));
        assert_eq!(config.host(), "127.0.0.1");
    }

    #[test]
    fn test_from_file_log_dir() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "log_dir = \"/var/log/tictactoe\"").unwrap();

        let config = ServerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.log_dir(), Path::new("/var/log/tictactoe"));

        let config = config
            .apply_env_with(env(&[("TICTACTOE_LOG_DIR", "elsewhere")]))
            .unwrap();
        assert_eq!(config.log_dir(), Path::new("elsewhere"));
    }

    #[test]
    fn test_from_file_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "port = \"not a number\"").unwrap();

        let err = ServerConfig::from_file(file.path()).unwrap_err();
        assert!(err.message.starts_with("Failed to parse config"));
    }

    #[test]
    fn test_from_missing_file() {
        let err = ServerConfig::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(err.message.starts_with("Failed to read config file"));
        assert!(err.file.ends_with("config.rs"));
    }

    #[test]
    fn test_env_overrides_file() {
        let config = ServerConfig::default()
            .apply_env_with(env(&[
                ("TICTACTOE_HOST", "0.0.0.0"),
                ("TICTACTOE_PORT", "9000"),
                ("RUST_LOG", "warn"),
            ]))
            .unwrap();
        assert_eq!(config.bind_address(), "0.0.0.0:9000");
        assert_eq!(config.log_filter(), "warn");
    }

    #[test]
    fn test_env_rejects_bad_port() {
        let result = ServerConfig::default().apply_env_with(env(&[("TICTACTOE_PORT", "http")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_overrides_env() {
        let config = ServerConfig::default()
            .apply_env_with(env(&[("TICTACTOE_PORT", "9000")]))
            .unwrap()
            .with_overrides(None, Some(7000));
        assert_eq!(*config.port(), 7000);
        assert_eq!(config.host(), "127.0.0.1");
    }
}
