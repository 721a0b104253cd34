//! Client configuration
//!
//! Connection settings for [`crate::redis::TimeSeriesClient`], loaded from
//! TOML or built in code. Every field has a default, so an empty file is a
//! valid configuration.
//!
//! ```toml
//! url = "redis://:secret@cache.internal:6379/0"
//! connection_timeout_ms = 2000
//! command_timeout_ms = 500
//! tls_enabled = false
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Connection settings for the time-series client
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ClientConfig {
    /// Redis server URL (e.g., "redis://localhost:6379")
    #[serde(default = "default_url")]
    pub url: String,

    /// Timeout for establishing a connection, in milliseconds
    #[serde(default = "default_connection_timeout_ms")]
    pub connection_timeout_ms: u64,

    /// Read/write timeout for blocking commands, in milliseconds
    #[serde(default = "default_command_timeout_ms")]
    pub command_timeout_ms: u64,

    /// Connect over TLS (`rediss://`)
    #[serde(default)]
    pub tls_enabled: bool,
}

fn default_url() -> String { "redis://127.0.0.1:6379".to_string() }
fn default_connection_timeout_ms() -> u64 { 5000 }
fn default_command_timeout_ms() -> u64 { 1000 }

fn saturating_millis(timeout: Duration) -> u64 {
    u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX)
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            connection_timeout_ms: default_connection_timeout_ms(),
            command_timeout_ms: default_command_timeout_ms(),
            tls_enabled: false,
        }
    }
}

impl ClientConfig {
    /// Create a config for the given URL with default timeouts
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Set the connection timeout
    pub fn connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout_ms = saturating_millis(timeout);
        self
    }

    /// Set the command timeout
    pub fn command_timeout(mut self, timeout: Duration) -> Self {
        self.command_timeout_ms = saturating_millis(timeout);
        self
    }

    /// Enable or disable TLS
    ///
    /// Requires the `redis-tls` feature.
    pub fn tls(mut self, enabled: bool) -> Self {
        self.tls_enabled = enabled;
        self
    }

    /// Connection timeout as a `Duration`
    pub fn connection_timeout_duration(&self) -> Duration {
        Duration::from_millis(self.connection_timeout_ms)
    }

    /// Command timeout as a `Duration`
    pub fn command_timeout_duration(&self) -> Duration {
        Duration::from_millis(self.command_timeout_ms)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.url.is_empty() {
            return Err(Error::Configuration("Redis URL cannot be empty".to_string()));
        }
        if self.connection_timeout_ms == 0 {
            return Err(Error::Configuration(
                "Connection timeout must be > 0".to_string(),
            ));
        }
        if self.command_timeout_ms == 0 {
            return Err(Error::Configuration("Command timeout must be > 0".to_string()));
        }

        #[cfg(not(feature = "redis-tls"))]
        if self.tls_enabled {
            return Err(Error::Configuration(
                "TLS is enabled but the 'redis-tls' feature is not compiled".to_string(),
            ));
        }

        if self.tls_enabled && !self.url.starts_with("rediss://") {
            return Err(Error::Configuration(
                "TLS is enabled but URL doesn't use 'rediss://' scheme".to_string(),
            ));
        }
        if !self.tls_enabled && self.url.starts_with("rediss://") {
            return Err(Error::Configuration(
                "URL uses 'rediss://' scheme but TLS is not enabled".to_string(),
            ));
        }

        Ok(())
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| Error::Configuration(format!("Failed to parse config: {}", e)))
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::Configuration(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&contents)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, contents).map_err(|e| {
            Error::Configuration(format!(
                "Failed to write config file {}: {}",
                path.display(),
                e
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.url, "redis://127.0.0.1:6379");
        assert_eq!(config.connection_timeout_duration(), Duration::from_secs(5));
        assert_eq!(config.command_timeout_duration(), Duration::from_secs(1));
        assert!(!config.tls_enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = ClientConfig::with_url("redis://localhost:6380")
            .connection_timeout(Duration::from_secs(10))
            .command_timeout(Duration::from_millis(250));

        assert_eq!(config.url, "redis://localhost:6380");
        assert_eq!(config.connection_timeout_ms, 10_000);
        assert_eq!(config.command_timeout_ms, 250);
    }

    #[test]
    fn test_huge_timeout_saturates() {
        let config = ClientConfig::default()
            .connection_timeout(Duration::MAX)
            .command_timeout(Duration::from_millis(u64::MAX));
        assert_eq!(config.connection_timeout_ms, u64::MAX);
        assert_eq!(config.command_timeout_ms, u64::MAX);
    }

    #[test]
    fn test_config_validation() {
        let config = ClientConfig::with_url("");
        assert!(config.validate().is_err());

        let config = ClientConfig::default().connection_timeout(Duration::ZERO);
        assert!(config.validate().is_err());

        let config = ClientConfig::default().command_timeout(Duration::ZERO);
        assert!(config.validate().is_err());

        // rediss:// without TLS is a mismatch regardless of features
        let config = ClientConfig::with_url("rediss://localhost:6379");
        assert!(config.validate().is_err());
    }

    #[cfg(not(feature = "redis-tls"))]
    #[test]
    fn test_tls_feature_not_enabled() {
        let config = ClientConfig::with_url("rediss://localhost:6379").tls(true);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("redis-tls"));
    }

    #[cfg(feature = "redis-tls")]
    #[test]
    fn test_tls_url_mismatch() {
        let config = ClientConfig::with_url("redis://localhost:6379").tls(true);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("rediss://"));

        let config = ClientConfig::with_url("rediss://localhost:6379").tls(true);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_toml_defaults() {
        let config = ClientConfig::from_toml_str("").unwrap();
        assert_eq!(config, ClientConfig::default());

        let config = ClientConfig::from_toml_str("command_timeout_ms = 50").unwrap();
        assert_eq!(config.command_timeout_ms, 50);
        assert_eq!(config.connection_timeout_ms, 5000);
    }

    #[test]
    fn test_from_toml_invalid() {
        let err = ClientConfig::from_toml_str("connection_timeout_ms = \"soon\"").unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("client.toml");

        let config = ClientConfig::with_url("redis://cache:6379/2").command_timeout(Duration::from_millis(75));
        config.save_to_file(&path).unwrap();

        let loaded = ClientConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_from_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = ClientConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
