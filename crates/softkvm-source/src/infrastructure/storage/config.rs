//! TOML-based configuration for the source application.
//!
//! Example file:
//!
//! ```toml
//! [connection]
//! sink_host = "192.168.0.105"
//! sink_port = 5001
//! connect_timeout_secs = 5
//! retry_interval_secs = 2
//!
//! [switch]
//! toggle_local = "f1"
//! toggle_remote = "f2"
//! ```
//!
//! Every field has a default, so a partial file (or no file at all) works.
//! Toggle keys are parsed through the shared [`SpecialKey`] name table, so
//! the config accepts exactly the names that travel on the wire.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use softkvm_core::SpecialKey;
use thiserror::Error;

use crate::application::forward_input::ToggleKeys;
use crate::infrastructure::network::SenderConfig;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The resolved sink address is not a valid socket address.
    #[error("invalid sink address {addr:?}: {source}")]
    InvalidAddress {
        addr: String,
        #[source]
        source: std::net::AddrParseError,
    },
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level source configuration.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct SourceConfig {
    #[serde(default)]
    pub connection: ConnectionSettings,
    #[serde(default)]
    pub switch: SwitchSettings,
}

/// Where and how to reach the sink.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ConnectionSettings {
    /// IP address of the sink machine.
    #[serde(default = "default_sink_host")]
    pub sink_host: String,
    /// TCP port the sink listens on.
    #[serde(default = "default_sink_port")]
    pub sink_port: u16,
    /// Upper bound on a single connect attempt, in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Sleep between failed connect attempts, in seconds.
    #[serde(default = "default_retry_interval_secs")]
    pub retry_interval_secs: u64,
}

/// Hotkey assignment for the local/remote switch.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SwitchSettings {
    /// Key that forces local mode.
    #[serde(default = "default_toggle_local")]
    pub toggle_local: SpecialKey,
    /// Key that forces remote mode.
    #[serde(default = "default_toggle_remote")]
    pub toggle_remote: SpecialKey,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_sink_host() -> String {
    "127.0.0.1".to_string()
}
fn default_sink_port() -> u16 {
    5001
}
fn default_connect_timeout_secs() -> u64 {
    5
}
fn default_retry_interval_secs() -> u64 {
    2
}
fn default_toggle_local() -> SpecialKey {
    SpecialKey::F1
}
fn default_toggle_remote() -> SpecialKey {
    SpecialKey::F2
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            sink_host: default_sink_host(),
            sink_port: default_sink_port(),
            connect_timeout_secs: default_connect_timeout_secs(),
            retry_interval_secs: default_retry_interval_secs(),
        }
    }
}

impl Default for SwitchSettings {
    fn default() -> Self {
        Self {
            toggle_local: default_toggle_local(),
            toggle_remote: default_toggle_remote(),
        }
    }
}

// ── Loading and conversion ────────────────────────────────────────────────────

/// Loads the config from `path`, returning `SourceConfig::default()` if the
/// file does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not
/// found" and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config(path: &Path) -> Result<SourceConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(SourceConfig::default()),
        Err(e) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

impl SourceConfig {
    /// Builds the [`SenderConfig`] for the connection manager.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidAddress`] when host and port do not
    /// form a valid socket address. This is a startup-time error: it aborts
    /// before any loop begins.
    pub fn sender_config(&self) -> Result<SenderConfig, ConfigError> {
        let addr = format!("{}:{}", self.connection.sink_host, self.connection.sink_port);
        let sink_addr = addr.parse().map_err(|source| ConfigError::InvalidAddress {
            addr: addr.clone(),
            source,
        })?;
        Ok(SenderConfig {
            sink_addr,
            connect_timeout: Duration::from_secs(self.connection.connect_timeout_secs),
            retry_interval: Duration::from_secs(self.connection.retry_interval_secs),
            ..SenderConfig::default()
        })
    }

    /// Builds the [`ToggleKeys`] for the switch state machine.
    pub fn toggle_keys(&self) -> ToggleKeys {
        ToggleKeys {
            to_local: self.switch.toggle_local,
            to_remote: self.switch.toggle_remote,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_legacy_constants() {
        // Arrange / Act
        let cfg = SourceConfig::default();

        // Assert
        assert_eq!(cfg.connection.sink_host, "127.0.0.1");
        assert_eq!(cfg.connection.sink_port, 5001);
        assert_eq!(cfg.connection.connect_timeout_secs, 5);
        assert_eq!(cfg.connection.retry_interval_secs, 2);
        assert_eq!(cfg.switch.toggle_local, SpecialKey::F1);
        assert_eq!(cfg.switch.toggle_remote, SpecialKey::F2);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let cfg: SourceConfig = toml::from_str("").expect("empty config must parse");

        assert_eq!(cfg, SourceConfig::default());
    }

    #[test]
    fn test_partial_toml_overrides_only_named_fields() {
        // Arrange
        let toml_str = r#"
[connection]
sink_host = "10.0.0.9"

[switch]
toggle_remote = "scroll_lock"
"#;

        // Act
        let cfg: SourceConfig = toml::from_str(toml_str).expect("parse");

        // Assert
        assert_eq!(cfg.connection.sink_host, "10.0.0.9");
        assert_eq!(cfg.connection.sink_port, 5001);
        assert_eq!(cfg.switch.toggle_local, SpecialKey::F1);
        assert_eq!(cfg.switch.toggle_remote, SpecialKey::ScrollLock);
    }

    #[test]
    fn test_unknown_toggle_key_name_is_a_parse_error() {
        let toml_str = r#"
[switch]
toggle_local = "turbo"
"#;

        let result: Result<SourceConfig, _> = toml::from_str(toml_str);

        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_returns_defaults_when_file_absent() {
        // Arrange – a path that cannot exist
        let path = Path::new("/nonexistent/softkvm/config.toml");

        // Act
        let cfg = load_config(path).expect("missing file must fall back to defaults");

        // Assert
        assert_eq!(cfg, SourceConfig::default());
    }

    #[test]
    fn test_sender_config_resolves_valid_address() {
        // Arrange
        let mut cfg = SourceConfig::default();
        cfg.connection.sink_host = "192.168.1.20".to_string();
        cfg.connection.sink_port = 6000;
        cfg.connection.retry_interval_secs = 7;

        // Act
        let sender = cfg.sender_config().expect("valid address");

        // Assert
        assert_eq!(sender.sink_addr, "192.168.1.20:6000".parse().unwrap());
        assert_eq!(sender.retry_interval, Duration::from_secs(7));
    }

    #[test]
    fn test_sender_config_rejects_invalid_address_at_startup() {
        // Arrange
        let mut cfg = SourceConfig::default();
        cfg.connection.sink_host = "not an address".to_string();

        // Act
        let result = cfg.sender_config();

        // Assert
        assert!(matches!(result, Err(ConfigError::InvalidAddress { .. })));
    }

    #[test]
    fn test_toggle_keys_conversion() {
        let toml_str = r#"
[switch]
toggle_local = "f11"
toggle_remote = "f12"
"#;
        let cfg: SourceConfig = toml::from_str(toml_str).expect("parse");

        let toggles = cfg.toggle_keys();

        assert_eq!(toggles.to_local, SpecialKey::F11);
        assert_eq!(toggles.to_remote, SpecialKey::F12);
    }
}
