//! Wallet configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::WalletError;

/// Published list of sponsor delegates.
pub const DEFAULT_SPONSORS_URL: &str =
    "https://gist.githubusercontent.com/fix/a7b1d797be38b0591e725a24e6735996/raw/sponsors.json";

/// Configuration for the wallet.
///
/// Can be loaded from a TOML file via [`WalletConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletConfig {
    /// Base URL of the peer's HTTP API.
    #[serde(default = "default_peer_url")]
    pub peer_url: String,

    /// Directory holding the LMDB cache.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Upper bound on a whole peer request, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Where the sponsor delegate list is published.
    #[serde(default = "default_sponsors_url")]
    pub sponsors_url: String,

    /// LMDB map size in megabytes.
    #[serde(default = "default_map_size_mb")]
    pub map_size_mb: usize,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_peer_url() -> String {
    "http://127.0.0.1:4001".to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./dpos_wallet_data")
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_sponsors_url() -> String {
    DEFAULT_SPONSORS_URL.to_string()
}

fn default_map_size_mb() -> usize {
    64
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "human".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl WalletConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &str) -> Result<Self, WalletError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| WalletError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, WalletError> {
        toml::from_str(s).map_err(|e| WalletError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, WalletError> {
        toml::to_string_pretty(self).map_err(|e| WalletError::Config(e.to_string()))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn map_size_bytes(&self) -> usize {
        self.map_size_mb.saturating_mul(1024 * 1024)
    }
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            peer_url: default_peer_url(),
            data_dir: default_data_dir(),
            request_timeout_secs: default_request_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            sponsors_url: default_sponsors_url(),
            map_size_mb: default_map_size_mb(),
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = WalletConfig::default();
        let toml_str = config.to_toml_string().expect("should serialize");
        let parsed = WalletConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed, config);
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let config = WalletConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.connect_timeout(), Duration::from_secs(10));
        assert_eq!(config.log_format, "human");
        assert_eq!(config.sponsors_url, DEFAULT_SPONSORS_URL);
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            peer_url = "https://node.example:4001"
            request_timeout_secs = 5
        "#;
        let config = WalletConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.peer_url, "https://node.example:4001");
        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(config.log_level, "info"); // default
    }

    #[test]
    fn map_size_is_in_megabytes() {
        let config = WalletConfig {
            map_size_mb: 2,
            ..WalletConfig::default()
        };
        assert_eq!(config.map_size_bytes(), 2 * 1024 * 1024);
    }

    #[test]
    fn missing_file_returns_config_error() {
        let result = WalletConfig::from_toml_file("/nonexistent/dpos-wallet.toml");
        assert!(matches!(result, Err(WalletError::Config(_))));
    }
}
