//! Configuration management for the linequery service.
//!
//! This module handles loading configuration from TOML files and
//! environment variables, with sensible defaults for all settings
//! except the reference file path, which must be provided.

use crate::core::error::{LineQueryError, Result};
use crate::core::xdg::XdgDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub security: SecurityConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
}

/// Listener configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Hostname or IP address to bind
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Search configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Path to the reference file holding the searchable lines
    #[serde(default)]
    pub file_path: PathBuf,

    /// Read the file fresh for every query instead of caching it
    #[serde(default)]
    pub reread_on_query: bool,
}

/// PSK authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SecurityConfig {
    /// Require queries to carry the PSK prefix
    #[serde(default)]
    pub psk_auth: bool,

    /// Pre-shared key value (required when psk_auth is enabled)
    #[serde(default)]
    pub psk: String,
}

/// Limits configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LimitsConfig {
    /// Maximum accepted query line length in bytes
    #[serde(default = "default_max_line_bytes")]
    pub max_line_bytes: usize,

    /// Maximum concurrent connections (0 = unlimited)
    #[serde(default)]
    pub max_connections: usize,
}

// Default value functions
fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    44445
}

fn default_max_line_bytes() -> usize {
    1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_line_bytes: default_max_line_bytes(),
            max_connections: 0,
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| LineQueryError::Config(format!("Failed to read config file: {e}")))?;

        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load config with priority: env vars > TOML > defaults
    ///
    /// This method uses XDG Base Directory specification for file
    /// locations.
    pub fn load() -> Result<Self> {
        let xdg = XdgDirs::new();
        Self::load_with_xdg(&xdg)
    }

    /// Load config with explicit XDG directories
    ///
    /// Priority order:
    /// 1. LINEQUERY_CONFIG env var
    /// 2. XDG config file (~/.config/linequery/config.toml)
    /// 3. ./linequery.toml in the working directory
    /// 4. Defaults
    pub fn load_with_xdg(xdg: &XdgDirs) -> Result<Self> {
        let mut config = if let Ok(config_path) = env::var("LINEQUERY_CONFIG") {
            Self::from_file(config_path)?
        } else {
            let xdg_config = xdg.config_file();
            if xdg_config.exists() {
                Self::from_file(xdg_config)?
            } else if Path::new("linequery.toml").exists() {
                Self::from_file("linequery.toml")?
            } else {
                Self::default()
            }
        };

        // Override with environment variables
        config.merge_env();

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Merge configuration with environment variables
    pub fn merge_env(&mut self) {
        // Server configuration
        if let Ok(host) = env::var("LINEQUERY_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = env::var("LINEQUERY_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }

        // Search configuration
        if let Ok(file_path) = env::var("LINEQUERY_FILE_PATH") {
            self.search.file_path = PathBuf::from(file_path);
        }
        if let Ok(reread) = env::var("LINEQUERY_REREAD_ON_QUERY") {
            if let Ok(r) = reread.parse() {
                self.search.reread_on_query = r;
            }
        }

        // Security configuration
        if let Ok(psk_auth) = env::var("LINEQUERY_PSK_AUTH") {
            if let Ok(a) = psk_auth.parse() {
                self.security.psk_auth = a;
            }
        }
        if let Ok(psk) = env::var("LINEQUERY_PSK") {
            self.security.psk = psk;
        }

        // Limits configuration
        if let Ok(max_line) = env::var("LINEQUERY_MAX_LINE_BYTES") {
            if let Ok(n) = max_line.parse() {
                self.limits.max_line_bytes = n;
            }
        }
        if let Ok(max_conns) = env::var("LINEQUERY_MAX_CONNECTIONS") {
            if let Ok(n) = max_conns.parse() {
                self.limits.max_connections = n;
            }
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.search.file_path.as_os_str().is_empty() {
            return Err(LineQueryError::Config("File path is empty".to_string()));
        }

        if self.server.port == 0 {
            return Err(LineQueryError::Config("Port must be non-zero".to_string()));
        }

        if self.security.psk_auth && self.security.psk.is_empty() {
            return Err(LineQueryError::Config(
                "PSK authentication is enabled, but the PSK is empty".to_string(),
            ));
        }

        if self.limits.max_line_bytes == 0 {
            return Err(LineQueryError::Config(
                "Max line bytes must be non-zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Log configuration (redacting the PSK)
    pub fn log_config(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}:{}", self.server.host, self.server.port);
        tracing::info!("  Reference file: {}", self.search.file_path.display());
        tracing::info!(
            "  Reread on query {}",
            if self.search.reread_on_query {
                "enabled"
            } else {
                "disabled"
            }
        );
        tracing::info!(
            "  PSK authentication {}",
            if self.security.psk_auth {
                "enabled"
            } else {
                "disabled"
            }
        );
        tracing::info!("  Max line bytes: {}", self.limits.max_line_bytes);
        if self.limits.max_connections == 0 {
            tracing::info!("  Max connections: unlimited");
        } else {
            tracing::info!("  Max connections: {}", self.limits.max_connections);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn valid_config() -> Config {
        let mut config = Config::default();
        config.search.file_path = PathBuf::from("/data/reference.txt");
        config
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 44445);
        assert!(!config.search.reread_on_query);
        assert!(!config.security.psk_auth);
        assert_eq!(config.limits.max_line_bytes, 1024);
        assert_eq!(config.limits.max_connections, 0);
    }

    #[test]
    fn test_config_validation_valid() {
        let config = valid_config();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_empty_file_path() {
        let config = Config::default();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_zero_port() {
        let mut config = valid_config();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_psk_auth_without_psk() {
        let mut config = valid_config();
        config.security.psk_auth = true;
        assert!(config.validate().is_err());

        config.security.psk = "secret-".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_zero_max_line_bytes() {
        let mut config = valid_config();
        config.limits.max_line_bytes = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn test_env_var_override() {
        env::set_var("LINEQUERY_PORT", "9999");
        env::set_var("LINEQUERY_REREAD_ON_QUERY", "true");

        let mut config = Config::default();
        config.merge_env();

        assert_eq!(config.server.port, 9999);
        assert!(config.search.reread_on_query);

        // Cleanup
        env::remove_var("LINEQUERY_PORT");
        env::remove_var("LINEQUERY_REREAD_ON_QUERY");
    }

    #[test]
    #[serial]
    fn test_env_var_psk_override() {
        env::set_var("LINEQUERY_PSK_AUTH", "true");
        env::set_var("LINEQUERY_PSK", "hunter2");

        let mut config = Config::default();
        config.merge_env();

        assert!(config.security.psk_auth);
        assert_eq!(config.security.psk, "hunter2");

        env::remove_var("LINEQUERY_PSK_AUTH");
        env::remove_var("LINEQUERY_PSK");
    }

    #[test]
    fn test_toml_deserialization() {
        let toml = r#"
            [server]
            host = "0.0.0.0"
            port = 8000

            [search]
            file_path = "/data/200k.txt"
            reread_on_query = true

            [security]
            psk_auth = true
            psk = "1Aa@"

            [limits]
            max_line_bytes = 2048
            max_connections = 64
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.search.file_path, PathBuf::from("/data/200k.txt"));
        assert!(config.search.reread_on_query);
        assert!(config.security.psk_auth);
        assert_eq!(config.security.psk, "1Aa@");
        assert_eq!(config.limits.max_line_bytes, 2048);
        assert_eq!(config.limits.max_connections, 64);
    }

    #[test]
    fn test_toml_partial_sections_use_defaults() {
        let toml = r#"
            [search]
            file_path = "/data/reference.txt"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 44445);
        assert!(!config.security.psk_auth);
        assert_eq!(config.limits.max_line_bytes, 1024);
        assert!(config.validate().is_ok());
    }
}
