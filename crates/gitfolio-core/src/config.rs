//! Configuration management for gitfolio-core

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings
    pub server: ServerConfig,

    /// GitHub settings
    pub github: GitHubConfig,

    /// Portfolio cache settings
    pub cache: CacheConfig,

    /// Enrichment settings
    pub aggregate: AggregateConfig,
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get default config path
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?;
        Ok(config_dir.join("gitfolio").join("config.toml"))
    }

    /// Load config from default path or create default
    pub fn load_or_default() -> Result<Self> {
        let path = Self::default_path()?;
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Reject values the services cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.cache.ttl_secs == 0 {
            return Err(Error::Config("cache.ttl_secs must be greater than 0".to_string()));
        }
        if self.aggregate.concurrency == 0 {
            return Err(Error::Config(
                "aggregate.concurrency must be greater than 0".to_string(),
            ));
        }
        if self.github.timeout_secs == 0 {
            return Err(Error::Config(
                "github.timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.github.api_url.trim().is_empty() {
            return Err(Error::Config("github.api_url must not be empty".to_string()));
        }
        Ok(())
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address
    pub bind: String,

    /// Directory with frontend assets served at `/`
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080".to_string(),
            static_dir: None,
        }
    }
}

/// GitHub configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// GitHub API token (optional, unauthenticated access is rate limited)
    pub token: Option<String>,

    /// Account whose repositories make up the portfolio
    pub username: String,

    /// API base URL
    pub api_url: String,

    /// User-Agent header sent upstream
    pub user_agent: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl GitHubConfig {
    /// Per-request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            token: None,
            username: String::new(),
            api_url: "https://api.github.com".to_string(),
            user_agent: "gitfolio".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Portfolio cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// How long a portfolio stays valid, in seconds
    pub ttl_secs: u64,
}

impl CacheConfig {
    /// Portfolio time-to-live
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { ttl_secs: 300 }
    }
}

/// Enrichment configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregateConfig {
    /// Number of repositories enriched concurrently
    pub concurrency: usize,
}

impl Default for AggregateConfig {
    fn default() -> Self {
        Self { concurrency: 5 }
    }
}
