//! Configuration loading.
//!
//! Configuration is loaded from TOML files with the following resolution order:
//! 1. Explicit path (library caller or CLI flag)
//! 2. `~/.platter/config.toml` (user)
//! 3. `/etc/platter/config.toml` (system)
//!
//! The Discogs token may live in the config file or in the
//! `DISCOGS_TOKEN` environment variable; the file wins when both are
//! set. A missing token is not a load error — the gateway degrades to
//! serving empty values.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::rank::RankingWeights;
use crate::{GatewayError, Result};

/// Environment variable consulted when the config carries no token.
pub const TOKEN_ENV_VAR: &str = "DISCOGS_TOKEN";

/// Gateway configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub discogs: DiscogsConfig,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    #[serde(default)]
    pub cache: CacheTtlConfig,
    #[serde(default)]
    pub ranking: RankingWeights,
}

/// Upstream API configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DiscogsConfig {
    /// Personal access token. Optional; see [`Config::token`].
    #[serde(default)]
    pub token: Option<String>,
    /// API base URL (default: https://api.discogs.com).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// HTTP request timeout in seconds (default: 60).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for DiscogsConfig {
    fn default() -> Self {
        Self {
            token: None,
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    crate::client::DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    60
}

/// Outbound rate limit.
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    /// Requests admitted per window (default: 55).
    #[serde(default = "default_quota")]
    pub quota: usize,
    /// Rolling window length in seconds (default: 60).
    #[serde(default = "default_window")]
    pub window_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            quota: default_quota(),
            window_secs: default_window(),
        }
    }
}

fn default_quota() -> usize {
    55
}

fn default_window() -> u64 {
    60
}

/// Per-endpoint cache TTLs.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheTtlConfig {
    /// Release/master detail TTL in seconds (default: 86400).
    #[serde(default = "default_details_ttl")]
    pub details_ttl_secs: u64,
    /// Artist-name TTL in seconds (default: 86400).
    #[serde(default = "default_details_ttl")]
    pub artists_ttl_secs: u64,
    /// Search result TTL in seconds (default: 600).
    #[serde(default = "default_search_ttl")]
    pub search_ttl_secs: u64,
    /// Barcode lookup TTL in seconds (default: 60).
    #[serde(default = "default_barcode_ttl")]
    pub barcode_ttl_secs: u64,
    /// Maximum entries per cache (default: 10,000).
    #[serde(default = "default_max_entries")]
    pub max_entries: u64,
}

impl Default for CacheTtlConfig {
    fn default() -> Self {
        Self {
            details_ttl_secs: default_details_ttl(),
            artists_ttl_secs: default_details_ttl(),
            search_ttl_secs: default_search_ttl(),
            barcode_ttl_secs: default_barcode_ttl(),
            max_entries: default_max_entries(),
        }
    }
}

fn default_details_ttl() -> u64 {
    24 * 60 * 60
}

fn default_search_ttl() -> u64 {
    10 * 60
}

fn default_barcode_ttl() -> u64 {
    60
}

fn default_max_entries() -> u64 {
    10_000
}

impl Config {
    /// Load configuration from the standard locations.
    ///
    /// Resolution order:
    /// 1. Explicit path (if provided)
    /// 2. `~/.platter/config.toml`
    /// 3. `/etc/platter/config.toml`
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let path = Self::resolve_config_path(explicit_path)?;
        let content = fs::read_to_string(&path).map_err(|e| {
            GatewayError::Configuration(format!("Failed to read config file {path:?}: {e}"))
        })?;
        toml::from_str(&content).map_err(|e| {
            GatewayError::Configuration(format!("Failed to parse config file {path:?}: {e}"))
        })
    }

    /// The Discogs token, falling back to the `DISCOGS_TOKEN`
    /// environment variable.
    pub fn token(&self) -> Option<String> {
        self.discogs
            .token
            .clone()
            .or_else(|| std::env::var(TOKEN_ENV_VAR).ok())
    }

    /// Resolve the config file path.
    fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = explicit {
            if path.exists() {
                return Ok(path.to_path_buf());
            }
            return Err(GatewayError::Configuration(format!(
                "Config file not found: {path:?}"
            )));
        }

        // User config
        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".platter").join("config.toml");
            if user_config.exists() {
                return Ok(user_config);
            }
        }

        // System config
        let system_config = PathBuf::from("/etc/platter/config.toml");
        if system_config.exists() {
            return Ok(system_config);
        }

        Err(GatewayError::Configuration(
            "No config file found. Create ~/.platter/config.toml or /etc/platter/config.toml"
                .to_string(),
        ))
    }
}
