//! # Gateway Configuration
//!
//! Configuration management for the inventory gateway.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     BODEGA_USE_MOCKS=true                                              │
//! │     BODEGA_API_BASE_URL=https://api.example.com/prod                   │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/bodegascan/gateway.toml (Linux)                          │
//! │     ~/Library/Application Support/com.bodega.scan/gateway.toml (macOS) │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     consolidated API, PACKING as default location                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # gateway.toml
//! use_mocks = false
//! use_consolidated_api = true
//! base_url = "https://api.example.com/prod"
//! mock_latency_ms = 1000
//! default_location = "PACKING"
//! ```
//!
//! The configuration is loaded once at the edge and handed to
//! [`ScanService`](crate::service::ScanService); nothing below it reads the
//! environment.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::error::{GatewayError, GatewayResult};
use crate::location::InventoryLocation;

// =============================================================================
// Environment Keys
// =============================================================================

pub const ENV_USE_MOCKS: &str = "BODEGA_USE_MOCKS";
pub const ENV_USE_CONSOLIDATED_API: &str = "BODEGA_USE_CONSOLIDATED_API";
pub const ENV_API_BASE_URL: &str = "BODEGA_API_BASE_URL";
pub const ENV_MOCK_LATENCY_MS: &str = "BODEGA_MOCK_LATENCY_MS";
pub const ENV_DEFAULT_LOCATION: &str = "BODEGA_DEFAULT_LOCATION";

// =============================================================================
// Gateway Configuration
// =============================================================================

/// Complete gateway configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Answer every call from the in-memory backend.
    #[serde(default)]
    pub use_mocks: bool,

    /// Route calls to `/inventory` and `/admin` instead of one path per action.
    #[serde(default = "default_true")]
    pub use_consolidated_api: bool,

    /// Backend base URL (http:// or https://). Required unless `use_mocks`.
    #[serde(default)]
    pub base_url: Option<String>,

    /// Simulated round trip of the in-memory backend.
    #[serde(default = "default_mock_latency")]
    pub mock_latency_ms: u64,

    /// Where new boxes land when the operator does not pick a location.
    #[serde(default)]
    pub default_location: InventoryLocation,
}

fn default_true() -> bool {
    true
}

fn default_mock_latency() -> u64 {
    1000
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            use_mocks: false,
            use_consolidated_api: default_true(),
            base_url: None,
            mock_latency_ms: default_mock_latency(),
            default_location: InventoryLocation::default(),
        }
    }
}

impl GatewayConfig {
    /// Config for the in-memory backend with no simulated latency.
    pub fn mocked() -> Self {
        Self {
            use_mocks: true,
            mock_latency_ms: 0,
            ..Self::default()
        }
    }

    /// Loads configuration from file, process environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (gateway.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> GatewayResult<Self> {
        Self::load_with(config_path, |key| std::env::var(key).ok())
    }

    /// [`load`](Self::load) with an injected environment lookup.
    pub fn load_with<F>(config_path: Option<PathBuf>, lookup: F) -> GatewayResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading gateway config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(lookup);
        config.validate()?;

        Ok(config)
    }

    /// Loads config, falling back to the in-memory backend if that fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load gateway config: {}. Using in-memory backend.", e);
            Self {
                use_mocks: true,
                ..Self::default()
            }
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> GatewayResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| GatewayError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| GatewayError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| GatewayError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Gateway config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> GatewayResult<()> {
        if self.use_mocks {
            return Ok(());
        }

        match self.base_url.as_deref() {
            None => Err(GatewayError::InvalidConfig(
                "base_url is required unless use_mocks is set".into(),
            )),
            Some(url) if !url.starts_with("http://") && !url.starts_with("https://") => {
                Err(GatewayError::InvalidUrl(format!(
                    "API base URL must start with http:// or https://, got: {}",
                    url
                )))
            }
            Some(_) => Ok(()),
        }
    }

    /// Applies overrides from `lookup`, keyed by the `BODEGA_*` names.
    ///
    /// Unparseable values are logged and ignored.
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_USE_MOCKS) {
            match parse_flag(&value) {
                Some(flag) => {
                    debug!(use_mocks = flag, "Overriding mock mode from environment");
                    self.use_mocks = flag;
                }
                None => warn!(value = %value, "Unknown {} value in environment", ENV_USE_MOCKS),
            }
        }

        if let Some(value) = lookup(ENV_USE_CONSOLIDATED_API) {
            match parse_flag(&value) {
                Some(flag) => self.use_consolidated_api = flag,
                None => warn!(
                    value = %value,
                    "Unknown {} value in environment", ENV_USE_CONSOLIDATED_API
                ),
            }
        }

        if let Some(url) = lookup(ENV_API_BASE_URL) {
            debug!(url = %url, "Overriding API base URL from environment");
            self.base_url = Some(url);
        }

        if let Some(latency) = lookup(ENV_MOCK_LATENCY_MS) {
            if let Ok(ms) = latency.trim().parse::<u64>() {
                self.mock_latency_ms = ms;
            }
        }

        if let Some(location) = lookup(ENV_DEFAULT_LOCATION) {
            match location.parse() {
                Ok(parsed) => {
                    debug!(location = %location, "Overriding default location from environment");
                    self.default_location = parsed;
                }
                Err(_) => warn!(location = %location, "Unknown default location in environment"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "bodega", "scan")
            .map(|dirs| dirs.config_dir().join("gateway.toml"))
    }

    /// Returns the base URL if configured.
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
