//! # bodega-gateway: Inventory Backend Contracts
//!
//! The layer between the scanning screens and the inventory backend: what
//! each operation validates, what it sends, and how answers are read back.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bodega Scan Architecture                         │
//! │                                                                         │
//! │  Scanning UI                                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │               ★ bodega-gateway (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   service ──► protocol ──► gateway (trait)                     │   │
//! │  │      │                        ├── mock (in-memory backend)     │   │
//! │  │      │                        └── HTTP transport (external)    │   │
//! │  │      ▼                                                          │   │
//! │  │   config, location, error                                      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │                                ▼                                        │
//! │                 bodega-core (classify, decode, validate)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`service`] - The scan operations ([`ScanService`])
//! - [`protocol`] - Requests, routes for both API generations, envelopes
//! - [`gateway`] - The [`InventoryGateway`] seam
//! - [`mock`] - In-memory backend for development terminals
//! - [`config`] - `gateway.toml` plus `BODEGA_*` overrides
//! - [`location`] - Inventory locations
//! - [`error`] - [`GatewayError`] and the codes the UI switches on
//!
//! ## Example Usage
//!
//! ```rust
//! use bodega_gateway::{GatewayConfig, OfflineGateway, ScanService};
//!
//! let rt = tokio::runtime::Runtime::new().unwrap();
//! rt.block_on(async {
//!     let service = ScanService::new(GatewayConfig::mocked(), OfflineGateway).unwrap();
//!
//!     let pallet = service.create_pallet("31224107101", Some(60)).await.unwrap();
//!     assert_eq!(pallet.codigo, "31224107101001");
//!
//!     let err = service.close_pallet("1234567890123456").await.unwrap_err();
//!     assert_eq!(err.to_string(), "El código debe ser de un pallet (14 dígitos)");
//! });
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod gateway;
pub mod location;
pub mod mock;
pub mod protocol;
pub mod service;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use config::GatewayConfig;
pub use error::{ApiError, ErrorCode, GatewayError, GatewayResult};
pub use gateway::{InventoryGateway, OfflineGateway};
pub use location::InventoryLocation;
pub use mock::MockGateway;
pub use protocol::{GatewayRequest, GatewayResponse, WireEnvelope};
pub use service::{ProcessScanRequest, ScanService};

use tracing_subscriber::EnvFilter;

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=bodega_gateway=trace` - Show trace for this crate only
/// - Default: INFO, with DEBUG for bodega crates
///
/// Does nothing if a subscriber is already installed.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,bodega_core=debug,bodega_gateway=debug"));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_tracing_twice() {
        init_tracing();
        init_tracing();
    }

    fn temp_path() -> std::path::PathBuf {
        std::env::temp_dir()
            .join(format!("bodega-gateway-{}", uuid::Uuid::new_v4()))
            .join("gateway.toml")
    }

    #[tokio::test]
    async fn test_service_from_loaded_config() {
        let path = temp_path();
        GatewayConfig {
            use_mocks: true,
            ..GatewayConfig::default()
        }
        .save(Some(path.clone()))
        .unwrap();

        let config = GatewayConfig::load_with(Some(path.clone()), |key| match key {
            config::ENV_MOCK_LATENCY_MS => Some("0".into()),
            _ => None,
        })
        .unwrap();
        assert!(config.use_mocks);
        assert_eq!(config.mock_latency_ms, 0);

        if let Some(dir) = path.parent() {
            let _ = std::fs::remove_dir_all(dir);
        }

        let service = ScanService::new(config, OfflineGateway).unwrap();
        let err = service.lookup_code("1234567890123456").await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::Rejected);
    }
}
