//! # Gateway Trait
//!
//! The seam between the scan service and whatever actually reaches the
//! inventory backend.
//!
//! ```text
//!   ScanService ──► InventoryGateway::call(request, route)
//!                        │
//!                        ├── MockGateway      in-memory, for development
//!                        ├── OfflineGateway   refuses every call
//!                        └── (HTTP transport) POST base_url + route.path
//! ```
//!
//! Implementations return the raw [`WireEnvelope`]; decoding and the
//! NO_DATA / REJECTED mapping stay in the service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{GatewayError, GatewayResult};
use crate::protocol::{GatewayRequest, Route, WireEnvelope};

/// Something that can carry a request to the inventory backend.
///
/// `route` is the resolved endpoint and body for the configured API
/// generation; transports send it, in-process backends may match on the
/// typed `request` instead.
#[async_trait]
pub trait InventoryGateway: Send + Sync {
    async fn call(&self, request: &GatewayRequest, route: &Route) -> GatewayResult<WireEnvelope>;
}

#[async_trait]
impl<G: InventoryGateway + ?Sized> InventoryGateway for Arc<G> {
    async fn call(&self, request: &GatewayRequest, route: &Route) -> GatewayResult<WireEnvelope> {
        (**self).call(request, route).await
    }
}

/// A gateway with no transport behind it.
///
/// Stands in for the remote side when the service runs on the mock backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineGateway;

#[async_trait]
impl InventoryGateway for OfflineGateway {
    async fn call(&self, request: &GatewayRequest, route: &Route) -> GatewayResult<WireEnvelope> {
        Err(GatewayError::RequestFailed(format!(
            "no transport configured for {} ({})",
            request.type_name(),
            route.path
        )))
    }
}
