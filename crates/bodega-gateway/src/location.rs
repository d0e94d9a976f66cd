//! # Inventory Locations
//!
//! Where a box, pallet or cart can be. The backend stores these as upper
//! case Spanish words; they travel over the wire unchanged.

use bodega_core::ValidationError;
use serde::{Deserialize, Serialize};

/// A known inventory location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InventoryLocation {
    /// Packing line, where boxes are born.
    #[default]
    Packing,
    /// In transit between sites.
    Transito,
    Bodega,
    Preventa,
    Venta,
    Rechazo,
    Cuarentena,
    Sold,
    Unsubscribed,
}

impl InventoryLocation {
    pub const ALL: [InventoryLocation; 9] = [
        InventoryLocation::Packing,
        InventoryLocation::Transito,
        InventoryLocation::Bodega,
        InventoryLocation::Preventa,
        InventoryLocation::Venta,
        InventoryLocation::Rechazo,
        InventoryLocation::Cuarentena,
        InventoryLocation::Sold,
        InventoryLocation::Unsubscribed,
    ];

    /// Default destination of "send to transit" actions.
    pub const TRANSIT: InventoryLocation = InventoryLocation::Transito;

    /// Wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            InventoryLocation::Packing => "PACKING",
            InventoryLocation::Transito => "TRANSITO",
            InventoryLocation::Bodega => "BODEGA",
            InventoryLocation::Preventa => "PREVENTA",
            InventoryLocation::Venta => "VENTA",
            InventoryLocation::Rechazo => "RECHAZO",
            InventoryLocation::Cuarentena => "CUARENTENA",
            InventoryLocation::Sold => "SOLD",
            InventoryLocation::Unsubscribed => "UNSUBSCRIBED",
        }
    }

    /// Destinations the generic scan screen may move things to.
    pub fn is_scan_destination(&self) -> bool {
        matches!(
            self,
            InventoryLocation::Packing
                | InventoryLocation::Bodega
                | InventoryLocation::Venta
                | InventoryLocation::Transito
        )
    }
}

impl std::fmt::Display for InventoryLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for InventoryLocation {
    type Err = ValidationError;

    /// Exact wire names only; "bodega" is not "BODEGA".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InventoryLocation::ALL
            .into_iter()
            .find(|location| location.as_str() == s.trim())
            .ok_or_else(|| ValidationError::InvalidLocation {
                value: s.to_string(),
            })
    }
}
