//! # Mock Inventory Backend
//!
//! An in-memory backend for development terminals and tests. It answers in
//! the legacy `{ success, data, error, message }` shape, like the backend
//! the terminals were first written against.
//!
//! ## State
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  MockState (behind a tokio Mutex)                                       │
//! │                                                                         │
//! │  boxes    code ──► location, product                                    │
//! │  pallets  code ──► location, open/closed, max boxes   (ordered by code) │
//! │  carts    code ──► location                                             │
//! │  counters base code ──► last pallet counter handed out                  │
//! │  issues   received reports                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use async_trait::async_trait;
use bodega_core::{ApiCodeKind, CodeKind, UiCodeKind};
use chrono::Utc;
use serde::Serialize;
use serde_json::json;
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use crate::config::GatewayConfig;
use crate::error::GatewayResult;
use crate::gateway::InventoryGateway;
use crate::location::InventoryLocation;
use crate::protocol::{
    ActivePalletsPage, CreateBoxParams, GatewayRequest, IssueReceipt, PalletSummary, ProductInfo,
    Route, ScannedCodeInfo, StorageSlot, WireEnvelope,
};

/// Highest counter a pallet base code can take (three digits).
const MAX_PALLET_COUNTER: u16 = 999;

const WAREHOUSE_NAME: &str = "Almacén Principal";

#[derive(Debug, Clone)]
struct MockBox {
    location: InventoryLocation,
    product: Option<String>,
    custom_info: Option<String>,
}

#[derive(Debug, Clone)]
struct MockPallet {
    location: InventoryLocation,
    open: bool,
    max_boxes: Option<i64>,
}

#[derive(Debug, Default)]
struct MockState {
    boxes: HashMap<String, MockBox>,
    pallets: BTreeMap<String, MockPallet>,
    carts: HashMap<String, InventoryLocation>,
    counters: HashMap<String, u16>,
    issues: Vec<IssueReceipt>,
}

/// In-memory [`InventoryGateway`].
#[derive(Debug, Default)]
pub struct MockGateway {
    state: Mutex<MockState>,
    latency: Duration,
}

impl MockGateway {
    pub fn new(latency: Duration) -> Self {
        Self {
            state: Mutex::new(MockState::default()),
            latency,
        }
    }

    pub fn from_config(config: &GatewayConfig) -> Self {
        Self::new(Duration::from_millis(config.mock_latency_ms))
    }

    // =========================================================================
    // Seeding & Inspection
    // =========================================================================

    /// Adds a box as if it had been registered earlier.
    pub async fn seed_box(&self, codigo: &str, location: InventoryLocation) {
        self.state.lock().await.boxes.insert(
            codigo.to_string(),
            MockBox {
                location,
                product: None,
                custom_info: None,
            },
        );
    }

    /// Adds a pallet as if it had been created earlier.
    pub async fn seed_pallet(&self, codigo: &str, location: InventoryLocation, open: bool) {
        self.state.lock().await.pallets.insert(
            codigo.to_string(),
            MockPallet {
                location,
                open,
                max_boxes: None,
            },
        );
    }

    /// Current location of a box, pallet or cart.
    pub async fn location_of(&self, codigo: &str) -> Option<InventoryLocation> {
        let state = self.state.lock().await;
        state
            .boxes
            .get(codigo)
            .map(|b| b.location)
            .or_else(|| state.pallets.get(codigo).map(|p| p.location))
            .or_else(|| state.carts.get(codigo).copied())
    }

    /// Whether a pallet is open; `None` if unknown.
    pub async fn is_open(&self, codigo: &str) -> Option<bool> {
        self.state.lock().await.pallets.get(codigo).map(|p| p.open)
    }

    /// Custom box lines stored with a box, as sent.
    pub async fn custom_info_of(&self, codigo: &str) -> Option<String> {
        self.state
            .lock()
            .await
            .boxes
            .get(codigo)
            .and_then(|b| b.custom_info.clone())
    }

    pub async fn issue_count(&self) -> usize {
        self.state.lock().await.issues.len()
    }
}

#[async_trait]
impl InventoryGateway for MockGateway {
    async fn call(&self, request: &GatewayRequest, route: &Route) -> GatewayResult<WireEnvelope> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        debug!(
            request = request.type_name(),
            path = route.path,
            "Mock backend handling request"
        );

        let mut state = self.state.lock().await;
        Ok(state.handle(request))
    }
}

// =============================================================================
// Request Handling
// =============================================================================

fn success<T: Serialize>(data: &T, message: &str) -> WireEnvelope {
    WireEnvelope::success(serde_json::to_value(data).ok(), message)
}

impl MockState {
    fn handle(&mut self, request: &GatewayRequest) -> WireEnvelope {
        match request {
            GatewayRequest::GetCode { codigo, kind } => self.get_code(codigo, *kind),
            GatewayRequest::MoveItem {
                codigo,
                kind,
                ubicacion,
            } => self.move_item(codigo, *kind, *ubicacion),
            GatewayRequest::CreateBox(params) => self.create_box(params),
            GatewayRequest::CreatePallet { codigo, max_boxes } => {
                self.create_pallet(codigo, *max_boxes)
            }
            GatewayRequest::ClosePallet { codigo } => self.close_pallet(codigo),
            GatewayRequest::MoveCart {
                codigo, ubicacion, ..
            } => {
                self.carts.insert(codigo.clone(), *ubicacion);
                success(
                    &json!({ "codigo": codigo, "ubicacion": ubicacion }),
                    "Carro movido exitosamente",
                )
            }
            GatewayRequest::ListActivePallets {
                ubicacion,
                limit,
                last_key,
            } => self.list_active(*ubicacion, *limit, last_key.as_deref()),
            GatewayRequest::ReportIssue { .. } => self.report_issue(),
        }
    }

    fn get_code(&self, codigo: &str, kind: CodeKind) -> WireEnvelope {
        let api_kind = ApiCodeKind::from(kind);
        let base = ScannedCodeInfo {
            codigo: codigo.to_string(),
            pk_tipo: api_kind,
            tipo: Some(UiCodeKind::from(api_kind)),
            producto: None,
            ubicacion: None,
            estado: None,
            contador: None,
            operario: None,
            empacadora: None,
            formato_caja: None,
            timestamp: Some(Utc::now().to_rfc3339()),
        };
        let slot = |location: InventoryLocation| StorageSlot {
            almacen: WAREHOUSE_NAME.to_string(),
            zona: location.to_string(),
            posicion: None,
        };
        let digits = |start: usize, end: usize| codigo.get(start..end).map(str::to_string);

        let info = match kind {
            CodeKind::Box => {
                let Some(found) = self.boxes.get(codigo) else {
                    return WireEnvelope::failure(format!("Caja no encontrada: {}", codigo));
                };
                ScannedCodeInfo {
                    producto: found.product.as_ref().map(|nombre| ProductInfo {
                        id: "PROD-001".to_string(),
                        nombre: nombre.clone(),
                        descripcion: None,
                    }),
                    ubicacion: Some(slot(found.location)),
                    estado: Some("activo".to_string()),
                    contador: digits(13, 16),
                    operario: digits(5, 7),
                    empacadora: digits(7, 8),
                    formato_caja: digits(11, 12),
                    ..base
                }
            }
            CodeKind::Pallet => {
                let Some(found) = self.pallets.get(codigo) else {
                    return WireEnvelope::failure(format!("Pallet no encontrado: {}", codigo));
                };
                ScannedCodeInfo {
                    ubicacion: Some(slot(found.location)),
                    estado: Some(pallet_state(found.open).to_string()),
                    contador: digits(11, 14),
                    formato_caja: digits(8, 9),
                    ..base
                }
            }
        };

        success(&info, "Información obtenida exitosamente (modo desarrollo)")
    }

    fn move_item(
        &mut self,
        codigo: &str,
        kind: CodeKind,
        ubicacion: InventoryLocation,
    ) -> WireEnvelope {
        let (location, moved, missing) = match kind {
            CodeKind::Box => (
                self.boxes.get_mut(codigo).map(|b| &mut b.location),
                "Caja movida",
                "Caja no encontrada",
            ),
            CodeKind::Pallet => (
                self.pallets.get_mut(codigo).map(|p| &mut p.location),
                "Pallet movido",
                "Pallet no encontrado",
            ),
        };

        match location {
            Some(location) => {
                *location = ubicacion;
                success(
                    &json!({ "codigo": codigo, "ubicacion": ubicacion }),
                    &format!("{} a {}", moved, ubicacion),
                )
            }
            None => WireEnvelope::failure(format!("{}: {}", missing, codigo)),
        }
    }

    fn create_box(&mut self, params: &CreateBoxParams) -> WireEnvelope {
        if self.boxes.contains_key(&params.codigo) {
            return WireEnvelope::failure(format!("Box already exists: {}", params.codigo));
        }

        self.boxes.insert(
            params.codigo.clone(),
            MockBox {
                location: params.ubicacion,
                product: params.operario.clone(),
                custom_info: params.custom_info.clone(),
            },
        );

        let message = if params.custom_info.is_some() {
            "Caja custom creada exitosamente"
        } else {
            "Caja registrada exitosamente"
        };
        success(&json!({ "codigo": params.codigo }), message)
    }

    fn create_pallet(&mut self, base: &str, max_boxes: Option<i64>) -> WireEnvelope {
        let counter = self.counters.entry(base.to_string()).or_insert(0);
        if *counter >= MAX_PALLET_COUNTER {
            return WireEnvelope::failure(format!(
                "No quedan contadores disponibles para el código base {}",
                base
            ));
        }
        *counter += 1;

        let codigo = format!("{}{:03}", base, counter);
        let location = InventoryLocation::Packing;
        self.pallets.insert(
            codigo.clone(),
            MockPallet {
                location,
                open: true,
                max_boxes,
            },
        );

        let summary = PalletSummary {
            codigo,
            estado: Some(pallet_state(true).to_string()),
            ubicacion: Some(location),
            cantidad_cajas: Some(0),
            max_boxes,
        };
        success(&summary, "Pallet creado exitosamente")
    }

    fn close_pallet(&mut self, codigo: &str) -> WireEnvelope {
        match self.pallets.get_mut(codigo) {
            None => WireEnvelope::failure(format!("Pallet no encontrado: {}", codigo)),
            Some(pallet) if !pallet.open => WireEnvelope::failure("El pallet ya está cerrado"),
            Some(pallet) => {
                pallet.open = false;
                success(
                    &json!({
                        "codigo": codigo,
                        "estadoAnterior": pallet_state(true),
                        "estadoNuevo": pallet_state(false),
                    }),
                    "Pallet cerrado exitosamente",
                )
            }
        }
    }

    fn list_active(
        &self,
        ubicacion: InventoryLocation,
        limit: u32,
        last_key: Option<&str>,
    ) -> WireEnvelope {
        let limit = limit.max(1) as usize;
        let mut matching = self
            .pallets
            .iter()
            .filter(|(codigo, _)| last_key.map_or(true, |key| codigo.as_str() > key))
            .filter(|(_, pallet)| pallet.open && pallet.location == ubicacion)
            .map(|(codigo, pallet)| PalletSummary {
                codigo: codigo.clone(),
                estado: Some(pallet_state(true).to_string()),
                ubicacion: Some(pallet.location),
                cantidad_cajas: None,
                max_boxes: pallet.max_boxes,
            });

        let items: Vec<PalletSummary> = matching.by_ref().take(limit).collect();
        let next_key = if matching.next().is_some() {
            items.last().map(|p| p.codigo.clone())
        } else {
            None
        };

        success(&ActivePalletsPage { items, next_key }, "Pallets obtenidos")
    }

    fn report_issue(&mut self) -> WireEnvelope {
        let receipt = IssueReceipt {
            id: format!("RPT-{}", Uuid::new_v4()),
            mensaje: "Reporte recibido exitosamente (modo desarrollo)".to_string(),
            fecha_reporte: Utc::now(),
            estado: "recibido".to_string(),
        };
        self.issues.push(receipt.clone());
        success(&receipt, "Reporte enviado correctamente")
    }
}

fn pallet_state(open: bool) -> &'static str {
    if open {
        "open"
    } else {
        "closed"
    }
}
