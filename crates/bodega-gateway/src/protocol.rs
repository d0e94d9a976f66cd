//! # Inventory Backend Protocol
//!
//! Requests the terminals send and the envelopes the backend answers with.
//!
//! ## Protocol Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Inventory Backend Calls                            │
//! │                                                                         │
//! │  CONSOLIDATED (use_consolidated_api = true)                            │
//! │  ──────────────────────────────────────────                            │
//! │  POST /inventory  { resource: "box",    action: "get",   params }      │
//! │  POST /inventory  { resource: "pallet", action: "close", params }      │
//! │  POST /inventory  { resource: "cart",   action: "move",  params }      │
//! │  POST /admin      { resource: "issue",  action: "create", params }     │
//! │                                                                         │
//! │  LEGACY (one path per action, params as the body)                      │
//! │  ─────────────────────────────────────────────────                     │
//! │  POST /getInfoFromScannedCode  /processScan  /registerBox              │
//! │  POST /createPallet  /closePallet  /movePallet  /getActivePallets      │
//! │  POST /moveCart  /postIssue                                            │
//! │                                                                         │
//! │  RESPONSES (either shape, decoded once at the boundary)                │
//! │  ──────────────────────────────────────────────────────                │
//! │  { success, data, error, message }                                     │
//! │  { status: success|fail|error, message, data, meta }                   │
//! │                  │                                                      │
//! │                  ▼                                                      │
//! │  GatewayResponse::Success { data, message }                            │
//! │  GatewayResponse::Failure { kind, message }                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! Requests are tagged JSON using serde's adjacently tagged enum when logged
//! or queued:
//! ```json
//! { "type": "ClosePallet", "payload": { "codigo": "31224107101005" } }
//! ```
//! What goes over HTTP is the [`Route`] body, not this tagged form.

use bodega_core::{ApiCodeKind, CodeKind, UiCodeKind};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::error::{GatewayError, GatewayResult};
use crate::location::InventoryLocation;

/// Page size for active pallet listings when the caller gives none.
pub const DEFAULT_PAGE_LIMIT: u32 = 50;

// =============================================================================
// Requests
// =============================================================================

/// Every call the terminals make to the inventory backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum GatewayRequest {
    /// Look up a scanned box or pallet.
    GetCode { codigo: String, kind: CodeKind },

    /// Move a box or pallet to another location.
    MoveItem {
        codigo: String,
        kind: CodeKind,
        ubicacion: InventoryLocation,
    },

    /// Register a box, standard or custom.
    CreateBox(CreateBoxParams),

    /// Open a new pallet from its 11-digit base code.
    CreatePallet {
        codigo: String,
        max_boxes: Option<i64>,
    },

    /// Close an open pallet.
    ClosePallet { codigo: String },

    /// Move a cart to another location.
    MoveCart {
        codigo: String,
        ubicacion: InventoryLocation,
        user_id: Option<String>,
    },

    /// Page through the open pallets at a location.
    ListActivePallets {
        ubicacion: InventoryLocation,
        limit: u32,
        last_key: Option<String>,
    },

    /// File an issue report from the terminal.
    ReportIssue { descripcion: String },
}

/// Box registration parameters, as the backend names them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBoxParams {
    pub codigo: String,
    pub ubicacion: InventoryLocation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calibre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formato: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub empresa: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operario: Option<String>,
    /// JSON text of `[[code, eggs], ...]`; present only for custom boxes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_info: Option<String>,
}

/// Where a request goes and what it carries.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub path: &'static str,
    pub body: Value,
}

impl GatewayRequest {
    /// Returns the request type name (for logging).
    pub fn type_name(&self) -> &'static str {
        match self {
            GatewayRequest::GetCode { .. } => "GetCode",
            GatewayRequest::MoveItem { .. } => "MoveItem",
            GatewayRequest::CreateBox(_) => "CreateBox",
            GatewayRequest::CreatePallet { .. } => "CreatePallet",
            GatewayRequest::ClosePallet { .. } => "ClosePallet",
            GatewayRequest::MoveCart { .. } => "MoveCart",
            GatewayRequest::ListActivePallets { .. } => "ListActivePallets",
            GatewayRequest::ReportIssue { .. } => "ReportIssue",
        }
    }

    /// Resolves the endpoint and body for either API generation.
    ///
    /// ```rust
    /// use bodega_gateway::protocol::GatewayRequest;
    ///
    /// let close = GatewayRequest::ClosePallet { codigo: "31224107101005".into() };
    ///
    /// let route = close.route(true);
    /// assert_eq!(route.path, "/inventory");
    /// assert_eq!(route.body["action"], "close");
    ///
    /// let route = close.route(false);
    /// assert_eq!(route.path, "/closePallet");
    /// assert_eq!(route.body["codigo"], "31224107101005");
    /// ```
    pub fn route(&self, consolidated: bool) -> Route {
        let (endpoint, resource, action, legacy_path) = self.target();
        let params = self.params();

        if consolidated {
            Route {
                path: endpoint,
                body: json!({
                    "resource": resource,
                    "action": action,
                    "params": params,
                }),
            }
        } else {
            Route {
                path: legacy_path,
                body: params,
            }
        }
    }

    /// (consolidated endpoint, resource, action, legacy path)
    fn target(&self) -> (&'static str, &'static str, &'static str, &'static str) {
        match self {
            GatewayRequest::GetCode { kind, .. } => {
                ("/inventory", resource_of(*kind), "get", "/getInfoFromScannedCode")
            }
            GatewayRequest::MoveItem { kind, .. } => {
                let legacy = match kind {
                    CodeKind::Box => "/processScan",
                    CodeKind::Pallet => "/movePallet",
                };
                ("/inventory", resource_of(*kind), "move", legacy)
            }
            GatewayRequest::CreateBox(_) => ("/inventory", "box", "create", "/registerBox"),
            GatewayRequest::CreatePallet { .. } => {
                ("/inventory", "pallet", "create", "/createPallet")
            }
            GatewayRequest::ClosePallet { .. } => ("/inventory", "pallet", "close", "/closePallet"),
            GatewayRequest::MoveCart { .. } => ("/inventory", "cart", "move", "/moveCart"),
            GatewayRequest::ListActivePallets { .. } => {
                ("/inventory", "pallet", "get", "/getActivePallets")
            }
            GatewayRequest::ReportIssue { .. } => ("/admin", "issue", "create", "/postIssue"),
        }
    }

    /// Action parameters with the backend's field names.
    fn params(&self) -> Value {
        match self {
            GatewayRequest::GetCode { codigo, .. } => json!({ "codigo": codigo }),
            GatewayRequest::MoveItem {
                codigo,
                kind,
                ubicacion,
            } => json!({
                "codigo": codigo,
                "ubicacion": ubicacion,
                "tipo": ApiCodeKind::from(*kind),
            }),
            GatewayRequest::CreateBox(params) => {
                serde_json::to_value(params).unwrap_or_else(|_| json!({ "codigo": params.codigo }))
            }
            GatewayRequest::CreatePallet { codigo, max_boxes } => {
                let mut params = json!({ "codigo": codigo });
                if let Some(max) = max_boxes {
                    params["maxBoxes"] = json!(max);
                }
                params
            }
            GatewayRequest::ClosePallet { codigo } => json!({ "codigo": codigo }),
            GatewayRequest::MoveCart {
                codigo,
                ubicacion,
                user_id,
            } => {
                let mut params = json!({ "codigo": codigo, "ubicacion": ubicacion });
                if let Some(user) = user_id {
                    params["userId"] = json!(user);
                }
                params
            }
            GatewayRequest::ListActivePallets {
                ubicacion,
                limit,
                last_key,
            } => json!({
                "estado": "open",
                "ubicacion": ubicacion,
                "pagination": { "limit": limit, "lastKey": last_key },
            }),
            GatewayRequest::ReportIssue { descripcion } => json!({ "descripcion": descripcion }),
        }
    }

    /// Serializes to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

fn resource_of(kind: CodeKind) -> &'static str {
    match kind {
        CodeKind::Box => "box",
        CodeKind::Pallet => "pallet",
    }
}

// =============================================================================
// Wire Envelopes
// =============================================================================

/// Status of the consolidated envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    /// The request was understood and refused.
    Fail,
    /// The backend broke.
    Error,
}

/// Request bookkeeping attached by the consolidated backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `{ status, message, data, meta }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardEnvelope {
    pub status: ResponseStatus,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    pub meta: ResponseMeta,
}

/// `{ success, data, error, message }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyEnvelope {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// A backend answer in whichever shape it arrived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireEnvelope {
    Standard(StandardEnvelope),
    Legacy(LegacyEnvelope),
}

/// How a call failed on the backend side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureKind {
    Fail,
    Error,
}

/// A decoded backend answer.
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayResponse<T> {
    Success {
        data: Option<T>,
        message: Option<String>,
    },
    Failure {
        kind: FailureKind,
        message: String,
    },
}

const UNKNOWN_FAILURE: &str = "Error desconocido del servidor";

impl WireEnvelope {
    /// Legacy success envelope.
    pub fn success(data: Option<Value>, message: impl Into<String>) -> Self {
        WireEnvelope::Legacy(LegacyEnvelope {
            success: true,
            data,
            error: None,
            message: Some(message.into()),
        })
    }

    /// Legacy failure envelope.
    pub fn failure(error: impl Into<String>) -> Self {
        WireEnvelope::Legacy(LegacyEnvelope {
            success: false,
            data: None,
            error: Some(error.into()),
            message: None,
        })
    }

    /// Parses a response body in either shape.
    pub fn from_json(json: &str) -> GatewayResult<Self> {
        serde_json::from_str(json).map_err(|e| GatewayError::InvalidResponse(e.to_string()))
    }

    /// Whether the backend reported success.
    pub fn is_success(&self) -> bool {
        match self {
            WireEnvelope::Standard(env) => env.status == ResponseStatus::Success,
            WireEnvelope::Legacy(env) => env.success,
        }
    }

    /// Decodes the envelope, typing its data as `T`.
    ///
    /// A `null` data field counts as absent.
    pub fn into_response<T: DeserializeOwned>(self) -> GatewayResult<GatewayResponse<T>> {
        let (status, data, message) = match self {
            WireEnvelope::Standard(env) => (env.status, env.data, Some(env.message)),
            WireEnvelope::Legacy(env) => {
                let status = if env.success {
                    ResponseStatus::Success
                } else {
                    ResponseStatus::Fail
                };
                let message = if env.success {
                    env.message
                } else {
                    env.error.or(env.message)
                };
                (status, env.data, message)
            }
        };

        let kind = match status {
            ResponseStatus::Success => {
                let data = match data {
                    None | Some(Value::Null) => None,
                    Some(value) => Some(serde_json::from_value(value)?),
                };
                return Ok(GatewayResponse::Success { data, message });
            }
            ResponseStatus::Fail => FailureKind::Fail,
            ResponseStatus::Error => FailureKind::Error,
        };

        Ok(GatewayResponse::Failure {
            kind,
            message: message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN_FAILURE.to_string()),
        })
    }
}

impl<T> GatewayResponse<T> {
    /// Demands data: empty success becomes `NoData` with `fallback` as the
    /// message when the backend gave none, failure becomes `Rejected`.
    pub fn require_data(self, fallback: &str) -> GatewayResult<T> {
        self.require_data_with_message(fallback).map(|(data, _)| data)
    }

    /// [`require_data`](Self::require_data), keeping the backend message.
    pub fn require_data_with_message(self, fallback: &str) -> GatewayResult<(T, Option<String>)> {
        match self {
            GatewayResponse::Success {
                data: Some(data),
                message,
            } => Ok((data, message)),
            GatewayResponse::Success { data: None, .. } => {
                Err(GatewayError::NoData(fallback.to_string()))
            }
            GatewayResponse::Failure { message, .. } => Err(GatewayError::Rejected { message }),
        }
    }

    /// Accepts success with or without data, returning the backend message.
    pub fn require_success(self) -> GatewayResult<Option<String>> {
        match self {
            GatewayResponse::Success { message, .. } => Ok(message),
            GatewayResponse::Failure { message, .. } => Err(GatewayError::Rejected { message }),
        }
    }
}

// =============================================================================
// Response Payloads
// =============================================================================

/// Product attached to a scanned code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductInfo {
    pub id: String,
    pub nombre: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
}

/// Physical position of a scanned item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSlot {
    pub almacen: String,
    pub zona: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posicion: Option<String>,
}

/// What the backend knows about a scanned code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScannedCodeInfo {
    pub codigo: String,
    pub pk_tipo: ApiCodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tipo: Option<UiCodeKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub producto: Option<ProductInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ubicacion: Option<StorageSlot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estado: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contador: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operario: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub empacadora: Option<String>,
    #[serde(default, rename = "formato_caja", skip_serializing_if = "Option::is_none")]
    pub formato_caja: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// Confirmation of a box, pallet or cart move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveReceipt {
    pub codigo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tipo: Option<ApiCodeKind>,
    pub ubicacion: InventoryLocation,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Confirmation of a box registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterBoxResult {
    pub id: String,
    pub codigo: String,
    pub mensaje: String,
    pub fecha_registro: DateTime<Utc>,
    pub estado: String,
}

/// Open/closed transition of a pallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PalletStatusChange {
    pub codigo: String,
    pub estado_anterior: String,
    pub estado_nuevo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mensaje: Option<String>,
    pub fecha_actualizacion: DateTime<Utc>,
}

/// A pallet as listed by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PalletSummary {
    pub codigo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estado: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ubicacion: Option<InventoryLocation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cantidad_cajas: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_boxes: Option<i64>,
}

/// One page of open pallets.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivePalletsPage {
    #[serde(default)]
    pub items: Vec<PalletSummary>,
    /// Pass back as `last_key` for the next page; `None` on the last page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_key: Option<String>,
}

/// Confirmation of an issue report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueReceipt {
    pub id: String,
    pub mensaje: String,
    pub fecha_reporte: DateTime<Utc>,
    pub estado: String,
}
