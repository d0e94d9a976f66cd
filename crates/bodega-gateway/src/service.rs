//! # Scan Service
//!
//! The operations behind every scanning screen. Each one validates its
//! input with `bodega-core` first and only then talks to the backend.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Screen action                                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate (classify, require_kind, locations, lines, descriptions)     │
//! │       │                                                                 │
//! │       ├── invalid ─────────────────────────────► VALIDATION_ERROR      │
//! │       ▼                 (backend never called)                         │
//! │  GatewayRequest ──► route(consolidated) ──► mock or remote gateway     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  WireEnvelope ──► GatewayResponse<T>                                   │
//! │       │                                                                 │
//! │       ├── failure ─────────────────────────────► REJECTED (backend msg)│
//! │       ├── success, no data ────────────────────► NO_DATA               │
//! │       ▼                                                                 │
//! │  typed result for the screen                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Moves only need the backend to agree: their receipt is built locally, so
//! they never report NO_DATA.

use bodega_core::base_code::validate_pallet_base_code;
use bodega_core::codes::classify_code;
use bodega_core::validation::{
    require_kind, validate_custom_box_lines, validate_issue_description, validate_max_boxes,
    validate_move_code, validate_product_name,
};
use bodega_core::{ApiCodeKind, CodeKind, ValidationError, CART_CODE_LENGTH, PALLET_CODE_LENGTH};
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::GatewayConfig;
use crate::error::{GatewayError, GatewayResult};
use crate::gateway::InventoryGateway;
use crate::location::InventoryLocation;
use crate::mock::MockGateway;
use crate::protocol::{
    ActivePalletsPage, CreateBoxParams, GatewayRequest, GatewayResponse, IssueReceipt,
    MoveReceipt, PalletStatusChange, PalletSummary, RegisterBoxResult, ScannedCodeInfo,
    WireEnvelope, DEFAULT_PAGE_LIMIT,
};

// Defaults sent with a standard box registration.
const DEFAULT_CALIBER: &str = "01";
const DEFAULT_FORMAT: &str = "1";
const DEFAULT_COMPANY: &str = "1";

/// What the generic scan screen submits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessScanRequest {
    pub codigo: String,
    pub ubicacion: String,
    /// Overrides the kind inferred from the code.
    #[serde(default)]
    pub tipo: Option<ApiCodeKind>,
    /// `(code, eggs)` lines; when present the box is created as custom.
    #[serde(default)]
    pub custom_info: Option<Vec<(String, i64)>>,
}

/// Scan operations over a backend gateway.
pub struct ScanService<G> {
    config: GatewayConfig,
    remote: G,
    mock: Option<MockGateway>,
}

impl<G: InventoryGateway> ScanService<G> {
    /// Creates the service, validating `config`.
    ///
    /// With `use_mocks` set every call goes to an in-memory backend and
    /// `remote` is never used.
    pub fn new(config: GatewayConfig, remote: G) -> GatewayResult<Self> {
        config.validate()?;

        let mock = if config.use_mocks {
            info!(
                latency_ms = config.mock_latency_ms,
                "Scan service using in-memory backend"
            );
            Some(MockGateway::from_config(&config))
        } else {
            info!(
                base_url = config.base_url().unwrap_or_default(),
                consolidated = config.use_consolidated_api,
                "Scan service using remote backend"
            );
            None
        };

        Ok(Self {
            config,
            remote,
            mock,
        })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// The in-memory backend, when running on mocks.
    pub fn mock_backend(&self) -> Option<&MockGateway> {
        self.mock.as_ref()
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    async fn dispatch(&self, request: GatewayRequest) -> GatewayResult<WireEnvelope> {
        let route = request.route(self.config.use_consolidated_api);
        debug!(
            request = request.type_name(),
            path = route.path,
            mock = self.mock.is_some(),
            "Dispatching gateway request"
        );

        let result = match &self.mock {
            Some(mock) => mock.call(&request, &route).await,
            None => self.remote.call(&request, &route).await,
        };

        match &result {
            Ok(envelope) if !envelope.is_success() => {
                warn!(request = request.type_name(), "Backend rejected request");
            }
            Err(e) => {
                warn!(request = request.type_name(), error = %e, "Gateway call failed");
            }
            Ok(_) => {}
        }
        result
    }

    /// Dispatches and demands data.
    async fn fetch<T: DeserializeOwned>(
        &self,
        request: GatewayRequest,
        fallback: &str,
    ) -> GatewayResult<(T, Option<String>)> {
        self.dispatch(request)
            .await?
            .into_response::<T>()?
            .require_data_with_message(fallback)
    }

    /// Dispatches a move and builds its receipt.
    async fn send_move(
        &self,
        request: GatewayRequest,
        codigo: String,
        kind: Option<CodeKind>,
        ubicacion: InventoryLocation,
        default_message: &str,
    ) -> GatewayResult<MoveReceipt> {
        let message = self
            .dispatch(request)
            .await?
            .into_response::<Value>()?
            .require_success()?;

        info!(codigo = %codigo, ubicacion = %ubicacion, "Moved");
        Ok(MoveReceipt {
            codigo,
            tipo: kind.map(ApiCodeKind::from),
            ubicacion,
            message: message.unwrap_or_else(|| default_message.to_string()),
            timestamp: Utc::now(),
        })
    }

    /// Parses a location, with `default` for a missing or blank one.
    fn resolve_location(
        location: Option<&str>,
        default: InventoryLocation,
    ) -> GatewayResult<InventoryLocation> {
        match location {
            Some(value) if !value.trim().is_empty() => Ok(value.parse()?),
            _ => Ok(default),
        }
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    /// Looks up a scanned box or pallet.
    pub async fn lookup_code(&self, code: &str) -> GatewayResult<ScannedCodeInfo> {
        let kind = classify_code(Some(code))?;
        let request = GatewayRequest::GetCode {
            codigo: code.trim().to_string(),
            kind,
        };
        let (info, _) = self
            .fetch(request, "No se encontró información para el código")
            .await?;
        Ok(info)
    }

    /// Lists open pallets at `location` (default location when `None`).
    ///
    /// `limit` defaults to 50; pass the previous page's `next_key` as
    /// `last_key` to continue.
    pub async fn active_pallets(
        &self,
        location: Option<&str>,
        limit: Option<u32>,
        last_key: Option<&str>,
    ) -> GatewayResult<ActivePalletsPage> {
        let ubicacion = Self::resolve_location(location, self.config.default_location)?;
        let request = GatewayRequest::ListActivePallets {
            ubicacion,
            limit: limit.filter(|l| *l > 0).unwrap_or(DEFAULT_PAGE_LIMIT),
            last_key: last_key.map(str::to_string),
        };
        let (page, _) = self
            .fetch(request, "No se pudieron obtener los pallets activos")
            .await?;
        Ok(page)
    }

    // =========================================================================
    // Boxes
    // =========================================================================

    /// Moves a scanned box or pallet from the generic scan screen.
    ///
    /// With custom lines the box is created as custom instead; if it already
    /// exists it is moved.
    pub async fn process_scan(&self, request: ProcessScanRequest) -> GatewayResult<MoveReceipt> {
        let classified = classify_code(Some(&request.codigo))?;
        let ubicacion: InventoryLocation = request.ubicacion.parse()?;
        if !ubicacion.is_scan_destination() {
            return Err(ValidationError::InvalidLocation {
                value: request.ubicacion.clone(),
            }
            .into());
        }

        let kind = request.tipo.map(CodeKind::from).unwrap_or(classified);
        let codigo = request.codigo.trim().to_string();

        if let Some(lines) = request.custom_info.filter(|lines| !lines.is_empty()) {
            validate_custom_box_lines(&lines)?;
            let params = CreateBoxParams {
                calibre: codigo.get(9..11).map(str::to_string),
                formato: codigo.get(11..12).map(str::to_string),
                empresa: codigo.get(12..13).map(str::to_string),
                ubicacion,
                operario: None,
                custom_info: Some(serde_json::to_string(&lines)?),
                codigo: codigo.clone(),
            };

            match self
                .dispatch(GatewayRequest::CreateBox(params))
                .await?
                .into_response::<Value>()?
            {
                GatewayResponse::Success { message, .. } => {
                    info!(codigo = %codigo, lines = lines.len(), "Custom box created");
                    return Ok(MoveReceipt {
                        codigo,
                        tipo: Some(ApiCodeKind::Box),
                        ubicacion,
                        message: message
                            .unwrap_or_else(|| "Caja personalizada creada exitosamente".into()),
                        timestamp: Utc::now(),
                    });
                }
                GatewayResponse::Failure { message, .. } if message.contains("already exists") => {
                    debug!(codigo = %codigo, "Custom box exists, moving it instead");
                }
                GatewayResponse::Failure { message, .. } => {
                    return Err(GatewayError::Rejected { message })
                }
            }
        }

        let move_request = GatewayRequest::MoveItem {
            codigo: codigo.clone(),
            kind,
            ubicacion,
        };
        self.send_move(move_request, codigo, Some(kind), ubicacion, "Procesado exitosamente")
            .await
    }

    /// Registers a standard box for `product`.
    pub async fn register_box(
        &self,
        code: &str,
        product: &str,
        location: Option<&str>,
    ) -> GatewayResult<RegisterBoxResult> {
        let codigo = require_kind(code, CodeKind::Box)?;
        let producto = validate_product_name(product)?;
        let ubicacion = Self::resolve_location(location, self.config.default_location)?;

        let params = CreateBoxParams {
            codigo: codigo.clone(),
            ubicacion,
            calibre: Some(DEFAULT_CALIBER.to_string()),
            formato: Some(DEFAULT_FORMAT.to_string()),
            empresa: Some(DEFAULT_COMPANY.to_string()),
            operario: Some(producto),
            custom_info: None,
        };

        let (data, message) = self
            .fetch::<Value>(GatewayRequest::CreateBox(params), "No se pudo registrar la caja")
            .await?;

        info!(codigo = %codigo, ubicacion = %ubicacion, "Box registered");
        Ok(registration(codigo, &data, message, "Caja registrada exitosamente"))
    }

    /// Registers a custom box made of `(code, eggs)` lines.
    pub async fn create_custom_box(
        &self,
        code: &str,
        lines: &[(String, i64)],
        location: Option<&str>,
    ) -> GatewayResult<RegisterBoxResult> {
        let codigo = require_kind(code, CodeKind::Box)?;
        validate_custom_box_lines(lines)?;
        let ubicacion = Self::resolve_location(location, self.config.default_location)?;

        let params = CreateBoxParams {
            codigo: codigo.clone(),
            ubicacion,
            calibre: None,
            formato: None,
            empresa: None,
            operario: None,
            custom_info: Some(serde_json::to_string(lines)?),
        };

        let (data, message) = self
            .fetch::<Value>(
                GatewayRequest::CreateBox(params),
                "No se pudo crear la caja custom",
            )
            .await?;

        info!(codigo = %codigo, lines = lines.len(), "Custom box registered");
        Ok(registration(codigo, &data, message, "Caja custom creada exitosamente"))
    }

    // =========================================================================
    // Pallets
    // =========================================================================

    /// Opens a pallet from an 11-digit base code.
    pub async fn create_pallet(
        &self,
        base_code: &str,
        max_boxes: Option<i64>,
    ) -> GatewayResult<PalletSummary> {
        let codigo = validate_pallet_base_code(base_code)?;
        validate_max_boxes(max_boxes)?;

        let (pallet, _) = self
            .fetch::<PalletSummary>(
                GatewayRequest::CreatePallet { codigo, max_boxes },
                "No se pudo crear el pallet",
            )
            .await?;

        info!(codigo = %pallet.codigo, "Pallet created");
        Ok(pallet)
    }

    /// Closes an open pallet.
    pub async fn close_pallet(&self, code: &str) -> GatewayResult<PalletStatusChange> {
        let codigo = require_kind(code, CodeKind::Pallet)?;

        let (data, message) = self
            .fetch::<Value>(
                GatewayRequest::ClosePallet {
                    codigo: codigo.clone(),
                },
                "No se pudo cambiar el estado del pallet",
            )
            .await?;

        let state = |key: &str, default: &str| {
            data.get(key)
                .and_then(Value::as_str)
                .unwrap_or(default)
                .to_string()
        };

        info!(codigo = %codigo, "Pallet closed");
        Ok(PalletStatusChange {
            estado_anterior: state("estadoAnterior", "open"),
            estado_nuevo: state("estadoNuevo", "closed"),
            codigo,
            mensaje: message,
            fecha_actualizacion: Utc::now(),
        })
    }

    /// Moves a pallet; `None` sends it to transit.
    pub async fn move_pallet(
        &self,
        code: &str,
        location: Option<&str>,
    ) -> GatewayResult<MoveReceipt> {
        let codigo = validate_move_code(code, PALLET_CODE_LENGTH, "pallet")?;
        let ubicacion = Self::resolve_location(location, InventoryLocation::TRANSIT)?;

        let request = GatewayRequest::MoveItem {
            codigo: codigo.clone(),
            kind: CodeKind::Pallet,
            ubicacion,
        };
        self.send_move(
            request,
            codigo,
            Some(CodeKind::Pallet),
            ubicacion,
            "Pallet movido exitosamente",
        )
        .await
    }

    // =========================================================================
    // Carts
    // =========================================================================

    /// Moves a cart; `None` sends it to transit. `user` is passed through.
    pub async fn move_cart(
        &self,
        code: &str,
        location: Option<&str>,
        user: Option<&str>,
    ) -> GatewayResult<MoveReceipt> {
        let codigo = validate_move_code(code, CART_CODE_LENGTH, "carro")?;
        let ubicacion = Self::resolve_location(location, InventoryLocation::TRANSIT)?;

        let request = GatewayRequest::MoveCart {
            codigo: codigo.clone(),
            ubicacion,
            user_id: user.map(str::to_string),
        };
        self.send_move(request, codigo, None, ubicacion, "Carro movido exitosamente")
            .await
    }

    // =========================================================================
    // Issues
    // =========================================================================

    /// Files an issue report.
    pub async fn report_issue(&self, description: &str) -> GatewayResult<IssueReceipt> {
        let descripcion = validate_issue_description(description)?;

        let (receipt, _) = self
            .fetch::<IssueReceipt>(
                GatewayRequest::ReportIssue { descripcion },
                "No se pudo enviar el reporte",
            )
            .await?;

        info!(id = %receipt.id, "Issue reported");
        Ok(receipt)
    }
}

fn registration(
    codigo: String,
    data: &Value,
    message: Option<String>,
    default_message: &str,
) -> RegisterBoxResult {
    let now = Utc::now();
    RegisterBoxResult {
        id: data
            .get("codigo")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("BOX-{}", now.timestamp_millis())),
        codigo,
        mensaje: message.unwrap_or_else(|| default_message.to_string()),
        fecha_registro: now,
        estado: "registrado".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::gateway::OfflineGateway;
    use crate::protocol::Route;
    use async_trait::async_trait;
    use bodega_core::CodeError;
    use std::sync::Mutex;

    /// Remote gateway that answers every call with one canned envelope.
    struct StubGateway {
        reply: WireEnvelope,
        calls: Mutex<Vec<(GatewayRequest, Route)>>,
    }

    impl StubGateway {
        fn replying(reply: WireEnvelope) -> Self {
            Self {
                reply,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<(GatewayRequest, Route)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl InventoryGateway for StubGateway {
        async fn call(
            &self,
            request: &GatewayRequest,
            route: &Route,
        ) -> GatewayResult<WireEnvelope> {
            self.calls
                .lock()
                .unwrap()
                .push((request.clone(), route.clone()));
            Ok(self.reply.clone())
        }
    }

    fn remote_config() -> GatewayConfig {
        GatewayConfig {
            base_url: Some("https://api.example.com".into()),
            ..GatewayConfig::default()
        }
    }

    fn remote(reply: WireEnvelope) -> ScanService<std::sync::Arc<StubGateway>> {
        let stub = std::sync::Arc::new(StubGateway::replying(reply));
        ScanService::new(remote_config(), stub).unwrap()
    }

    fn mocked() -> ScanService<OfflineGateway> {
        ScanService::new(GatewayConfig::mocked(), OfflineGateway).unwrap()
    }

    // -------------------------------------------------------------------------
    // Construction
    // -------------------------------------------------------------------------

    #[test]
    fn test_new_validates_config() {
        let result = ScanService::new(GatewayConfig::default(), OfflineGateway);
        assert!(matches!(result, Err(GatewayError::InvalidConfig(_))));

        assert!(mocked().mock_backend().is_some());
        assert!(remote(WireEnvelope::failure("x")).mock_backend().is_none());
    }

    // -------------------------------------------------------------------------
    // Validation happens before dispatch
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_invalid_input_never_reaches_backend() {
        let stub = std::sync::Arc::new(StubGateway::replying(WireEnvelope::success(None, "ok")));
        let service = ScanService::new(remote_config(), stub.clone()).unwrap();

        let err = service
            .register_box("12345678901234", "Huevos", None)
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidationError);
        assert_eq!(err.to_string(), "El código debe ser de una caja (16 dígitos)");

        let err = service
            .register_box("1234567890123456", "  ", None)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "El producto es obligatorio");

        let err = service.lookup_code("123").await.unwrap_err();
        assert!(matches!(
            err,
            GatewayError::Validation(bodega_core::CoreError::Code(
                CodeError::UnrecognizedLength { length: 3 }
            ))
        ));

        assert!(service.close_pallet("1234567890123456").await.is_err());
        assert!(service.create_pallet("3122410710", None).await.is_err());
        assert!(service.create_pallet("31224107101", Some(0)).await.is_err());
        assert!(service.move_pallet("31224107101005", Some("MARTE")).await.is_err());
        assert!(service.move_cart("123", None, None).await.is_err());
        assert!(service.report_issue("corto").await.is_err());
        assert!(service
            .create_custom_box("1234567890123456", &[], None)
            .await
            .is_err());

        assert!(stub.calls().is_empty());
    }

    #[tokio::test]
    async fn test_process_scan_location_rules() {
        let service = mocked();
        let request = |ubicacion: &str| ProcessScanRequest {
            codigo: "1234567890123456".into(),
            ubicacion: ubicacion.into(),
            tipo: None,
            custom_info: None,
        };

        let err = service.process_scan(request("CUARENTENA")).await.unwrap_err();
        assert_eq!(err.to_string(), "Ubicación inválida");

        let err = service.process_scan(request("bodega")).await.unwrap_err();
        assert!(err.is_validation());
    }

    // -------------------------------------------------------------------------
    // Response mapping
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_success_without_data_is_no_data() {
        let service = remote(WireEnvelope::success(None, "ok"));
        let err = service.lookup_code("1234567890123456").await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::NoData);

        let err = service
            .report_issue("La etiquetadora imprime en blanco")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "No se pudo enviar el reporte");
    }

    #[tokio::test]
    async fn test_backend_failure_is_rejected_with_its_message() {
        let service = remote(WireEnvelope::failure("Pallet no encontrado"));
        let err = service.close_pallet("31224107101005").await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::Rejected);
        assert_eq!(err.to_string(), "Pallet no encontrado");
    }

    #[tokio::test]
    async fn test_moves_do_not_need_data() {
        let service = remote(WireEnvelope::success(None, "Pallet en tránsito"));
        let receipt = service.move_pallet("31224107101005", None).await.unwrap();
        assert_eq!(receipt.ubicacion, InventoryLocation::Transito);
        assert_eq!(receipt.tipo, Some(ApiCodeKind::Pallet));
        assert_eq!(receipt.message, "Pallet en tránsito");
    }

    #[tokio::test]
    async fn test_remote_receives_consolidated_route() {
        let stub = std::sync::Arc::new(StubGateway::replying(WireEnvelope::success(None, "ok")));
        let service = ScanService::new(remote_config(), stub.clone()).unwrap();

        service
            .move_cart(" 1234567890123456 ", Some("BODEGA"), Some("op-7"))
            .await
            .unwrap();

        let calls = stub.calls();
        assert_eq!(calls.len(), 1);
        let (request, route) = &calls[0];
        assert_eq!(request.type_name(), "MoveCart");
        assert_eq!(route.path, "/inventory");
        assert_eq!(route.body["resource"], "cart");
        assert_eq!(route.body["params"]["codigo"], "1234567890123456");
        assert_eq!(route.body["params"]["userId"], "op-7");
    }

    #[tokio::test]
    async fn test_register_box_sends_defaults() {
        let stub = std::sync::Arc::new(StubGateway::replying(WireEnvelope::success(
            Some(serde_json::json!({ "codigo": "1234567890123456" })),
            "Caja registrada",
        )));
        let service = ScanService::new(remote_config(), stub.clone()).unwrap();

        let result = service
            .register_box("1234567890123456", " Huevos Blancos ", None)
            .await
            .unwrap();
        assert_eq!(result.id, "1234567890123456");
        assert_eq!(result.mensaje, "Caja registrada");
        assert_eq!(result.estado, "registrado");

        let (_, route) = &stub.calls()[0];
        let params = &route.body["params"];
        assert_eq!(params["calibre"], "01");
        assert_eq!(params["formato"], "1");
        assert_eq!(params["empresa"], "1");
        assert_eq!(params["ubicacion"], "PACKING");
        assert_eq!(params["operario"], "Huevos Blancos");
    }

    // -------------------------------------------------------------------------
    // End to end on the mock backend
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_box_lifecycle_on_mock() {
        let service = mocked();

        service
            .register_box("1234567890123456", "Huevos", Some("BODEGA"))
            .await
            .unwrap();

        let info = service.lookup_code("1234567890123456").await.unwrap();
        assert_eq!(info.pk_tipo, ApiCodeKind::Box);
        assert_eq!(info.producto.map(|p| p.nombre), Some("Huevos".to_string()));

        let err = service
            .register_box("1234567890123456", "Huevos", None)
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::Rejected);

        let receipt = service
            .process_scan(ProcessScanRequest {
                codigo: "1234567890123456".into(),
                ubicacion: "VENTA".into(),
                tipo: None,
                custom_info: None,
            })
            .await
            .unwrap();
        assert_eq!(receipt.tipo, Some(ApiCodeKind::Box));

        let mock = service.mock_backend().unwrap();
        assert_eq!(
            mock.location_of("1234567890123456").await,
            Some(InventoryLocation::Venta)
        );
    }

    #[tokio::test]
    async fn test_custom_scan_falls_back_to_move() {
        let service = mocked();
        let mock = service.mock_backend().unwrap();
        mock.seed_box("7012400110111007", InventoryLocation::Packing)
            .await;

        let receipt = service
            .process_scan(ProcessScanRequest {
                codigo: "7012400110111007".into(),
                ubicacion: "BODEGA".into(),
                tipo: None,
                custom_info: Some(vec![("A1".into(), 30)]),
            })
            .await
            .unwrap();
        assert_eq!(receipt.ubicacion, InventoryLocation::Bodega);
        assert_eq!(
            mock.location_of("7012400110111007").await,
            Some(InventoryLocation::Bodega)
        );

        // a fresh code is created as custom
        service
            .process_scan(ProcessScanRequest {
                codigo: "7012400110111008".into(),
                ubicacion: "PACKING".into(),
                tipo: None,
                custom_info: Some(vec![("A1".into(), 30), ("A2".into(), 0)]),
            })
            .await
            .unwrap();
        assert_eq!(
            mock.custom_info_of("7012400110111008").await.as_deref(),
            Some(r#"[["A1",30],["A2",0]]"#)
        );
    }

    #[tokio::test]
    async fn test_custom_box_on_mock() {
        let service = mocked();
        let lines = vec![("1234567890123456".to_string(), 90)];
        let result = service
            .create_custom_box("1234567890123457", &lines, None)
            .await
            .unwrap();
        assert_eq!(result.mensaje, "Caja custom creada exitosamente");

        let err = service
            .create_custom_box("1234567890123458", &[(String::new(), 1)], None)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Línea 1: el código no puede estar vacío");
    }

    #[tokio::test]
    async fn test_pallet_lifecycle_on_mock() {
        let service = mocked();

        let pallet = service.create_pallet("31224107101", Some(60)).await.unwrap();
        assert_eq!(pallet.codigo, "31224107101001");

        let page = service.active_pallets(None, None, None).await.unwrap();
        assert_eq!(page.items.len(), 1);

        let change = service.close_pallet(&pallet.codigo).await.unwrap();
        assert_eq!(change.estado_anterior, "open");
        assert_eq!(change.estado_nuevo, "closed");

        let err = service.close_pallet(&pallet.codigo).await.unwrap_err();
        assert_eq!(err.to_string(), "El pallet ya está cerrado");

        let page = service
            .active_pallets(Some("PACKING"), Some(10), None)
            .await
            .unwrap();
        assert!(page.items.is_empty());

        let receipt = service.move_pallet(&pallet.codigo, None).await.unwrap();
        assert_eq!(receipt.ubicacion, InventoryLocation::TRANSIT);
    }

    #[tokio::test]
    async fn test_issue_report_on_mock() {
        let service = mocked();
        let receipt = service
            .report_issue("  La cinta 2 se detuvo sola  ")
            .await
            .unwrap();
        assert!(receipt.id.starts_with("RPT-"));
        assert_eq!(receipt.estado, "recibido");
        assert_eq!(service.mock_backend().unwrap().issue_count().await, 1);
    }

    #[tokio::test]
    async fn test_unknown_code_lookup_on_mock() {
        let service = mocked();
        let err = service.lookup_code("31224107101005").await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::Rejected);
    }
}
