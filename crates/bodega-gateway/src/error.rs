//! # Gateway Error Types
//!
//! Error types for calls to the inventory backend.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Gateway Error Categories                           │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Input          │  │   Backend       │  │     Configuration       │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  Validation     │  │  NoData         │  │  InvalidConfig          │ │
//! │  │  (never sent)   │  │  Rejected       │  │  InvalidUrl             │ │
//! │  │                 │  │  RequestFailed  │  │  ConfigLoad/SaveFailed  │ │
//! │  │                 │  │  InvalidResponse│  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every variant maps to one [`ErrorCode`], the machine-readable string the
//! scanning screens switch on.

use bodega_core::{CodeError, CoreError, ValidationError};
use serde::Serialize;
use thiserror::Error;

/// Result type alias for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Everything that can go wrong between a scan and a backend answer.
#[derive(Debug, Error)]
pub enum GatewayError {
    // =========================================================================
    // Input Errors
    // =========================================================================
    /// Input rejected locally; nothing was sent to the backend.
    #[error(transparent)]
    Validation(#[from] CoreError),

    // =========================================================================
    // Backend Errors
    // =========================================================================
    /// The backend answered success but carried no data.
    #[error("{0}")]
    NoData(String),

    /// The backend answered with a failure status.
    #[error("{message}")]
    Rejected { message: String },

    /// The transport could not complete the call.
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The backend answered with something that is not a known envelope.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid gateway configuration.
    #[error("Invalid gateway configuration: {0}")]
    InvalidConfig(String),

    /// Invalid backend URL.
    #[error("Invalid API base URL: {0}")]
    InvalidUrl(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<CodeError> for GatewayError {
    fn from(err: CodeError) -> Self {
        GatewayError::Validation(err.into())
    }
}

impl From<ValidationError> for GatewayError {
    fn from(err: ValidationError) -> Self {
        GatewayError::Validation(err.into())
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        GatewayError::InvalidResponse(err.to_string())
    }
}

impl From<std::io::Error> for GatewayError {
    fn from(err: std::io::Error) -> Self {
        GatewayError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for GatewayError {
    fn from(err: toml::de::Error) -> Self {
        GatewayError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for GatewayError {
    fn from(err: toml::ser::Error) -> Self {
        GatewayError::ConfigSaveFailed(err.to_string())
    }
}

// =============================================================================
// Error Codes
// =============================================================================

/// Error codes surfaced to the scanning screens.
///
/// ## Usage in Frontend
/// ```typescript
/// switch (e.code) {
///   case 'VALIDATION_ERROR': showInline(e.message); break;
///   case 'NO_DATA':          showToast(e.message);  break;
///   default:                 showError(e.message);
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Local input check failed
    ValidationError,

    /// Backend succeeded without data
    NoData,

    /// Transport failure or unreadable response
    RequestFailed,

    /// Backend refused the operation
    Rejected,

    /// Gateway misconfigured
    ConfigError,
}

impl GatewayError {
    /// Returns the machine-readable code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            GatewayError::Validation(_) => ErrorCode::ValidationError,
            GatewayError::NoData(_) => ErrorCode::NoData,
            GatewayError::Rejected { .. } => ErrorCode::Rejected,
            GatewayError::RequestFailed(_) | GatewayError::InvalidResponse(_) => {
                ErrorCode::RequestFailed
            }
            GatewayError::InvalidConfig(_)
            | GatewayError::InvalidUrl(_)
            | GatewayError::ConfigLoadFailed(_)
            | GatewayError::ConfigSaveFailed(_) => ErrorCode::ConfigError,
        }
    }

    /// Returns true if the error was raised before anything was sent.
    pub fn is_validation(&self) -> bool {
        matches!(self, GatewayError::Validation(_))
    }

    /// Returns true if retrying the same call could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, GatewayError::RequestFailed(_))
    }
}

// =============================================================================
// Serializable Error
// =============================================================================

/// What the scanning screens receive when an operation fails.
///
/// ```json
/// { "code": "VALIDATION_ERROR", "message": "El producto es obligatorio" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl From<&GatewayError> for ApiError {
    fn from(err: &GatewayError) -> Self {
        ApiError {
            code: err.code(),
            message: err.to_string(),
        }
    }
}

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        ApiError::from(&err)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err: GatewayError = ValidationError::ProductRequired.into();
        assert_eq!(err.code(), ErrorCode::ValidationError);
        assert!(err.is_validation());

        assert_eq!(GatewayError::NoData("x".into()).code(), ErrorCode::NoData);
        assert_eq!(
            GatewayError::Rejected {
                message: "x".into()
            }
            .code(),
            ErrorCode::Rejected
        );
        assert_eq!(
            GatewayError::InvalidResponse("x".into()).code(),
            ErrorCode::RequestFailed
        );
        assert_eq!(
            GatewayError::InvalidUrl("x".into()).code(),
            ErrorCode::ConfigError
        );
    }

    #[test]
    fn test_validation_keeps_core_message() {
        let err: GatewayError = CodeError::EmptyInput.into();
        assert_eq!(err.to_string(), "El código no puede estar vacío");
    }

    #[test]
    fn test_retryable_errors() {
        assert!(GatewayError::RequestFailed("timeout".into()).is_retryable());
        assert!(!GatewayError::NoData("vacío".into()).is_retryable());
        assert!(!GatewayError::Rejected {
            message: "no".into()
        }
        .is_retryable());
    }

    #[test]
    fn test_api_error_serialization() {
        let err = GatewayError::Rejected {
            message: "Pallet cerrado".into(),
        };
        let json = serde_json::to_value(ApiError::from(&err)).unwrap();
        assert_eq!(json["code"], "REJECTED");
        assert_eq!(json["message"], "Pallet cerrado");

        let json = serde_json::to_value(ErrorCode::NoData).unwrap();
        assert_eq!(json, "NO_DATA");
    }
}
