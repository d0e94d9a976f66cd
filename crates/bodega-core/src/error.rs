//! # Error Types
//!
//! Domain-specific error types for bodega-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  bodega-core errors (this file)                                        │
//! │  ├── CodeError        - Scanned code could not be classified/decoded   │
//! │  │   └── FieldRangeError - A decoded sub-field is out of range         │
//! │  ├── ValidationError  - Other form input failures                      │
//! │  └── CoreError        - Either of the above                            │
//! │                                                                         │
//! │  bodega-gateway errors (separate crate)                                │
//! │  └── GatewayError     - What the scanning UI sees (with error code)    │
//! │                                                                         │
//! │  Flow: CodeError → CoreError → GatewayError → inline field message     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Messages
//! Every `Display` string is shown verbatim next to the scan input, so the
//! messages are written for warehouse operators (Spanish), not developers.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use crate::types::CodeKind;

// =============================================================================
// Code Fields
// =============================================================================

/// A named positional sub-field of a box or pallet code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CodeField {
    Weekday,
    Week,
    Year,
    Operator,
    Packer,
    Shift,
    Caliber,
    Format,
    Company,
    Counter,
}

impl CodeField {
    /// Operator-facing name of the field.
    pub const fn label(&self) -> &'static str {
        match self {
            CodeField::Weekday => "Día de la semana",
            CodeField::Week => "Semana",
            CodeField::Year => "Año",
            CodeField::Operator => "Operario",
            CodeField::Packer => "Empacadora",
            CodeField::Shift => "Turno",
            CodeField::Caliber => "Calibre",
            CodeField::Format => "Formato",
            CodeField::Company => "Empresa",
            CodeField::Counter => "Contador",
        }
    }
}

// =============================================================================
// Field Range Error
// =============================================================================

/// A decoded sub-field holds a value outside its documented range.
///
/// `width` is the field's digit width; bounds are printed zero-padded to it
/// so the message reads the way the code is printed on the label
/// ("Semana debe estar entre 01 y 53").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error(
    "{} debe estar entre {} y {}",
    .field.label(),
    padded(*.min, *.width),
    padded(*.max, *.width)
)]
pub struct FieldRangeError {
    pub field: CodeField,
    pub value: u16,
    pub min: u16,
    pub max: u16,
    pub width: usize,
}

/// `value` zero-padded to `width` digits.
fn padded(value: u16, width: usize) -> String {
    format!("{:0width$}", value, width = width)
}

// =============================================================================
// Code Error
// =============================================================================

/// Why a scanned string is not a usable box or pallet code.
///
/// All variants are locally recoverable: the operator rescans.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodeError {
    /// No code was provided at all (absent value or non-string input).
    #[error("El código es requerido")]
    MissingInput,

    /// The code trims to zero characters.
    #[error("El código no puede estar vacío")]
    EmptyInput,

    /// The code is neither box-length nor pallet-length.
    #[error("El código debe ser válido: código de caja (16 dígitos) o código de pallet (14 dígitos)")]
    UnrecognizedLength { length: usize },

    /// A decoder was handed a code of the wrong length for its scheme.
    #[error("El código debe tener exactamente {expected} dígitos (actual: {actual})")]
    WrongLength {
        kind: CodeKind,
        expected: usize,
        actual: usize,
    },

    /// Characters other than `0-9` remain after trimming.
    ///
    /// Decoders reject instead of silently stripping; use
    /// [`sanitize`](crate::codes::sanitize) when repair is intended.
    #[error("El código debe contener solo números")]
    NonNumericCharacters,

    /// A sub-field decoded to a value outside its range.
    #[error(transparent)]
    FieldRange(#[from] FieldRangeError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Form input validation errors outside of code decoding.
///
/// Raised by the scanning screens before anything is sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Issue report description is missing.
    #[error("La descripción es requerida")]
    DescriptionRequired,

    /// Issue report description is only whitespace.
    #[error("La descripción no puede estar vacía")]
    DescriptionEmpty,

    #[error("La descripción debe tener al menos {min} caracteres")]
    DescriptionTooShort { min: usize },

    #[error("La descripción no puede exceder los {max} caracteres")]
    DescriptionTooLong { max: usize },

    /// Box registration without a product.
    #[error("El producto es obligatorio")]
    ProductRequired,

    /// The code is valid but of the other kind (box where a pallet is needed).
    #[error("El código debe ser de {} ({} dígitos)", .expected.article_label(), .expected.code_length())]
    WrongCodeKind { expected: CodeKind },

    /// Move operations demand an exact length for the resource being moved.
    #[error("El código debe ser un código de {label} válido ({length} dígitos)")]
    InvalidMoveCode { label: String, length: usize },

    /// Pallet creation takes the base code without counter.
    #[error("El código base debe tener {length} dígitos")]
    InvalidBaseCode { length: usize },

    /// Destination is not a known inventory location.
    #[error("Ubicación inválida")]
    InvalidLocation { value: String },

    /// A custom box needs at least one (code, egg count) line.
    #[error("Debe haber al menos una línea con código y cantidad")]
    NoCustomLines,

    /// Custom box line `line` (1-based) has no code.
    #[error("Línea {line}: el código no puede estar vacío")]
    EmptyLineCode { line: usize },

    /// Custom box line `line` (1-based) has a negative egg count.
    #[error("Línea {line}: la cantidad debe ser un número >= 0")]
    NegativeLineQuantity { line: usize },

    /// Pallet capacity must be a positive number of boxes.
    #[error("La cantidad máxima de cajas debe ser mayor que 0")]
    MaxBoxesNotPositive,
}

// =============================================================================
// Core Error
// =============================================================================

/// Any failure produced by bodega-core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error(transparent)]
    Code(#[from] CodeError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl From<FieldRangeError> for CoreError {
    fn from(err: FieldRangeError) -> Self {
        CoreError::Code(CodeError::FieldRange(err))
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_range_messages_pad_to_width() {
        let err = FieldRangeError {
            field: CodeField::Weekday,
            value: 8,
            min: 1,
            max: 7,
            width: 1,
        };
        assert_eq!(err.to_string(), "Día de la semana debe estar entre 1 y 7");

        let err = FieldRangeError {
            field: CodeField::Week,
            value: 54,
            min: 1,
            max: 53,
            width: 2,
        };
        assert_eq!(err.to_string(), "Semana debe estar entre 01 y 53");

        let err = FieldRangeError {
            field: CodeField::Year,
            value: 0,
            min: 0,
            max: 99,
            width: 2,
        };
        assert_eq!(err.to_string(), "Año debe estar entre 00 y 99");
    }

    #[test]
    fn test_field_range_error_through_code_error() {
        let err = FieldRangeError {
            field: CodeField::Counter,
            value: 0,
            min: 1,
            max: 999,
            width: 3,
        };
        let boxed: Box<dyn std::error::Error> = Box::new(err.clone());
        assert_eq!(boxed.to_string(), "Contador debe estar entre 001 y 999");
        assert_eq!(
            CodeError::from(err).to_string(),
            "Contador debe estar entre 001 y 999"
        );
    }

    #[test]
    fn test_code_error_messages() {
        assert_eq!(CodeError::MissingInput.to_string(), "El código es requerido");
        assert_eq!(
            CodeError::EmptyInput.to_string(),
            "El código no puede estar vacío"
        );
        let err = CodeError::WrongLength {
            kind: CodeKind::Box,
            expected: 16,
            actual: 15,
        };
        assert_eq!(
            err.to_string(),
            "El código debe tener exactamente 16 dígitos (actual: 15)"
        );
    }

    #[test]
    fn test_wrong_kind_message() {
        let err = ValidationError::WrongCodeKind {
            expected: CodeKind::Box,
        };
        assert_eq!(err.to_string(), "El código debe ser de una caja (16 dígitos)");

        let err = ValidationError::WrongCodeKind {
            expected: CodeKind::Pallet,
        };
        assert_eq!(err.to_string(), "El código debe ser de un pallet (14 dígitos)");
    }

    #[test]
    fn test_field_range_converts_to_core_error() {
        let err = FieldRangeError {
            field: CodeField::Week,
            value: 0,
            min: 1,
            max: 53,
            width: 2,
        };
        let core_err: CoreError = err.into();
        assert!(matches!(
            core_err,
            CoreError::Code(CodeError::FieldRange(_))
        ));
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::ProductRequired.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        assert_eq!(core_err.to_string(), "El producto es obligatorio");
    }
}
