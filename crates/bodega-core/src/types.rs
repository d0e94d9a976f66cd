//! # Domain Types
//!
//! Result types produced by the code classifier and decoders.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────────┐      ┌──────────────────────────────────────┐ │
//! │  │ CodeValidationResult│      │            DecodedCode               │ │
//! │  │  ─────────────────  │      │  ┌────────────────┐ ┌──────────────┐ │ │
//! │  │  isValid            │      │  │ DecodedBoxCode │ │DecodedPallet │ │ │
//! │  │  type (box|pallet)  │      │  │  16 digits     │ │Code 14 digits│ │ │
//! │  │  errorMessage       │      │  └────────────────┘ └──────────────┘ │ │
//! │  └─────────────────────┘      └──────────────────────────────────────┘ │
//! │                                                                         │
//! │  CodeKind (box | pallet) ◄──► ApiCodeKind (BOX | PALLET)               │
//! │                          ◄──► UiCodeKind (caja | pallet)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Decoded fields stay strings: "07" is a week, not the number 7, and the
//! leading zero is part of what the operator reads off the label.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::{BoxFormat, Caliber, Company};
use crate::error::CodeError;
use crate::{BOX_CODE_LENGTH, PALLET_CODE_LENGTH};

// =============================================================================
// Code Kind
// =============================================================================

/// What a scanned code identifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CodeKind {
    /// A single packed carton (16 digits).
    Box,
    /// A pallet aggregating boxes (14 digits).
    Pallet,
}

impl CodeKind {
    /// Exact digit count of this kind of code.
    pub const fn code_length(&self) -> usize {
        match self {
            CodeKind::Box => BOX_CODE_LENGTH,
            CodeKind::Pallet => PALLET_CODE_LENGTH,
        }
    }

    /// Noun with indefinite article, for messages ("una caja").
    pub const fn article_label(&self) -> &'static str {
        match self {
            CodeKind::Box => "una caja",
            CodeKind::Pallet => "un pallet",
        }
    }
}

impl std::fmt::Display for CodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CodeKind::Box => write!(f, "box"),
            CodeKind::Pallet => write!(f, "pallet"),
        }
    }
}

/// Resource type as the inventory backend names it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApiCodeKind {
    Box,
    Pallet,
}

/// Resource type as the Spanish UI labels it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum UiCodeKind {
    Caja,
    Pallet,
}

impl From<CodeKind> for ApiCodeKind {
    fn from(kind: CodeKind) -> Self {
        match kind {
            CodeKind::Box => ApiCodeKind::Box,
            CodeKind::Pallet => ApiCodeKind::Pallet,
        }
    }
}

impl From<ApiCodeKind> for CodeKind {
    fn from(kind: ApiCodeKind) -> Self {
        match kind {
            ApiCodeKind::Box => CodeKind::Box,
            ApiCodeKind::Pallet => CodeKind::Pallet,
        }
    }
}

impl From<ApiCodeKind> for UiCodeKind {
    fn from(kind: ApiCodeKind) -> Self {
        match kind {
            ApiCodeKind::Box => UiCodeKind::Caja,
            ApiCodeKind::Pallet => UiCodeKind::Pallet,
        }
    }
}

impl From<UiCodeKind> for ApiCodeKind {
    fn from(kind: UiCodeKind) -> Self {
        match kind {
            UiCodeKind::Caja => ApiCodeKind::Box,
            UiCodeKind::Pallet => ApiCodeKind::Pallet,
        }
    }
}

// =============================================================================
// Code Validation Result
// =============================================================================

/// Outcome of classifying a scanned string.
///
/// `kind` is set only when valid, `error_message` only when invalid.
/// Built fresh per call; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CodeValidationResult {
    pub is_valid: bool,
    #[serde(rename = "type")]
    pub kind: Option<CodeKind>,
    pub error_message: Option<String>,
}

impl CodeValidationResult {
    pub fn valid(kind: CodeKind) -> Self {
        CodeValidationResult {
            is_valid: true,
            kind: Some(kind),
            error_message: None,
        }
    }

    pub fn invalid(error: &CodeError) -> Self {
        CodeValidationResult {
            is_valid: false,
            kind: None,
            error_message: Some(error.to_string()),
        }
    }
}

impl From<Result<CodeKind, CodeError>> for CodeValidationResult {
    fn from(result: Result<CodeKind, CodeError>) -> Self {
        match result {
            Ok(kind) => CodeValidationResult::valid(kind),
            Err(err) => CodeValidationResult::invalid(&err),
        }
    }
}

// =============================================================================
// Decoded Box Code
// =============================================================================

/// A 16-digit box code split into its named fields.
///
/// Layout: `D SS AA OO E T CC F C CCC`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DecodedBoxCode {
    /// ISO weekday of packing, "1".."7".
    #[serde(rename = "dia")]
    pub weekday: String,
    /// ISO week, "01".."53".
    #[serde(rename = "semana")]
    pub week: String,
    /// Two-digit year.
    #[serde(rename = "año")]
    pub year: String,
    #[serde(rename = "operario")]
    pub operator: String,
    #[serde(rename = "empacadora")]
    pub packer: String,
    #[serde(rename = "turno")]
    pub shift: String,
    #[serde(rename = "calibre")]
    pub caliber: String,
    #[serde(rename = "formato")]
    pub format: String,
    #[serde(rename = "empresa")]
    pub company: String,
    #[serde(rename = "contador")]
    pub counter: String,
}

impl DecodedBoxCode {
    /// Product grade for the caliber digits, if it is a known one.
    pub fn caliber_grade(&self) -> Option<Caliber> {
        Caliber::from_code(&self.caliber)
    }

    pub fn company_name(&self) -> Option<&'static str> {
        Company::from_code(&self.company).map(|c| c.name())
    }

    pub fn box_format(&self) -> Option<BoxFormat> {
        BoxFormat::from_code(&self.format)
    }
}

// =============================================================================
// Decoded Pallet Code
// =============================================================================

/// Processing time of day encoded in a pallet code.
///
/// Only the literal digit `1` means morning; every other digit is afternoon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ProcessingShift {
    #[serde(rename = "Mañana")]
    Morning,
    #[serde(rename = "Tarde")]
    Afternoon,
}

impl ProcessingShift {
    pub fn from_code(code: &str) -> Self {
        if code == "1" {
            ProcessingShift::Morning
        } else {
            ProcessingShift::Afternoon
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            ProcessingShift::Morning => "Mañana",
            ProcessingShift::Afternoon => "Tarde",
        }
    }
}

/// A pallet code split into its named fields.
///
/// Layout (14 digits): `D SS AA H CC F EE CCC`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DecodedPalletCode {
    #[serde(rename = "dia_semana")]
    pub weekday: String,
    #[serde(rename = "semana")]
    pub week: String,
    /// Four-digit year, "20" + the two digits in the code.
    #[serde(rename = "año")]
    pub year: String,
    #[serde(rename = "horario_proceso")]
    pub processing_shift: ProcessingShift,
    #[serde(rename = "calibre")]
    pub caliber: String,
    #[serde(rename = "formato_caja")]
    pub box_format: String,
    #[serde(rename = "empresa")]
    pub company: String,
    #[serde(rename = "contador")]
    pub counter: String,
}

impl DecodedPalletCode {
    pub fn caliber_grade(&self) -> Option<Caliber> {
        Caliber::from_code(&self.caliber)
    }

    pub fn company_name(&self) -> Option<&'static str> {
        Company::from_code(&self.company).map(|c| c.name())
    }
}

/// Either kind of decoded code, as shown by the code query screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "type", content = "components", rename_all = "snake_case")]
pub enum DecodedCode {
    Box(DecodedBoxCode),
    Pallet(DecodedPalletCode),
}

impl DecodedCode {
    pub fn kind(&self) -> CodeKind {
        match self {
            DecodedCode::Box(_) => CodeKind::Box,
            DecodedCode::Pallet(_) => CodeKind::Pallet,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mappings() {
        assert_eq!(ApiCodeKind::from(CodeKind::Box), ApiCodeKind::Box);
        assert_eq!(UiCodeKind::from(ApiCodeKind::Box), UiCodeKind::Caja);
        assert_eq!(UiCodeKind::from(ApiCodeKind::Pallet), UiCodeKind::Pallet);
        assert_eq!(ApiCodeKind::from(UiCodeKind::Caja), ApiCodeKind::Box);
        assert_eq!(CodeKind::from(ApiCodeKind::Pallet), CodeKind::Pallet);
    }

    #[test]
    fn test_kind_wire_names() {
        assert_eq!(serde_json::to_string(&CodeKind::Box).unwrap(), "\"box\"");
        assert_eq!(serde_json::to_string(&ApiCodeKind::Pallet).unwrap(), "\"PALLET\"");
        assert_eq!(serde_json::to_string(&UiCodeKind::Caja).unwrap(), "\"caja\"");
    }

    #[test]
    fn test_processing_shift_literal_match() {
        assert_eq!(ProcessingShift::from_code("1"), ProcessingShift::Morning);
        assert_eq!(ProcessingShift::from_code("2"), ProcessingShift::Afternoon);
        assert_eq!(ProcessingShift::from_code("0"), ProcessingShift::Afternoon);
        assert_eq!(ProcessingShift::Morning.label(), "Mañana");
    }

    #[test]
    fn test_validation_result_serialization() {
        let ok = CodeValidationResult::valid(CodeKind::Pallet);
        let json = serde_json::to_value(&ok).unwrap();
        assert_eq!(json["isValid"], true);
        assert_eq!(json["type"], "pallet");
        assert!(json["errorMessage"].is_null());

        let bad = CodeValidationResult::invalid(&CodeError::EmptyInput);
        let json = serde_json::to_value(&bad).unwrap();
        assert_eq!(json["isValid"], false);
        assert_eq!(json["errorMessage"], "El código no puede estar vacío");
    }
}
