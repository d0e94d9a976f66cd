//! # Validation Module
//!
//! Input validation for the scanning screens, run before any request
//! reaches the inventory backend.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Scan input (TypeScript UI)                                   │
//! │  └── Shows the errorMessage produced here, inline                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE + codes (Rust)                                   │
//! │  ├── Code kind checks (box where a box is required)                    │
//! │  ├── Move code lengths, custom box lines                               │
//! │  └── Issue descriptions                                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Inventory backend                                            │
//! │  └── Existence, location rules, duplicates                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bodega_core::validation::{require_kind, validate_issue_description};
//! use bodega_core::CodeKind;
//!
//! require_kind("1234567890123456", CodeKind::Box).unwrap();
//! assert!(validate_issue_description("roto").is_err());
//! ```

use crate::codes::classify_code;
use crate::error::{CoreError, ValidationError};
use crate::types::CodeKind;
use crate::{ISSUE_DESCRIPTION_MAX, ISSUE_DESCRIPTION_MIN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Code Validators
// =============================================================================

/// Classifies `code` and demands a specific kind.
///
/// Invalid codes keep their own message; a valid code of the other kind
/// gets [`ValidationError::WrongCodeKind`]. Returns the trimmed code.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Register Box screen                                                    │
/// │                                                                         │
/// │  Operator scans: 12345678901234                                        │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  require_kind(code, Box) ← THIS FUNCTION                               │
/// │       │                                                                 │
/// │       ├── unreadable? → "El código debe ser válido: ..."               │
/// │       ├── pallet?     → "El código debe ser de una caja (16 dígitos)"  │
/// │       └── OK → send registration                                       │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn require_kind(code: &str, expected: CodeKind) -> Result<String, CoreError> {
    let kind = classify_code(Some(code))?;
    if kind != expected {
        return Err(ValidationError::WrongCodeKind { expected }.into());
    }
    Ok(code.trim().to_string())
}

/// Validates the code of a resource being moved between locations.
///
/// Only the shape is checked (exactly `length` digits after trim); `label`
/// names the resource in the message ("pallet", "carro").
pub fn validate_move_code(code: &str, length: usize, label: &str) -> ValidationResult<String> {
    let trimmed = code.trim();
    if trimmed.len() != length || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::InvalidMoveCode {
            label: label.to_string(),
            length,
        });
    }
    Ok(trimmed.to_string())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates an issue report description.
///
/// ## Rules
/// - Must be present and not only whitespace
/// - Between 10 and 1000 characters after trimming
///
/// Returns the trimmed description.
pub fn validate_issue_description(description: &str) -> ValidationResult<String> {
    if description.is_empty() {
        return Err(ValidationError::DescriptionRequired);
    }

    let trimmed = description.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::DescriptionEmpty);
    }

    let length = trimmed.chars().count();

    if length > ISSUE_DESCRIPTION_MAX {
        return Err(ValidationError::DescriptionTooLong {
            max: ISSUE_DESCRIPTION_MAX,
        });
    }

    if length < ISSUE_DESCRIPTION_MIN {
        return Err(ValidationError::DescriptionTooShort {
            min: ISSUE_DESCRIPTION_MIN,
        });
    }

    Ok(trimmed.to_string())
}

/// Validates the product named when registering a box.
pub fn validate_product_name(product: &str) -> ValidationResult<String> {
    let trimmed = product.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::ProductRequired);
    }
    Ok(trimmed.to_string())
}

// =============================================================================
// Custom Box Validators
// =============================================================================

/// Validates the (code, egg count) lines of a custom box.
///
/// ## Rules
/// - At least one line
/// - Every line has a non-blank code
/// - Every count is zero or more
///
/// Line numbers in errors are 1-based, as shown on screen.
pub fn validate_custom_box_lines(lines: &[(String, i64)]) -> ValidationResult<()> {
    if lines.is_empty() {
        return Err(ValidationError::NoCustomLines);
    }

    for (index, (code, quantity)) in lines.iter().enumerate() {
        let line = index + 1;
        if code.trim().is_empty() {
            return Err(ValidationError::EmptyLineCode { line });
        }
        if *quantity < 0 {
            return Err(ValidationError::NegativeLineQuantity { line });
        }
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates the optional box capacity of a new pallet.
pub fn validate_max_boxes(max_boxes: Option<i64>) -> ValidationResult<()> {
    match max_boxes {
        Some(n) if n <= 0 => Err(ValidationError::MaxBoxesNotPositive),
        _ => Ok(()),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CodeError;

    #[test]
    fn test_require_kind() {
        assert_eq!(
            require_kind(" 1234567890123456 ", CodeKind::Box).unwrap(),
            "1234567890123456"
        );
        assert!(require_kind("12345678901234", CodeKind::Pallet).is_ok());

        let err = require_kind("12345678901234", CodeKind::Box).unwrap_err();
        assert_eq!(err.to_string(), "El código debe ser de una caja (16 dígitos)");

        let err = require_kind("123", CodeKind::Box).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Code(CodeError::UnrecognizedLength { length: 3 })
        ));
    }

    #[test]
    fn test_validate_move_code() {
        assert!(validate_move_code("12345678901234", 14, "pallet").is_ok());
        let err = validate_move_code("1234567890123", 14, "pallet").unwrap_err();
        assert_eq!(
            err.to_string(),
            "El código debe ser un código de pallet válido (14 dígitos)"
        );
        assert!(validate_move_code("123456789012345a", 16, "carro").is_err());
    }

    #[test]
    fn test_validate_issue_description() {
        assert_eq!(
            validate_issue_description("  La cinta 2 está detenida  ").unwrap(),
            "La cinta 2 está detenida"
        );
        assert_eq!(
            validate_issue_description(""),
            Err(ValidationError::DescriptionRequired)
        );
        assert_eq!(
            validate_issue_description("    "),
            Err(ValidationError::DescriptionEmpty)
        );
        assert_eq!(
            validate_issue_description("corto"),
            Err(ValidationError::DescriptionTooShort { min: 10 })
        );
        assert_eq!(
            validate_issue_description(&"a".repeat(1001)),
            Err(ValidationError::DescriptionTooLong { max: 1000 })
        );
        // counted in characters, not bytes
        assert!(validate_issue_description(&"ñ".repeat(1000)).is_ok());
    }

    #[test]
    fn test_validate_product_name() {
        assert_eq!(validate_product_name(" Huevos ").unwrap(), "Huevos");
        assert_eq!(
            validate_product_name("  "),
            Err(ValidationError::ProductRequired)
        );
    }

    #[test]
    fn test_validate_custom_box_lines() {
        let lines = vec![("1234567890123456".to_string(), 90), ("X".to_string(), 0)];
        assert!(validate_custom_box_lines(&lines).is_ok());

        assert_eq!(
            validate_custom_box_lines(&[]),
            Err(ValidationError::NoCustomLines)
        );

        let lines = vec![("A".to_string(), 1), (" ".to_string(), 5)];
        let err = validate_custom_box_lines(&lines).unwrap_err();
        assert_eq!(err.to_string(), "Línea 2: el código no puede estar vacío");

        let lines = vec![("A".to_string(), -1)];
        assert_eq!(
            validate_custom_box_lines(&lines),
            Err(ValidationError::NegativeLineQuantity { line: 1 })
        );
    }

    #[test]
    fn test_validate_max_boxes() {
        assert!(validate_max_boxes(None).is_ok());
        assert!(validate_max_boxes(Some(60)).is_ok());
        assert!(validate_max_boxes(Some(0)).is_err());
        assert!(validate_max_boxes(Some(-3)).is_err());
    }
}
