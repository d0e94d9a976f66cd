//! # bodega-core: Scan Code Logic for the Bodega Terminals
//!
//! Everything the handheld scanners need to understand a printed label,
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bodega Scan Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Scanning UI                                  │   │
//! │  │    Scan Input ──► Box/Pallet Detail ──► Move ──► Report Issue  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 bodega-gateway (ScanService)                    │   │
//! │  │    lookup_code, register_box, create_pallet, move_cart, ...    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ bodega-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   codes   │  │  schema   │  │  catalog  │  │ validation│  │   │
//! │  │   │ classify  │  │  layouts  │  │  calibers │  │   forms   │  │   │
//! │  │   │  decode   │  │  ranges   │  │ companies │  │   lines   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`codes`] - Classification and decoding of scanned codes
//! - [`schema`] - Positional field layouts for each code scheme
//! - [`display`] - Dash grouping for on-screen codes
//! - [`types`] - Decoded code records and result shapes
//! - [`catalog`] - Calibers, companies, box formats, shifts
//! - [`base_code`] - Pallet base codes for pallet creation
//! - [`validation`] - Form input rules
//! - [`error`] - Error types with the operator-facing messages
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input, same output, safe from any thread
//! 2. **Total**: malformed scans come back as errors, never panics
//! 3. **Strings Stay Strings**: decoded fields keep their leading zeros
//!
//! ## Example Usage
//!
//! ```rust
//! use bodega_core::{classify, decode, format_for_display, CodeKind, DecodedCode};
//!
//! let scan = "1234567890123456";
//! assert_eq!(classify(scan).kind, Some(CodeKind::Box));
//! assert_eq!(format_for_display(scan), "12345-6789-0123-456");
//!
//! match decode(scan).unwrap() {
//!     DecodedCode::Box(b) => assert_eq!(b.counter, "456"),
//!     DecodedCode::Pallet(_) => unreachable!(),
//! }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod base_code;
pub mod catalog;
pub mod codes;
pub mod display;
pub mod error;
pub mod schema;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use bodega_core::decode_box` instead of
// `use bodega_core::codes::decode_box`

pub use codes::{
    classify, classify_code, classify_json, decode, decode_box, decode_legacy_pallet,
    decode_pallet, is_box_code, is_pallet_code, sanitize, CodeResult,
};
pub use display::format_for_display;
pub use error::{CodeError, CodeField, CoreError, CoreResult, FieldRangeError, ValidationError};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Digits in a box label.
pub const BOX_CODE_LENGTH: usize = 16;

/// Digits in a pallet label.
pub const PALLET_CODE_LENGTH: usize = 14;

/// Digits in a pallet label printed before the two-digit company field.
pub const LEGACY_PALLET_CODE_LENGTH: usize = 13;

/// Digits in the base code sent to create a pallet (pallet code minus counter).
pub const PALLET_BASE_CODE_LENGTH: usize = 11;

/// Digits in a cart code. Carts reuse the box label width.
pub const CART_CODE_LENGTH: usize = 16;

/// Shortest accepted issue description, in characters.
pub const ISSUE_DESCRIPTION_MIN: usize = 10;

/// Longest accepted issue description, in characters.
pub const ISSUE_DESCRIPTION_MAX: usize = 1000;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{BOX_SCHEMA, LEGACY_PALLET_SCHEMA, PALLET_SCHEMA};

    #[test]
    fn test_constants_match_schemas() {
        assert_eq!(BOX_SCHEMA.length, BOX_CODE_LENGTH);
        assert_eq!(PALLET_SCHEMA.length, PALLET_CODE_LENGTH);
        assert_eq!(LEGACY_PALLET_SCHEMA.length, LEGACY_PALLET_CODE_LENGTH);
        assert_eq!(PALLET_BASE_CODE_LENGTH + 3, PALLET_CODE_LENGTH);
    }
}
