//! # Display Formatting
//!
//! Groups code digits with dashes so operators can audit a scan against the
//! printed label at a glance.
//!
//! ```text
//! box    1234567890123456  ──►  12345-6789-0123-456   (DSSAA-OOET-CCFC-CCC)
//! pallet 12345678901234    ──►  12345-6789-01-234     (DSSAA-HCCF-EE-CCC)
//! other  12345             ──►  12345                 (unchanged)
//! ```

use crate::codes::sanitize;
use crate::schema::{BOX_SCHEMA, PALLET_SCHEMA};

/// Formats any string as a code for display.
///
/// The input is sanitized first. Lengths that match no current scheme come
/// back as the sanitized digits, untouched: formatting is best-effort and
/// never fails.
///
/// ```rust
/// use bodega_core::display::format_for_display;
///
/// assert_eq!(format_for_display("1234567890123456"), "12345-6789-0123-456");
/// assert_eq!(format_for_display("12 345"), "12345");
/// ```
pub fn format_for_display(code: &str) -> String {
    let clean = sanitize(code);

    PALLET_SCHEMA
        .group(&clean)
        .or_else(|| BOX_SCHEMA.group(&clean))
        .unwrap_or(clean)
}
