//! # Pallet Base Codes
//!
//! A new pallet is requested with an 11-digit base code: the 14-digit pallet
//! layout without its 3-digit counter. The backend appends the counter.
//!
//! ```text
//!   D │ SS │ AA │ H │ CC │ F │ EE        (base, 11 digits)
//!   D │ SS │ AA │ H │ CC │ F │ EE │ CCC  (pallet, 14 digits)
//! ```

use chrono::{Datelike, NaiveDate};

use crate::catalog::{BoxFormat, Caliber, Company, Shift};
use crate::error::ValidationError;
use crate::validation::ValidationResult;
use crate::PALLET_BASE_CODE_LENGTH;

/// Builds the base code for a pallet packed on `date`.
///
/// Weekday and week follow ISO 8601 (Monday = 1), and the year is the ISO
/// week-numbering year so that a 31 December in week 01 reads as week 01 of
/// the following year.
///
/// ```rust
/// use bodega_core::base_code::build_pallet_base_code;
/// use bodega_core::catalog::{BoxFormat, Caliber, Company, Shift};
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap(); // Wednesday, week 12
/// let code = build_pallet_base_code(
///     date,
///     Shift::Morning,
///     Caliber::MedianoBlanco,
///     BoxFormat::Standard180,
///     Company::LomasAltas,
/// );
/// assert_eq!(code, "31224107101");
/// ```
pub fn build_pallet_base_code(
    date: NaiveDate,
    shift: Shift,
    caliber: Caliber,
    format: BoxFormat,
    company: Company,
) -> String {
    let iso = date.iso_week();
    format!(
        "{}{:02}{:02}{}{}{}{}",
        date.weekday().number_from_monday(),
        iso.week(),
        iso.year().rem_euclid(100),
        shift.code(),
        caliber.code(),
        format.code(),
        company.pallet_code(),
    )
}

/// Validates a base code typed or generated for pallet creation.
///
/// Returns the trimmed code.
pub fn validate_pallet_base_code(code: &str) -> ValidationResult<String> {
    let trimmed = code.trim();
    if trimmed.len() != PALLET_BASE_CODE_LENGTH || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::InvalidBaseCode {
            length: PALLET_BASE_CODE_LENGTH,
        });
    }
    Ok(trimmed.to_string())
}
