//! # Code Schemas
//!
//! Fixed-width field tables for every code layout the terminal understands.
//!
//! ## Layouts
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  BOX (16)        D │ SS │ AA │ OO │ E │ T │ CC │ F │ C │ CCC            │
//! │  offset          0   1    3    5    7   8   9    11  12  13             │
//! │                                                                         │
//! │  PALLET (14)     D │ SS │ AA │ H │ CC │ F │ EE │ CCC                    │
//! │  offset          0   1    3    5   6    8   9    11                     │
//! │                                                                         │
//! │  LEGACY (13)     D │ SS │ AA │ H │ CC │ F │ E │ CCC                     │
//! │  offset          0   1    3    5   6    8   9   10                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Decoders iterate these tables instead of slicing by hand, so a change to
//! a layout is a change to one table.

use crate::error::{CodeError, CodeField, FieldRangeError};
use crate::types::CodeKind;

// =============================================================================
// Field Spec
// =============================================================================

/// One positional sub-field: where it sits and what values it may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub field: CodeField,
    pub offset: usize,
    pub width: usize,
    /// Inclusive numeric range, `None` when any digits are accepted.
    pub range: Option<(u16, u16)>,
}

impl FieldSpec {
    const fn any(field: CodeField, offset: usize, width: usize) -> Self {
        FieldSpec {
            field,
            offset,
            width,
            range: None,
        }
    }

    const fn ranged(field: CodeField, offset: usize, width: usize, min: u16, max: u16) -> Self {
        FieldSpec {
            field,
            offset,
            width,
            range: Some((min, max)),
        }
    }

    fn check(&self, digits: &str) -> Result<(), FieldRangeError> {
        let Some((min, max)) = self.range else {
            return Ok(());
        };
        let value = digits_value(digits);
        if value < min || value > max {
            return Err(FieldRangeError {
                field: self.field,
                value,
                min,
                max,
                width: self.width,
            });
        }
        Ok(())
    }
}

/// Numeric value of an ASCII digit run (at most three digits here).
///
/// Only called on input that passed [`CodeSchema::check_shape`].
fn digits_value(digits: &str) -> u16 {
    digits
        .bytes()
        .fold(0u16, |acc, b| acc * 10 + u16::from(b - b'0'))
}

// =============================================================================
// Code Schema
// =============================================================================

/// A complete code layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeSchema {
    pub name: &'static str,
    pub kind: CodeKind,
    pub length: usize,
    /// Fields in offset order; they tile the code exactly.
    pub fields: &'static [FieldSpec],
    /// Digit counts of the dash-separated display groups.
    pub display_groups: &'static [usize],
}

/// 16-digit box code.
pub const BOX_SCHEMA: CodeSchema = CodeSchema {
    name: "box",
    kind: CodeKind::Box,
    length: 16,
    fields: &[
        FieldSpec::ranged(CodeField::Weekday, 0, 1, 1, 7),
        FieldSpec::ranged(CodeField::Week, 1, 2, 1, 53),
        FieldSpec::ranged(CodeField::Year, 3, 2, 0, 99),
        FieldSpec::any(CodeField::Operator, 5, 2),
        FieldSpec::any(CodeField::Packer, 7, 1),
        FieldSpec::any(CodeField::Shift, 8, 1),
        FieldSpec::any(CodeField::Caliber, 9, 2),
        FieldSpec::any(CodeField::Format, 11, 1),
        FieldSpec::any(CodeField::Company, 12, 1),
        FieldSpec::any(CodeField::Counter, 13, 3),
    ],
    // DSSAA-OOET-CCFC-CCC
    display_groups: &[5, 4, 4, 3],
};

/// 14-digit pallet code, the current scheme.
pub const PALLET_SCHEMA: CodeSchema = CodeSchema {
    name: "pallet",
    kind: CodeKind::Pallet,
    length: 14,
    fields: &[
        FieldSpec::ranged(CodeField::Weekday, 0, 1, 1, 7),
        FieldSpec::ranged(CodeField::Week, 1, 2, 1, 53),
        FieldSpec::ranged(CodeField::Year, 3, 2, 0, 99),
        FieldSpec::any(CodeField::Shift, 5, 1),
        FieldSpec::any(CodeField::Caliber, 6, 2),
        FieldSpec::any(CodeField::Format, 8, 1),
        FieldSpec::any(CodeField::Company, 9, 2),
        FieldSpec::any(CodeField::Counter, 11, 3),
    ],
    // DSSAA-HCCF-EE-CCC
    display_groups: &[5, 4, 2, 3],
};

/// 13-digit pallet code printed before the company field grew to two digits.
pub const LEGACY_PALLET_SCHEMA: CodeSchema = CodeSchema {
    name: "pallet-13",
    kind: CodeKind::Pallet,
    length: 13,
    fields: &[
        FieldSpec::ranged(CodeField::Weekday, 0, 1, 1, 7),
        FieldSpec::ranged(CodeField::Week, 1, 2, 1, 53),
        FieldSpec::ranged(CodeField::Year, 3, 2, 0, 99),
        FieldSpec::any(CodeField::Shift, 5, 1),
        FieldSpec::any(CodeField::Caliber, 6, 2),
        FieldSpec::any(CodeField::Format, 8, 1),
        FieldSpec::any(CodeField::Company, 9, 1),
        FieldSpec::any(CodeField::Counter, 10, 3),
    ],
    // DSSAA-HCCF-E-CCC
    display_groups: &[5, 4, 1, 3],
};

// =============================================================================
// Field Extraction
// =============================================================================

/// Sub-field slices of one code, borrowed from the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fields<'a> {
    entries: Vec<(CodeField, &'a str)>,
}

impl<'a> Fields<'a> {
    /// The slice for `field`, empty if this layout has no such field.
    pub fn get(&self, field: CodeField) -> &'a str {
        self.entries
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, value)| *value)
            .unwrap_or("")
    }

    /// Owned copy of [`get`](Self::get).
    pub fn take(&self, field: CodeField) -> String {
        self.get(field).to_string()
    }
}

impl CodeSchema {
    /// Checks that `digits` is exactly `self.length` ASCII digits.
    ///
    /// Length is checked before content, so "12ab" reports the length.
    pub fn check_shape(&self, digits: &str) -> Result<(), CodeError> {
        let actual = digits.chars().count();
        if actual != self.length {
            return Err(CodeError::WrongLength {
                kind: self.kind,
                expected: self.length,
                actual,
            });
        }
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CodeError::NonNumericCharacters);
        }
        Ok(())
    }

    /// Splits `digits` into this layout's fields and range-checks them in
    /// offset order, so the first failing field is the one reported.
    ///
    /// Input that is not exactly `self.length` ASCII digits is rejected
    /// before any field is read.
    pub fn split<'a>(&self, digits: &'a str) -> Result<Fields<'a>, CodeError> {
        self.check_shape(digits)?;

        let mut entries = Vec::with_capacity(self.fields.len());
        for spec in self.fields {
            let value = &digits[spec.offset..spec.offset + spec.width];
            spec.check(value)?;
            entries.push((spec.field, value));
        }
        Ok(Fields { entries })
    }

    /// Joins the display groups of `digits` with dashes.
    ///
    /// `None` unless `digits` fits this layout exactly.
    pub fn group(&self, digits: &str) -> Option<String> {
        self.check_shape(digits).ok()?;

        let mut out = String::with_capacity(digits.len() + self.display_groups.len());
        let mut start = 0;
        for (i, width) in self.display_groups.iter().enumerate() {
            if i > 0 {
                out.push('-');
            }
            out.push_str(&digits[start..start + width]);
            start += width;
        }
        Some(out)
    }
}
