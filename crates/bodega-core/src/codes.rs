//! # Code Classification & Decoding
//!
//! Turns a raw scanned string into a box or pallet code and its fields.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Scan → Decoded Code                                │
//! │                                                                         │
//! │  raw scanner input "  1234567890123456\n"                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  trim ──► empty? ─────────────────────────────► EmptyInput             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  16 digits? ──► BOX_SCHEMA                                             │
//! │  14 digits? ──► PALLET_SCHEMA                                          │
//! │  otherwise ───────────────────────────────────► UnrecognizedLength     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  range checks (weekday 1-7, week 01-53, year 00-99)                    │
//! │       │                                                                 │
//! │       ├── out of range ───────────────────────► FieldRange             │
//! │       ▼                                                                 │
//! │  DecodedBoxCode / DecodedPalletCode                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every function here is pure and total: malformed input comes back as a
//! [`CodeError`], never as a panic.
//!
//! ## Usage
//! ```rust
//! use bodega_core::codes::{classify, decode_box};
//! use bodega_core::CodeKind;
//!
//! let result = classify("1234567890123456");
//! assert_eq!(result.kind, Some(CodeKind::Box));
//!
//! let decoded = decode_box("1234567890123456").unwrap();
//! assert_eq!(decoded.week, "23");
//! assert_eq!(decoded.counter, "456");
//! ```

use serde_json::Value;

use crate::error::{CodeError, CodeField};
use crate::schema::{CodeSchema, BOX_SCHEMA, LEGACY_PALLET_SCHEMA, PALLET_SCHEMA};
use crate::types::{
    CodeKind, CodeValidationResult, DecodedBoxCode, DecodedCode, DecodedPalletCode,
    ProcessingShift,
};

/// Result type for decode operations.
pub type CodeResult<T> = Result<T, CodeError>;

// =============================================================================
// Sanitizing
// =============================================================================

/// Removes every character that is not an ASCII digit, keeping order.
///
/// Scanners inject whitespace, dashes, or line terminators; this is the
/// repair path. Decoders do not call it.
///
/// ```rust
/// use bodega_core::codes::sanitize;
///
/// assert_eq!(sanitize("12-34 56"), "123456");
/// assert_eq!(sanitize(""), "");
/// ```
pub fn sanitize(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

// =============================================================================
// Shape Checks
// =============================================================================

fn is_exact_digits(code: &str, length: usize) -> bool {
    code.len() == length && code.bytes().all(|b| b.is_ascii_digit())
}

/// True iff the trimmed input is exactly 16 ASCII digits.
///
/// No signs, no decimal points, no partial matches.
pub fn is_box_code(code: &str) -> bool {
    is_exact_digits(code.trim(), BOX_SCHEMA.length)
}

/// True iff the trimmed input is exactly 14 ASCII digits.
pub fn is_pallet_code(code: &str) -> bool {
    is_exact_digits(code.trim(), PALLET_SCHEMA.length)
}

// =============================================================================
// Classification
// =============================================================================

/// Classifies a scanned code, reporting why it is rejected.
///
/// `None` is the absent value (nothing was scanned). A code of the right
/// length is only accepted when its weekday, week and year fields are in
/// range, so a `Box`/`Pallet` answer guarantees the matching decoder
/// succeeds.
///
/// Box is checked before pallet; the widths are disjoint so the order only
/// matters for determinism.
pub fn classify_code(code: Option<&str>) -> CodeResult<CodeKind> {
    let code = code.ok_or(CodeError::MissingInput)?;
    let trimmed = code.trim();

    if trimmed.is_empty() {
        return Err(CodeError::EmptyInput);
    }

    let schema = if is_box_code(trimmed) {
        &BOX_SCHEMA
    } else if is_pallet_code(trimmed) {
        &PALLET_SCHEMA
    } else {
        return Err(CodeError::UnrecognizedLength {
            length: trimmed.chars().count(),
        });
    };

    schema.split(trimmed)?;
    Ok(schema.kind)
}

/// Classifies a scanned code into the result shape the scanning screens
/// consume.
///
/// Length alone is not enough: a 16- or 14-digit code whose weekday, week
/// or year is out of range comes back invalid, carrying the field message
/// ("Semana debe estar entre 01 y 53").
///
/// ```rust
/// use bodega_core::codes::classify;
///
/// assert!(classify("12345678901234").is_valid);
/// assert!(!classify("123").is_valid);
/// assert!(!classify(None::<&str>).is_valid);
///
/// let out_of_range = classify("1002412345678901");
/// assert!(!out_of_range.is_valid);
/// assert_eq!(
///     out_of_range.error_message.as_deref(),
///     Some("Semana debe estar entre 01 y 53")
/// );
/// ```
pub fn classify<'a>(code: impl Into<Option<&'a str>>) -> CodeValidationResult {
    classify_code(code.into()).into()
}

/// Classifies an untyped JSON value. Anything but a string counts as a
/// missing code.
pub fn classify_json(value: &Value) -> CodeValidationResult {
    match value {
        Value::String(code) => classify(code.as_str()),
        _ => CodeValidationResult::invalid(&CodeError::MissingInput),
    }
}

// =============================================================================
// Decoding
// =============================================================================

/// Trims and checks that `code` fits `schema` exactly.
fn prepare<'a>(code: &'a str, schema: &CodeSchema) -> CodeResult<&'a str> {
    let trimmed = code.trim();

    if trimmed.is_empty() {
        return Err(CodeError::EmptyInput);
    }

    schema.check_shape(trimmed)?;
    Ok(trimmed)
}

/// Decodes a 16-digit box code into its ten fields.
///
/// Rejects wrong lengths and non-digits instead of repairing them, and
/// fails on the first of weekday/week/year that is out of range.
pub fn decode_box(code: &str) -> CodeResult<DecodedBoxCode> {
    let digits = prepare(code, &BOX_SCHEMA)?;
    let fields = BOX_SCHEMA.split(digits)?;

    Ok(DecodedBoxCode {
        weekday: fields.take(CodeField::Weekday),
        week: fields.take(CodeField::Week),
        year: fields.take(CodeField::Year),
        operator: fields.take(CodeField::Operator),
        packer: fields.take(CodeField::Packer),
        shift: fields.take(CodeField::Shift),
        caliber: fields.take(CodeField::Caliber),
        format: fields.take(CodeField::Format),
        company: fields.take(CodeField::Company),
        counter: fields.take(CodeField::Counter),
    })
}

fn decode_pallet_with(code: &str, schema: &CodeSchema) -> CodeResult<DecodedPalletCode> {
    let digits = prepare(code, schema)?;
    let fields = schema.split(digits)?;

    Ok(DecodedPalletCode {
        weekday: fields.take(CodeField::Weekday),
        week: fields.take(CodeField::Week),
        year: format!("20{}", fields.get(CodeField::Year)),
        processing_shift: ProcessingShift::from_code(fields.get(CodeField::Shift)),
        caliber: fields.take(CodeField::Caliber),
        box_format: fields.take(CodeField::Format),
        company: fields.take(CodeField::Company),
        counter: fields.take(CodeField::Counter),
    })
}

/// Decodes a 14-digit pallet code into its eight fields.
///
/// The year comes back as four digits ("2045"), and the shift digit
/// becomes Mañana only when it is literally `1`.
///
/// ```rust
/// use bodega_core::codes::decode_pallet;
/// use bodega_core::ProcessingShift;
///
/// let pallet = decode_pallet("31224107101005").unwrap();
/// assert_eq!(pallet.year, "2024");
/// assert_eq!(pallet.processing_shift, ProcessingShift::Morning);
/// assert_eq!(pallet.company, "01");
/// ```
pub fn decode_pallet(code: &str) -> CodeResult<DecodedPalletCode> {
    decode_pallet_with(code, &PALLET_SCHEMA)
}

/// Decodes a pallet label printed with the older 13-digit layout
/// (one-digit company).
///
/// Never chosen automatically: callers that still hold such labels opt in.
pub fn decode_legacy_pallet(code: &str) -> CodeResult<DecodedPalletCode> {
    decode_pallet_with(code, &LEGACY_PALLET_SCHEMA)
}

/// Classifies and decodes in one step.
pub fn decode<'a>(code: impl Into<Option<&'a str>>) -> CodeResult<DecodedCode> {
    let code = code.into();
    match classify_code(code)? {
        CodeKind::Box => decode_box(code.unwrap_or_default()).map(DecodedCode::Box),
        CodeKind::Pallet => decode_pallet(code.unwrap_or_default()).map(DecodedCode::Pallet),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FieldRangeError;
    use proptest::prelude::*;

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize("12-34 56"), "123456");
        assert_eq!(sanitize(" 1234567890123456\r\n"), "1234567890123456");
        assert_eq!(sanitize("abc"), "");
        assert_eq!(sanitize("١٢٣4"), "4"); // non-ASCII digits are stripped
    }

    #[test]
    fn test_shape_checks() {
        assert!(is_box_code("1234567890123456"));
        assert!(is_box_code("  1234567890123456  "));
        assert!(!is_box_code("123456789012345"));
        assert!(!is_box_code("+234567890123456"));
        assert!(!is_box_code("1234567890.23456"));
        assert!(!is_box_code("12345678901234567"));

        assert!(is_pallet_code("12345678901234"));
        assert!(!is_pallet_code("1234567890123"));
        assert!(!is_pallet_code("1234567890123456"));
    }

    #[test]
    fn test_classify_box_and_pallet() {
        assert_eq!(
            classify("1234567890123456"),
            CodeValidationResult::valid(CodeKind::Box)
        );
        assert_eq!(
            classify("12345678901234"),
            CodeValidationResult::valid(CodeKind::Pallet)
        );
        assert_eq!(
            classify("\t12345678901234\n"),
            CodeValidationResult::valid(CodeKind::Pallet)
        );
    }

    #[test]
    fn test_classify_rejections() {
        let result = classify("123");
        assert!(!result.is_valid);
        assert_eq!(result.kind, None);
        assert_eq!(
            result.error_message.as_deref(),
            Some("El código debe ser válido: código de caja (16 dígitos) o código de pallet (14 dígitos)")
        );

        assert_eq!(
            classify_code(Some("")),
            Err(CodeError::EmptyInput)
        );
        assert_eq!(
            classify_code(Some("   ")),
            Err(CodeError::EmptyInput)
        );
        assert_eq!(classify_code(None), Err(CodeError::MissingInput));

        // missing and empty keep distinct messages
        assert_ne!(
            classify(None::<&str>).error_message,
            classify("   ").error_message
        );

        // legacy width is not silently accepted
        assert_eq!(
            classify_code(Some("1234567890123")),
            Err(CodeError::UnrecognizedLength { length: 13 })
        );
    }

    #[test]
    fn test_classify_rejects_out_of_range_fields() {
        let err = classify_code(Some("81234567890123")).unwrap_err();
        assert!(matches!(
            err,
            CodeError::FieldRange(FieldRangeError {
                field: CodeField::Weekday,
                ..
            })
        ));
        assert!(!classify("1004500000000000").is_valid);
    }

    #[test]
    fn test_classify_json() {
        assert!(classify_json(&Value::String("1234567890123456".into())).is_valid);
        let missing = classify_json(&Value::Null);
        assert_eq!(missing.error_message.as_deref(), Some("El código es requerido"));
        assert!(!classify_json(&serde_json::json!(1234567890123456u64)).is_valid);
        assert!(!classify_json(&serde_json::json!(["1234567890123456"])).is_valid);
    }

    #[test]
    fn test_decode_box_fields() {
        let decoded = decode_box("1234567890123456").unwrap();
        assert_eq!(decoded.weekday, "1");
        assert_eq!(decoded.week, "23");
        assert_eq!(decoded.year, "45");
        assert_eq!(decoded.operator, "67");
        assert_eq!(decoded.packer, "8");
        assert_eq!(decoded.shift, "9");
        assert_eq!(decoded.caliber, "01");
        assert_eq!(decoded.format, "2");
        assert_eq!(decoded.company, "3");
        assert_eq!(decoded.counter, "456");
    }

    #[test]
    fn test_decode_box_keeps_leading_zeros() {
        let decoded = decode_box("7012400110111007").unwrap();
        assert_eq!(decoded.week, "01");
        assert_eq!(decoded.operator, "00");
        assert_eq!(decoded.counter, "007");
        assert_eq!(decoded.caliber_grade().map(|c| c.label()), Some("ESPECIAL BCO"));
        assert_eq!(decoded.company_name(), Some("Lomas Altas"));
    }

    #[test]
    fn test_decode_box_range_errors() {
        // weekday 8
        let err = decode_box("8012400000000000").unwrap_err();
        assert_eq!(err.to_string(), "Día de la semana debe estar entre 1 y 7");

        // weekday 0
        let err = decode_box("0012400000000000").unwrap_err();
        assert!(matches!(
            err,
            CodeError::FieldRange(FieldRangeError {
                field: CodeField::Weekday,
                value: 0,
                ..
            })
        ));

        // week 00 and 54
        let err = decode_box("1002400000000000").unwrap_err();
        assert_eq!(err.to_string(), "Semana debe estar entre 01 y 53");
        assert!(decode_box("1542400000000000").is_err());
        assert!(decode_box("1532400000000000").is_ok());
    }

    #[test]
    fn test_decode_box_shape_errors() {
        // 15 digits: length is reported before any field is looked at
        assert_eq!(
            decode_box("801240000000000"),
            Err(CodeError::WrongLength {
                kind: CodeKind::Box,
                expected: 16,
                actual: 15
            })
        );
        assert_eq!(
            decode_box("12345678901234ab"),
            Err(CodeError::NonNumericCharacters)
        );
        assert_eq!(
            decode_box("1234-67890123456"),
            Err(CodeError::NonNumericCharacters)
        );
        assert_eq!(decode_box("  "), Err(CodeError::EmptyInput));
        assert_eq!(
            decode_box("12345678901234").unwrap_err().to_string(),
            "El código debe tener exactamente 16 dígitos (actual: 14)"
        );
    }

    #[test]
    fn test_decode_pallet_fields() {
        let decoded = decode_pallet("12345678901234").unwrap();
        assert_eq!(decoded.weekday, "1");
        assert_eq!(decoded.week, "23");
        assert_eq!(decoded.year, "2045");
        assert_eq!(decoded.processing_shift, ProcessingShift::Afternoon);
        assert_eq!(decoded.caliber, "78");
        assert_eq!(decoded.box_format, "9");
        assert_eq!(decoded.company, "01");
        assert_eq!(decoded.counter, "234");

        let decoded = decode_pallet(" 52200116203999 ").unwrap();
        assert_eq!(decoded.year, "2000");
        assert_eq!(decoded.processing_shift, ProcessingShift::Morning);
        assert_eq!(decoded.caliber, "16");
        assert_eq!(decoded.company, "03");
        assert_eq!(decoded.company_name(), Some("Coliumo"));
    }

    #[test]
    fn test_decode_pallet_range_errors() {
        let err = decode_pallet("81234567890123").unwrap_err();
        assert_eq!(err.to_string(), "Día de la semana debe estar entre 1 y 7");

        let err = decode_pallet("10024178901234").unwrap_err();
        assert_eq!(err.to_string(), "Semana debe estar entre 01 y 53");

        let err = decode_pallet("15424178901234").unwrap_err();
        assert!(matches!(
            err,
            CodeError::FieldRange(FieldRangeError {
                field: CodeField::Week,
                value: 54,
                ..
            })
        ));
    }

    #[test]
    fn test_decode_pallet_rejects_box_length() {
        assert!(matches!(
            decode_pallet("1234567890123456"),
            Err(CodeError::WrongLength {
                kind: CodeKind::Pallet,
                expected: 14,
                actual: 16
            })
        ));
    }

    #[test]
    fn test_decode_legacy_pallet() {
        let decoded = decode_legacy_pallet("1234567890123").unwrap();
        assert_eq!(decoded.year, "2045");
        assert_eq!(decoded.caliber, "78");
        assert_eq!(decoded.box_format, "9");
        assert_eq!(decoded.company, "0");
        assert_eq!(decoded.counter, "123");

        assert!(decode_legacy_pallet("12345678901234").is_err());
        assert!(decode_legacy_pallet("9234567890123").is_err());
    }

    #[test]
    fn test_decode_dispatches_on_kind() {
        assert_eq!(
            decode("1234567890123456").map(|d| d.kind()),
            Ok(CodeKind::Box)
        );
        assert_eq!(
            decode("12345678901234").map(|d| d.kind()),
            Ok(CodeKind::Pallet)
        );
        assert_eq!(decode(None::<&str>), Err(CodeError::MissingInput));
        assert!(matches!(
            decode("123"),
            Err(CodeError::UnrecognizedLength { length: 3 })
        ));
    }

    #[test]
    fn test_decoded_box_serializes_with_label_names() {
        let decoded = decode_box("1234567890123456").unwrap();
        let json = serde_json::to_value(&decoded).unwrap();
        assert_eq!(json["dia"], "1");
        assert_eq!(json["año"], "45");
        assert_eq!(json["empacadora"], "8");
        assert_eq!(json["contador"], "456");
    }

    #[test]
    fn test_decoded_pallet_serializes_shift_label() {
        let decoded = decode_pallet("31224107101005").unwrap();
        let json = serde_json::to_value(&decoded).unwrap();
        assert_eq!(json["horario_proceso"], "Mañana");
        assert_eq!(json["dia_semana"], "3");
        assert_eq!(json["formato_caja"], "1");
    }

    proptest! {
        #[test]
        fn prop_box_and_pallet_never_both(s in "[0-9]{0,20}") {
            prop_assert!(!(is_box_code(&s) && is_pallet_code(&s)));
        }

        #[test]
        fn prop_sanitize_is_idempotent(s in any::<String>()) {
            let once = sanitize(&s);
            prop_assert_eq!(sanitize(&once), once.clone());
            prop_assert!(once.bytes().all(|b| b.is_ascii_digit()));
        }

        #[test]
        fn prop_classify_is_total(s in any::<String>()) {
            let result = classify(s.as_str());
            prop_assert_eq!(result.is_valid, result.kind.is_some());
            prop_assert_eq!(result.is_valid, result.error_message.is_none());
        }

        #[test]
        fn prop_classified_codes_decode(s in "[0-9]{14}|[0-9]{16}") {
            match classify_code(Some(s.as_str())) {
                Ok(CodeKind::Box) => prop_assert!(decode_box(&s).is_ok()),
                Ok(CodeKind::Pallet) => prop_assert!(decode_pallet(&s).is_ok()),
                Err(err) => prop_assert!(
                    matches!(err, CodeError::FieldRange(_)),
                    "right-length digits only fail on ranges, got {:?}",
                    err
                ),
            }
        }

        #[test]
        fn prop_valid_ranges_classify(
            weekday in 1u8..=7,
            week in 1u8..=53,
            rest in "[0-9]{11}",
        ) {
            let code = format!("{}{:02}{}", weekday, week, rest);
            prop_assert_eq!(classify_code(Some(code.as_str())), Ok(CodeKind::Pallet));
        }
    }
}
