//! Total classification of raw values into typed, normalized cells.
//!
//! [`classify`] never fails: every [`RawValue`] maps to exactly one
//! [`TypeCode`] plus a canonical display string, with `String` as the
//! fallback for anything that matches no stricter rule. All infinity
//! spellings collapse to one token, as do all NaN spellings, so a value
//! round-trips identically no matter how the caller produced it.

use std::net::IpAddr;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::datetime;
use crate::hint::{self, TypeHint};
use crate::typecode::TypeCode;
use crate::value::RawValue;

const INFINITY_TOKEN: &str = "Infinity";
const NAN_TOKEN: &str = "NaN";

/// Integer literals too large for `i64` still classify as integers.
static BIG_INT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?[0-9]+$").expect("valid integer pattern"));

/// A raw value together with its decided type and canonical display form.
///
/// Created once per cell during preprocessing and never mutated. The
/// normalized string is what rendering starts from; the raw value is kept so
/// substitution maps can key on the source (for example mapping `true` to
/// `"yes"`).
#[derive(Clone, Debug, PartialEq)]
pub struct ClassifiedValue {
    raw: RawValue,
    type_code: TypeCode,
    normalized: String,
    decimal_places: Option<usize>,
}

impl ClassifiedValue {
    pub(crate) fn new(
        raw: RawValue,
        type_code: TypeCode,
        normalized: String,
        decimal_places: Option<usize>,
    ) -> Self {
        Self {
            raw,
            type_code,
            normalized,
            decimal_places,
        }
    }

    /// The source value this classification was made from.
    pub fn raw(&self) -> &RawValue {
        &self.raw
    }

    /// The decided semantic type.
    pub fn type_code(&self) -> TypeCode {
        self.type_code
    }

    /// Canonical display form, before any column-level formatting.
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// Number of fractional digits in the normalized form, for real numbers.
    pub fn decimal_places(&self) -> Option<usize> {
        self.decimal_places
    }

    /// Returns `true` when the value is absent (`Nothing` or `NullString`).
    pub fn is_null(&self) -> bool {
        self.type_code.is_null()
    }
}

/// Classifies a raw value. Total: every input yields a classification.
pub fn classify(raw: &RawValue) -> ClassifiedValue {
    let (type_code, normalized, decimal_places) = match raw {
        RawValue::None => (TypeCode::Nothing, String::new(), None),
        RawValue::Bool(b) => (TypeCode::Bool, b.to_string(), None),
        RawValue::Int(n) => (TypeCode::Integer, n.to_string(), None),
        RawValue::Float(f) => classify_float(*f),
        RawValue::Str(s) => classify_str(s),
        RawValue::Date(d) => (TypeCode::DateTime, datetime::format_date(*d), None),
        RawValue::DateTime(dt) => (TypeCode::DateTime, datetime::format_datetime(*dt), None),
        RawValue::List(_) => (TypeCode::List, json_repr(raw), None),
        RawValue::Dict(_) => (TypeCode::Dictionary, json_repr(raw), None),
    };
    ClassifiedValue::new(raw.clone(), type_code, normalized, decimal_places)
}

/// Classifies a raw value under an optional forced type.
///
/// A hint that cannot coerce the value falls back to automatic
/// classification for that one value; this is never an error. Callers can
/// detect the fallback by comparing the result's type code against
/// [`TypeHint::target_code`].
pub fn classify_with_hint(raw: &RawValue, type_hint: Option<TypeHint>) -> ClassifiedValue {
    match type_hint {
        Some(wanted) => hint::coerce(raw, wanted).unwrap_or_else(|| classify(raw)),
        None => classify(raw),
    }
}

fn classify_float(f: f64) -> (TypeCode, String, Option<usize>) {
    if f.is_nan() {
        return (TypeCode::Nan, NAN_TOKEN.to_string(), None);
    }
    if f.is_infinite() {
        let token = if f.is_sign_negative() {
            format!("-{INFINITY_TOKEN}")
        } else {
            INFINITY_TOKEN.to_string()
        };
        return (TypeCode::Infinity, token, None);
    }
    let text = canonical_float(f);
    let decimals = count_decimals(&text);
    (TypeCode::RealNumber, text, Some(decimals))
}

fn classify_str(s: &str) -> (TypeCode, String, Option<usize>) {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return (TypeCode::NullString, String::new(), None);
    }

    if trimmed.eq_ignore_ascii_case("true") {
        return (TypeCode::Bool, "true".to_string(), None);
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return (TypeCode::Bool, "false".to_string(), None);
    }

    let (sign, unsigned) = split_sign(trimmed);
    if unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity") {
        let token = if sign == "-" {
            format!("-{INFINITY_TOKEN}")
        } else {
            INFINITY_TOKEN.to_string()
        };
        return (TypeCode::Infinity, token, None);
    }
    if unsigned.eq_ignore_ascii_case("nan") {
        return (TypeCode::Nan, NAN_TOKEN.to_string(), None);
    }

    if let Ok(n) = trimmed.parse::<i64>() {
        return (TypeCode::Integer, n.to_string(), None);
    }
    if BIG_INT.is_match(trimmed) {
        return (TypeCode::Integer, canonical_int_text(trimmed), None);
    }

    if is_real_literal(trimmed) {
        let text = canonical_real_text(trimmed);
        let decimals = count_decimals(&text);
        return (TypeCode::RealNumber, text, Some(decimals));
    }

    if let Ok(addr) = trimmed.parse::<IpAddr>() {
        return (TypeCode::IpAddress, addr.to_string(), None);
    }

    if datetime::parse_temporal(trimmed).is_some() {
        // The source spelling is the display form; a type hint is what
        // forces re-formatting.
        return (TypeCode::DateTime, trimmed.to_string(), None);
    }

    (TypeCode::String, s.to_string(), None)
}

fn split_sign(s: &str) -> (&str, &str) {
    if let Some(rest) = s.strip_prefix('-') {
        ("-", rest)
    } else if let Some(rest) = s.strip_prefix('+') {
        ("", rest)
    } else {
        ("", s)
    }
}

/// A text real literal: parses as a finite float and carries a digit. The
/// integer path has already claimed plain digit runs by this point.
pub(crate) fn is_real_literal(s: &str) -> bool {
    match s.parse::<f64>() {
        Ok(f) => f.is_finite() && s.bytes().any(|b| b.is_ascii_digit()),
        Err(_) => false,
    }
}

/// Canonical form of a finite float. Whole floats keep one fractional digit
/// so `3.0` stays distinguishable from the integer `3`.
pub(crate) fn canonical_float(f: f64) -> String {
    if f.fract() == 0.0 && f.abs() < 1e16 {
        format!("{:.1}", f)
    } else {
        f.to_string()
    }
}

/// Canonical form of a real-number text literal. The source digits are kept
/// (no float round-trip), so arbitrary-precision decimals survive; only the
/// redundant leading `+` and a bare leading dot are tidied.
pub(crate) fn canonical_real_text(s: &str) -> String {
    let (sign, unsigned) = split_sign(s);
    if let Some(rest) = unsigned.strip_prefix('.') {
        return format!("{sign}0.{rest}");
    }
    format!("{sign}{unsigned}")
}

fn canonical_int_text(s: &str) -> String {
    let (sign, unsigned) = split_sign(s);
    let digits = unsigned.trim_start_matches('0');
    if digits.is_empty() {
        return "0".to_string();
    }
    format!("{sign}{digits}")
}

/// Counts fractional digits: consecutive ASCII digits after the first dot.
pub(crate) fn count_decimals(s: &str) -> usize {
    match s.find('.') {
        Some(pos) => s[pos + 1..]
            .bytes()
            .take_while(|b| b.is_ascii_digit())
            .count(),
        None => 0,
    }
}

fn json_repr(raw: &RawValue) -> String {
    let json = serde_json::Value::from(raw);
    json.to_string()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn any_string_classifies(s in ".*") {
            let cv = classify(&RawValue::from(s.as_str()));
            // Totality: always some code, and integer claims really parse.
            if cv.type_code() == TypeCode::Integer {
                prop_assert!(BIG_INT.is_match(cv.normalized()));
            }
            if cv.type_code() == TypeCode::NullString {
                prop_assert_eq!(cv.normalized(), "");
            }
        }

        #[test]
        fn any_float_classifies(f in proptest::num::f64::ANY) {
            let cv = classify(&RawValue::Float(f));
            if f.is_nan() {
                prop_assert_eq!(cv.type_code(), TypeCode::Nan);
                prop_assert_eq!(cv.normalized(), "NaN");
            } else if f.is_infinite() {
                prop_assert_eq!(cv.type_code(), TypeCode::Infinity);
            } else {
                prop_assert_eq!(cv.type_code(), TypeCode::RealNumber);
                prop_assert!(cv.decimal_places().is_some());
            }
        }

        #[test]
        fn integers_round_trip(n in proptest::num::i64::ANY) {
            let cv = classify(&RawValue::Int(n));
            prop_assert_eq!(cv.normalized(), n.to_string());
            let via_text = classify(&RawValue::from(n.to_string()));
            prop_assert_eq!(via_text.type_code(), TypeCode::Integer);
            prop_assert_eq!(via_text.normalized(), n.to_string());
        }

        #[test]
        fn classification_is_deterministic(s in ".*") {
            let raw = RawValue::from(s.as_str());
            prop_assert_eq!(classify(&raw), classify(&raw));
        }
    }
}
