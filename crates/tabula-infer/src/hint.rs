//! Forced type conversion for hinted columns.
//!
//! A [`TypeHint`] asks for a column to be read as one specific type. Hints
//! are best-effort per value: [`coerce`] returns `None` whenever the value
//! cannot honestly be read as the hinted type, and the caller falls back to
//! automatic classification for that cell.

use serde::{Deserialize, Serialize};

use crate::classify::{self, ClassifiedValue};
use crate::datetime;
use crate::typecode::TypeCode;
use crate::value::RawValue;

/// Requested column type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeHint {
    Bool,
    Integer,
    RealNumber,
    String,
    DateTime,
}

impl TypeHint {
    /// The type code a successful coercion produces.
    pub fn target_code(&self) -> TypeCode {
        match self {
            TypeHint::Bool => TypeCode::Bool,
            TypeHint::Integer => TypeCode::Integer,
            TypeHint::RealNumber => TypeCode::RealNumber,
            TypeHint::String => TypeCode::String,
            TypeHint::DateTime => TypeCode::DateTime,
        }
    }
}

/// Attempts to read `raw` as the hinted type.
///
/// Absent values are never coerced: a null stays a null whatever the column
/// hint says.
pub(crate) fn coerce(raw: &RawValue, hint: TypeHint) -> Option<ClassifiedValue> {
    match hint {
        TypeHint::Integer => coerce_integer(raw),
        TypeHint::RealNumber => coerce_real(raw),
        TypeHint::Bool => coerce_bool(raw),
        TypeHint::DateTime => coerce_datetime(raw),
        TypeHint::String => coerce_string(raw),
    }
}

fn coerce_integer(raw: &RawValue) -> Option<ClassifiedValue> {
    match raw {
        RawValue::Int(_) => Some(classify::classify(raw)),
        RawValue::Float(f) => {
            if !f.is_finite() || f.fract() != 0.0 {
                return None;
            }
            let n = *f as i64;
            // The cast must round-trip, otherwise the float is out of range.
            if (n as f64) != *f {
                return None;
            }
            Some(ClassifiedValue::new(
                raw.clone(),
                TypeCode::Integer,
                n.to_string(),
                None,
            ))
        }
        RawValue::Str(_) => {
            let cv = classify::classify(raw);
            (cv.type_code() == TypeCode::Integer).then_some(cv)
        }
        _ => None,
    }
}

fn coerce_real(raw: &RawValue) -> Option<ClassifiedValue> {
    match raw {
        RawValue::Int(n) => Some(ClassifiedValue::new(
            raw.clone(),
            TypeCode::RealNumber,
            format!("{n}.0"),
            Some(1),
        )),
        RawValue::Float(f) if f.is_finite() => Some(classify::classify(raw)),
        RawValue::Str(_) => {
            let cv = classify::classify(raw);
            match cv.type_code() {
                TypeCode::RealNumber => Some(cv),
                TypeCode::Integer => {
                    let widened = format!("{}.0", cv.normalized());
                    Some(ClassifiedValue::new(
                        raw.clone(),
                        TypeCode::RealNumber,
                        widened,
                        Some(1),
                    ))
                }
                _ => None,
            }
        }
        _ => None,
    }
}

fn coerce_bool(raw: &RawValue) -> Option<ClassifiedValue> {
    match raw {
        RawValue::Bool(_) => Some(classify::classify(raw)),
        RawValue::Str(_) => {
            let cv = classify::classify(raw);
            (cv.type_code() == TypeCode::Bool).then_some(cv)
        }
        // Numeric 0/1 stay numeric even under a bool hint.
        _ => None,
    }
}

fn coerce_datetime(raw: &RawValue) -> Option<ClassifiedValue> {
    match raw {
        RawValue::Date(_) | RawValue::DateTime(_) => Some(classify::classify(raw)),
        RawValue::Str(s) => datetime::parse_temporal(s.trim()).map(|t| {
            // A hint forces re-formatting of the source spelling.
            ClassifiedValue::new(raw.clone(), TypeCode::DateTime, t.canonical(), None)
        }),
        _ => None,
    }
}

fn coerce_string(raw: &RawValue) -> Option<ClassifiedValue> {
    let cv = classify::classify(raw);
    if cv.is_null() {
        return None;
    }
    Some(ClassifiedValue::new(
        raw.clone(),
        TypeCode::String,
        cv.normalized().to_string(),
        None,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify_with_hint;
    use chrono::NaiveDate;

    #[test]
    fn integer_hint_narrows_whole_floats() {
        let cv = classify_with_hint(&RawValue::Float(3.0), Some(TypeHint::Integer));
        assert_eq!(cv.type_code(), TypeCode::Integer);
        assert_eq!(cv.normalized(), "3");
    }

    #[test]
    fn integer_hint_falls_back_on_fractions() {
        let cv = classify_with_hint(&RawValue::Float(2.5), Some(TypeHint::Integer));
        assert_eq!(cv.type_code(), TypeCode::RealNumber);
        assert_eq!(cv.normalized(), "2.5");
    }

    #[test]
    fn integer_hint_falls_back_on_text() {
        let cv = classify_with_hint(&RawValue::from("abc"), Some(TypeHint::Integer));
        assert_eq!(cv.type_code(), TypeCode::String);
        assert_eq!(cv.normalized(), "abc");
    }

    #[test]
    fn real_hint_widens_integers() {
        let cv = classify_with_hint(&RawValue::Int(5), Some(TypeHint::RealNumber));
        assert_eq!(cv.type_code(), TypeCode::RealNumber);
        assert_eq!(cv.normalized(), "5.0");
        assert_eq!(cv.decimal_places(), Some(1));

        let text = classify_with_hint(&RawValue::from("7"), Some(TypeHint::RealNumber));
        assert_eq!(text.normalized(), "7.0");
    }

    #[test]
    fn real_hint_leaves_infinity_to_classification() {
        let cv = classify_with_hint(&RawValue::Float(f64::INFINITY), Some(TypeHint::RealNumber));
        assert_eq!(cv.type_code(), TypeCode::Infinity);
        assert_eq!(cv.normalized(), "Infinity");
    }

    #[test]
    fn bool_hint_rejects_numbers() {
        let cv = classify_with_hint(&RawValue::Int(1), Some(TypeHint::Bool));
        assert_eq!(cv.type_code(), TypeCode::Integer);
    }

    #[test]
    fn bool_hint_accepts_tokens() {
        let cv = classify_with_hint(&RawValue::from("TRUE"), Some(TypeHint::Bool));
        assert_eq!(cv.type_code(), TypeCode::Bool);
        assert_eq!(cv.normalized(), "true");
    }

    #[test]
    fn datetime_hint_reformats_source_text() {
        let cv = classify_with_hint(
            &RawValue::from("2024-01-29T10:30:00"),
            Some(TypeHint::DateTime),
        );
        assert_eq!(cv.type_code(), TypeCode::DateTime);
        assert_eq!(cv.normalized(), "2024-01-29 10:30:00");
    }

    #[test]
    fn datetime_hint_passes_native_values_through() {
        let d = NaiveDate::from_ymd_opt(2024, 1, 29).unwrap();
        let cv = classify_with_hint(&RawValue::Date(d), Some(TypeHint::DateTime));
        assert_eq!(cv.normalized(), "2024-01-29");
    }

    #[test]
    fn string_hint_keeps_canonical_text() {
        let cv = classify_with_hint(&RawValue::Float(3.0), Some(TypeHint::String));
        assert_eq!(cv.type_code(), TypeCode::String);
        assert_eq!(cv.normalized(), "3.0");
        assert_eq!(cv.decimal_places(), None);
    }

    #[test]
    fn hints_never_touch_nulls() {
        let cv = classify_with_hint(&RawValue::None, Some(TypeHint::String));
        assert_eq!(cv.type_code(), TypeCode::Nothing);
        let empty = classify_with_hint(&RawValue::from("  "), Some(TypeHint::String));
        assert_eq!(empty.type_code(), TypeCode::NullString);
    }
}
