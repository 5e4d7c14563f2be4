//! Raw cell values as accepted from callers.
//!
//! [`RawValue`] is the owned, heterogeneous input type of the pipeline. It is
//! deliberately permissive: anything a row can contain becomes one of these
//! variants, and classification decides later what the value means.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};

/// A single untyped cell value.
///
/// Values are immutable once accepted: the pipeline reads them, classifies
/// them, and renders from the classification, but never rewrites the source
/// data.
///
/// # Example
///
/// ```
/// use tabula_infer::RawValue;
///
/// let row: Vec<RawValue> = vec![
///     1.into(),
///     "2.5".into(),
///     RawValue::None,
///     true.into(),
/// ];
/// assert!(row[2].is_none());
/// assert_eq!(row[3].as_bool(), Some(true));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum RawValue {
    /// Absent value.
    None,
    /// Boolean.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Floating point, possibly non-finite.
    Float(f64),
    /// Text.
    Str(String),
    /// Calendar date without a time component.
    Date(NaiveDate),
    /// Date and time, timezone-naive.
    DateTime(NaiveDateTime),
    /// Sequence of nested values.
    List(Vec<RawValue>),
    /// Mapping of string keys to nested values.
    Dict(BTreeMap<String, RawValue>),
}

impl RawValue {
    /// Returns `true` if this is the absent value.
    pub fn is_none(&self) -> bool {
        matches!(self, RawValue::None)
    }

    /// Extracts the boolean, if present.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            RawValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Extracts the integer, if present.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            RawValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Extracts the float, if present.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            RawValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Extracts the text, if present.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            RawValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Short variant name for diagnostics.
    pub fn variant_name(&self) -> &'static str {
        match self {
            RawValue::None => "none",
            RawValue::Bool(_) => "bool",
            RawValue::Int(_) => "int",
            RawValue::Float(_) => "float",
            RawValue::Str(_) => "str",
            RawValue::Date(_) => "date",
            RawValue::DateTime(_) => "datetime",
            RawValue::List(_) => "list",
            RawValue::Dict(_) => "dict",
        }
    }
}

// Conversions from primitive types

impl From<bool> for RawValue {
    fn from(b: bool) -> Self {
        RawValue::Bool(b)
    }
}

impl From<i8> for RawValue {
    fn from(n: i8) -> Self {
        RawValue::Int(n as i64)
    }
}

impl From<i16> for RawValue {
    fn from(n: i16) -> Self {
        RawValue::Int(n as i64)
    }
}

impl From<i32> for RawValue {
    fn from(n: i32) -> Self {
        RawValue::Int(n as i64)
    }
}

impl From<i64> for RawValue {
    fn from(n: i64) -> Self {
        RawValue::Int(n)
    }
}

impl From<u8> for RawValue {
    fn from(n: u8) -> Self {
        RawValue::Int(n as i64)
    }
}

impl From<u16> for RawValue {
    fn from(n: u16) -> Self {
        RawValue::Int(n as i64)
    }
}

impl From<u32> for RawValue {
    fn from(n: u32) -> Self {
        RawValue::Int(n as i64)
    }
}

impl From<u64> for RawValue {
    /// Values above `i64::MAX` are kept as their decimal text so no
    /// precision is lost; they still classify as integers.
    fn from(n: u64) -> Self {
        match i64::try_from(n) {
            Ok(v) => RawValue::Int(v),
            Err(_) => RawValue::Str(n.to_string()),
        }
    }
}

impl From<usize> for RawValue {
    fn from(n: usize) -> Self {
        RawValue::from(n as u64)
    }
}

impl From<isize> for RawValue {
    fn from(n: isize) -> Self {
        RawValue::Int(n as i64)
    }
}

impl From<f32> for RawValue {
    fn from(f: f32) -> Self {
        RawValue::Float(f as f64)
    }
}

impl From<f64> for RawValue {
    fn from(f: f64) -> Self {
        RawValue::Float(f)
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Str(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::Str(s)
    }
}

impl From<NaiveDate> for RawValue {
    fn from(d: NaiveDate) -> Self {
        RawValue::Date(d)
    }
}

impl From<NaiveDateTime> for RawValue {
    fn from(dt: NaiveDateTime) -> Self {
        RawValue::DateTime(dt)
    }
}

impl<T: Into<RawValue>> From<Option<T>> for RawValue {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => RawValue::None,
        }
    }
}

impl<T: Into<RawValue>> From<Vec<T>> for RawValue {
    fn from(items: Vec<T>) -> Self {
        RawValue::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<serde_json::Value> for RawValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => RawValue::None,
            serde_json::Value::Bool(b) => RawValue::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    RawValue::Int(i)
                } else if let Some(u) = n.as_u64() {
                    RawValue::from(u)
                } else {
                    RawValue::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => RawValue::Str(s),
            serde_json::Value::Array(items) => {
                RawValue::List(items.into_iter().map(RawValue::from).collect())
            }
            serde_json::Value::Object(map) => RawValue::Dict(
                map.into_iter()
                    .map(|(k, v)| (k, RawValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&RawValue> for serde_json::Value {
    /// JSON projection used when rendering nested lists and dictionaries.
    ///
    /// Non-finite floats have no JSON representation and become `null`.
    fn from(value: &RawValue) -> Self {
        match value {
            RawValue::None => serde_json::Value::Null,
            RawValue::Bool(b) => serde_json::Value::Bool(*b),
            RawValue::Int(n) => serde_json::Value::from(*n),
            RawValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            RawValue::Str(s) => serde_json::Value::String(s.clone()),
            RawValue::Date(d) => serde_json::Value::String(d.format("%Y-%m-%d").to_string()),
            RawValue::DateTime(dt) => {
                serde_json::Value::String(dt.format("%Y-%m-%d %H:%M:%S").to_string())
            }
            RawValue::List(items) => {
                serde_json::Value::Array(items.iter().map(serde_json::Value::from).collect())
            }
            RawValue::Dict(map) => serde_json::Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), serde_json::Value::from(v)))
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitive_conversions() {
        assert_eq!(RawValue::from(42i32), RawValue::Int(42));
        assert_eq!(RawValue::from(42u8), RawValue::Int(42));
        assert_eq!(RawValue::from(2.5f64), RawValue::Float(2.5));
        assert_eq!(RawValue::from(true), RawValue::Bool(true));
        assert_eq!(RawValue::from("abc"), RawValue::Str("abc".to_string()));
    }

    #[test]
    fn u64_beyond_i64_keeps_decimal_text() {
        let v = RawValue::from(u64::MAX);
        assert_eq!(v, RawValue::Str(u64::MAX.to_string()));
        let fits = RawValue::from(7u64);
        assert_eq!(fits, RawValue::Int(7));
    }

    #[test]
    fn option_conversion() {
        assert_eq!(RawValue::from(Some(5i64)), RawValue::Int(5));
        assert_eq!(RawValue::from(None::<i64>), RawValue::None);
    }

    #[test]
    fn vec_conversion() {
        let v = RawValue::from(vec![1i64, 2, 3]);
        assert_eq!(
            v,
            RawValue::List(vec![RawValue::Int(1), RawValue::Int(2), RawValue::Int(3)])
        );
    }

    #[test]
    fn json_roundtrip_scalars() {
        let json = serde_json::json!({"a": 1, "b": "x", "c": null, "d": 2.5});
        let v = RawValue::from(json);
        match v {
            RawValue::Dict(map) => {
                assert_eq!(map["a"], RawValue::Int(1));
                assert_eq!(map["b"], RawValue::Str("x".to_string()));
                assert_eq!(map["c"], RawValue::None);
                assert_eq!(map["d"], RawValue::Float(2.5));
            }
            other => panic!("expected dict, got {:?}", other),
        }
    }

    #[test]
    fn json_projection_of_nested_values() {
        let v = RawValue::List(vec![RawValue::Int(1), RawValue::Str("x".to_string())]);
        let json = serde_json::Value::from(&v);
        assert_eq!(serde_json::to_string(&json).unwrap(), r#"[1,"x"]"#);
    }

    #[test]
    fn accessors() {
        assert_eq!(RawValue::Int(3).as_int(), Some(3));
        assert_eq!(RawValue::Int(3).as_float(), None);
        assert_eq!(RawValue::Str("s".to_string()).as_str(), Some("s"));
        assert!(RawValue::None.is_none());
    }
}
