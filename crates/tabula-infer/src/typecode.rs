//! Semantic type codes assigned to classified cell values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The semantic type of a single cell value, as decided by classification.
///
/// Every value receives exactly one code; classification is total and never
/// fails. `String` is the fallback for anything that matches no stricter
/// code, which makes it the natural default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeCode {
    /// Absent value (a source-level null).
    Nothing,
    /// Boolean value.
    Bool,
    /// Integer value, native or parsed from text.
    Integer,
    /// Finite floating-point or decimal value.
    RealNumber,
    /// Positive or negative infinity.
    Infinity,
    /// Not-a-number.
    Nan,
    /// Plain text, and the fallback for everything unclassifiable.
    #[default]
    String,
    /// Empty or whitespace-only text.
    NullString,
    /// Calendar date or date-time value.
    DateTime,
    /// Key-value mapping.
    Dictionary,
    /// Sequence of values.
    List,
    /// IPv4 or IPv6 address.
    IpAddress,
}

impl TypeCode {
    /// Returns `true` for the two numeric codes, `Integer` and `RealNumber`.
    ///
    /// `Infinity` and `Nan` are deliberately excluded: they render as tokens,
    /// not as formatted numbers.
    pub fn is_number(&self) -> bool {
        matches!(self, TypeCode::Integer | TypeCode::RealNumber)
    }

    /// Returns `true` for the two absent-value codes, `Nothing` and
    /// `NullString`.
    pub fn is_null(&self) -> bool {
        matches!(self, TypeCode::Nothing | TypeCode::NullString)
    }

    /// Stable lowercase name, matching the serde representation.
    pub fn name(&self) -> &'static str {
        match self {
            TypeCode::Nothing => "nothing",
            TypeCode::Bool => "bool",
            TypeCode::Integer => "integer",
            TypeCode::RealNumber => "real_number",
            TypeCode::Infinity => "infinity",
            TypeCode::Nan => "nan",
            TypeCode::String => "string",
            TypeCode::NullString => "null_string",
            TypeCode::DateTime => "date_time",
            TypeCode::Dictionary => "dictionary",
            TypeCode::List => "list",
            TypeCode::IpAddress => "ip_address",
        }
    }
}

impl fmt::Display for TypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
