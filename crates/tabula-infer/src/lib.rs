//! Tabula Infer - Total type classification for heterogeneous tabular values.
//!
//! Table data arrives as untyped cells: native numbers next to numeric
//! strings, booleans spelled three ways, dates as text, nulls as `None` or
//! `""`. This crate decides what each cell means. Classification is total —
//! every value receives exactly one [`TypeCode`] plus a canonical display
//! string, falling back to `String` rather than failing.
//!
//! # Quick Start
//!
//! ```rust
//! use tabula_infer::{classify, RawValue, TypeCode};
//!
//! let cv = classify(&RawValue::from("2.5"));
//! assert_eq!(cv.type_code(), TypeCode::RealNumber);
//! assert_eq!(cv.normalized(), "2.5");
//! assert_eq!(cv.decimal_places(), Some(1));
//!
//! // Every infinity spelling collapses to one canonical token.
//! for v in [RawValue::from("inf"), RawValue::from("Infinity"), RawValue::Float(f64::INFINITY)] {
//!     assert_eq!(classify(&v).normalized(), "Infinity");
//! }
//! ```
//!
//! # Type Hints
//!
//! A column can be forced to a type with [`TypeHint`]. Hints are best-effort
//! per value: a cell that cannot be read as the hinted type silently falls
//! back to automatic classification instead of raising an error.
//!
//! ```rust
//! use tabula_infer::{classify_with_hint, RawValue, TypeCode, TypeHint};
//!
//! let cv = classify_with_hint(&RawValue::Int(5), Some(TypeHint::RealNumber));
//! assert_eq!(cv.normalized(), "5.0");
//!
//! let fallback = classify_with_hint(&RawValue::from("abc"), Some(TypeHint::Integer));
//! assert_eq!(fallback.type_code(), TypeCode::String);
//! ```
//!
//! # Classification Rules
//!
//! | Input | Code |
//! |-------|------|
//! | `None`, empty/whitespace text | `Nothing` / `NullString` |
//! | `true`/`false` (any case) | `Bool` |
//! | Integer literals, any magnitude | `Integer` |
//! | Finite floats, decimal/exponent text | `RealNumber` |
//! | `inf`/`infinity` (signed), non-finite floats | `Infinity` / `Nan` |
//! | ISO-8601-like text, native dates | `DateTime` |
//! | IPv4/IPv6 text | `IpAddress` |
//! | Sequences and mappings | `List` / `Dictionary` |
//! | Everything else | `String` |

mod classify;
mod datetime;
mod hint;
mod typecode;
mod value;

// Re-export public API
pub use classify::{classify, classify_with_hint, ClassifiedValue};
pub use datetime::{format_date, format_datetime, parse_temporal, Temporal};
pub use hint::TypeHint;
pub use typecode::TypeCode;
pub use value::RawValue;
