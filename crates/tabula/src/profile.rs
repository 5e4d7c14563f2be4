//! Column profiling: dominant type, display width, precision, alignment.
//!
//! A [`ColumnProfile`] aggregates one column's classified cells into the
//! metadata every adapter needs: the consensus [`TypeCode`], the maximum
//! display width (East-Asian-wide characters count as two columns), the
//! maximum fractional precision, and the type-driven default alignment.
//!
//! Profiling is pure and idempotent: the same classified column always
//! yields the same profile.

use std::collections::HashMap;

use serde::Serialize;
use tabula_infer::{ClassifiedValue, TypeCode};

use crate::render::{format_text, RenderPolicy};
use crate::style::{default_align_for, Align, Style};
use crate::util::display_width;

/// Tie-break order for the dominant-type vote: when two type codes tally
/// the same count, the one listed earlier (more specific) wins. Codes
/// outside this table lose every tie.
const TIE_BREAK: [TypeCode; 5] = [
    TypeCode::Integer,
    TypeCode::RealNumber,
    TypeCode::Bool,
    TypeCode::DateTime,
    TypeCode::String,
];

/// Aggregated per-column metadata derived from all cells in the column.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ColumnProfile {
    header: String,
    type_code: TypeCode,
    ascii_width: usize,
    decimal_places: Option<usize>,
    default_align: Align,
}

impl ColumnProfile {
    pub(crate) fn new(
        header: String,
        type_code: TypeCode,
        ascii_width: usize,
        decimal_places: Option<usize>,
    ) -> Self {
        Self {
            header,
            type_code,
            ascii_width,
            decimal_places,
            default_align: default_align_for(type_code),
        }
    }

    /// The column's header text.
    pub fn header(&self) -> &str {
        &self.header
    }

    /// The column's dominant type.
    pub fn type_code(&self) -> TypeCode {
        self.type_code
    }

    /// Display width every cell in the column pads to, margins and
    /// decoration markers included.
    pub fn ascii_width(&self) -> usize {
        self.ascii_width
    }

    /// Maximum fractional digits observed, for uniform numeric formatting.
    pub fn decimal_places(&self) -> Option<usize> {
        self.decimal_places
    }

    /// The alignment `Align::Auto` resolves to for this column.
    pub fn default_align(&self) -> Align {
        self.default_align
    }

    pub(crate) fn set_ascii_width(&mut self, width: usize) {
        self.ascii_width = width;
    }
}

/// Builds [`ColumnProfile`]s from classified columns.
///
/// The standalone profiler measures widths under default formatting (no
/// styles); the pipeline re-measures once per-cell styles are known so
/// separators and decoration markers are charged to the width too.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnProfiler {
    float_formatting: bool,
    min_width: usize,
}

impl Default for ColumnProfiler {
    fn default() -> Self {
        Self {
            float_formatting: true,
            min_width: 0,
        }
    }
}

impl ColumnProfiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pad real-number columns to uniform precision when measuring widths.
    pub fn float_formatting(mut self, on: bool) -> Self {
        self.float_formatting = on;
        self
    }

    /// A floor on every profiled width.
    pub fn min_width(mut self, width: usize) -> Self {
        self.min_width = width;
        self
    }

    /// Profiles one column. Never fails: a column with zero rows yields a
    /// `String`-typed profile whose width is the header's.
    ///
    /// `hinted` records whether a type hint coerced this column's values;
    /// a hinted column's stragglers that fell back to `String` do not drag
    /// the whole column to `String`.
    pub fn profile(
        &self,
        header: &str,
        hinted: bool,
        values: &[ClassifiedValue],
    ) -> ColumnProfile {
        let type_code = dominant_type(values, hinted);
        let decimal_places = max_decimal_places(values);

        let policy = RenderPolicy::new().float_formatting(self.float_formatting);
        let style = Style::new();
        let mut width = display_width(header);
        for value in values {
            let text = format_text(value, type_code, decimal_places, &style, &policy);
            width = width.max(display_width(&text));
        }

        ColumnProfile::new(
            header.to_string(),
            type_code,
            width.max(self.min_width),
            decimal_places,
        )
    }
}

/// Majority vote over non-null cells.
///
/// Empty and all-null columns are `String`. Any plain `String` cell forces
/// `String` unless the column is hinted. Infinity and NaN tally with the
/// real numbers, and a pure integer/real mix resolves to `RealNumber`;
/// remaining ties fall to the [`TIE_BREAK`] order.
fn dominant_type(values: &[ClassifiedValue], hinted: bool) -> TypeCode {
    let mut counts: HashMap<TypeCode, usize> = HashMap::new();
    for value in values {
        if value.is_null() {
            continue;
        }
        let code = match value.type_code() {
            TypeCode::Infinity | TypeCode::Nan => TypeCode::RealNumber,
            other => other,
        };
        *counts.entry(code).or_insert(0) += 1;
    }

    if counts.is_empty() {
        return TypeCode::String;
    }
    if !hinted && counts.contains_key(&TypeCode::String) {
        return TypeCode::String;
    }
    if counts.contains_key(&TypeCode::Integer)
        && counts.contains_key(&TypeCode::RealNumber)
        && counts
            .keys()
            .all(|c| matches!(c, TypeCode::Integer | TypeCode::RealNumber))
    {
        return TypeCode::RealNumber;
    }

    let mut best: Option<(TypeCode, usize)> = None;
    for (code, count) in counts {
        let better = match best {
            None => true,
            Some((best_code, best_count)) => {
                count > best_count
                    || (count == best_count && tie_break_rank(code) < tie_break_rank(best_code))
            }
        };
        if better {
            best = Some((code, count));
        }
    }
    best.map_or(TypeCode::String, |(code, _)| code)
}

fn tie_break_rank(code: TypeCode) -> usize {
    if let Some(pos) = TIE_BREAK.iter().position(|c| *c == code) {
        return pos;
    }
    // Stable order for the codes the table leaves out.
    TIE_BREAK.len()
        + match code {
            TypeCode::IpAddress => 0,
            TypeCode::List => 1,
            TypeCode::Dictionary => 2,
            _ => 3,
        }
}

fn max_decimal_places(values: &[ClassifiedValue]) -> Option<usize> {
    values.iter().filter_map(|v| v.decimal_places()).max()
}
