//! Cell rendering: numeric formatting, substitution, padding, decoration.
//!
//! [`render_cell`] turns one classified value into its final display string:
//!
//! 1. format the bare text (null/bool/inf/nan substitution via [`ValueMap`],
//!    uniform decimal padding, thousand separators),
//! 2. pad to the column width under the effective alignment,
//! 3. wrap in decoration markers ([`Decorations`]), whose width the column
//!    profile already charged,
//! 4. add the cell margin.
//!
//! Rendering never fails. A cell whose classification disagrees with its
//! column (a string that would not coerce under a type hint, say) skips the
//! numeric path and renders its normalized form as-is.
//!
//! [`Decorations`]: crate::style::Decorations

use serde::{Deserialize, Serialize};
use tabula_infer::{ClassifiedValue, TypeCode};

use crate::profile::ColumnProfile;
use crate::style::{Align, Decorations, Style};
use crate::util::{pad_center, pad_left, pad_right};

/// Display substitutions for values with no natural text form.
///
/// Absent values render as the empty string unless a substitution is set;
/// booleans and the non-finite tokens can be remapped per output convention
/// (`"yes"`/`"no"`, `"∞"`, `"-"`).
///
/// ```rust
/// use tabula::ValueMap;
///
/// let map = ValueMap::new().none("N/A").bool_true("yes").bool_false("no");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValueMap {
    pub none: Option<String>,
    pub infinity: Option<String>,
    pub nan: Option<String>,
    pub bool_true: Option<String>,
    pub bool_false: Option<String>,
}

impl ValueMap {
    /// Creates a map with no substitutions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Substitution for absent (`Nothing`) values.
    pub fn none(mut self, text: impl Into<String>) -> Self {
        self.none = Some(text.into());
        self
    }

    /// Substitution for infinity values (replaces the whole token, sign
    /// included).
    pub fn infinity(mut self, text: impl Into<String>) -> Self {
        self.infinity = Some(text.into());
        self
    }

    /// Substitution for NaN values.
    pub fn nan(mut self, text: impl Into<String>) -> Self {
        self.nan = Some(text.into());
        self
    }

    /// Substitution for boolean `true`.
    pub fn bool_true(mut self, text: impl Into<String>) -> Self {
        self.bool_true = Some(text.into());
        self
    }

    /// Substitution for boolean `false`.
    pub fn bool_false(mut self, text: impl Into<String>) -> Self {
        self.bool_false = Some(text.into());
        self
    }
}

/// Column-independent rendering settings shared by a whole table.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderPolicy {
    /// Pad real-number columns to a uniform number of fractional digits.
    /// When off, every value keeps its natural precision.
    pub float_formatting: bool,
    /// Display substitutions for nulls, booleans, and non-finite numbers.
    pub value_map: ValueMap,
    /// Literal marker pairs for bold/italic/underline/strike-through.
    pub decorations: Decorations,
    /// Spaces added inside each cell on both sides, after decoration.
    pub margin: usize,
}

impl Default for RenderPolicy {
    fn default() -> Self {
        Self {
            float_formatting: true,
            value_map: ValueMap::default(),
            decorations: Decorations::none(),
            margin: 0,
        }
    }
}

impl RenderPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn float_formatting(mut self, on: bool) -> Self {
        self.float_formatting = on;
        self
    }

    pub fn value_map(mut self, map: ValueMap) -> Self {
        self.value_map = map;
        self
    }

    pub fn decorations(mut self, decorations: Decorations) -> Self {
        self.decorations = decorations;
        self
    }

    pub fn margin(mut self, margin: usize) -> Self {
        self.margin = margin;
        self
    }
}

/// Renders one cell to its final display string, padded to the column width
/// under the effective alignment (`Auto` resolves to the profile's default).
pub fn render_cell(
    value: &ClassifiedValue,
    profile: &ColumnProfile,
    style: &Style,
    policy: &RenderPolicy,
) -> String {
    render_aligned(value, profile, style, policy, profile.default_align())
}

/// Like [`render_cell`] but with an explicit fallback for `Align::Auto`.
/// Header cells center by default instead of following the column type.
pub(crate) fn render_aligned(
    value: &ClassifiedValue,
    profile: &ColumnProfile,
    style: &Style,
    policy: &RenderPolicy,
    fallback_align: Align,
) -> String {
    let text = format_text(
        value,
        profile.type_code(),
        profile.decimal_places(),
        style,
        policy,
    );
    let align = match style.align.unwrap_or(Align::Auto) {
        Align::Auto => fallback_align,
        explicit => explicit,
    };
    let overhead = policy.decorations.overhead(style);
    let target = profile
        .ascii_width()
        .saturating_sub(overhead + 2 * policy.margin);
    let padded = match align {
        Align::Right => pad_left(&text, target),
        Align::Center => pad_center(&text, target),
        Align::Left | Align::Auto => pad_right(&text, target),
    };
    let decorated = policy.decorations.apply(&padded, style);
    if policy.margin == 0 {
        decorated
    } else {
        let margin = " ".repeat(policy.margin);
        format!("{margin}{decorated}{margin}")
    }
}

/// The unpadded display text for one cell; the width pass measures exactly
/// this, so profile widths and rendered widths agree.
pub(crate) fn format_text(
    value: &ClassifiedValue,
    column_type: TypeCode,
    column_decimals: Option<usize>,
    style: &Style,
    policy: &RenderPolicy,
) -> String {
    let map = &policy.value_map;
    match value.type_code() {
        TypeCode::Nothing => map.none.clone().unwrap_or_default(),
        TypeCode::NullString => String::new(),
        TypeCode::Bool => {
            let mapped = if value.normalized() == "true" {
                map.bool_true.as_deref()
            } else {
                map.bool_false.as_deref()
            };
            mapped.unwrap_or(value.normalized()).to_string()
        }
        TypeCode::Infinity => map
            .infinity
            .clone()
            .unwrap_or_else(|| value.normalized().to_string()),
        TypeCode::Nan => map
            .nan
            .clone()
            .unwrap_or_else(|| value.normalized().to_string()),
        TypeCode::Integer | TypeCode::RealNumber => {
            format_number(value, column_type, column_decimals, style, policy)
        }
        _ => value.normalized().to_string(),
    }
}

fn format_number(
    value: &ClassifiedValue,
    column_type: TypeCode,
    column_decimals: Option<usize>,
    style: &Style,
    policy: &RenderPolicy,
) -> String {
    let mut text = value.normalized().to_string();
    // Exponent forms keep their literal spelling.
    if text.contains(['e', 'E']) {
        return text;
    }
    if policy.float_formatting && column_type == TypeCode::RealNumber {
        if let Some(places) = column_decimals {
            if places > 0 {
                text = pad_decimals(&text, places);
            }
        }
    }
    if let Some(sep) = style.thousand_separator.and_then(|s| s.as_char()) {
        text = group_digits(&text, sep);
    }
    text
}

/// Right-pads the fractional part with zeros to `places` digits, adding the
/// point when missing. Normalized numeric text is ASCII.
fn pad_decimals(text: &str, places: usize) -> String {
    match text.find('.') {
        Some(pos) => {
            let have = text.len() - pos - 1;
            if have >= places {
                text.to_string()
            } else {
                format!("{text}{}", "0".repeat(places - have))
            }
        }
        None => format!("{text}.{}", "0".repeat(places)),
    }
}

/// Inserts `sep` every three integer digits from the right; the sign and the
/// fractional part are untouched.
fn group_digits(text: &str, sep: char) -> String {
    let (sign, rest) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text),
    };
    let (int_part, frac_part) = match rest.split_once('.') {
        Some((int_part, frac)) => (int_part, Some(frac)),
        None => (rest, None),
    };
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(sep);
        }
        grouped.push(ch);
    }
    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}
