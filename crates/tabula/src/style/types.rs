//! Style attributes for cells and columns.
//!
//! A [`Style`] is a bundle of optional attributes. Unset fields mean "no
//! opinion": when styles are layered during resolution, a later layer
//! overrides only the fields it actually sets. This is what lets a theme
//! set alignment without clobbering a column's font weight, and vice versa.

use serde::{Deserialize, Serialize};

use crate::util::display_width;

/// Horizontal text alignment within a column.
///
/// `Auto` defers to the column profile: numeric columns right-align,
/// everything else left-aligns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    /// Defer to the column's type-driven default.
    #[default]
    Auto,
    /// Left-align text (pad on the right).
    Left,
    /// Right-align text (pad on the left).
    Right,
    /// Center text (odd leftover space goes right).
    Center,
}

/// Vertical alignment, consumed by grid-shaped output formats.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    #[default]
    Top,
    Middle,
    Bottom,
}

/// Relative font size bucket.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Tiny,
    Small,
    #[default]
    Medium,
    Large,
}

/// Font slant/family treatment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
    Typewriter,
}

/// Font weight.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

/// Text decoration line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecorationLine {
    Underline,
    LineThrough,
}

/// Digit-grouping separator for the integer part of numbers.
///
/// Grouping is in threes from the right; the fractional part is never
/// grouped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThousandSeparator {
    #[default]
    None,
    Comma,
    Space,
    Underscore,
}

impl ThousandSeparator {
    /// The separator character, if any.
    pub fn as_char(&self) -> Option<char> {
        match self {
            ThousandSeparator::None => None,
            ThousandSeparator::Comma => Some(','),
            ThousandSeparator::Space => Some(' '),
            ThousandSeparator::Underscore => Some('_'),
        }
    }
}

/// A bundle of optional style attributes.
///
/// Every field is optional so that styles can be layered: resolution walks
/// type default, theme, column style, then cell filters, and each layer
/// overrides only the fields it sets (see [`Style::merged`]).
///
/// Colors are free-form names or hex strings; interpreting them is the
/// output format's business.
///
/// # Example
///
/// ```rust
/// use tabula::{Align, Style, ThousandSeparator};
///
/// let style = Style::new()
///     .align(Align::Right)
///     .thousand_separator(ThousandSeparator::Comma);
/// assert_eq!(style.align, Some(Align::Right));
/// assert_eq!(style.font_weight, None);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Style {
    pub align: Option<Align>,
    pub vertical_align: Option<VerticalAlign>,
    pub font_size: Option<FontSize>,
    pub font_style: Option<FontStyle>,
    pub font_weight: Option<FontWeight>,
    pub decoration_line: Option<DecorationLine>,
    pub thousand_separator: Option<ThousandSeparator>,
    pub color: Option<String>,
    pub bg_color: Option<String>,
    pub padding: Option<usize>,
}

impl Style {
    /// Creates a style with no attributes set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the horizontal alignment.
    pub fn align(mut self, align: Align) -> Self {
        self.align = Some(align);
        self
    }

    /// Sets the vertical alignment.
    pub fn vertical_align(mut self, valign: VerticalAlign) -> Self {
        self.vertical_align = Some(valign);
        self
    }

    /// Sets the font size bucket.
    pub fn font_size(mut self, size: FontSize) -> Self {
        self.font_size = Some(size);
        self
    }

    /// Sets the font style.
    pub fn font_style(mut self, style: FontStyle) -> Self {
        self.font_style = Some(style);
        self
    }

    /// Sets the font weight.
    pub fn font_weight(mut self, weight: FontWeight) -> Self {
        self.font_weight = Some(weight);
        self
    }

    /// Shorthand for a bold font weight.
    pub fn bold(self) -> Self {
        self.font_weight(FontWeight::Bold)
    }

    /// Sets the decoration line.
    pub fn decoration_line(mut self, line: DecorationLine) -> Self {
        self.decoration_line = Some(line);
        self
    }

    /// Sets the thousand separator for numeric cells.
    pub fn thousand_separator(mut self, sep: ThousandSeparator) -> Self {
        self.thousand_separator = Some(sep);
        self
    }

    /// Sets the foreground color.
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Sets the background color.
    pub fn bg_color(mut self, color: impl Into<String>) -> Self {
        self.bg_color = Some(color.into());
        self
    }

    /// Sets the per-side space padding inside the cell.
    pub fn padding(mut self, padding: usize) -> Self {
        self.padding = Some(padding);
        self
    }

    /// Returns `true` when no attribute is set.
    pub fn is_unset(&self) -> bool {
        *self == Style::default()
    }

    /// Overlays `over` on top of this style, field by field.
    ///
    /// Fields set in `over` win; fields `over` leaves unset keep this
    /// style's value. Neither input is mutated.
    pub fn merged(&self, over: &Style) -> Style {
        Style {
            align: over.align.or(self.align),
            vertical_align: over.vertical_align.or(self.vertical_align),
            font_size: over.font_size.or(self.font_size),
            font_style: over.font_style.or(self.font_style),
            font_weight: over.font_weight.or(self.font_weight),
            decoration_line: over.decoration_line.or(self.decoration_line),
            thousand_separator: over.thousand_separator.or(self.thousand_separator),
            color: over.color.clone().or_else(|| self.color.clone()),
            bg_color: over.bg_color.clone().or_else(|| self.bg_color.clone()),
            padding: over.padding.or(self.padding),
        }
    }
}

/// Literal wrappers applied around cell text for styled attributes.
///
/// Plain-text output formats express emphasis with markers (`**bold**`),
/// and those markers take display columns. A `Decorations` table declares
/// the open/close pair per attribute so the markers can be applied by the
/// renderer and their width charged to the column profile up front, keeping
/// decorated columns rectangular.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Decorations {
    pub bold: Option<(String, String)>,
    pub italic: Option<(String, String)>,
    pub underline: Option<(String, String)>,
    pub line_through: Option<(String, String)>,
}

impl Decorations {
    /// No decorations; styled text renders bare.
    pub fn none() -> Self {
        Self::default()
    }

    /// Markdown emphasis markers.
    pub fn markdown() -> Self {
        Self {
            bold: Some(("**".to_string(), "**".to_string())),
            italic: Some(("*".to_string(), "*".to_string())),
            underline: None,
            line_through: Some(("~~".to_string(), "~~".to_string())),
        }
    }

    /// Display columns the markers for `style` will add.
    pub fn overhead(&self, style: &Style) -> usize {
        let mut extra = 0;
        for (open, close) in self.active_pairs(style) {
            extra += display_width(open) + display_width(close);
        }
        extra
    }

    /// Wraps `text` in the markers active for `style`.
    ///
    /// Markers nest inside-out in a fixed order: italic, bold, underline,
    /// line-through.
    pub fn apply(&self, text: &str, style: &Style) -> String {
        let mut out = text.to_string();
        for (open, close) in self.active_pairs(style) {
            out = format!("{open}{out}{close}");
        }
        out
    }

    fn active_pairs<'a>(&'a self, style: &Style) -> Vec<(&'a str, &'a str)> {
        let mut pairs = Vec::new();
        if style.font_style == Some(FontStyle::Italic) {
            if let Some((open, close)) = &self.italic {
                pairs.push((open.as_str(), close.as_str()));
            }
        }
        if style.font_weight == Some(FontWeight::Bold) {
            if let Some((open, close)) = &self.bold {
                pairs.push((open.as_str(), close.as_str()));
            }
        }
        match style.decoration_line {
            Some(DecorationLine::Underline) => {
                if let Some((open, close)) = &self.underline {
                    pairs.push((open.as_str(), close.as_str()));
                }
            }
            Some(DecorationLine::LineThrough) => {
                if let Some((open, close)) = &self.line_through {
                    pairs.push((open.as_str(), close.as_str()));
                }
            }
            None => {}
        }
        pairs
    }
}
