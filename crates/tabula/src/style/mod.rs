//! Cell and column styling: attributes, layering, themes, and stylesheets.
//!
//! Styles are bundles of optional attributes ([`Style`]); a cell's final
//! style is resolved by folding four layers, later layers overriding earlier
//! ones field by field:
//!
//! | Layer | Source |
//! |-------|--------|
//! | 1 | type default (numbers right-align, the rest left-align) |
//! | 2 | the active [`Theme`]'s filter |
//! | 3 | the explicit column [`Style`] |
//! | 4 | cell [`StyleFilter`]s, in registration order |
//!
//! Because layering is per field, a filter that only sets alignment never
//! clears a font weight resolved by an earlier layer.
//!
//! ## Conditional styling
//!
//! Filters and themes are closures from a [`CellContext`] (position, header,
//! classified value) to an optional [`Style`]:
//!
//! ```rust
//! use tabula::{CellContext, Style, StyleFilter};
//!
//! let negatives_red = StyleFilter::new("negatives-red", |ctx: &CellContext<'_>| {
//!     let negative = ctx.value.raw().as_int().is_some_and(|n| n < 0);
//!     negative.then(|| Style::new().color("red"))
//! });
//! ```
//!
//! ## Stylesheets
//!
//! Column styles can also be loaded from YAML, keyed by header name:
//!
//! ```yaml
//! price:
//!   align: right
//!   thousand_separator: comma
//! name:
//!   font_weight: bold
//! ```

mod filters;
mod resolve;
mod stylesheet;
mod theme;
mod types;

pub use filters::{CellContext, FilterSet, StyleFilter};
pub use resolve::{default_align_for, default_style_for};
pub use stylesheet::Stylesheet;
pub use theme::{Theme, ThemeRegistry};
pub use types::{
    Align, DecorationLine, Decorations, FontSize, FontStyle, FontWeight, Style,
    ThousandSeparator, VerticalAlign,
};

pub(crate) use resolve::resolve_cell_style;
