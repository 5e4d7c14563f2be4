//! # Tabula - Value Normalization and Column Formatting for Tables
//!
//! `tabula` is the shared core behind tabular output formats: given
//! heterogeneous, possibly-missing, possibly-mixed-type cell values, it
//! infers a per-column semantic type, computes per-column width, precision,
//! and alignment, layers user styles with theme filters, and renders every
//! cell to a display string that round-trips its semantics (`Infinity`,
//! `NaN`, absent values, decimals, datetimes).
//!
//! Format adapters (Markdown, CSV, HTML, ...) are consumers of this crate,
//! not part of it: they take the rendered cell matrix and the per-column
//! profiles and add only literal syntax around them.
//!
//! ## Core Concepts
//!
//! - [`TableData`]: the pipeline orchestrator — holds headers, rows, and
//!   configuration, and renders on demand with cached results
//! - [`RawValue`] / [`TypeCode`] / [`ClassifiedValue`]: the classification
//!   layer (re-exported from `tabula-infer`) — total, never fails
//! - [`ColumnProfile`]: per-column dominant type, display width, precision,
//!   and default alignment
//! - [`Style`]: optional display attributes, layered per field (type
//!   default, then theme, then column style, then cell filters)
//! - [`StyleFilter`] / [`Theme`]: per-cell conditional styling
//! - [`Stylesheet`]: YAML column styles keyed by header name
//! - [`ValueMap`]: display substitutions for nulls, booleans, `Infinity`,
//!   and `NaN`
//! - [`Rendered`]: the read-only view adapters consume
//!
//! ## Quick Start
//!
//! ```rust
//! use tabula::{Style, TableData, ThousandSeparator, TypeCode};
//!
//! let mut table = TableData::new();
//! table.set_headers(vec!["item".into(), "price".into()]);
//! table.set_rows(vec![
//!     vec!["widget".into(), 1299.into()],
//!     vec!["gadget".into(), 25.into()],
//! ]);
//! table.set_column_style(
//!     "price",
//!     Style::new().thousand_separator(ThousandSeparator::Comma),
//! )?;
//!
//! let rendered = table.render()?;
//! assert_eq!(rendered.profiles()[1].type_code(), TypeCode::Integer);
//! assert_eq!(rendered.cell_text(0, 1), Some("1,299"));
//! assert_eq!(rendered.cell_text(1, 1), Some("   25"));
//! # Ok::<(), tabula::ConfigError>(())
//! ```
//!
//! ## Conditional Styling
//!
//! Filters see each cell's position, header, and classified value:
//!
//! ```rust
//! use tabula::{CellContext, Style, StyleFilter, TableData};
//!
//! let mut table = TableData::new();
//! table.set_headers(vec!["delta".into()]);
//! table.set_rows(vec![vec![(-5).into()], vec![5.into()]]);
//! table.add_style_filter(StyleFilter::new("negatives-red", |ctx: &CellContext<'_>| {
//!     let negative = ctx.value.raw().as_int().is_some_and(|n| n < 0);
//!     negative.then(|| Style::new().color("red"))
//! }));
//!
//! let rendered = table.render()?;
//! assert_eq!(rendered.rows()[0][0].style().color.as_deref(), Some("red"));
//! assert_eq!(rendered.rows()[1][0].style().color, None);
//! # Ok::<(), tabula::ConfigError>(())
//! ```
//!
//! ## YAML Stylesheets
//!
//! Column styles can be loaded from YAML, keyed by header name:
//!
//! ```rust
//! use tabula::{Stylesheet, TableData};
//!
//! let sheet = Stylesheet::from_yaml(r#"
//! price:
//!   align: right
//!   thousand_separator: comma
//! "#)?;
//!
//! let mut table = TableData::new();
//! table.set_headers(vec!["price".into()]);
//! table.set_rows(vec![vec![1_000_000.into()]]);
//! table.apply_stylesheet(&sheet)?;
//!
//! assert_eq!(table.render()?.cell_text(0, 0), Some("1,000,000"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Themes
//!
//! Themes are named, registered style filters; two built-ins ship with
//! every [`TableData`] (`altrow`, `headline`):
//!
//! ```rust
//! use tabula::TableData;
//!
//! let mut table = TableData::new();
//! table.set_headers(vec!["h".into()]);
//! table.set_rows(vec![vec![1.into()]]);
//! table.set_theme("headline")?;
//!
//! let rendered = table.render()?;
//! assert!(rendered.header_cells()[0].style().font_weight.is_some());
//! # Ok::<(), tabula::ConfigError>(())
//! ```

// Internal modules
mod error;
mod pipeline;
mod profile;
mod render;
pub mod style;
mod util;

// Error types
pub use error::{ConfigError, Result, StylesheetError};

// Pipeline exports
pub use pipeline::{ColumnSelector, Rendered, RenderedCell, Requirements, TableData};

// Profile exports
pub use profile::{ColumnProfile, ColumnProfiler};

// Render exports
pub use render::{render_cell, RenderPolicy, ValueMap};

// Style module exports
pub use style::{
    default_align_for, default_style_for, Align, CellContext, DecorationLine, Decorations,
    FilterSet, FontSize, FontStyle, FontWeight, Style, StyleFilter, Stylesheet, Theme,
    ThemeRegistry, ThousandSeparator, VerticalAlign,
};

// Utility exports
pub use util::{display_width, pad_center, pad_left, pad_right};

// Re-export the classification layer so adapters need a single import
pub use tabula_infer::{
    classify, classify_with_hint, ClassifiedValue, RawValue, TypeCode, TypeHint,
};
