//! The rendering pipeline: classify, profile, style, render.
//!
//! [`TableData`] owns the table (name, headers, row matrix) and its
//! configuration (type hints, column styles, filters, theme, value map,
//! numeric policy). [`TableData::render_with`] runs the four stages over the
//! whole matrix and hands back a [`Rendered`] view of the results:
//!
//! 1. classify every cell (honoring per-column type hints),
//! 2. profile every column (dominant type, precision, width),
//! 3. resolve every cell's style (type default, theme, column style,
//!    filters),
//! 4. render every cell to its padded, decorated display string.
//!
//! The stages run lazily and their output is cached; every mutating setter
//! drops the cache without losing configuration, so a `TableData` can be
//! reconfigured and re-rendered freely.
//!
//! # Quick Start
//!
//! ```rust
//! use tabula::{TableData, TypeCode};
//!
//! let mut table = TableData::new();
//! table.set_headers(vec!["id".into(), "price".into()]);
//! table.set_rows(vec![
//!     vec![1.into(), 2.5.into()],
//!     vec![2.into(), 3.0.into()],
//! ]);
//!
//! let rendered = table.render()?;
//! assert_eq!(rendered.profiles()[1].type_code(), TypeCode::RealNumber);
//! // Cells pad to the column width; the "price" header sets it here.
//! assert_eq!(rendered.cell_text(0, 1), Some("  2.5"));
//! # Ok::<(), tabula::ConfigError>(())
//! ```

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, warn};

use tabula_infer::{classify_with_hint, ClassifiedValue, RawValue, TypeHint};

use crate::error::{ConfigError, Result};
use crate::profile::{ColumnProfile, ColumnProfiler};
use crate::render::{format_text, render_aligned, RenderPolicy, ValueMap};
use crate::style::{
    default_style_for, resolve_cell_style, Align, CellContext, Decorations, FilterSet, Style,
    StyleFilter, Stylesheet, Theme, ThemeRegistry,
};
use crate::util::display_width;

/// Addresses a column by zero-based index or by exact header name.
///
/// Name lookup is case-sensitive; a miss is a configuration error raised
/// when the style is registered, never deferred to render time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ColumnSelector {
    Index(usize),
    Name(String),
}

impl From<usize> for ColumnSelector {
    fn from(index: usize) -> Self {
        ColumnSelector::Index(index)
    }
}

impl From<&str> for ColumnSelector {
    fn from(name: &str) -> Self {
        ColumnSelector::Name(name.to_string())
    }
}

impl From<String> for ColumnSelector {
    fn from(name: String) -> Self {
        ColumnSelector::Name(name)
    }
}

/// What a consuming adapter demands of the table before rendering starts.
///
/// Violations surface as [`ConfigError`]s from [`TableData::render_with`]
/// before any cell is rendered, so adapters never see a half-rendered
/// matrix.
///
/// ```rust
/// use tabula::Requirements;
///
/// let markdown = Requirements::new().headers().rows();
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Requirements {
    table_name: bool,
    headers: bool,
    rows: bool,
}

impl Requirements {
    /// No requirements; rendering an empty table yields an empty view.
    pub fn new() -> Self {
        Self::default()
    }

    /// Demand a non-empty table name.
    pub fn table_name(mut self) -> Self {
        self.table_name = true;
        self
    }

    /// Demand at least one header.
    pub fn headers(mut self) -> Self {
        self.headers = true;
        self
    }

    /// Demand at least one row.
    pub fn rows(mut self) -> Self {
        self.rows = true;
        self
    }
}

/// One rendered cell: final display text plus the style it resolved to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RenderedCell {
    col: usize,
    row: Option<usize>,
    text: String,
    style: Style,
}

impl RenderedCell {
    /// Zero-based column index.
    pub fn col(&self) -> usize {
        self.col
    }

    /// Zero-based row index; `None` for header cells.
    pub fn row(&self) -> Option<usize> {
        self.row
    }

    /// The padded, decorated display text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The style the cell resolved to, for adapters that re-encode
    /// attributes (HTML classes, ANSI colors).
    pub fn style(&self) -> &Style {
        &self.style
    }
}

/// Read-only view of one render, borrowed from the pipeline's cache.
#[derive(Clone, Copy, Debug)]
pub struct Rendered<'a> {
    prepared: &'a Prepared,
}

impl<'a> Rendered<'a> {
    /// Rendered header cells, in column order. Empty when the table has no
    /// headers.
    pub fn header_cells(&self) -> &'a [RenderedCell] {
        &self.prepared.header_cells
    }

    /// The rendered body matrix, row-major.
    pub fn rows(&self) -> &'a [Vec<RenderedCell>] {
        &self.prepared.rows
    }

    /// Per-column metadata, in column order.
    pub fn profiles(&self) -> &'a [ColumnProfile] {
        &self.prepared.profiles
    }

    /// The active theme's column separator, when it declares one.
    pub fn column_separator(&self) -> Option<&'a str> {
        self.prepared.column_separator.as_deref()
    }

    /// Every column's display width, for adapters that draw rules.
    pub fn column_widths(&self) -> Vec<usize> {
        self.prepared.profiles.iter().map(|p| p.ascii_width()).collect()
    }

    /// Every column's effective alignment (explicit column style, else the
    /// type default), for adapters like Markdown's `:---` separator row.
    pub fn column_alignments(&self) -> Vec<Align> {
        self.prepared.column_aligns.clone()
    }

    /// The display text of one body cell.
    pub fn cell_text(&self, row: usize, col: usize) -> Option<&'a str> {
        self.prepared
            .rows
            .get(row)
            .and_then(|cells| cells.get(col))
            .map(|cell| cell.text())
    }
}

/// Output of one full pipeline run, cached until a setter invalidates it.
#[derive(Debug, Default)]
struct Prepared {
    profiles: Vec<ColumnProfile>,
    column_aligns: Vec<Align>,
    header_cells: Vec<RenderedCell>,
    rows: Vec<Vec<RenderedCell>>,
    column_separator: Option<String>,
}

/// The pipeline orchestrator: table content plus rendering configuration.
///
/// Not safe for concurrent mutation; independent instances are fully
/// independent (the theme registry is instance-owned).
#[derive(Debug)]
pub struct TableData {
    table_name: String,
    headers: Vec<String>,
    rows: Vec<Vec<RawValue>>,
    type_hints: BTreeMap<usize, TypeHint>,
    column_styles: BTreeMap<usize, Style>,
    filters: FilterSet,
    filters_active: bool,
    theme: Option<Theme>,
    themes: ThemeRegistry,
    policy: RenderPolicy,
    min_width: usize,
    prepared: Option<Prepared>,
}

impl Default for TableData {
    fn default() -> Self {
        Self {
            table_name: String::new(),
            headers: Vec::new(),
            rows: Vec::new(),
            type_hints: BTreeMap::new(),
            column_styles: BTreeMap::new(),
            filters: FilterSet::new(),
            filters_active: true,
            theme: None,
            themes: ThemeRegistry::with_builtins(),
            policy: RenderPolicy::default(),
            min_width: 0,
            prepared: None,
        }
    }
}

impl TableData {
    pub fn new() -> Self {
        Self::default()
    }

    /// The table's name, used by adapters that emit one (SQL, some markup).
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn set_table_name(&mut self, name: impl Into<String>) {
        self.table_name = name.into();
        self.touch("table_name");
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn set_headers(&mut self, headers: Vec<String>) {
        self.headers = headers;
        self.touch("headers");
    }

    /// Replaces the whole row matrix. Rows may be ragged; short rows read
    /// as absent values on the right.
    pub fn set_rows(&mut self, rows: Vec<Vec<RawValue>>) {
        self.rows = rows;
        self.touch("rows");
    }

    /// Appends one row.
    pub fn push_row(&mut self, row: Vec<RawValue>) {
        self.rows.push(row);
        self.touch("rows");
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns: the widest of the header list and any row.
    pub fn column_count(&self) -> usize {
        self.rows
            .iter()
            .map(Vec::len)
            .max()
            .unwrap_or(0)
            .max(self.headers.len())
    }

    /// Forces a column's classification. Values the hint cannot coerce fall
    /// back to automatic classification one cell at a time.
    pub fn set_type_hint(&mut self, col: usize, hint: TypeHint) {
        self.type_hints.insert(col, hint);
        self.touch("type_hints");
    }

    pub fn clear_type_hints(&mut self) {
        self.type_hints.clear();
        self.touch("type_hints");
    }

    /// Registers an explicit style for one column, by index or by exact
    /// header name. Fails eagerly on an unknown name or an out-of-range
    /// index.
    pub fn set_column_style(
        &mut self,
        selector: impl Into<ColumnSelector>,
        style: Style,
    ) -> Result<()> {
        let col = self.resolve_column(&selector.into())?;
        self.column_styles.insert(col, style);
        self.touch("column_styles");
        Ok(())
    }

    /// Applies a stylesheet: every entry styles the column whose header
    /// matches its key exactly. All names are validated before any style
    /// lands, so a bad sheet changes nothing.
    pub fn apply_stylesheet(&mut self, sheet: &Stylesheet) -> Result<()> {
        let mut resolved = Vec::with_capacity(sheet.len());
        for (name, style) in sheet.iter() {
            let col = self
                .headers
                .iter()
                .position(|header| header == name)
                .ok_or_else(|| ConfigError::InvalidColumnSpecifier {
                    name: name.to_string(),
                })?;
            resolved.push((col, style.clone()));
        }
        for (col, style) in resolved {
            self.column_styles.insert(col, style);
        }
        self.touch("column_styles");
        Ok(())
    }

    /// Registers a per-cell style filter; filters run in registration order.
    pub fn add_style_filter(&mut self, filter: StyleFilter) {
        self.filters.add(filter);
        self.touch("style_filters");
    }

    /// Enables or disables one registered filter by name. Returns `false`
    /// when no filter carries the name.
    pub fn set_style_filter_enabled(&mut self, name: &str, enabled: bool) -> bool {
        let found = self.filters.set_enabled(name, enabled);
        if found {
            self.touch("style_filters");
        }
        found
    }

    /// Toggles the whole filter layer without losing registrations.
    pub fn set_style_filters_active(&mut self, active: bool) {
        self.filters_active = active;
        self.touch("style_filters");
    }

    pub fn clear_style_filters(&mut self) {
        self.filters.clear();
        self.touch("style_filters");
    }

    /// Makes a theme available to [`TableData::set_theme`].
    pub fn register_theme(&mut self, theme: Theme) {
        self.themes.register(theme);
    }

    /// The names this table can [`TableData::set_theme`] to.
    pub fn theme_names(&self) -> Vec<&str> {
        self.themes.names()
    }

    /// Activates a registered theme by name.
    pub fn set_theme(&mut self, name: &str) -> Result<()> {
        let theme = self
            .themes
            .get(name)
            .cloned()
            .ok_or_else(|| ConfigError::UnknownTheme {
                name: name.to_string(),
            })?;
        self.theme = Some(theme);
        self.touch("theme");
        Ok(())
    }

    pub fn clear_theme(&mut self) {
        self.theme = None;
        self.touch("theme");
    }

    /// Display substitutions for nulls, booleans, and non-finite numbers.
    pub fn set_value_map(&mut self, map: ValueMap) {
        self.policy.value_map = map;
        self.touch("value_map");
    }

    /// Spaces added inside every cell on both sides, charged to the column
    /// width.
    pub fn set_margin(&mut self, margin: usize) {
        self.policy.margin = margin;
        self.touch("margin");
    }

    /// A floor on every column's width.
    pub fn set_min_width(&mut self, width: usize) {
        self.min_width = width;
        self.touch("min_width");
    }

    /// Marker pairs for bold/italic/underline/strike-through; their width
    /// is charged to the column so decorated output stays rectangular.
    pub fn set_decorations(&mut self, decorations: Decorations) {
        self.policy.decorations = decorations;
        self.touch("decorations");
    }

    /// Pad real-number columns to uniform precision (on by default).
    pub fn set_float_formatting(&mut self, on: bool) {
        self.policy.float_formatting = on;
        self.touch("float_formatting");
    }

    /// Whether the pipeline cache is currently valid.
    pub fn is_prepared(&self) -> bool {
        self.prepared.is_some()
    }

    /// Renders with no requirements; an empty table renders to an empty
    /// view.
    pub fn render(&mut self) -> Result<Rendered<'_>> {
        self.render_with(Requirements::new())
    }

    /// Validates `requirements` fail-fast, then runs (or reuses) the
    /// pipeline and returns the rendered view.
    pub fn render_with(&mut self, requirements: Requirements) -> Result<Rendered<'_>> {
        if requirements.table_name && self.table_name.trim().is_empty() {
            return Err(ConfigError::EmptyTableName);
        }
        if requirements.headers && self.headers.is_empty() {
            return Err(ConfigError::EmptyHeaders);
        }
        if requirements.rows && self.rows.is_empty() {
            return Err(ConfigError::EmptyValueMatrix);
        }
        Ok(Rendered {
            prepared: self.ensure_prepared(),
        })
    }

    fn resolve_column(&self, selector: &ColumnSelector) -> Result<usize> {
        match selector {
            ColumnSelector::Index(index) => {
                let column_count = self.column_count();
                if *index < column_count {
                    Ok(*index)
                } else {
                    Err(ConfigError::ColumnIndexOutOfBounds {
                        index: *index,
                        column_count,
                    })
                }
            }
            ColumnSelector::Name(name) => self
                .headers
                .iter()
                .position(|header| header == name)
                .ok_or_else(|| ConfigError::InvalidColumnSpecifier { name: name.clone() }),
        }
    }

    fn touch(&mut self, changed: &'static str) {
        if self.prepared.take().is_some() {
            debug!(changed, "render cache invalidated");
        }
    }

    fn ensure_prepared(&mut self) -> &Prepared {
        if self.prepared.is_none() {
            let prepared = self.build_prepared();
            self.prepared = Some(prepared);
        }
        self.prepared.get_or_insert_with(Prepared::default)
    }

    fn build_prepared(&self) -> Prepared {
        let column_count = self.column_count();
        debug!(
            columns = column_count,
            rows = self.rows.len(),
            "rebuilding render cache"
        );

        // Stage 1: classify every cell, column-major, padding ragged rows
        // with absent values.
        let mut columns: Vec<Vec<ClassifiedValue>> =
            (0..column_count).map(|_| Vec::with_capacity(self.rows.len())).collect();
        for (row_idx, row) in self.rows.iter().enumerate() {
            for (col, column) in columns.iter_mut().enumerate() {
                let raw = row.get(col).unwrap_or(&RawValue::None);
                let hint = self.type_hints.get(&col).copied();
                let value = classify_with_hint(raw, hint);
                if let Some(hint) = hint {
                    if !value.is_null() && value.type_code() != hint.target_code() {
                        warn!(
                            row = row_idx,
                            col,
                            hint = %hint.target_code(),
                            got = %value.type_code(),
                            "type hint fell back to automatic classification"
                        );
                    }
                }
                column.push(value);
            }
        }

        let header_text =
            |col: usize| self.headers.get(col).map(String::as_str).unwrap_or("");
        let header_values: Vec<ClassifiedValue> = (0..column_count)
            .map(|col| {
                classify_with_hint(&RawValue::from(header_text(col)), Some(TypeHint::String))
            })
            .collect();

        // Stage 2: dominant type and precision per column.
        let profiler = ColumnProfiler::new()
            .float_formatting(self.policy.float_formatting)
            .min_width(self.min_width);
        let mut profiles: Vec<ColumnProfile> = (0..column_count)
            .map(|col| {
                profiler.profile(
                    header_text(col),
                    self.type_hints.contains_key(&col),
                    &columns[col],
                )
            })
            .collect();

        // Stage 3: resolve every cell's style.
        let empty_filters = FilterSet::new();
        let filters = if self.filters_active {
            &self.filters
        } else {
            &empty_filters
        };
        let theme = self.theme.as_ref();

        let mut header_styles: Vec<Style> = Vec::with_capacity(column_count);
        let mut body_styles: Vec<Vec<Style>> = Vec::with_capacity(column_count);
        for (col, profile) in profiles.iter().enumerate() {
            let type_default = default_style_for(profile.type_code());
            let column_style = self.column_styles.get(&col);

            let header_ctx = CellContext {
                col,
                row: None,
                header: header_text(col),
                value: &header_values[col],
            };
            header_styles.push(resolve_cell_style(
                &type_default,
                theme,
                column_style,
                filters,
                &header_ctx,
            ));

            let mut cell_styles = Vec::with_capacity(columns[col].len());
            for (row, value) in columns[col].iter().enumerate() {
                let ctx = CellContext {
                    col,
                    row: Some(row),
                    header: header_text(col),
                    value,
                };
                cell_styles.push(resolve_cell_style(
                    &type_default,
                    theme,
                    column_style,
                    filters,
                    &ctx,
                ));
            }
            body_styles.push(cell_styles);
        }

        // Stage 3b: re-measure widths from the styled text so separators,
        // substitutions, and decoration markers are charged to the column.
        let has_headers = !self.headers.is_empty();
        for (col, profile) in profiles.iter_mut().enumerate() {
            let mut width = 0;
            if has_headers {
                let text = format_text(
                    &header_values[col],
                    profile.type_code(),
                    profile.decimal_places(),
                    &header_styles[col],
                    &self.policy,
                );
                width = display_width(&text) + self.policy.decorations.overhead(&header_styles[col]);
            }
            for (row, value) in columns[col].iter().enumerate() {
                let style = &body_styles[col][row];
                let text = format_text(
                    value,
                    profile.type_code(),
                    profile.decimal_places(),
                    style,
                    &self.policy,
                );
                let cell_width =
                    display_width(&text) + self.policy.decorations.overhead(style);
                width = width.max(cell_width);
            }
            profile.set_ascii_width((width + 2 * self.policy.margin).max(self.min_width));
        }

        // Stage 4: render.
        let header_cells: Vec<RenderedCell> = if has_headers {
            (0..column_count)
                .map(|col| RenderedCell {
                    col,
                    row: None,
                    text: render_aligned(
                        &header_values[col],
                        &profiles[col],
                        &header_styles[col],
                        &self.policy,
                        Align::Center,
                    ),
                    style: header_styles[col].clone(),
                })
                .collect()
        } else {
            Vec::new()
        };

        let rows: Vec<Vec<RenderedCell>> = (0..self.rows.len())
            .map(|row| {
                (0..column_count)
                    .map(|col| {
                        let style = &body_styles[col][row];
                        RenderedCell {
                            col,
                            row: Some(row),
                            text: render_aligned(
                                &columns[col][row],
                                &profiles[col],
                                style,
                                &self.policy,
                                profiles[col].default_align(),
                            ),
                            style: style.clone(),
                        }
                    })
                    .collect()
            })
            .collect();

        let column_aligns: Vec<Align> = profiles
            .iter()
            .enumerate()
            .map(|(col, profile)| {
                match self.column_styles.get(&col).and_then(|s| s.align) {
                    Some(Align::Auto) | None => profile.default_align(),
                    Some(explicit) => explicit,
                }
            })
            .collect();

        debug!(
            cells = column_count * self.rows.len(),
            "render cache rebuilt"
        );
        Prepared {
            profiles,
            column_aligns,
            header_cells,
            rows,
            column_separator: self
                .theme
                .as_ref()
                .and_then(|t| t.column_separator())
                .map(str::to_string),
        }
    }
}
