//! Named style themes and their registry.
//!
//! A theme bundles one style filter (applied to every cell before column
//! styles and ad-hoc filters) with an optional column-separator suggestion
//! for text adapters. Themes are looked up by name in a [`ThemeRegistry`]
//! owned by the table instance — registration is always explicit, there is
//! no scanning and no process-wide registry.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::filters::{CellContext, FilterFn};
use super::types::Style;

/// A named style bundle.
#[derive(Clone)]
pub struct Theme {
    name: String,
    filter: Option<Arc<FilterFn>>,
    column_separator: Option<String>,
}

impl Theme {
    /// Creates an empty theme with the given name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            filter: None,
            column_separator: None,
        }
    }

    /// Sets the theme's style filter, returning `self` for chaining.
    pub fn with_filter<F>(mut self, func: F) -> Self
    where
        F: Fn(&CellContext<'_>) -> Option<Style> + Send + Sync + 'static,
    {
        self.filter = Some(Arc::new(func));
        self
    }

    /// Sets the column separator this theme suggests to text adapters.
    pub fn with_column_separator(mut self, separator: impl Into<String>) -> Self {
        self.column_separator = Some(separator.into());
        self
    }

    /// The theme's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The suggested column separator, if any.
    pub fn column_separator(&self) -> Option<&str> {
        self.column_separator.as_deref()
    }

    /// The theme's style contribution for one cell.
    pub(crate) fn contribution(&self, ctx: &CellContext<'_>) -> Option<Style> {
        self.filter.as_ref().and_then(|f| f(ctx))
    }
}

impl fmt::Debug for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Theme")
            .field("name", &self.name)
            .field("has_filter", &self.filter.is_some())
            .field("column_separator", &self.column_separator)
            .finish()
    }
}

/// Instance-owned collection of themes, addressed by name.
#[derive(Clone, Debug, Default)]
pub struct ThemeRegistry {
    themes: HashMap<String, Theme>,
}

impl ThemeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry seeded with the built-in themes.
    ///
    /// - `altrow`: a faint background on odd data rows.
    /// - `headline`: bold header cells.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Theme::named("altrow").with_filter(|ctx| match ctx.row {
            Some(row) if row % 2 == 1 => Some(Style::new().bg_color("#f2f2f2")),
            _ => None,
        }));
        registry.register(
            Theme::named("headline")
                .with_filter(|ctx| ctx.is_header().then(|| Style::new().bold())),
        );
        registry
    }

    /// Adds or replaces a theme under its own name.
    pub fn register(&mut self, theme: Theme) {
        self.themes.insert(theme.name().to_string(), theme);
    }

    /// Looks up a theme by name.
    pub fn get(&self, name: &str) -> Option<&Theme> {
        self.themes.get(name)
    }

    /// Registered theme names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.themes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::types::FontWeight;
    use tabula_infer::{classify, RawValue};

    #[test]
    fn altrow_shades_odd_rows_only() {
        let registry = ThemeRegistry::with_builtins();
        let theme = registry.get("altrow").unwrap();
        let cv = classify(&RawValue::Int(1));

        let even = CellContext {
            col: 0,
            row: Some(0),
            header: "a",
            value: &cv,
        };
        let odd = CellContext {
            col: 0,
            row: Some(1),
            header: "a",
            value: &cv,
        };
        assert_eq!(theme.contribution(&even), None);
        assert_eq!(
            theme.contribution(&odd).unwrap().bg_color,
            Some("#f2f2f2".to_string())
        );
    }

    #[test]
    fn headline_bolds_headers() {
        let registry = ThemeRegistry::with_builtins();
        let theme = registry.get("headline").unwrap();
        let cv = classify(&RawValue::from("name"));

        let header = CellContext {
            col: 0,
            row: None,
            header: "name",
            value: &cv,
        };
        let data = CellContext {
            col: 0,
            row: Some(0),
            header: "name",
            value: &cv,
        };
        assert_eq!(
            theme.contribution(&header).unwrap().font_weight,
            Some(FontWeight::Bold)
        );
        assert_eq!(theme.contribution(&data), None);
    }

    #[test]
    fn registration_replaces_by_name() {
        let mut registry = ThemeRegistry::new();
        registry.register(Theme::named("x").with_column_separator("|"));
        registry.register(Theme::named("x").with_column_separator("||"));
        assert_eq!(registry.get("x").unwrap().column_separator(), Some("||"));
        assert_eq!(registry.names(), vec!["x"]);
    }

    #[test]
    fn lookup_misses_return_none() {
        let registry = ThemeRegistry::with_builtins();
        assert!(registry.get("darcula").is_none());
    }
}
