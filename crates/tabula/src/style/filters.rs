//! Per-cell style filters.
//!
//! A filter is a named callback that inspects one cell and optionally
//! contributes style attributes. Filters run after the theme and the column
//! style, in registration order, and each contribution is merged field by
//! field — a filter that only sets alignment leaves a previously resolved
//! font weight alone.
//!
//! Filters can be disabled and re-enabled without losing their registration
//! or their position in the order.

use std::fmt;
use std::sync::Arc;

use tabula_infer::{ClassifiedValue, TypeCode};

use super::types::Style;

/// Everything a filter may inspect about one cell.
#[derive(Clone, Copy, Debug)]
pub struct CellContext<'a> {
    /// Zero-based column index.
    pub col: usize,
    /// Zero-based row index; `None` for header cells.
    pub row: Option<usize>,
    /// The column's header text.
    pub header: &'a str,
    /// The classified value in this cell.
    pub value: &'a ClassifiedValue,
}

impl CellContext<'_> {
    /// Returns `true` for header cells.
    pub fn is_header(&self) -> bool {
        self.row.is_none()
    }

    /// The cell's classified type.
    pub fn type_code(&self) -> TypeCode {
        self.value.type_code()
    }
}

/// Callback signature for style filters.
pub type FilterFn = dyn Fn(&CellContext<'_>) -> Option<Style> + Send + Sync;

/// A named, toggleable style filter.
#[derive(Clone)]
pub struct StyleFilter {
    name: String,
    enabled: bool,
    func: Arc<FilterFn>,
}

impl StyleFilter {
    /// Creates an enabled filter.
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&CellContext<'_>) -> Option<Style> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            enabled: true,
            func: Arc::new(func),
        }
    }

    /// The filter's registered name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the filter currently runs.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub(crate) fn evaluate(&self, ctx: &CellContext<'_>) -> Option<Style> {
        (self.func)(ctx)
    }
}

impl fmt::Debug for StyleFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyleFilter")
            .field("name", &self.name)
            .field("enabled", &self.enabled)
            .finish()
    }
}

/// Ordered collection of style filters.
#[derive(Clone, Debug, Default)]
pub struct FilterSet {
    filters: Vec<StyleFilter>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a filter; it runs after every previously added filter.
    pub fn add(&mut self, filter: StyleFilter) {
        self.filters.push(filter);
    }

    /// Enables or disables a filter by name without unregistering it.
    ///
    /// Returns `false` if no filter has that name.
    pub fn set_enabled(&mut self, name: &str, enabled: bool) -> bool {
        match self.filters.iter_mut().find(|f| f.name == name) {
            Some(filter) => {
                filter.enabled = enabled;
                true
            }
            None => false,
        }
    }

    /// Removes every filter.
    pub fn clear(&mut self) {
        self.filters.clear();
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Folds the enabled filters over `base`, in registration order.
    pub(crate) fn apply(&self, base: Style, ctx: &CellContext<'_>) -> Style {
        let mut resolved = base;
        for filter in self.filters.iter().filter(|f| f.enabled) {
            if let Some(contribution) = filter.evaluate(ctx) {
                resolved = resolved.merged(&contribution);
            }
        }
        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::types::{Align, FontWeight};
    use tabula_infer::{classify, RawValue};

    fn ctx_for<'a>(value: &'a ClassifiedValue, header: &'a str) -> CellContext<'a> {
        CellContext {
            col: 0,
            row: Some(0),
            header,
            value,
        }
    }

    #[test]
    fn filters_run_in_registration_order() {
        let mut set = FilterSet::new();
        set.add(StyleFilter::new("first", |_| {
            Some(Style::new().align(Align::Left))
        }));
        set.add(StyleFilter::new("second", |_| {
            Some(Style::new().align(Align::Right))
        }));

        let cv = classify(&RawValue::Int(1));
        let resolved = set.apply(Style::new(), &ctx_for(&cv, "a"));
        assert_eq!(resolved.align, Some(Align::Right));
    }

    #[test]
    fn partial_contribution_preserves_other_fields() {
        let mut set = FilterSet::new();
        set.add(StyleFilter::new("align-only", |_| {
            Some(Style::new().align(Align::Center))
        }));

        let cv = classify(&RawValue::Int(1));
        let base = Style::new().bold();
        let resolved = set.apply(base, &ctx_for(&cv, "a"));
        assert_eq!(resolved.align, Some(Align::Center));
        assert_eq!(resolved.font_weight, Some(FontWeight::Bold));
    }

    #[test]
    fn disabled_filters_are_skipped_but_kept() {
        let mut set = FilterSet::new();
        set.add(StyleFilter::new("flag", |_| Some(Style::new().bold())));

        assert!(set.set_enabled("flag", false));
        let cv = classify(&RawValue::Int(1));
        let resolved = set.apply(Style::new(), &ctx_for(&cv, "a"));
        assert_eq!(resolved.font_weight, None);

        assert!(set.set_enabled("flag", true));
        let resolved = set.apply(Style::new(), &ctx_for(&cv, "a"));
        assert_eq!(resolved.font_weight, Some(FontWeight::Bold));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn toggling_unknown_name_reports_false() {
        let mut set = FilterSet::new();
        assert!(!set.set_enabled("ghost", true));
    }

    #[test]
    fn filters_can_match_on_cell_properties() {
        let mut set = FilterSet::new();
        set.add(StyleFilter::new("negatives-red", |ctx| {
            match ctx.value.raw().as_int() {
                Some(n) if n < 0 => Some(Style::new().color("red")),
                _ => None,
            }
        }));

        let neg = classify(&RawValue::Int(-4));
        let pos = classify(&RawValue::Int(4));
        assert_eq!(
            set.apply(Style::new(), &ctx_for(&neg, "n")).color,
            Some("red".to_string())
        );
        assert_eq!(set.apply(Style::new(), &ctx_for(&pos, "n")).color, None);
    }

    #[test]
    fn header_context_is_distinguishable() {
        let cv = classify(&RawValue::from("name"));
        let header_ctx = CellContext {
            col: 0,
            row: None,
            header: "name",
            value: &cv,
        };
        assert!(header_ctx.is_header());
        assert!(!ctx_for(&cv, "name").is_header());
    }
}
