//! Layered style resolution.
//!
//! Every cell's final style is folded from four layers, later layers
//! overriding earlier ones field by field:
//!
//! 1. the column's type-driven default,
//! 2. the active theme's filter,
//! 3. the explicit column style,
//! 4. ad-hoc cell filters, in registration order.
//!
//! Resolution is deterministic and mutates nothing; rendering the same
//! table twice resolves the same styles twice.

use tabula_infer::TypeCode;

use super::filters::{CellContext, FilterSet};
use super::theme::Theme;
use super::types::{Align, Style};

/// The type-driven default style for a column: numeric columns right-align,
/// everything else left-aligns. No other field has a type default.
pub fn default_style_for(type_code: TypeCode) -> Style {
    Style::new().align(default_align_for(type_code))
}

/// The alignment `Align::Auto` resolves to for a column of this type.
pub fn default_align_for(type_code: TypeCode) -> Align {
    if type_code.is_number() {
        Align::Right
    } else {
        Align::Left
    }
}

/// Folds the four style layers for one cell.
pub(crate) fn resolve_cell_style(
    type_default: &Style,
    theme: Option<&Theme>,
    column_style: Option<&Style>,
    filters: &FilterSet,
    ctx: &CellContext<'_>,
) -> Style {
    let mut resolved = type_default.clone();
    if let Some(theme) = theme {
        if let Some(contribution) = theme.contribution(ctx) {
            resolved = resolved.merged(&contribution);
        }
    }
    if let Some(column_style) = column_style {
        resolved = resolved.merged(column_style);
    }
    filters.apply(resolved, ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::filters::StyleFilter;
    use crate::style::types::FontWeight;
    use tabula_infer::{classify, ClassifiedValue, RawValue};

    fn ctx_for<'a>(value: &'a ClassifiedValue) -> CellContext<'a> {
        CellContext {
            col: 0,
            row: Some(0),
            header: "a",
            value,
        }
    }

    #[test]
    fn numeric_columns_default_to_right_alignment() {
        assert_eq!(default_align_for(TypeCode::Integer), Align::Right);
        assert_eq!(default_align_for(TypeCode::RealNumber), Align::Right);
        assert_eq!(default_align_for(TypeCode::String), Align::Left);
        assert_eq!(default_align_for(TypeCode::Bool), Align::Left);
        assert_eq!(default_align_for(TypeCode::Infinity), Align::Left);
    }

    #[test]
    fn later_layers_override_earlier_per_field() {
        let cv = classify(&RawValue::Int(1));
        let theme = Theme::named("t").with_filter(|_| Some(Style::new().bold()));
        let column = Style::new().align(Align::Center);

        let resolved = resolve_cell_style(
            &default_style_for(TypeCode::Integer),
            Some(&theme),
            Some(&column),
            &FilterSet::new(),
            &ctx_for(&cv),
        );
        // Column style wins alignment; theme's bold survives untouched.
        assert_eq!(resolved.align, Some(Align::Center));
        assert_eq!(resolved.font_weight, Some(FontWeight::Bold));
    }

    #[test]
    fn filter_setting_one_field_keeps_the_rest() {
        let cv = classify(&RawValue::Int(1));
        let column = Style::new().bold();
        let mut filters = FilterSet::new();
        filters.add(StyleFilter::new("align-only", |_| {
            Some(Style::new().align(Align::Left))
        }));

        let resolved = resolve_cell_style(
            &default_style_for(TypeCode::Integer),
            None,
            Some(&column),
            &filters,
            &ctx_for(&cv),
        );
        assert_eq!(resolved.align, Some(Align::Left));
        assert_eq!(resolved.font_weight, Some(FontWeight::Bold));
    }

    #[test]
    fn no_layers_yields_the_type_default() {
        let cv = classify(&RawValue::from("x"));
        let resolved = resolve_cell_style(
            &default_style_for(TypeCode::String),
            None,
            None,
            &FilterSet::new(),
            &ctx_for(&cv),
        );
        assert_eq!(resolved, default_style_for(TypeCode::String));
    }

    #[test]
    fn resolution_is_deterministic() {
        let cv = classify(&RawValue::Int(7));
        let theme = Theme::named("t").with_filter(|ctx| {
            (ctx.col == 0).then(|| Some(Style::new().color("blue"))).flatten()
        });
        let mut filters = FilterSet::new();
        filters.add(StyleFilter::new("pad", |_| Some(Style::new().padding(1))));

        let once = resolve_cell_style(
            &default_style_for(TypeCode::Integer),
            Some(&theme),
            None,
            &filters,
            &ctx_for(&cv),
        );
        let twice = resolve_cell_style(
            &default_style_for(TypeCode::Integer),
            Some(&theme),
            None,
            &filters,
            &ctx_for(&cv),
        );
        assert_eq!(once, twice);
    }
}
