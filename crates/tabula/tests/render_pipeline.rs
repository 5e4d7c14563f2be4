//! End-to-end pipeline tests, driven the way a format adapter drives the
//! library: configure a `TableData`, render, and consume the `Rendered`
//! view.

use std::io::Write;

use tabula::{
    classify, Align, ConfigError, RawValue, Requirements, Style, Stylesheet, TableData, Theme,
    ThousandSeparator, TypeCode, ValueMap,
};

// ============================================================================
// A minimal fixed-width text adapter
// ============================================================================

/// Joins rendered cells with the theme's column separator and draws a
/// Markdown-style rule from the column widths and alignments. This is the
/// whole consumer contract: rendered cells, profiles, separator.
fn write_text_table(table: &mut TableData) -> Result<String, ConfigError> {
    let rendered = table.render_with(Requirements::new().headers().rows())?;
    let sep = rendered.column_separator().unwrap_or(" ").to_string();

    let mut out = String::new();
    let header_line: Vec<&str> = rendered.header_cells().iter().map(|c| c.text()).collect();
    out.push_str(&header_line.join(&sep));
    out.push('\n');

    let rule: Vec<String> = rendered
        .column_widths()
        .iter()
        .zip(rendered.column_alignments())
        .map(|(width, align)| {
            let dashes = "-".repeat(width.saturating_sub(1));
            match align {
                Align::Right => format!("{dashes}:"),
                Align::Center => format!(":{}:", "-".repeat(width.saturating_sub(2))),
                _ => format!(":{dashes}"),
            }
        })
        .collect();
    out.push_str(&rule.join(&sep));
    out.push('\n');

    for row in rendered.rows() {
        let line: Vec<&str> = row.iter().map(|c| c.text()).collect();
        out.push_str(&line.join(&sep));
        out.push('\n');
    }
    Ok(out)
}

fn fruit_table() -> TableData {
    let mut table = TableData::new();
    table.set_headers(vec!["name".into(), "qty".into(), "price".into()]);
    table.set_rows(vec![
        vec!["apple".into(), 3.into(), 1.5.into()],
        vec!["banana".into(), 10.into(), 0.25.into()],
        vec!["cherry".into(), 200.into(), 12.0.into()],
    ]);
    table
}

#[test]
fn fixed_width_adapter_emits_rectangular_output() {
    let mut table = fruit_table();
    table.register_theme(Theme::named("piped").with_column_separator(" | "));
    table.set_theme("piped").unwrap();

    let text = write_text_table(&mut table).unwrap();
    let expected = "\
 name  | qty | price
:----- | --: | ----:
apple  |   3 |  1.50
banana |  10 |  0.25
cherry | 200 | 12.00
";
    assert_eq!(text, expected);

    // Every line is exactly as wide as the widths the profiles promised.
    let total: usize = {
        let rendered = table.render().unwrap();
        rendered.column_widths().iter().sum::<usize>() + 2 * " | ".len()
    };
    for line in text.lines() {
        assert_eq!(line.chars().count(), total, "ragged line: {line:?}");
    }
}

#[test]
fn adapter_requirements_abort_before_any_output() {
    let mut empty = TableData::new();
    assert_eq!(write_text_table(&mut empty), Err(ConfigError::EmptyHeaders));

    empty.set_headers(vec!["a".into()]);
    assert_eq!(
        write_text_table(&mut empty),
        Err(ConfigError::EmptyValueMatrix)
    );
}

// ============================================================================
// The end-to-end scenarios
// ============================================================================

#[test]
fn scenario_profiles_for_a_two_column_matrix() {
    let mut table = TableData::new();
    table.set_headers(vec!["a".into(), "b".into()]);
    table.set_rows(vec![
        vec![1.into(), 2.5.into()],
        vec![2.into(), 3.0.into()],
    ]);

    let rendered = table.render().unwrap();
    let a = &rendered.profiles()[0];
    assert_eq!(a.type_code(), TypeCode::Integer);
    assert_eq!(a.ascii_width(), 1);
    let b = &rendered.profiles()[1];
    assert_eq!(b.type_code(), TypeCode::RealNumber);
    assert_eq!(b.ascii_width(), 3);
    assert_eq!(b.decimal_places(), Some(1));
}

#[test]
fn scenario_none_renders_empty_or_mapped() {
    let mut table = TableData::new();
    table.set_headers(vec!["n".into()]);
    table.set_rows(vec![vec![RawValue::None]]);

    let rendered = table.render().unwrap();
    assert_eq!(rendered.cell_text(0, 0), Some(" "));
    assert_eq!(rendered.cell_text(0, 0).map(str::trim), Some(""));

    table.set_value_map(ValueMap::new().none("X"));
    let rendered = table.render().unwrap();
    assert_eq!(rendered.cell_text(0, 0), Some("X"));
}

#[test]
fn scenario_comma_separator_with_fraction() {
    let mut table = TableData::new();
    table.set_headers(vec!["amount".into()]);
    table.set_rows(vec![vec![1_234_567.8.into()]]);
    table
        .set_column_style(
            "amount",
            Style::new().thousand_separator(ThousandSeparator::Comma),
        )
        .unwrap();

    let rendered = table.render().unwrap();
    assert_eq!(rendered.cell_text(0, 0), Some("1,234,567.8"));
}

#[test]
fn scenario_unknown_header_style_is_an_error() {
    let mut table = fruit_table();
    let err = table
        .set_column_style("prise", Style::new().bold())
        .unwrap_err();
    assert_eq!(
        err,
        ConfigError::InvalidColumnSpecifier {
            name: "prise".to_string()
        }
    );
}

#[test]
fn scenario_all_infinity_spellings_collapse() {
    let spellings = [
        RawValue::from("Infinity"),
        RawValue::from("inf"),
        RawValue::from("+INF"),
        RawValue::Float(f64::INFINITY),
    ];
    for raw in &spellings {
        let cv = classify(raw);
        assert_eq!(cv.type_code(), TypeCode::Infinity, "for {raw:?}");
        assert_eq!(cv.normalized(), "Infinity", "for {raw:?}");
    }

    let mut table = TableData::new();
    table.set_headers(vec!["f".into()]);
    table.set_rows(spellings.iter().map(|raw| vec![raw.clone()]).collect());
    let rendered = table.render().unwrap();
    for row in 0..4 {
        assert_eq!(rendered.cell_text(row, 0), Some("Infinity"));
    }
}

// ============================================================================
// Properties over the rendered view
// ============================================================================

#[test]
fn right_aligned_numbers_round_trip_through_padding() {
    let values = [-1234i64, 56, 789_000, 0];
    let mut table = TableData::new();
    table.set_headers(vec!["n".into()]);
    table.set_rows(values.iter().map(|n| vec![RawValue::Int(*n)]).collect());

    let rendered = table.render().unwrap();
    assert_eq!(rendered.column_alignments(), vec![Align::Right]);
    for (row, n) in values.iter().enumerate() {
        let text = rendered.cell_text(row, 0).unwrap();
        assert_eq!(text.trim().parse::<i64>().unwrap(), *n);
    }
}

#[test]
fn mixed_columns_are_strings_and_pure_columns_keep_their_type() {
    let mut table = TableData::new();
    table.set_headers(vec!["mixed".into(), "pure".into()]);
    table.set_rows(vec![
        vec![1.into(), 1.into()],
        vec![2.into(), 2.into()],
        vec!["x".into(), 3.into()],
    ]);

    let rendered = table.render().unwrap();
    assert_eq!(rendered.profiles()[0].type_code(), TypeCode::String);
    assert_eq!(rendered.profiles()[1].type_code(), TypeCode::Integer);
}

#[test]
fn reconfiguring_between_renders_takes_effect() {
    let mut table = fruit_table();
    let first = write_text_table(&mut table).unwrap();
    assert!(first.contains(" 1.50"));

    table.set_float_formatting(false);
    let second = write_text_table(&mut table).unwrap();
    assert!(second.contains("1.5"));
    assert!(!second.contains("1.50"));

    table.push_row(vec!["damson".into(), 7.into(), 3.125.into()]);
    let third = write_text_table(&mut table).unwrap();
    assert!(third.contains("damson"));
    assert!(third.contains("3.125"));
}

// ============================================================================
// Stylesheet files
// ============================================================================

#[test]
fn stylesheet_file_styles_columns_end_to_end() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        "qty:\n  thousand_separator: underscore\nname:\n  align: center\n"
    )
    .unwrap();

    let sheet = Stylesheet::from_file(file.path()).unwrap();
    let mut table = TableData::new();
    table.set_headers(vec!["name".into(), "qty".into()]);
    table.set_rows(vec![vec!["ab".into(), 1_000_000.into()]]);
    table.apply_stylesheet(&sheet).unwrap();

    let rendered = table.render().unwrap();
    assert_eq!(rendered.cell_text(0, 1), Some("1_000_000"));
    // "ab" centered under the four-wide header "name".
    assert_eq!(rendered.cell_text(0, 0), Some(" ab "));
    assert_eq!(rendered.column_alignments(), vec![Align::Center, Align::Right]);
}
