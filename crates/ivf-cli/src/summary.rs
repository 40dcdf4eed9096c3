use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use ivf_model::{Normalized, OverridePrecedence, Severity};

use crate::types::{ConfigSummary, NormalizeReport, PermissionReport};

pub fn print_normalize_report(report: &NormalizeReport) {
    match report.category {
        Some(category) => println!("Field: {} (category {category})", report.field),
        None => println!("Field: {}", report.field),
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Input"),
        header_cell("Output"),
        header_cell("Status"),
        header_cell("Message"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Center);
    for (index, value) in report.values.iter().enumerate() {
        let output_cell = if value.changed() {
            Cell::new(&value.output.value).fg(Color::Green)
        } else {
            dim_cell(&value.output.value)
        };
        table.add_row(vec![
            dim_cell(index + 1),
            Cell::new(&value.input),
            output_cell,
            status_cell(&value.output, value.changed()),
            message_cell(&value.output),
        ]);
    }
    println!("{table}");
    println!(
        "{} value(s), {} error(s), {} warning(s)",
        report.values.len(),
        report.error_count(),
        report.warning_count()
    );
}

/// One JSON object per value, for piping into other tools.
pub fn print_normalize_json(report: &NormalizeReport) -> serde_json::Result<()> {
    for value in &report.values {
        println!("{}", serde_json::to_string(value)?);
    }
    Ok(())
}

pub fn print_config_summary(summary: &ConfigSummary) {
    println!("Config: {}", summary.path.display());
    println!("Precedence: {}", precedence_label(summary.precedence));
    if summary.date_fields.is_empty() {
        println!("Date fields: -");
    } else {
        println!("Date fields: {}", summary.date_fields.join(", "));
    }
    println!("Date format: {}", summary.date_format);
    println!(
        "Past dates: {}",
        if summary.permit_past_dates {
            "permitted"
        } else {
            "reported"
        }
    );

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Dictionary"),
        header_cell("Field"),
        header_cell("Terms"),
        header_cell("Unreachable"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for field in &summary.fields {
        let dictionary = match field.category {
            Some(category) => Cell::new(format!("category {category}")),
            None => Cell::new("common")
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
        };
        let unreachable = if field.unreachable.is_empty() {
            dim_cell("-")
        } else {
            Cell::new(field.unreachable.join(", ")).fg(Color::Yellow)
        };
        table.add_row(vec![
            dictionary,
            Cell::new(&field.field),
            Cell::new(field.terms),
            unreachable,
        ]);
    }
    println!("{table}");
    let unreachable = summary.unreachable_count();
    if unreachable > 0 {
        eprintln!("{unreachable} dictionary term(s) contain uppercase characters and never match");
    }
}

pub fn print_permission_report(report: &PermissionReport) {
    println!(
        "Primary role: {}",
        report.primary_role.as_deref().unwrap_or("-")
    );
    let mut table = Table::new();
    table.set_header(vec![header_cell("Gate"), header_cell("Allowed")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    table.add_row(vec![
        Cell::new("Create categories"),
        allowed_cell(report.create_categories),
    ]);
    table.add_row(vec![
        Cell::new("Create options"),
        allowed_cell(report.create_options),
    ]);
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn precedence_label(precedence: OverridePrecedence) -> &'static str {
    match precedence {
        OverridePrecedence::CommonFirst => "common dictionary overrides category dictionaries",
        OverridePrecedence::TypeFirst => "category dictionaries override common dictionary",
    }
}

fn status_cell(output: &Normalized, changed: bool) -> Cell {
    match output.diagnostics.first().map(|d| d.severity) {
        Some(Severity::Error) => Cell::new("ERROR")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        Some(Severity::Warning) => Cell::new("WARN").fg(Color::Yellow),
        None if changed => Cell::new("✓").fg(Color::Green),
        None => dim_cell("-"),
    }
}

fn message_cell(output: &Normalized) -> Cell {
    let messages: Vec<&str> = output
        .diagnostics
        .iter()
        .map(|d| d.message.as_str())
        .collect();
    if messages.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(messages.join("; "))
    }
}

fn allowed_cell(allowed: bool) -> Cell {
    if allowed {
        Cell::new("yes")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    } else {
        Cell::new("no").fg(Color::Red)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
