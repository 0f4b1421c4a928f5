use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::types::ApplyResult;

/// Print the run summary to stderr so stdout stays clean CSV.
pub fn print_summary(result: &ApplyResult) {
    eprintln!("Input: {} ({} rows)", result.input.display(), result.rows);
    match &result.output {
        Some(path) => eprintln!("Output: {}", path.display()),
        None => eprintln!("Output: <stdout>"),
    }
    if let Some(path) = &result.labels_json {
        eprintln!("Labels: {}", path.display());
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Output"),
        header_cell("Rows"),
        header_cell("Recoded"),
        header_cell("Missing in"),
        header_cell("Unmatched"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 2..=5 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for summary in &result.columns {
        table.add_row(vec![
            Cell::new(&summary.column)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(&summary.output),
            Cell::new(summary.rows),
            Cell::new(summary.recoded),
            count_cell(summary.source_missing, Color::Yellow),
            count_cell(summary.unmatched, Color::Red),
        ]);
    }
    eprintln!("{table}");
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
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
