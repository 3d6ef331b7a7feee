use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::types::{ExportReport, ModelRow};

pub fn print_summary(report: &ExportReport) {
    println!("Root: {}", report.root);
    if let Some(dir) = &report.output_dir {
        println!("Output: {}", dir.display());
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Model"),
        header_cell("File"),
        header_cell("Records"),
        header_cell("Suppressed refs"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);

    let mut total_records = 0usize;
    let mut total_suppressed = 0usize;
    for document in &report.documents {
        total_records += document.records;
        total_suppressed += document.suppressed_fields;
        table.add_row(vec![
            Cell::new(&document.model)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(&document.file_name),
            Cell::new(document.records),
            count_cell(document.suppressed_fields),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!("{} files", report.documents.len())),
        Cell::new(total_records).add_attribute(Attribute::Bold),
        count_cell(total_suppressed),
    ]);
    println!("{table}");

    if report.cycles_detected {
        eprintln!("warning: reference cycle detected; declaration order is best-effort");
    }
    if report.dry_run {
        for document in &report.documents {
            if let Some(content) = &document.content {
                println!();
                println!("-- {}", document.file_name);
                print!("{content}");
            }
        }
    }
}

pub fn print_models(rows: &[ModelRow]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Model"),
        header_cell("Fields"),
        header_cell("Entities"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for row in rows {
        table.add_row(vec![
            Cell::new(&row.model)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(row.fields),
            Cell::new(row.entities),
        ]);
    }
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count).fg(Color::Yellow)
    } else {
        Cell::new(count).fg(Color::DarkGrey)
    }
}
