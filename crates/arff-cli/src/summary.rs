use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use arff_cli::pipeline::{ClassBreakdown, OUTPUT_FILES, SplitOutcome};

use crate::commands::Inspection;

pub fn print_split_summary(outcome: &SplitOutcome, destination: &str) {
    println!("Relation: {}", outcome.relation);
    println!("Encoding: {}", outcome.encoding);
    println!("Output: {destination}");
    if outcome.dropped_rows > 0 {
        println!("Dropped rows: {}", outcome.dropped_rows);
    }

    let sizes = outcome.sizes;
    let total = sizes.total();
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Rows"),
        header_cell("Share"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for (name, rows) in OUTPUT_FILES
        .iter()
        .zip([sizes.train, sizes.validation, sizes.test])
    {
        table.add_row(vec![
            Cell::new(name),
            count_cell(rows),
            dim_cell(share(rows, total)),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total).add_attribute(Attribute::Bold),
        dim_cell("-"),
    ]);
    println!("{table}");

    if let Some(classes) = &outcome.classes {
        print_class_table(classes);
    }
}

fn print_class_table(breakdown: &ClassBreakdown) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell(&breakdown.column),
        header_cell("Train"),
        header_cell("Val"),
        header_cell("Test"),
    ]);
    apply_table_style(&mut table);
    for index in 1..4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for (label, counts) in &breakdown.classes {
        let mut row = vec![Cell::new(label)];
        row.extend(counts.iter().map(|&count| count_cell(count)));
        table.add_row(row);
    }
    println!();
    println!("Classes:");
    println!("{table}");
}

pub fn print_inspection(inspection: &Inspection) {
    println!("Relation: {}", inspection.relation);
    println!("Encoding: {}", inspection.encoding);
    println!("Rows: {}", inspection.rows);
    println!("Dropped rows: {}", inspection.dropped.len());

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Line"),
        header_cell("Attribute"),
        header_cell("Type"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (line, name, kind) in &inspection.attributes {
        table.add_row(vec![dim_cell(line), Cell::new(name), Cell::new(kind)]);
    }
    println!("{table}");

    if !inspection.dropped.is_empty() {
        let mut table = Table::new();
        table.set_header(vec![header_cell("Line"), header_cell("Reason")]);
        apply_table_style(&mut table);
        align_column(&mut table, 0, CellAlignment::Right);
        for (line, reason) in &inspection.dropped {
            table.add_row(vec![Cell::new(line), Cell::new(reason).fg(Color::Yellow)]);
        }
        println!();
        println!("Dropped:");
        println!("{table}");
    }

    println!();
    println!("{}", inspection.preview);
}

fn share(rows: usize, total: usize) -> String {
    if total == 0 {
        return "-".to_string();
    }
    format!("{:.1}%", rows as f64 * 100.0 / total as f64)
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
        .set_width(80);
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
        Cell::new(count)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
