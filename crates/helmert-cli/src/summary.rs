use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use helmert_core::{FittedHelmert, UNKNOWN_CODE};

pub fn print_fit_summary(fitted: &FittedHelmert) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Levels"),
        header_cell("Contrasts"),
        header_cell("Dropped"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for entry in fitted.mapping() {
        let dropped = entry
            .output_columns()
            .into_iter()
            .filter(|name| fitted.drop_cols().contains(name))
            .count();
        table.add_row(vec![
            Cell::new(&entry.column).add_attribute(Attribute::Bold),
            Cell::new(entry.matrix.levels()),
            Cell::new(entry.matrix.n_contrasts()),
            count_cell(dropped),
        ]);
    }
    println!("Input columns: {}", fitted.dim());
    println!("Handle unknown: {}", fitted.ordinal().handle_unknown());
    println!("Impute missing: {}", fitted.ordinal().impute_missing());
    println!("{table}");
    if !fitted.drop_cols().is_empty() {
        println!("Dropped invariant columns: {}", fitted.drop_cols().join(", "));
    }
}

/// One table per encoded column: code, category, coefficients.
pub fn print_contrast_tables(fitted: &FittedHelmert) {
    for (entry, ordinal) in fitted
        .mapping()
        .iter()
        .zip(fitted.ordinal().category_mapping())
    {
        let mut header = vec![header_cell("Code"), header_cell("Category")];
        header.extend(entry.output_columns().iter().map(|name| header_cell(name)));
        let mut table = Table::new();
        table.set_header(header);
        apply_table_style(&mut table);
        align_column(&mut table, 0, CellAlignment::Right);

        let mut rows = vec![(UNKNOWN_CODE, None)];
        rows.extend(ordinal.codes().map(|(value, code)| (code, Some(value))));
        for (code, value) in rows {
            let mut cells = vec![
                Cell::new(code),
                match value {
                    Some(value) => Cell::new(value),
                    None => Cell::new("<unknown>").fg(Color::DarkGrey),
                },
            ];
            if let Some(row) = entry.matrix.row(code) {
                cells.extend(row.iter().map(|v| Cell::new(v).set_alignment(CellAlignment::Right)));
            }
            table.add_row(cells);
        }
        println!();
        println!("{}:", entry.column);
        println!("{table}");
    }
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
        Cell::new(count)
            .fg(Color::Yellow)
            .add_attribute(Attribute::Bold)
    } else {
        Cell::new(count).fg(Color::DarkGrey)
    }
}
