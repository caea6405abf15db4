//! Table formatting utilities

use prettytable::{Cell, Row, Table};

/// Create a table with bold headers
pub fn create_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table.set_format(*prettytable::format::consts::FORMAT_NO_LINESEP_WITH_TITLE);

    let header_cells: Vec<Cell> = headers
        .iter()
        .map(|h| Cell::new(h).style_spec("b"))
        .collect();
    table.set_titles(Row::new(header_cells));

    table
}

/// Append a row of preformatted cells
pub fn add_table_row<I, S>(table: &mut Table, cells: I)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let row_cells: Vec<Cell> = cells
        .into_iter()
        .map(|s| Cell::new(s.as_ref()))
        .collect();
    table.add_row(Row::new(row_cells));
}

/// Two-column table of labelled values
pub fn key_value_table(title: (&str, &str), rows: &[(&str, String)]) -> Table {
    let mut table = create_table(&[title.0, title.1]);
    for (key, value) in rows {
        add_table_row(&mut table, [*key, value.as_str()]);
    }
    table
}
