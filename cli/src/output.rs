//! Column-aligned terminal output
//!
//! Labels and values are padded to the widest entry per column, so a
//! report reads as a table without any table machinery.

use economics::ReportRow;

/// Print rows of cells, padding every column but the last.
pub fn print_columns(rows: &[Vec<String>], delimiter: &str) {
    if rows.is_empty() {
        return;
    }

    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![0usize; columns];
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    for row in rows {
        let mut line = String::new();
        for (i, cell) in row.iter().enumerate() {
            line.push_str(cell);
            if i + 1 < row.len() {
                let pad = widths[i] - cell.chars().count();
                line.push_str(&" ".repeat(pad));
                line.push_str(delimiter);
            }
        }
        println!("{}", line.trim_end());
    }
}

/// Two-column convenience for label/value pairs.
pub fn print_pairs(rows: &[(String, String)]) {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|(label, value)| vec![label.clone(), value.clone()])
        .collect();
    print_columns(&cells, " ");
}

/// Render a profitability report in the same aligned style.
pub fn print_report(rows: &[ReportRow]) {
    let pairs: Vec<(String, String)> = rows
        .iter()
        .map(|row| (row.label.clone(), row.value.clone()))
        .collect();
    print_pairs(&pairs);
}
