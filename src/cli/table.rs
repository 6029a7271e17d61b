//! # ASCII Table Formatter
//!
//! Renders a query payload as a boxed ASCII table:
//!
//! ```text
//! +----+-------+-----+
//! | id | name  | age |
//! +----+-------+-----+
//! | 1  | Alice | 30  |
//! | 2  | Bob   | 25  |
//! +----+-------+-----+
//! ```
//!
//! Column width is the maximum of the header length and the widest cell in
//! that column. Two passes: measure, then render.

use std::fmt::Write;

use crate::database::ResultSet;

pub struct TableFormatter<'a> {
    headers: Vec<&'a str>,
    widths: Vec<usize>,
    rows: &'a [Vec<String>],
}

impl<'a> TableFormatter<'a> {
    pub fn new(result: &'a ResultSet) -> Self {
        let headers: Vec<&str> = result.columns().iter().map(|c| c.name()).collect();
        let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();

        for row in result.rows() {
            for (i, cell) in row.iter().enumerate() {
                if i < widths.len() {
                    widths[i] = widths[i].max(cell.len());
                }
            }
        }

        Self {
            headers,
            widths,
            rows: result.rows(),
        }
    }

    pub fn render(&self) -> String {
        let mut output = String::new();

        self.write_separator(&mut output);
        self.write_row(&mut output, self.headers.iter().copied());
        self.write_separator(&mut output);

        for row in self.rows {
            self.write_row(&mut output, row.iter().map(String::as_str));
        }

        self.write_separator(&mut output);
        output
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn write_separator(&self, output: &mut String) {
        output.push('+');
        for width in &self.widths {
            for _ in 0..(*width + 2) {
                output.push('-');
            }
            output.push('+');
        }
        output.push('\n');
    }

    fn write_row<'b>(&self, output: &mut String, cells: impl Iterator<Item = &'b str>) {
        output.push('|');
        for (i, cell) in cells.enumerate() {
            let width = self.widths.get(i).copied().unwrap_or(1);
            let _ = write!(output, " {:<width$} |", cell, width = width);
        }
        output.push('\n');
    }
}
