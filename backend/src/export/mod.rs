//! Tabular export
//!
//! Every output of the engine can be flattened into a [`Table`] of typed
//! cells and written as delimited text. Cells carry their unit so the
//! rendered precision is fixed by what the number means, not by the caller.
//!
//! # Rendering
//!
//! | Cell       | Text form            |
//! |------------|----------------------|
//! | `Text`     | as is                |
//! | `Currency` | 2 decimal places     |
//! | `Hours`    | 2 decimal places     |
//! | `Count`    | integer              |
//! | `Ratio`    | 4 decimal places     |
//!
//! Fields containing the delimiter, a double quote or a line break are
//! quoted, with embedded quotes doubled. The header row always comes first.

mod tables;

pub use tables::{
    activity_preview_table, assumptions_table, comparison_table, infrastructure_summary_table,
    infrastructure_table, projection_table, role_cost_table, role_hours_table, roles_table,
    stage_cost_table, stage_duration_table, stage_hours_table, summary_table, Measure,
};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::io::Write;
use thiserror::Error;

/// Default field delimiter
pub const DEFAULT_DELIMITER: char = ',';

/// Errors writing a table
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Delimiter {0:?} cannot be used (quotes and line breaks are reserved)")]
    InvalidDelimiter(char),

    #[error("Row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// One typed value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Cell {
    Text(String),
    Currency(f64),
    /// Hours or weeks
    Hours(f64),
    Count(u64),
    Ratio(f64),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    /// Rendered text form
    pub fn render(&self) -> String {
        match self {
            Cell::Text(text) => text.clone(),
            Cell::Currency(value) | Cell::Hours(value) => format!("{:.2}", value),
            Cell::Count(value) => value.to_string(),
            Cell::Ratio(value) => format!("{:.4}", value),
        }
    }

    fn to_json(&self) -> Value {
        match self {
            Cell::Text(text) => Value::String(text.clone()),
            Cell::Currency(value) | Cell::Hours(value) | Cell::Ratio(value) => Value::from(*value),
            Cell::Count(value) => Value::from(*value),
        }
    }
}

/// A header row plus data rows
///
/// # Example
/// ```
/// use scenario_roi_core::export::{Cell, Table};
///
/// let mut table = Table::new(["Role", "Hourly Rate"]);
/// table.push_row(vec![Cell::text("Engineer, Senior"), Cell::Currency(65.0)]);
///
/// assert_eq!(
///     table.to_delimited(',').unwrap(),
///     "Role,Hourly Rate\n\"Engineer, Senior\",65.00\n"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    header: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new<I, S>(header: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            header: header.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Append a row; widths are checked when the table is written
    pub fn push_row(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    /// Write the table as delimited text
    ///
    /// # Errors
    /// `InvalidDelimiter` for `"`, `\r` or `\n`; `RaggedRow` when a row's
    /// width differs from the header's; `Io` from the writer.
    pub fn write_delimited<W: Write>(&self, writer: &mut W, delimiter: char) -> Result<(), ExportError> {
        if matches!(delimiter, '"' | '\r' | '\n') {
            return Err(ExportError::InvalidDelimiter(delimiter));
        }
        self.check_widths()?;

        write_record(writer, self.header.iter().map(String::as_str), delimiter)?;
        for row in &self.rows {
            let rendered: Vec<String> = row.iter().map(Cell::render).collect();
            write_record(writer, rendered.iter().map(String::as_str), delimiter)?;
        }
        Ok(())
    }

    /// Delimited text as a string
    ///
    /// # Errors
    /// Same as [`Table::write_delimited`].
    pub fn to_delimited(&self, delimiter: char) -> Result<String, ExportError> {
        let mut buffer = Vec::new();
        self.write_delimited(&mut buffer, delimiter)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    /// Rows as JSON objects keyed by header, numbers unrounded
    ///
    /// # Errors
    /// `RaggedRow` when a row's width differs from the header's.
    pub fn to_json(&self) -> Result<Value, ExportError> {
        self.check_widths()?;
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let object: Map<String, Value> = self
                    .header
                    .iter()
                    .cloned()
                    .zip(row.iter().map(Cell::to_json))
                    .collect();
                Value::Object(object)
            })
            .collect();
        Ok(Value::Array(rows))
    }

    fn check_widths(&self) -> Result<(), ExportError> {
        let expected = self.header.len();
        match self.rows.iter().position(|row| row.len() != expected) {
            Some(row) => Err(ExportError::RaggedRow {
                row,
                expected,
                found: self.rows[row].len(),
            }),
            None => Ok(()),
        }
    }
}

fn write_record<'a, W, I>(writer: &mut W, fields: I, delimiter: char) -> Result<(), ExportError>
where
    W: Write,
    I: IntoIterator<Item = &'a str>,
{
    let mut line = String::new();
    for (index, field) in fields.into_iter().enumerate() {
        if index > 0 {
            line.push(delimiter);
        }
        line.push_str(&quote(field, delimiter));
    }
    line.push('\n');
    writer.write_all(line.as_bytes())?;
    Ok(())
}

fn quote(field: &str, delimiter: char) -> String {
    if field.contains(delimiter) || field.contains(['"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
