//! Row/column result table with CSV output

use std::borrow::Cow;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::Display;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Table of query results addressed by column id
///
/// Columns carry an id used to look up values and a display name used in
/// the header. The first column of every row is the row identifier, so the
/// first header cell is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultsTable {
    column_ids: Vec<i64>,
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl ResultsTable {
    /// Create an empty table with `(id, display name)` columns
    #[must_use]
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = (i64, S)>,
        S: Into<String>,
    {
        let mut column_ids = Vec::new();
        let mut header = vec![String::new()];
        for (id, name) in columns {
            column_ids.push(id);
            header.push(name.into());
        }
        Self {
            column_ids,
            header,
            rows: Vec::new(),
        }
    }

    /// Append a row
    ///
    /// Columns missing from `values`, or mapped to `None`, become empty
    /// fields. Values for unknown column ids are ignored.
    pub fn add_row<R: Display>(&mut self, row_id: R, values: &HashMap<i64, Option<String>>) {
        let mut row = Vec::with_capacity(self.column_ids.len() + 1);
        row.push(row_id.to_string());
        row.extend(self.column_ids.iter().map(|id| {
            values
                .get(id)
                .and_then(Option::as_deref)
                .unwrap_or_default()
                .to_string()
        }));
        self.rows.push(row);
    }

    /// Header row, starting with the empty row-identifier cell
    #[must_use]
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Data rows in insertion order
    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Column ids in display order
    #[must_use]
    pub fn column_ids(&self) -> &[i64] {
        &self.column_ids
    }

    /// Render header and rows as CSV, one record per line
    #[must_use]
    pub fn to_csv_string(&self) -> String {
        let mut out = String::new();
        for record in self.records() {
            out.push_str(&record);
            out.push('\n');
        }
        out
    }

    /// Write the table as CSV to `output_path`
    ///
    /// # Errors
    /// Returns an error if the file cannot be created or written
    pub fn write_csv(&self, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let mut file = BufWriter::new(File::create(output_path)?);
        for record in self.records() {
            writeln!(file, "{record}")?;
        }
        file.flush()?;
        Ok(())
    }

    fn records(&self) -> impl Iterator<Item = String> + '_ {
        std::iter::once(&self.header)
            .chain(&self.rows)
            .map(|fields| {
                fields
                    .iter()
                    .map(|field| escape_field(field))
                    .collect::<Vec<_>>()
                    .join(",")
            })
    }
}

/// Quote a field if it contains a separator, quote or line break
fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}
