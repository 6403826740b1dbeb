//! In-memory table and its CSV file form.
//!
//! A [`Table`] is a list of named columns with nullable text cells. On disk
//! it is a comma-separated UTF-8 file with a header row; an empty cell is a
//! null.

use std::io::ErrorKind;
use std::path::Path;

use tracing::debug;
use vitals_types::{COLUMNS, VitalRecord};

use crate::error::Result;

/// Why a data file could not be read as a table.
#[derive(Debug)]
pub(crate) enum ReadFailure {
    /// The file does not exist.
    Missing,
    /// The file has no content beyond whitespace.
    Empty,
    /// The content is not a valid table.
    Corrupt(String),
    /// Any other I/O failure.
    Io(std::io::Error),
}

/// A table of named columns with nullable text cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl Default for Table {
    fn default() -> Self {
        Self::empty()
    }
}

impl Table {
    /// Create a table with the given columns and no rows.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// An empty table with the nine required columns.
    pub fn empty() -> Self {
        Self::new(COLUMNS)
    }

    /// Column names in order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Whether a column is present.
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Whether the columns are exactly the required ones, in order.
    pub fn is_canonical(&self) -> bool {
        self.columns.iter().map(String::as_str).eq(COLUMNS)
    }

    /// Append a null-filled column. Returns `false` if it already existed.
    pub fn add_column(&mut self, name: &str) -> bool {
        if self.has_column(name) {
            return false;
        }
        self.columns.push(name.to_string());
        for row in &mut self.rows {
            row.push(None);
        }
        true
    }

    /// Add any missing required columns. Returns whether anything was added.
    pub fn ensure_schema(&mut self) -> bool {
        let mut mutated = false;
        for column in COLUMNS {
            mutated |= self.add_column(column);
        }
        mutated
    }

    /// Reshape to exactly the required columns in order.
    ///
    /// Missing columns are added as nulls and unknown columns are dropped.
    #[must_use]
    pub fn conform(mut self) -> Self {
        self.ensure_schema();
        if self.is_canonical() {
            return self;
        }

        let indices: Vec<usize> = COLUMNS
            .iter()
            .filter_map(|c| self.column_index(c))
            .collect();
        let rows = self
            .rows
            .into_iter()
            .map(|mut row| {
                indices
                    .iter()
                    .map(|&i| row.get_mut(i).and_then(Option::take))
                    .collect()
            })
            .collect();

        Self {
            columns: COLUMNS.iter().map(|c| c.to_string()).collect(),
            rows,
        }
    }

    /// Append a row, padding with nulls or truncating to the column count.
    pub fn push_row(&mut self, mut row: Vec<Option<String>>) {
        row.resize(self.columns.len(), None);
        self.rows.push(row);
    }

    /// Append a record, placing each field under its column by name.
    ///
    /// Fields whose column is absent are dropped; columns unknown to
    /// [`VitalRecord`] are null.
    pub fn push_record(&mut self, record: &VitalRecord) {
        let mut cells = record.to_cells();
        let row = self
            .columns
            .iter()
            .map(|c| {
                COLUMNS
                    .iter()
                    .position(|known| *known == c.as_str())
                    .and_then(|i| cells[i].take())
            })
            .collect();
        self.rows.push(row);
    }

    /// A cell by row and column name. Nulls and missing columns are `None`.
    pub fn get(&self, row: usize, column: &str) -> Option<&str> {
        let col = self.column_index(column)?;
        self.rows.get(row)?.get(col)?.as_deref()
    }

    /// Rows in file order.
    pub fn rows(&self) -> impl Iterator<Item = &[Option<String>]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Rows as records, in file order.
    pub fn records(&self) -> impl Iterator<Item = VitalRecord> + '_ {
        let indices = COLUMNS.map(|c| self.column_index(c));
        self.rows.iter().map(move |row| {
            VitalRecord::from_cells(
                indices.map(|i| i.and_then(|i| row.get(i)).and_then(|c| c.as_deref())),
            )
        })
    }

    /// Parse CSV content.
    pub(crate) fn from_csv(bytes: &[u8]) -> std::result::Result<Self, ReadFailure> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(ReadFailure::Empty);
        }

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(bytes);

        let headers = reader
            .headers()
            .map_err(|e| ReadFailure::Corrupt(e.to_string()))?;
        let mut table = Table::new(headers.iter());

        for result in reader.records() {
            let record = result.map_err(|e| ReadFailure::Corrupt(e.to_string()))?;
            if record.len() > table.columns.len() {
                let line = record.position().map_or(0, |p| p.line());
                return Err(ReadFailure::Corrupt(format!(
                    "line {}: expected {} fields, saw {}",
                    line,
                    table.columns.len(),
                    record.len()
                )));
            }
            table.push_row(record.iter().map(cell).collect());
        }

        Ok(table)
    }

    /// Encode as CSV with a header row.
    pub fn to_csv(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        {
            let mut writer = csv::Writer::from_writer(&mut buf);
            writer.write_record(&self.columns)?;
            for row in &self.rows {
                writer.write_record(row.iter().map(|c| c.as_deref().unwrap_or("")))?;
            }
            writer.flush()?;
        }
        Ok(buf)
    }

    /// Read a table from a file.
    pub(crate) fn read(path: &Path) -> std::result::Result<Self, ReadFailure> {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(ReadFailure::Missing),
            Err(e) => return Err(ReadFailure::Io(e)),
        };
        Self::from_csv(&bytes)
    }

    /// Overwrite a file with this table.
    pub(crate) fn write(&self, path: &Path) -> Result<()> {
        let bytes = self.to_csv()?;
        std::fs::write(path, bytes)?;
        debug!("Wrote {} rows to {}", self.len(), path.display());
        Ok(())
    }
}

fn cell(field: &str) -> Option<String> {
    if field.is_empty() {
        None
    } else {
        Some(field.to_string())
    }
}
