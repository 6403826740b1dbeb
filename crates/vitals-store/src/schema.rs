//! Data file initialization and schema repair.

use std::io::ErrorKind;
use std::path::Path;

use tracing::debug;
use vitals_types::COLUMNS;

use crate::error::Result;
use crate::table::{ReadFailure, Table};

/// What [`initialize`] did to the data file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SchemaStatus {
    /// The file was absent or zero-length and now holds only the header.
    Created,
    /// The file was unreadable and was replaced with a header-only file.
    Recreated,
    /// The header was rewritten to the required columns.
    Repaired {
        added: Vec<String>,
        dropped: Vec<String>,
    },
    /// The file already had the required header and was left untouched.
    Unchanged,
}

/// Make sure the data file exists and has exactly the required columns.
///
/// A file whose header is already canonical is never rewritten.
pub(crate) fn initialize(path: &Path) -> Result<SchemaStatus> {
    let blank = match std::fs::metadata(path) {
        Ok(meta) => meta.len() == 0,
        Err(e) if e.kind() == ErrorKind::NotFound => true,
        Err(e) => return Err(e.into()),
    };

    if blank {
        Table::empty().write(path)?;
        return Ok(SchemaStatus::Created);
    }

    match Table::read(path) {
        Ok(table) if table.is_canonical() => Ok(SchemaStatus::Unchanged),
        Ok(table) => {
            let added = missing_columns(&table);
            let dropped = unknown_columns(&table);
            table.conform().write(path)?;
            Ok(SchemaStatus::Repaired { added, dropped })
        }
        Err(ReadFailure::Missing) | Err(ReadFailure::Empty) => {
            debug!("Data file {} has no content, recreating", path.display());
            Table::empty().write(path)?;
            Ok(SchemaStatus::Recreated)
        }
        Err(ReadFailure::Corrupt(reason)) => {
            debug!("Data file {} is unreadable ({}), recreating", path.display(), reason);
            Table::empty().write(path)?;
            Ok(SchemaStatus::Recreated)
        }
        Err(ReadFailure::Io(e)) => Err(e.into()),
    }
}

fn missing_columns(table: &Table) -> Vec<String> {
    COLUMNS
        .iter()
        .filter(|c| !table.has_column(c))
        .map(|c| c.to_string())
        .collect()
}

fn unknown_columns(table: &Table) -> Vec<String> {
    table
        .columns()
        .iter()
        .filter(|c| !COLUMNS.contains(&c.as_str()))
        .cloned()
        .collect()
}
