use std::io::Read;
use std::path::Path;

use csv::{ErrorKind, ReaderBuilder};

use crate::errors::{RemapError, Result};
use crate::utils::{get_dynamic_reader, separator_byte};

///
/// A delimited table with a header line, kept as strings so that columns the remapper does
/// not understand pass through untouched.
///
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Ragged rows get a line-numbered error of their own, everything else stays a csv error.
fn row_error(err: csv::Error) -> RemapError {
    if let ErrorKind::UnequalLengths {
        pos,
        expected_len,
        len,
    } = err.kind()
    {
        return RemapError::MalformedRow {
            line: pos.as_ref().map_or(0, |p| p.line() as usize),
            expected: *expected_len as usize,
            found: *len as usize,
        };
    }
    err.into()
}

impl Table {
    ///
    /// Read a table from any reader. Quoted fields follow the usual CSV rules, whatever the
    /// separator.
    ///
    /// # Arguments
    /// - reader: source of the table
    /// - sep: field separator
    /// - name: used in error messages
    ///
    pub fn from_reader<R: Read>(reader: R, sep: char, name: &str) -> Result<Self> {
        let mut rdr = ReaderBuilder::new()
            .delimiter(separator_byte(sep)?)
            .flexible(false)
            .from_reader(reader);

        let columns: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
        if columns.is_empty() {
            return Err(RemapError::EmptyTable(name.to_string()));
        }

        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record.map_err(row_error)?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(Table { columns, rows })
    }

    ///
    /// Read a table from disk, gzip'd or not
    ///
    pub fn from_path(path: &Path, sep: char) -> Result<Self> {
        let reader = get_dynamic_reader(path)?;
        Table::from_reader(reader, sep, &path.display().to_string())
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    ///
    /// Look up several columns at once, naming every one that is missing.
    ///
    pub fn require_columns<const N: usize>(
        &self,
        names: [&str; N],
    ) -> std::result::Result<[usize; N], Vec<String>> {
        let mut missing = Vec::new();
        let mut indices = [0; N];
        for (slot, name) in indices.iter_mut().zip(names) {
            match self.column_index(name) {
                Some(i) => *slot = i,
                None => missing.push(name.to_string()),
            }
        }

        if missing.is_empty() {
            Ok(indices)
        } else {
            Err(missing)
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
