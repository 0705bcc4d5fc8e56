//! CSV loading into an in-memory table.

use std::collections::BTreeSet;
use std::fs::File;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info};

use crate::error::ProcessError;

/// Cell spellings read as missing rather than as a value.
pub const NA_VALUES: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Whether a cell holds one of the [`NA_VALUES`] markers. Matching is exact.
pub fn is_missing(cell: &str) -> bool {
    NA_VALUES.contains(&cell)
}

/// Names of the columns present in a loaded [`Table`].
///
/// Names are matched exactly and case-sensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnSet(BTreeSet<String>);

impl ColumnSet {
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }
}

impl<S: Into<String>> FromIterator<S> for ColumnSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        ColumnSet(iter.into_iter().map(Into::into).collect())
    }
}

/// A delimited table held fully in memory.
#[derive(Debug, Clone)]
pub struct Table {
    headers: Vec<String>,
    columns: ColumnSet,
    rows: Vec<StringRecord>,
}

impl Table {
    /// Builds a table from a header row and data rows.
    ///
    /// Rows shorter than the header are kept; their missing trailing cells
    /// read back as absent.
    pub fn new(headers: Vec<String>, rows: Vec<StringRecord>) -> Self {
        let columns = headers.iter().cloned().collect();
        Table {
            headers,
            columns,
            rows,
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn columns(&self) -> &ColumnSet {
        &self.columns
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Iterates the cells of column `name`, one per row, or `None` if the
    /// column does not exist. The first column wins if a name repeats.
    pub fn column<'a>(
        &'a self,
        name: &str,
    ) -> Option<impl Iterator<Item = Option<&'a str>> + use<'a>> {
        let index = self.headers.iter().position(|h| h == name)?;
        Some(self.rows.iter().map(move |row| row.get(index)))
    }
}

/// Reads the CSV file at `path` into a [`Table`].
///
/// The file handle is released before this function returns.
///
/// # Errors
///
/// Returns [`ProcessError::FileNotFound`] if `path` is not a readable regular
/// file, and [`ProcessError::Unexpected`] if the contents are empty, not
/// UTF-8, or a data row has more fields than the header.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn load(path: &Path) -> Result<Table, ProcessError> {
    if !path.is_file() {
        debug!("Input is not a regular file");
        return Err(ProcessError::FileNotFound(path.to_path_buf()));
    }

    let file = File::open(path).map_err(|e| {
        debug!(error = %e, "Failed to open input");
        ProcessError::FileNotFound(path.to_path_buf())
    })?;

    let mut reader = ReaderBuilder::new().flexible(true).from_reader(file);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if headers.is_empty() {
        return Err(ProcessError::unexpected("no columns to parse from file"));
    }

    let width = headers.len();
    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        if record.len() > width {
            let line = record.position().map_or(0, |p| p.line());
            return Err(ProcessError::unexpected(format!(
                "expected {} fields in line {}, saw {}",
                width,
                line,
                record.len()
            )));
        }
        rows.push(record);
    }

    info!(columns = width, rows = rows.len(), "Table loaded");
    Ok(Table::new(headers, rows))
}
