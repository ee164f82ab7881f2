//! CSV loading for the expected and measured composition tables.
//!
//! The expected profile carries its header on the first line. The
//! classification-rates export from the measuring pipeline starts with a
//! title line, so its header sits on line two and callers skip one row.

use std::path::Path;

use mockcomm_common::{MockCommError, Result, TableKind};
use tracing::{debug, info};

/// Default number of leading rows dropped from the measured export.
pub const MEASURED_SKIP_ROWS: usize = 1;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// An untyped CSV table: one header row plus string cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.headers.len())
    }

    /// Cell at `row`/`col`; short rows read as empty.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// Load the expected composition table (header on row one).
pub async fn load_expected(path: &Path) -> Result<Table> {
    load_table(TableKind::Expected, path, 0).await
}

/// Load the measured classification table, dropping `skip_rows` leading rows.
pub async fn load_measured(path: &Path, skip_rows: usize) -> Result<Table> {
    load_table(TableKind::Measured, path, skip_rows).await
}

/// Read a CSV file, discard `skip_rows` leading rows and use the next row as header.
pub async fn load_table(kind: TableKind, path: &Path, skip_rows: usize) -> Result<Table> {
    let exists = tokio::fs::try_exists(path)
        .await
        .map_err(|e| MockCommError::Read {
            kind,
            path: path.to_path_buf(),
            source: e.into(),
        })?;
    if !exists {
        return Err(MockCommError::FileNotFound {
            kind,
            path: path.to_path_buf(),
        });
    }

    debug!("Loading {} data from {:?}", kind, path);
    let content = tokio::fs::read(path)
        .await
        .map_err(|e| MockCommError::Read {
            kind,
            path: path.to_path_buf(),
            source: e.into(),
        })?;

    let table = parse_table(&content, skip_rows)
        .map_err(|source| MockCommError::Read {
            kind,
            path: path.to_path_buf(),
            source,
        })?
        .ok_or_else(|| MockCommError::EmptyTable {
            kind,
            path: path.to_path_buf(),
        })?;

    let (n_rows, n_cols) = table.shape();
    info!("{} data columns: {:?}", kind, table.headers());
    info!("{} data shape: ({}, {})", kind, n_rows, n_cols);
    Ok(table)
}

/// Parse CSV bytes into a [`Table`]. Returns `None` when no header row remains
/// after skipping.
pub fn parse_table(content: &[u8], skip_rows: usize) -> std::result::Result<Option<Table>, csv::Error> {
    let content = content.strip_prefix(UTF8_BOM).unwrap_or(content);

    // Rows are read without an implicit header so the skipped preamble may
    // have any number of fields.
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content);

    let mut records = reader.records().skip(skip_rows);

    let headers: Vec<String> = match records.next() {
        Some(record) => record?.iter().map(str::to_string).collect(),
        None => return Ok(None),
    };

    let mut rows = Vec::new();
    for record in records {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(Some(Table::new(headers, rows)))
}
