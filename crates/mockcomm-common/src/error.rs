use std::path::PathBuf;

use thiserror::Error;

use crate::taxa::TableKind;

#[derive(Debug, Error)]
pub enum MockCommError {
    #[error("{kind} file not found: {}", .path.display())]
    FileNotFound { kind: TableKind, path: PathBuf },

    #[error("Error reading {kind} data from {}: {source}", .path.display())]
    Read {
        kind: TableKind,
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{kind} file {} contains no header row", .path.display())]
    EmptyTable { kind: TableKind, path: PathBuf },

    #[error("Could not find required columns in {kind} data. Available columns: {available:?}")]
    MissingColumns { kind: TableKind, available: Vec<String> },

    #[error("Configured {kind} column '{column}' is not present in the table")]
    UnknownColumn { kind: TableKind, column: String },

    #[error("Invalid abundance in expected data at row {row}: {value:?}")]
    InvalidAbundance { row: usize, value: String },

    #[error("Chart rendering error: {0}")]
    Render(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MockCommError {
    /// Failures the driver reports and stops on without treating the run as fatal.
    ///
    /// Column detection is only soft for the measured table; an expected
    /// table without usable columns is a hard error.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::FileNotFound { .. } | Self::Read { .. } | Self::EmptyTable { .. } => true,
            Self::MissingColumns { kind, .. } => *kind == TableKind::Measured,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, MockCommError>;
