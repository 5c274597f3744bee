use std::io;
use thiserror::Error;

use divref_core::DivRefError;

/// Error type for divref-remap operations.
#[derive(Error, Debug)]
pub enum RemapError {
    /// The query table lacks one of the coordinate columns.
    #[error("Required fields not found in the input file: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// The haplotype table lacks one of the columns a record needs.
    #[error("Haplotype table is missing required columns: {}", .0.join(", "))]
    MissingIndexColumns(Vec<String>),

    /// A query names a haplotype the index does not contain.
    #[error(
        "Haplotype {id} not found in the index (index version {version}). Was the query file produced against a different index version?"
    )]
    UnresolvedHaplotype { id: String, version: String },

    #[error("Invalid strand {0:?}, expected '+' or '-'")]
    InvalidStrand(String),

    #[error("Invalid value {value:?} in column {column}")]
    InvalidValue { column: String, value: String },

    #[error("Line {line} has {found} fields, expected {expected}")]
    MalformedRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("Invalid separator {0:?}: expected a single ASCII character")]
    InvalidSeparator(String),

    #[error("No header line found in {0}")]
    EmptyTable(String),

    #[error(transparent)]
    Core(#[from] DivRefError),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type alias for divref-remap operations.
pub type Result<T> = std::result::Result<T, RemapError>;
