use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, MapperError>;

/// Error type covering the different failure cases that can occur when the
/// tool ingests daily data, maintains the reference table, or writes reports.
#[derive(Debug, Error)]
pub enum MapperError {
    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when JSON parsing or serialization fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Raised when the daily CSV is structurally malformed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Errors bubbled up from the Excel writer implementation.
    #[error("Excel write error: {0}")]
    ExcelWrite(#[from] rust_xlsxwriter::XlsxError),

    /// Errors bubbled up from the Excel reader implementation.
    #[error("Excel read error: {0}")]
    ExcelRead(#[from] calamine::XlsxError),

    /// Raised when the persisted reference table exists but cannot be read.
    #[error("failed to load {path}: {reason}")]
    StorageRead { path: PathBuf, reason: String },

    /// Raised when a required field is missing on a maintenance operation.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Raised when an employee number is already present in the reference table.
    #[error("employee number '{0}' already exists")]
    DuplicateKey(String),

    /// Raised when an update or delete targets an absent employee number.
    #[error("employee number '{0}' not found")]
    NotFound(String),

    /// Raised when an input file lacks a required column.
    #[error("missing required column: {0}")]
    Schema(String),

    /// Raised when a numeric field cannot be parsed.
    #[error("invalid value '{value}' in column {column} at row {row}")]
    Parse {
        row: usize,
        column: String,
        value: String,
    },

    /// Raised when the user provides a path that does not exist.
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
