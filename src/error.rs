use std::fmt;
use std::path::PathBuf;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ReconError>;

/// Error type covering the different failure cases that can occur when the
/// tool ingests, merges, or emits spreadsheet data.
///
/// The `Display`/`Error`/`From` impls are written by hand because thiserror's
/// derive unconditionally treats a field named `source` as the error source,
/// and `MissingColumns::source` is a plain `String` naming the input file.
#[derive(Debug)]
pub enum ReconError {
    /// Wrapper for IO failures such as reading or writing files.
    Io(std::io::Error),

    /// Raised when serialising the run summary fails.
    Json(serde_json::Error),

    /// Errors bubbled up from the Excel reader implementation.
    ExcelRead(calamine::XlsxError),

    /// Errors bubbled up from the Excel writer implementation.
    ExcelWrite(rust_xlsxwriter::XlsxError),

    /// Raised when the user provides a path that does not exist.
    MissingInput(PathBuf),

    /// Raised when a source is missing one or more required columns.
    MissingColumns {
        /// Human-readable name of the offending source.
        source: String,
        /// Every required column that is absent from its header row.
        columns: Vec<String>,
    },

    /// Raised when a workbook has no usable sheet or header row.
    InvalidWorkbook(String),

    /// Raised when the tracing subscriber fails to initialise.
    Logging(String),
}

impl fmt::Display for ReconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReconError::Io(err) => write!(f, "I/O error: {err}"),
            ReconError::Json(err) => write!(f, "JSON error: {err}"),
            ReconError::ExcelRead(err) => write!(f, "Excel read error: {err}"),
            ReconError::ExcelWrite(err) => write!(f, "Excel write error: {err}"),
            ReconError::MissingInput(path) => {
                write!(f, "input file not found: {}", path.display())
            }
            ReconError::MissingColumns { source, columns } => write!(
                f,
                "{source} file does not contain required column(s): {}",
                columns.join(", ")
            ),
            ReconError::InvalidWorkbook(msg) => {
                write!(f, "invalid workbook structure: {msg}")
            }
            ReconError::Logging(msg) => {
                write!(f, "failed to initialise logging: {msg}")
            }
        }
    }
}

impl std::error::Error for ReconError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReconError::Io(err) => Some(err),
            ReconError::Json(err) => Some(err),
            ReconError::ExcelRead(err) => Some(err),
            ReconError::ExcelWrite(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ReconError {
    fn from(err: std::io::Error) -> Self {
        ReconError::Io(err)
    }
}

impl From<serde_json::Error> for ReconError {
    fn from(err: serde_json::Error) -> Self {
        ReconError::Json(err)
    }
}

impl From<calamine::XlsxError> for ReconError {
    fn from(err: calamine::XlsxError) -> Self {
        ReconError::ExcelRead(err)
    }
}

impl From<rust_xlsxwriter::XlsxError> for ReconError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        ReconError::ExcelWrite(err)
    }
}
