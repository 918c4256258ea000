//! Record store errors

use std::path::PathBuf;
use thiserror::Error;

/// Result type for store and persistence operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by the record store and its persistence layer
///
/// None of these are fatal; the CLI reports them and keeps running.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No active record has the requested ID
    #[error("Student with ID '{0}' not found or inactive")]
    NotFound(String),

    /// An active record already uses the ID
    #[error("A student with ID '{0}' already exists")]
    DuplicateId(String),

    /// The store holds its maximum number of records
    #[error("Maximum number of students ({0}) reached")]
    CapacityExceeded(usize),

    /// The ID is empty or contains whitespace or `|`
    #[error("Invalid student ID: '{0}'")]
    InvalidId(String),

    /// A mark lies outside 0..=100
    #[error("Mark {0} is out of range (0-100)")]
    MarkOutOfRange(i32),

    /// A data or report file could not be read or written
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    /// Wrap an I/O error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
