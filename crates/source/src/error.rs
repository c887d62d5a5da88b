//! Source Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use std::io::Error as IoError;
use std::path::PathBuf;

/// A source dataset error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for source dataset operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
/// Every one of them is fatal to a run: nothing can be ingested or attested
/// without the dataset.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// File does not exist
    #[display("file not found: {}", _0.display())]
    NotFound(#[error(not(source))] PathBuf),
    /// Access denied
    #[display("permission denied: {}", _0.display())]
    PermissionDenied(#[error(not(source))] PathBuf),
    /// Underlying I/O error
    #[display("I/O error: {_0}")]
    Io(IoError),
    /// The dataset root is not a directory.
    #[display("invalid dataset root: {}", _0.display())]
    InvalidRoot(#[error(not(source))] PathBuf),
    /// The package descriptor could not be decoded, or carries no version.
    #[display("malformed package descriptor: {}", _0.display())]
    MalformedDescriptor(#[error(not(source))] PathBuf),
    /// The data file could not be decoded.
    #[display("malformed data file: {}", _0.display())]
    MalformedData(#[error(not(source))] PathBuf),
}
impl From<IoError> for ErrorKind {
    fn from(err: IoError) -> Self {
        Self::Io(err)
    }
}
impl ErrorKind {
    pub(crate) fn from_io(e: IoError, path: impl Into<PathBuf>) -> Self {
        match e.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(path.into()),
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.into()),
            _ => Self::Io(e),
        }
    }
}
