//! Error types for the ingest pipeline.
//!
//! Uses [`exn`] for automatic location tracking and error tree construction.
//! Field-level problems in the source never reach this far; they degrade to
//! `NULL` columns during normalization.

use derive_more::{Display, Error};

/// An ingest error with automatic location tracking via [`exn::Exn`].
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for ingest operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Identifies the pipeline phase that failed.
///
/// Each phase is its own transaction, so the variant also tells the caller
/// what was rolled back:
///
/// - [`ErrorKind::SiteCatalog`]: the site catalog write, nothing else.
/// - [`ErrorKind::Items`]: the whole item batch; the previous load is intact.
/// - [`ErrorKind::Provenance`]: the metadata write; items are already
///   committed and the metadata may describe the previous load.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    #[display("failed to write the site catalog")]
    SiteCatalog,
    #[display("failed to load items")]
    Items,
    #[display("failed to record provenance")]
    Provenance,
}
