//! Top-level error types for the `kura` binary.

use derive_more::{Display, Error};

/// A fatal error, carrying the tree of errors that led to it.
pub type Error = exn::Exn<ErrorKind>;
pub type Result<T> = std::result::Result<T, Error>;

/// Which collaborator stopped the run.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    #[display("could not load configuration")]
    Config,
    #[display("could not read the source dataset")]
    Source,
    #[display("could not open the database")]
    Database,
    #[display("ingestion failed")]
    Ingest,
}
