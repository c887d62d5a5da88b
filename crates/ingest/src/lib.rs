//! Ingestion pipeline: source dataset in, normalized SQLite database out.
//!
//! Ties the other crates together. A [`Dataset`](kura_source::Dataset) is
//! normalized item by item and written through a
//! [`Repository`](kura_db::Repository), then the run is attested with a
//! [`Provenance`] record.

pub mod error;
mod pipeline;
mod provenance;

pub use crate::pipeline::{Report, run, run_at};
pub use crate::provenance::{GENERATOR, Provenance, RUST_VERSION};
