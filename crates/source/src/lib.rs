//! Source dataset access.
//!
//! A dataset package is a directory holding a machine-readable descriptor
//! (`package.json`, for the version string) and a JSON data file with two
//! top-level keys:
//!
//! - **`siteMeta`**: the static site catalog, site name to display title, URL
//!   template and channel kind ([`Catalog`]).
//! - **`items`**: the works themselves, each with its alternate titles and
//!   the sites it is listed on ([`models::Item`]).
//!
//! The models here mirror the upstream shape as closely as possible and make
//! no decisions about it; turning them into flat records is the job of the
//! normalization crate.

mod catalog;
mod dataset;
pub mod error;
pub mod models;

pub use crate::catalog::Catalog;
pub use crate::dataset::{DEFAULT_DATA, DEFAULT_DESCRIPTOR, Dataset, Layout, checksum};
