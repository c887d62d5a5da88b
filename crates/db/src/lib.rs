//! SQLite output database for normalized dataset records.
//!
//! The database is a write-once artifact: every run clears and reloads the
//! item tables, and it can always be rebuilt from the source dataset.
//!
//! # Schema
//! - **`items`**: one row per source item, with epoch-millisecond dates.
//! - **`title_translations`** / **`sites`**: children of an item, linked by
//!   `item_id` and deleted along with it.
//! - **`site_meta`**: the static site catalog, keyed by site name.
//! - **`meta`**: key/value provenance of the loaded dataset.

mod db;
pub mod error;
mod repo;

pub use crate::db::Database;
pub use crate::repo::{BatchStats, ItemBatch, Repository};
