//! Normalization of dataset items into flat relational records.
//!
//! Every function in here is pure: the same [`Item`](kura_source::models::Item)
//! and [`Catalog`](kura_source::Catalog) always produce the same records, in
//! the same order, and nothing ever fails. Fields that can't be interpreted
//! (unparseable dates, missing ids, unknown sites) degrade to `None`.
//!
//! - [`timestamp`]: loose date strings to epoch milliseconds.
//! - [`site`]: classification of site entries into on-air, info and resource.
//! - [`resolve`]: URL resolution against the catalog's templates.
//! - [`Normalizer`]: all of the above applied to a whole item.

mod normalize;
pub mod records;
pub mod resolve;
pub mod site;
pub mod timestamp;

pub use crate::normalize::{Normalizer, join_regions, site_meta_records};
pub use crate::records::{ItemRecord, NormalizedItem, SiteMetaRecord, SiteRecord, TitleTranslationRecord};
