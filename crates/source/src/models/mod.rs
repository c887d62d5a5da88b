mod item;
mod meta;
mod package;
mod site;

pub use self::item::{Item, ItemType};
pub use self::meta::{SiteKind, SiteMetaEntry};
pub use self::package::PackageDescriptor;
pub use self::site::SiteEntry;
