use kura_source::models::SiteKind;

/// Flat record for a single item.
///
/// Surrogate ids are assigned by the database when the record is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRecord {
    pub title: String,
    pub kind: String,
    pub lang: String,
    pub official_site: String,
    /// Epoch milliseconds
    pub begin: Option<i64>,
    /// Raw repeating interval, as found upstream
    pub broadcast: Option<String>,
    /// Epoch milliseconds, start of the broadcast interval
    pub broadcast_begin: Option<i64>,
    /// Epoch milliseconds
    pub end: Option<i64>,
    pub comment: Option<String>,
}

/// One alternate title in one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleTranslationRecord {
    pub language: String,
    pub title: String,
}

/// Flat record for a site listed under an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteRecord {
    pub site: String,
    /// Catalog display title, `None` for sites unknown to the catalog
    pub site_title: Option<String>,
    pub site_type: SiteKind,
    pub site_id: Option<String>,
    /// URL carried by the entry itself
    pub url: Option<String>,
    pub url_template: Option<String>,
    pub url_resolved: Option<String>,
    pub begin: Option<i64>,
    pub end: Option<i64>,
    pub broadcast: Option<String>,
    pub broadcast_begin: Option<i64>,
    pub comment: Option<String>,
    /// Comma-joined region codes
    pub regions: Option<String>,
}

/// One source item expanded into its item record and child records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedItem {
    pub item: ItemRecord,
    pub translations: Vec<TitleTranslationRecord>,
    pub sites: Vec<SiteRecord>,
}

/// Flat record for a site catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteMetaRecord {
    pub site: String,
    pub title: String,
    pub url_template: String,
    pub site_type: Option<SiteKind>,
    pub regions: Option<String>,
}
