//! Expansion of source items into flat records.

use crate::records::{ItemRecord, NormalizedItem, SiteMetaRecord, SiteRecord, TitleTranslationRecord};
use crate::resolve::resolve_url;
use crate::site::Site;
use crate::timestamp::{extract_broadcast_begin, to_timestamp};
use kura_source::Catalog;
use kura_source::models::{Item, SiteEntry};

/// Turns source [`Item`]s into [`NormalizedItem`]s against a site catalog.
///
/// Every derivation is pure and order-preserving: one item record per item,
/// one translation record per (language, title) pair in source order, one
/// site record per site entry in source order. Nothing is skipped, merged or
/// deduplicated, and nothing fails; malformed optional fields become `None`.
#[derive(Debug, Clone, Copy)]
pub struct Normalizer<'a> {
    catalog: &'a Catalog,
}
impl<'a> Normalizer<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    pub fn normalize(&self, item: &Item) -> NormalizedItem {
        let normalized = NormalizedItem {
            item: Self::item(item),
            translations: Self::translations(item),
            sites: item.sites.iter().map(|entry| self.site(entry)).collect(),
        };
        tracing::trace!(
            title = %item.title,
            translations = normalized.translations.len(),
            sites = normalized.sites.len(),
            "Normalized item"
        );
        normalized
    }

    fn item(item: &Item) -> ItemRecord {
        ItemRecord {
            title: item.title.clone(),
            kind: item.kind.as_str().to_string(),
            lang: item.lang.clone(),
            official_site: item.official_site.clone(),
            begin: to_timestamp(item.begin.as_deref()),
            broadcast: item.broadcast.clone(),
            broadcast_begin: extract_broadcast_begin(item.broadcast.as_deref()),
            end: to_timestamp(item.end.as_deref()),
            comment: item.comment.clone(),
        }
    }

    fn translations(item: &Item) -> Vec<TitleTranslationRecord> {
        item.title_translate
            .iter()
            .flat_map(|(language, titles)| {
                titles.iter().map(move |title| TitleTranslationRecord {
                    language: language.clone(),
                    title: title.clone(),
                })
            })
            .collect()
    }

    fn site(&self, entry: &SiteEntry) -> SiteRecord {
        let site = Site::from(entry);
        let resolution = resolve_url(&site, self.catalog);
        SiteRecord {
            site_title: resolution.site_title,
            site_type: site.kind(),
            url_template: resolution.url_template,
            url_resolved: resolution.url,
            begin: to_timestamp(site.begin()),
            end: to_timestamp(site.end.as_deref()),
            broadcast_begin: extract_broadcast_begin(site.broadcast.as_deref()),
            regions: join_regions(site.regions.as_deref()),
            site: site.name,
            site_id: site.id,
            url: site.url,
            broadcast: site.broadcast,
            comment: site.comment,
        }
    }
}

/// Flatten every catalog entry into a [`SiteMetaRecord`], in catalog order.
pub fn site_meta_records(catalog: &Catalog) -> Vec<SiteMetaRecord> {
    catalog
        .iter()
        .map(|(name, entry)| SiteMetaRecord {
            site: name.to_string(),
            title: entry.title.clone(),
            url_template: entry.url_template.clone(),
            site_type: entry.kind,
            regions: join_regions(entry.regions.as_deref()),
        })
        .collect()
}

/// Comma-join region codes; absent or empty lists become `None`, never `""`.
pub fn join_regions(regions: Option<&[String]>) -> Option<String> {
    regions.filter(|r| !r.is_empty()).map(|r| r.join(","))
}
