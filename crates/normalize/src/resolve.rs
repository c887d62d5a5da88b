//! URL resolution against the site catalog.
//!
//! A site entry may carry an explicit `url`, an `id` to be substituted into
//! the catalog's URL template, both, or neither. Resolution is an ordered
//! chain of strategies; the first one to produce a URL wins:
//!
//! | Strategy            | Needs              | Produces                           |
//! |---------------------|--------------------|------------------------------------|
//! | [`explicit_url`]    | `url`              | `url`, verbatim                    |
//! | [`templated_id`]    | `id` + catalog hit | template with `{{id}}` substituted |
//!
//! If nothing matches, the resolved URL is `None`. A catalog miss skips the
//! chain entirely and falls back to whatever `url` the entry carries.

use crate::site::Site;
use kura_source::Catalog;
use kura_source::models::SiteMetaEntry;

/// The placeholder substituted in catalog URL templates.
pub const ID_PLACEHOLDER: &str = "{{id}}";

/// A single resolution step: given a site and its catalog entry, maybe a URL.
pub type Strategy = fn(&Site, &SiteMetaEntry) -> Option<String>;

/// Resolution strategies in order of precedence.
pub const STRATEGIES: &[Strategy] = &[explicit_url, templated_id];

/// Outcome of resolving a site's URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Concrete URL, if one could be produced
    pub url: Option<String>,
    /// Catalog template consulted, for traceability
    pub url_template: Option<String>,
    /// Catalog display title of the site
    pub site_title: Option<String>,
}

/// Resolve a site's URL against the catalog. Never fails.
pub fn resolve_url(site: &Site, catalog: &Catalog) -> Resolution {
    let Some(meta) = catalog.get(&site.name) else {
        return Resolution {
            url: non_empty(site.url.as_deref()),
            url_template: None,
            site_title: None,
        };
    };
    Resolution {
        url: STRATEGIES.iter().find_map(|strategy| strategy(site, meta)),
        url_template: Some(meta.url_template.clone()),
        site_title: Some(meta.title.clone()),
    }
}

/// An explicit URL on the entry always wins.
pub fn explicit_url(site: &Site, _meta: &SiteMetaEntry) -> Option<String> {
    non_empty(site.url.as_deref())
}

/// Substitute the entry's id into the catalog template.
///
/// A template without the placeholder is returned unchanged; that's upstream's
/// problem, not a reason to drop the URL.
pub fn templated_id(site: &Site, meta: &SiteMetaEntry) -> Option<String> {
    let id = non_empty(site.id.as_deref())?;
    Some(meta.url_template.replace(ID_PLACEHOLDER, &id))
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kura_source::models::{SiteEntry, SiteKind};
    use rstest::rstest;

    fn catalog() -> Catalog {
        [(
            "example".to_string(),
            SiteMetaEntry {
                title: "Example".to_string(),
                url_template: "https://example.com/{{id}}".to_string(),
                kind: Some(SiteKind::Info),
                regions: None,
            },
        )]
        .into_iter()
        .collect()
    }

    fn site(name: &str, url: Option<&str>, id: Option<&str>) -> Site {
        SiteEntry {
            url: url.map(String::from),
            id: id.map(String::from),
            ..SiteEntry::new(name)
        }
        .into()
    }

    #[rstest]
    #[case(Some("https://x"), Some("5"), Some("https://x"))]
    #[case(Some("https://x"), None, Some("https://x"))]
    #[case(None, Some("5"), Some("https://example.com/5"))]
    #[case(Some(""), Some("5"), Some("https://example.com/5"))]
    #[case(None, None, None)]
    #[case(None, Some(""), None)]
    fn test_catalog_hit(#[case] url: Option<&str>, #[case] id: Option<&str>, #[case] expected: Option<&str>) {
        let resolution = resolve_url(&site("example", url, id), &catalog());
        assert_eq!(resolution.url.as_deref(), expected);
        assert_eq!(resolution.url_template.as_deref(), Some("https://example.com/{{id}}"));
        assert_eq!(resolution.site_title.as_deref(), Some("Example"));
    }

    #[rstest]
    #[case(None, None, None)]
    #[case(None, Some("5"), None)]
    #[case(Some("https://x"), Some("5"), Some("https://x"))]
    fn test_catalog_miss(#[case] url: Option<&str>, #[case] id: Option<&str>, #[case] expected: Option<&str>) {
        let resolution = resolve_url(&site("unknown", url, id), &catalog());
        assert_eq!(resolution.url.as_deref(), expected);
        assert_eq!(resolution.url_template, None);
        assert_eq!(resolution.site_title, None);
    }

    #[test]
    fn test_template_without_placeholder() {
        let meta = SiteMetaEntry {
            title: "Static".to_string(),
            url_template: "https://static.example.com/".to_string(),
            kind: None,
            regions: None,
        };
        let url = templated_id(&site("static", None, Some("5")), &meta);
        assert_eq!(url.as_deref(), Some("https://static.example.com/"));
    }

    #[test]
    fn test_substitutes_every_placeholder() {
        let meta = SiteMetaEntry {
            title: "Twice".to_string(),
            url_template: "https://a.example.com/{{id}}?ref={{id}}".to_string(),
            kind: None,
            regions: None,
        };
        let url = templated_id(&site("twice", None, Some("42")), &meta);
        assert_eq!(url.as_deref(), Some("https://a.example.com/42?ref=42"));
    }

    #[test]
    fn test_strategies_in_isolation() {
        let meta = catalog().get("example").cloned().unwrap();
        let both = site("example", Some("https://x"), Some("5"));
        assert_eq!(explicit_url(&both, &meta).as_deref(), Some("https://x"));
        assert_eq!(templated_id(&both, &meta).as_deref(), Some("https://example.com/5"));
        let neither = site("example", None, None);
        assert!(STRATEGIES.iter().all(|strategy| strategy(&neither, &meta).is_none()));
    }
}
