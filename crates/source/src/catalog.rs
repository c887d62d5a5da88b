use crate::models::SiteMetaEntry;
use indexmap::IndexMap;
use serde::Deserialize;

/// Site catalog: every known site name mapped to its [`SiteMetaEntry`].
///
/// Keeps the order in which upstream lists the sites, so that writing the
/// catalog out is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Catalog(IndexMap<String, SiteMetaEntry>);
impl Catalog {
    pub fn get(&self, site: impl AsRef<str>) -> Option<&SiteMetaEntry> {
        self.0.get(site.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SiteMetaEntry)> {
        self.0.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
impl FromIterator<(String, SiteMetaEntry)> for Catalog {
    fn from_iter<T: IntoIterator<Item = (String, SiteMetaEntry)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
