use serde::de::{Deserializer, IgnoredAny};
use serde::Deserialize;

/// A site reference carried inside an [`Item`](super::Item).
///
/// Which attributes are present depends on the kind of channel: broadcast
/// platforms carry `begin`/`end`/`broadcast`, catalog pages usually carry just
/// an `id`. Absence is meaningful and preserved as `None`; in particular a
/// `begin` of `""` is present, not absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SiteEntry {
    /// Site name, the key into the site catalog
    #[serde(default, deserialize_with = "null_default")]
    pub site: String,
    /// Site-specific identifier (upstream uses both strings and numbers)
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,
    /// Fully specified URL overriding the catalog template
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub begin: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default)]
    pub broadcast: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    /// Region codes; anything but a list of strings is treated as absent
    #[serde(default, deserialize_with = "string_list")]
    pub regions: Option<Vec<String>>,
}
impl SiteEntry {
    pub fn new(site: impl Into<String>) -> Self {
        Self { site: site.into(), ..Default::default() }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Identifier {
    Text(String),
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    Other(IgnoredAny),
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Identifier>::deserialize(deserializer)? {
        Some(Identifier::Text(s)) => Some(s),
        Some(Identifier::Unsigned(n)) => Some(n.to_string()),
        Some(Identifier::Signed(n)) => Some(n.to_string()),
        Some(Identifier::Float(n)) => Some(n.to_string()),
        Some(Identifier::Other(_)) | None => None,
    })
}

/// `null` reads as the type's default, the same as a missing field.
pub(crate) fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringList {
    List(Vec<String>),
    Other(IgnoredAny),
}

pub(crate) fn string_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Vec<String>>, D::Error> {
    Ok(match Option::<StringList>::deserialize(deserializer)? {
        Some(StringList::List(list)) => Some(list),
        Some(StringList::Other(_)) | None => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(r#"{"site":"bangumi","id":"302189"}"#, Some("302189"))]
    #[case(r#"{"site":"bangumi","id":302189}"#, Some("302189"))]
    #[case(r#"{"site":"bangumi","id":null}"#, None)]
    #[case(r#"{"site":"bangumi","id":{"nested":true}}"#, None)]
    #[case(r#"{"site":"bangumi"}"#, None)]
    fn test_identifier(#[case] json: &str, #[case] expected: Option<&str>) {
        let entry: SiteEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.id.as_deref(), expected);
    }

    #[rstest]
    #[case(r#"{"site":"bilibili","regions":["CN","HK"]}"#, Some(vec!["CN", "HK"]))]
    #[case(r#"{"site":"bilibili","regions":[]}"#, Some(vec![]))]
    #[case(r#"{"site":"bilibili","regions":"CN"}"#, None)]
    #[case(r#"{"site":"bilibili","regions":null}"#, None)]
    #[case(r#"{"site":"bilibili"}"#, None)]
    fn test_regions(#[case] json: &str, #[case] expected: Option<Vec<&str>>) {
        let entry: SiteEntry = serde_json::from_str(json).unwrap();
        let expected = expected.map(|r| r.into_iter().map(String::from).collect::<Vec<_>>());
        assert_eq!(entry.regions, expected);
    }

    #[test]
    fn test_null_site_name_is_empty() {
        let entry: SiteEntry = serde_json::from_str(r#"{"site":null,"id":"1"}"#).unwrap();
        assert_eq!(entry.site, "");
        assert_eq!(entry.id.as_deref(), Some("1"));
    }

    #[test]
    fn test_empty_begin_is_present() {
        let entry: SiteEntry = serde_json::from_str(r#"{"site":"bilibili","begin":""}"#).unwrap();
        assert_eq!(entry.begin.as_deref(), Some(""));
    }
}
