use super::SiteEntry;
use super::site::null_default;
use indexmap::IndexMap;
use serde::Deserialize;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// One cataloged work, exactly as it appears in the source dataset.
///
/// Items are read once and never mutated; every optional field keeps the
/// upstream spelling so that normalization decides what "absent" means.
/// A `null` where a plain value is expected reads the same as a missing field.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Primary title, usually in the original language
    #[serde(default, deserialize_with = "null_default")]
    pub title: String,
    #[serde(rename = "type", default, deserialize_with = "null_default")]
    pub kind: ItemType,
    /// Primary language tag (e.g. `ja`), empty when upstream omits it
    #[serde(default, deserialize_with = "null_default")]
    pub lang: String,
    /// Official website, empty when there isn't one
    #[serde(default, deserialize_with = "null_default")]
    pub official_site: String,
    #[serde(default)]
    pub begin: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
    /// Repeating interval (`R/<start>/<period>`)
    #[serde(default)]
    pub broadcast: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    /// Alternate titles keyed by language tag, in source order
    #[serde(default, deserialize_with = "null_default")]
    pub title_translate: IndexMap<String, Vec<String>>,
    #[serde(default, deserialize_with = "null_default")]
    pub sites: Vec<SiteEntry>,
}

/// Category of a work.
///
/// Matching is exact. Anything else, including a differently cased known
/// category, is kept verbatim rather than rejected; upstream adds new ones
/// from time to time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum ItemType {
    Tv,
    Web,
    Ova,
    Movie,
    Other(String),
}
impl ItemType {
    pub fn as_str(&self) -> &str {
        match self {
            ItemType::Tv => "tv",
            ItemType::Web => "web",
            ItemType::Ova => "ova",
            ItemType::Movie => "movie",
            ItemType::Other(other) => other.as_str(),
        }
    }
}
impl From<String> for ItemType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "tv" => Self::Tv,
            "web" => Self::Web,
            "ova" => Self::Ova,
            "movie" => Self::Movie,
            _ => Self::Other(value),
        }
    }
}
impl Default for ItemType {
    /// A missing category, stored as an empty string.
    fn default() -> Self {
        Self::Other(String::new())
    }
}
impl From<&str> for ItemType {
    fn from(value: &str) -> Self {
        value.to_string().into()
    }
}
impl Display for ItemType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("tv", ItemType::Tv)]
    #[case("web", ItemType::Web)]
    #[case("ova", ItemType::Ova)]
    #[case("movie", ItemType::Movie)]
    #[case("special", ItemType::Other("special".to_string()))]
    #[case("TV", ItemType::Other("TV".to_string()))]
    fn test_item_type(#[case] input: &str, #[case] expected: ItemType) {
        assert_eq!(ItemType::from(input), expected);
    }

    #[rstest]
    #[case("tv")]
    #[case("TV")]
    #[case("Special")]
    #[case(" movie ")]
    fn test_type_keeps_source_spelling(#[case] input: &str) {
        assert_eq!(ItemType::from(input).as_str(), input);
    }

    #[test]
    fn test_deserialize_minimal_item() {
        let item: Item = serde_json::from_str(r#"{"title":"ゆるキャン△","type":"tv","lang":"ja"}"#).unwrap();
        assert_eq!(item.kind, ItemType::Tv);
        assert_eq!(item.official_site, "");
        assert!(item.begin.is_none());
        assert!(item.title_translate.is_empty());
        assert!(item.sites.is_empty());
    }

    #[rstest]
    #[case(r#"{"title":"x","type":"tv","lang":"ja","officialSite":null}"#)]
    #[case(r#"{"title":"x","type":"tv","lang":"ja","titleTranslate":null}"#)]
    #[case(r#"{"title":"x","type":"tv","lang":"ja","sites":null}"#)]
    #[case(r#"{"title":"x","type":"tv","lang":null}"#)]
    #[case(r#"{"title":"x","type":"tv"}"#)]
    #[case(r#"{"title":"x","type":null,"lang":"ja"}"#)]
    #[case(r#"{"title":null,"type":"tv","lang":"ja"}"#)]
    fn test_null_fields_read_as_missing(#[case] json: &str) {
        let item: Item = serde_json::from_str(json).unwrap();
        assert!(item.official_site.is_empty());
        assert!(item.title_translate.is_empty());
        assert!(item.sites.is_empty());
        assert!(matches!(item.lang.as_str(), "" | "ja"));
        assert!(matches!(item.kind.as_str(), "" | "tv"));
        assert!(matches!(item.title.as_str(), "" | "x"));
    }

    #[test]
    fn test_title_translate_keeps_source_order() {
        let json = r#"{
            "title": "x", "type": "tv", "lang": "ja",
            "titleTranslate": {"zh-Hant": ["b"], "en": ["c", "a"], "zh-Hans": ["d"]}
        }"#;
        let item: Item = serde_json::from_str(json).unwrap();
        let langs = item.title_translate.keys().map(String::as_str).collect::<Vec<_>>();
        assert_eq!(langs, ["zh-Hant", "en", "zh-Hans"]);
        assert_eq!(item.title_translate["en"], ["c", "a"]);
    }
}
