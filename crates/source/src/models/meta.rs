use super::site::string_list;
use serde::de::Deserializer;
use serde::Deserialize;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Static catalog entry describing one known site.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteMetaEntry {
    /// Display name
    pub title: String,
    /// URL template containing an `{{id}}` placeholder
    #[serde(default)]
    pub url_template: String,
    /// Channel kind, `None` when upstream uses a kind we don't know about
    #[serde(rename = "type", default, deserialize_with = "lenient_kind")]
    pub kind: Option<SiteKind>,
    #[serde(default, deserialize_with = "string_list")]
    pub regions: Option<Vec<String>>,
}

/// Behavioral category of a site: a closed, three-way enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SiteKind {
    /// Broadcast or streaming platform with an airing window
    OnAir,
    /// Information page (databases, wikis, ...)
    Info,
    /// Torrent/resource index
    Resource,
}
impl SiteKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SiteKind::OnAir => "onair",
            SiteKind::Info => "info",
            SiteKind::Resource => "resource",
        }
    }
}
impl FromStr for SiteKind {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "onair" => Self::OnAir,
            "info" => Self::Info,
            "resource" => Self::Resource,
            _ => return Err(format!("unknown site kind: {s}")),
        })
    }
}
impl Display for SiteKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

fn lenient_kind<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<SiteKind>, D::Error> {
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.parse().ok()))
}
