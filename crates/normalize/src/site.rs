//! Site classification.

use kura_source::models::{SiteEntry, SiteKind};

/// Sites that index torrents/resources rather than hosting or describing a work.
pub const RESOURCE_SITES: &[&str] = &["dmhy", "mikan", "bangumi_moe"];

/// Classify a raw site entry by its shape and name.
///
/// 1. A `begin` attribute (even an empty one) means an airing window: `onair`.
/// 2. A name on the [`RESOURCE_SITES`] list means `resource`.
/// 3. Everything else is `info`.
pub fn classify(entry: &SiteEntry) -> SiteKind {
    if entry.begin.is_some() {
        return SiteKind::OnAir;
    }
    if RESOURCE_SITES.contains(&entry.site.as_str()) {
        return SiteKind::Resource;
    }
    SiteKind::Info
}

/// Channel-specific attributes of a [`Site`], keyed by its kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Channel {
    /// Broadcast platform; `begin` is kept verbatim (it may be blank).
    OnAir { begin: String },
    Resource,
    Info,
}
impl Channel {
    pub fn kind(&self) -> SiteKind {
        match self {
            Channel::OnAir { .. } => SiteKind::OnAir,
            Channel::Resource => SiteKind::Resource,
            Channel::Info => SiteKind::Info,
        }
    }
}

/// A classified site entry.
///
/// Attributes every kind of site may carry live on the struct; the one that
/// decides the kind lives on [`Channel`]. `end` and `broadcast` stay here
/// because upstream occasionally attaches them to entries without a `begin`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Site {
    pub name: String,
    pub id: Option<String>,
    pub url: Option<String>,
    pub end: Option<String>,
    pub broadcast: Option<String>,
    pub comment: Option<String>,
    pub regions: Option<Vec<String>>,
    pub channel: Channel,
}
impl Site {
    pub fn kind(&self) -> SiteKind {
        self.channel.kind()
    }

    pub fn begin(&self) -> Option<&str> {
        match &self.channel {
            Channel::OnAir { begin } => Some(begin),
            _ => None,
        }
    }
}
impl From<SiteEntry> for Site {
    fn from(entry: SiteEntry) -> Self {
        let channel = match classify(&entry) {
            SiteKind::OnAir => Channel::OnAir { begin: entry.begin.unwrap_or_default() },
            SiteKind::Resource => Channel::Resource,
            SiteKind::Info => Channel::Info,
        };
        Self {
            name: entry.site,
            id: entry.id,
            url: entry.url,
            end: entry.end,
            broadcast: entry.broadcast,
            comment: entry.comment,
            regions: entry.regions,
            channel,
        }
    }
}
impl From<&SiteEntry> for Site {
    fn from(entry: &SiteEntry) -> Self {
        entry.clone().into()
    }
}
