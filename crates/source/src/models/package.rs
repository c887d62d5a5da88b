use serde::Deserialize;

/// The machine-readable descriptor shipped alongside the data file.
///
/// Only the fields needed for provenance are decoded; everything else in the
/// descriptor is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PackageDescriptor {
    #[serde(default)]
    pub name: Option<String>,
    pub version: String,
}
