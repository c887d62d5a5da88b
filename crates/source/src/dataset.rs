//! Loading of a dataset package from the local filesystem.

use crate::Catalog;
use crate::error::{ErrorKind, Result};
use crate::models::{Item, PackageDescriptor};
use exn::ResultExt;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::instrument;

pub const DEFAULT_DESCRIPTOR: &str = "package.json";
pub const DEFAULT_DATA: &str = "dist/data.json";

/// Where the descriptor and the data file live, relative to the package root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub descriptor: PathBuf,
    pub data: PathBuf,
}
impl Default for Layout {
    fn default() -> Self {
        Self {
            descriptor: PathBuf::from(DEFAULT_DESCRIPTOR),
            data: PathBuf::from(DEFAULT_DATA),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Content {
    #[serde(default)]
    site_meta: Catalog,
    #[serde(default)]
    items: Vec<Item>,
}

/// An immutable, versioned dataset snapshot.
///
/// Holds everything the pipeline needs from the source: items in source
/// order, the site catalog, the package descriptor, and the checksum of the
/// data file's raw bytes (computed before decoding, so it attests exactly
/// what was read from disk).
#[derive(Debug, Clone)]
pub struct Dataset {
    pub descriptor: PackageDescriptor,
    pub catalog: Catalog,
    items: Vec<Item>,
    /// Lower-case hex SHA-256 of the data file
    pub checksum: String,
}
impl Dataset {
    /// Load a dataset package rooted at `root`.
    ///
    /// Any failure here is fatal for a run: a missing or unreadable file, a
    /// descriptor without a version, or a data file that isn't the expected
    /// JSON shape.
    #[instrument(skip_all, fields(root = %root.as_ref().display()))]
    pub async fn open(root: impl AsRef<Path>, layout: &Layout) -> Result<Self> {
        let root = root.as_ref();
        let metadata = fs::metadata(root).await.map_err(|e| ErrorKind::from_io(e, root))?;
        if !metadata.is_dir() {
            exn::bail!(ErrorKind::InvalidRoot(root.to_path_buf()));
        }
        let descriptor_path = root.join(&layout.descriptor);
        let data_path = root.join(&layout.data);
        let descriptor = read(&descriptor_path).await?;
        let data = read(&data_path).await?;
        let descriptor = serde_json::from_slice::<PackageDescriptor>(&descriptor)
            .or_raise(|| ErrorKind::MalformedDescriptor(descriptor_path))?;
        let dataset = Self::decode(descriptor, &data).or_raise(|| ErrorKind::MalformedData(data_path))?;
        tracing::info!(
            version = %dataset.descriptor.version,
            items = dataset.items.len(),
            sites = dataset.catalog.len(),
            checksum = %dataset.checksum,
            "Loaded dataset"
        );
        Ok(dataset)
    }

    /// Build a dataset from an already-read descriptor and raw data bytes.
    pub fn from_bytes(descriptor: PackageDescriptor, data: impl AsRef<[u8]>) -> Result<Self> {
        Self::decode(descriptor, data.as_ref()).or_raise(|| ErrorKind::MalformedData(PathBuf::from("<memory>")))
    }

    fn decode(descriptor: PackageDescriptor, data: &[u8]) -> std::result::Result<Self, serde_json::Error> {
        let content = serde_json::from_slice::<Content>(data)?;
        Ok(Self {
            descriptor,
            catalog: content.site_meta,
            items: content.items,
            checksum: checksum(data),
        })
    }

    pub fn version(&self) -> &str {
        &self.descriptor.version
    }

    /// Items in source order.
    pub fn items(&self) -> impl ExactSizeIterator<Item = &Item> {
        self.items.iter()
    }
}

/// Lower-case hex SHA-256 digest of `bytes`.
pub fn checksum(bytes: impl AsRef<[u8]>) -> String {
    format!("{:x}", Sha256::digest(bytes.as_ref()))
}

async fn read(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).await.map_err(|e| ErrorKind::from_io(e, path).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ItemType;
    use std::fs as sync_fs;
    use tempfile::TempDir;

    const DATA: &str = r#"{
        "siteMeta": {
            "bangumi": {"title": "番组计划", "urlTemplate": "https://bangumi.tv/subject/{{id}}", "type": "info"}
        },
        "items": [
            {"title": "けいおん!", "type": "tv", "lang": "ja", "sites": [{"site": "bangumi", "id": "1424"}]},
            {"title": "聲の形", "type": "movie", "lang": "ja"}
        ]
    }"#;

    fn package(data: &str) -> TempDir {
        let dir = TempDir::new().unwrap();
        sync_fs::write(dir.path().join("package.json"), r#"{"name":"fixture","version":"1.2.3"}"#).unwrap();
        sync_fs::create_dir_all(dir.path().join("dist")).unwrap();
        sync_fs::write(dir.path().join("dist/data.json"), data).unwrap();
        dir
    }

    #[test]
    fn test_checksum_is_sha256() {
        assert_eq!(checksum(b""), "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855");
        assert_eq!(checksum(b"abc"), "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad");
    }

    #[tokio::test]
    async fn test_open_package() {
        let dir = package(DATA);
        let dataset = Dataset::open(dir.path(), &Layout::default()).await.unwrap();
        assert_eq!(dataset.version(), "1.2.3");
        assert_eq!(dataset.checksum, checksum(DATA));
        assert_eq!(dataset.catalog.len(), 1);
        let items = dataset.items().collect::<Vec<_>>();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "けいおん!");
        assert_eq!(items[1].kind, ItemType::Movie);
    }

    #[tokio::test]
    async fn test_open_custom_layout() {
        let dir = TempDir::new().unwrap();
        sync_fs::write(dir.path().join("meta.json"), r#"{"version":"9"}"#).unwrap();
        sync_fs::write(dir.path().join("data.json"), r#"{"items":[]}"#).unwrap();
        let layout = Layout {
            descriptor: PathBuf::from("meta.json"),
            data: PathBuf::from("data.json"),
        };
        let dataset = Dataset::open(dir.path(), &layout).await.unwrap();
        assert_eq!(dataset.version(), "9");
        assert!(dataset.catalog.is_empty());
        assert_eq!(dataset.items().len(), 0);
    }

    #[tokio::test]
    async fn test_missing_data_file() {
        let dir = package(DATA);
        sync_fs::remove_file(dir.path().join("dist/data.json")).unwrap();
        let err = Dataset::open(dir.path(), &Layout::default()).await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::NotFound(path) if path.ends_with("dist/data.json")));
    }

    #[tokio::test]
    async fn test_root_is_not_a_directory() {
        let dir = package(DATA);
        let err = Dataset::open(dir.path().join("package.json"), &Layout::default()).await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::InvalidRoot(_)));
    }

    #[tokio::test]
    async fn test_malformed_data_file() {
        let dir = package(r#"{"items": {"not": "a list"}}"#);
        let err = Dataset::open(dir.path(), &Layout::default()).await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::MalformedData(_)));
    }

    #[test]
    fn test_null_optional_fields_do_not_fail_the_dataset() {
        let data = r#"{"items": [
            {"title": "けいおん!", "type": "tv", "lang": "ja"},
            {"title": "聲の形", "type": "movie", "officialSite": null, "titleTranslate": null, "sites": null}
        ]}"#;
        let descriptor: PackageDescriptor = serde_json::from_str(r#"{"version":"1.2.3"}"#).unwrap();
        let dataset = Dataset::from_bytes(descriptor, data).unwrap();
        let items = dataset.items().collect::<Vec<_>>();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].title, "聲の形");
        assert_eq!(items[1].lang, "");
        assert_eq!(items[1].official_site, "");
        assert!(items[1].sites.is_empty());
    }

    #[tokio::test]
    async fn test_descriptor_without_version() {
        let dir = package(DATA);
        sync_fs::write(dir.path().join("package.json"), r#"{"name":"fixture"}"#).unwrap();
        let err = Dataset::open(dir.path(), &Layout::default()).await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::MalformedDescriptor(_)));
    }
}
