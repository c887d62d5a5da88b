use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use kura_db::Repository;
use kura_source::Dataset;
use time::format_description::well_known::Rfc3339;
use time::{OffsetDateTime, UtcOffset};
use tracing::instrument;

/// Name and version of the crate producing the database.
pub const GENERATOR: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
/// Version of the compiler that built the generator, as `rustc --version`
/// prints it.
pub const RUST_VERSION: &str = env!("KURA_RUSTC_VERSION");

/// Identity of a generated database: which dataset went in, what produced it
/// and what came out.
///
/// Stored as key/value rows in the `meta` table. Recording the same
/// provenance twice updates the rows in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provenance {
    /// Dataset version from the package descriptor
    pub version: String,
    /// SHA-256 of the raw data file
    pub sha256: String,
    /// Always UTC
    pub generated_at: OffsetDateTime,
    pub generator: String,
    pub rust_version: String,
    pub sqlite_version: String,
    pub item_count: u64,
    pub site_count: u64,
}

impl Provenance {
    /// Gather provenance for a dataset that has just been loaded.
    ///
    /// Counts are read back from the database rather than taken from the
    /// batch, so they describe what is actually committed.
    #[instrument(skip_all)]
    pub async fn collect(dataset: &Dataset, repository: &Repository, generated_at: OffsetDateTime) -> Result<Self> {
        let sqlite_version = repository.sqlite_version().await.or_raise(|| ErrorKind::Provenance)?;
        let item_count = repository.count_items().await.or_raise(|| ErrorKind::Provenance)?;
        let site_count = repository.count_sites().await.or_raise(|| ErrorKind::Provenance)?;
        Ok(Self {
            version: dataset.version().to_string(),
            sha256: dataset.checksum.clone(),
            generated_at: generated_at.to_offset(UtcOffset::UTC),
            generator: GENERATOR.to_string(),
            rust_version: RUST_VERSION.to_string(),
            sqlite_version,
            item_count,
            site_count,
        })
    }

    /// The `meta` rows, in a fixed order.
    pub fn entries(&self) -> Result<Vec<(&'static str, String)>> {
        let generated_at_iso = self.generated_at.format(&Rfc3339).or_raise(|| ErrorKind::Provenance)?;
        let generated_at = self.generated_at.unix_timestamp_nanos().div_euclid(1_000_000);
        Ok(vec![
            ("version", self.version.clone()),
            ("sha256", self.sha256.clone()),
            ("generated_at", generated_at.to_string()),
            ("generated_at_iso", generated_at_iso),
            ("generator", self.generator.clone()),
            ("rust_version", self.rust_version.clone()),
            ("sqlite_version", self.sqlite_version.clone()),
            ("item_count", self.item_count.to_string()),
            ("site_count", self.site_count.to_string()),
        ])
    }

    /// Upsert every entry into `meta` in a single transaction.
    #[instrument(skip_all, fields(version = %self.version))]
    pub async fn record(&self, repository: &Repository) -> Result<()> {
        let entries = self.entries()?;
        repository.upsert_meta(&entries).await.or_raise(|| ErrorKind::Provenance)?;
        tracing::info!(
            version = %self.version,
            sha256 = %self.sha256,
            items = self.item_count,
            sites = self.site_count,
            "Recorded provenance"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn provenance() -> Provenance {
        Provenance {
            version: "0.3.150".to_string(),
            sha256: "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad".to_string(),
            generated_at: datetime!(2024-01-02 03:04:05.678 UTC),
            generator: GENERATOR.to_string(),
            rust_version: "1.92".to_string(),
            sqlite_version: "3.46.0".to_string(),
            item_count: 2,
            site_count: 5,
        }
    }

    #[test]
    fn test_entries() {
        let entries = provenance().entries().unwrap();
        let expected = [
            ("version", "0.3.150"),
            ("sha256", "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"),
            ("generated_at", "1704164645678"),
            ("generated_at_iso", "2024-01-02T03:04:05.678Z"),
            ("generator", GENERATOR),
            ("rust_version", "1.92"),
            ("sqlite_version", "3.46.0"),
            ("item_count", "2"),
            ("site_count", "5"),
        ];
        assert_eq!(entries.len(), expected.len());
        for ((key, value), (expected_key, expected_value)) in entries.iter().zip(expected) {
            assert_eq!((*key, value.as_str()), (expected_key, expected_value));
        }
    }

    #[test]
    fn test_rust_version_is_the_compiler() {
        let mut parts = RUST_VERSION.split_whitespace();
        assert_eq!(parts.next(), Some("rustc"));
        let version = parts.next().unwrap();
        let numbers = version.split(['.', '-']).take(3).collect::<Vec<_>>();
        assert_eq!(numbers.len(), 3, "not a full version: {RUST_VERSION}");
        assert!(numbers.iter().all(|n| n.parse::<u32>().is_ok()), "not a full version: {RUST_VERSION}");
    }

    #[test]
    fn test_generator_names_this_crate() {
        assert!(GENERATOR.starts_with("kura-ingest/"));
    }
}
