use crate::Provenance;
use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use kura_db::Repository;
use kura_normalize::{Normalizer, site_meta_records};
use kura_source::Dataset;
use time::OffsetDateTime;
use tracing::instrument;

/// What a run wrote, or would have written in dry-run mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Site catalog rows written (zero in dry-run mode)
    pub site_meta: u64,
    pub items: u64,
    pub title_translations: u64,
    pub sites: u64,
    pub dry_run: bool,
    /// `None` in dry-run mode, where nothing is recorded
    pub provenance: Option<Provenance>,
}

/// Load a dataset into the database, timestamped with the current time.
///
/// See [`run_at`].
pub async fn run(dataset: &Dataset, repository: &Repository) -> Result<Report> {
    run_at(dataset, repository, OffsetDateTime::now_utc()).await
}

/// Load a dataset into the database.
///
/// Three phases, each its own transaction:
///
/// 1. **Site catalog**: every catalog entry replaces the row of the same name.
/// 2. **Items**: all items, translations and sites are cleared, then every
///    item is normalized and inserted in source order. Either the whole
///    reload is committed or none of it is.
/// 3. **Provenance**: dataset identity and row counts are upserted into
///    `meta`.
///
/// Running twice against the same dataset leaves the database in the same
/// state, apart from `generated_at`.
#[instrument(skip_all, fields(version = %dataset.version(), dry_run = repository.is_dry_run()))]
pub async fn run_at(dataset: &Dataset, repository: &Repository, generated_at: OffsetDateTime) -> Result<Report> {
    let catalog = site_meta_records(&dataset.catalog);
    let site_meta = repository.replace_site_meta(&catalog).await.or_raise(|| ErrorKind::SiteCatalog)?;
    tracing::info!(sites = catalog.len(), written = site_meta, "Site catalog written");

    let normalizer = Normalizer::new(&dataset.catalog);
    let mut batch = repository.begin_batch().await.or_raise(|| ErrorKind::Items)?;
    batch.clear().await.or_raise(|| ErrorKind::Items)?;
    for (index, item) in dataset.items().enumerate() {
        let normalized = normalizer.normalize(item);
        let id = batch.insert(&normalized).await.or_raise(|| ErrorKind::Items)?;
        tracing::debug!(index, id, title = %item.title, sites = normalized.sites.len(), "Inserted item");
    }
    let stats = batch.commit().await.or_raise(|| ErrorKind::Items)?;
    tracing::info!(
        items = stats.items,
        title_translations = stats.title_translations,
        sites = stats.sites,
        "Items loaded"
    );

    let provenance = if repository.is_dry_run() {
        tracing::info!("Dry run, items rolled back and provenance skipped");
        None
    } else {
        let provenance = Provenance::collect(dataset, repository, generated_at).await?;
        provenance.record(repository).await?;
        Some(provenance)
    };

    Ok(Report {
        site_meta,
        items: stats.items,
        title_translations: stats.title_translations,
        sites: stats.sites,
        dry_run: repository.is_dry_run(),
        provenance,
    })
}
