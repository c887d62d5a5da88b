//! Repository for normalized records.
//!
//! Items, their title translations and their sites are only ever written
//! together, through an [`ItemBatch`] wrapping one transaction. The site
//! catalog and the key/value metadata are smaller, independent writes.

use crate::Database;
use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use kura_normalize::{NormalizedItem, SiteMetaRecord};
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::instrument;

/// Repository for writing normalized records into the output database.
///
/// # Relationships
///
/// - Every title translation and site belongs to exactly one item
/// - Deleting an item cascades to its translations and sites
/// - The site catalog and metadata tables stand alone, keyed by name
///
/// In dry-run mode nothing is persisted: catalog and metadata writes are
/// skipped entirely, and item batches are executed but rolled back.
#[derive(Debug, Clone)]
pub struct Repository {
    pool: SqlitePool,
    dry_run: bool,
}
impl From<&Database> for Repository {
    fn from(db: &Database) -> Self {
        Self { pool: db.pool().clone(), dry_run: false }
    }
}
impl Repository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: SqlitePool, dry_run: bool) -> Self {
        Self { pool, dry_run }
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    // =========================================================================
    // Write
    // =========================================================================

    /// Write the site catalog, replacing any existing row with the same site
    /// name.
    ///
    /// Returns the number of rows written (zero in dry-run mode).
    #[instrument(skip_all, fields(sites = records.len()))]
    pub async fn replace_site_meta(&self, records: &[SiteMetaRecord]) -> Result<u64> {
        if self.dry_run {
            tracing::debug!("Dry run, skipping site catalog");
            return Ok(0);
        }
        let mut tx = self.pool.begin().await.or_raise(|| ErrorKind::Database)?;
        let mut written = 0;
        for record in records {
            written += sqlx::query(include_str!("../queries/replace_site_meta.sql"))
                .bind(&record.site)
                .bind(&record.title)
                .bind(&record.url_template)
                .bind(record.site_type.map(|kind| kind.as_str()))
                .bind(&record.regions)
                .execute(&mut *tx)
                .await
                .or_raise(|| ErrorKind::Database)?
                .rows_affected();
        }
        tx.commit().await.or_raise(|| ErrorKind::Database)?;
        Ok(written)
    }

    /// Open a transaction for clearing and reloading items.
    pub async fn begin_batch(&self) -> Result<ItemBatch> {
        let tx = self.pool.begin().await.or_raise(|| ErrorKind::Database)?;
        Ok(ItemBatch { tx, dry_run: self.dry_run, stats: BatchStats::default() })
    }

    /// Insert or update key/value metadata pairs, all in one transaction.
    ///
    /// Existing keys are updated in place; no key is ever duplicated.
    #[instrument(skip_all, fields(keys = entries.len()))]
    pub async fn upsert_meta<K, V>(&self, entries: &[(K, V)]) -> Result<()>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        if self.dry_run {
            tracing::debug!("Dry run, skipping metadata");
            return Ok(());
        }
        let mut tx = self.pool.begin().await.or_raise(|| ErrorKind::Database)?;
        for (key, value) in entries {
            sqlx::query(include_str!("../queries/upsert_meta.sql"))
                .bind(key.as_ref())
                .bind(value.as_ref())
                .execute(&mut *tx)
                .await
                .or_raise(|| ErrorKind::Database)?;
        }
        tx.commit().await.or_raise(|| ErrorKind::Database)?;
        Ok(())
    }

    // =========================================================================
    // Read
    // =========================================================================

    pub async fn get_meta(&self, key: impl AsRef<str>) -> Result<Option<String>> {
        sqlx::query_scalar(include_str!("../queries/get_meta.sql"))
            .bind(key.as_ref())
            .fetch_optional(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)
    }

    pub async fn count_items(&self) -> Result<u64> {
        self.count(include_str!("../queries/count_items.sql")).await
    }

    #[cfg(test)]
    pub(crate) async fn count_title_translations(&self) -> Result<u64> {
        self.count(include_str!("../queries/count_title_translations.sql")).await
    }

    pub async fn count_sites(&self) -> Result<u64> {
        self.count(include_str!("../queries/count_sites.sql")).await
    }

    #[cfg(test)]
    pub(crate) async fn count_site_meta(&self) -> Result<u64> {
        self.count(include_str!("../queries/count_site_meta.sql")).await
    }

    /// Version string of the SQLite library backing the pool.
    pub async fn sqlite_version(&self) -> Result<String> {
        sqlx::query_scalar(include_str!("../queries/sqlite_version.sql"))
            .fetch_one(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)
    }

    async fn count(&self, query: &'static str) -> Result<u64> {
        let count: i64 = sqlx::query_scalar(query)
            .fetch_one(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        u64::try_from(count).or_raise(|| ErrorKind::InvalidData("row count"))
    }
}

/// Rows written through an [`ItemBatch`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchStats {
    pub items: u64,
    pub title_translations: u64,
    pub sites: u64,
}

/// A single transaction for clearing and reloading items with their children.
///
/// Dropping a batch without committing rolls everything back. The batch holds
/// the pool's only connection, so repository reads must wait until it is
/// committed or rolled back.
pub struct ItemBatch {
    tx: Transaction<'static, Sqlite>,
    dry_run: bool,
    stats: BatchStats,
}
impl ItemBatch {
    /// Delete every item, title translation and site.
    pub async fn clear(&mut self) -> Result<()> {
        sqlx::query(include_str!("../queries/clear_items.sql"))
            .execute(&mut *self.tx)
            .await
            .or_raise(|| ErrorKind::Database)?;
        tracing::debug!("Cleared items");
        Ok(())
    }

    /// Insert one item and all of its children, returning the generated item id.
    pub async fn insert(&mut self, normalized: &NormalizedItem) -> Result<i64> {
        let item = &normalized.item;
        let item_id = sqlx::query(include_str!("../queries/insert_item.sql"))
            .bind(&item.title)
            .bind(&item.kind)
            .bind(&item.lang)
            .bind(&item.official_site)
            .bind(item.begin)
            .bind(&item.broadcast)
            .bind(item.broadcast_begin)
            .bind(item.end)
            .bind(&item.comment)
            .execute(&mut *self.tx)
            .await
            .or_raise(|| ErrorKind::Database)?
            .last_insert_rowid();
        self.stats.items += 1;

        for translation in &normalized.translations {
            sqlx::query(include_str!("../queries/insert_title_translation.sql"))
                .bind(item_id)
                .bind(&translation.language)
                .bind(&translation.title)
                .execute(&mut *self.tx)
                .await
                .or_raise(|| ErrorKind::Database)?;
            self.stats.title_translations += 1;
        }

        for site in &normalized.sites {
            sqlx::query(include_str!("../queries/insert_site.sql"))
                .bind(item_id)
                .bind(&site.site)
                .bind(&site.site_title)
                .bind(site.site_type.as_str())
                .bind(&site.site_id)
                .bind(&site.url)
                .bind(&site.url_template)
                .bind(&site.url_resolved)
                .bind(site.begin)
                .bind(site.end)
                .bind(&site.broadcast)
                .bind(site.broadcast_begin)
                .bind(&site.comment)
                .bind(&site.regions)
                .execute(&mut *self.tx)
                .await
                .or_raise(|| ErrorKind::Database)?;
            self.stats.sites += 1;
        }
        Ok(item_id)
    }

    /// Rows written so far in this batch.
    pub fn stats(&self) -> BatchStats {
        self.stats
    }

    /// Commit the batch, or roll it back in dry-run mode.
    #[instrument(skip(self), fields(items = self.stats.items, dry_run = self.dry_run))]
    pub async fn commit(self) -> Result<BatchStats> {
        let stats = self.stats;
        if self.dry_run {
            self.rollback().await?;
        } else {
            self.tx.commit().await.or_raise(|| ErrorKind::Database)?;
        }
        Ok(stats)
    }

    /// Discard everything written in this batch.
    pub async fn rollback(self) -> Result<()> {
        self.tx.rollback().await.or_raise(|| ErrorKind::Database)
    }
}
