//! `kura`: materialize an anime-metadata dataset into a normalized SQLite
//! database.
//!
//! Exits with `0` on success and `1` on any fatal error, after logging the
//! full error tree.

mod cli;
mod error;

use crate::cli::Cli;
use crate::error::{ErrorKind, Result};
use clap::Parser;
use exn::ResultExt;
use kura_config::Config;
use kura_db::{Database, Repository};
use kura_ingest::Report;
use kura_source::Dataset;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_filter());
    match run(&cli).await {
        Ok(report) => {
            tracing::info!(
                items = report.items,
                title_translations = report.title_translations,
                sites = report.sites,
                site_meta = report.site_meta,
                dry_run = report.dry_run,
                "Done"
            );
            ExitCode::SUCCESS
        },
        Err(err) => {
            tracing::error!("{err:?}");
            ExitCode::FAILURE
        },
    }
}

fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    // Only fails if a global subscriber is already set, which is fine to ignore.
    _ = tracing_subscriber::fmt().with_env_filter(filter).with_target(false).try_init();
}

async fn run(cli: &Cli) -> Result<Report> {
    let config = Config::load(cli.config.as_deref(), &cli.overrides()).or_raise(|| ErrorKind::Config)?;
    tracing::debug!(?config, "Configuration loaded");
    let dataset = Dataset::open(&config.dataset.root, &config.dataset.layout())
        .await
        .or_raise(|| ErrorKind::Source)?;
    let db = Database::connect(&config.database.path).await.or_raise(|| ErrorKind::Database)?;
    let repository = Repository::new(db.pool().clone(), config.dry_run);
    let report = kura_ingest::run(&dataset, &repository).await.or_raise(|| ErrorKind::Ingest);
    db.close().await;
    report
}
