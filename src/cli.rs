use clap::{ArgAction, Parser};
use kura_config::Overrides;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "kura", version, about = "Materialize an anime-metadata dataset into a normalized SQLite database")]
pub struct Cli {
    /// Config file (TOML, YAML or JSON, by extension)
    #[arg(short, long, env = "KURA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Root directory of the dataset package
    #[arg(short, long)]
    pub dataset: Option<PathBuf>,

    /// SQLite database to write, created if missing
    #[arg(long)]
    pub database: Option<PathBuf>,

    /// Perform every step, but roll back and persist nothing
    #[arg(long)]
    pub dry_run: bool,

    /// More logging (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            dataset: self.dataset.clone(),
            database: self.database.clone(),
            dry_run: self.dry_run,
        }
    }

    /// Log filter used when `RUST_LOG` isn't set.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}
