//! Configuration loading and validation.
//!
//! Settings are layered, later layers overriding earlier ones:
//!
//! 1. Built-in defaults.
//! 2. A config file: either the one given explicitly, or `config.toml` in the
//!    platform config directory (e.g. `~/.config/kura/`) when it exists. TOML,
//!    YAML and JSON are picked by file extension.
//! 3. Environment variables prefixed `KURA_`, nested keys separated by `__`
//!    (`KURA_DATABASE__PATH=out.sqlite`).
//! 4. Command-line [`Overrides`].

pub mod error;

use crate::error::{ErrorKind, Result};
use directories::ProjectDirs;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use kura_source::{DEFAULT_DATA, DEFAULT_DESCRIPTOR, Layout};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const ENV_PREFIX: &str = "KURA_";
pub const DEFAULT_DATABASE: &str = "kura.sqlite";
const DEFAULT_CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Run every step, but persist nothing.
    #[serde(default)]
    pub dry_run: bool,
}

/// Location of the source dataset package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Package root directory. Required; there is no sensible default.
    #[serde(default)]
    pub root: PathBuf,
    /// Package descriptor, relative to the root
    pub descriptor: PathBuf,
    /// Data file, relative to the root
    pub data: PathBuf,
}
impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::new(),
            descriptor: PathBuf::from(DEFAULT_DESCRIPTOR),
            data: PathBuf::from(DEFAULT_DATA),
        }
    }
}
impl DatasetConfig {
    pub fn layout(&self) -> Layout {
        Layout {
            descriptor: self.descriptor.clone(),
            data: self.data.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite file, created if missing
    pub path: PathBuf,
}
impl Default for DatabaseConfig {
    fn default() -> Self {
        Self { path: PathBuf::from(DEFAULT_DATABASE) }
    }
}

/// Settings given on the command line, which take precedence over all others.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub dataset: Option<PathBuf>,
    pub database: Option<PathBuf>,
    /// Only ever switches dry-run on; absence of the flag doesn't switch it off.
    pub dry_run: bool,
}
impl Overrides {
    fn apply(&self, mut figment: Figment) -> Figment {
        if let Some(root) = &self.dataset {
            figment = figment.merge(("dataset.root", root));
        }
        if let Some(path) = &self.database {
            figment = figment.merge(("database.path", path));
        }
        if self.dry_run {
            figment = figment.merge(("dry_run", true));
        }
        figment
    }
}

impl Config {
    /// Load the layered configuration and validate it.
    ///
    /// An explicitly given `file` must exist; the default config file is
    /// silently skipped when it doesn't.
    pub fn load(file: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        match file {
            Some(path) if !path.is_file() => exn::bail!(ErrorKind::FileNotFound(path.to_path_buf())),
            Some(path) => figment = merge_file(figment, path)?,
            None => {
                if let Some(path) = default_file().filter(|p| p.is_file()) {
                    figment = merge_file(figment, &path)?;
                }
            },
        }
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));
        Self::from_figment(overrides.apply(figment))
    }

    /// Extract and validate a configuration from an arbitrary set of providers.
    pub fn from_figment(figment: Figment) -> Result<Self> {
        let config: Config = figment.extract().or_raise(|| ErrorKind::Invalid)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let required = [
            ("dataset.root", &self.dataset.root),
            ("dataset.descriptor", &self.dataset.descriptor),
            ("dataset.data", &self.dataset.data),
            ("database.path", &self.database.path),
        ];
        if let Some((key, _)) = required.iter().find(|(_, path)| path.as_os_str().is_empty()) {
            exn::bail!(ErrorKind::Missing(*key));
        }
        Ok(())
    }
}

/// `config.toml` inside the platform's config directory for kura, if the
/// platform has one.
pub fn default_file() -> Option<PathBuf> {
    ProjectDirs::from("", "", "kura").map(|dirs| dirs.config_dir().join(DEFAULT_CONFIG_FILE))
}

fn merge_file(figment: Figment, path: &Path) -> Result<Figment> {
    let extension = path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase);
    tracing::debug!(path = %path.display(), "Loading config file");
    Ok(match extension.as_deref() {
        Some("toml") => figment.merge(Toml::file_exact(path)),
        Some("yaml" | "yml") => figment.merge(Yaml::file_exact(path)),
        Some("json") => figment.merge(Json::file_exact(path)),
        _ => exn::bail!(ErrorKind::UnsupportedFormat(path.to_path_buf())),
    })
}
