//! # Configuration
//!
//! Settings are loaded with [`confique`] from a TOML file and the environment.
//!
//! ## Resolution order
//!
//! 1. **Environment variables**: `PRODCAT_MAX_PRODUCTS`, `PRODCAT_BACKEND`, ...
//! 2. **Config file**: the path given with `--config`, else `prodcat.toml` in
//!    the platform config directory (via the `directories` crate). A missing
//!    default file is not an error.
//! 3. **Compiled defaults**: via `#[config(default = ...)]` or the accessors
//!    below.
//!
//! Command-line flags such as `--backend` are applied on top by the CLI.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `max_products` | `150` | Most products the catalog may hold |
//! | `backend` | `file` | `seed`, `file` or `remote` |
//! | `data_file` | `<data dir>/products.json` | File used by the `file` backend |
//! | `remote_url` | none | Base URL of the `remote` backend |
//! | `seed_file` | none | Interchange text used to seed the `seed` backend |
//! | `declaration_name` | `HARDCODED_PRODUCTS` | Constant name used by `export` |
//! | `admin_passcode` | none | Shared passcode for admin commands |

use crate::codec::{self, ExportStyle, DEFAULT_DECLARATION_NAME};
use crate::error::{CatalogError, Result};
use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const CONFIG_FILENAME: &str = "prodcat.toml";
const DATA_FILENAME: &str = "products.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// In-memory, reseeded on every start.
    Seed,
    /// One JSON file on local disk.
    #[default]
    File,
    /// HTTP service.
    Remote,
}

impl FromStr for BackendKind {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "seed" | "memory" => Ok(BackendKind::Seed),
            "file" => Ok(BackendKind::File),
            "remote" => Ok(BackendKind::Remote),
            other => Err(CatalogError::Config(format!(
                "unknown backend {:?} (expected seed, file or remote)",
                other
            ))),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BackendKind::Seed => "seed",
            BackendKind::File => "file",
            BackendKind::Remote => "remote",
        };
        f.write_str(name)
    }
}

fn parse_backend(value: &str) -> Result<BackendKind> {
    value.parse()
}

/// Configuration for prodcat, stored in `prodcat.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Most products the catalog may hold. Must be at least 1.
    #[config(env = "PRODCAT_MAX_PRODUCTS", default = 150)]
    pub max_products: usize,

    /// Where the catalog lives: "seed", "file" or "remote".
    /// When absent, defaults to "file".
    #[config(env = "PRODCAT_BACKEND", parse_env = parse_backend)]
    pub backend: Option<BackendKind>,

    /// JSON file used by the file backend.
    #[config(env = "PRODCAT_DATA_FILE")]
    pub data_file: Option<PathBuf>,

    /// Base URL of the remote catalog service.
    #[config(env = "PRODCAT_REMOTE_URL")]
    pub remote_url: Option<String>,

    /// Interchange text used to seed the in-memory backend.
    #[config(env = "PRODCAT_SEED_FILE")]
    pub seed_file: Option<PathBuf>,

    /// Constant name written by `export`.
    #[config(env = "PRODCAT_DECLARATION_NAME", default = "HARDCODED_PRODUCTS")]
    pub declaration_name: String,

    /// Shared passcode for admin commands. Admin access is refused when unset.
    #[config(env = "PRODCAT_ADMIN_PASSCODE")]
    pub admin_passcode: Option<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            max_products: 150,
            backend: None,
            data_file: None,
            remote_url: None,
            seed_file: None,
            declaration_name: DEFAULT_DECLARATION_NAME.to_string(),
            admin_passcode: None,
        }
    }
}

impl CatalogConfig {
    /// Loads from the environment and `path`, or from the default config file
    /// when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) if !path.exists() => {
                return Err(CatalogError::Config(format!(
                    "config file not found: {}",
                    path.display()
                )))
            }
            Some(path) => Some(path.to_path_buf()),
            None => default_config_file(),
        };

        let mut builder = Self::builder().env();
        if let Some(file) = &file {
            tracing::debug!(path = %file.display(), "reading config file");
            builder = builder.file(file);
        }

        let config = builder
            .load()
            .map_err(|e| CatalogError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_products == 0 {
            return Err(CatalogError::Config(
                "max_products must be at least 1".to_string(),
            ));
        }
        if !codec::is_identifier(&self.declaration_name) {
            return Err(CatalogError::Config(format!(
                "declaration_name {:?} is not a valid identifier",
                self.declaration_name
            )));
        }
        if self.backend_kind() == BackendKind::Remote && self.remote_url.is_none() {
            return Err(CatalogError::Config(
                "remote backend selected but remote_url is not set".to_string(),
            ));
        }
        Ok(())
    }

    pub fn backend_kind(&self) -> BackendKind {
        self.backend.unwrap_or_default()
    }

    /// The file backend's path, falling back to the platform data directory.
    pub fn data_file(&self) -> PathBuf {
        self.data_file.clone().unwrap_or_else(|| {
            ProjectDirs::from("com", "prodcat", "prodcat")
                .map(|dirs| dirs.data_dir().join(DATA_FILENAME))
                .unwrap_or_else(|| PathBuf::from(DATA_FILENAME))
        })
    }

    pub fn export_style(&self) -> ExportStyle {
        ExportStyle::Declaration(self.declaration_name.clone())
    }

    /// Effective settings for display. The passcode is masked.
    pub fn list_all(&self) -> Vec<(&'static str, String)> {
        let unset = || "(unset)".to_string();
        vec![
            ("max_products", self.max_products.to_string()),
            ("backend", self.backend_kind().to_string()),
            ("data_file", self.data_file().display().to_string()),
            (
                "remote_url",
                self.remote_url.clone().unwrap_or_else(unset),
            ),
            (
                "seed_file",
                self.seed_file
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "(built-in)".to_string()),
            ),
            ("declaration_name", self.declaration_name.clone()),
            (
                "admin_passcode",
                match &self.admin_passcode {
                    Some(_) => "(set)".to_string(),
                    None => unset(),
                },
            ),
        ]
    }

    /// A commented `prodcat.toml` listing every setting.
    pub fn template() -> String {
        confique::toml::template::<Self>(confique::toml::FormatOptions::default())
    }
}

/// `prodcat.toml` in the platform config directory, if one can be determined.
pub fn default_config_file() -> Option<PathBuf> {
    ProjectDirs::from("com", "prodcat", "prodcat")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}
