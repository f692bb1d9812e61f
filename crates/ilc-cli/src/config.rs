//! Workspace configuration (`ilc.yaml`).
//!
//! ```yaml
//! schema_dir: schemas          # optional, relative to the workspace root
//! version:
//!   current_version: "0.1.7"
//!   files:
//!     - filename: Cargo.toml
//!       search: 'version = "{current_version}"'
//!       replace: 'version = "{new_version}"'
//! ```
//!
//! The schema directory can be overridden with `ILC_SCHEMA_DIR`.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::version::VersionConfig;

/// Configuration file name looked up in the workspace root.
pub const CONFIG_FILE: &str = "ilc.yaml";

/// Environment variable overriding the schema directory.
pub const SCHEMA_DIR_ENV: &str = "ILC_SCHEMA_DIR";

/// Schema directory used when neither the environment nor the config names one.
pub const DEFAULT_SCHEMA_DIR: &str = "schemas";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("{path} has no `version` section")]
    MissingVersion { path: String },
}

/// Parsed `ilc.yaml`. Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IlcConfig {
    #[serde(default)]
    pub schema_dir: Option<PathBuf>,
    #[serde(default)]
    pub version: Option<VersionConfig>,
}

impl IlcConfig {
    pub fn from_yaml(content: &str, path: &Path) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&content, path)
    }
}

/// The root directory commands operate in, and its configuration.
#[derive(Debug, Clone)]
pub struct Workspace {
    pub root: PathBuf,
    pub config: IlcConfig,
    /// Where the configuration was read from, if a file was found.
    pub config_path: Option<PathBuf>,
}

impl Workspace {
    /// A workspace with no configuration file.
    pub fn bare(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            config: IlcConfig::default(),
            config_path: None,
        }
    }

    /// Load the workspace whose configuration is `config_path`. The root is
    /// the directory containing the file.
    pub fn from_config_file(config_path: &Path) -> Result<Self, ConfigError> {
        let config = IlcConfig::load(config_path)?;
        let root = match config_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Ok(Self {
            root,
            config,
            config_path: Some(config_path.to_path_buf()),
        })
    }

    /// Walk up from `start` to the first directory holding `ilc.yaml` and
    /// load it. Falls back to a bare workspace at `start`.
    pub fn discover(start: &Path) -> Result<Self, ConfigError> {
        match find_config(start) {
            Some(path) => Self::from_config_file(&path),
            None => {
                tracing::warn!(
                    start = %start.display(),
                    "no {CONFIG_FILE} found; using defaults"
                );
                Ok(Self::bare(start))
            }
        }
    }

    /// The schema directory: `ILC_SCHEMA_DIR`, then `schema_dir` from the
    /// config (relative to the root), then `<root>/schemas`.
    pub fn schema_dir(&self) -> PathBuf {
        self.schema_dir_with(std::env::var_os(SCHEMA_DIR_ENV))
    }

    fn schema_dir_with(&self, env_override: Option<OsString>) -> PathBuf {
        if let Some(dir) = env_override.filter(|d| !d.is_empty()) {
            return PathBuf::from(dir);
        }
        let configured = self
            .config
            .schema_dir
            .as_deref()
            .unwrap_or(Path::new(DEFAULT_SCHEMA_DIR));
        self.root.join(configured)
    }

    /// Where a document path given on the command line lives. Absolute
    /// paths are kept; a relative path is taken under the root when that
    /// file exists there, and from the current directory otherwise.
    pub fn locate(&self, document: &Path) -> PathBuf {
        if document.is_absolute() {
            return document.to_path_buf();
        }
        Some(self.root.join(document))
            .filter(|under_root| under_root.exists())
            .unwrap_or_else(|| document.to_path_buf())
    }

    /// The `version` section, required by the `version` commands.
    pub fn version_config(&self) -> Result<&VersionConfig, ConfigError> {
        self.config
            .version
            .as_ref()
            .ok_or_else(|| ConfigError::MissingVersion {
                path: self
                    .config_path
                    .as_deref()
                    .unwrap_or(Path::new(CONFIG_FILE))
                    .display()
                    .to_string(),
            })
    }
}

fn find_config(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILE))
        .find(|candidate| candidate.is_file())
}
