//! # Version-Bump Consistency
//!
//! The package version appears in several files. `ilc.yaml` lists each
//! file with a `search` template that must be present for the current
//! version and a `replace` template to write for the new one. Templates
//! may use `{current_version}` and `{new_version}`.
//!
//! [`check`] reports every file that has drifted from `current_version`.
//! [`bump`] checks first and only then rewrites, so a failed bump leaves
//! every file untouched. New contents are staged in temporary files next
//! to their targets and renamed into place once all of them are written.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tempfile::NamedTempFile;
use thiserror::Error;

const CURRENT: &str = "{current_version}";
const NEW: &str = "{new_version}";

fn default_search() -> String {
    CURRENT.to_string()
}

fn default_replace() -> String {
    NEW.to_string()
}

/// The `version` section of `ilc.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VersionConfig {
    pub current_version: String,
    #[serde(default)]
    pub files: Vec<VersionFile>,
}

/// A file carrying the version string, relative to the workspace root.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VersionFile {
    pub filename: PathBuf,
    #[serde(default = "default_search")]
    pub search: String,
    #[serde(default = "default_replace")]
    pub replace: String,
}

impl VersionFile {
    /// The text that must be present while `current` is the version.
    pub fn search_for(&self, current: &str) -> String {
        self.search.replace(CURRENT, current)
    }

    /// The text written in place of [`VersionFile::search_for`].
    pub fn replacement_for(&self, current: &str, new: &str) -> String {
        self.replace.replace(CURRENT, current).replace(NEW, new)
    }
}

/// A `MAJOR.MINOR.PATCH` version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

/// Which component of a version to increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Part {
    Major,
    Minor,
    Patch,
}

impl Version {
    /// The next version: the chosen part goes up by one and every part
    /// after it resets to zero.
    pub fn bumped(self, part: Part) -> Self {
        match part {
            Part::Major => Self {
                major: self.major + 1,
                minor: 0,
                patch: 0,
            },
            Part::Minor => Self {
                minor: self.minor + 1,
                patch: 0,
                ..self
            },
            Part::Patch => Self {
                patch: self.patch + 1,
                ..self
            },
        }
    }
}

impl std::str::FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || VersionError::InvalidVersion {
            version: s.to_string(),
        };
        let parts: Vec<&str> = s.split('.').collect();
        let [major, minor, patch] = parts.as_slice() else {
            return Err(invalid());
        };
        let number = |p: &str| {
            if p.is_empty() || !p.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            p.parse::<u64>().map_err(|_| invalid())
        };
        Ok(Self {
            major: number(major)?,
            minor: number(minor)?,
            patch: number(patch)?,
        })
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// How a listed file disagrees with the configured version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mismatch {
    MissingFile { filename: PathBuf },
    PatternNotFound { filename: PathBuf, pattern: String },
}

impl std::fmt::Display for Mismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mismatch::MissingFile { filename } => {
                write!(f, "  {}: file not found", filename.display())
            }
            Mismatch::PatternNotFound { filename, pattern } => {
                write!(f, "  {}: {pattern:?} not found", filename.display())
            }
        }
    }
}

#[derive(Error, Debug)]
pub enum VersionError {
    #[error("invalid version {version:?}: expected MAJOR.MINOR.PATCH")]
    InvalidVersion { version: String },

    #[error("new version {version} is the same as the current version")]
    Unchanged { version: String },

    #[error("version {current_version} is inconsistent in {} file(s):\n{}",
        .mismatches.len(),
        .mismatches.iter().map(|m| m.to_string()).collect::<Vec<_>>().join("\n"))]
    Inconsistent {
        current_version: String,
        mismatches: Vec<Mismatch>,
    },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

fn read(path: &Path) -> Result<String, VersionError> {
    std::fs::read_to_string(path).map_err(|source| io_error(path, source))
}

/// Every listed file that is missing or lacks its rendered search text.
pub fn mismatches(root: &Path, config: &VersionConfig) -> Result<Vec<Mismatch>, VersionError> {
    let mut found = Vec::new();
    for file in &config.files {
        let path = root.join(&file.filename);
        if !path.is_file() {
            found.push(Mismatch::MissingFile {
                filename: file.filename.clone(),
            });
            continue;
        }
        let pattern = file.search_for(&config.current_version);
        if !read(&path)?.contains(&pattern) {
            found.push(Mismatch::PatternNotFound {
                filename: file.filename.clone(),
                pattern,
            });
        }
    }
    Ok(found)
}

/// Verify that every listed file carries `current_version`.
///
/// # Errors
///
/// [`VersionError::Inconsistent`] listing every mismatch.
pub fn check(root: &Path, config: &VersionConfig) -> Result<(), VersionError> {
    let found = mismatches(root, config)?;
    tracing::debug!(
        files = config.files.len(),
        mismatches = found.len(),
        version = %config.current_version,
        "checked version consistency"
    );
    if found.is_empty() {
        Ok(())
    } else {
        Err(VersionError::Inconsistent {
            current_version: config.current_version.clone(),
            mismatches: found,
        })
    }
}

/// The version after bumping `part` of `current`.
pub fn bump_part(current: &str, part: Part) -> Result<String, VersionError> {
    Ok(current.parse::<Version>()?.bumped(part).to_string())
}

/// Rewrite every listed file from `current_version` to `new_version`.
///
/// Nothing is written unless `new_version` is a valid, different version
/// and [`check`] passes. Files listed more than once get each replacement
/// applied in order. Returns the files written.
pub fn bump(
    root: &Path,
    config: &VersionConfig,
    new_version: &str,
) -> Result<Vec<PathBuf>, VersionError> {
    new_version.parse::<Version>()?;
    if new_version == config.current_version {
        return Err(VersionError::Unchanged {
            version: new_version.to_string(),
        });
    }
    check(root, config)?;

    let current = config.current_version.as_str();
    let mut contents: BTreeMap<PathBuf, String> = BTreeMap::new();
    for file in &config.files {
        let path = root.join(&file.filename);
        let text = match contents.remove(&path) {
            Some(text) => text,
            None => read(&path)?,
        };
        let updated = text.replace(
            &file.search_for(current),
            &file.replacement_for(current, new_version),
        );
        contents.insert(path, updated);
    }

    let staged = stage(&contents)?;
    for (path, tmp) in staged {
        tmp.persist(&path).map_err(|e| io_error(&path, e.error))?;
        tracing::info!(path = %path.display(), from = current, to = new_version, "bumped version");
    }
    Ok(contents.into_keys().collect())
}

fn io_error(path: &Path, source: std::io::Error) -> VersionError {
    VersionError::Io {
        path: path.display().to_string(),
        source,
    }
}

/// Write every new content to a temporary file in its target's directory,
/// keeping the target's permissions. On error the temporary files are
/// removed and no target has been touched.
fn stage(
    contents: &BTreeMap<PathBuf, String>,
) -> Result<Vec<(PathBuf, NamedTempFile)>, VersionError> {
    let mut staged = Vec::with_capacity(contents.len());
    for (path, text) in contents {
        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| io_error(path, e))?;
        tmp.write_all(text.as_bytes()).map_err(|e| io_error(path, e))?;
        tmp.as_file().sync_all().map_err(|e| io_error(path, e))?;
        if let Ok(meta) = std::fs::metadata(path) {
            std::fs::set_permissions(tmp.path(), meta.permissions())
                .map_err(|e| io_error(path, e))?;
        }
        staged.push((path.clone(), tmp));
    }
    Ok(staged)
}
