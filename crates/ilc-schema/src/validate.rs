//! # Schema Validation
//!
//! Checks JSON and YAML documents against the JSON Schemas (draft 2020-12)
//! in a schema directory, reporting every violation with the JSON Pointer
//! of the offending value.
//!
//! ## `$ref` Resolution
//!
//! Schema `$id`s have the form
//! `https://schemas.ilc-project.org/models/<filename>`. A cross-schema
//! `$ref` may give that URI or just the filename. Both resolve to the
//! schemas already in memory; nothing is fetched.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use ilc_models::{Match, ModelError};
use jsonschema::{Draft, Retrieve, Uri, Validator};
use serde_json::Value;
use thiserror::Error;

/// Base of every schema `$id`.
const ID_BASE: &str = "https://schemas.ilc-project.org/models/";

const SCHEMA_SUFFIX: &str = ".schema.json";

/// Schema that match documents are checked against.
pub const MATCH_SCHEMA: &str = "match.schema.json";

#[derive(Error, Debug)]
pub enum SchemaValidationError {
    /// The document broke the schema.
    #[error("{schema} rejected the document:\n{violations}")]
    ValidationFailed {
        schema: String,
        violations: ValidationViolations,
    },

    #[error("cannot read schema directory {dir}: {source}")]
    SchemaDir {
        dir: String,
        #[source]
        source: std::io::Error,
    },

    #[error("no schema named {name} in {dir}")]
    UnknownSchema { name: String, dir: String },

    /// A schema file is not JSON or does not compile.
    #[error("invalid schema {name}: {reason}")]
    InvalidSchema { name: String, reason: String },

    /// A document could not be read or parsed.
    #[error("cannot load {path}: {reason}")]
    Document { path: String, reason: String },

    /// A schema-valid document does not fit the `Match` type.
    #[error("{path} is not a match: {source}")]
    Deserialize {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// The match broke one or more cross-field rules.
    #[error("{path}: {source}")]
    Model {
        path: String,
        #[source]
        source: ModelError,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// One schema violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON Pointer to the offending value in the document.
    pub pointer: String,
    /// JSON Pointer to the schema keyword that failed.
    pub keyword: String,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let at = if self.pointer.is_empty() {
            "(root)"
        } else {
            &self.pointer
        };
        write!(f, "  {at}: {}", self.message)
    }
}

/// Every violation found in one document, in report order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationViolations(Vec<Violation>);

impl ValidationViolations {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.0.iter()
    }

    /// Whether any violation points at `pointer`.
    pub fn at(&self, pointer: &str) -> bool {
        self.0.iter().any(|v| v.pointer == pointer)
    }
}

impl FromIterator<Violation> for ValidationViolations {
    fn from_iter<I: IntoIterator<Item = Violation>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for ValidationViolations {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for ValidationViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self.0.iter().map(Violation::to_string).collect();
        f.write_str(&lines.join("\n"))
    }
}

/// Serves `$ref` targets from the loaded schema set.
#[derive(Clone)]
struct InMemoryRefs(Arc<HashMap<String, Value>>);

impl InMemoryRefs {
    /// Index every schema by its filename, by `ID_BASE` + filename, and by
    /// its own `$id` when that differs.
    fn index(schemas: &BTreeMap<String, Value>) -> Self {
        let mut by_uri = HashMap::new();
        for (name, schema) in schemas {
            by_uri.insert(name.clone(), schema.clone());
            by_uri.insert(format!("{ID_BASE}{name}"), schema.clone());
            if let Some(id) = schema.get("$id").and_then(Value::as_str) {
                by_uri.insert(id.to_string(), schema.clone());
            }
        }
        Self(Arc::new(by_uri))
    }

    fn lookup(&self, uri: &str) -> Option<&Value> {
        let filename = uri.rsplit('/').next().unwrap_or(uri);
        self.0.get(uri).or_else(|| self.0.get(filename))
    }
}

impl Retrieve for InMemoryRefs {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        match self.lookup(uri.as_str()) {
            Some(schema) => Ok(schema.clone()),
            None => {
                tracing::warn!(uri = uri.as_str(), "unresolved $ref, accepting anything");
                Ok(Value::Object(serde_json::Map::new()))
            }
        }
    }
}

/// Validates documents against the schemas of one directory.
///
/// All `*.schema.json` files are read once, at construction. The
/// validator is `Send + Sync`.
#[derive(Debug)]
pub struct SchemaValidator {
    dir: PathBuf,
    schemas: BTreeMap<String, Value>,
    refs: InMemoryRefs,
}

impl fmt::Debug for InMemoryRefs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InMemoryRefs({} uris)", self.0.len())
    }
}

impl SchemaValidator {
    /// Load every `*.schema.json` file in `dir`.
    ///
    /// # Errors
    ///
    /// [`SchemaValidationError::SchemaDir`] if the directory cannot be
    /// listed, [`SchemaValidationError::InvalidSchema`] if a schema file is
    /// not JSON.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self, SchemaValidationError> {
        let dir = dir.as_ref().to_path_buf();
        let entries = std::fs::read_dir(&dir).map_err(|source| SchemaValidationError::SchemaDir {
            dir: dir.display().to_string(),
            source,
        })?;

        let mut schemas = BTreeMap::new();
        for entry in entries {
            let path = entry?.path();
            let Some(name) = path
                .file_name()
                .and_then(|n| n.to_str())
                .filter(|n| n.ends_with(SCHEMA_SUFFIX))
            else {
                continue;
            };
            let schema: Value = serde_json::from_str(&std::fs::read_to_string(&path)?)
                .map_err(|e| SchemaValidationError::InvalidSchema {
                    name: name.to_string(),
                    reason: e.to_string(),
                })?;
            schemas.insert(name.to_string(), schema);
        }

        tracing::debug!(dir = %dir.display(), count = schemas.len(), "loaded schemas");
        let refs = InMemoryRefs::index(&schemas);
        Ok(Self { dir, schemas, refs })
    }

    pub fn schema_dir(&self) -> &Path {
        &self.dir
    }

    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }

    /// Loaded schema filenames, sorted.
    pub fn schema_names(&self) -> Vec<&str> {
        self.schemas.keys().map(String::as_str).collect()
    }

    pub fn get_schema(&self, name: &str) -> Option<&Value> {
        self.schemas.get(name)
    }

    /// Compile the schema `name` with `$ref`s served from memory.
    pub fn build_validator(&self, name: &str) -> Result<Validator, SchemaValidationError> {
        let schema = self
            .schemas
            .get(name)
            .ok_or_else(|| SchemaValidationError::UnknownSchema {
                name: name.to_string(),
                dir: self.dir.display().to_string(),
            })?;

        jsonschema::options()
            .with_draft(Draft::Draft202012)
            .with_retriever(self.refs.clone())
            .build(schema)
            .map_err(|e| SchemaValidationError::InvalidSchema {
                name: name.to_string(),
                reason: e.to_string(),
            })
    }

    /// Check `document` against the schema `name`.
    ///
    /// # Errors
    ///
    /// [`SchemaValidationError::ValidationFailed`] listing every violation.
    pub fn validate_document(&self, document: &Value, name: &str) -> Result<(), SchemaValidationError> {
        let violations: ValidationViolations = self
            .build_validator(name)?
            .iter_errors(document)
            .map(|e| Violation {
                pointer: e.instance_path.to_string(),
                keyword: e.schema_path.to_string(),
                message: e.to_string(),
            })
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(SchemaValidationError::ValidationFailed {
                schema: name.to_string(),
                violations,
            })
        }
    }

    /// Check a JSON or YAML file against the schema `name`.
    pub fn validate_file(&self, path: &Path, name: &str) -> Result<(), SchemaValidationError> {
        self.validate_document(&load_document(path)?, name)
    }

    /// Read a match document, checking the schema, then the `Match` type,
    /// then the cross-field rules.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` naming both the schema and the file.
    /// - `Deserialize` if the document does not fit [`Match`].
    /// - `Model` with every broken cross-field rule.
    pub fn load_match(&self, path: &Path) -> Result<Match, SchemaValidationError> {
        let shown = path.display().to_string();
        let document = load_document(path)?;

        self.validate_document(&document, MATCH_SCHEMA)
            .map_err(|e| match e {
                SchemaValidationError::ValidationFailed { violations, .. } => {
                    SchemaValidationError::ValidationFailed {
                        schema: format!("{MATCH_SCHEMA} ({shown})"),
                        violations,
                    }
                }
                other => other,
            })?;

        let m: Match =
            serde_json::from_value(document).map_err(|source| SchemaValidationError::Deserialize {
                path: shown.clone(),
                source,
            })?;
        m.validate()
            .map_err(|source| SchemaValidationError::Model { path: shown.clone(), source })?;

        tracing::debug!(path = %shown, match_id = %m.match_id, "loaded match");
        Ok(m)
    }
}

/// Parse a document as YAML when the extension is `.yaml` or `.yml`,
/// otherwise as JSON.
pub fn load_document(path: &Path) -> Result<Value, SchemaValidationError> {
    let failed = |reason: String| SchemaValidationError::Document {
        path: path.display().to_string(),
        reason,
    };
    let text = std::fs::read_to_string(path).map_err(|e| failed(e.to_string()))?;

    match path.extension().and_then(|e| e.to_str()) {
        Some("yaml" | "yml") => {
            serde_yaml::from_str(&text).map_err(|e| failed(format!("invalid YAML: {e}")))
        }
        _ => serde_json::from_str(&text).map_err(|e| failed(format!("invalid JSON: {e}"))),
    }
}
