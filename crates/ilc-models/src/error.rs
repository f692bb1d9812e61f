//! # Error Types
//!
//! Defines the error types used by the data models. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Constructor errors name the offending field and value.
//! - Validation errors carry every violation found, each with the
//!   JSON-pointer-style path of the violating field.

use std::fmt;

use thiserror::Error;

/// Top-level error type for the ILC data models.
#[derive(Error, Debug)]
pub enum ModelError {
    /// A field value is outside its permitted domain.
    #[error("invalid {field}: {reason}")]
    InvalidField {
        /// Name of the field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// A timestamp could not be parsed.
    #[error("invalid timestamp {input:?}: {reason}")]
    InvalidTimestamp {
        /// The rejected input.
        input: String,
        /// Parser error.
        reason: String,
    },

    /// A match failed cross-field validation.
    #[error("match {match_id} failed validation:\n{}", format_violations(.violations))]
    Validation {
        /// Identifier of the match being validated.
        match_id: u32,
        /// Every violation found.
        violations: Vec<Violation>,
    },

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ModelError {
    /// Returns the violations carried by a validation error, or an empty slice.
    pub fn violations(&self) -> &[Violation] {
        match self {
            Self::Validation { violations, .. } => violations,
            _ => &[],
        }
    }
}

/// A single cross-field validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON-pointer-style path to the violating field (e.g. `/goals/2/detail/scorer`).
    pub path: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl Violation {
    pub(crate) fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "  (root): {}", self.message)
        } else {
            write!(f, "  {}: {}", self.path, self.message)
        }
    }
}

fn format_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
