//! # ilc-schema: Schema Validation for Match Documents
//!
//! Validates JSON and YAML documents against the JSON Schemas in the
//! workspace `schemas/` directory, and turns valid match documents into
//! [`ilc_models::Match`] values.
//!
//! ## Runtime Validation (`validate`)
//!
//! [`SchemaValidator`] loads every `*.schema.json` file, registers them for
//! cross-schema `$ref` resolution, and validates documents against them.
//! [`SchemaValidator::load_match`] runs the full pipeline for one file:
//! schema validation, deserialization, then the cross-field rules of
//! [`ilc_models::Match::validate`].
//!
//! ## Strictness Audit (`audit`)
//!
//! The models reject unknown fields. [`open_objects`] checks
//! that every object schema says the same (`additionalProperties: false`),
//! so schema validation and deserialization can never disagree about
//! extra fields.
//!
//! ## Crate Policy
//!
//! - Depends only on `ilc-models` internally.
//! - Schema `$id` and `$ref` URIs must never be changed without verifying
//!   all references across the schema set.
//! - `$ref` resolution never touches the network.

pub mod audit;
pub mod validate;

pub use audit::{open_objects, OpenObject, MODEL_SCHEMAS};
pub use validate::{
    load_document, SchemaValidationError, SchemaValidator, ValidationViolations, Violation,
    MATCH_SCHEMA,
};
