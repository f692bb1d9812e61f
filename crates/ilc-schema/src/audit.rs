//! # Schema Strictness Audit
//!
//! Every model struct rejects unknown fields on deserialization. The
//! schemas must agree: an object schema that leaves `additionalProperties`
//! open would accept documents the models then refuse, splitting the two
//! validation stages.
//!
//! [`open_objects`] walks a schema and reports every object sub-schema
//! whose `additionalProperties` is `true` or missing (missing means `true`
//! in JSON Schema).

use std::fmt;

use serde_json::{Map, Value};

/// Schema files describing the data models. All must pass the audit.
pub const MODEL_SCHEMAS: &[&str] = &[
    "base-player.schema.json",
    "player.schema.json",
    "lineup.schema.json",
    "event.schema.json",
    "match.schema.json",
];

/// Keywords whose value is a map of named sub-schemas.
const SCHEMA_MAPS: &[&str] = &["properties", "$defs", "definitions"];

/// Keywords whose value is a list of sub-schemas.
const SCHEMA_LISTS: &[&str] = &["oneOf", "anyOf", "allOf", "prefixItems"];

/// An object sub-schema that admits unknown fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenObject {
    /// JSON Pointer to the sub-schema.
    pub pointer: String,
    /// What `additionalProperties` holds there, if anything.
    pub setting: Option<Value>,
}

impl fmt::Display for OpenObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let at = if self.pointer.is_empty() { "(root)" } else { &self.pointer };
        match &self.setting {
            Some(v) => write!(f, "  {at}: additionalProperties is {v}"),
            None => write!(f, "  {at}: additionalProperties is missing"),
        }
    }
}

/// Every object sub-schema of `schema` that does not set
/// `additionalProperties` to `false` or to a sub-schema, in walk order.
pub fn open_objects(schema: &Value) -> Vec<OpenObject> {
    let mut found = Vec::new();
    visit(schema, String::new(), &mut found);
    found
}

fn describes_object(node: &Map<String, Value>) -> bool {
    node.get("type").and_then(Value::as_str) == Some("object") || node.contains_key("properties")
}

fn visit(schema: &Value, pointer: String, found: &mut Vec<OpenObject>) {
    let Value::Object(node) = schema else {
        return;
    };

    if describes_object(node) {
        match node.get("additionalProperties") {
            Some(Value::Bool(false) | Value::Object(_)) => {}
            setting => found.push(OpenObject {
                pointer: pointer.clone(),
                setting: setting.cloned(),
            }),
        }
    }

    for keyword in SCHEMA_MAPS {
        let children = node.get(*keyword).and_then(Value::as_object);
        for (name, child) in children.into_iter().flatten() {
            visit(child, format!("{pointer}/{keyword}/{name}"), found);
        }
    }
    for keyword in SCHEMA_LISTS {
        let children = node.get(*keyword).and_then(Value::as_array);
        for (i, child) in children.into_iter().flatten().enumerate() {
            visit(child, format!("{pointer}/{keyword}/{i}"), found);
        }
    }
    if let Some(items) = node.get("items") {
        visit(items, format!("{pointer}/items"), found);
    }
}
