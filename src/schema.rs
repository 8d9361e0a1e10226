//! Declarative record schema.
//!
//! `RECORD_FIELDS` is the single declaration of what a product record looks
//! like. The JSON Schema document is generated from it and compiled once with
//! `jsonschema`; the same table is used to explain rejections field by field.
//! Undeclared fields are tolerated (the object schema stays open).

use crate::error::Violation;
use anyhow::{Result, anyhow};
use jsonschema::JSONSchema;
use serde_json::{Map, Value, json};

const SCHEMA_DIALECT: &str = "http://json-schema.org/draft-07/schema#";
const SCHEMA_TITLE: &str = "product record";

/// Primitive kind of a declared field.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FieldKind {
    /// Non-empty string.
    Text,
    /// JSON number strictly greater than zero.
    Amount,
}

impl FieldKind {
    pub fn json_type(self) -> &'static str {
        match self {
            FieldKind::Text => "string",
            FieldKind::Amount => "number",
        }
    }

    /// Phrase used in messages: "<field> must be ...".
    pub fn expectation(self) -> &'static str {
        match self {
            FieldKind::Text => "a string",
            FieldKind::Amount => "a number",
        }
    }

    fn schema_fragment(self) -> Value {
        let json_type = self.json_type();
        match self {
            FieldKind::Text => json!({ "type": json_type, "minLength": 1 }),
            FieldKind::Amount => json!({ "type": json_type, "exclusiveMinimum": 0 }),
        }
    }

    /// Check a present value against the kind, returning the first problem.
    pub fn check(self, value: &Value) -> Option<Violation> {
        let wrong_type = Violation::WrongType { expected: self };
        match self {
            FieldKind::Text => match value.as_str() {
                None => Some(wrong_type),
                Some("") => Some(Violation::Empty),
                Some(_) => None,
            },
            FieldKind::Amount => match value.as_f64() {
                None => Some(wrong_type),
                Some(amount) if !amount.is_finite() => Some(wrong_type),
                Some(amount) if amount <= 0.0 => Some(Violation::NotPositive),
                Some(_) => None,
            },
        }
    }
}

/// One declared field of the record schema.
#[derive(Clone, Copy, Debug)]
pub struct FieldSpec {
    pub name: &'static str,
    pub required: bool,
    pub kind: FieldKind,
}

impl FieldSpec {
    /// Inspect the field inside a candidate object.
    pub fn inspect(&self, object: &Map<String, Value>) -> Option<Violation> {
        match object.get(self.name) {
            None if self.required => Some(Violation::Missing),
            None => None,
            Some(value) => self.kind.check(value),
        }
    }
}

pub const PRODUCT: &str = "product";
pub const SHOP: &str = "shop";
pub const COST: &str = "cost";

/// Declared fields, in serialization order.
pub const RECORD_FIELDS: [FieldSpec; 3] = [
    FieldSpec {
        name: PRODUCT,
        required: true,
        kind: FieldKind::Text,
    },
    FieldSpec {
        name: SHOP,
        required: true,
        kind: FieldKind::Text,
    },
    FieldSpec {
        name: COST,
        required: true,
        kind: FieldKind::Amount,
    },
];

/// Build the JSON Schema document for a single record from `RECORD_FIELDS`.
pub fn record_schema_document() -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();
    for spec in &RECORD_FIELDS {
        properties.insert(spec.name.to_string(), spec.kind.schema_fragment());
        if spec.required {
            required.push(Value::String(spec.name.to_string()));
        }
    }

    json!({
        "$schema": SCHEMA_DIALECT,
        "title": SCHEMA_TITLE,
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

/// Compiled record schema plus the document it was compiled from.
pub(crate) struct CompiledSchema {
    pub compiled: JSONSchema,
    pub raw: Value,
}

pub(crate) fn compile_record_schema() -> Result<CompiledSchema> {
    let raw = record_schema_document();
    let compiled =
        JSONSchema::compile(&raw).map_err(|err| anyhow!("compiling record schema: {err}"))?;
    Ok(CompiledSchema { compiled, raw })
}
