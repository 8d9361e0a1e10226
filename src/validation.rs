//! Candidate validation.
//!
//! Decoded candidates are checked against the compiled record schema. The
//! schema decides acceptance; the field table from `schema` then names every
//! failing field so callers can report all problems at once rather than the
//! first one.

use crate::error::{FieldViolation, ValidationError};
use crate::record::Record;
use crate::schema::{COST, CompiledSchema, PRODUCT, RECORD_FIELDS, SHOP, compile_record_schema};
use anyhow::Result;
use serde_json::{Map, Value};
use tracing::debug;

/// Checks candidates against the record schema.
pub struct Validator {
    schema: CompiledSchema,
}

impl Validator {
    pub fn new() -> Result<Self> {
        Ok(Self {
            schema: compile_record_schema()?,
        })
    }

    /// The JSON Schema document candidates are checked against.
    pub fn schema_document(&self) -> &Value {
        &self.schema.raw
    }

    /// Validate one candidate and build a `Record` from it.
    ///
    /// Undeclared fields are ignored and dropped from the record.
    pub fn validate(&self, candidate: &Value) -> Result<Record, ValidationError> {
        let Some(object) = candidate.as_object() else {
            return Err(ValidationError::NotAnObject {
                found: json_kind(candidate),
            });
        };

        let schema_errors = match self.schema.compiled.validate(candidate) {
            Ok(()) => Vec::new(),
            Err(errors) => errors.map(|err| err.to_string()).collect::<Vec<_>>(),
        };
        let violations = collect_violations(object);
        if !violations.is_empty() {
            return Err(ValidationError::Fields(violations));
        }
        // The table found nothing to name, but the schema still gates.
        if !schema_errors.is_empty() {
            debug!(details = ?schema_errors, "candidate failed record schema");
            return Err(ValidationError::Schema(schema_errors));
        }

        Ok(build_record(object))
    }
}

fn collect_violations(object: &Map<String, Value>) -> Vec<FieldViolation> {
    RECORD_FIELDS
        .iter()
        .filter_map(|spec| {
            spec.inspect(object).map(|violation| FieldViolation {
                field: spec.name,
                violation,
            })
        })
        .collect()
}

fn build_record(object: &Map<String, Value>) -> Record {
    let text = |name: &str| {
        object
            .get(name)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };
    let cost = object.get(COST).and_then(Value::as_f64).unwrap_or_default();
    Record::from_validated(text(PRODUCT), text(SHOP), cost)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Violation;
    use crate::schema::FieldKind;
    use serde_json::json;

    fn validator() -> Validator {
        Validator::new().expect("record schema compiles")
    }

    #[test]
    fn schema_and_field_table_agree() {
        let validator = validator();
        let candidates = [
            json!({"product": "Milk", "shop": "Z-Mart", "cost": 2.5}),
            json!({"product": "Milk", "shop": "Z-Mart"}),
            json!({"product": "", "shop": "Z-Mart", "cost": 2.5}),
            json!({"product": "Milk", "shop": "Z-Mart", "cost": 0}),
            json!({"product": "Milk", "shop": "Z-Mart", "cost": -3.5}),
            json!({"product": "Milk", "shop": "Z-Mart", "cost": "2.5"}),
            json!({"product": "Milk", "shop": "Z-Mart", "cost": 2.5, "aisle": 7}),
        ];
        for candidate in &candidates {
            let object = candidate.as_object().unwrap();
            assert_eq!(
                validator.schema.compiled.is_valid(candidate),
                collect_violations(object).is_empty(),
                "schema and table disagree on {candidate}"
            );
        }
    }

    #[test]
    fn schema_rejection_stands_when_table_finds_nothing() {
        let mut document = validator().schema_document().clone();
        document["additionalProperties"] = json!(false);
        let compiled = jsonschema::JSONSchema::compile(&document).expect("stricter schema");
        let strict = Validator {
            schema: CompiledSchema {
                compiled,
                raw: document,
            },
        };

        let err = strict
            .validate(&json!({"product": "Tea", "shop": "Corner", "cost": 1, "aisle": 4}))
            .expect_err("closed schema rejects extra field");
        match err {
            ValidationError::Schema(details) => assert!(!details.is_empty()),
            other => panic!("expected schema rejection, got {other:?}"),
        }
    }

    #[test]
    fn accepts_well_formed_candidate() {
        let record = validator()
            .validate(&json!({"product": "Milk", "shop": "Z-Mart", "cost": 2.5}))
            .expect("valid candidate");
        assert_eq!(record.product(), "Milk");
        assert_eq!(record.shop(), "Z-Mart");
        assert_eq!(record.cost(), 2.5);
    }

    #[test]
    fn integer_cost_is_a_number() {
        let record = validator()
            .validate(&json!({"product": "Salt", "shop": "Corner", "cost": 3}))
            .expect("integer cost");
        assert_eq!(record.cost(), 3.0);
    }

    #[test]
    fn text_cost_is_rejected_naming_the_field() {
        let err = validator()
            .validate(&json!({"product": "X", "shop": "Y", "cost": "not-a-number"}))
            .expect_err("text cost");
        assert_eq!(
            err.violations(),
            &[FieldViolation {
                field: "cost",
                violation: Violation::WrongType {
                    expected: FieldKind::Amount
                },
            }]
        );
        assert!(err.to_string().contains("cost must be a number"));
    }

    #[test]
    fn missing_and_empty_fields_are_all_reported() {
        let err = validator()
            .validate(&json!({"product": "", "cost": 0}))
            .expect_err("incomplete candidate");
        let fields: Vec<&str> = err.violations().iter().map(|v| v.field).collect();
        assert_eq!(fields, vec!["product", "shop", "cost"]);
        assert_eq!(err.violations()[1].violation, Violation::Missing);
    }

    #[test]
    fn non_object_candidates_are_rejected() {
        let err = validator().validate(&json!(["Milk"])).expect_err("array");
        assert_eq!(err, ValidationError::NotAnObject { found: "array" });
    }

    #[test]
    fn extra_fields_are_dropped() {
        let record = validator()
            .validate(&json!({"product": "Tea", "shop": "Corner", "cost": 1.0, "aisle": 4}))
            .expect("extra fields tolerated");
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("aisle").is_none());
    }
}
