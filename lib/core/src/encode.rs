//! Object decomposition into primitive store writes.
//!
//! Encoding is pure: it walks a value against its schema and returns a
//! flat batch of [`WriteOp`] descriptions for the caller to execute.
//! Scalar fields of one recursion level are bundled into a single
//! multi-field write; array members are enqueued in index order, since
//! the index determines the score.

use serde_json::Value;
use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::key;
use crate::schema::{kind_of, FieldType, Schema};

/// One pending write against a primitive store.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOp {
    /// Multi-field write against the flat-map store.
    SetFields {
        key: String,
        fields: HashMap<String, String>,
    },
    /// Single-member write against the ordered-collection store.
    AddMember {
        key: String,
        member: String,
        score: f64,
    },
}

/// Decompose `value` into primitive writes under `key`, as described by
/// `schema`.
///
/// Fails with [`Error::FieldMismatch`] for any field the schema does not
/// cover, or whose value's shape disagrees with its schema entry; data the
/// schema cannot read back is never stored.
pub fn encode(key: &str, value: &Value, schema: &Schema) -> Result<Vec<WriteOp>> {
    let map = value.as_object().ok_or_else(|| Error::NotAnObject {
        kind: kind_of(value).to_owned(),
    })?;

    let mut ops = Vec::new();
    let mut scalars = HashMap::new();

    for (field, field_value) in map {
        let field_type = schema.get(field).ok_or_else(|| mismatch(field, field_value))?;
        match field_type {
            FieldType::Int | FieldType::Float | FieldType::String | FieldType::Boolean => {
                if field_value.is_array() || field_value.is_object() || field_value.is_null() {
                    return Err(mismatch(field, field_value));
                }
                scalars.insert(field.clone(), scalar_to_string(field_value));
            }
            FieldType::Array => {
                let elements = as_elements(field, field_value)?;
                for (index, element) in elements.iter().enumerate() {
                    if !element.is_string() && !element.is_number() {
                        return Err(mismatch(field, element));
                    }
                    ops.push(WriteOp::AddMember {
                        key: key::field_key(key, field),
                        member: scalar_to_string(element),
                        score: index as f64,
                    });
                }
            }
            FieldType::ArrayWeighted => {
                let elements = as_elements(field, field_value)?;
                for element in elements {
                    let (member, score) = weighted_pair(field, element)?;
                    ops.push(WriteOp::AddMember {
                        key: key::field_key(key, field),
                        member,
                        score,
                    });
                }
            }
            FieldType::Object(nested) => {
                ops.extend(encode(&key::field_key(key, field), field_value, nested)?);
            }
            FieldType::ObjectArray(schemas) => {
                let elements = as_elements(field, field_value)?;
                for (index, element) in elements.iter().enumerate() {
                    let element_schema = schemas.get(index).ok_or_else(|| Error::FieldMismatch {
                        field: format!("{field}[{index}]"),
                        kind: kind_of(element).to_owned(),
                    })?;
                    ops.extend(encode(
                        &key::element_key(key, field, index),
                        element,
                        element_schema,
                    )?);
                }
            }
        }
    }

    if !scalars.is_empty() {
        ops.push(WriteOp::SetFields {
            key: key.to_owned(),
            fields: scalars,
        });
    }
    Ok(ops)
}

fn mismatch(field: &str, value: &Value) -> Error {
    Error::FieldMismatch {
        field: field.to_owned(),
        kind: kind_of(value).to_owned(),
    }
}

fn as_elements<'v>(field: &str, value: &'v Value) -> Result<&'v Vec<Value>> {
    value.as_array().ok_or_else(|| mismatch(field, value))
}

/// Stored representation of a scalar. Strings pass through; numbers and
/// booleans use their canonical JSON text.
fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn weighted_pair(field: &str, element: &Value) -> Result<(String, f64)> {
    let pair = element
        .as_object()
        .filter(|map| map.len() == 2)
        .ok_or_else(|| mismatch(field, element))?;
    let member = pair
        .get("value")
        .and_then(Value::as_str)
        .ok_or_else(|| mismatch(field, element))?;
    let score = pair
        .get("score")
        .and_then(Value::as_f64)
        .ok_or_else(|| mismatch(field, element))?;
    Ok((member.to_owned(), score))
}
