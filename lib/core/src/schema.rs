//! Schema definitions and inference.
//!
//! A [`Schema`] is the recursive descriptor driving both encoding and
//! decoding: a mapping from field name to a [`FieldType`]. It is either
//! supplied by the caller or inferred from the first object written.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::error::{Error, Result};

/// The shape of one schema field.
///
/// Scalar tags route the field into the flat-map store; the array tags
/// route it into the ordered-collection store; `Object` and `ObjectArray`
/// recurse under derived keys. `ObjectArray` is index-positional: the
/// schema at position `i` always describes the stored element at
/// position `i`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldType {
    Int,
    Float,
    String,
    Boolean,
    /// Ordered scalar members, implicit score = insertion index.
    Array,
    /// Ordered `{value, score}` pairs with caller-supplied scores.
    ArrayWeighted,
    /// Nested object under a derived key.
    Object(Schema),
    /// Array of objects, one schema per position.
    ObjectArray(Vec<Schema>),
}

impl FieldType {
    /// Whether this field lives in the flat-map store at its own level.
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            FieldType::Int | FieldType::Float | FieldType::String | FieldType::Boolean
        )
    }
}

/// Field configurations keyed by field name.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema {
    fields: HashMap<String, FieldType>,
}

impl Schema {
    /// Create a schema with the given fields.
    pub fn new(fields: HashMap<String, FieldType>) -> Self {
        Self { fields }
    }

    /// Derive a schema from a concrete sample object.
    ///
    /// Fails when any field holds a value no type can be assigned to: a
    /// null, an empty object, or an array whose elements are not uniformly
    /// one of the supported shapes.
    pub fn infer(sample: &Value) -> Result<Self> {
        let map = sample.as_object().ok_or_else(|| Error::NotAnObject {
            kind: kind_of(sample).to_owned(),
        })?;

        let mut fields = HashMap::with_capacity(map.len());
        for (field, value) in map {
            fields.insert(field.clone(), Self::infer_field(field, value)?);
        }
        Ok(Self { fields })
    }

    fn infer_field(field: &str, value: &Value) -> Result<FieldType> {
        match value {
            Value::Null => Err(Error::Schema {
                field: field.to_owned(),
                reason: "null carries no type".to_owned(),
            }),
            Value::String(_) => Ok(FieldType::String),
            Value::Bool(_) => Ok(FieldType::Boolean),
            Value::Number(n) => Ok(if n.as_i64().is_some() {
                FieldType::Int
            } else {
                FieldType::Float
            }),
            Value::Array(elements) => Self::infer_array(field, elements),
            Value::Object(map) if map.is_empty() => Err(Error::Schema {
                field: field.to_owned(),
                reason: "empty objects carry no shape".to_owned(),
            }),
            Value::Object(_) => Ok(FieldType::Object(Self::infer(value)?)),
        }
    }

    /// Array classification. Check order matters: the weighted-pair shape
    /// wins over plain scalars, which win over object sequences.
    fn infer_array(field: &str, elements: &[Value]) -> Result<FieldType> {
        if elements.iter().all(is_weighted_pair) {
            return Ok(FieldType::ArrayWeighted);
        }
        if elements.iter().all(|e| e.is_string() || e.is_number()) {
            return Ok(FieldType::Array);
        }
        if elements
            .iter()
            .all(|e| e.as_object().is_some_and(|m| !m.is_empty()))
        {
            let schemas = elements.iter().map(Self::infer).collect::<Result<Vec<_>>>()?;
            return Ok(FieldType::ObjectArray(schemas));
        }
        Err(Error::Schema {
            field: field.to_owned(),
            reason: "arrays must uniformly hold strings/numbers, {value, score} pairs, or objects"
                .to_owned(),
        })
    }

    pub fn get(&self, field: &str) -> Option<&FieldType> {
        self.fields.get(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&String, &FieldType)> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field names in a deterministic order (sorted).
    pub fn sorted_field_names(&self) -> Vec<&String> {
        let mut names: Vec<_> = self.fields.keys().collect();
        names.sort();
        names
    }
}

impl FromIterator<(String, FieldType)> for Schema {
    fn from_iter<I: IntoIterator<Item = (String, FieldType)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// Exact two-field `{value: string, score: number}` shape.
fn is_weighted_pair(value: &Value) -> bool {
    value.as_object().is_some_and(|map| {
        map.len() == 2
            && map.get("value").is_some_and(Value::is_string)
            && map.get("score").is_some_and(Value::is_number)
    })
}

/// Runtime type name of a JSON value, for diagnostics.
pub(crate) fn kind_of(value: &Value) -> &'static str {
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
    use serde_json::json;

    #[test]
    fn scalars_classify_by_primitive_type() {
        let schema = Schema::infer(&json!({
            "name": "ada",
            "age": 36,
            "height": 1.63,
            "active": true,
        }))
        .unwrap();

        assert_eq!(schema.get("name"), Some(&FieldType::String));
        assert_eq!(schema.get("age"), Some(&FieldType::Int));
        assert_eq!(schema.get("height"), Some(&FieldType::Float));
        assert_eq!(schema.get("active"), Some(&FieldType::Boolean));
    }

    #[test]
    fn integers_beyond_i64_become_floats() {
        let schema = Schema::infer(&json!({ "big": 18_446_744_073_709_551_615u64 })).unwrap();
        assert_eq!(schema.get("big"), Some(&FieldType::Float));
    }

    #[test]
    fn nested_objects_recurse() {
        let schema = Schema::infer(&json!({
            "dbs": { "sql": "no", "redis": { "open": true } }
        }))
        .unwrap();

        let FieldType::Object(dbs) = schema.get("dbs").unwrap() else {
            panic!("expected a nested schema");
        };
        assert_eq!(dbs.get("sql"), Some(&FieldType::String));
        let FieldType::Object(redis) = dbs.get("redis").unwrap() else {
            panic!("expected a nested schema");
        };
        assert_eq!(redis.get("open"), Some(&FieldType::Boolean));
    }

    #[test]
    fn array_classification_precedence() {
        let weighted = Schema::infer(&json!({ "f": [{"value": "a", "score": 1}] })).unwrap();
        assert_eq!(weighted.get("f"), Some(&FieldType::ArrayWeighted));

        let plain = Schema::infer(&json!({ "f": ["a", "b"] })).unwrap();
        assert_eq!(plain.get("f"), Some(&FieldType::Array));

        let mixed_scalars = Schema::infer(&json!({ "f": ["a", 2] })).unwrap();
        assert_eq!(mixed_scalars.get("f"), Some(&FieldType::Array));

        let objects = Schema::infer(&json!({ "f": [{"a": 1}] })).unwrap();
        let FieldType::ObjectArray(schemas) = objects.get("f").unwrap() else {
            panic!("expected an object-sequence schema");
        };
        assert_eq!(schemas.len(), 1);
        assert_eq!(schemas[0].get("a"), Some(&FieldType::Int));

        assert!(Schema::infer(&json!({ "f": [true, false] })).is_err());
    }

    #[test]
    fn weighted_shape_requires_every_element_to_match() {
        // One stray element downgrades the array to an object sequence.
        let schema = Schema::infer(&json!({
            "f": [{"value": "a", "score": 1}, {"value": "b", "score": 2, "extra": 3}]
        }))
        .unwrap();
        assert!(matches!(schema.get("f"), Some(FieldType::ObjectArray(_))));
    }

    #[test]
    fn unclassifiable_fields_fail() {
        assert!(Schema::infer(&json!({ "f": null })).is_err());
        assert!(Schema::infer(&json!({ "f": {} })).is_err());
        assert!(Schema::infer(&json!("not an object")).is_err());
    }

    #[test]
    fn inference_is_deterministic() {
        let sample = json!({
            "name": "ada",
            "tags": ["x", "y"],
            "nested": { "n": 1 },
            "elems": [{"a": 1}, {"b": 2.5}],
        });
        assert_eq!(Schema::infer(&sample).unwrap(), Schema::infer(&sample).unwrap());
    }

    #[test]
    fn schemas_survive_a_serde_roundtrip() {
        let schema = Schema::infer(&json!({
            "name": "ada",
            "metrics": [{"value": "m", "score": 2}],
            "dbs": { "sql": "no" },
        }))
        .unwrap();

        let encoded = serde_json::to_string(&schema).unwrap();
        assert!(encoded.contains("\"arrayWeighted\""));
        let decoded: Schema = serde_json::from_str(&encoded).unwrap();
        assert_eq!(schema, decoded);
    }
}
