//! Object reconstruction from primitive store reads.
//!
//! Decoding walks a schema and reissues the key derivation the encoder
//! used: scalar fields of one level come back through a single batched
//! flat-map read, each array field through one full-range ordered read,
//! and nested objects and object arrays through recursive walks of their
//! derived keys. Fields absent from storage still appear in the result,
//! carrying the store's miss value; the mapper synthesizes no defaults.

use futures_util::future::{BoxFuture, FutureExt};
use serde_json::{Map, Value};

use redmap_store::{hash, sorted_set, HashStore, SortedSetStore};

use crate::error::Result;
use crate::key;
use crate::schema::{FieldType, Schema};

/// Reconstruct the object stored under `key`, as described by `schema`.
pub async fn decode<S>(store: &S, key: &str, schema: &Schema, namespace: bool) -> Result<Value>
where
    S: HashStore + SortedSetStore + ?Sized,
{
    decode_object(store, key.to_owned(), schema, namespace).await
}

fn decode_object<'a, S>(
    store: &'a S,
    key: String,
    schema: &'a Schema,
    namespace: bool,
) -> BoxFuture<'a, Result<Value>>
where
    S: HashStore + SortedSetStore + ?Sized,
{
    async move {
        let mut result = Map::new();

        // Scalars: exactly one batched read for the whole level, in
        // sorted field order so the request is deterministic.
        let mut scalar_fields: Vec<(&String, &FieldType)> =
            schema.fields().filter(|(_, t)| t.is_scalar()).collect();
        scalar_fields.sort_by(|a, b| a.0.cmp(b.0));

        if !scalar_fields.is_empty() {
            let names: Vec<String> = scalar_fields.iter().map(|(n, _)| (*n).clone()).collect();
            let hash_key = key::physical(&key, hash::SUFFIX, namespace);
            let raw = store.get_fields(&hash_key, &names).await?;
            for ((field, field_type), raw_value) in scalar_fields.into_iter().zip(raw) {
                result.insert(field.clone(), coerce_scalar(field_type, raw_value));
            }
        }

        for (field, field_type) in schema.fields() {
            match field_type {
                FieldType::Int | FieldType::Float | FieldType::String | FieldType::Boolean => {}
                FieldType::Array => {
                    let set_key =
                        key::physical(&key::field_key(&key, field), sorted_set::SUFFIX, namespace);
                    let members = store.range(&set_key).await?;
                    result.insert(
                        field.clone(),
                        Value::Array(members.into_iter().map(Value::String).collect()),
                    );
                }
                FieldType::ArrayWeighted => {
                    let set_key =
                        key::physical(&key::field_key(&key, field), sorted_set::SUFFIX, namespace);
                    let members = store.range_with_scores(&set_key).await?;
                    let pairs = members
                        .into_iter()
                        .map(|(member, score)| {
                            let mut pair = Map::new();
                            pair.insert("value".to_owned(), Value::String(member));
                            pair.insert("score".to_owned(), score_value(score));
                            Value::Object(pair)
                        })
                        .collect();
                    result.insert(field.clone(), Value::Array(pairs));
                }
                FieldType::Object(nested) => {
                    let value =
                        decode_object(store, key::field_key(&key, field), nested, namespace)
                            .await?;
                    result.insert(field.clone(), value);
                }
                FieldType::ObjectArray(schemas) => {
                    let mut elements = Vec::with_capacity(schemas.len());
                    for (index, element_schema) in schemas.iter().enumerate() {
                        elements.push(
                            decode_object(
                                store,
                                key::element_key(&key, field, index),
                                element_schema,
                                namespace,
                            )
                            .await?,
                        );
                    }
                    result.insert(field.clone(), Value::Array(elements));
                }
            }
        }

        Ok(Value::Object(result))
    }
    .boxed()
}

/// Coerce one raw flat-map value by its schema type.
///
/// A miss, or a numeric field whose raw text does not parse, yields
/// `Null` rather than an error; reads stay lenient so a schema change
/// never makes old rows unreadable.
fn coerce_scalar(field_type: &FieldType, raw: Option<String>) -> Value {
    let Some(raw) = raw else {
        return Value::Null;
    };
    match field_type {
        FieldType::Int => raw.parse::<i64>().map(Value::from).unwrap_or(Value::Null),
        FieldType::Float => raw
            .parse::<f64>()
            .ok()
            .and_then(serde_json::Number::from_f64)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        FieldType::Boolean => Value::Bool(raw == "true"),
        // String, and any non-scalar tag a caller routed here: pass through.
        _ => Value::String(raw),
    }
}

/// Scores come back as JSON integers when they carry no fraction.
fn score_value(score: f64) -> Value {
    if score.fract() == 0.0 && score >= i64::MIN as f64 && score <= i64::MAX as f64 {
        Value::from(score as i64)
    } else {
        serde_json::Number::from_f64(score)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}
