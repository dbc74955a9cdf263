//! The mapper façade.
//!
//! Owns the single current [`Schema`], binds one lazily from the first
//! object written when none was supplied, and routes whole objects
//! through [`encode`](crate::encode::encode) and
//! [`decode`](crate::decode::decode) against the stores.

use parking_lot::RwLock;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use futures_util::future::try_join_all;
use redmap_store::{hash, sorted_set, HashStore, SortedSetStore};

use crate::decode;
use crate::encode::{self, WriteOp};
use crate::error::{Error, Result};
use crate::key;
use crate::schema::{kind_of, Schema};

/// Binding state of the mapper's schema.
///
/// Its own enum rather than a nullable field, so the read-before-bind
/// transition is a single match arm instead of a check at every call
/// site. There is no Bound -> Unbound transition.
#[derive(Debug, Clone)]
enum SchemaState {
    Unbound,
    Bound(Schema),
}

/// Schema-driven object mapper over a flat-map store and an
/// ordered-collection store.
///
/// Writes decompose an object into an unordered batch of primitive
/// writes, executed concurrently; reads walk the schema and reassemble
/// the object shape. Replacing the schema never migrates stored data:
/// later reads interpret old rows under the new schema, which may
/// surface type-mismatched or missing fields.
pub struct Mapper<S> {
    store: Arc<S>,
    schema: RwLock<SchemaState>,
    namespace: bool,
}

impl<S> Mapper<S>
where
    S: HashStore + SortedSetStore,
{
    /// Mapper with no schema; the first [`add`](Mapper::add) binds one.
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            schema: RwLock::new(SchemaState::Unbound),
            namespace: false,
        }
    }

    /// Mapper bound to a caller-supplied schema from the start.
    pub fn with_schema(store: Arc<S>, schema: Schema) -> Result<Self> {
        let mapper = Self::new(store);
        mapper.set_schema(schema)?;
        Ok(mapper)
    }

    /// Suffix physical keys with each store's namespace tag
    /// (`:HASH`, `:ZSET`).
    pub fn namespaced(mut self) -> Self {
        self.namespace = true;
        self
    }

    /// The current schema, if one is bound.
    pub fn schema(&self) -> Option<Schema> {
        match &*self.schema.read() {
            SchemaState::Bound(schema) => Some(schema.clone()),
            SchemaState::Unbound => None,
        }
    }

    /// Force-bind `schema`, replacing whatever was current, and return
    /// the now-current schema. Stored data is not rewritten.
    pub fn set_schema(&self, schema: Schema) -> Result<Schema> {
        if schema.is_empty() {
            return Err(Error::InvalidSchema);
        }
        debug!(fields = schema.len(), "binding caller-supplied schema");
        *self.schema.write() = SchemaState::Bound(schema.clone());
        Ok(schema)
    }

    /// Decompose `value` and write it under `key`, binding a schema
    /// inferred from `value` first if none is bound yet.
    ///
    /// Returns one acknowledgement per primitive write. The batch runs
    /// concurrently; the first failing write is reported and the rest
    /// are not rolled back.
    pub async fn add(&self, key: &str, value: &Value) -> Result<Vec<u64>> {
        if !value.is_object() {
            return Err(Error::NotAnObject {
                kind: kind_of(value).to_owned(),
            });
        }
        let schema = self.bind_or_current(value)?;
        let ops = encode::encode(key, value, &schema)?;
        debug!(key, ops = ops.len(), "writing object");
        try_join_all(ops.iter().map(|op| self.execute(op))).await
    }

    /// Reconstruct the object stored under `key`.
    pub async fn get(&self, key: &str) -> Result<Value> {
        let schema = self.schema().ok_or(Error::UninitializedSchema)?;
        debug!(key, "reading object");
        decode::decode(self.store.as_ref(), key, &schema, self.namespace).await
    }

    fn bind_or_current(&self, sample: &Value) -> Result<Schema> {
        let mut state = self.schema.write();
        match &*state {
            SchemaState::Bound(schema) => Ok(schema.clone()),
            SchemaState::Unbound => {
                let schema = Schema::infer(sample)?;
                debug!(fields = schema.len(), "schema inferred from first write");
                *state = SchemaState::Bound(schema.clone());
                Ok(schema)
            }
        }
    }

    async fn execute(&self, op: &WriteOp) -> Result<u64> {
        match op {
            WriteOp::SetFields { key, fields } => {
                let key = key::physical(key, hash::SUFFIX, self.namespace);
                Ok(self.store.set_fields(&key, fields.clone()).await?)
            }
            WriteOp::AddMember { key, member, score } => {
                let key = key::physical(key, sorted_set::SUFFIX, self.namespace);
                Ok(self.store.add_member(&key, member, *score).await?)
            }
        }
    }
}
