use async_trait::async_trait;
use std::collections::HashMap;

use crate::error::Result;

/// Physical-namespace suffix for flat-map keys.
pub const SUFFIX: &str = "HASH";

/// A remote key -> (field -> string) structure with multi-field set and get.
///
/// The mapper bundles every scalar field of one object level into a single
/// [`set_fields`](HashStore::set_fields) call, and reads them back with a
/// single [`get_fields`](HashStore::get_fields) call.
#[async_trait]
pub trait HashStore: Send + Sync {
    /// Set several fields at once. Returns the number of fields that did
    /// not exist before the write.
    async fn set_fields(&self, key: &str, fields: HashMap<String, String>) -> Result<u64>;

    /// Fetch the named fields. The result aligns position-for-position
    /// with `fields`; a field absent from storage yields `None`.
    async fn get_fields(&self, key: &str, fields: &[String]) -> Result<Vec<Option<String>>>;

    /// Fetch every field stored under `key`.
    async fn get_all(&self, key: &str) -> Result<HashMap<String, String>>;

    /// Remove one field. Returns the number of fields removed.
    async fn remove_field(&self, key: &str, field: &str) -> Result<u64>;
}
