use async_trait::async_trait;

use crate::error::Result;

/// Plain string keys.
#[async_trait]
pub trait KvStore: Send + Sync {
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Delete keys. Returns the number of keys that existed.
    async fn del(&self, keys: &[String]) -> Result<u64>;
}
