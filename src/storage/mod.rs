use crate::error::AppResult;

pub mod client;
pub mod keys;
pub mod memory;
pub mod redis_store;

pub use client::ClientStorage;
pub use keys::StorageKey;
pub use memory::MemoryStore;
pub use redis_store::{create_redis_client, RedisStore};

/// Durable string key-value storage
///
/// Stands in for the browser's local and cache storage. Flows depend on this
/// trait so the backing store can be swapped for tests.
#[async_trait::async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    async fn set(&self, key: &str, value: String) -> AppResult<()>;

    /// Store name for logging
    fn name(&self) -> &'static str;
}
