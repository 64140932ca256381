use redis::AsyncCommands;
use redis::Client;

use crate::error::AppResult;

use super::KeyValueStore;

/// Creates a Redis client for durable visitor storage
pub fn create_redis_client(redis_url: &str) -> anyhow::Result<Client> {
    let client = Client::open(redis_url)?;
    Ok(client)
}

/// Durable key-value store backed by Redis
///
/// Entries are written without a TTL; nothing in this crate expires them.
#[derive(Clone)]
pub struct RedisStore {
    redis_client: Client,
}

impl RedisStore {
    pub fn new(redis_client: Client) -> Self {
        Self { redis_client }
    }
}

#[async_trait::async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let mut conn = self.redis_client.get_multiplexed_async_connection().await?;
        let value: Option<String> = conn.get(key).await.map_err(|e| {
            tracing::warn!(error = %e, key = %key, "Redis get failed");
            e
        })?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: String) -> AppResult<()> {
        let mut conn = self.redis_client.get_multiplexed_async_connection().await?;
        let _: () = conn.set(key, value).await?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "redis"
    }
}
