use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::AppResult;
use crate::middleware::session_id::SessionId;

use super::{KeyValueStore, StorageKey};

const KEY_PREFIX: &str = "popcorn";

/// One visitor's view of durable storage
///
/// Every key is namespaced by the session id, so visitors never observe each
/// other's interactions, ranked lists or cached reviews.
#[derive(Clone)]
pub struct ClientStorage {
    store: Arc<dyn KeyValueStore>,
    namespace: String,
}

impl ClientStorage {
    pub fn new(store: Arc<dyn KeyValueStore>, session_id: &SessionId) -> Self {
        Self {
            store,
            namespace: format!("{}:{}", KEY_PREFIX, session_id),
        }
    }

    fn scoped(&self, key: &StorageKey) -> String {
        format!("{}:{}", self.namespace, key)
    }

    /// Reads and decodes an entry.
    ///
    /// An entry that fails to decode is reported as absent.
    pub async fn read<T: DeserializeOwned>(&self, key: &StorageKey) -> AppResult<Option<T>> {
        let Some(json) = self.store.get(&self.scoped(key)).await? else {
            return Ok(None);
        };

        match serde_json::from_str(&json) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    key = %key,
                    store = self.store.name(),
                    "Discarding malformed stored entry"
                );
                Ok(None)
            }
        }
    }

    pub async fn write<T: Serialize>(&self, key: &StorageKey, value: &T) -> AppResult<()> {
        let json = serde_json::to_string(value)?;
        self.store.set(&self.scoped(key), json).await
    }
}
