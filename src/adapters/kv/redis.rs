//! Redis-backed KV store implementation for production deployments.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;

use crate::ports::{KvError, KvStore};

/// Redis-backed [`KvStore`].
///
/// Holds a multiplexed connection; each call clones it, which is cheap
/// and lets concurrent requests share one TCP connection.
#[derive(Clone)]
pub struct RedisKvStore {
    conn: MultiplexedConnection,
}

impl RedisKvStore {
    pub fn new(conn: MultiplexedConnection) -> Self {
        Self { conn }
    }

    /// Open a connection to the given Redis URL
    pub async fn connect(url: &str) -> Result<Self, KvError> {
        let client =
            redis::Client::open(url).map_err(|e| KvError::Unavailable(e.to_string()))?;
        let conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| KvError::Unavailable(e.to_string()))?;
        Ok(Self::new(conn))
    }
}

#[async_trait]
impl KvStore for RedisKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        let mut conn = self.conn.clone();
        conn.get(key)
            .await
            .map_err(|e: redis::RedisError| KvError::Unavailable(e.to_string()))
    }

    async fn put(&self, key: &str, value: String) -> Result<(), KvError> {
        let mut conn = self.conn.clone();
        conn.set::<_, _, ()>(key, value)
            .await
            .map_err(|e: redis::RedisError| KvError::Unavailable(e.to_string()))
    }

    async fn put_with_ttl(&self, key: &str, value: String, ttl_secs: u64) -> Result<(), KvError> {
        let mut conn = self.conn.clone();
        conn.set_ex::<_, _, ()>(key, value, ttl_secs)
            .await
            .map_err(|e: redis::RedisError| KvError::Unavailable(e.to_string()))
    }

    async fn delete(&self, key: &str) -> Result<(), KvError> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(key)
            .await
            .map_err(|e: redis::RedisError| KvError::Unavailable(e.to_string()))
    }

    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>, KvError> {
        let mut conn = self.conn.clone();
        let pattern = format!("{prefix}*");

        // SCAN instead of KEYS so a large keyspace never blocks the server
        let mut keys = Vec::new();
        let mut iter = conn
            .scan_match::<_, String>(&pattern)
            .await
            .map_err(|e: redis::RedisError| KvError::Unavailable(e.to_string()))?;
        while let Some(key) = iter.next_item().await {
            keys.push(key);
        }

        Ok(keys)
    }
}
