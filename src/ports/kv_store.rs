//! Key-value storage port

use async_trait::async_trait;
use thiserror::Error;

/// Errors from the KV store
#[derive(Debug, Error)]
pub enum KvError {
    /// The store could not be reached or the operation failed
    #[error("KV store unavailable: {0}")]
    Unavailable(String),

    /// A stored document could not be decoded
    #[error("Stored document corrupt at key {key}: {reason}")]
    Corrupt { key: String, reason: String },
}

/// String-keyed, string-valued storage.
///
/// Everything the service persists (transient orders, completed orders,
/// the override documents, the site config) is JSON under a well-known
/// key, so the port stays deliberately small. No compare-and-swap is
/// offered; callers doing read-modify-write accept the lost-update race.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Fetch the value at `key`, `None` if absent
    async fn get(&self, key: &str) -> Result<Option<String>, KvError>;

    /// Store `value` at `key`, replacing any previous value
    async fn put(&self, key: &str, value: String) -> Result<(), KvError>;

    /// Store `value` at `key` with an expiry
    async fn put_with_ttl(&self, key: &str, value: String, ttl_secs: u64) -> Result<(), KvError>;

    /// Remove `key`; removing an absent key is not an error
    async fn delete(&self, key: &str) -> Result<(), KvError>;

    /// List all keys starting with `prefix`
    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>, KvError>;
}
