//! In-memory KV store for tests and local development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::ports::{KvError, KvStore};

#[derive(Debug)]
struct Entry {
    value: String,
    expires_at: Option<Instant>,
}

/// In-memory [`KvStore`] with TTL support.
///
/// Expired entries are dropped lazily on read.
#[derive(Debug, Default)]
pub struct InMemoryKvStore {
    entries: Mutex<HashMap<String, Entry>>,
}

impl InMemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live (unexpired) entries
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .lock()
            .expect("kv store lock poisoned")
            .values()
            .filter(|e| e.expires_at.map_or(true, |at| at > now))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl KvStore for InMemoryKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        let mut entries = self.entries.lock().expect("kv store lock poisoned");
        match entries.get(key) {
            Some(entry) if entry.expires_at.is_some_and(|at| at <= Instant::now()) => {
                entries.remove(key);
                Ok(None)
            }
            Some(entry) => Ok(Some(entry.value.clone())),
            None => Ok(None),
        }
    }

    async fn put(&self, key: &str, value: String) -> Result<(), KvError> {
        self.entries.lock().expect("kv store lock poisoned").insert(
            key.to_string(),
            Entry {
                value,
                expires_at: None,
            },
        );
        Ok(())
    }

    async fn put_with_ttl(&self, key: &str, value: String, ttl_secs: u64) -> Result<(), KvError> {
        self.entries.lock().expect("kv store lock poisoned").insert(
            key.to_string(),
            Entry {
                value,
                expires_at: Some(Instant::now() + Duration::from_secs(ttl_secs)),
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), KvError> {
        self.entries
            .lock()
            .expect("kv store lock poisoned")
            .remove(key);
        Ok(())
    }

    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>, KvError> {
        let now = Instant::now();
        let mut keys: Vec<String> = self
            .entries
            .lock()
            .expect("kv store lock poisoned")
            .iter()
            .filter(|(key, entry)| {
                key.starts_with(prefix) && entry.expires_at.map_or(true, |at| at > now)
            })
            .map(|(key, _)| key.clone())
            .collect();
        keys.sort();
        Ok(keys)
    }
}
