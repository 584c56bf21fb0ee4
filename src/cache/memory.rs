// In-process cache store.
// Keeps entries in a concurrent map; expiry is checked on read.

use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::error::Result;

use super::store::{CacheStore, CachedData};

/// Cache store held in memory for the life of the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, CachedData<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, including expired ones not yet read.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let live = match self.entries.get(key) {
            None => return Ok(None),
            Some(entry) if !entry.is_expired() => Some(entry.data.clone()),
            Some(_) => None,
        };

        if live.is_none() {
            self.entries.remove_if(key, |_, entry| entry.is_expired());
        }
        Ok(live)
    }

    async fn put(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        self.entries
            .insert(key.to_string(), CachedData::new(value.to_string(), ttl));
        Ok(())
    }
}
