//! Process-local cache backend.

use super::CacheInterface;
use async_trait::async_trait;
use kasir_core::KasirResult;
use parking_lot::Mutex;
use shaku::Component;
use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Debug, Default)]
struct Store {
    values: HashMap<String, (String, Instant)>,
    tags: HashMap<String, (HashSet<String>, Instant)>,
}

impl Store {
    fn purge_expired(&mut self, now: Instant) {
        self.values.retain(|_, (_, expires_at)| *expires_at > now);
        self.tags.retain(|_, (_, expires_at)| *expires_at > now);
    }
}

/// In-memory cache with per-entry expiry.
///
/// Patterns passed to [`CacheInterface::delete_pattern`] support a single
/// trailing `*`; any other pattern is matched literally.
#[derive(Component, Default)]
#[shaku(interface = CacheInterface)]
pub struct MemoryCacheService {
    #[shaku(default)]
    store: Mutex<Store>,
}

impl MemoryCacheService {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries, tag sets excluded.
    #[must_use]
    pub fn len(&self) -> usize {
        let mut store = self.store.lock();
        store.purge_expired(Instant::now());
        store.values.len()
    }

    /// Returns `true` when no live entry remains.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn matches_pattern(pattern: &str, key: &str) -> bool {
    match pattern.strip_suffix('*') {
        Some(prefix) => key.starts_with(prefix),
        None => key == pattern,
    }
}

#[async_trait]
impl CacheInterface for MemoryCacheService {
    fn is_enabled(&self) -> bool {
        true
    }

    async fn get_raw(&self, key: &str) -> KasirResult<Option<String>> {
        let now = Instant::now();
        let store = self.store.lock();
        let value = store
            .values
            .get(key)
            .filter(|(_, expires_at)| *expires_at > now)
            .map(|(value, _)| value.clone());

        match &value {
            Some(_) => debug!("Cache hit for key '{}'", key),
            None => debug!("Cache miss for key '{}'", key),
        }
        Ok(value)
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> KasirResult<()> {
        let now = Instant::now();
        let mut store = self.store.lock();
        store.purge_expired(now);
        store
            .values
            .insert(key.to_string(), (value.to_string(), now + ttl));
        Ok(())
    }

    async fn delete(&self, key: &str) -> KasirResult<bool> {
        let now = Instant::now();
        let removed = self.store.lock().values.remove(key);
        Ok(removed.is_some_and(|(_, expires_at)| expires_at > now))
    }

    async fn delete_many(&self, keys: &[String]) -> KasirResult<u64> {
        let now = Instant::now();
        let mut store = self.store.lock();
        let deleted = keys
            .iter()
            .filter_map(|key| store.values.remove(key))
            .filter(|(_, expires_at)| *expires_at > now)
            .count();
        Ok(deleted as u64)
    }

    async fn delete_pattern(&self, pattern: &str) -> KasirResult<u64> {
        let mut store = self.store.lock();
        store.purge_expired(Instant::now());

        let before = store.values.len() + store.tags.len();
        store.values.retain(|key, _| !matches_pattern(pattern, key));
        store.tags.retain(|key, _| !matches_pattern(pattern, key));
        let deleted = before - (store.values.len() + store.tags.len());

        debug!("Deleted {} keys matching pattern '{}'", deleted, pattern);
        Ok(deleted as u64)
    }

    async fn add_to_tag(&self, tag: &str, key: &str, ttl: Duration) -> KasirResult<()> {
        let now = Instant::now();
        let mut store = self.store.lock();
        let entry = store
            .tags
            .entry(tag.to_string())
            .or_insert_with(|| (HashSet::new(), now));
        if entry.1 <= now {
            entry.0.clear();
        }
        entry.0.insert(key.to_string());
        entry.1 = now + ttl;
        Ok(())
    }

    async fn tag_members(&self, tag: &str) -> KasirResult<Vec<String>> {
        let now = Instant::now();
        let store = self.store.lock();
        Ok(store
            .tags
            .get(tag)
            .filter(|(_, expires_at)| *expires_at > now)
            .map(|(members, _)| members.iter().cloned().collect())
            .unwrap_or_default())
    }

    async fn remove_from_tag(&self, tag: &str, keys: &[String]) -> KasirResult<()> {
        let mut store = self.store.lock();
        if let Some((members, _)) = store.tags.get_mut(tag) {
            for key in keys {
                members.remove(key);
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for MemoryCacheService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryCacheService").finish_non_exhaustive()
    }
}
