//! Rendered-template cache
//!
//! All cached renders of a templates folder live in one JSON array at
//! `cache/0.cobj`. The index is coarse on purpose: any anomaly (oversized,
//! not JSON, not an array, too many entries) is answered by a miss on read
//! and by deleting the file on write, never by repairing it.

mod entry;


pub use entry::CacheEntry;

use chrono::{DateTime, Utc};

use crate::config::consts::{CACHE_DIR, CACHE_FILE};
use crate::config::CacheConfig;
use crate::error::{Result, TplkitError};
use crate::lock::LockMode;
use crate::store::ResourceStore;

pub struct CacheManager<S: ResourceStore> {
    store: S,
    max_store_hours: u64,
    max_entries: usize,
    max_bytes: u64,
}

/// Outcome of decoding the index for a rewrite
enum Index {
    Empty,
    Entries(Vec<CacheEntry>),
    Oversized(usize),
    Corrupt(String),
}

impl<S: ResourceStore> CacheManager<S> {
    pub fn new(store: S, config: &CacheConfig) -> Self {
        Self {
            store,
            max_store_hours: config.max_store_hours,
            max_entries: config.max_entries,
            max_bytes: config.max_bytes,
        }
    }

    /// Cached text for `name` if a fresh entry exists
    pub fn load(&self, name: &str) -> Option<String> {
        self.load_at(name, Utc::now())
    }

    pub fn load_at(&self, name: &str, now: DateTime<Utc>) -> Option<String> {
        // Taking the lock would create `cache/`; a lookup must not write
        if !self.store.exists(CACHE_FILE) {
            tracing::debug!(template = name, "cache miss, no index");
            return None;
        }

        let _lock = match self.store.lock(CACHE_FILE, LockMode::Shared) {
            Ok(lock) => lock,
            Err(e) => {
                tracing::debug!(error = %e, "cache lock unavailable, treating as miss");
                return None;
            }
        };

        let entries = self.read_entries()?;
        let hit = entries
            .into_iter()
            .filter(|entry| entry.template_name == name)
            .find(|entry| entry.age_hours(now) <= self.max_store_hours);

        match hit {
            Some(entry) => {
                tracing::debug!(template = name, "cache hit");
                Some(entry.template)
            }
            None => {
                tracing::debug!(template = name, "cache miss");
                None
            }
        }
    }

    /// Record `text` as the latest render of `name`
    pub fn store(&self, name: &str, text: &str) -> Result<()> {
        self.store_at(name, text, Utc::now())
    }

    pub fn store_at(&self, name: &str, text: &str, now: DateTime<Utc>) -> Result<()> {
        self.store
            .ensure_directory(CACHE_DIR)
            .map_err(|_| TplkitError::CacheDirUnavailable(CACHE_DIR.into()))?;

        let _lock = self.store.lock(CACHE_FILE, LockMode::Exclusive)?;

        if self.store.exists(CACHE_FILE) && self.store.size(CACHE_FILE)? > self.max_bytes {
            tracing::warn!(max_bytes = self.max_bytes, "cache index too large, resetting");
            return self.store.remove(CACHE_FILE);
        }

        let mut entries = match self.decode_for_write()? {
            Index::Empty => Vec::new(),
            Index::Entries(entries) => entries,
            Index::Oversized(count) => {
                tracing::warn!(
                    entries = count,
                    max_entries = self.max_entries,
                    "cache index over capacity, resetting"
                );
                return self.store.remove(CACHE_FILE);
            }
            Index::Corrupt(reason) => {
                tracing::warn!(%reason, "cache index corrupt, resetting");
                return self.store.remove(CACHE_FILE);
            }
        };

        entries.retain(|entry| entry.template_name != name);
        entries.push(CacheEntry::new(name, text, now));

        let bytes = serde_json::to_vec(&entries)?;
        self.store.write_all(CACHE_FILE, &bytes)?;
        tracing::debug!(template = name, entries = entries.len(), "cache entry written");
        Ok(())
    }

    /// Decoded index; empty when the index is missing or unusable
    pub fn entries(&self) -> Vec<CacheEntry> {
        self.read_entries().unwrap_or_default()
    }

    /// Delete the whole index
    pub fn clear(&self) -> Result<()> {
        if !self.store.exists(CACHE_FILE) {
            return Ok(());
        }
        let _lock = self.store.lock(CACHE_FILE, LockMode::Exclusive)?;
        self.store.remove(CACHE_FILE)
    }

    /// Side-effect-free read used by lookups. Malformed entries inside a
    /// well-formed array are skipped.
    fn read_entries(&self) -> Option<Vec<CacheEntry>> {
        if !self.store.exists(CACHE_FILE) {
            return None;
        }
        if self.store.size(CACHE_FILE).ok()? > self.max_bytes {
            return None;
        }
        let content = self.store.read_to_string(CACHE_FILE).ok()?;
        if content.trim().is_empty() {
            return None;
        }

        let values: Vec<serde_json::Value> = serde_json::from_str(&content).ok()?;
        if values.len() > self.max_entries {
            return None;
        }

        Some(decode_entries(values))
    }

    fn decode_for_write(&self) -> Result<Index> {
        if !self.store.exists(CACHE_FILE) {
            return Ok(Index::Empty);
        }
        let content = self.store.read_to_string(CACHE_FILE)?;
        if content.trim().is_empty() {
            return Ok(Index::Empty);
        }
        Ok(match serde_json::from_str::<Vec<serde_json::Value>>(&content) {
            Ok(values) if values.len() > self.max_entries => Index::Oversized(values.len()),
            Ok(values) => Index::Entries(decode_entries(values)),
            Err(e) => Index::Corrupt(e.to_string()),
        })
    }
}

/// Entries of a well-formed array; elements that are not entries are dropped
fn decode_entries(values: Vec<serde_json::Value>) -> Vec<CacheEntry> {
    values
        .into_iter()
        .filter_map(|value| serde_json::from_value(value).ok())
        .collect()
}
