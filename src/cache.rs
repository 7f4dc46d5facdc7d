// Copyright (c) 2024-2025 Jesse Morgan
// Licensed under the MIT License. See LICENSE file for details.

//! Suggestion caching with TTL expiry and size-bounded eviction.
//!
//! The cache memoizes the prediction engine's raw (word-agnostic) candidate
//! sets, keyed by a context fingerprint. It is a performance optimization,
//! never a correctness dependency: every persistence failure is swallowed
//! and logged, and a missing or malformed backing store starts as an empty
//! cache. The backing store is one JSON document, read whole at startup and
//! rewritten whole after each mutation via write-to-temp + atomic rename,
//! so concurrent completion processes sharing the store see last-writer-wins
//! and never a torn file.

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Default time-to-live for a cache entry: one hour.
pub const DEFAULT_TTL_SECS: u64 = 3600;

/// Default maximum number of cached entries before eviction.
pub const DEFAULT_MAX_ENTRIES: usize = 1000;

/// File name of the backing store under the cache directory.
const STORE_FILE: &str = "completion_cache.json";

/// One cached suggestion list with its bookkeeping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    /// The raw, word-agnostic candidate set.
    pub suggestions: Vec<String>,
    /// When the entry was created; expiry is measured from here.
    pub created: DateTime<Utc>,
    /// Refreshed on every hit; eviction keeps the most recently used.
    pub last_used: DateTime<Utc>,
    /// Incremented on every hit.
    pub hit_count: u64,
    /// Time-to-live in seconds.
    pub ttl_secs: u64,
}

impl CacheEntry {
    fn new(suggestions: Vec<String>, ttl_secs: u64) -> Self {
        let now = Utc::now();
        Self {
            suggestions,
            created: now,
            last_used: now,
            hit_count: 0,
            ttl_secs,
        }
    }

    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(self.created) > Duration::seconds(self.ttl_secs as i64)
    }
}

/// Point-in-time cache statistics.
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub total_entries: usize,
    pub total_hits: u64,
    pub expired_entries: usize,
    pub max_entries: usize,
}

/// Size-bounded suggestion cache with optional on-disk persistence.
///
/// Constructed explicitly and handed to the prediction engine; there is no
/// process-wide singleton, so tests run against an in-memory instance.
pub struct SuggestionCache {
    entries: IndexMap<String, CacheEntry>,
    max_entries: usize,
    store_path: Option<PathBuf>,
}

impl SuggestionCache {
    /// An in-memory cache with the default capacity. Nothing is persisted.
    pub fn in_memory() -> Self {
        Self::with_capacity(DEFAULT_MAX_ENTRIES)
    }

    /// An in-memory cache with a custom capacity.
    pub fn with_capacity(max_entries: usize) -> Self {
        Self {
            entries: IndexMap::new(),
            max_entries,
            store_path: None,
        }
    }

    /// Open a cache backed by the given store file, loading any existing
    /// content. Missing or malformed content yields an empty cache; this
    /// constructor never fails.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = Self::load_store(&path);
        Self {
            entries,
            max_entries: DEFAULT_MAX_ENTRIES,
            store_path: Some(path),
        }
    }

    /// Open the per-user default store (`~/.tabwise/completion_cache.json`).
    /// Falls back to an in-memory cache when no home directory is available.
    pub fn open_default() -> Self {
        match dirs::home_dir() {
            Some(home) => Self::open(home.join(".tabwise").join(STORE_FILE)),
            None => {
                tracing::warn!("CACHE_NO_HOME_DIR | falling back to in-memory cache");
                Self::in_memory()
            }
        }
    }

    /// Look up a live entry. A hit refreshes `last_used`, increments
    /// `hit_count`, persists, and returns the stored suggestions. An expired
    /// entry is removed and reported as a miss; expiry is a read-time check,
    /// not something that waits for [`prune_expired`](Self::prune_expired).
    pub fn get(&mut self, key: &str) -> Option<Vec<String>> {
        let now = Utc::now();

        if self.entries.get(key).is_some_and(|e| e.is_expired(now)) {
            self.entries.shift_remove(key);
            self.persist();
            tracing::debug!("CACHE_EXPIRED | key={}", key);
            return None;
        }

        let suggestions = {
            let entry = self.entries.get_mut(key)?;
            entry.last_used = now;
            entry.hit_count += 1;
            entry.suggestions.clone()
        };
        self.persist();
        Some(suggestions)
    }

    /// Insert or overwrite an entry with fresh timestamps, a zeroed hit
    /// counter, and the given TTL, then evict down to capacity and persist.
    pub fn put(&mut self, key: &str, suggestions: Vec<String>, ttl_secs: u64) {
        self.entries
            .insert(key.to_string(), CacheEntry::new(suggestions, ttl_secs));
        self.evict_to_capacity();
        self.persist();
    }

    /// Remove one entry. Returns whether it existed.
    pub fn invalidate(&mut self, key: &str) -> bool {
        let removed = self.entries.shift_remove(key).is_some();
        if removed {
            self.persist();
        }
        removed
    }

    /// Drop everything.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.persist();
    }

    /// Maintenance sweep: remove every entry whose age exceeds its own TTL.
    /// Returns the number of entries removed.
    pub fn prune_expired(&mut self) -> usize {
        let now = Utc::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(now));
        let removed = before - self.entries.len();
        if removed > 0 {
            self.persist();
            tracing::debug!("CACHE_PRUNED | removed={}", removed);
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Whether a key currently has a live (non-expired) entry, without
    /// touching its recency bookkeeping.
    pub fn contains_live(&self, key: &str) -> bool {
        let now = Utc::now();
        self.entries
            .get(key)
            .is_some_and(|entry| !entry.is_expired(now))
    }

    /// Hit count for a key, if present. Observability only.
    pub fn hit_count(&self, key: &str) -> Option<u64> {
        self.entries.get(key).map(|entry| entry.hit_count)
    }

    pub fn stats(&self) -> CacheStats {
        let now = Utc::now();
        CacheStats {
            total_entries: self.entries.len(),
            total_hits: self.entries.values().map(|e| e.hit_count).sum(),
            expired_entries: self
                .entries
                .values()
                .filter(|e| e.is_expired(now))
                .count(),
            max_entries: self.max_entries,
        }
    }

    /// When over capacity, drop the least-recently-used entries until the
    /// count equals `max_entries`.
    fn evict_to_capacity(&mut self) {
        if self.entries.len() <= self.max_entries {
            return;
        }
        let excess = self.entries.len() - self.max_entries;
        self.entries
            .sort_by(|_, a, _, b| a.last_used.cmp(&b.last_used));
        self.entries = self.entries.split_off(excess);
        tracing::debug!("CACHE_EVICTED | dropped={} max={}", excess, self.max_entries);
    }

    fn load_store(path: &Path) -> IndexMap<String, CacheEntry> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            // A missing store is a normal first run.
            Err(_) => return IndexMap::new(),
        };
        match serde_json::from_str(&content) {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!(
                    "CACHE_LOAD_FAILED | path={} error={} (starting empty)",
                    path.display(),
                    err
                );
                IndexMap::new()
            }
        }
    }

    /// Write the whole store. Failures are swallowed: the cache must never
    /// take the completion path down with it.
    fn persist(&self) {
        let Some(path) = &self.store_path else {
            return;
        };
        if let Err(err) = self.write_store(path) {
            tracing::warn!(
                "CACHE_PERSIST_FAILED | path={} error={:#}",
                path.display(),
                err
            );
        }
    }

    /// Temp file + atomic rename so a concurrent reader never observes a
    /// partially written store (atomic on POSIX, best-effort on Windows).
    /// The temp name carries the writer's pid: concurrent processes each
    /// write their own temp inode, so one writer can never rename a file
    /// another writer is still filling. Last rename wins whole.
    fn write_store(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create cache directory: {:?}", parent))?;
        }

        let content = serde_json::to_string_pretty(&self.entries)
            .context("Failed to serialize cache store")?;

        let temp_path = path.with_extension(format!("tmp.{}", std::process::id()));
        {
            let mut temp_file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .with_context(|| format!("Failed to create temp file: {:?}", temp_path))?;
            temp_file
                .write_all(content.as_bytes())
                .context("Failed to write cache store")?;
            temp_file
                .sync_all()
                .context("Failed to sync cache store to disk")?;
        }

        fs::rename(&temp_path, path)
            .with_context(|| format!("Failed to replace cache store: {:?}", path))?;
        Ok(())
    }
}
