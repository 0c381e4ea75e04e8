//! Memoization of processed tables by file identifier
//!
//! Each identifier owns a slot guarded by its own mutex. The first caller for
//! an identifier computes the table while holding the slot; concurrent
//! callers for the same identifier block on the slot and then share the
//! result, while callers for other identifiers proceed independently.
//! Failures are never stored.
//!
//! Identifiers are compared as given: `data/x.csv` and `./data/x.csv` are two
//! entries. Whether a stored table is ever revalidated against the file is
//! decided by [`Freshness`].

use std::collections::VecDeque;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::SystemTime;

use log::debug;
use rustc_hash::FxHashMap;

use crate::config::{CacheConfig, DatasetConfig, Freshness};
use crate::error::Result;
use crate::loader::process_file;
use crate::models::TrendTable;

#[derive(Debug)]
struct Cached {
    table: Arc<TrendTable>,
    modified: Option<SystemTime>,
}

type Slot = Mutex<Option<Cached>>;

/// Slots by identifier plus their use order, least recent first
#[derive(Debug, Default)]
struct Entries {
    slots: FxHashMap<String, Arc<Slot>>,
    recency: VecDeque<String>,
}

impl Entries {
    fn touch(&mut self, key: &str, capacity: usize) -> Arc<Slot> {
        if let Some(slot) = self.slots.get(key) {
            let slot = Arc::clone(slot);
            if let Some(pos) = self.recency.iter().position(|k| k == key) {
                self.recency.remove(pos);
            }
            self.recency.push_back(key.to_string());
            self.evict(capacity);
            return slot;
        }

        let slot = Arc::new(Mutex::new(None));
        self.slots.insert(key.to_string(), Arc::clone(&slot));
        self.recency.push_back(key.to_string());
        self.evict(capacity);

        slot
    }

    /// Drop least recently used slots until at most `capacity` remain.
    ///
    /// A slot some caller still holds is loading or being read and is never
    /// evicted, so the map may stay above capacity until those callers finish.
    fn evict(&mut self, capacity: usize) {
        while self.slots.len() > capacity {
            let idle = self.recency.iter().position(|key| {
                self.slots
                    .get(key)
                    .is_some_and(|slot| Arc::strong_count(slot) == 1)
            });
            let Some(pos) = idle else {
                break;
            };
            if let Some(evicted) = self.recency.remove(pos) {
                self.slots.remove(&evicted);
                debug!("Evicted {evicted} from trend cache");
            }
        }
    }

    fn remove(&mut self, key: &str) -> Option<Arc<Slot>> {
        self.recency.retain(|k| k != key);
        self.slots.remove(key)
    }
}

/// Bounded cache of aggregated tables keyed by file identifier
#[derive(Debug)]
pub struct TrendCache {
    config: CacheConfig,
    dataset: DatasetConfig,
    entries: Mutex<Entries>,
    loads: AtomicUsize,
}

impl Default for TrendCache {
    fn default() -> Self {
        Self::new(CacheConfig::default(), DatasetConfig::default())
    }
}

impl TrendCache {
    #[must_use]
    pub fn new(config: CacheConfig, dataset: DatasetConfig) -> Self {
        let config = CacheConfig {
            capacity: config.capacity.max(1),
            ..config
        };
        Self {
            config,
            dataset,
            entries: Mutex::new(Entries::default()),
            loads: AtomicUsize::new(0),
        }
    }

    #[must_use]
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Table for `file_identifier`, computing it if no usable entry exists
    pub fn get(&self, file_identifier: impl AsRef<Path>) -> Result<Arc<TrendTable>> {
        let path = file_identifier.as_ref();
        let key = path.to_string_lossy().into_owned();
        let slot = self.lock_entries().touch(&key, self.config.capacity);

        let mut guard = slot.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(cached) = guard.as_ref() {
            if self.is_fresh(path, cached) {
                debug!("Trend cache hit for {key}");
                return Ok(Arc::clone(&cached.table));
            }
            debug!("Trend cache entry for {key} is stale");
        }

        let modified = modified_time(path);
        match process_file(path, &self.dataset) {
            Ok(table) => {
                self.loads.fetch_add(1, Ordering::Relaxed);
                let table = Arc::new(table);
                *guard = Some(Cached {
                    table: Arc::clone(&table),
                    modified,
                });
                drop(guard);
                self.lock_entries().evict(self.config.capacity);
                Ok(table)
            }
            Err(e) => {
                *guard = None;
                drop(guard);
                let mut entries = self.lock_entries();
                if entries
                    .slots
                    .get(&key)
                    .is_some_and(|current| Arc::ptr_eq(current, &slot))
                {
                    entries.remove(&key);
                }
                Err(e)
            }
        }
    }

    /// Whether a computed table is held for `file_identifier`
    #[must_use]
    pub fn contains(&self, file_identifier: impl AsRef<Path>) -> bool {
        let key = file_identifier.as_ref().to_string_lossy();
        let slot = self.lock_entries().slots.get(&*key).cloned();
        slot.is_some_and(|slot| {
            let guard = slot.lock().unwrap_or_else(PoisonError::into_inner);
            guard.is_some()
        })
    }

    /// Number of identifiers held, including ones still being computed
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock_entries().slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of tables computed since the cache was created
    #[must_use]
    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::Relaxed)
    }

    /// Drop the entry for `file_identifier`; returns whether one existed
    pub fn invalidate(&self, file_identifier: impl AsRef<Path>) -> bool {
        let key = file_identifier.as_ref().to_string_lossy();
        self.lock_entries().remove(&*key).is_some()
    }

    /// Drop every entry
    pub fn clear(&self) {
        let mut entries = self.lock_entries();
        entries.slots.clear();
        entries.recency.clear();
    }

    fn lock_entries(&self) -> std::sync::MutexGuard<'_, Entries> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_fresh(&self, path: &Path, cached: &Cached) -> bool {
        match self.config.freshness {
            Freshness::IdentifierOnly => true,
            Freshness::ModifiedTime => modified_time(path) == cached.modified,
        }
    }
}

fn modified_time(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|meta| meta.modified()).ok()
}
