//! Bounded concurrent caches.
//!
//! Every table is a sharded [`DashMap`], so readers and writers on different
//! keys never contend on a single lock. When a table is full, a quarter of
//! its entries are dropped in map iteration order before the insert. This is
//! not LRU; it only keeps each table under its capacity.
//!
//! Two threads missing the same key may both compute and insert; the last
//! write wins and the table stays consistent.

use crate::models::{CacheCapacities, IconRef, ResolvedIcon};
use dashmap::DashMap;
use mono_silhouette::{IconSource, RasterImage};
use serde::Serialize;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// The cache tables owned by a [`TieredCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheKind {
    /// Unthemed icon sources, keyed `raw_<ns>_<id>`.
    RawResource,
    /// Synthesized silhouettes, keyed by identity key (or its `_raw` variant).
    Monochrome,
    /// Silhouettes fitted to a target size, keyed `fit_<key>_<w>_<h>`.
    Fitted,
    /// Final status decisions, keyed `sb_<key>`.
    Descriptor,
    /// Last known source icon per package.
    SourceIcon,
}

impl CacheKind {
    pub const ALL: [CacheKind; 5] = [
        CacheKind::RawResource,
        CacheKind::Monochrome,
        CacheKind::Fitted,
        CacheKind::Descriptor,
        CacheKind::SourceIcon,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CacheKind::RawResource => "raw_resource",
            CacheKind::Monochrome => "monochrome",
            CacheKind::Fitted => "fitted",
            CacheKind::Descriptor => "descriptor",
            CacheKind::SourceIcon => "source_icon",
        }
    }
}

impl fmt::Display for CacheKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Point-in-time view of one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub kind: CacheKind,
    pub len: usize,
    pub capacity: usize,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

/// A key/value table that never holds more than `capacity` entries.
///
/// Values are cloned out on read so callers can never alias cached state.
pub struct BoundedCache<V> {
    kind: CacheKind,
    capacity: usize,
    map: DashMap<String, V>,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

impl<V: Clone> BoundedCache<V> {
    pub fn new(kind: CacheKind, capacity: usize) -> Self {
        Self {
            kind,
            capacity,
            map: DashMap::new(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    pub fn kind(&self) -> CacheKind {
        self.kind
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    /// Copy of the value under `key`, counting the hit or miss.
    pub fn get(&self, key: &str) -> Option<V> {
        let value = self.map.get(key).map(|entry| entry.value().clone());
        if value.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(cache = %self.kind, key, "Cache hit");
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(cache = %self.kind, key, "Cache miss");
        }
        value
    }

    /// Store `value`, evicting first if the table is full.
    pub fn insert(&self, key: &str, value: V) {
        if self.capacity == 0 {
            return;
        }
        if !self.map.contains_key(key) && self.map.len() >= self.capacity {
            self.evict((self.capacity / 4).max(1), key);
        }
        self.map.insert(key.to_string(), value);

        // Concurrent inserters can push the table past capacity
        loop {
            let len = self.map.len();
            if len <= self.capacity || self.evict(len - self.capacity, key) == 0 {
                break;
            }
        }
    }

    pub fn remove(&self, key: &str) -> Option<V> {
        self.map.remove(key).map(|(_, value)| value)
    }

    pub fn clear(&self) {
        self.map.clear();
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            kind: self.kind,
            len: self.map.len(),
            capacity: self.capacity,
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
        }
    }

    /// Drop up to `count` entries other than `keep`. Returns how many went.
    fn evict(&self, count: usize, keep: &str) -> usize {
        // Collect first: removing while iterating would deadlock on the shard lock
        let victims: Vec<String> = self
            .map
            .iter()
            .filter(|entry| entry.key() != keep)
            .take(count)
            .map(|entry| entry.key().clone())
            .collect();

        let removed = victims
            .iter()
            .filter(|key| self.map.remove(key.as_str()).is_some())
            .count();
        self.evictions.fetch_add(removed as u64, Ordering::Relaxed);
        tracing::debug!(cache = %self.kind, removed, capacity = self.capacity, "Evicted entries");
        removed
    }
}

/// The five cache tables of an icon engine.
pub struct TieredCache {
    raw_resource: BoundedCache<IconSource>,
    monochrome: BoundedCache<RasterImage>,
    fitted: BoundedCache<RasterImage>,
    descriptor: BoundedCache<ResolvedIcon>,
    source_icon: BoundedCache<IconRef>,
}

impl TieredCache {
    pub fn new(capacities: &CacheCapacities) -> Self {
        Self {
            raw_resource: BoundedCache::new(CacheKind::RawResource, capacities.raw_resource),
            monochrome: BoundedCache::new(CacheKind::Monochrome, capacities.monochrome),
            fitted: BoundedCache::new(CacheKind::Fitted, capacities.fitted),
            descriptor: BoundedCache::new(CacheKind::Descriptor, capacities.descriptor),
            source_icon: BoundedCache::new(CacheKind::SourceIcon, capacities.source_icon),
        }
    }

    pub fn raw_resource(&self) -> &BoundedCache<IconSource> {
        &self.raw_resource
    }

    pub fn monochrome(&self) -> &BoundedCache<RasterImage> {
        &self.monochrome
    }

    pub fn fitted(&self) -> &BoundedCache<RasterImage> {
        &self.fitted
    }

    pub fn descriptor(&self) -> &BoundedCache<ResolvedIcon> {
        &self.descriptor
    }

    pub fn source_icon(&self) -> &BoundedCache<IconRef> {
        &self.source_icon
    }

    /// Size and counters of every table, in [`CacheKind::ALL`] order.
    pub fn snapshot(&self) -> Vec<CacheStats> {
        vec![
            self.raw_resource.stats(),
            self.monochrome.stats(),
            self.fitted.stats(),
            self.descriptor.stats(),
            self.source_icon.stats(),
        ]
    }

    /// Empty every table. Counters are kept.
    pub fn clear_all(&self) {
        self.raw_resource.clear();
        self.monochrome.clear();
        self.fitted.clear();
        self.descriptor.clear();
        self.source_icon.clear();
        tracing::debug!("Cleared all caches");
    }
}

impl Default for TieredCache {
    fn default() -> Self {
        Self::new(&CacheCapacities::default())
    }
}
