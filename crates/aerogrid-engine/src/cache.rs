//! Memoised prediction responses.
//!
//! Keys are deliberately coarse: the rounded center and the day. Two
//! viewports sharing a center but differing in bounds or zoom receive the
//! same cached response.

use std::collections::BTreeMap;
use std::sync::Arc;

use aerogrid_core::GeoPoint;
use chrono::NaiveDate;

use crate::types::PredictionResponse;

pub const DEFAULT_CAPACITY: usize = 256;
pub const DEFAULT_COORD_DECIMALS: u32 = 4;

/// Which code path produced a cached response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum QueryKind {
    Viewport,
    Nearest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CacheKey {
    pub kind: QueryKind,
    pub lat_e: i64,
    pub lon_e: i64,
    pub date: NaiveDate,
}

impl CacheKey {
    /// Round `center` to `decimals` places (capped at 8) and pair it with the day.
    #[must_use]
    pub fn new(kind: QueryKind, center: GeoPoint, date: NaiveDate, decimals: u32) -> Self {
        let scale = 10f64.powi(i32::try_from(decimals.min(8)).unwrap_or(8));
        #[allow(clippy::cast_possible_truncation)]
        let fixed = |v: f64| (v * scale).round() as i64;
        Self {
            kind,
            lat_e: fixed(center.latitude),
            lon_e: fixed(center.longitude),
            date,
        }
    }
}

#[derive(Debug)]
struct CacheEntry {
    response: Arc<PredictionResponse>,
    last_used_tick: u64,
}

/// Bounded LRU map from [`CacheKey`] to shared responses.
///
/// Eviction picks the entry with the oldest `last_used_tick`; ticks are
/// unique so there are no ties. A capacity of zero stores nothing.
#[derive(Debug)]
pub struct PredictionCache {
    capacity: usize,
    tick: u64,
    entries: BTreeMap<CacheKey, CacheEntry>,
}

impl PredictionCache {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            tick: 0,
            entries: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn next_tick(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }

    /// Look up a response, marking it most recently used.
    pub fn get(&mut self, key: &CacheKey) -> Option<Arc<PredictionResponse>> {
        let tick = self.next_tick();
        match self.entries.get_mut(key) {
            Some(entry) => {
                entry.last_used_tick = tick;
                tracing::debug!(?key, "prediction cache hit");
                Some(Arc::clone(&entry.response))
            }
            None => {
                tracing::debug!(?key, "prediction cache miss");
                None
            }
        }
    }

    /// Insert or replace a response, evicting the least recently used entry
    /// when full.
    pub fn put(&mut self, key: CacheKey, response: Arc<PredictionResponse>) {
        if self.capacity == 0 {
            return;
        }
        let tick = self.next_tick();
        if !self.entries.contains_key(&key) && self.entries.len() >= self.capacity {
            self.evict_lru();
        }
        self.entries.insert(
            key,
            CacheEntry {
                response,
                last_used_tick: tick,
            },
        );
    }

    fn evict_lru(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.last_used_tick)
            .map(|(key, _)| *key);
        if let Some(key) = oldest {
            self.entries.remove(&key);
            tracing::debug!(?key, "evicted prediction from cache");
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for PredictionCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
