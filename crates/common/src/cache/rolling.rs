// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2015-2026 Nautech Systems Pty Ltd. All rights reserved.
//  https://nautechsystems.io
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

//! A symmetric rolling cache for shrinking repeated tokens on the wire.
//!
//! The writer of a stream calls [`RollingCache::encode`] and the reader calls
//! [`RollingCache::decode`] for every candidate token, in the same order. The first
//! sighting of a cacheable value passes through as a literal and is assigned the next
//! key on both sides; later sightings travel as the key. When a generation reaches
//! capacity the whole cache is wiped before the next admission, on both sides alike.

use std::{borrow::Cow, fmt::Display};

use transit_core::keys::{CacheKey, is_cacheable};

use super::{config::RollingCacheConfig, store::CacheStore};

/// A bounded, symmetric string-interning cache.
///
/// Unlike an LRU there is no per-entry eviction: reaching capacity discards the
/// entire generation.
///
/// # Examples
///
/// ```
/// use transit_common::cache::rolling::RollingCache;
///
/// let mut sender = RollingCache::new();
/// let mut receiver = RollingCache::new();
///
/// let first = sender.encode("~#point", false);
/// assert_eq!(first, "~#point");
/// assert_eq!(receiver.decode(&first, false), "~#point");
///
/// let second = sender.encode("~#point", false);
/// assert_eq!(second, "^!");
/// assert_eq!(receiver.decode(&second, false), "~#point");
/// ```
///
/// # Thread Safety
///
/// This cache is not thread-safe and must be confined to a single stream. Sender and
/// receiver each own an independent instance.
#[derive(Debug, Clone)]
pub struct RollingCache {
    store: CacheStore,
    capacity: usize,
    generation: u64,
}

impl RollingCache {
    /// Creates a new empty [`RollingCache`] with the wire contract capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RollingCacheConfig::default())
    }

    /// Creates a new empty [`RollingCache`] from the given `config`.
    #[must_use]
    pub fn with_config(config: RollingCacheConfig) -> Self {
        Self {
            store: CacheStore::with_capacity(config.capacity()),
            capacity: config.capacity(),
            generation: 0,
        }
    }

    /// Returns whether `value` is eligible for caching.
    #[must_use]
    pub fn is_cacheable(value: &str, as_map_key: bool) -> bool {
        is_cacheable(value, as_map_key)
    }

    /// Returns the maximum number of entries in a generation.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of entries in the current generation.
    #[must_use]
    pub fn size(&self) -> usize {
        self.store.len()
    }

    /// Returns whether the current generation holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Returns whether the next admission will wipe the current generation.
    #[must_use]
    pub fn is_cache_full(&self) -> bool {
        self.store.len() >= self.capacity
    }

    /// Returns the number of generations wiped since creation.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns whether `value` is a key assigned in the current generation.
    #[must_use]
    pub fn is_key(&self, value: &str) -> bool {
        self.store.contains_key(value)
    }

    /// Returns the key assigned to `value` without admitting it.
    #[must_use]
    pub fn get_key(&self, value: &str) -> Option<CacheKey> {
        self.store.get_key(value)
    }

    /// Returns the value cached under `key` without admitting anything.
    #[must_use]
    pub fn get_value(&self, key: &str) -> Option<&str> {
        self.store.get_value(key)
    }

    /// Returns a reference to the underlying store.
    #[must_use]
    pub const fn store(&self) -> &CacheStore {
        &self.store
    }

    /// Encodes `value` for writing.
    ///
    /// Returns the assigned key when `value` is already cached. Otherwise returns
    /// `value` itself, admitting it to the cache first if it is cacheable.
    pub fn encode<'a>(&mut self, value: &'a str, as_map_key: bool) -> Cow<'a, str> {
        if let Some(key) = self.store.get_key(value) {
            return Cow::Owned(key.to_string());
        }

        self.admit(value, as_map_key)
    }

    /// Decodes `value` as read from the wire.
    ///
    /// Returns the cached value when `value` is an assigned key. Otherwise `value` is
    /// a literal: it is admitted to the cache if cacheable, mirroring the writer, and
    /// returned unchanged. Key-shaped strings with no entry are treated as literals.
    pub fn decode<'a>(&mut self, value: &'a str, as_map_key: bool) -> Cow<'a, str> {
        if let Some(cached) = self.store.get_value(value) {
            return Cow::Owned(cached.to_owned());
        }

        self.admit(value, as_map_key)
    }

    /// Clears all entries, starting a new generation when the cache was non-empty.
    pub fn clear(&mut self) {
        if self.store.is_empty() {
            return;
        }

        log::debug!(
            "Clearing rolling cache with {} entries at generation {}",
            self.store.len(),
            self.generation
        );
        self.wipe();
    }

    fn admit<'a>(&mut self, value: &'a str, as_map_key: bool) -> Cow<'a, str> {
        if is_cacheable(value, as_map_key) && !self.store.contains_value(value) {
            self.encache(value);
        }

        Cow::Borrowed(value)
    }

    fn encache(&mut self, value: &str) {
        if self.is_cache_full() {
            self.wipe();
            log::debug!(
                "Rolling cache reached capacity {}, started generation {}",
                self.capacity,
                self.generation
            );
        }

        // Size is below capacity here, which never exceeds the key space
        let key = CacheKey::new(self.store.len());
        if self.store.insert(value, key) {
            log::trace!("Cached {value:?} as {key}");
        }
    }

    fn wipe(&mut self) {
        self.store.clear();
        self.generation += 1;
    }
}

impl Default for RollingCache {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for RollingCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "RollingCache(capacity={}, size={}, generation={})",
            self.capacity,
            self.store.len(),
            self.generation
        )
    }
}
