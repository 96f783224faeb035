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

//! Bidirectional value/key store backing a single rolling cache generation.

use ahash::AHashMap;
use transit_core::keys::CacheKey;

/// A bijective store of interned values and their assigned keys with O(1) lookups
/// in both directions.
///
/// Uses two `AHashMap`s, `forward` (value to key) and `reverse` (key to value), kept
/// in sync on every insert and clear.
///
/// # Examples
///
/// ```
/// use transit_common::cache::store::CacheStore;
/// use transit_core::keys::encode_key;
///
/// let mut store = CacheStore::new();
/// assert!(store.insert("abcd", encode_key(0)));
/// assert_eq!(store.get_key("abcd"), Some(encode_key(0)));
/// assert_eq!(store.get_value("^!"), Some("abcd"));
/// assert!(store.contains_key("^!"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CacheStore {
    forward: AHashMap<String, CacheKey>,
    reverse: AHashMap<CacheKey, String>,
}

impl CacheStore {
    /// Creates a new empty [`CacheStore`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new empty [`CacheStore`] with room for `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            forward: AHashMap::with_capacity(capacity),
            reverse: AHashMap::with_capacity(capacity),
        }
    }

    /// Returns the number of entries in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.reverse.len()
    }

    /// Returns whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reverse.is_empty()
    }

    /// Returns the key assigned to `value`, if any.
    #[must_use]
    pub fn get_key(&self, value: &str) -> Option<CacheKey> {
        self.forward.get(value).copied()
    }

    /// Returns the value stored under `key`, if any.
    #[must_use]
    pub fn get_value(&self, key: &str) -> Option<&str> {
        self.reverse.get(key).map(String::as_str)
    }

    /// Returns whether `key` is currently assigned to a value.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.reverse.contains_key(key)
    }

    /// Returns whether `value` currently has a key assigned.
    #[must_use]
    pub fn contains_value(&self, value: &str) -> bool {
        self.forward.contains_key(value)
    }

    /// Inserts the `(value, key)` pair.
    ///
    /// Returns `false` and leaves the store unchanged if either the value or the
    /// key is already present, so both maps remain exact inverses.
    pub fn insert(&mut self, value: &str, key: CacheKey) -> bool {
        if self.forward.contains_key(value) || self.reverse.contains_key(&key) {
            return false;
        }

        self.forward.insert(value.to_owned(), key);
        self.reverse.insert(key, value.to_owned());
        true
    }

    /// Returns an iterator over the `(value, key)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, CacheKey)> {
        self.forward.iter().map(|(value, key)| (value.as_str(), *key))
    }

    /// Clears all entries from the store.
    pub fn clear(&mut self) {
        self.forward.clear();
        self.reverse.clear();
    }

    /// Returns whether `forward` and `reverse` are exact inverses of each other.
    #[must_use]
    pub fn is_bijective(&self) -> bool {
        self.forward.len() == self.reverse.len()
            && self
                .forward
                .iter()
                .all(|(value, key)| self.reverse.get(key) == Some(value))
    }
}
