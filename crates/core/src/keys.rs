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

//! The rolling cache key codec and admission rule.
//!
//! A cache key is the `^` prefix followed by one or two base-94 digits, each digit
//! encoded as a printable ASCII character in the range `[33, 126]`:
//!
//! | Index range     | Key length | Example           |
//! |-----------------|------------|-------------------|
//! | `0..94`         | 2          | `0` -> `^!`       |
//! | `94..8836`      | 3          | `94` -> `^"!`     |
//!
//! The constants in this module are part of the wire contract. Independent
//! implementations must agree on every one of them to share a stream.

// Required for unchecked UTF-8 conversion of the inline ASCII buffer
#![allow(unsafe_code)]

use std::{
    borrow::Borrow,
    cmp::Ordering,
    fmt::{Debug, Display},
    hash::{Hash, Hasher},
    ops::Deref,
    str::FromStr,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::correctness::{FAILED, check_in_range_inclusive_usize, check_predicate_true};

/// The code of the first printable (non-space) ASCII character, `!`.
pub const FIRST_PRINTABLE_CODE: u8 = 33;

/// The code of the last printable ASCII character, `~`.
pub const LAST_PRINTABLE_CODE: u8 = 126;

/// The number of printable characters available for a single key digit.
pub const KEY_BASE: usize = 94;

/// The maximum number of entries in a single cache generation.
pub const CACHE_SIZE: usize = KEY_BASE * KEY_BASE;

/// The minimum length in characters of a cacheable value.
pub const MIN_CACHEABLE_LENGTH: usize = 4;

/// Prefixes marking an extension tag which is cacheable outside of map key position.
pub const RESERVED_SIGILS: [&str; 3] = ["~#", "~$", "~:"];

/// The leading character of every cache key.
pub const KEY_PREFIX: char = '^';

const KEY_PREFIX_BYTE: u8 = b'^';

const KEY_MAX_LEN: usize = 3;

/// Returns whether `value` is eligible for caching.
///
/// A value must be at least [`MIN_CACHEABLE_LENGTH`] characters long. Map keys of that
/// length are always cacheable; any other value must start with one of the
/// [`RESERVED_SIGILS`].
///
/// # Examples
///
/// ```
/// use transit_core::keys::is_cacheable;
///
/// assert!(is_cacheable("~#foo", false));
/// assert!(is_cacheable("name", true));
/// assert!(!is_cacheable("name", false));
/// assert!(!is_cacheable("ab", true));
/// ```
#[must_use]
pub fn is_cacheable(value: &str, as_map_key: bool) -> bool {
    // Counted in chars so multibyte values agree with peers that measure characters
    let long_enough = value.chars().nth(MIN_CACHEABLE_LENGTH - 1).is_some();
    long_enough && (as_map_key || RESERVED_SIGILS.iter().any(|s| value.starts_with(s)))
}

/// Encodes the cache `index` as a key.
///
/// # Panics
///
/// Panics if `index` is not less than [`CACHE_SIZE`].
#[must_use]
pub fn encode_key(index: usize) -> CacheKey {
    CacheKey::new(index)
}

/// Decodes a key string back into the cache index it was encoded from.
///
/// # Errors
///
/// Returns an error if `key`:
/// - Does not start with [`KEY_PREFIX`].
/// - Does not carry exactly one or two digits.
/// - Contains a digit outside the printable range `[33, 126]`.
/// - Is a three character key with a zero high digit (never produced by [`encode_key`]).
pub fn decode_key(key: &str) -> anyhow::Result<usize> {
    let Some((&KEY_PREFIX_BYTE, digits)) = key.as_bytes().split_first() else {
        anyhow::bail!("invalid cache key, missing '{KEY_PREFIX}' prefix, was '{key}'");
    };

    match digits {
        [lo] => decode_digit(*lo, key),
        [hi, lo] => {
            let hi = decode_digit(*hi, key)?;
            check_predicate_true(
                hi > 0,
                &format!("invalid cache key, non-canonical zero high digit, was '{key}'"),
            )?;
            Ok(hi * KEY_BASE + decode_digit(*lo, key)?)
        }
        _ => anyhow::bail!(
            "invalid cache key, expected 2 or 3 characters, was {} in '{key}'",
            key.len()
        ),
    }
}

fn decode_digit(byte: u8, key: &str) -> anyhow::Result<usize> {
    if !(FIRST_PRINTABLE_CODE..=LAST_PRINTABLE_CODE).contains(&byte) {
        anyhow::bail!("invalid cache key, digit {byte:#04x} not printable, was '{key}'");
    }
    Ok(usize::from(byte - FIRST_PRINTABLE_CODE))
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "Digit is always less than KEY_BASE"
)]
const fn encode_digit(digit: usize) -> u8 {
    FIRST_PRINTABLE_CODE + digit as u8
}

/// A rolling cache key held inline as at most three ASCII bytes.
///
/// Keys are `Copy` and compare, hash and borrow as their string form, so a map
/// keyed by [`CacheKey`] can be queried with a plain `&str`.
#[derive(Clone, Copy)]
pub struct CacheKey {
    value: [u8; KEY_MAX_LEN],
    len: u8,
}

impl CacheKey {
    /// Creates the key for the given cache `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not less than [`CACHE_SIZE`].
    #[must_use]
    pub fn new(index: usize) -> Self {
        Self::new_checked(index).expect(FAILED)
    }

    /// Creates the key for the given cache `index` with validation.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is not less than [`CACHE_SIZE`].
    pub fn new_checked(index: usize) -> anyhow::Result<Self> {
        check_in_range_inclusive_usize(index, 0, CACHE_SIZE - 1, stringify!(index))?;

        let hi = index / KEY_BASE;
        let lo = index % KEY_BASE;

        let mut value = [KEY_PREFIX_BYTE, 0, 0];
        let len = if hi == 0 {
            value[1] = encode_digit(lo);
            2
        } else {
            value[1] = encode_digit(hi);
            value[2] = encode_digit(lo);
            3
        };

        Ok(Self { value, len })
    }

    /// Parses a key from its string form.
    ///
    /// # Errors
    ///
    /// Returns an error if `key` is not a well-formed cache key (see [`decode_key`]).
    pub fn parse(key: &str) -> anyhow::Result<Self> {
        Self::new_checked(decode_key(key)?)
    }

    /// Returns the cache index this key encodes.
    #[must_use]
    pub fn index(&self) -> usize {
        let digit = |b: u8| usize::from(b - FIRST_PRINTABLE_CODE);
        match self.len {
            2 => digit(self.value[1]),
            _ => digit(self.value[1]) * KEY_BASE + digit(self.value[2]),
        }
    }

    /// Returns the key as a `&str`.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        debug_assert!(
            self.value[..self.len as usize].is_ascii(),
            "CacheKey holds non-ASCII bytes"
        );
        // SAFETY: Only the ASCII prefix and printable ASCII digits are ever written
        unsafe { std::str::from_utf8_unchecked(&self.value[..self.len as usize]) }
    }

    /// Returns the length of the key in bytes, either 2 or 3.
    #[inline]
    #[must_use]
    #[allow(clippy::len_without_is_empty)]
    pub const fn len(&self) -> usize {
        self.len as usize
    }
}

impl PartialEq for CacheKey {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for CacheKey {}

impl Hash for CacheKey {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Must match `str` hashing for `Borrow<str>` lookups
        self.as_str().hash(state);
    }
}

impl Ord for CacheKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.index().cmp(&other.index())
    }
}

impl PartialOrd for CacheKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Debug for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.as_str())
    }
}

impl Serialize for CacheKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CacheKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <&str>::deserialize(deserializer)?;
        Self::parse(s).map_err(serde::de::Error::custom)
    }
}

impl FromStr for CacheKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Borrow<str> for CacheKey {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl Deref for CacheKey {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl PartialEq<&str> for CacheKey {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl PartialEq<str> for CacheKey {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}
