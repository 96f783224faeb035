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

//! Rolling cache configuration types and parsing.
//!
//! # Spec String Format
//!
//! The `TRANSIT_CACHE` environment variable uses a semicolon-separated format:
//!
//! ```text
//! capacity=1024
//! ```
//!
//! | Key        | Type    | Description                                          |
//! |------------|---------|------------------------------------------------------|
//! | `capacity` | Integer | Entries per generation, in `1..=8836` (default 8836). |
//!
//! A sender and a receiver sharing a stream must use the same capacity.

use std::env;

use serde::{Deserialize, Deserializer, Serialize};
use transit_core::{correctness::check_in_range_inclusive_usize, keys::CACHE_SIZE};

/// The environment variable read by [`RollingCacheConfig::from_env`].
pub const TRANSIT_CACHE_ENV: &str = "TRANSIT_CACHE";

/// Configuration for a [`RollingCache`](super::rolling::RollingCache).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RollingCacheConfig {
    /// The number of entries after which the whole generation is wiped.
    capacity: usize,
}

impl Default for RollingCacheConfig {
    /// Creates a new default [`RollingCacheConfig`] using the wire contract [`CACHE_SIZE`].
    fn default() -> Self {
        Self {
            capacity: CACHE_SIZE,
        }
    }
}

impl RollingCacheConfig {
    /// Creates a new [`RollingCacheConfig`] instance.
    ///
    /// # Errors
    ///
    /// Returns an error if `capacity` is zero or exceeds [`CACHE_SIZE`].
    pub fn new(capacity: usize) -> anyhow::Result<Self> {
        check_in_range_inclusive_usize(capacity, 1, CACHE_SIZE, stringify!(capacity))?;
        Ok(Self { capacity })
    }

    /// Returns the configured capacity.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Parses a configuration from a spec string.
    ///
    /// Keys are case-insensitive and unknown keys are rejected. An empty spec
    /// yields the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the spec string contains invalid syntax or values.
    pub fn from_spec(spec: &str) -> anyhow::Result<Self> {
        let mut config = Self::default();

        for kv in spec.split(';') {
            let kv = kv.trim();
            if kv.is_empty() {
                continue;
            }

            let Some((k, v)) = kv.split_once('=') else {
                anyhow::bail!("Invalid spec pair: {kv}");
            };

            match k.trim().to_lowercase().as_str() {
                "capacity" => {
                    let capacity = v
                        .trim()
                        .parse::<usize>()
                        .map_err(|e| anyhow::anyhow!("Invalid capacity '{}': {e}", v.trim()))?;
                    config = Self::new(capacity)?;
                }
                _ => anyhow::bail!("Invalid spec key: {}", k.trim()),
            }
        }

        Ok(config)
    }

    /// Parses configuration from the `TRANSIT_CACHE` environment variable.
    ///
    /// # Errors
    ///
    /// Returns an error if the variable is unset or contains invalid syntax.
    pub fn from_env() -> anyhow::Result<Self> {
        let spec = env::var(TRANSIT_CACHE_ENV)?;
        Self::from_spec(&spec)
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRollingCacheConfig {
    #[serde(default = "default_capacity")]
    capacity: usize,
}

const fn default_capacity() -> usize {
    CACHE_SIZE
}

impl<'de> Deserialize<'de> for RollingCacheConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawRollingCacheConfig::deserialize(deserializer)?;
        Self::new(raw.capacity).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn test_default_config() {
        let config = RollingCacheConfig::default();
        assert_eq!(config.capacity(), CACHE_SIZE);
    }

    #[rstest]
    #[case(1)]
    #[case(94)]
    #[case(CACHE_SIZE)]
    fn test_new_valid(#[case] capacity: usize) {
        assert_eq!(RollingCacheConfig::new(capacity).unwrap().capacity(), capacity);
    }

    #[rstest]
    #[case(0)]
    #[case(CACHE_SIZE + 1)]
    fn test_new_invalid(#[case] capacity: usize) {
        assert!(RollingCacheConfig::new(capacity).is_err());
    }

    #[rstest]
    fn test_from_spec_capacity() {
        let config = RollingCacheConfig::from_spec("capacity=128").unwrap();
        assert_eq!(config.capacity(), 128);
    }

    #[rstest]
    fn test_from_spec_case_insensitive_keys_with_whitespace() {
        let config = RollingCacheConfig::from_spec("  CAPACITY = 42 ;").unwrap();
        assert_eq!(config.capacity(), 42);
    }

    #[rstest]
    fn test_from_spec_empty_string() {
        let config = RollingCacheConfig::from_spec("").unwrap();
        assert_eq!(config, RollingCacheConfig::default());
    }

    #[rstest]
    #[case("capacity")]
    #[case("capacity=abc")]
    #[case("capacity=0")]
    #[case("capacity=8837")]
    #[case("size=10")]
    fn test_from_spec_invalid(#[case] spec: &str) {
        assert!(RollingCacheConfig::from_spec(spec).is_err());
    }

    #[rstest]
    fn test_from_spec_unknown_key_message() {
        let err = RollingCacheConfig::from_spec("size=10").unwrap_err();
        assert_eq!(err.to_string(), "Invalid spec key: size");
    }

    #[rstest]
    fn test_serde_roundtrip() {
        let config = RollingCacheConfig::new(500).unwrap();
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"capacity":500}"#);

        let deserialized: RollingCacheConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, config);
    }

    #[rstest]
    fn test_deserialize_defaults_missing_capacity() {
        let config: RollingCacheConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.capacity(), CACHE_SIZE);
    }

    #[rstest]
    #[case(r#"{"capacity":0}"#)]
    #[case(r#"{"capacity":9000}"#)]
    #[case(r#"{"capacity":10,"extra":true}"#)]
    fn test_deserialize_invalid(#[case] json: &str) {
        let result: Result<RollingCacheConfig, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
