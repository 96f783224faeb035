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

//! Sender and receiver rolling caches driven by the same token sequence.

use rand::{Rng, SeedableRng, distr::Alphanumeric, rngs::StdRng, seq::IndexedRandom};
use rstest::{fixture, rstest};
use transit_common::cache::{RollingCache, RollingCacheConfig};
use transit_core::keys::{CACHE_SIZE, decode_key};

fn random_strings(rng: &mut StdRng, len: usize, count: usize) -> Vec<String> {
    (0..count)
        .map(|_| (&mut *rng).sample_iter(Alphanumeric).take(len).map(char::from).collect())
        .collect()
}

#[fixture]
fn rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

#[rstest]
fn test_decode_of_encode_is_identity(mut rng: StdRng) {
    let mut sender = RollingCache::new();
    let mut receiver = RollingCache::new();
    let names = random_strings(&mut rng, 10, 200);

    for _ in 0..10_000 {
        let name = names.choose(&mut rng).unwrap();
        let wire = sender.encode(name, true);
        assert_eq!(receiver.decode(&wire, true), name.as_str());
    }

    assert_eq!(sender.size(), 200);
    assert_eq!(receiver.size(), 200);
}

#[rstest]
fn test_size_capped_under_churn(mut rng: StdRng) {
    let mut sender = RollingCache::new();
    let mut receiver = RollingCache::new();
    let names = random_strings(&mut rng, 6, 20_000);

    for _ in 0..CACHE_SIZE * 5 {
        let name = names.choose(&mut rng).unwrap();
        let wire = sender.encode(name, true);
        assert_eq!(receiver.decode(&wire, true), name.as_str());
        assert!(sender.size() <= CACHE_SIZE);
        assert!(receiver.size() <= CACHE_SIZE);
    }

    assert!(sender.generation() > 0);
    assert_eq!(sender.generation(), receiver.generation());
    assert_eq!(sender.size(), receiver.size());
}

#[rstest]
fn test_short_strings_never_cached(mut rng: StdRng) {
    let mut cache = RollingCache::new();
    let names = random_strings(&mut rng, 3, 500);

    for _ in 0..2000 {
        let name = names.choose(&mut rng).unwrap();
        let as_map_key = rng.random_bool(0.5);
        assert_eq!(cache.encode(name, as_map_key), name.as_str());
        assert_eq!(cache.size(), 0);
    }
}

#[rstest]
fn test_mixed_tags_and_keys_stay_in_lockstep(mut rng: StdRng) {
    let config = RollingCacheConfig::new(64).unwrap();
    let mut sender = RollingCache::with_config(config);
    let mut receiver = RollingCache::with_config(config);

    let keys = random_strings(&mut rng, 5, 100);
    let tags: Vec<String> = random_strings(&mut rng, 4, 100)
        .into_iter()
        .enumerate()
        .map(|(i, s)| format!("{}{s}", ["~#", "~$", "~:"][i % 3]))
        .collect();
    let plain = random_strings(&mut rng, 8, 50);

    for _ in 0..5_000 {
        let (token, as_map_key) = match rng.random_range(0..3) {
            0 => (keys.choose(&mut rng).unwrap(), true),
            1 => (tags.choose(&mut rng).unwrap(), false),
            _ => (plain.choose(&mut rng).unwrap(), false),
        };

        let wire = sender.encode(token, as_map_key);
        assert_eq!(receiver.decode(&wire, as_map_key), token.as_str());
        assert_eq!(sender.size(), receiver.size());
        assert!(sender.store().is_bijective());
        assert!(receiver.store().is_bijective());
    }

    for (value, key) in sender.store().iter() {
        assert_eq!(receiver.get_key(value), Some(key));
        assert!(decode_key(&key).unwrap() < sender.size());
    }
}

#[rstest]
fn test_overflow_assigns_first_key_to_triggering_value() {
    let mut sender = RollingCache::new();
    let mut receiver = RollingCache::new();

    for i in 0..=CACHE_SIZE {
        let value = format!("value{i}");
        let wire = sender.encode(&value, true);
        assert_eq!(wire, value.as_str());
        assert_eq!(receiver.decode(&wire, true), value.as_str());
    }

    assert_eq!(sender.size(), 1);
    assert_eq!(receiver.size(), 1);

    let last = format!("value{CACHE_SIZE}");
    let key = sender.encode(&last, true);
    assert_eq!(key, "^!");
    assert_eq!(receiver.decode(&key, true), last.as_str());
}

#[rstest]
fn test_explicit_clear_on_both_sides() {
    let mut sender = RollingCache::new();
    let mut receiver = RollingCache::new();

    for value in ["~#list", "~#list", "~:kw1", "~:kw1"] {
        let wire = sender.encode(value, false);
        assert_eq!(receiver.decode(&wire, false), value);
    }

    sender.clear();
    receiver.clear();

    let wire = sender.encode("~:kw1", false);
    assert_eq!(wire, "~:kw1");
    assert_eq!(receiver.decode(&wire, false), "~:kw1");
    assert_eq!(receiver.get_value("^!"), Some("~:kw1"));
}
