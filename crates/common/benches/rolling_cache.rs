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

use std::hint::black_box;

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use transit_common::cache::RollingCache;
use transit_core::keys::{CACHE_SIZE, decode_key, encode_key};

const TAG: &str = "~#instrument";

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("RollingCache::encode");

    group.bench_function("hit", |b| {
        let mut cache = RollingCache::new();
        cache.encode(TAG, false);
        b.iter(|| black_box(cache.encode(black_box(TAG), false).len()));
    });

    group.bench_function("non_cacheable", |b| {
        let mut cache = RollingCache::new();
        b.iter(|| black_box(cache.encode(black_box("abc"), true).len()));
    });

    let values: Vec<String> = (0..=CACHE_SIZE).map(|i| format!("value{i}")).collect();
    group.bench_function("fill_and_reset", |b| {
        b.iter_batched(
            RollingCache::new,
            |mut cache| {
                for value in &values {
                    black_box(cache.encode(value, true).len());
                }
                cache
            },
            BatchSize::LargeInput,
        );
    });

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("RollingCache::decode");

    group.bench_function("hit", |b| {
        let mut cache = RollingCache::new();
        cache.decode(TAG, false);
        b.iter(|| black_box(cache.decode(black_box("^!"), false).len()));
    });

    group.bench_function("unknown_key", |b| {
        let mut cache = RollingCache::new();
        b.iter(|| black_box(cache.decode(black_box("^~~"), false).len()));
    });

    group.finish();
}

fn bench_key_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("keys");

    group.bench_function("encode_key", |b| {
        b.iter(|| black_box(encode_key(black_box(4242))));
    });

    group.bench_function("decode_key", |b| {
        b.iter(|| black_box(decode_key(black_box("^F/")).ok()));
    });

    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode, bench_key_codec);
criterion_main!(benches);
