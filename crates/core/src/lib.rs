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

//! Core primitives for the Transit rolling cache.
//!
//! The `transit-core` crate holds the parts of the rolling cache protocol which are shared
//! by every implementation on the wire:
//!
//! - The base-94 key codec and the [`keys::CacheKey`] type.
//! - The cacheability rule and the contract constants.
//! - Correctness checks used for validation at construction boundaries.

#![deny(unsafe_code)]
#![deny(nonstandard_style)]
#![deny(missing_debug_implementations)]
#![deny(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod correctness;
pub mod keys;

pub use crate::keys::{CACHE_SIZE, CacheKey, decode_key, encode_key, is_cacheable};
