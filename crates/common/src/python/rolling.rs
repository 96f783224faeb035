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

//! Python bindings for the rolling cache.

use pyo3::prelude::*;

use crate::cache::{RollingCache, RollingCacheConfig};

#[pyo3::pyclass(name = "RollingCache", module = "transit.transit_pyo3.common")]
#[derive(Debug)]
pub struct PyRollingCache {
    inner: RollingCache,
}

#[pymethods]
impl PyRollingCache {
    #[new]
    #[pyo3(signature = (capacity=None))]
    fn py_new(capacity: Option<usize>) -> PyResult<Self> {
        let config = match capacity {
            Some(capacity) => RollingCacheConfig::new(capacity)
                .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))?,
            None => RollingCacheConfig::default(),
        };

        Ok(Self {
            inner: RollingCache::with_config(config),
        })
    }

    fn __repr__(&self) -> String {
        self.inner.to_string()
    }

    #[getter]
    fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    #[getter]
    fn generation(&self) -> u64 {
        self.inner.generation()
    }

    fn __len__(&self) -> usize {
        self.inner.size()
    }

    fn __contains__(&self, key: &str) -> bool {
        self.inner.is_key(key)
    }

    fn size(&self) -> usize {
        self.inner.size()
    }

    fn is_key(&self, value: &str) -> bool {
        self.inner.is_key(value)
    }

    fn is_cache_full(&self) -> bool {
        self.inner.is_cache_full()
    }

    #[staticmethod]
    #[pyo3(signature = (value, as_map_key=false))]
    fn is_cacheable(value: &str, as_map_key: bool) -> bool {
        RollingCache::is_cacheable(value, as_map_key)
    }

    #[pyo3(signature = (value, as_map_key=false))]
    fn encode(&mut self, value: &str, as_map_key: bool) -> String {
        self.inner.encode(value, as_map_key).into_owned()
    }

    #[pyo3(signature = (value, as_map_key=false))]
    fn decode(&mut self, value: &str, as_map_key: bool) -> String {
        self.inner.decode(value, as_map_key).into_owned()
    }

    fn clear(&mut self) {
        self.inner.clear();
    }
}
