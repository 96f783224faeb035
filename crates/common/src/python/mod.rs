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

//! Python bindings from [PyO3](https://pyo3.rs).

pub mod rolling;

use pyo3::prelude::*;

/// Loaded as `transit_pyo3.common`.
///
/// # Errors
///
/// Returns a `PyErr` if registering any module components fails.
#[pymodule]
pub fn common(_: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<crate::python::rolling::PyRollingCache>()?;
    m.add_function(wrap_pyfunction!(py_decode_key, m)?)?;
    m.add_function(wrap_pyfunction!(py_encode_key, m)?)?;
    Ok(())
}

/// Returns the cache key for `index`.
#[pyfunction(name = "encode_key")]
fn py_encode_key(index: usize) -> PyResult<String> {
    transit_core::keys::CacheKey::new_checked(index)
        .map(|key| key.to_string())
        .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))
}

/// Returns the cache index encoded by `key`.
#[pyfunction(name = "decode_key")]
fn py_decode_key(key: &str) -> PyResult<usize> {
    transit_core::keys::decode_key(key)
        .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))
}
