use pyo3::{prelude::*, wrap_pymodule};

#[pymodule]
fn _transit_pyo3(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_wrapped(wrap_pymodule!(transit_common::python::common))?;
    Ok(())
}
