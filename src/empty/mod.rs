// Copyright (c) Facebook, Inc. and its affiliates. All Rights Reserved
//! PyO3 bindings for the EMPTY sentinel

use pyo3::prelude::*;
use pyo3::sync::PyOnceLock;

use ::maybe::{hash_of, EMPTY};

static SENTINEL: PyOnceLock<Py<PyEmpty>> = PyOnceLock::new();

/// Python-facing sentinel class
///
/// Instances compare equal to each other and to nothing else; ordering
/// comparisons are left undefined so Python raises `TypeError`.
#[pyclass(name = "Empty", frozen)]
#[derive(Clone, Copy, Debug)]
pub struct PyEmpty;

/// The module's one `EMPTY` instance, so `is EMPTY` checks hold
pub fn sentinel(py: Python<'_>) -> PyResult<Py<PyAny>> {
    let instance = SENTINEL.get_or_try_init(py, || Py::new(py, PyEmpty))?;
    Ok(instance.clone_ref(py).into_any())
}

#[pymethods]
impl PyEmpty {
    #[new]
    fn new() -> Self {
        PyEmpty
    }

    fn __eq__(&self, other: &Bound<'_, PyAny>) -> bool {
        other.is_instance_of::<PyEmpty>()
    }

    fn __repr__(&self) -> String {
        EMPTY.to_string()
    }

    fn __hash__(&self) -> isize {
        hash_of(&EMPTY) as isize
    }
}

/// Register the sentinel class and the shared `EMPTY` instance
pub fn register(m: &Bound<PyModule>) -> PyResult<()> {
    m.add_class::<PyEmpty>()?;
    m.add("EMPTY", sentinel(m.py())?)?;
    Ok(())
}
