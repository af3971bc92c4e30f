// Copyright (c) Facebook, Inc. and its affiliates. All Rights Reserved
//! PyO3 bindings for the Maybe container
//!
//! The container holds an arbitrary Python object. Safe-tier access goes
//! through `Maybe::try_map`, so any Python exception raised while probing
//! the stored object ends the chain in EMPTY instead of propagating.

use pyo3::basic::CompareOp;
use pyo3::exceptions::PyTypeError;
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyString, PyTuple};

use ::maybe::{hash_of, Conversion, Maybe, Slot, EMPTY};

use crate::empty::{sentinel, PyEmpty};

/// Conversion targets accepted by `Maybe.as_maybe`
#[pyclass(name = "AsMaybe", eq, eq_int)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PyAsMaybe {
    #[pyo3(name = "STR")]
    Str,
    #[pyo3(name = "BYTES")]
    Bytes,
    #[pyo3(name = "INT")]
    Int,
    #[pyo3(name = "FLOAT")]
    Float,
    #[pyo3(name = "BOOL")]
    Bool,
    #[pyo3(name = "HASH")]
    Hash,
}

impl From<PyAsMaybe> for Conversion {
    fn from(kind: PyAsMaybe) -> Self {
        match kind {
            PyAsMaybe::Str => Conversion::String,
            PyAsMaybe::Bytes => Conversion::Bytes,
            PyAsMaybe::Int => Conversion::Int,
            PyAsMaybe::Float => Conversion::Float,
            PyAsMaybe::Bool => Conversion::Bool,
            PyAsMaybe::Hash => Conversion::Hash,
        }
    }
}

#[pymethods]
impl PyAsMaybe {
    fn __str__(&self) -> &'static str {
        Conversion::from(*self).name()
    }

    fn __repr__(&self) -> String {
        format!("AsMaybe.{}", Conversion::from(*self).name().to_uppercase())
    }
}

/// Python-facing optional container
#[pyclass(name = "Maybe", frozen)]
pub struct PyMaybe {
    inner: Maybe<Py<PyAny>>,
}

impl PyMaybe {
    fn nothing() -> Self {
        PyMaybe {
            inner: Maybe::nothing(),
        }
    }

    /// Wrap a Python object; the EMPTY sentinel yields an empty container
    fn from_bound(value: &Bound<'_, PyAny>) -> Self {
        if value.is_instance_of::<PyEmpty>() {
            return Self::nothing();
        }
        PyMaybe {
            inner: Maybe::new(value.clone().unbind()),
        }
    }

    fn from_maybe(py: Python<'_>, result: Maybe<Py<PyAny>>) -> Self {
        match result.into_option() {
            Some(v) => Self::from_bound(v.bind(py)),
            None => Self::nothing(),
        }
    }

    /// The raw slot as a Python object, EMPTY included
    fn raw(&self, py: Python<'_>) -> PyResult<Py<PyAny>> {
        match self.inner.unwrap_or_sentinel() {
            Slot::Filled(v) => Ok(v.clone_ref(py)),
            Slot::Empty(_) => sentinel(py),
        }
    }

    fn clone_ref(&self, py: Python<'_>) -> Self {
        PyMaybe {
            inner: match self.inner.as_option() {
                Some(v) => Maybe::new(v.clone_ref(py)),
                None => Maybe::nothing(),
            },
        }
    }

    /// Strict conversion through a builtin; EMPTY is rejected
    fn strict<'py>(&self, py: Python<'py>, builtin: &str) -> PyResult<Bound<'py, PyAny>> {
        match self.inner.as_option() {
            Some(v) => py.import("builtins")?.getattr(builtin)?.call1((v.bind(py),)),
            None => Err(PyTypeError::new_err(format!(
                "cannot convert {} to {}",
                EMPTY, builtin
            ))),
        }
    }
}

/// Unwrap a comparison operand: containers compare by their slot
fn operand<'py>(py: Python<'py>, other: &Bound<'py, PyAny>) -> PyResult<Option<Bound<'py, PyAny>>> {
    if let Ok(m) = other.cast::<PyMaybe>() {
        return Ok(m.get().inner.as_option().map(|v| v.bind(py).clone()));
    }
    if other.is_instance_of::<PyEmpty>() {
        return Ok(None);
    }
    Ok(Some(other.clone()))
}

#[pymethods]
impl PyMaybe {
    #[new]
    #[pyo3(signature = (value=None))]
    fn new(py: Python<'_>, value: Option<&Bound<'_, PyAny>>) -> Self {
        match value {
            Some(v) => Self::from_bound(v),
            None => Self::from_bound(py.None().bind(py)),
        }
    }

    /// The stored value, or EMPTY
    fn just(&self, py: Python<'_>) -> PyResult<Py<PyAny>> {
        self.raw(py)
    }

    /// Alias of `just`
    fn get_maybe(&self, py: Python<'_>) -> PyResult<Py<PyAny>> {
        self.raw(py)
    }

    #[pyo3(signature = (fallback=None))]
    fn otherwise(&self, py: Python<'_>, fallback: Option<Py<PyAny>>) -> Py<PyAny> {
        match self.inner.as_option() {
            Some(v) => v.clone_ref(py),
            None => fallback.unwrap_or_else(|| py.None()),
        }
    }

    fn is_something(&self) -> bool {
        self.inner.is_something()
    }

    fn is_nothing(&self) -> bool {
        self.inner.is_nothing()
    }

    fn as_maybe(&self, py: Python<'_>, kind: PyRef<'_, PyAsMaybe>) -> PyResult<PyMaybe> {
        let builtin = Conversion::from(*kind).name();
        let func = py.import("builtins")?.getattr(builtin)?;
        let result = self
            .inner
            .try_map(|v| func.call1((v.bind(py),)).map(Bound::unbind));
        Ok(Self::from_maybe(py, result))
    }

    fn __getattr__(&self, py: Python<'_>, name: &str) -> PyMaybe {
        let result = self.inner.try_map(|v| v.bind(py).getattr(name).map(Bound::unbind));
        Self::from_maybe(py, result)
    }

    fn __getitem__(slf: &Bound<'_, Self>, key: &Bound<'_, PyAny>) -> PyResult<Py<PyAny>> {
        let py = slf.py();
        let this = slf.get();
        let Some(v) = this.inner.as_option() else {
            return Ok(Py::new(py, Self::nothing())?.into_any());
        };
        match v.bind(py).get_item(key) {
            Ok(item) => Ok(Py::new(py, Self::from_bound(&item))?.into_any()),
            Err(e) => {
                log::trace!("index lookup failed, trying attribute: {}", e);
                let Ok(name) = key.cast::<PyString>() else {
                    return Ok(Py::new(py, Self::nothing())?.into_any());
                };
                match slf.as_any().getattr(name) {
                    Ok(found) if found.is_instance_of::<PyMaybe>() => Ok(found.unbind()),
                    Ok(found) => Ok(Py::new(py, Self::from_bound(&found))?.into_any()),
                    Err(_) => Ok(Py::new(py, Self::nothing())?.into_any()),
                }
            }
        }
    }

    #[pyo3(signature = (*args, **kwargs))]
    fn __call__(
        &self,
        py: Python<'_>,
        args: &Bound<'_, PyTuple>,
        kwargs: Option<&Bound<'_, PyDict>>,
    ) -> PyMaybe {
        let result = self
            .inner
            .try_map(|v| v.bind(py).call(args.clone(), kwargs).map(Bound::unbind));
        Self::from_maybe(py, result)
    }

    fn __richcmp__(&self, py: Python<'_>, other: &Bound<'_, PyAny>, op: CompareOp) -> PyResult<bool> {
        let lhs = self.inner.as_option().map(|v| v.bind(py).clone());
        let rhs = operand(py, other)?;
        match (lhs, rhs) {
            (Some(l), Some(r)) => l.rich_compare(r, op)?.is_truthy(),
            (l, r) => match op {
                CompareOp::Eq => Ok(l.is_none() && r.is_none()),
                CompareOp::Ne => Ok(!(l.is_none() && r.is_none())),
                _ => Err(PyTypeError::new_err(format!(
                    "ordering is not supported between a value and {}",
                    EMPTY
                ))),
            },
        }
    }

    fn __hash__(&self, py: Python<'_>) -> PyResult<isize> {
        match self.inner.as_option() {
            Some(v) => v.bind(py).hash(),
            None => Ok(hash_of(&EMPTY) as isize),
        }
    }

    fn __str__(&self, py: Python<'_>) -> PyResult<String> {
        match self.inner.as_option() {
            Some(v) => Ok(v.bind(py).str()?.to_string()),
            None => Ok(EMPTY.to_string()),
        }
    }

    fn __repr__(&self, py: Python<'_>) -> PyResult<String> {
        match self.inner.as_option() {
            Some(v) => Ok(format!("Maybe({})", v.bind(py).repr()?)),
            None => Ok(format!("Maybe({})", EMPTY)),
        }
    }

    /// An empty container formats as `EMPTY` whatever the format spec,
    /// rather than raising for a non-empty spec.
    fn __format__(&self, py: Python<'_>, spec: &str) -> PyResult<String> {
        match self.inner.as_option() {
            Some(v) => Ok(v.bind(py).call_method1("__format__", (spec,))?.extract()?),
            None => Ok(format!("{}", EMPTY)),
        }
    }

    fn __bytes__<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyAny>> {
        self.strict(py, "bytes")
    }

    fn __int__<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyAny>> {
        self.strict(py, "int")
    }

    fn __float__(&self, py: Python<'_>) -> PyResult<f64> {
        self.strict(py, "float")?.extract()
    }

    /// Truthiness of the stored value. Unlike a plain sentinel object, an
    /// empty container has no truth value and raises `TypeError`.
    fn __bool__(&self, py: Python<'_>) -> PyResult<bool> {
        self.strict(py, "bool")?.is_truthy()
    }

    fn __copy__(&self, py: Python<'_>) -> PyMaybe {
        self.clone_ref(py)
    }
}

/// Register the container classes
pub fn register(m: &Bound<PyModule>) -> PyResult<()> {
    m.add_class::<PyMaybe>()?;
    m.add_class::<PyAsMaybe>()?;
    Ok(())
}
