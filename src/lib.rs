// Copyright (c) Facebook, Inc. and its affiliates. All Rights Reserved
//! maybe - Python bindings for the optional-value container
//!
//! This crate exposes `Maybe`, `Empty`, `EMPTY` and `AsMaybe` to Python.

use pyo3::prelude::*;

mod container;
mod empty;

#[pymodule]
fn _maybe(_py: Python, m: &Bound<PyModule>) -> PyResult<()> {
    // Sentinel
    empty::register(m)?;

    // Container and conversion kinds
    container::register(m)?;

    Ok(())
}
