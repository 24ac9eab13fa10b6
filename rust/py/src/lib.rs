// rust/py/src/lib.rs
#![forbid(unsafe_code)]
#![allow(unsafe_op_in_unsafe_fn)] // pyo3 macro-generated glue triggers this on Rust 2024

mod spec;
mod util;
mod world;

use pyo3::prelude::*;

use crate::spec::PyRandomWorldSpec;
use crate::world::KarelWorld;

#[pymodule]
fn karel_rl_engine(_py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<KarelWorld>()?;
    m.add_class::<PyRandomWorldSpec>()?;
    m.add("NUM_CHANNELS", karel_engine::NUM_CHANNELS)?;
    m.add("MAX_MARKERS", karel_engine::MAX_MARKERS)?;
    Ok(())
}
