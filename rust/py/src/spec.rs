// rust/py/src/spec.rs
#![forbid(unsafe_code)]

use pyo3::prelude::*;

use karel_engine::RandomWorldSpec;

/// Python-facing random world specification.
///
/// Wraps the engine's `RandomWorldSpec`; unspecified fields keep the engine defaults.
#[pyclass(name = "RandomWorldSpec")]
#[derive(Clone)]
pub struct PyRandomWorldSpec {
    pub(crate) inner: RandomWorldSpec,
}

impl PyRandomWorldSpec {
    pub(crate) fn into_inner(self) -> RandomWorldSpec {
        self.inner
    }
}

#[pymethods]
impl PyRandomWorldSpec {
    /// RandomWorldSpec(height=8, width=8, wall_ratio=0.1, marker_ratio=0.1)
    #[new]
    #[pyo3(signature = (
        height=RandomWorldSpec::DEFAULT_SIDE,
        width=RandomWorldSpec::DEFAULT_SIDE,
        wall_ratio=RandomWorldSpec::DEFAULT_WALL_RATIO,
        marker_ratio=RandomWorldSpec::DEFAULT_MARKER_RATIO
    ))]
    fn new(height: usize, width: usize, wall_ratio: f64, marker_ratio: f64) -> Self {
        Self {
            inner: RandomWorldSpec {
                height,
                width,
                wall_ratio,
                marker_ratio,
            },
        }
    }

    #[getter]
    fn height(&self) -> usize {
        self.inner.height
    }
    #[getter]
    fn width(&self) -> usize {
        self.inner.width
    }
    #[getter]
    fn wall_ratio(&self) -> f64 {
        self.inner.wall_ratio
    }
    #[getter]
    fn marker_ratio(&self) -> f64 {
        self.inner.marker_ratio
    }

    fn __repr__(&self) -> String {
        format!(
            "RandomWorldSpec(height={}, width={}, wall_ratio={}, marker_ratio={})",
            self.inner.height, self.inner.width, self.inner.wall_ratio, self.inner.marker_ratio
        )
    }
}
