// rust/py/src/util.rs
#![forbid(unsafe_code)]

use pyo3::exceptions::{PyIOError, PyValueError};
use pyo3::prelude::*;

use karel_engine::{ConstructionError, MarkerBag, UnknownPrimitive};

/// Unreadable files surface as `IOError`; everything else the caller passed is a `ValueError`.
pub(crate) fn construction_err(e: ConstructionError) -> PyErr {
    match e {
        ConstructionError::Io { .. } => PyIOError::new_err(e.to_string()),
        other => PyValueError::new_err(other.to_string()),
    }
}

pub(crate) fn primitive_err(e: UnknownPrimitive) -> PyErr {
    PyValueError::new_err(e.to_string())
}

/// `None` keeps the default unbounded bag; `Some(n)` opts into a finite one.
pub(crate) fn bag_from_py(marker_bag: Option<u32>) -> MarkerBag {
    marker_bag.map_or(MarkerBag::Unbounded, MarkerBag::Bounded)
}

pub(crate) fn bag_to_py(bag: MarkerBag) -> Option<u32> {
    match bag {
        MarkerBag::Unbounded => None,
        MarkerBag::Bounded(n) => Some(n),
    }
}
