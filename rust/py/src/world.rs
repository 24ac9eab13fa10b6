// rust/py/src/world.rs
#![forbid(unsafe_code)]

use std::path::PathBuf;

use numpy::{PyArray3, PyReadonlyArray3};
use pyo3::prelude::*;
use pyo3::types::PyDict;

use karel_engine::{
    ActionOutcome, Primitive, RandomWorldSpec, RenderOptions, World, WorldOptions,
};

use crate::spec::PyRandomWorldSpec;
use crate::util::{bag_from_py, bag_to_py, construction_err, primitive_err};

fn options(trace: bool, marker_bag: Option<u32>) -> WorldOptions {
    WorldOptions {
        trace,
        marker_bag: bag_from_py(marker_bag),
    }
}

/// One grid world driven by the Python dataset generator.
///
/// Every primitive is exposed under its snake_case name and its camelCase alias.
#[pyclass]
#[derive(Clone)]
pub struct KarelWorld {
    pub(crate) w: World,
}

#[pymethods]
impl KarelWorld {
    // ---------------------------------------------------------------------
    // Construction
    // ---------------------------------------------------------------------

    /// KarelWorld.random(seed, height=8, width=8, wall_ratio=0.1, marker_ratio=0.1,
    ///                   trace=False, marker_bag=None)
    ///
    /// `seed` has no default: the Python side owns episode seeding and passes it in.
    #[staticmethod]
    #[pyo3(signature = (
        seed,
        height=RandomWorldSpec::DEFAULT_SIDE,
        width=RandomWorldSpec::DEFAULT_SIDE,
        wall_ratio=RandomWorldSpec::DEFAULT_WALL_RATIO,
        marker_ratio=RandomWorldSpec::DEFAULT_MARKER_RATIO,
        trace=false,
        marker_bag=None
    ))]
    fn random(
        seed: u64,
        height: usize,
        width: usize,
        wall_ratio: f64,
        marker_ratio: f64,
        trace: bool,
        marker_bag: Option<u32>,
    ) -> PyResult<Self> {
        let spec = RandomWorldSpec {
            height,
            width,
            wall_ratio,
            marker_ratio,
        };
        let w = World::random_seeded(&spec, seed, options(trace, marker_bag))
            .map_err(construction_err)?;
        Ok(Self { w })
    }

    /// KarelWorld.from_spec(spec, seed, trace=False, marker_bag=None)
    #[staticmethod]
    #[pyo3(signature = (spec, seed, trace=false, marker_bag=None))]
    fn from_spec(
        spec: PyRandomWorldSpec,
        seed: u64,
        trace: bool,
        marker_bag: Option<u32>,
    ) -> PyResult<Self> {
        let w = World::random_seeded(&spec.into_inner(), seed, options(trace, marker_bag))
            .map_err(construction_err)?;
        Ok(Self { w })
    }

    /// KarelWorld.from_map(path, trace=False, marker_bag=None)
    #[staticmethod]
    #[pyo3(signature = (path, trace=false, marker_bag=None))]
    fn from_map(path: PathBuf, trace: bool, marker_bag: Option<u32>) -> PyResult<Self> {
        let w = World::from_map_file(&path, options(trace, marker_bag)).map_err(construction_err)?;
        Ok(Self { w })
    }

    /// KarelWorld.from_map_str(text, trace=False, marker_bag=None)
    #[staticmethod]
    #[pyo3(signature = (text, trace=false, marker_bag=None))]
    fn from_map_str(text: &str, trace: bool, marker_bag: Option<u32>) -> PyResult<Self> {
        let w = World::from_map_str(text, options(trace, marker_bag)).map_err(construction_err)?;
        Ok(Self { w })
    }

    /// KarelWorld.from_state(state, trace=False, marker_bag=None)
    ///
    /// `state` is a uint8 array of shape (H, W, 16) as returned by `state()`.
    #[staticmethod]
    #[pyo3(signature = (state, trace=false, marker_bag=None))]
    fn from_state(
        state: PyReadonlyArray3<'_, u8>,
        trace: bool,
        marker_bag: Option<u32>,
    ) -> PyResult<Self> {
        let w = World::from_tensor(state.as_array(), options(trace, marker_bag))
            .map_err(construction_err)?;
        Ok(Self { w })
    }

    /// KarelWorld.from_state_file(path, trace=False, marker_bag=None)
    #[staticmethod]
    #[pyo3(signature = (path, trace=false, marker_bag=None))]
    fn from_state_file(path: PathBuf, trace: bool, marker_bag: Option<u32>) -> PyResult<Self> {
        let w = World::from_tensor_file(&path, options(trace, marker_bag))
            .map_err(construction_err)?;
        Ok(Self { w })
    }

    fn copy(&self) -> Self {
        self.clone()
    }

    // ---------------------------------------------------------------------
    // Actions
    // ---------------------------------------------------------------------

    /// Returns whether the hero advanced.
    #[pyo3(name = "move")]
    fn move_(&mut self) -> bool {
        self.w.move_forward()
    }

    fn turn_left(&mut self) {
        self.w.turn_left();
    }
    #[pyo3(name = "turnLeft")]
    fn turn_left_camel(&mut self) {
        self.w.turn_left();
    }

    fn turn_right(&mut self) {
        self.w.turn_right();
    }
    #[pyo3(name = "turnRight")]
    fn turn_right_camel(&mut self) {
        self.w.turn_right();
    }

    fn pick_marker(&mut self) {
        self.w.pick_marker();
    }
    #[pyo3(name = "pickMarker")]
    fn pick_marker_camel(&mut self) {
        self.w.pick_marker();
    }

    /// Returns the marker count at the hero cell after the attempt.
    fn put_marker(&mut self) -> u32 {
        self.w.put_marker()
    }
    #[pyo3(name = "putMarker")]
    fn put_marker_camel(&mut self) -> u32 {
        self.w.put_marker()
    }

    // ---------------------------------------------------------------------
    // Sensors
    // ---------------------------------------------------------------------

    fn front_is_clear(&self) -> bool {
        self.w.front_is_clear()
    }
    #[pyo3(name = "frontIsClear")]
    fn front_is_clear_camel(&self) -> bool {
        self.w.front_is_clear()
    }

    fn left_is_clear(&self) -> bool {
        self.w.left_is_clear()
    }
    #[pyo3(name = "leftIsClear")]
    fn left_is_clear_camel(&self) -> bool {
        self.w.left_is_clear()
    }

    fn right_is_clear(&self) -> bool {
        self.w.right_is_clear()
    }
    #[pyo3(name = "rightIsClear")]
    fn right_is_clear_camel(&self) -> bool {
        self.w.right_is_clear()
    }

    fn markers_present(&self) -> bool {
        self.w.markers_present()
    }
    #[pyo3(name = "markersPresent")]
    fn markers_present_camel(&self) -> bool {
        self.w.markers_present()
    }

    fn no_markers_present(&self) -> bool {
        self.w.no_markers_present()
    }
    #[pyo3(name = "noMarkersPresent")]
    fn no_markers_present_camel(&self) -> bool {
        self.w.no_markers_present()
    }

    /// call(name) -> bool | int | None
    ///
    /// Dispatch any primitive by name (either naming style). Actions return what the
    /// named method returns; sensors return their boolean.
    fn call(&mut self, py: Python<'_>, name: &str) -> PyResult<PyObject> {
        let prim: Primitive = name.parse().map_err(primitive_err)?;
        Ok(match prim {
            Primitive::Action(a) => match self.w.act(a) {
                ActionOutcome::Moved(b) => b.into_py(py),
                ActionOutcome::MarkerCount(n) => n.into_py(py),
                ActionOutcome::Done => py.None(),
            },
            Primitive::Sensor(s) => self.w.sense(s).into_py(py),
        })
    }

    // ---------------------------------------------------------------------
    // Observation
    // ---------------------------------------------------------------------

    /// Returns the state as a uint8 array of shape (H, W, 16).
    fn state<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray3<u8>> {
        PyArray3::from_owned_array_bound(py, self.w.to_tensor())
    }

    /// save_state(path): write the state tensor as JSON.
    fn save_state(&self, path: PathBuf) -> PyResult<()> {
        self.w.write_tensor_file(&path)?;
        Ok(())
    }

    /// draw(prefix="", skip_number=False, with_color=False) -> list[str]
    #[pyo3(signature = (prefix="", skip_number=false, with_color=false))]
    fn draw(&self, prefix: &str, skip_number: bool, with_color: bool) -> Vec<String> {
        self.w.render(&RenderOptions {
            prefix: prefix.to_string(),
            skip_number,
            with_color,
        })
    }

    fn height(&self) -> usize {
        self.w.height()
    }
    fn width(&self) -> usize {
        self.w.width()
    }

    /// Returns (x, y): x = column, y = row.
    fn hero_position(&self) -> (i32, i32) {
        self.w.hero_position()
    }

    /// Facing channel index: 0=North, 1=South, 2=West, 3=East.
    fn facing_idx(&self) -> usize {
        self.w.facing_index()
    }

    fn facing_north(&self) -> bool {
        self.w.facing_north()
    }
    fn facing_south(&self) -> bool {
        self.w.facing_south()
    }
    fn facing_west(&self) -> bool {
        self.w.facing_west()
    }
    fn facing_east(&self) -> bool {
        self.w.facing_east()
    }

    fn marker_count(&self, x: i32, y: i32) -> u32 {
        self.w.marker_count(x, y)
    }

    fn set_trace(&mut self, on: bool) {
        self.w.set_trace(on);
    }

    /// snapshot() -> dict
    ///
    /// Small dict of scalar state for env logging.
    fn snapshot(&self, py: Python<'_>) -> PyResult<PyObject> {
        let d = PyDict::new_bound(py);
        d.set_item("height", self.w.height())?;
        d.set_item("width", self.w.width())?;
        d.set_item("hero_position", self.w.hero_position())?;
        d.set_item("facing", self.w.facing().glyph().to_string())?;
        d.set_item("facing_idx", self.w.facing_index())?;
        d.set_item("markers_here", self.w.markers_here())?;
        d.set_item("total_markers", self.w.grid().total_markers())?;
        d.set_item("marker_bag", bag_to_py(self.w.hero().bag))?;
        d.set_item("trace", self.w.options().trace)?;
        Ok(d.into_py(py))
    }

    fn __str__(&self) -> String {
        self.w.render_plain()
    }

    fn __eq__(&self, other: &Self) -> bool {
        self.w == other.w
    }
}
