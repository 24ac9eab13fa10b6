// rust/engine/src/engine/world.rs
#![forbid(unsafe_code)]

use std::fmt;
use std::io;
use std::path::Path;
use std::str::FromStr;

use ndarray::ArrayView3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::engine::error::{ConstructionError, UnknownPrimitive};
use crate::engine::facing::Facing;
use crate::engine::grid::{Cell, Grid, check_size};
use crate::engine::hero::{Hero, MarkerBag};
use crate::engine::map::{parse_map, parse_map_file};
use crate::engine::random::{RandomWorldSpec, generate, generate_seeded};
use crate::engine::render::{RenderOptions, render};
use crate::engine::tensor::{StateTensor, decode, encode, read_tensor_file, write_tensor_file};

/// Per-world switches. Neither affects simulation semantics except the initial bag.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldOptions {
    /// Log every primitive (and a canvas snapshot after state-changing actions)
    /// on the `karel::trace` target.
    pub trace: bool,
    /// Initial hero bag. `Unbounded` unless explicitly opted into.
    pub marker_bag: MarkerBag,
}

impl WorldOptions {
    pub fn traced() -> Self {
        Self {
            trace: true,
            ..Self::default()
        }
    }
}

// -----------------------------------------------------------------------------
// Primitive vocabulary
// -----------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Action {
    Move,
    TurnLeft,
    TurnRight,
    PickMarker,
    PutMarker,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Sensor {
    FrontIsClear,
    LeftIsClear,
    RightIsClear,
    MarkersPresent,
    NoMarkersPresent,
}

impl Action {
    pub fn all() -> &'static [Action] {
        use Action::*;
        &[Move, TurnLeft, TurnRight, PickMarker, PutMarker]
    }

    pub fn name(self) -> &'static str {
        use Action::*;
        match self {
            Move => "move",
            TurnLeft => "turn_left",
            TurnRight => "turn_right",
            PickMarker => "pick_marker",
            PutMarker => "put_marker",
        }
    }
}

impl Sensor {
    pub fn all() -> &'static [Sensor] {
        use Sensor::*;
        &[
            FrontIsClear,
            LeftIsClear,
            RightIsClear,
            MarkersPresent,
            NoMarkersPresent,
        ]
    }

    pub fn name(self) -> &'static str {
        use Sensor::*;
        match self {
            FrontIsClear => "front_is_clear",
            LeftIsClear => "left_is_clear",
            RightIsClear => "right_is_clear",
            MarkersPresent => "markers_present",
            NoMarkersPresent => "no_markers_present",
        }
    }
}

/// Accepts snake_case names and the camelCase aliases used by the DSL layer.
impl FromStr for Action {
    type Err = UnknownPrimitive;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use Action::*;
        match s {
            "move" => Ok(Move),
            "turn_left" | "turnLeft" => Ok(TurnLeft),
            "turn_right" | "turnRight" => Ok(TurnRight),
            "pick_marker" | "pickMarker" => Ok(PickMarker),
            "put_marker" | "putMarker" => Ok(PutMarker),
            _ => Err(UnknownPrimitive(s.to_string())),
        }
    }
}

impl FromStr for Sensor {
    type Err = UnknownPrimitive;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use Sensor::*;
        match s {
            "front_is_clear" | "frontIsClear" => Ok(FrontIsClear),
            "left_is_clear" | "leftIsClear" => Ok(LeftIsClear),
            "right_is_clear" | "rightIsClear" => Ok(RightIsClear),
            "markers_present" | "markersPresent" => Ok(MarkersPresent),
            "no_markers_present" | "noMarkersPresent" => Ok(NoMarkersPresent),
            _ => Err(UnknownPrimitive(s.to_string())),
        }
    }
}

/// Either half of the vocabulary, for drivers that take names from text.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Primitive {
    Action(Action),
    Sensor(Sensor),
}

impl FromStr for Primitive {
    type Err = UnknownPrimitive;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<Action>()
            .map(Primitive::Action)
            .or_else(|_| s.parse::<Sensor>().map(Primitive::Sensor))
    }
}

/// Result of an action. Physically blocked attempts are outcomes, never errors.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ActionOutcome {
    /// `move`: whether the hero actually advanced.
    Moved(bool),
    /// Turns and `pick_marker`.
    Done,
    /// `put_marker`: marker count at the hero cell after the attempt.
    MarkerCount(u32),
}

impl fmt::Display for ActionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionOutcome::Moved(b) => write!(f, "{b}"),
            ActionOutcome::Done => f.write_str("-"),
            ActionOutcome::MarkerCount(n) => write!(f, "{n}"),
        }
    }
}

// -----------------------------------------------------------------------------
// World
// -----------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq)]
pub struct World {
    grid: Grid,
    hero: Hero,
    options: WorldOptions,
}

impl World {
    // ---------------------------------------------------------------------
    // Construction
    // ---------------------------------------------------------------------

    /// Assemble a world from an explicit grid and hero pose.
    ///
    /// The hero keeps its own bag; `options.marker_bag` only applies to the other paths.
    pub fn from_parts(
        grid: Grid,
        hero: Hero,
        options: WorldOptions,
    ) -> Result<Self, ConstructionError> {
        check_size(grid.height(), grid.width())?;
        let (x, y) = hero.position;
        if grid.cell(x, y) != Some(Cell::Empty) {
            return Err(ConstructionError::HeroOnWall { x, y });
        }
        Ok(Self::assemble(grid, hero, options, "parts"))
    }

    pub fn random<R: Rng + ?Sized>(
        spec: &RandomWorldSpec,
        rng: &mut R,
        options: WorldOptions,
    ) -> Result<Self, ConstructionError> {
        let (grid, hero) = generate(spec, options.marker_bag, rng)?;
        Ok(Self::assemble(grid, hero, options, "random"))
    }

    pub fn random_seeded(
        spec: &RandomWorldSpec,
        seed: u64,
        options: WorldOptions,
    ) -> Result<Self, ConstructionError> {
        let (grid, hero) = generate_seeded(spec, options.marker_bag, seed)?;
        Ok(Self::assemble(grid, hero, options, "random"))
    }

    pub fn from_map_str(text: &str, options: WorldOptions) -> Result<Self, ConstructionError> {
        let (grid, hero) = parse_map(text, options.marker_bag)?;
        Ok(Self::assemble(grid, hero, options, "map"))
    }

    pub fn from_map_file(path: &Path, options: WorldOptions) -> Result<Self, ConstructionError> {
        let (grid, hero) = parse_map_file(path, options.marker_bag)?;
        Ok(Self::assemble(grid, hero, options, "map"))
    }

    /// Inverse of [`World::to_tensor`].
    /// See [`crate::engine::tensor::decode`] for what is validated.
    pub fn from_tensor(
        t: ArrayView3<'_, u8>,
        options: WorldOptions,
    ) -> Result<Self, ConstructionError> {
        let (grid, hero) = decode(t, options.marker_bag)?;
        Ok(Self::assemble(grid, hero, options, "tensor"))
    }

    pub fn from_tensor_file(path: &Path, options: WorldOptions) -> Result<Self, ConstructionError> {
        let t = read_tensor_file(path)?;
        Self::from_tensor(t.view(), options)
    }

    fn assemble(grid: Grid, hero: Hero, options: WorldOptions, source: &'static str) -> Self {
        debug!(
            source,
            height = grid.height(),
            width = grid.width(),
            hero_x = hero.position.0,
            hero_y = hero.position.1,
            facing = ?hero.facing,
            markers = grid.total_markers(),
            "world constructed"
        );
        Self {
            grid,
            hero,
            options,
        }
    }

    // ---------------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------------

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn hero(&self) -> &Hero {
        &self.hero
    }

    pub fn options(&self) -> WorldOptions {
        self.options
    }

    pub fn set_trace(&mut self, on: bool) {
        self.options.trace = on;
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn hero_position(&self) -> (i32, i32) {
        self.hero.position
    }

    pub fn facing(&self) -> Facing {
        self.hero.facing
    }

    /// Facing channel index (0=North, 1=South, 2=West, 3=East).
    pub fn facing_index(&self) -> usize {
        self.hero.facing.idx()
    }

    pub fn facing_north(&self) -> bool {
        self.hero.facing == Facing::North
    }

    pub fn facing_south(&self) -> bool {
        self.hero.facing == Facing::South
    }

    pub fn facing_west(&self) -> bool {
        self.hero.facing == Facing::West
    }

    pub fn facing_east(&self) -> bool {
        self.hero.facing == Facing::East
    }

    pub fn marker_count(&self, x: i32, y: i32) -> u32 {
        self.grid.marker_count(x, y)
    }

    /// Marker count under the hero.
    pub fn markers_here(&self) -> u32 {
        let (x, y) = self.hero.position;
        self.grid.marker_count(x, y)
    }

    // ---------------------------------------------------------------------
    // Uniform dispatch (the only place tracing hooks in)
    // ---------------------------------------------------------------------

    pub fn act(&mut self, action: Action) -> ActionOutcome {
        let out = self.apply(action);
        if self.options.trace {
            info!(
                target: "karel::trace",
                action = action.name(),
                outcome = %out,
                "\n{}",
                self.render_plain()
            );
        }
        out
    }

    pub fn sense(&self, sensor: Sensor) -> bool {
        let v = self.probe(sensor);
        if self.options.trace {
            info!(target: "karel::trace", sensor = sensor.name(), value = v);
        }
        v
    }

    fn apply(&mut self, action: Action) -> ActionOutcome {
        match action {
            Action::Move => {
                if self.clear_towards(self.hero.facing) {
                    self.hero.move_forward();
                    ActionOutcome::Moved(true)
                } else {
                    ActionOutcome::Moved(false)
                }
            }
            Action::TurnLeft => {
                self.hero.turn_left();
                ActionOutcome::Done
            }
            Action::TurnRight => {
                self.hero.turn_right();
                ActionOutcome::Done
            }
            Action::PickMarker => {
                let (x, y) = self.hero.position;
                if self.grid.remove_marker(x, y) {
                    self.hero.pick_marker();
                }
                ActionOutcome::Done
            }
            Action::PutMarker => {
                let (x, y) = self.hero.position;
                if self.hero.holding_markers() {
                    self.grid.add_markers(x, y, 1);
                    self.hero.put_marker();
                }
                ActionOutcome::MarkerCount(self.grid.marker_count(x, y))
            }
        }
    }

    fn probe(&self, sensor: Sensor) -> bool {
        let f = self.hero.facing;
        match sensor {
            Sensor::FrontIsClear => self.clear_towards(f),
            Sensor::LeftIsClear => self.clear_towards(f.left()),
            Sensor::RightIsClear => self.clear_towards(f.right()),
            Sensor::MarkersPresent => self.markers_here() > 0,
            Sensor::NoMarkersPresent => self.markers_here() == 0,
        }
    }

    /// Static cell kind one step away. Outside the matrix counts as blocked, which only
    /// matters for tensor-decoded worlds without a wall border.
    #[inline]
    fn clear_towards(&self, facing: Facing) -> bool {
        let (x, y) = self.hero.ahead(facing);
        self.grid.is_clear(x, y)
    }

    // ---------------------------------------------------------------------
    // Named primitives
    // ---------------------------------------------------------------------

    /// Returns whether the hero advanced.
    pub fn move_forward(&mut self) -> bool {
        self.act(Action::Move) == ActionOutcome::Moved(true)
    }

    pub fn turn_left(&mut self) {
        self.act(Action::TurnLeft);
    }

    pub fn turn_right(&mut self) {
        self.act(Action::TurnRight);
    }

    pub fn pick_marker(&mut self) {
        self.act(Action::PickMarker);
    }

    /// Returns the marker count at the hero cell after the attempt.
    pub fn put_marker(&mut self) -> u32 {
        match self.act(Action::PutMarker) {
            ActionOutcome::MarkerCount(n) => n,
            _ => self.markers_here(),
        }
    }

    pub fn front_is_clear(&self) -> bool {
        self.sense(Sensor::FrontIsClear)
    }

    pub fn left_is_clear(&self) -> bool {
        self.sense(Sensor::LeftIsClear)
    }

    pub fn right_is_clear(&self) -> bool {
        self.sense(Sensor::RightIsClear)
    }

    pub fn markers_present(&self) -> bool {
        self.sense(Sensor::MarkersPresent)
    }

    pub fn no_markers_present(&self) -> bool {
        self.sense(Sensor::NoMarkersPresent)
    }

    // ---------------------------------------------------------------------
    // Serialization
    // ---------------------------------------------------------------------

    pub fn to_tensor(&self) -> StateTensor {
        encode(&self.grid, &self.hero)
    }

    pub fn write_tensor_file(&self, path: &Path) -> io::Result<()> {
        write_tensor_file(path, &self.to_tensor())
    }

    pub fn render(&self, opts: &RenderOptions) -> Vec<String> {
        render(&self.grid, &self.hero, opts)
    }

    pub fn render_plain(&self) -> String {
        self.render(&RenderOptions::plain()).join("\n")
    }
}

impl fmt::Display for World {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_plain())
    }
}
