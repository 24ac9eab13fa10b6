// rust/engine/src/engine/mod.rs
#![forbid(unsafe_code)]

pub mod constants;
mod error;
mod facing;
mod grid;
mod hero;
mod map;
mod random;
mod render;
pub mod tensor;
mod world;

/**
 * Curated engine public API.
 *
 * Construction helpers (map parsing, random sampling) stay private behind `World`'s
 * constructors; the tensor codec is public so drivers can validate raw snapshots.
 */
pub use constants::{MAX_MARKERS, MIN_SIDE, NUM_CHANNELS};
pub use error::{ConstructionError, UnknownPrimitive};
pub use facing::Facing;
pub use grid::{Cell, Grid};
pub use hero::{Hero, MarkerBag};
pub use random::RandomWorldSpec;
pub use render::RenderOptions;
pub use tensor::StateTensor;
pub use world::{Action, ActionOutcome, Primitive, Sensor, World, WorldOptions};
