// rust/engine/src/lib.rs
#![forbid(unsafe_code)]

pub mod engine;
pub mod policy;

// Re-export the bits the CLI and Python bindings need:
pub use engine::{
    Action, ActionOutcome, Cell, ConstructionError, Facing, Grid, Hero, MAX_MARKERS, MarkerBag,
    NUM_CHANNELS, Primitive, RandomWorldSpec, RenderOptions, Sensor, StateTensor, UnknownPrimitive,
    World, WorldOptions,
};
pub use policy::{Policy, RandomPolicy, WallFollowerPolicy};
