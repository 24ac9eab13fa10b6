// rust/engine/src/engine/random.rs
#![forbid(unsafe_code)]

/*
Random world generation

Draw order (fixed, so a seeded StdRng reproduces the same world)
----------------------------------------------------------------
1. One uniform f64 wall draw per cell, row-major over the whole matrix.
   A cell becomes Wall iff its draw < wall_ratio.
2. The outer ring is forced to Wall, overriding the draws.
3. Hero x in [1, width-1), hero y in [1, height-1), facing uniform over the four
   directions. The hero cell is forced back to Empty.
4. One uniform f64 marker draw per cell, row-major. An interior cell receives a
   single marker iff its wall draw >= wall_ratio and its marker draw < marker_ratio.

Markers never land on walls or the border. The hero cell is cleared after the wall
draw, so it only receives a marker if its own wall draw passed.
*/

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::engine::error::ConstructionError;
use crate::engine::facing::Facing;
use crate::engine::grid::{Cell, Grid, check_size};
use crate::engine::hero::{Hero, MarkerBag};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomWorldSpec {
    pub height: usize,
    pub width: usize,
    /// Probability in [0,1] that a cell is sampled as a wall.
    pub wall_ratio: f64,
    /// Probability in [0,1] that a non-wall interior cell receives a marker.
    pub marker_ratio: f64,
}

impl RandomWorldSpec {
    pub const DEFAULT_SIDE: usize = 8;
    pub const DEFAULT_WALL_RATIO: f64 = 0.1;
    pub const DEFAULT_MARKER_RATIO: f64 = 0.1;

    pub fn new(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            ..Self::default()
        }
    }
}

impl Default for RandomWorldSpec {
    fn default() -> Self {
        Self {
            height: Self::DEFAULT_SIDE,
            width: Self::DEFAULT_SIDE,
            wall_ratio: Self::DEFAULT_WALL_RATIO,
            marker_ratio: Self::DEFAULT_MARKER_RATIO,
        }
    }
}

/// Sample a grid and hero. Deterministic w.r.t. the rng state.
pub fn generate<R: Rng + ?Sized>(
    spec: &RandomWorldSpec,
    bag: MarkerBag,
    rng: &mut R,
) -> Result<(Grid, Hero), ConstructionError> {
    let (h, w) = (spec.height, spec.width);
    check_size(h, w)?;

    let mut grid = Grid::open(h, w);

    let wall_draws: Vec<f64> = (0..h * w).map(|_| rng.r#gen::<f64>()).collect();
    for (i, &u) in wall_draws.iter().enumerate() {
        if u < spec.wall_ratio {
            grid.set_cell((i % w) as i32, (i / w) as i32, Cell::Wall);
        }
    }
    grid.wall_border();

    let x = rng.gen_range(1..w - 1) as i32;
    let y = rng.gen_range(1..h - 1) as i32;
    let facing = *Facing::all().choose(rng).unwrap_or(&Facing::North);
    grid.set_cell(x, y, Cell::Empty);

    let marker_draws: Vec<f64> = (0..h * w).map(|_| rng.r#gen::<f64>()).collect();
    for (i, (&wd, &md)) in wall_draws.iter().zip(&marker_draws).enumerate() {
        let (cx, cy) = ((i % w) as i32, (i / w) as i32);
        if wd >= spec.wall_ratio && md < spec.marker_ratio && !grid.is_border(cx, cy) {
            grid.add_markers(cx, cy, 1);
        }
    }

    Ok((grid, Hero::new((x, y), facing, bag)))
}

/// Seeded convenience wrapper around [`generate`].
pub fn generate_seeded(
    spec: &RandomWorldSpec,
    bag: MarkerBag,
    seed: u64,
) -> Result<(Grid, Hero), ConstructionError> {
    let mut rng = StdRng::seed_from_u64(seed);
    generate(spec, bag, &mut rng)
}
