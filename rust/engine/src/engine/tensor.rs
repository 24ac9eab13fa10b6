// rust/engine/src/engine/tensor.rs
#![forbid(unsafe_code)]

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use ndarray::{Array3, ArrayView3};

use crate::engine::constants::{
    FACING_CHANNELS, MARKER_CHANNEL_BASE, MAX_MARKERS, NUM_CHANNELS, WALL_CHANNEL,
    marker_channel,
};
use crate::engine::error::ConstructionError;
use crate::engine::facing::Facing;
use crate::engine::grid::{Cell, Grid, check_size};
use crate::engine::hero::{Hero, MarkerBag};

/// `(height, width, NUM_CHANNELS)` one-hot snapshot of a world.
pub type StateTensor = Array3<u8>;

/// Project a grid and hero onto the fixed channel layout.
///
/// Marker counts above `MAX_MARKERS` are clipped. A hero outside the matrix is
/// not representable and leaves the facing channels empty.
pub fn encode(grid: &Grid, hero: &Hero) -> StateTensor {
    let (h, w) = (grid.height(), grid.width());
    let mut t = Array3::<u8>::zeros((h, w, NUM_CHANNELS));

    for y in 0..h {
        for x in 0..w {
            let (cx, cy) = (x as i32, y as i32);
            if grid.cell(cx, cy) == Some(Cell::Wall) {
                t[[y, x, WALL_CHANNEL]] = 1;
            }
            t[[y, x, marker_channel(grid.marker_count(cx, cy))]] = 1;
        }
    }

    let (hx, hy) = hero.position;
    if hx >= 0 && hy >= 0 && (hx as usize) < w && (hy as usize) < h {
        t[[hy as usize, hx as usize, hero.facing.idx()]] = 1;
    }
    t
}

/**
 * Rebuild a grid and hero from a state tensor.
 *
 * Validated:
 * - exactly NUM_CHANNELS channels and both sides >= 3
 * - every value is 0 or 1
 * - exactly one facing bit over the whole tensor
 * - exactly one marker-count bit per cell
 *
 * Not validated: the wall border and whether the hero stands on a wall.
 * Whatever the wall channel says is taken as-is.
 */
pub fn decode(t: ArrayView3<'_, u8>, bag: MarkerBag) -> Result<(Grid, Hero), ConstructionError> {
    let (h, w, c) = t.dim();
    if c != NUM_CHANNELS {
        return Err(ConstructionError::ChannelCount {
            expected: NUM_CHANNELS,
            found: c,
        });
    }
    check_size(h, w)?;

    if let Some(((y, x, ch), v)) = t.indexed_iter().find(|&(_, &v)| v > 1) {
        return Err(ConstructionError::MalformedState(format!(
            "value {v} at ({x}, {y}) channel {ch} is not 0 or 1"
        )));
    }

    let mut grid = Grid::open(h, w);
    let mut hero: Option<Hero> = None;

    for y in 0..h {
        for x in 0..w {
            let (cx, cy) = (x as i32, y as i32);

            for f in 0..FACING_CHANNELS {
                if t[[y, x, f]] == 0 {
                    continue;
                }
                if hero.is_some() {
                    return Err(ConstructionError::MalformedState(format!(
                        "second facing bit at ({x}, {y}) channel {f}"
                    )));
                }
                let facing = Facing::from_idx(f).unwrap_or(Facing::North);
                hero = Some(Hero::new((cx, cy), facing, bag));
            }

            if t[[y, x, WALL_CHANNEL]] == 1 {
                grid.set_cell(cx, cy, Cell::Wall);
            }

            let mut count: Option<u32> = None;
            for n in 0..=MAX_MARKERS {
                if t[[y, x, MARKER_CHANNEL_BASE + n as usize]] == 1 {
                    if count.is_some() {
                        return Err(ConstructionError::MalformedState(format!(
                            "more than one marker-count bit at ({x}, {y})"
                        )));
                    }
                    count = Some(n);
                }
            }
            match count {
                Some(n) => grid.add_markers(cx, cy, n),
                None => {
                    return Err(ConstructionError::MalformedState(format!(
                        "no marker-count bit at ({x}, {y})"
                    )));
                }
            }
        }
    }

    let hero = hero.ok_or_else(|| {
        ConstructionError::MalformedState("no facing bit, hero missing".to_string())
    })?;
    Ok((grid, hero))
}

/// Write a state tensor as JSON (ndarray serde layout: `{"v":1,"dim":[..],"data":[..]}`).
pub fn write_tensor_file(path: &Path, t: &StateTensor) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut out, t).map_err(io::Error::other)?;
    out.flush()
}

pub fn read_tensor_file(path: &Path) -> Result<StateTensor, ConstructionError> {
    let f = fs::File::open(path).map_err(|source| ConstructionError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(f)).map_err(|source| ConstructionError::TensorFile {
        path: path.to_path_buf(),
        source,
    })
}
