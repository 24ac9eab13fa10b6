// rust/engine/src/engine/grid.rs
#![forbid(unsafe_code)]

use rustc_hash::FxHashMap;

use crate::engine::constants::MIN_SIDE;
use crate::engine::error::ConstructionError;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Cell {
    #[default]
    Empty,
    Wall,
}

/// Fixed-size cell matrix plus the marker multiset.
///
/// Cell kinds never change after construction; only `markers` mutates.
/// Marker entries with count 0 are never stored.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Grid {
    height: usize,
    width: usize,
    cells: Vec<Cell>,
    markers: FxHashMap<(i32, i32), u32>,
}

pub fn check_size(height: usize, width: usize) -> Result<(), ConstructionError> {
    if height < MIN_SIDE || width < MIN_SIDE {
        return Err(ConstructionError::InvalidSize { height, width });
    }
    Ok(())
}

impl Grid {
    /// All-empty grid without any border. Callers decide which cells become walls.
    pub(crate) fn open(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            cells: vec![Cell::Empty; height * width],
            markers: FxHashMap::default(),
        }
    }

    /// Empty interior enclosed by one ring of walls.
    pub fn bordered(height: usize, width: usize) -> Result<Self, ConstructionError> {
        check_size(height, width)?;
        let mut g = Self::open(height, width);
        g.wall_border();
        Ok(g)
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    /// Cell kind at `(x, y)`, or None outside the matrix.
    #[inline]
    pub fn cell(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// True iff `(x, y)` is inside the matrix and not a wall.
    #[inline]
    pub fn is_clear(&self, x: i32, y: i32) -> bool {
        self.cell(x, y) == Some(Cell::Empty)
    }

    /// True iff `(x, y)` is inside the matrix and on its outer ring.
    pub fn is_border(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some()
            && (x == 0 || y == 0 || x + 1 == self.width as i32 || y + 1 == self.height as i32)
    }

    pub(crate) fn set_cell(&mut self, x: i32, y: i32, cell: Cell) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = cell;
        }
    }

    /// Force every outer-ring cell to `Wall`.
    pub(crate) fn wall_border(&mut self) {
        let (h, w) = (self.height as i32, self.width as i32);
        for x in 0..w {
            self.set_cell(x, 0, Cell::Wall);
            self.set_cell(x, h - 1, Cell::Wall);
        }
        for y in 0..h {
            self.set_cell(0, y, Cell::Wall);
            self.set_cell(w - 1, y, Cell::Wall);
        }
    }

    pub fn border_is_wall(&self) -> bool {
        let (h, w) = (self.height as i32, self.width as i32);
        (0..h).all(|y| {
            (0..w)
                .filter(|&x| self.is_border(x, y))
                .all(|x| self.cell(x, y) == Some(Cell::Wall))
        })
    }

    // -------------------------------------------------------------------------
    // Marker multiset
    // -------------------------------------------------------------------------

    #[inline]
    pub fn marker_count(&self, x: i32, y: i32) -> u32 {
        self.markers.get(&(x, y)).copied().unwrap_or(0)
    }

    pub fn add_markers(&mut self, x: i32, y: i32, n: u32) {
        if n == 0 {
            return;
        }
        let c = self.markers.entry((x, y)).or_insert(0);
        *c = c.saturating_add(n);
    }

    /// Remove one marker instance. Returns false if the cell holds none.
    pub fn remove_marker(&mut self, x: i32, y: i32) -> bool {
        match self.markers.get_mut(&(x, y)) {
            Some(c) if *c > 1 => {
                *c -= 1;
                true
            }
            Some(_) => {
                self.markers.remove(&(x, y));
                true
            }
            None => false,
        }
    }

    pub fn total_markers(&self) -> u64 {
        self.markers.values().map(|&c| u64::from(c)).sum()
    }

    /// Cells holding at least one marker, as `((x, y), count)`, sorted row-major.
    pub fn marker_cells(&self) -> Vec<((i32, i32), u32)> {
        let mut v: Vec<_> = self.markers.iter().map(|(&p, &c)| (p, c)).collect();
        v.sort_unstable_by_key(|&((x, y), _)| (y, x));
        v
    }

    pub fn wall_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c == Cell::Wall).count()
    }
}
