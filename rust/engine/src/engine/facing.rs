// rust/engine/src/engine/facing.rs
#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

/// One of the four canonical unit vectors a hero can face.
///
/// Screen convention: `y` grows downwards, so North is `(0, -1)`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Facing {
    North,
    South,
    West,
    East,
}

impl Facing {
    /// Tensor channel order.
    pub fn all() -> &'static [Facing] {
        use Facing::*;
        &[North, South, West, East]
    }

    /// Strict 0..=3 id, identical to the facing channel in the tensor encoding.
    pub fn idx(self) -> usize {
        use Facing::*;
        match self {
            North => 0,
            South => 1,
            West => 2,
            East => 3,
        }
    }

    /// Inverse of `idx()`. Returns None for invalid ids.
    pub fn from_idx(idx: usize) -> Option<Self> {
        use Facing::*;
        match idx {
            0 => Some(North),
            1 => Some(South),
            2 => Some(West),
            3 => Some(East),
            _ => None,
        }
    }

    #[inline]
    pub fn vector(self) -> (i32, i32) {
        use Facing::*;
        match self {
            North => (0, -1),
            South => (0, 1),
            West => (-1, 0),
            East => (1, 0),
        }
    }

    pub fn from_vector(v: (i32, i32)) -> Option<Self> {
        use Facing::*;
        match v {
            (0, -1) => Some(North),
            (0, 1) => Some(South),
            (-1, 0) => Some(West),
            (1, 0) => Some(East),
            _ => None,
        }
    }

    /// Rotate 90 degrees counter-clockwise: `(dx, dy) -> (dy, -dx)`.
    #[inline]
    pub fn left(self) -> Self {
        use Facing::*;
        match self {
            North => West,
            West => South,
            South => East,
            East => North,
        }
    }

    /// Three left turns.
    #[inline]
    pub fn right(self) -> Self {
        self.left().left().left()
    }

    /// Hero glyph shared by the map parser and the renderer.
    pub fn glyph(self) -> char {
        use Facing::*;
        match self {
            North => '^',
            South => 'v',
            West => '<',
            East => '>',
        }
    }

    pub fn from_glyph(c: char) -> Option<Self> {
        use Facing::*;
        match c {
            '^' => Some(North),
            'v' => Some(South),
            '<' => Some(West),
            '>' => Some(East),
            _ => None,
        }
    }
}
