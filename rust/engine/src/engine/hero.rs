// rust/engine/src/engine/hero.rs
#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

use crate::engine::facing::Facing;

/// Markers carried by the hero.
///
/// `Unbounded` is the default: the hero can always put, and picking does not
/// change anything on the hero side. `Bounded(n)` is an explicit opt-in for a
/// finite bag holding `n` markers.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum MarkerBag {
    #[default]
    Unbounded,
    Bounded(u32),
}

/// Agent pose plus its marker bag. Pure state transitions, nothing here can fail.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Hero {
    /// `(x, y)`: x = column, y = row.
    pub position: (i32, i32),
    pub facing: Facing,
    pub bag: MarkerBag,
}

impl Hero {
    pub fn new(position: (i32, i32), facing: Facing, bag: MarkerBag) -> Self {
        Self {
            position,
            facing,
            bag,
        }
    }

    /// Cell one step away in the direction `facing` (not necessarily the hero's own facing).
    #[inline]
    pub fn ahead(&self, facing: Facing) -> (i32, i32) {
        let (dx, dy) = facing.vector();
        (self.position.0 + dx, self.position.1 + dy)
    }

    pub fn move_forward(&mut self) {
        self.position = self.ahead(self.facing);
    }

    pub fn turn_left(&mut self) {
        self.facing = self.facing.left();
    }

    pub fn turn_right(&mut self) {
        self.turn_left();
        self.turn_left();
        self.turn_left();
    }

    pub fn holding_markers(&self) -> bool {
        match self.bag {
            MarkerBag::Unbounded => true,
            MarkerBag::Bounded(n) => n > 0,
        }
    }

    pub fn pick_marker(&mut self) {
        if let MarkerBag::Bounded(n) = self.bag {
            self.bag = MarkerBag::Bounded(n.saturating_add(1));
        }
    }

    pub fn put_marker(&mut self) {
        if let MarkerBag::Bounded(n) = self.bag {
            self.bag = MarkerBag::Bounded(n.saturating_sub(1));
        }
    }
}
