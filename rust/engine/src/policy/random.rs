// rust/engine/src/policy/random.rs
#![forbid(unsafe_code)]

use rand::prelude::*;

use crate::engine::{Action, World};

use super::base::Policy;

/// Uniform over the five actions, independent of the world.
pub struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Policy for RandomPolicy {
    fn choose_action(&mut self, _w: &World) -> Option<Action> {
        Action::all().choose(&mut self.rng).copied()
    }
}
