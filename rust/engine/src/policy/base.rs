// rust/engine/src/policy/base.rs
#![forbid(unsafe_code)]

use crate::engine::{Action, World};

/// Policy chooses the next primitive action for the current world.
///
/// Returns `None` when the policy has nothing left to do.
///
/// Object-safe so it can be used as `Box<dyn Policy>`.
pub trait Policy {
    fn choose_action(&mut self, w: &World) -> Option<Action>;
}
