// rust/engine/src/policy/wall_follower.rs
#![forbid(unsafe_code)]

use crate::engine::{Action, World};

use super::base::Policy;

/// Right-hand wall follower driven only by the sensors.
///
/// - markers under the hero are picked first when `collect_markers` is set
/// - an open right side is taken once (turn, then move), never twice in a row,
///   so the hero does not spin in place in open areas
/// - otherwise move if the front is clear, else turn left
#[derive(Clone, Debug, Default)]
pub struct WallFollowerPolicy {
    collect_markers: bool,
    just_turned_right: bool,
}

impl WallFollowerPolicy {
    pub fn new(collect_markers: bool) -> Self {
        Self {
            collect_markers,
            just_turned_right: false,
        }
    }
}

impl Policy for WallFollowerPolicy {
    fn choose_action(&mut self, w: &World) -> Option<Action> {
        if self.collect_markers && w.markers_present() {
            return Some(Action::PickMarker);
        }

        let action = if w.right_is_clear() && !self.just_turned_right {
            Action::TurnRight
        } else if w.front_is_clear() {
            Action::Move
        } else {
            Action::TurnLeft
        };

        self.just_turned_right = action == Action::TurnRight;
        Some(action)
    }
}
