// rust/karel_cli/src/rollout/stats.rs
#![forbid(unsafe_code)]

use std::time::Instant;

use karel_engine::{Action, ActionOutcome, StateTensor};

#[derive(Clone, Debug)]
pub struct RolloutStats {
    pub episodes_finished: u64,
    pub ep_len: u64,
    pub steps_done: u64,

    // action counters (all steps)
    pub moves: u64,
    pub blocked_moves: u64,
    pub turns: u64,
    pub picks: u64,
    pub empty_picks: u64,
    pub puts: u64,
    pub refused_puts: u64,

    // before/after tensor deltas (finished episodes)
    pub changed_cells_sum: u64,
    pub changed_cells_max: u64,

    t0: Instant,
}

/// Number of cells whose 16-channel vector differs between two snapshots of one world.
pub fn changed_cells(before: &StateTensor, after: &StateTensor) -> u64 {
    before
        .outer_iter()
        .zip(after.outer_iter())
        .map(|(rb, ra)| {
            rb.outer_iter()
                .zip(ra.outer_iter())
                .filter(|(cb, ca)| cb != ca)
                .count() as u64
        })
        .sum()
}

impl RolloutStats {
    pub fn new() -> Self {
        Self {
            episodes_finished: 0,
            ep_len: 0,
            steps_done: 0,
            moves: 0,
            blocked_moves: 0,
            turns: 0,
            picks: 0,
            empty_picks: 0,
            puts: 0,
            refused_puts: 0,
            changed_cells_sum: 0,
            changed_cells_max: 0,
            t0: Instant::now(),
        }
    }

    /// Call once per primitive action.
    ///
    /// `markers_before` is the marker count under the hero before the action ran;
    /// it tells a real pick/put apart from a silent no-op.
    pub fn on_step(
        &mut self,
        action: Action,
        outcome: ActionOutcome,
        markers_before: u32,
        markers_after: u32,
    ) {
        self.steps_done += 1;
        self.ep_len += 1;

        match (action, outcome) {
            (Action::Move, ActionOutcome::Moved(ok)) => {
                self.moves += 1;
                if !ok {
                    self.blocked_moves += 1;
                }
            }
            (Action::TurnLeft | Action::TurnRight, _) => self.turns += 1,
            (Action::PickMarker, _) => {
                self.picks += 1;
                if markers_after == markers_before {
                    self.empty_picks += 1;
                }
            }
            (Action::PutMarker, _) => {
                self.puts += 1;
                if markers_after == markers_before {
                    self.refused_puts += 1;
                }
            }
            _ => {}
        }
    }

    /// Call when an episode ends, before generating the next world.
    /// Returns the number of cells the episode changed.
    pub fn on_episode_end(&mut self, before: &StateTensor, after: &StateTensor) -> u64 {
        let changed = changed_cells(before, after);
        self.episodes_finished += 1;
        self.changed_cells_sum += changed;
        self.changed_cells_max = self.changed_cells_max.max(changed);
        self.ep_len = 0;
        changed
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.t0.elapsed().as_secs_f64()
    }

    pub fn steps_per_sec(&self) -> f64 {
        let dt = self.elapsed_secs();
        if dt > 0.0 {
            self.steps_done as f64 / dt
        } else {
            0.0
        }
    }

    fn ratio(num: u64, den: u64) -> f64 {
        if den > 0 {
            num as f64 / den as f64
        } else {
            0.0
        }
    }

    pub fn blocked_rate(&self) -> f64 {
        Self::ratio(self.blocked_moves, self.moves)
    }

    pub fn pick_hit_rate(&self) -> f64 {
        Self::ratio(self.picks - self.empty_picks, self.picks)
    }

    pub fn put_hit_rate(&self) -> f64 {
        Self::ratio(self.puts - self.refused_puts, self.puts)
    }

    pub fn avg_changed_cells(&self) -> f64 {
        Self::ratio(self.changed_cells_sum, self.episodes_finished)
    }

    pub fn live_msg(&self, policy: &str) -> String {
        format!(
            "policy={} sps={:.1} eps={} blocked={:.3} pick_hit={:.3} put_hit={:.3} avg_changed={:.2}",
            policy,
            self.steps_per_sec(),
            self.episodes_finished,
            self.blocked_rate(),
            self.pick_hit_rate(),
            self.put_hit_rate(),
            self.avg_changed_cells(),
        )
    }

    pub fn final_report(&self, policy_name: &str, height: usize, width: usize) -> FinalReport {
        FinalReport {
            policy: policy_name.to_string(),
            height,
            width,
            steps_done: self.steps_done,
            elapsed_s: self.elapsed_secs(),
            steps_per_s: self.steps_per_sec(),
            episodes_finished: self.episodes_finished,
            blocked_rate: self.blocked_rate(),
            pick_hit_rate: self.pick_hit_rate(),
            put_hit_rate: self.put_hit_rate(),
            avg_changed_cells: self.avg_changed_cells(),
            max_changed_cells: self.changed_cells_max,
        }
    }
}

#[derive(Clone, Debug)]
pub struct FinalReport {
    pub policy: String,
    pub height: usize,
    pub width: usize,

    pub steps_done: u64,
    pub elapsed_s: f64,
    pub steps_per_s: f64,

    pub episodes_finished: u64,
    pub blocked_rate: f64,
    pub pick_hit_rate: f64,
    pub put_hit_rate: f64,
    pub avg_changed_cells: f64,
    pub max_changed_cells: u64,
}
