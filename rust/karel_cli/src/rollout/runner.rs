// rust/karel_cli/src/rollout/runner.rs
#![forbid(unsafe_code)]

use std::time::Duration;

use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use karel_engine::{Policy, RandomWorldSpec, World, WorldOptions};

use super::sinks::{ReportRow, RolloutSink};
use super::stats::{FinalReport, RolloutStats};

/// Fixed internal cadence for progress-bar live message updates.
const LIVE_EVERY: u64 = 200;

#[derive(Clone, Debug)]
pub struct RunnerConfig {
    // ---------------- core rollout ----------------
    /// Total primitive actions to execute across episodes.
    pub steps: u64,
    /// Actions per episode before a fresh world is generated.
    pub episode_len: u64,
    /// Base seed; each episode uses base_seed + episode_id.
    pub base_seed: u64,
    pub spec: RandomWorldSpec,
    pub world: WorldOptions,

    /// Used only for the final report string.
    pub policy_name: String,

    // ---------------- output ----------------
    /// 0 = final summary only
    /// 1 = progress bar
    /// 2 = progress bar + periodic table (via sink)
    pub verbosity: u8,

    /// Print a table row every N steps (only used when verbosity == 2).
    /// 0 disables table reporting.
    pub report_every: u64,

    // ---------------- rendering ----------------
    /// If Some(ms): render every step; sleep ms between frames (0 = no sleep).
    pub render_ms: Option<u64>,
}

pub struct Runner {
    cfg: RunnerConfig,
    sink: Box<dyn RolloutSink>,
}

impl Runner {
    pub fn new(cfg: RunnerConfig, sink: Box<dyn RolloutSink>) -> Self {
        Self { cfg, sink }
    }

    fn new_world(&self, episode_id: u64) -> anyhow::Result<World> {
        let seed = self.cfg.base_seed.wrapping_add(episode_id);
        World::random_seeded(&self.cfg.spec, seed, self.cfg.world)
            .with_context(|| format!("generate world for episode {episode_id} (seed {seed})"))
    }

    pub fn run(&mut self, policy: &mut dyn Policy) -> anyhow::Result<FinalReport> {
        let cfg = self.cfg.clone();
        let episode_len = cfg.episode_len.max(1);

        // Progress bar is UI only; runner logic does not depend on it.
        let pb = if cfg.verbosity >= 1 {
            let pb = ProgressBar::new(cfg.steps);
            pb.set_style(
                ProgressStyle::with_template(
                    "{bar:40.cyan/blue} {pos:>9}/{len:<9}  {percent:>3}%  {elapsed_precise}  {msg}",
                )
                .context("progress bar template")?
                .progress_chars("=>-"),
            );
            Some(pb)
        } else {
            None
        };

        let mut stats = RolloutStats::new();

        let mut episode_id: u64 = 0;
        let mut world = self.new_world(episode_id)?;
        let mut before = world.to_tensor();

        if cfg.render_ms.is_some() {
            println!("{world}");
        }

        while stats.steps_done < cfg.steps {
            // ------------------------------------------------------------
            // Episode boundary: diff before/after snapshots, then reset.
            // ------------------------------------------------------------
            if stats.ep_len >= episode_len {
                let after = world.to_tensor();
                let changed_cells = stats.on_episode_end(&before, &after);
                debug!(episode_id, changed_cells, "episode finished");

                episode_id += 1;
                world = self.new_world(episode_id)?;
                before = world.to_tensor();

                if cfg.render_ms.is_some() {
                    println!(
                        "=== reset: episodes_finished={} avg_changed={:.2} ===",
                        stats.episodes_finished,
                        stats.avg_changed_cells()
                    );
                    println!("{world}");
                }
                continue;
            }

            // ------------------------------------------------------------
            // One primitive: policy chooses the action.
            // ------------------------------------------------------------
            let Some(action) = policy.choose_action(&world) else {
                // Policy gave up on this world: close the episode early.
                if stats.ep_len == 0 {
                    warn!(episode_id, "policy chose nothing on a fresh world, stopping");
                    break;
                }
                stats.ep_len = episode_len;
                continue;
            };

            let markers_before = world.markers_here();
            let outcome = world.act(action);
            stats.on_step(action, outcome, markers_before, world.markers_here());

            if let Some(ref pb) = pb {
                pb.inc(1);
            }

            if let Some(ms) = cfg.render_ms {
                println!(
                    "step={} action={} outcome={}",
                    stats.steps_done,
                    action.name(),
                    outcome
                );
                println!("{world}");
                if ms > 0 {
                    std::thread::sleep(Duration::from_millis(ms));
                }
            }

            // ------------------------------------------------------------
            // Periodic table report (verbosity == 2 only).
            // ------------------------------------------------------------
            if cfg.verbosity == 2
                && cfg.report_every > 0
                && (stats.steps_done % cfg.report_every == 0)
            {
                let row = ReportRow {
                    step: stats.steps_done,
                    steps_total: cfg.steps,
                    sps: stats.steps_per_sec(),
                    episodes_finished: stats.episodes_finished,
                    blocked_rate: stats.blocked_rate(),
                    pick_hit_rate: stats.pick_hit_rate(),
                    put_hit_rate: stats.put_hit_rate(),
                    avg_changed_cells: stats.avg_changed_cells(),
                    max_changed_cells: stats.changed_cells_max,
                };
                self.sink.on_report_row(&row, pb.as_ref());
            }

            if cfg.verbosity >= 1 && (stats.steps_done % LIVE_EVERY == 0) {
                if let Some(ref pb) = pb {
                    pb.set_message(stats.live_msg(&cfg.policy_name));
                }
            }
        }

        if let Some(pb) = pb {
            pb.finish_with_message("done");
        }

        info!(
            steps = stats.steps_done,
            episodes = stats.episodes_finished,
            "rollout finished"
        );
        Ok(stats.final_report(&cfg.policy_name, cfg.spec.height, cfg.spec.width))
    }
}
