// rust/karel_cli/src/main.rs
#![forbid(unsafe_code)]

mod rollout;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::{Args as ClapArgs, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::rollout::{NoopSink, RolloutSink, Runner, RunnerConfig, TableSink};
use karel_engine::{
    MarkerBag, Policy, Primitive, RandomPolicy, RandomWorldSpec, RenderOptions,
    WallFollowerPolicy, World, WorldOptions,
};

#[derive(Parser, Debug)]
#[command(name = "karel_cli")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a random world and print it.
    Random {
        #[command(flatten)]
        world: WorldArgs,

        /// Seed for the generator. If omitted, a fixed default is used.
        #[arg(long)]
        seed: Option<u64>,

        /// Also write the (H, W, 16) tensor as JSON.
        #[arg(long, value_name = "path")]
        save: Option<PathBuf>,

        #[command(flatten)]
        view: ViewArgs,
    },

    /// Render a map text file or a tensor JSON file.
    Show {
        /// `.json` files are read as tensors, anything else as map text.
        path: PathBuf,

        #[command(flatten)]
        view: ViewArgs,
    },

    /**
     * Run a comma-separated list of primitives against a world and print each outcome.
     * Examples:
     *   exec --map demos/maps/corridor.txt --program move,pickMarker,turn_left
     *   exec --seed 7 --program front_is_clear,move --save after.json
     */
    Exec {
        /// Start from a map file instead of a random world.
        #[arg(long, value_name = "path", conflicts_with = "tensor")]
        map: Option<PathBuf>,

        /// Start from a tensor JSON file instead of a random world.
        #[arg(long, value_name = "path")]
        tensor: Option<PathBuf>,

        #[command(flatten)]
        world: WorldArgs,

        #[arg(long)]
        seed: Option<u64>,

        /// Primitive names (snake_case or camelCase), comma separated.
        #[arg(long, value_delimiter = ',', required = true)]
        program: Vec<String>,

        /// Log every primitive on the `karel::trace` target.
        #[arg(long)]
        trace: bool,

        /// Write the resulting tensor as JSON.
        #[arg(long, value_name = "path")]
        save: Option<PathBuf>,

        #[command(flatten)]
        view: ViewArgs,
    },

    /// Drive a policy over freshly generated worlds and report statistics.
    Rollout(RolloutArgs),
}

/// Random-world generation knobs shared by the subcommands.
#[derive(ClapArgs, Debug)]
struct WorldArgs {
    /// JSON `RandomWorldSpec`; explicit flags below override its fields.
    #[arg(long, value_name = "path")]
    spec_file: Option<PathBuf>,

    #[arg(long)]
    height: Option<usize>,

    #[arg(long)]
    width: Option<usize>,

    #[arg(long)]
    wall_ratio: Option<f64>,

    #[arg(long)]
    marker_ratio: Option<f64>,

    /// Give the hero a finite bag with this many markers (default: unbounded).
    #[arg(long, value_name = "n")]
    bag: Option<u32>,
}

impl WorldArgs {
    fn spec(&self) -> anyhow::Result<RandomWorldSpec> {
        let mut spec = match &self.spec_file {
            Some(path) => read_spec_file(path)?,
            None => RandomWorldSpec::default(),
        };
        if let Some(h) = self.height {
            spec.height = h;
        }
        if let Some(w) = self.width {
            spec.width = w;
        }
        if let Some(r) = self.wall_ratio {
            spec.wall_ratio = r;
        }
        if let Some(r) = self.marker_ratio {
            spec.marker_ratio = r;
        }
        Ok(spec)
    }

    fn options(&self) -> WorldOptions {
        WorldOptions {
            marker_bag: self.bag.map_or(MarkerBag::Unbounded, MarkerBag::Bounded),
            ..WorldOptions::default()
        }
    }
}

#[derive(ClapArgs, Debug)]
struct ViewArgs {
    /// ANSI colors for hero, markers and prefix.
    #[arg(long)]
    color: bool,

    /// Draw every marker stack as `o` instead of its count.
    #[arg(long)]
    skip_number: bool,
}

impl ViewArgs {
    fn render_options(&self, prefix: &str) -> RenderOptions {
        RenderOptions {
            prefix: prefix.to_string(),
            skip_number: self.skip_number,
            with_color: self.color,
        }
    }
}

#[derive(ClapArgs, Debug)]
struct RolloutArgs {
    // ---------------- rollout sizing ----------------
    /// Total primitive actions to execute across episodes.
    #[arg(long, default_value_t = 10_000)]
    steps: u64,

    /// Actions per episode before a fresh world is generated.
    #[arg(long, default_value_t = 50)]
    episode_len: u64,

    /// Base RNG seed (episodes use base_seed + episode_id). If omitted, a fixed default is used.
    #[arg(long)]
    seed: Option<u64>,

    /// Policy: random | wall-follower | collector
    #[arg(long, default_value = "random")]
    policy: String,

    #[command(flatten)]
    world: WorldArgs,

    // ---------------- visualization ----------------
    /**
     * Render the world as ASCII every step; value is sleep in ms (e.g. 30).
     * Omit to disable rendering.
     * Examples:
     *   --render 0    (render as fast as possible)
     *   --render 30   (sleep 30ms between frames)
     */
    #[arg(long, value_name = "ms")]
    render: Option<u64>,

    // ---------------- output / reporting ----------------
    /// Verbosity: 0=silent (final summary only), 1=progress bar, 2=progress bar + periodic table.
    #[arg(long, default_value_t = 1)]
    verbosity: u8,

    /// Print a table row every N steps (only used with --verbosity 2).
    #[arg(long, default_value_t = 2000)]
    report_every: u64,
}

const DEFAULT_SEED: u64 = 12345;

fn read_spec_file(path: &Path) -> anyhow::Result<RandomWorldSpec> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("read spec file {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse spec file {}", path.display()))
}

fn load_world(path: &Path, options: WorldOptions) -> anyhow::Result<World> {
    let is_tensor = path.extension().is_some_and(|e| e.eq_ignore_ascii_case("json"));
    let world = if is_tensor {
        World::from_tensor_file(path, options)
    } else {
        World::from_map_file(path, options)
    };
    world.with_context(|| format!("load world from {}", path.display()))
}

fn print_world(world: &World, view: &ViewArgs, prefix: &str) {
    for line in world.render(&view.render_options(prefix)) {
        println!("{line}");
    }
}

fn save_tensor(world: &World, path: &Path) -> anyhow::Result<()> {
    world
        .write_tensor_file(path)
        .with_context(|| format!("write tensor to {}", path.display()))?;
    info!(path = %path.display(), "tensor saved");
    Ok(())
}

fn run_random(
    world: &WorldArgs,
    seed: Option<u64>,
    save: Option<&Path>,
    view: &ViewArgs,
) -> anyhow::Result<()> {
    let spec = world.spec()?;
    let w = World::random_seeded(&spec, seed.unwrap_or(DEFAULT_SEED), world.options())
        .context("generate random world")?;
    print_world(&w, view, "");
    if let Some(path) = save {
        save_tensor(&w, path)?;
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn run_exec(
    map: Option<&Path>,
    tensor: Option<&Path>,
    world: &WorldArgs,
    seed: Option<u64>,
    program: &[String],
    trace: bool,
    save: Option<&Path>,
    view: &ViewArgs,
) -> anyhow::Result<()> {
    // Parse the whole program up front so a typo fails before anything runs.
    let prims = program
        .iter()
        .map(|name| name.trim().parse::<Primitive>())
        .collect::<Result<Vec<_>, _>>()?;

    let options = WorldOptions {
        trace,
        ..world.options()
    };
    let mut w = match (map, tensor) {
        (Some(path), _) | (None, Some(path)) => load_world(path, options)?,
        (None, None) => {
            let spec = world.spec()?;
            World::random_seeded(&spec, seed.unwrap_or(DEFAULT_SEED), options)
                .context("generate random world")?
        }
    };

    print_world(&w, view, "before: ");
    for (i, p) in prims.iter().enumerate() {
        match *p {
            Primitive::Action(a) => println!("{i:>4} {:<20} {}", a.name(), w.act(a)),
            Primitive::Sensor(s) => println!("{i:>4} {:<20} {}", s.name(), w.sense(s)),
        }
    }
    print_world(&w, view, "after:  ");

    if let Some(path) = save {
        save_tensor(&w, path)?;
    }
    Ok(())
}

fn run_rollout(args: &RolloutArgs) -> anyhow::Result<()> {
    // Episode seeds are derived from this base seed.
    let base_seed = args.seed.unwrap_or(DEFAULT_SEED);

    // Policy instance (boxed so the CLI can switch implementations at runtime).
    let mut policy: Box<dyn Policy> = match args.policy.as_str() {
        "random" => Box::new(RandomPolicy::new(base_seed.wrapping_add(999))),
        "wall-follower" => Box::new(WallFollowerPolicy::new(false)),
        "collector" => Box::new(WallFollowerPolicy::new(true)),
        other => bail!("unknown policy {other:?} (expected random | wall-follower | collector)"),
    };

    // Rollout configuration (data only; no logic).
    let cfg = RunnerConfig {
        steps: args.steps,
        episode_len: args.episode_len,
        base_seed,
        spec: args.world.spec()?,
        world: args.world.options(),

        policy_name: args.policy.clone(),

        verbosity: args.verbosity,
        report_every: args.report_every,

        render_ms: args.render,
    };

    // Reporting sink:
    // - verbosity 2 => periodic table (unless report_every == 0)
    // - otherwise   => no-op
    let sink: Box<dyn RolloutSink> = if cfg.verbosity >= 2 && cfg.report_every > 0 {
        Box::new(TableSink::new(20))
    } else {
        Box::new(NoopSink)
    };

    let mut runner = Runner::new(cfg, sink);
    let report = runner.run(&mut *policy)?;

    // Final one-line summary (useful for logs / grep).
    println!(
        "DONE: policy={} size={}x{} steps_done={} elapsed={:.3}s steps/s={:.1} episodes_finished={} blocked_rate={:.3} pick_hit_rate={:.3} put_hit_rate={:.3} avg_changed_cells={:.2} max_changed_cells={}",
        report.policy,
        report.height,
        report.width,
        report.steps_done,
        report.elapsed_s,
        report.steps_per_s,
        report.episodes_finished,
        report.blocked_rate,
        report.pick_hit_rate,
        report.put_hit_rate,
        report.avg_changed_cells,
        report.max_changed_cells,
    );
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match &cli.command {
        Command::Random {
            world,
            seed,
            save,
            view,
        } => run_random(world, *seed, save.as_deref(), view),
        Command::Show { path, view } => {
            let w = load_world(path, WorldOptions::default())?;
            print_world(&w, view, "");
            Ok(())
        }
        Command::Exec {
            map,
            tensor,
            world,
            seed,
            program,
            trace,
            save,
            view,
        } => run_exec(
            map.as_deref(),
            tensor.as_deref(),
            world,
            *seed,
            program,
            *trace,
            save.as_deref(),
            view,
        ),
        Command::Rollout(args) => run_rollout(args),
    }
}
