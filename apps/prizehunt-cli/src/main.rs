use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use glam::Vec3;
use prizehunt_assets::{AssetId, AssetManifest, PrizeLayout};
use prizehunt_input::Action;
use prizehunt_kernel::{
    Experience, LayoutSource, SessionFlags, StandardFactory, World, PICKUP_RADIUS,
    PICKUP_UNLOCK_DELAY, WIN_THRESHOLD,
};
use prizehunt_obstacles::{WaveConfig, WaveDirector};
use prizehunt_track::SessionTracker;
use prizehunt_tools::WorldInspector;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "prizehunt-cli", about = "Headless runner for prizehunt sessions")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and gameplay constants
    Info,
    /// Print the default prize layout as JSON, or write it to a file
    Layout {
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Simulate a session with an autopilot steering toward prizes
    Run(RunArgs),
}

#[derive(clap::Args)]
struct RunArgs {
    /// Maximum number of frames to simulate
    #[arg(short, long, default_value = "7200")]
    frames: u32,
    /// Frame length in milliseconds
    #[arg(long, default_value = "16")]
    dt_ms: u64,
    /// Seed for fox wander and obstacle placement
    #[arg(short, long, default_value = "42")]
    seed: u64,
    /// Prize layout JSON file (defaults to a ring of 14)
    #[arg(long)]
    layout: Option<PathBuf>,
    /// Frames between simulated asset-load completions
    #[arg(long, default_value = "5")]
    load_every: u32,
    /// Pretend a headset is presenting (camera updates are skipped)
    #[arg(long)]
    vr: bool,
    /// Head-mounted view instead of the third-person camera
    #[arg(long)]
    first_person: bool,
    /// Disable obstacle waves
    #[arg(long)]
    no_waves: bool,
    /// Best-times file to append the session time to
    #[arg(long)]
    times_file: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("prizehunt-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("win threshold: {WIN_THRESHOLD} points");
            println!("pickup unlock: {} ms", PICKUP_UNLOCK_DELAY.as_millis());
            println!("pickup radius: {PICKUP_RADIUS}");
            println!("models: {}", AssetManifest::default().models.join(", "));
        }
        Commands::Layout { out } => {
            let layout = PrizeLayout::default();
            match out {
                Some(path) => {
                    layout
                        .save(&path)
                        .with_context(|| format!("writing {}", path.display()))?;
                    println!("wrote {} prizes to {}", layout.len(), path.display());
                }
                None => println!("{}", serde_json::to_string_pretty(&layout)?),
            }
        }
        Commands::Run(args) => run(args)?,
    }

    Ok(())
}

fn run(args: RunArgs) -> anyhow::Result<()> {
    let layout = match &args.layout {
        Some(path) => LayoutSource::File(path.clone()),
        None => LayoutSource::Default,
    };
    let tracker = match &args.times_file {
        Some(path) => SessionTracker::open(path)
            .with_context(|| format!("opening times file {}", path.display()))?,
        None => SessionTracker::in_memory(),
    };
    let session = SessionFlags {
        is_third_person: !args.first_person,
        obstacle_waves_disabled: args.no_waves,
        ..SessionFlags::default()
    };

    let manifest = AssetManifest::default();
    let mut experience = Experience::new()
        .with_resources(manifest.gate())
        .with_session(session)
        .with_tracker(tracker)
        .with_obstacles(WaveDirector::new(WaveConfig {
            seed: args.seed,
            ..WaveConfig::default()
        }))
        .with_factory(StandardFactory {
            layout,
            fox_seed: args.seed,
            ..StandardFactory::default()
        });
    experience.renderer.xr_presenting = args.vr;

    let mut world = World::new(experience);
    let mut pending: Vec<AssetId> = manifest
        .models
        .iter()
        .map(|p| AssetId::for_path(p))
        .collect();
    let dt = Duration::from_millis(args.dt_ms);
    let load_every = args.load_every.max(1);

    println!(
        "Session: seed={}, frames<={}, dt={}ms, vr={}, third_person={}",
        args.seed,
        args.frames,
        args.dt_ms,
        args.vr,
        !args.first_person
    );

    for frame in 0..args.frames {
        if frame % load_every == 0 {
            if let Some(id) = pending.pop() {
                world
                    .asset_loaded(id)
                    .context("building world entities")?;
            }
        }

        steer_toward_nearest_prize(&mut world);
        world.advance(dt);
        world.update(dt.as_secs_f32());

        if frame % 600 == 0 {
            tracing::debug!("{}", WorldInspector::summary(&world));
        }
        if world.has_won() || world.quit_requested() {
            break;
        }
    }

    let summary = WorldInspector::summary(&world);
    println!("{summary}");
    println!("Result: {}", if summary.has_won { "WON" } else { "NOT WON" });

    if let Some(path) = &args.times_file {
        let times = SessionTracker::open(path)?;
        if let Some(best) = times.best_time() {
            println!(
                "Best time: {:.2}s over {} sessions",
                best.as_secs_f32(),
                times.records().len()
            );
        }
    }

    Ok(())
}

/// Point the controls at the closest remaining prize, or stop when none are left.
fn steer_toward_nearest_prize(world: &mut World) {
    let Some(target) = WorldInspector::nearest_prize(world) else {
        world.apply_action(&Action::Steer(Vec3::ZERO));
        return;
    };
    let Some(player) = WorldInspector::summary(world).player_position else {
        return;
    };
    let dir = Vec3::new(target.x - player.x, 0.0, target.z - player.z);
    world.apply_action(&Action::Steer(dir));
}
