//! Ball Collision entry point
//!
//! Headless frame loop: measures (or fixes) the frame time, advances the
//! world, and hands each frame's snapshot to whoever draws it. Here nobody
//! draws; the averaged FPS and contact counts are logged instead.

use std::path::PathBuf;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;

use ball_collision::consts::MAX_FRAME_TIME;
use ball_collision::{FpsCounter, FrameReport, SimConfig, World};

#[derive(Parser)]
#[command(name = "ball-collision", about = "Bouncing balls in a box, headless")]
struct Cli {
    /// JSON config file (defaults are used for missing fields)
    #[arg(long)]
    config: Option<PathBuf>,

    /// RNG seed for the initial population (default: current time)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of frames to run
    #[arg(long, default_value_t = 600)]
    frames: u64,

    /// Target frame rate the loop paces itself to
    #[arg(long, default_value_t = 60.0, value_parser = parse_frame_rate)]
    frame_rate: f32,

    /// Feed a constant frame time (seconds) instead of measuring it
    #[arg(long, value_parser = parse_frame_time)]
    fixed_dt: Option<f32>,

    /// Log a summary every N frames
    #[arg(long, default_value_t = 60)]
    report_every: u64,

    /// Write the final ball snapshot here as JSON
    #[arg(long)]
    snapshot: Option<PathBuf>,
}

/// Positive rate whose frame period is a representable duration
fn parse_frame_rate(s: &str) -> std::result::Result<f32, String> {
    let rate: f32 = s.parse().map_err(|e| format!("{e}"))?;
    if !(rate.is_finite() && rate > 0.0) {
        return Err(format!("frame rate must be positive, got {rate}"));
    }
    Duration::try_from_secs_f32(1.0 / rate)
        .map(|_| rate)
        .map_err(|_| format!("frame rate {rate} is too small"))
}

/// Finite, non-negative seconds
fn parse_frame_time(s: &str) -> std::result::Result<f32, String> {
    let secs: f32 = s.parse().map_err(|e| format!("{e}"))?;
    if secs.is_finite() && secs >= 0.0 {
        Ok(secs)
    } else {
        Err(format!("frame time must be finite and >= 0, got {secs}"))
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => SimConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => SimConfig::default(),
    };

    let seed = cli.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    });

    let mut world = World::new(config, seed).context("building world")?;
    log::info!(
        "Ball Collision v{}: {} balls, time quantum {:.5}s",
        env!("CARGO_PKG_VERSION"),
        world.balls().len(),
        world.time_quantum()
    );

    run(&mut world, &cli);

    if let Some(path) = &cli.snapshot {
        let json = serde_json::to_string_pretty(&world.snapshot())?;
        std::fs::write(path, json)
            .with_context(|| format!("writing snapshot to {}", path.display()))?;
        log::info!("Snapshot written to {}", path.display());
    }

    Ok(())
}

fn run(world: &mut World, cli: &Cli) {
    let frame_budget = Duration::try_from_secs_f32(1.0 / cli.frame_rate).unwrap_or(Duration::ZERO);
    let report_every = cli.report_every.max(1);

    let mut fps = FpsCounter::new();
    let mut window = FrameReport::default();
    let mut last = Instant::now();

    for frame in 1..=cli.frames {
        let now = Instant::now();
        let measured = now.duration_since(last).as_secs_f32();
        last = now;

        if measured > 0.0 {
            fps.push(1.0 / measured);
        }

        let elapsed = cli.fixed_dt.unwrap_or(measured);
        if elapsed > MAX_FRAME_TIME {
            log::debug!("Clamping frame time {elapsed:.3}s to {MAX_FRAME_TIME}s");
        }
        window.merge(&world.advance(elapsed.min(MAX_FRAME_TIME)));

        // Stand-in for the renderer reading positions
        let drawn = world.snapshot();

        if frame % report_every == 0 {
            log::info!(
                "frame {frame}: fps {:.1}, {} balls drawn, {} contacts ({} resolved), {} wall hits",
                fps.average().unwrap_or(0.0),
                drawn.len(),
                window.contacts,
                window.resolved,
                window.wall_bounces
            );
            window = FrameReport::default();
        }

        // Stand-in for vsync
        let spent = now.elapsed();
        if spent < frame_budget {
            std::thread::sleep(frame_budget - spent);
        }
    }
}
