//! Headless terrain streaming driver.
//!
//! Walks a simulated viewer across the terrain, calls `tick` once per frame
//! and logs what the store did. Stands in for a renderer: it only counts
//! geometry instead of uploading it.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec3;
use log::{debug, info, warn};
use marching_terrain::{BuildMode, ChunkStore, NoiseMode, PlaneTerrain, TerrainConfig, TerrainError};

/// Stream marching-cubes terrain around a moving viewer.
#[derive(Parser, Debug)]
#[command(name = "terrain_demo")]
#[command(about = "Walks a viewer through streamed marching-cubes terrain")]
struct Args {
  /// Path to a configuration TOML file (defaults when omitted).
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// Number of simulated frames.
  #[arg(short, long, default_value_t = 240)]
  frames: u32,

  /// Viewer speed in world units per frame.
  #[arg(short, long, default_value_t = 1.5)]
  speed: f32,

  /// Override the view distance from the config.
  #[arg(long)]
  view_distance: Option<f32>,

  /// Build chunks on the rayon pool.
  #[arg(long)]
  pooled: bool,

  /// Use the volumetric noise primitive.
  #[arg(long)]
  volumetric: bool,

  /// Simulated frame time in milliseconds (gives pooled builds time to land).
  #[arg(long, default_value_t = 0)]
  frame_ms: u64,
}

fn main() -> Result<()> {
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

  let args = Args::parse();
  let config = load_config(&args)?;
  let view_distance = config.view_distance;

  let terrain = PlaneTerrain::new(config.noise.clone()).context("invalid noise parameters")?;
  let mut store = ChunkStore::new(config, terrain).context("invalid terrain configuration")?;

  info!(
    "walking {} frames at {} units/frame, view distance {}",
    args.frames, args.speed, view_distance
  );

  let mut triangles_active = 0usize;
  for frame in 0..args.frames {
    let viewer = viewer_path(frame, args.speed);

    let report = match store.tick(viewer) {
      Ok(report) => report,
      Err(TerrainError::PartialUpdate { report, source }) => {
        warn!("frame {}: {} chunk(s) failed: {:#}", frame, report.failed.len(), anyhow::Error::new(*source));
        *report
      }
      Err(err) => return Err(err).context("terrain update failed"),
    };

    for coord in report.activated() {
      if let Some(chunk) = store.get(&coord) {
        triangles_active += chunk.mesh().triangle_count();
      }
    }
    for coord in report.deactivated() {
      if let Some(chunk) = store.get(&coord) {
        triangles_active = triangles_active.saturating_sub(chunk.mesh().triangle_count());
      }
    }

    if !report.is_quiet() {
      debug!(
        "frame {} viewer {} (chunk {}): +{} active, -{} active, {} built, {} requested",
        frame,
        viewer,
        report.viewer_coord,
        report.activated().count(),
        report.deactivated().count(),
        report.created().count(),
        report.requested
      );
    }

    if args.frame_ms > 0 {
      std::thread::sleep(Duration::from_millis(args.frame_ms));
    }
  }

  let metrics = store.metrics();
  info!(
    "done: {} cached, {} active, {} in flight, {} triangles visible",
    store.len(),
    store.active_count(),
    store.in_flight_count(),
    triangles_active
  );
  info!(
    "built {} chunks ({} triangles), avg build {:.1} us, avg update {:.1} us",
    store.constructed_count(),
    metrics.triangles_built,
    metrics.avg_build_us(),
    metrics.avg_update_us()
  );

  Ok(())
}

fn load_config(args: &Args) -> Result<TerrainConfig> {
  let mut config = match &args.config {
    Some(path) => {
      info!("loading config from {}", path.display());
      TerrainConfig::load(path).with_context(|| format!("failed to load {}", path.display()))?
    }
    None => TerrainConfig::default(),
  };

  if let Some(distance) = args.view_distance {
    config = config.with_view_distance(distance);
  }
  if args.pooled {
    config = config.with_build_mode(BuildMode::Pooled);
  }
  if args.volumetric {
    config.noise = config.noise.with_mode(NoiseMode::Volumetric);
  }

  config.validate().context("invalid configuration")?;
  Ok(config)
}

/// Slow spiral around the origin at the horizon height.
fn viewer_path(frame: u32, speed: f32) -> Vec3 {
  let distance = frame as f32 * speed;
  let angle = distance * 0.01;
  Vec3::new(angle.cos() * distance * 0.5, 2.0, angle.sin() * distance * 0.5)
}
