//! Viewer-centred chunk streaming.
//!
//! The store keeps every chunk it has ever built. Each `update` recomputes
//! the box of chunks around the viewer and flips chunks between active and
//! inactive; meshes are never rebuilt or evicted.
//!
//! # Update Flow
//!
//! ```text
//! viewer ──► viewer_coord = floor(viewer / chunk_size)
//!            range        = ceil(view_distance / chunk_size)
//!                 │
//!                 ▼
//! ┌───────────────────────────────────────────────────────────┐
//! │ 1. Publish   (pooled) drain finished builds, cache them,  │
//! │              activate those still inside the box          │
//! ├───────────────────────────────────────────────────────────┤
//! │ 2. Retire    deactivate active chunks outside the box     │
//! ├───────────────────────────────────────────────────────────┤
//! │ 3. Require   for each coord in the box:                   │
//! │                cached   → activate                        │
//! │                missing  → build inline, or request a      │
//! │                           pooled build                    │
//! │                failed   → skip until it leaves the box    │
//! └───────────────────────────────────────────────────────────┘
//!                 │
//!                 ▼
//!           UpdateReport { events: Created | Activated | Deactivated }
//! ```
//!
//! The box is a Chebyshev neighbourhood: `|c - viewer_coord| <= range` on
//! each axis independently. Its corners lie further than `view_distance`
//! from the viewer.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use glam::Vec3;
use tracing::{debug, error, info};
use web_time::Instant;

use crate::build_queue::{BuildCompletion, BuildQueue};
use crate::config::{chunk_range, validate_view_distance, BuildMode, TerrainConfig};
use crate::density::DensitySampler;
use crate::error::{Result, TerrainError};
use crate::metrics::StreamingMetrics;
use crate::pipeline::{build_chunk, BuiltChunk, ChunkSpec};
use crate::types::{ChunkCoord, MeshOutput};

// =============================================================================
// Chunk
// =============================================================================

/// A built chunk. The mesh is immutable once built.
#[derive(Clone, Debug)]
pub struct Chunk {
  coord: ChunkCoord,
  origin: Vec3,
  mesh: Arc<MeshOutput>,
  active: bool,
}

impl Chunk {
  #[inline]
  pub fn coord(&self) -> ChunkCoord {
    self.coord
  }

  /// World-space placement of the mesh: `coord * chunk_size`.
  #[inline]
  pub fn origin(&self) -> Vec3 {
    self.origin
  }

  /// Chunk-local geometry. Add [`origin`](Self::origin) for world space.
  #[inline]
  pub fn mesh(&self) -> &Arc<MeshOutput> {
    &self.mesh
  }

  #[inline]
  pub fn is_active(&self) -> bool {
    self.active
  }
}

// =============================================================================
// Update report
// =============================================================================

/// Visibility change produced by an update.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChunkEvent {
  /// A mesh was built and cached.
  Created(ChunkCoord),
  Activated(ChunkCoord),
  Deactivated(ChunkCoord),
}

impl ChunkEvent {
  pub fn coord(&self) -> ChunkCoord {
    match *self {
      ChunkEvent::Created(c) | ChunkEvent::Activated(c) | ChunkEvent::Deactivated(c) => c,
    }
  }
}

/// What one `update` did, in the order it happened.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UpdateReport {
  pub viewer_coord: ChunkCoord,
  /// Half-extent of the required box, in chunks.
  pub range: [i32; 3],
  pub events: Vec<ChunkEvent>,
  /// Pooled builds started by this update.
  pub requested: usize,
  /// Chunks whose build failed during this update.
  pub failed: Vec<ChunkCoord>,
}

impl UpdateReport {
  pub fn created(&self) -> impl Iterator<Item = ChunkCoord> + '_ {
    self.events.iter().filter_map(|e| match e {
      ChunkEvent::Created(c) => Some(*c),
      _ => None,
    })
  }

  pub fn activated(&self) -> impl Iterator<Item = ChunkCoord> + '_ {
    self.events.iter().filter_map(|e| match e {
      ChunkEvent::Activated(c) => Some(*c),
      _ => None,
    })
  }

  pub fn deactivated(&self) -> impl Iterator<Item = ChunkCoord> + '_ {
    self.events.iter().filter_map(|e| match e {
      ChunkEvent::Deactivated(c) => Some(*c),
      _ => None,
    })
  }

  /// True if nothing changed and nothing failed.
  pub fn is_quiet(&self) -> bool {
    self.events.is_empty() && self.requested == 0 && self.failed.is_empty()
  }
}

/// Every coordinate of the box of half-extent `range` around `center`,
/// x-major, then y, then z.
pub fn required_coords(center: ChunkCoord, range: [i32; 3]) -> impl Iterator<Item = ChunkCoord> {
  let [rx, ry, rz] = range;
  (-rx..=rx).flat_map(move |dx| {
    (-ry..=ry).flat_map(move |dy| (-rz..=rz).map(move |dz| center.offset(dx, dy, dz)))
  })
}

// =============================================================================
// ChunkStore
// =============================================================================

/// Cache of built chunks plus the set currently active around the viewer.
///
/// Single-owner: all methods run on the caller's thread. With
/// [`BuildMode::Pooled`] only the grid build and extraction move to rayon
/// workers; publication still happens here, inside `update`.
pub struct ChunkStore<S> {
  config: TerrainConfig,
  spec: ChunkSpec,
  sampler: Arc<S>,
  chunks: HashMap<ChunkCoord, Chunk>,
  active: HashSet<ChunkCoord>,
  queue: Option<BuildQueue<S>>,
  metrics: StreamingMetrics,
  constructed: u64,
  viewer_coord: Option<ChunkCoord>,
  /// Coordinates whose last build failed; skipped while they stay in view.
  failed: HashSet<ChunkCoord>,
}

impl<S: DensitySampler + 'static> ChunkStore<S> {
  /// Validate `config` and create an empty store.
  pub fn new(config: TerrainConfig, sampler: S) -> Result<Self> {
    Self::with_shared_sampler(config, Arc::new(sampler))
  }

  pub fn with_shared_sampler(config: TerrainConfig, sampler: Arc<S>) -> Result<Self> {
    config.validate()?;

    let spec = ChunkSpec::from(&config);
    let queue = match config.build_mode {
      BuildMode::Inline => None,
      BuildMode::Pooled => Some(BuildQueue::new(Arc::clone(&sampler), spec)),
    };

    info!(
      chunk_size = ?config.chunk_size,
      view_distance = config.view_distance,
      threshold = config.threshold,
      build_mode = ?config.build_mode,
      "chunk store created"
    );

    Ok(Self {
      config,
      spec,
      sampler,
      chunks: HashMap::new(),
      active: HashSet::new(),
      queue,
      metrics: StreamingMetrics::new(),
      constructed: 0,
      viewer_coord: None,
      failed: HashSet::new(),
    })
  }

  /// [`update`](Self::update) with the configured view distance.
  pub fn tick(&mut self, viewer: Vec3) -> Result<UpdateReport> {
    self.update(viewer, self.config.view_distance)
  }

  /// Bring the active set in line with the box around `viewer`.
  ///
  /// A chunk whose build fails does not stop the update: every other chunk
  /// is still built, published and activated, and the update finishes
  /// normally. The failures are then returned as
  /// [`TerrainError::PartialUpdate`], which carries the full report. A
  /// failed coordinate is not rebuilt while it stays inside the box; it is
  /// retried once it has left and re-entered view, or after
  /// [`retry_failed`](Self::retry_failed).
  #[cfg_attr(feature = "instrument", tracing::instrument(skip_all, name = "chunk_store::update"))]
  pub fn update(&mut self, viewer: Vec3, view_distance: f32) -> Result<UpdateReport> {
    validate_view_distance(view_distance)?;
    let start = Instant::now();

    let viewer_coord = ChunkCoord::containing(viewer, self.spec.chunk_size_vec());
    let range = chunk_range(view_distance, self.spec.chunk_size);
    let mut report = UpdateReport {
      viewer_coord,
      range,
      ..UpdateReport::default()
    };

    let mut first_failure = self.publish_completed(viewer_coord, range, &mut report);
    self.failed.retain(|&coord| viewer_coord.within(coord, range));

    let leaving: Vec<ChunkCoord> = self
      .active
      .iter()
      .copied()
      .filter(|&coord| !viewer_coord.within(coord, range))
      .collect();
    for coord in leaving {
      self.deactivate(coord, &mut report);
    }

    for coord in required_coords(viewer_coord, range) {
      if self.chunks.contains_key(&coord) {
        self.activate(coord, &mut report);
        continue;
      }
      if self.failed.contains(&coord) {
        continue;
      }

      if let Some(queue) = self.queue.as_mut() {
        if queue.request(coord) {
          report.requested += 1;
        }
        continue;
      }

      match build_chunk(coord, &self.spec, &*self.sampler) {
        Ok(built) => {
          self.insert(built, &mut report);
          self.activate(coord, &mut report);
        }
        Err(err) => self.record_failure(coord, err, &mut report, &mut first_failure),
      }
    }

    self.viewer_coord = Some(viewer_coord);
    self.finish_update(start, &report);

    match first_failure {
      Some(source) => Err(TerrainError::PartialUpdate {
        report: Box::new(report),
        source: Box::new(source),
      }),
      None => Ok(report),
    }
  }

  /// Cache finished pooled builds; activate the ones still required.
  ///
  /// Returns the first failed build, if any.
  fn publish_completed(
    &mut self,
    viewer_coord: ChunkCoord,
    range: [i32; 3],
    report: &mut UpdateReport,
  ) -> Option<TerrainError> {
    let completions = self.queue.as_mut()?.drain();

    let mut first_failure = None;
    for BuildCompletion { coord, result } in completions {
      match result {
        Ok(built) => {
          self.insert(built, report);
          if viewer_coord.within(coord, range) {
            self.activate(coord, report);
          }
        }
        Err(err) => self.record_failure(coord, err, report, &mut first_failure),
      }
    }

    first_failure
  }

  fn record_failure(
    &mut self,
    coord: ChunkCoord,
    err: TerrainError,
    report: &mut UpdateReport,
    first_failure: &mut Option<TerrainError>,
  ) {
    error!(%coord, error = %err, "chunk build failed");
    self.failed.insert(coord);
    report.failed.push(coord);
    first_failure.get_or_insert(err);
  }

  fn insert(&mut self, built: BuiltChunk, report: &mut UpdateReport) {
    let BuiltChunk { coord, mesh, build_us } = built;
    debug_assert!(!self.chunks.contains_key(&coord), "chunk {} built twice", coord);

    self.metrics.record_build(build_us, mesh.triangle_count());
    self.constructed += 1;

    let chunk = Chunk {
      coord,
      origin: coord.origin(self.spec.chunk_size_vec()),
      mesh: Arc::new(mesh),
      active: false,
    };
    self.chunks.insert(coord, chunk);
    report.events.push(ChunkEvent::Created(coord));
  }

  fn activate(&mut self, coord: ChunkCoord, report: &mut UpdateReport) {
    if let Some(chunk) = self.chunks.get_mut(&coord) {
      if !chunk.active {
        chunk.active = true;
        self.active.insert(coord);
        report.events.push(ChunkEvent::Activated(coord));
      }
    }
  }

  fn deactivate(&mut self, coord: ChunkCoord, report: &mut UpdateReport) {
    if let Some(chunk) = self.chunks.get_mut(&coord) {
      if chunk.active {
        chunk.active = false;
        self.active.remove(&coord);
        report.events.push(ChunkEvent::Deactivated(coord));
      }
    }
  }

  fn finish_update(&mut self, start: Instant, report: &UpdateReport) {
    let update_us = start.elapsed().as_micros() as u64;
    let activated = report.activated().count();
    let deactivated = report.deactivated().count();

    self.metrics.record_update(update_us, activated, deactivated);
    self
      .metrics
      .record_snapshot(self.active.len(), self.chunks.len(), self.in_flight_count());

    if !report.is_quiet() {
      debug!(
        viewer = %report.viewer_coord,
        created = report.created().count(),
        activated,
        deactivated,
        requested = report.requested,
        active = self.active.len(),
        cached = self.chunks.len(),
        update_us,
        "chunk store updated"
      );
    }
  }
}

impl<S> ChunkStore<S> {
  pub fn config(&self) -> &TerrainConfig {
    &self.config
  }

  pub fn sampler(&self) -> &Arc<S> {
    &self.sampler
  }

  pub fn get(&self, coord: &ChunkCoord) -> Option<&Chunk> {
    self.chunks.get(coord)
  }

  pub fn contains(&self, coord: &ChunkCoord) -> bool {
    self.chunks.contains_key(coord)
  }

  /// All cached chunks, active or not, in no particular order.
  pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
    self.chunks.values()
  }

  pub fn active_coords(&self) -> impl Iterator<Item = ChunkCoord> + '_ {
    self.active.iter().copied()
  }

  pub fn active_chunks(&self) -> impl Iterator<Item = &Chunk> {
    self.active.iter().filter_map(|coord| self.chunks.get(coord))
  }

  pub fn is_active(&self, coord: &ChunkCoord) -> bool {
    self.active.contains(coord)
  }

  /// Number of cached chunks.
  pub fn len(&self) -> usize {
    self.chunks.len()
  }

  pub fn is_empty(&self) -> bool {
    self.chunks.is_empty()
  }

  pub fn active_count(&self) -> usize {
    self.active.len()
  }

  /// Total meshes built over the store's lifetime.
  pub fn constructed_count(&self) -> u64 {
    self.constructed
  }

  /// Pooled builds requested but not yet published.
  pub fn in_flight_count(&self) -> usize {
    self.queue.as_ref().map_or(0, |queue| queue.in_flight_count())
  }

  pub fn is_in_flight(&self, coord: &ChunkCoord) -> bool {
    self.queue.as_ref().is_some_and(|queue| queue.is_in_flight(coord))
  }

  /// Viewer chunk of the most recent update.
  /// Coordinates held back after a failed build.
  pub fn failed_coords(&self) -> impl Iterator<Item = ChunkCoord> + '_ {
    self.failed.iter().copied()
  }

  #[inline]
  pub fn is_failed(&self, coord: &ChunkCoord) -> bool {
    self.failed.contains(coord)
  }

  /// Allow every failed coordinate to be built again on the next update.
  pub fn retry_failed(&mut self) {
    self.failed.clear();
  }

  pub fn viewer_coord(&self) -> Option<ChunkCoord> {
    self.viewer_coord
  }

  pub fn metrics(&self) -> &StreamingMetrics {
    &self.metrics
  }
}

#[cfg(test)]
#[path = "chunk_store_test.rs"]
mod chunk_store_test;
