//! Single-chunk build: sample the density grid, then extract its surface.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │ build_chunk(coord, spec, sampler)                            │
//! │                                                              │
//! │  origin = coord * chunk_size                                 │
//! │     │                                                        │
//! │     ▼                                                        │
//! │  DensityGrid::build(origin, chunk_size, sampler)             │
//! │     │                                                        │
//! │     ▼                                                        │
//! │  marching_cubes::extract_with(&grid, &spec.extract)          │
//! │     │                                                        │
//! │     ▼                                                        │
//! │  BuiltChunk { coord, mesh, build_us }                        │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Pure with respect to its inputs, so it runs unchanged on the caller's
//! thread or on a pool worker.

use glam::Vec3;
use web_time::Instant;

use crate::config::TerrainConfig;
use crate::density::{DensityGrid, DensitySampler};
use crate::error::{Result, TerrainError};
use crate::marching_cubes::{self, ExtractConfig};
use crate::types::{ChunkCoord, MeshOutput};

/// Per-chunk build parameters, copied into worker tasks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChunkSpec {
  pub chunk_size: [u32; 3],
  pub extract: ExtractConfig,
}

impl ChunkSpec {
  #[inline]
  pub fn chunk_size_vec(&self) -> Vec3 {
    Vec3::new(
      self.chunk_size[0] as f32,
      self.chunk_size[1] as f32,
      self.chunk_size[2] as f32,
    )
  }
}

impl From<&TerrainConfig> for ChunkSpec {
  fn from(config: &TerrainConfig) -> Self {
    Self {
      chunk_size: config.chunk_size,
      extract: ExtractConfig::new(config.threshold).with_weld_vertices(config.weld_vertices),
    }
  }
}

/// A finished chunk mesh.
#[derive(Debug)]
pub struct BuiltChunk {
  pub coord: ChunkCoord,
  /// Chunk-local positions.
  pub mesh: MeshOutput,
  /// Grid build plus extraction time in microseconds.
  pub build_us: u64,
}

/// Build the mesh for `coord`.
///
/// Failures are wrapped in [`TerrainError::ChunkBuild`] naming the chunk.
#[cfg_attr(feature = "instrument", tracing::instrument(skip_all, name = "pipeline::build_chunk"))]
pub fn build_chunk<S: DensitySampler + ?Sized>(coord: ChunkCoord, spec: &ChunkSpec, sampler: &S) -> Result<BuiltChunk> {
  let start = Instant::now();

  let mesh = build_mesh(coord, spec, sampler).map_err(|source| TerrainError::ChunkBuild {
    coord,
    source: Box::new(source),
  })?;

  let build_us = start.elapsed().as_micros() as u64;
  tracing::trace!(%coord, triangles = mesh.triangle_count(), build_us, "chunk built");

  Ok(BuiltChunk { coord, mesh, build_us })
}

fn build_mesh<S: DensitySampler + ?Sized>(coord: ChunkCoord, spec: &ChunkSpec, sampler: &S) -> Result<MeshOutput> {
  let origin = coord.origin(spec.chunk_size_vec());
  let grid = DensityGrid::build(origin, spec.chunk_size, sampler)?;
  marching_cubes::extract_with(&grid, &spec.extract)
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod pipeline_test;
