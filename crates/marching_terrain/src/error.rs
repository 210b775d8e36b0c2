//! Error taxonomy.
//!
//! [`ConfigError`] is the only user-facing failure: it is raised while a
//! store or backend is being set up. The remaining [`TerrainError`] variants
//! are internal invariant violations that a correct build never produces on
//! valid input. They exist so composition bugs surface loudly in tests
//! instead of turning into clamped values or NaN geometry.
//!
//! Grid index violations are not represented here: they panic at the access
//! site (see [`crate::density::DensityGrid::index`]).

use std::path::PathBuf;

use thiserror::Error;

use crate::chunk_store::UpdateReport;
use crate::types::ChunkCoord;

/// Invalid setup parameters.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("chunk size must be positive on every axis, got {0:?}")]
  ChunkSize([u32; 3]),

  #[error("chunk size {size:?} needs {samples} lattice samples, limit is {limit}")]
  ChunkTooLarge { size: [u32; 3], samples: u64, limit: u64 },

  #[error("chunk size {size:?} is not divisible by dispatch granularity {granularity:?}")]
  DispatchGranularity { size: [u32; 3], granularity: [u32; 3] },

  #[error("view distance must be positive and finite, got {0}")]
  ViewDistance(f32),

  #[error("noise scale must be positive and finite, got {0}")]
  Scale(f32),

  #[error("octave count must be at least 1")]
  OctaveCount,

  #[error("persistence must lie in (0, 1), got {0}")]
  Persistence(f32),

  #[error("lacunarity must be greater than 1, got {0}")]
  Lacunarity(f32),

  #[error("threshold must be finite, got {0}")]
  Threshold(f32),

  #[error("failed to read config file {path}")]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to parse config TOML")]
  Parse(#[from] toml::de::Error),
}

/// Errors produced by the terrain core.
#[derive(Debug, Error)]
pub enum TerrainError {
  #[error(transparent)]
  Config(#[from] ConfigError),

  /// Octave sum left `[0, max]` even though every primitive is bounded.
  #[error("octave noise sum {raw} outside theoretical range [0, {max}]")]
  NoiseOutOfRange { raw: f32, max: f32 },

  /// Both endpoints of a crossing edge have the same offset from threshold.
  #[error("degenerate edge {edge} in cell {cell:?}: endpoints have equal density")]
  DegenerateEdge { edge: usize, cell: [u32; 3] },

  /// A density sample came back NaN or infinite.
  #[error("non-finite density {value} at {position:?}")]
  NonFiniteDensity { value: f32, position: [f32; 3] },

  /// Building the mesh for `coord` failed.
  #[error("chunk {coord} failed to build")]
  ChunkBuild {
    coord: ChunkCoord,
    #[source]
    source: Box<TerrainError>,
  },

  /// An update ran to completion but some chunks failed to build. The
  /// report still describes every state change the update made.
  #[error("{} chunk(s) failed to build around {}", .report.failed.len(), .report.viewer_coord)]
  PartialUpdate {
    report: Box<UpdateReport>,
    #[source]
    source: Box<TerrainError>,
  },
}

pub type Result<T, E = TerrainError> = std::result::Result<T, E>;
