//! marching_terrain - streamed marching-cubes terrain
//!
//! Procedural voxel terrain built from three layers:
//!
//! - **Noise**: bounded octave noise plus a height bias gives a density
//!   field whose iso-surface is a perturbed horizontal plane.
//! - **Marching cubes**: each chunk samples the field on a lattice and
//!   triangulates the threshold crossing with the classic 256-case table.
//! - **Streaming**: a [`ChunkStore`] keeps the box of chunks around a viewer
//!   active, building missing chunks inline or on the rayon pool and caching
//!   every mesh it has built.
//!
//! # Example
//!
//! ```ignore
//! use marching_terrain::{ChunkStore, NoiseParams, PlaneTerrain, TerrainConfig};
//!
//! let config = TerrainConfig::default();
//! let terrain = PlaneTerrain::new(config.noise.clone())?;
//! let mut store = ChunkStore::new(config, terrain)?;
//!
//! // Once per frame.
//! let report = store.tick(viewer_position)?;
//! for coord in report.activated() {
//!   let chunk = store.get(&coord).unwrap();
//!   upload(chunk.origin(), chunk.mesh());
//! }
//! ```

pub mod constants;
pub mod edge_table;
pub mod error;
pub mod types;

pub use constants::{CORNER_OFFSETS, EDGE_SENTINEL};
pub use edge_table::{EDGE_ENDPOINTS, EDGE_TABLE, TRI_TABLE};
pub use error::{ConfigError, Result, TerrainError};
pub use types::{ChunkCoord, MeshOutput, MinMaxAABB};

// Configuration loaded from TOML
pub mod config;
pub use config::{BuildMode, TerrainConfig};

// Octave noise and the terrain density field
pub mod noise;
pub use noise::{CoherentNoise, NoiseMode, NoiseParams, OctaveNoise, PerlinNoise, PlaneTerrain};

// Lattice sampling
pub mod density;
pub use density::{DensityGrid, DensitySampler, FnDensity};

// Iso-surface extraction
pub mod marching_cubes;
pub use marching_cubes::{extract, extract_with, ExtractConfig};

// Grid build + extraction for one chunk
pub mod pipeline;
pub use pipeline::{build_chunk, BuiltChunk, ChunkSpec};

// Pooled builds
pub mod build_queue;
pub use build_queue::{BuildCompletion, BuildQueue};

// Viewer-centred streaming
pub mod chunk_store;
pub use chunk_store::{Chunk, ChunkEvent, ChunkStore, UpdateReport};

pub mod metrics;
pub use metrics::StreamingMetrics;
