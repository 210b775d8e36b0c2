//! Marching cubes iso-surface extraction.
//!
//! Converts a [`DensityGrid`] and a threshold into a triangle mesh whose
//! surface separates lattice samples above the threshold from those at or
//! below it.
//!
//! # Processing Pipeline
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        INPUT                                    │
//! │  grid: DensityGrid        - (w+1)×(h+1)×(d+1) samples           │
//! │  threshold: f32           - iso-level                           │
//! │  weld: bool               - share vertices on lattice edges     │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    PHASE 1: Classification                      │
//! │  For each cell:                                                 │
//! │    Load 8 corner samples                                        │
//! │    Bit i set iff sample[i] > threshold                          │
//! │    Early-out if configuration is 0 or 255                       │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    PHASE 2: Edge Interpolation                  │
//! │  For each edge in EDGE_TABLE[config]:                           │
//! │    t = a / (a - b),  a, b = endpoint density - threshold        │
//! │    point = p0 + t * (p1 - p0)                                   │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    PHASE 3: Triangulation                       │
//! │  For each edge triple in TRI_TABLE[config], reversed:           │
//! │    soup: append three fresh vertices                            │
//! │    weld: look up or insert one vertex per lattice edge          │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        OUTPUT                                   │
//! │  vertices: Vec<[f32; 3]>  - chunk-local positions               │
//! │  indices: Vec<u32>        - 3 per triangle                      │
//! │  bounds: AABB                                                   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Edges are always interpolated from their lower lattice corner to their
//! upper one, so two cells that share an edge compute bit-identical points.

mod classify;
mod interpolate;
mod weld;

pub use classify::configuration;
pub use interpolate::edge_point;
pub use weld::EdgeKey;

use glam::Vec3;

use crate::constants::{corner_lattice, CORNER_COUNT, EDGE_COUNT};
use crate::density::DensityGrid;
use crate::edge_table::{triangles, EDGE_TABLE};
use crate::error::Result;
use crate::types::MeshOutput;

/// Extraction parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExtractConfig {
  pub threshold: f32,
  pub weld_vertices: bool,
}

impl Default for ExtractConfig {
  fn default() -> Self {
    Self {
      threshold: 0.5,
      weld_vertices: false,
    }
  }
}

impl ExtractConfig {
  pub fn new(threshold: f32) -> Self {
    Self {
      threshold,
      ..Self::default()
    }
  }

  pub fn with_threshold(mut self, threshold: f32) -> Self {
    self.threshold = threshold;
    self
  }

  pub fn with_weld_vertices(mut self, weld: bool) -> Self {
    self.weld_vertices = weld;
    self
  }
}

/// Extract a triangle soup: every triangle owns three vertices.
pub fn extract(grid: &DensityGrid, threshold: f32) -> Result<MeshOutput> {
  extract_with(grid, &ExtractConfig::new(threshold))
}

/// Extract with explicit options.
///
/// Cells are visited x-major, then y, then z; triangles of one cell are
/// emitted in table order with each triple reversed, so face normals point
/// away from samples above the threshold. Output is deterministic for a
/// given grid.
#[cfg_attr(feature = "instrument", tracing::instrument(skip_all, name = "marching_cubes::extract"))]
pub fn extract_with(grid: &DensityGrid, config: &ExtractConfig) -> Result<MeshOutput> {
  let mut output = MeshOutput::new();
  let mut welder = config.weld_vertices.then(weld::Welder::new);
  let [w, h, d] = grid.cells();

  for x in 0..w {
    for y in 0..h {
      for z in 0..d {
        process_cell(grid, [x, y, z], config.threshold, welder.as_mut(), &mut output)?;
      }
    }
  }

  Ok(output)
}

/// Classify, interpolate and triangulate a single cell.
fn process_cell(
  grid: &DensityGrid,
  cell: [u32; 3],
  threshold: f32,
  mut welder: Option<&mut weld::Welder>,
  output: &mut MeshOutput,
) -> Result<()> {
  let samples: [f32; CORNER_COUNT] = std::array::from_fn(|i| grid.get(corner_lattice(cell, i)));

  let config = configuration(&samples, threshold);
  if config == 0 || config == 255 {
    return Ok(());
  }

  // Each crossing edge is interpolated once and shared by every triangle
  // of this cell that references it.
  let cell_origin = Vec3::new(cell[0] as f32, cell[1] as f32, cell[2] as f32);
  let edge_mask = EDGE_TABLE[config as usize];
  let mut points = [Vec3::ZERO; EDGE_COUNT];
  for (edge, point) in points.iter_mut().enumerate() {
    if edge_mask & (1 << edge) != 0 {
      *point = cell_origin + edge_point(&samples, edge, threshold, cell)?;
    }
  }

  // Table triples face the dense side; emit them reversed so faces look
  // out of the solid.
  for [e0, e1, e2] in triangles(config) {
    for edge in [e0, e2, e1] {
      let index = match welder.as_deref_mut() {
        Some(welder) => welder.vertex(EdgeKey::new(cell, edge), points[edge], output),
        None => output.push_vertex(points[edge]),
      };
      output.indices.push(index);
    }
  }

  Ok(())
}

#[cfg(test)]
#[path = "interpolate_test.rs"]
mod interpolate_test;
