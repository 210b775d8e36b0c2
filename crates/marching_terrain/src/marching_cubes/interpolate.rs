//! Threshold crossing along a cell edge.

use glam::Vec3;

use crate::constants::{CORNER_COUNT, CORNER_OFFSETS, CORNER_POSITIONS};
use crate::edge_table::EDGE_ENDPOINTS;
use crate::error::{Result, TerrainError};

/// Cell-local point where `edge` crosses `threshold`.
///
/// Endpoints are ordered from the lower lattice corner to the upper one, then
/// `t = a / (a - b)` with `a`, `b` their densities minus the threshold. For a
/// crossing edge `t` lies in `[0, 1]`. Equal offsets would divide by zero and
/// are reported as [`TerrainError::DegenerateEdge`].
#[inline]
pub fn edge_point(samples: &[f32; CORNER_COUNT], edge: usize, threshold: f32, cell: [u32; 3]) -> Result<Vec3> {
  let [c0, c1] = EDGE_ENDPOINTS[edge];
  let (lo, hi) = if CORNER_OFFSETS[c0 as usize] <= CORNER_OFFSETS[c1 as usize] {
    (c0 as usize, c1 as usize)
  } else {
    (c1 as usize, c0 as usize)
  };

  let a = samples[lo] - threshold;
  let b = samples[hi] - threshold;
  let denom = a - b;
  if denom == 0.0 {
    return Err(TerrainError::DegenerateEdge { edge, cell });
  }

  let t = a / denom;
  let p0 = CORNER_POSITIONS[lo];
  let p1 = CORNER_POSITIONS[hi];
  Ok(p0 + t * (p1 - p0))
}
