//! Cube topology constants shared by grid construction and extraction.
//!
//! # Corner Layout
//!
//! ```text
//!         3──────2          Corners (x, y, z):
//!        /│     /│            0=(0,0,0)  1=(1,0,0)  2=(1,1,0)  3=(0,1,0)
//!       7─┼────6 │            4=(0,0,1)  5=(1,0,1)  6=(1,1,1)  7=(0,1,1)
//!       │ 0────┼─1
//!       │/     │/           +Y
//!       4──────5             │  -Z
//!                            │ /
//!                            └───+X
//! ```
//!
//! Corners 0-3 walk the `z = 0` face counter-clockwise seen from -Z, corners
//! 4-7 repeat the walk on the `z = 1` face. This is the ordering the
//! triangulation table in [`crate::edge_table`] was authored against.
//!
//! # Density Grid Layout
//!
//! ```text
//! Grid memory layout (row-major, Z innermost):
//!
//! index = (x * samples_y + y) * samples_z + z
//!
//! samples_* = cells_* + 1   (one sample per cell corner)
//! ```

use glam::Vec3;

/// Number of corners of a unit cell.
pub const CORNER_COUNT: usize = 8;

/// Number of edges of a unit cell.
pub const EDGE_COUNT: usize = 12;

/// Number of distinct corner classifications (2^8).
pub const CONFIGURATION_COUNT: usize = 256;

/// Maximum triangles any configuration emits.
pub const MAX_TRIANGLES_PER_CELL: usize = 5;

/// Width of one triangulation table row (5 triangles × 3 edges + sentinel).
pub const TRIANGLE_ROW_WIDTH: usize = 16;

/// Marks the end of a triangulation table row.
pub const EDGE_SENTINEL: i8 = -1;

/// Upper bound on lattice samples per chunk, `(w + 1) * (h + 1) * (d + 1)`.
pub const MAX_CHUNK_SAMPLES: u64 = 1 << 24;

/// Integer offset of each corner from the cell's minimum corner.
pub const CORNER_OFFSETS: [[u32; 3]; CORNER_COUNT] = [
  [0, 0, 0], // 0
  [1, 0, 0], // 1
  [1, 1, 0], // 2
  [0, 1, 0], // 3
  [0, 0, 1], // 4
  [1, 0, 1], // 5
  [1, 1, 1], // 6
  [0, 1, 1], // 7
];

/// Corner offsets as float positions, for interpolation.
pub const CORNER_POSITIONS: [Vec3; CORNER_COUNT] = [
  Vec3::new(0.0, 0.0, 0.0),
  Vec3::new(1.0, 0.0, 0.0),
  Vec3::new(1.0, 1.0, 0.0),
  Vec3::new(0.0, 1.0, 0.0),
  Vec3::new(0.0, 0.0, 1.0),
  Vec3::new(1.0, 0.0, 1.0),
  Vec3::new(1.0, 1.0, 1.0),
  Vec3::new(0.0, 1.0, 1.0),
];

/// Absolute lattice position of `corner` for the cell whose minimum corner
/// is `cell`.
#[inline(always)]
pub const fn corner_lattice(cell: [u32; 3], corner: usize) -> [u32; 3] {
  let o = CORNER_OFFSETS[corner];
  [cell[0] + o[0], cell[1] + o[1], cell[2] + o[2]]
}

#[cfg(test)]
#[path = "constants_test.rs"]
mod constants_test;
