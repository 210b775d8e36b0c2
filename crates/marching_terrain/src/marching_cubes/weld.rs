//! Vertex sharing across cells.
//!
//! A crossing on a lattice edge is seen by up to four cells. Keying by the
//! edge's lower lattice corner and its axis maps all of them to one vertex.

use std::collections::HashMap;

use glam::Vec3;

use crate::constants::{corner_lattice, CORNER_OFFSETS};
use crate::edge_table::EDGE_ENDPOINTS;
use crate::types::MeshOutput;

/// Grid-wide identity of a cell edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EdgeKey {
  /// Lower lattice corner of the edge.
  pub origin: [u32; 3],
  /// 0 = X, 1 = Y, 2 = Z.
  pub axis: u8,
}

impl EdgeKey {
  pub fn new(cell: [u32; 3], edge: usize) -> Self {
    let [c0, c1] = EDGE_ENDPOINTS[edge];
    let a = corner_lattice(cell, c0 as usize);
    let b = corner_lattice(cell, c1 as usize);
    let d0 = CORNER_OFFSETS[c0 as usize];
    let d1 = CORNER_OFFSETS[c1 as usize];
    let axis = (0..3).find(|&i| d0[i] != d1[i]).unwrap_or(0) as u8;
    Self {
      origin: [a[0].min(b[0]), a[1].min(b[1]), a[2].min(b[2])],
      axis,
    }
  }
}

pub(super) struct Welder {
  vertices: HashMap<EdgeKey, u32>,
}

impl Welder {
  pub(super) fn new() -> Self {
    Self {
      vertices: HashMap::new(),
    }
  }

  /// Index of the vertex on `key`, appending `position` on first use.
  pub(super) fn vertex(&mut self, key: EdgeKey, position: Vec3, output: &mut MeshOutput) -> u32 {
    *self
      .vertices
      .entry(key)
      .or_insert_with(|| output.push_vertex(position))
  }
}
