//! Core data types shared by extraction and streaming.

use std::fmt;

use glam::{IVec3, Vec3};

// =============================================================================
// ChunkCoord
// =============================================================================

/// Integer position of a chunk in the tiling of space by `chunk_size` boxes.
///
/// Immutable value type; two coordinates are equal iff all components are.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct ChunkCoord {
  pub x: i32,
  pub y: i32,
  pub z: i32,
}

impl ChunkCoord {
  pub const ORIGIN: Self = Self::new(0, 0, 0);

  pub const fn new(x: i32, y: i32, z: i32) -> Self {
    Self { x, y, z }
  }

  /// Chunk containing `position`: component-wise `floor(position / chunk_size)`.
  #[inline]
  pub fn containing(position: Vec3, chunk_size: Vec3) -> Self {
    let c = (position / chunk_size).floor();
    Self::new(c.x as i32, c.y as i32, c.z as i32)
  }

  /// World-space minimum corner: `coord * chunk_size`.
  #[inline]
  pub fn origin(&self, chunk_size: Vec3) -> Vec3 {
    self.as_ivec3().as_vec3() * chunk_size
  }

  #[inline]
  pub fn offset(&self, dx: i32, dy: i32, dz: i32) -> Self {
    Self::new(self.x + dx, self.y + dy, self.z + dz)
  }

  /// True if `other` lies inside the box of per-axis half-extent `range`
  /// centred on `self` (Chebyshev distance per axis, not Euclidean).
  #[inline]
  pub fn within(&self, other: ChunkCoord, range: [i32; 3]) -> bool {
    (other.x - self.x).abs() <= range[0]
      && (other.y - self.y).abs() <= range[1]
      && (other.z - self.z).abs() <= range[2]
  }

  #[inline]
  pub fn as_ivec3(&self) -> IVec3 {
    IVec3::new(self.x, self.y, self.z)
  }
}

impl From<IVec3> for ChunkCoord {
  fn from(v: IVec3) -> Self {
    Self::new(v.x, v.y, v.z)
  }
}

impl From<(i32, i32, i32)> for ChunkCoord {
  fn from((x, y, z): (i32, i32, i32)) -> Self {
    Self::new(x, y, z)
  }
}

impl fmt::Display for ChunkCoord {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "({}, {}, {})", self.x, self.y, self.z)
  }
}

// =============================================================================
// Bounds
// =============================================================================

/// Axis-aligned bounding box.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MinMaxAABB {
  pub min: [f32; 3],
  pub max: [f32; 3],
}

impl MinMaxAABB {
  /// Create AABB with inverted extents (ready for encapsulation).
  pub fn empty() -> Self {
    Self {
      min: [f32::INFINITY; 3],
      max: [f32::NEG_INFINITY; 3],
    }
  }

  pub fn new(min: [f32; 3], max: [f32; 3]) -> Self {
    Self { min, max }
  }

  /// Expand AABB to include a point.
  #[inline]
  pub fn encapsulate(&mut self, point: [f32; 3]) {
    for i in 0..3 {
      self.min[i] = self.min[i].min(point[i]);
      self.max[i] = self.max[i].max(point[i]);
    }
  }

  /// Check if AABB is valid (min <= max on all axes).
  pub fn is_valid(&self) -> bool {
    self.min[0] <= self.max[0] && self.min[1] <= self.max[1] && self.min[2] <= self.max[2]
  }

  pub fn contains(&self, point: [f32; 3]) -> bool {
    (0..3).all(|i| point[i] >= self.min[i] && point[i] <= self.max[i])
  }
}

impl Default for MinMaxAABB {
  fn default() -> Self {
    Self::empty()
  }
}

// =============================================================================
// Mesh output
// =============================================================================

/// Extracted geometry for one chunk.
///
/// Positions are chunk-local (lattice units, origin at the chunk's minimum
/// corner). Every run of three indices is one triangle. Without welding each
/// triangle owns its three vertices.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshOutput {
  pub vertices: Vec<[f32; 3]>,

  /// Triangle indices (3 indices per triangle).
  pub indices: Vec<u32>,

  /// Bounding box encompassing all vertices.
  pub bounds: MinMaxAABB,
}

impl MeshOutput {
  pub fn new() -> Self {
    Self::default()
  }

  /// Clear all buffers, preserving capacity.
  pub fn clear(&mut self) {
    self.vertices.clear();
    self.indices.clear();
    self.bounds = MinMaxAABB::empty();
  }

  /// Returns true if no geometry was generated.
  pub fn is_empty(&self) -> bool {
    self.indices.is_empty()
  }

  pub fn vertex_count(&self) -> usize {
    self.vertices.len()
  }

  /// Number of triangles in the mesh.
  pub fn triangle_count(&self) -> usize {
    self.indices.len() / 3
  }

  /// Append a vertex and return its index.
  #[inline]
  pub(crate) fn push_vertex(&mut self, position: Vec3) -> u32 {
    let index = self.vertices.len() as u32;
    let p = position.to_array();
    self.vertices.push(p);
    self.bounds.encapsulate(p);
    index
  }

  /// Iterate triangles as vertex position triples.
  pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
    self.indices.chunks_exact(3).map(move |tri| {
      [
        Vec3::from_array(self.vertices[tri[0] as usize]),
        Vec3::from_array(self.vertices[tri[1] as usize]),
        Vec3::from_array(self.vertices[tri[2] as usize]),
      ]
    })
  }

  /// Unit face normal per triangle (`(v1 - v0) × (v2 - v0)`).
  ///
  /// Faces point away from the side above the threshold, out of the solid.
  /// Zero-area triangles yield a zero vector.
  pub fn face_normals(&self) -> Vec<[f32; 3]> {
    self
      .triangles()
      .map(|[a, b, c]| (b - a).cross(c - a).normalize_or_zero().to_array())
      .collect()
  }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
