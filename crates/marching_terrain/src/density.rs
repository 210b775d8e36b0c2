//! Density sampling and per-chunk sample grids.
//!
//! A chunk of `w × h × d` cells needs `(w+1) × (h+1) × (d+1)` lattice
//! samples: cells on a chunk face read the samples on that face, and the
//! neighbouring chunk reads the very same world positions.
//!
//! ```text
//!   x = 0   1   2        w
//!       ●───●───●─ ... ─●     ● lattice sample
//!       │   │   │       │     samples shared with the
//!       ●───●───●─ ... ─●     next chunk along +x sit at x = w
//! ```

use glam::Vec3;

use crate::error::{Result, TerrainError};

// =============================================================================
// Sampler trait
// =============================================================================

/// Scalar field evaluated at absolute world positions.
///
/// Must be a pure function of `position`; chunk seams rely on it.
pub trait DensitySampler: Send + Sync {
  fn sample(&self, position: Vec3) -> Result<f32>;
}

impl DensitySampler for Box<dyn DensitySampler> {
  #[inline]
  fn sample(&self, position: Vec3) -> Result<f32> {
    (**self).sample(position)
  }
}

impl<S: DensitySampler + ?Sized> DensitySampler for std::sync::Arc<S> {
  #[inline]
  fn sample(&self, position: Vec3) -> Result<f32> {
    (**self).sample(position)
  }
}

/// Adapts an infallible closure into a [`DensitySampler`].
///
/// ```ignore
/// let sphere = FnDensity(|p: Vec3| 5.0 - p.length());
/// ```
#[derive(Clone, Copy, Debug)]
pub struct FnDensity<F>(pub F);

impl<F> DensitySampler for FnDensity<F>
where
  F: Fn(Vec3) -> f32 + Send + Sync,
{
  #[inline]
  fn sample(&self, position: Vec3) -> Result<f32> {
    Ok((self.0)(position))
  }
}

// =============================================================================
// Grid
// =============================================================================

/// Lattice samples of one chunk, x-major.
///
/// `index = (x * samples_y + y) * samples_z + z` where `samples_* = cells_* + 1`.
#[derive(Clone, Debug, PartialEq)]
pub struct DensityGrid {
  cells: [u32; 3],
  samples: Vec<f32>,
}

impl DensityGrid {
  /// Sample `sampler` at `origin + (x, y, z)` for every lattice point.
  ///
  /// Non-finite samples are rejected so that they cannot reach vertex
  /// interpolation.
  #[cfg_attr(feature = "instrument", tracing::instrument(skip_all, name = "density::build"))]
  pub fn build<S: DensitySampler + ?Sized>(origin: Vec3, cells: [u32; 3], sampler: &S) -> Result<Self> {
    let [sx, sy, sz] = Self::sample_dims(cells);
    let mut samples = Vec::with_capacity(Self::sample_count(cells));

    for x in 0..sx {
      for y in 0..sy {
        for z in 0..sz {
          let position = origin + Vec3::new(x as f32, y as f32, z as f32);
          let value = sampler.sample(position)?;
          if !value.is_finite() {
            return Err(TerrainError::NonFiniteDensity {
              value,
              position: position.to_array(),
            });
          }
          samples.push(value);
        }
      }
    }

    Ok(Self { cells, samples })
  }

  /// Fill from a lattice-coordinate function.
  pub fn from_fn(cells: [u32; 3], mut f: impl FnMut(u32, u32, u32) -> f32) -> Self {
    let [sx, sy, sz] = Self::sample_dims(cells);
    let mut samples = Vec::with_capacity(Self::sample_count(cells));
    for x in 0..sx {
      for y in 0..sy {
        for z in 0..sz {
          samples.push(f(x, y, z));
        }
      }
    }
    Self { cells, samples }
  }

  /// Wrap precomputed samples laid out as described on the type.
  ///
  /// # Panics
  ///
  /// If `samples.len()` does not match the lattice size for `cells`.
  pub fn from_samples(cells: [u32; 3], samples: Vec<f32>) -> Self {
    let [sx, sy, sz] = Self::sample_dims(cells);
    assert_eq!(
      samples.len(),
      Self::sample_count(cells),
      "expected {}x{}x{} samples",
      sx,
      sy,
      sz
    );
    Self { cells, samples }
  }

  #[inline]
  pub const fn sample_dims(cells: [u32; 3]) -> [u32; 3] {
    [cells[0].saturating_add(1), cells[1].saturating_add(1), cells[2].saturating_add(1)]
  }

  /// Lattice points for `cells`, computed without `u32` overflow.
  #[inline]
  pub fn sample_count(cells: [u32; 3]) -> usize {
    cells.iter().map(|&c| c as usize + 1).product()
  }

  #[inline]
  pub fn cells(&self) -> [u32; 3] {
    self.cells
  }

  #[inline]
  pub fn samples(&self) -> &[f32] {
    &self.samples
  }

  /// Linear index of lattice point `p`.
  ///
  /// # Panics
  ///
  /// If `p` lies outside `[0, cells]` on any axis. An out-of-range lattice
  /// point means the corner or edge tables are inconsistent.
  #[inline]
  pub fn index(&self, p: [u32; 3]) -> usize {
    let [sx, sy, sz] = Self::sample_dims(self.cells);
    assert!(
      p[0] < sx && p[1] < sy && p[2] < sz,
      "lattice point {:?} outside grid of {:?} cells",
      p,
      self.cells
    );
    let (sy, sz) = (sy as usize, sz as usize);
    (p[0] as usize * sy + p[1] as usize) * sz + p[2] as usize
  }

  #[inline]
  pub fn get(&self, p: [u32; 3]) -> f32 {
    self.samples[self.index(p)]
  }
}

#[cfg(test)]
#[path = "density_test.rs"]
mod density_test;
