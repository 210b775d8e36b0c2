//! Coherent noise and the terrain density field built on it.
//!
//! ```text
//! ┌────────────────┐    ┌──────────────┐    ┌──────────────────────────────┐
//! │ PerlinNoise    ├───►│ OctaveNoise  ├───►│ PlaneTerrain                 │
//! │ 2D, [0, 1]     │    │ Σ octaves,   │    │ noise - (y - horizon)/scale  │
//! └────────────────┘    │ renormalised │    └──────────────────────────────┘
//!                       └──────────────┘
//! ```
//!
//! Everything here is a pure function of its inputs: the same position and
//! parameters always produce the same density, which is what lets adjacent
//! chunks agree on their shared boundary samples.

mod octave;
mod terrain;

#[cfg(test)]
#[path = "octave_test.rs"]
mod octave_test;
#[cfg(test)]
#[path = "terrain_test.rs"]
mod terrain_test;

pub use octave::OctaveNoise;
pub use terrain::PlaneTerrain;

use fastnoise_lite::{FastNoiseLite, NoiseType};
use serde::Deserialize;

use crate::error::ConfigError;

/// Bounded 2D coherent noise primitive.
///
/// Implementations must return values in `[0, 1]` for every input; the
/// octave normalisation depends on it.
pub trait CoherentNoise: Send + Sync {
  fn sample_2d(&self, x: f32, y: f32) -> f32;

  /// 3D composite: mean of the primitive over all six ordered axis pairs.
  /// Stays within `[0, 1]` because it is an average of bounded samples.
  fn sample_3d(&self, x: f32, y: f32, z: f32) -> f32 {
    let xy = self.sample_2d(x, y);
    let xz = self.sample_2d(x, z);
    let yz = self.sample_2d(y, z);
    let yx = self.sample_2d(y, x);
    let zx = self.sample_2d(z, x);
    let zy = self.sample_2d(z, y);
    (xy + xz + yz + yx + zx + zy) / 6.0
  }
}

/// Gradient noise with unit lattice spacing, remapped to `[0, 1]`.
///
/// The remap is not clamped: a sample outside the unit range surfaces as
/// [`TerrainError::NoiseOutOfRange`](crate::error::TerrainError) once summed.
pub struct PerlinNoise {
  inner: FastNoiseLite,
}

impl PerlinNoise {
  pub fn new(seed: i32) -> Self {
    let mut inner = FastNoiseLite::with_seed(seed);
    inner.set_noise_type(Some(NoiseType::Perlin));
    // Frequency is applied by the octave layer.
    inner.set_frequency(Some(1.0));
    Self { inner }
  }
}

impl CoherentNoise for PerlinNoise {
  #[inline]
  fn sample_2d(&self, x: f32, y: f32) -> f32 {
    (self.inner.get_noise_2d(x, y) + 1.0) * 0.5
  }
}

/// Which primitive the terrain samples.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoiseMode {
  /// Heightfield-style: noise over `(x, z)`, no overhangs.
  #[default]
  Planar,
  /// Six-pair 3D composite: allows overhangs and floating pockets.
  Volumetric,
}

/// Generation parameters for [`PlaneTerrain`].
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct NoiseParams {
  /// Shift applied to the noise lookup position (scrolls the terrain).
  pub offset: [f32; 3],
  /// Divides both the noise lookup and the height bias.
  pub scale: f32,
  /// Height at which the un-perturbed surface would sit.
  pub horizon_level: f32,
  pub octave_count: u32,
  /// Per-octave amplitude decay, in `(0, 1)`.
  pub persistence: f32,
  /// Per-octave frequency growth, `> 1`.
  pub lacunarity: f32,
  pub seed: i32,
  pub mode: NoiseMode,
}

impl Default for NoiseParams {
  fn default() -> Self {
    Self {
      offset: [0.0; 3],
      scale: 10.0,
      horizon_level: 2.0,
      octave_count: 4,
      persistence: 0.5,
      lacunarity: 2.0,
      seed: 1337,
      mode: NoiseMode::Planar,
    }
  }
}

impl NoiseParams {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_offset(mut self, offset: [f32; 3]) -> Self {
    self.offset = offset;
    self
  }

  pub fn with_scale(mut self, scale: f32) -> Self {
    self.scale = scale;
    self
  }

  pub fn with_horizon_level(mut self, horizon_level: f32) -> Self {
    self.horizon_level = horizon_level;
    self
  }

  pub fn with_octaves(mut self, octave_count: u32, persistence: f32, lacunarity: f32) -> Self {
    self.octave_count = octave_count;
    self.persistence = persistence;
    self.lacunarity = lacunarity;
    self
  }

  pub fn with_seed(mut self, seed: i32) -> Self {
    self.seed = seed;
    self
  }

  pub fn with_mode(mut self, mode: NoiseMode) -> Self {
    self.mode = mode;
    self
  }

  pub fn validate(&self) -> Result<(), ConfigError> {
    if !(self.scale.is_finite() && self.scale > 0.0) {
      return Err(ConfigError::Scale(self.scale));
    }
    if self.octave_count == 0 {
      return Err(ConfigError::OctaveCount);
    }
    if !(self.persistence > 0.0 && self.persistence < 1.0) {
      return Err(ConfigError::Persistence(self.persistence));
    }
    if !(self.lacunarity.is_finite() && self.lacunarity > 1.0) {
      return Err(ConfigError::Lacunarity(self.lacunarity));
    }
    Ok(())
  }
}
