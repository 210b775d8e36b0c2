//! Height-biased terrain density.

use glam::Vec3;

use super::{CoherentNoise, NoiseMode, NoiseParams, OctaveNoise, PerlinNoise};
use crate::density::DensitySampler;
use crate::error::{ConfigError, Result};

/// Terrain density field: normalised octave noise minus a height bias.
///
/// ```text
/// density(p) = octave((p + offset) / scale) - (p.y - horizon_level) / scale
/// ```
///
/// Far below the horizon the bias dominates and density exceeds any
/// threshold in `[0, 1]` (solid); far above it falls below (empty). The
/// iso-surface is therefore a horizontal sheet near `horizon_level`,
/// displaced by the noise. The offset shifts only the noise lookup.
pub struct PlaneTerrain<N = PerlinNoise> {
  params: NoiseParams,
  octaves: OctaveNoise,
  primitive: N,
}

impl PlaneTerrain<PerlinNoise> {
  pub fn new(params: NoiseParams) -> std::result::Result<Self, ConfigError> {
    let primitive = PerlinNoise::new(params.seed);
    Self::with_primitive(params, primitive)
  }
}

impl<N: CoherentNoise> PlaneTerrain<N> {
  /// Build over a custom bounded primitive.
  pub fn with_primitive(params: NoiseParams, primitive: N) -> std::result::Result<Self, ConfigError> {
    params.validate()?;
    let octaves = OctaveNoise::new(params.octave_count, params.persistence, params.lacunarity);
    Ok(Self {
      params,
      octaves,
      primitive,
    })
  }

  pub fn params(&self) -> &NoiseParams {
    &self.params
  }

  pub fn octaves(&self) -> &OctaveNoise {
    &self.octaves
  }

  /// Normalised noise term alone, in `[0, 1]`.
  pub fn noise(&self, position: Vec3) -> Result<f32> {
    let p = (position + Vec3::from_array(self.params.offset)) / self.params.scale;
    match self.params.mode {
      NoiseMode::Planar => self.octaves.sample_2d(&self.primitive, p.x, p.z),
      NoiseMode::Volumetric => self.octaves.sample_3d(&self.primitive, p),
    }
  }

  /// Height bias term subtracted from the noise.
  #[inline]
  pub fn height_bias(&self, height: f32) -> f32 {
    (height - self.params.horizon_level) / self.params.scale
  }

  pub fn density(&self, position: Vec3) -> Result<f32> {
    Ok(self.noise(position)? - self.height_bias(position.y))
  }
}

impl<N: CoherentNoise> DensitySampler for PlaneTerrain<N> {
  #[inline]
  fn sample(&self, position: Vec3) -> Result<f32> {
    self.density(position)
  }
}
