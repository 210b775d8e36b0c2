//! Fractal sum of a bounded primitive.

use glam::Vec3;

use super::CoherentNoise;
use crate::error::{Result, TerrainError};

/// Relative slack allowed on the theoretical bound before a sum is rejected.
/// Float accumulation can overshoot the closed form by a few ulps.
const BOUND_TOLERANCE: f32 = 1e-5;

/// Octave accumulator with a cached normalisation bound.
///
/// Octave `i` contributes `primitive(p * lacunarity^i) * persistence^i`. The
/// sum lies in `[0, max_sum]` with `max_sum = (1 - persistence^n) / (1 - persistence)`,
/// and is divided by `max_sum` so the result is in `[0, 1]`.
#[derive(Clone, Debug, PartialEq)]
pub struct OctaveNoise {
  octave_count: u32,
  persistence: f32,
  lacunarity: f32,
  max_sum: f32,
}

impl OctaveNoise {
  pub fn new(octave_count: u32, persistence: f32, lacunarity: f32) -> Self {
    Self {
      octave_count,
      persistence,
      lacunarity,
      max_sum: Self::theoretical_max(octave_count, persistence),
    }
  }

  /// Geometric series bound for `octave_count` octaves.
  pub fn theoretical_max(octave_count: u32, persistence: f32) -> f32 {
    if (1.0 - persistence).abs() < f32::EPSILON {
      return octave_count as f32;
    }
    (1.0 - persistence.powi(octave_count as i32)) / (1.0 - persistence)
  }

  #[inline]
  pub fn octave_count(&self) -> u32 {
    self.octave_count
  }

  #[inline]
  pub fn persistence(&self) -> f32 {
    self.persistence
  }

  #[inline]
  pub fn lacunarity(&self) -> f32 {
    self.lacunarity
  }

  #[inline]
  pub fn max_sum(&self) -> f32 {
    self.max_sum
  }

  pub fn set_octave_count(&mut self, octave_count: u32) {
    self.octave_count = octave_count;
    self.max_sum = Self::theoretical_max(octave_count, self.persistence);
  }

  pub fn set_persistence(&mut self, persistence: f32) {
    self.persistence = persistence;
    self.max_sum = Self::theoretical_max(self.octave_count, persistence);
  }

  /// Lacunarity does not enter the bound.
  pub fn set_lacunarity(&mut self, lacunarity: f32) {
    self.lacunarity = lacunarity;
  }

  /// Normalised octave noise over a 2D position.
  #[inline]
  pub fn sample_2d<N: CoherentNoise + ?Sized>(&self, primitive: &N, x: f32, y: f32) -> Result<f32> {
    self.accumulate(|frequency| primitive.sample_2d(x * frequency, y * frequency))
  }

  /// Normalised octave noise over the six-pair 3D composite.
  #[inline]
  pub fn sample_3d<N: CoherentNoise + ?Sized>(&self, primitive: &N, position: Vec3) -> Result<f32> {
    self.accumulate(|frequency| {
      let p = position * frequency;
      primitive.sample_3d(p.x, p.y, p.z)
    })
  }

  /// Sum octaves of `octave(frequency)`, check the bound, renormalise.
  fn accumulate(&self, mut octave: impl FnMut(f32) -> f32) -> Result<f32> {
    let mut sum = 0.0;
    let mut amplitude = 1.0;
    let mut frequency = 1.0;

    for _ in 0..self.octave_count {
      sum += octave(frequency) * amplitude;
      amplitude *= self.persistence;
      frequency *= self.lacunarity;
    }

    let slack = self.max_sum * BOUND_TOLERANCE;
    if !(sum >= -slack && sum <= self.max_sum + slack) {
      return Err(TerrainError::NoiseOutOfRange {
        raw: sum,
        max: self.max_sum,
      });
    }

    Ok((sum / self.max_sum).clamp(0.0, 1.0))
  }
}
