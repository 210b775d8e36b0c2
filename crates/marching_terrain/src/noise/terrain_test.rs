use glam::Vec3;

use super::*;
use crate::density::DensitySampler;
use crate::error::{ConfigError, TerrainError};
use crate::noise::{CoherentNoise, PerlinNoise};

/// Primitive that overshoots the unit range.
struct Overshoot;

impl CoherentNoise for Overshoot {
  fn sample_2d(&self, _x: f32, _y: f32) -> f32 {
    1.25
  }
}

fn sample_positions() -> impl Iterator<Item = Vec3> {
  (-6..6).flat_map(|x| {
    (-3..3).flat_map(move |y| (-6..6).map(move |z| Vec3::new(x as f32 * 3.7, y as f32 * 2.3, z as f32 * 5.1)))
  })
}

#[test]
fn test_noise_stays_in_unit_range() {
  for mode in [NoiseMode::Planar, NoiseMode::Volumetric] {
    let terrain = PlaneTerrain::new(NoiseParams::default().with_mode(mode)).unwrap();
    for p in sample_positions() {
      let n = terrain.noise(p).unwrap();
      assert!((0.0..=1.0).contains(&n), "{:?} noise {} at {:?}", mode, n, p);
    }
  }
}

#[test]
fn test_perlin_primitive_is_unit_bounded() {
  let perlin = PerlinNoise::new(7);
  for i in 0..4_096 {
    let x = i as f32 * 0.137 - 280.0;
    let y = (i % 61) as f32 * 0.731 - 22.0;
    let n = perlin.sample_2d(x, y);
    assert!((-1e-5..=1.0 + 1e-5).contains(&n), "perlin {} at ({}, {})", n, x, y);
  }
}

#[test]
fn test_overshooting_primitive_is_reported_not_clamped() {
  let terrain = PlaneTerrain::with_primitive(NoiseParams::default(), Overshoot).unwrap();
  assert!(matches!(
    terrain.noise(Vec3::ZERO),
    Err(TerrainError::NoiseOutOfRange { .. })
  ));
  assert!(terrain.density(Vec3::new(1.0, 2.0, 3.0)).is_err());
}

#[test]
fn test_same_params_same_density() {
  let params = NoiseParams::default().with_seed(42).with_offset([3.0, 0.0, -7.0]);
  let a = PlaneTerrain::new(params.clone()).unwrap();
  let b = PlaneTerrain::new(params).unwrap();

  for p in sample_positions() {
    assert_eq!(a.sample(p).unwrap().to_bits(), b.sample(p).unwrap().to_bits());
  }
}

#[test]
fn test_height_bias_dominates_far_from_horizon() {
  let params = NoiseParams::default();
  let terrain = PlaneTerrain::new(params.clone()).unwrap();
  let depth = params.scale * 50.0;

  let below = Vec3::new(1.0, params.horizon_level - depth, 1.0);
  let above = Vec3::new(1.0, params.horizon_level + depth, 1.0);
  assert!(terrain.sample(below).unwrap() > 1.0);
  assert!(terrain.sample(above).unwrap() < 0.0);
}

#[test]
fn test_planar_noise_ignores_height() {
  let terrain = PlaneTerrain::new(NoiseParams::default()).unwrap();
  let low = terrain.noise(Vec3::new(4.2, -30.0, 1.3)).unwrap();
  let high = terrain.noise(Vec3::new(4.2, 90.0, 1.3)).unwrap();
  assert_eq!(low, high);
}

#[test]
fn test_offset_shifts_lookup_not_horizon() {
  let offset = Vec3::new(5.0, 0.0, -3.0);
  let plain = PlaneTerrain::new(NoiseParams::default()).unwrap();
  let shifted = PlaneTerrain::new(NoiseParams::default().with_offset(offset.to_array())).unwrap();

  let p = Vec3::new(1.5, 2.5, 0.5);
  assert_eq!(shifted.noise(p).unwrap(), plain.noise(p + offset).unwrap());
  assert_eq!(shifted.height_bias(p.y), plain.height_bias(p.y));
}

#[test]
fn test_scale_divides_bias() {
  let terrain = PlaneTerrain::new(NoiseParams::default().with_scale(4.0).with_horizon_level(2.0)).unwrap();
  assert_eq!(terrain.height_bias(10.0), 2.0);
  assert_eq!(terrain.height_bias(2.0), 0.0);
}

#[test]
fn test_invalid_params_rejected() {
  let bad_scale = NoiseParams::default().with_scale(0.0);
  assert!(matches!(PlaneTerrain::new(bad_scale), Err(ConfigError::Scale(_))));

  let bad_octaves = NoiseParams::default().with_octaves(0, 0.5, 2.0);
  assert!(matches!(PlaneTerrain::new(bad_octaves), Err(ConfigError::OctaveCount)));

  let bad_persistence = NoiseParams::default().with_octaves(4, 1.0, 2.0);
  assert!(matches!(PlaneTerrain::new(bad_persistence), Err(ConfigError::Persistence(_))));

  let bad_lacunarity = NoiseParams::default().with_octaves(4, 0.5, 1.0);
  assert!(matches!(PlaneTerrain::new(bad_lacunarity), Err(ConfigError::Lacunarity(_))));
}
