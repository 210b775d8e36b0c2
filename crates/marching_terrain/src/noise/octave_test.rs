use std::sync::Mutex;

use glam::Vec3;

use super::*;
use crate::error::TerrainError;

struct Constant(f32);

impl CoherentNoise for Constant {
  fn sample_2d(&self, _x: f32, _y: f32) -> f32 {
    self.0
  }
}

/// Records the x coordinate of every lookup.
#[derive(Default)]
struct Recording(Mutex<Vec<f32>>);

impl CoherentNoise for Recording {
  fn sample_2d(&self, x: f32, _y: f32) -> f32 {
    self.0.lock().unwrap().push(x);
    0.5
  }
}

#[test]
fn test_max_sum_geometric_series() {
  let octaves = OctaveNoise::new(4, 0.5, 2.0);
  assert!((octaves.max_sum() - 1.875).abs() < 1e-6);
  assert_eq!(OctaveNoise::new(1, 0.5, 2.0).max_sum(), 1.0);
}

#[test]
fn test_max_sum_recomputed_on_change() {
  let mut octaves = OctaveNoise::new(4, 0.5, 2.0);

  octaves.set_persistence(0.25);
  assert!((octaves.max_sum() - 1.328125).abs() < 1e-6);

  octaves.set_octave_count(1);
  assert_eq!(octaves.max_sum(), 1.0);

  octaves.set_lacunarity(3.0);
  assert_eq!(octaves.max_sum(), 1.0);
}

#[test]
fn test_extreme_primitives_hit_range_ends() {
  let octaves = OctaveNoise::new(6, 0.6, 2.0);
  assert_eq!(octaves.sample_2d(&Constant(0.0), 3.0, 4.0).unwrap(), 0.0);
  assert!((octaves.sample_2d(&Constant(1.0), 3.0, 4.0).unwrap() - 1.0).abs() < 1e-6);
}

#[test]
fn test_constant_primitive_normalises_to_itself() {
  let octaves = OctaveNoise::new(5, 0.5, 2.0);
  let value = octaves.sample_2d(&Constant(0.25), 1.0, 1.0).unwrap();
  assert!((value - 0.25).abs() < 1e-6, "got {}", value);
}

#[test]
fn test_unbounded_primitive_is_rejected() {
  let octaves = OctaveNoise::new(3, 0.5, 2.0);
  match octaves.sample_2d(&Constant(2.0), 0.0, 0.0) {
    Err(TerrainError::NoiseOutOfRange { raw, max }) => {
      assert!((raw - 3.5).abs() < 1e-6);
      assert!((max - 1.75).abs() < 1e-6);
    }
    other => panic!("expected NoiseOutOfRange, got {:?}", other),
  }

  assert!(octaves.sample_2d(&Constant(-0.5), 0.0, 0.0).is_err());
}

#[test]
fn test_frequency_grows_by_lacunarity() {
  let primitive = Recording::default();
  let octaves = OctaveNoise::new(4, 0.5, 3.0);
  octaves.sample_2d(&primitive, 1.5, 0.0).unwrap();

  let seen = primitive.0.lock().unwrap().clone();
  assert_eq!(seen, vec![1.5, 4.5, 13.5, 40.5]);
}

#[test]
fn test_volumetric_composite_is_bounded() {
  let octaves = OctaveNoise::new(4, 0.5, 2.0);
  let value = octaves
    .sample_3d(&Constant(1.0), Vec3::new(0.3, 0.7, -1.1))
    .unwrap();
  assert!((value - 1.0).abs() < 1e-6);
}
