use super::*;
use crate::noise::{NoiseParams, PlaneTerrain};

#[test]
fn test_grid_has_one_more_sample_per_axis() {
  let grid = DensityGrid::build(Vec3::ZERO, [4, 2, 3], &FnDensity(|_: Vec3| 0.0_f32)).unwrap();
  assert_eq!(grid.samples().len(), 5 * 3 * 4);
  assert_eq!(grid.cells(), [4, 2, 3]);
}

#[test]
fn test_samples_at_origin_plus_lattice() {
  let origin = Vec3::new(-8.0, 16.0, 4.0);
  let grid = DensityGrid::build(origin, [2, 2, 2], &FnDensity(|p: Vec3| p.x * 100.0 + p.y * 10.0 + p.z)).unwrap();

  assert_eq!(grid.get([0, 0, 0]), -800.0 + 160.0 + 4.0);
  assert_eq!(grid.get([2, 1, 0]), -600.0 + 170.0 + 4.0);
  assert_eq!(grid.get([1, 2, 2]), -700.0 + 180.0 + 6.0);
}

#[test]
fn test_index_is_x_major() {
  let grid = DensityGrid::from_fn([2, 3, 4], |_, _, _| 0.0);
  assert_eq!(grid.index([0, 0, 0]), 0);
  assert_eq!(grid.index([0, 0, 1]), 1);
  assert_eq!(grid.index([0, 1, 0]), 5);
  assert_eq!(grid.index([1, 0, 0]), 20);
  assert_eq!(grid.index([2, 3, 4]), grid.samples().len() - 1);
}

#[test]
fn test_sample_count_does_not_wrap() {
  assert_eq!(DensityGrid::sample_count([2, 3, 4]), 60);
  // 2049³ exceeds u32::MAX.
  assert_eq!(DensityGrid::sample_count([2048; 3]), 2049usize.pow(3));
}

#[test]
#[should_panic(expected = "outside grid")]
fn test_out_of_bounds_index_panics() {
  let grid = DensityGrid::from_fn([2, 2, 2], |_, _, _| 0.0);
  grid.get([3, 0, 0]);
}

#[test]
#[should_panic]
fn test_from_samples_rejects_wrong_length() {
  DensityGrid::from_samples([1, 1, 1], vec![0.0; 7]);
}

#[test]
fn test_non_finite_sample_is_error() {
  let result = DensityGrid::build(Vec3::ZERO, [2, 2, 2], &FnDensity(|p: Vec3| if p.x > 1.0 { f32::NAN } else { 0.0_f32 }));
  assert!(matches!(result, Err(TerrainError::NonFiniteDensity { .. })));
}

#[test]
fn test_neighbouring_chunks_share_boundary_samples_exactly() {
  let terrain = PlaneTerrain::new(NoiseParams::default().with_offset([13.0, 0.0, -7.0])).unwrap();
  let cells = [8, 8, 8];

  let left = DensityGrid::build(Vec3::new(0.0, -8.0, 0.0), cells, &terrain).unwrap();
  let right = DensityGrid::build(Vec3::new(8.0, -8.0, 0.0), cells, &terrain).unwrap();
  let above = DensityGrid::build(Vec3::new(0.0, 0.0, 0.0), cells, &terrain).unwrap();

  for a in 0..=8 {
    for b in 0..=8 {
      assert_eq!(
        left.get([8, a, b]).to_bits(),
        right.get([0, a, b]).to_bits(),
        "x seam mismatch at ({}, {})",
        a,
        b
      );
      assert_eq!(left.get([a, 8, b]).to_bits(), above.get([a, 0, b]).to_bits());
    }
  }
}

#[test]
fn test_build_is_deterministic() {
  let terrain = PlaneTerrain::new(NoiseParams::default()).unwrap();
  let origin = Vec3::new(24.0, 0.0, -16.0);
  let a = DensityGrid::build(origin, [8, 8, 8], &terrain).unwrap();
  let b = DensityGrid::build(origin, [8, 8, 8], &terrain).unwrap();
  assert_eq!(a, b);
}

#[test]
fn test_boxed_sampler() {
  let sampler: Box<dyn DensitySampler> = Box::new(FnDensity(|p: Vec3| p.y));
  let grid = DensityGrid::build(Vec3::ZERO, [1, 1, 1], &sampler).unwrap();
  assert_eq!(grid.get([0, 1, 0]), 1.0);
}
