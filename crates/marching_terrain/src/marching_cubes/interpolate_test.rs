use super::*;
use crate::error::TerrainError;

#[test]
fn test_midpoint_for_symmetric_densities() {
  let mut samples = [0.0; 8];
  samples[0] = 1.0;
  assert_eq!(edge_point(&samples, 0, 0.5, [0, 0, 0]).unwrap(), Vec3::new(0.5, 0.0, 0.0));
  assert_eq!(edge_point(&samples, 8, 0.5, [0, 0, 0]).unwrap(), Vec3::new(0.0, 0.0, 0.5));
}

#[test]
fn test_direction_independent() {
  // Edge 2 runs from corner 2 (1,1,0) to corner 3 (0,1,0); the lower corner is 3.
  let mut samples = [0.0; 8];
  samples[3] = 0.9;
  samples[2] = 0.1;
  let p = edge_point(&samples, 2, 0.3, [0, 0, 0]).unwrap();
  assert!((p - Vec3::new(0.75, 1.0, 0.0)).length() < 1e-6, "got {:?}", p);
}

#[test]
fn test_parameter_stays_on_edge() {
  let cases = [(1.0, 0.0), (0.51, 0.49), (100.0, -100.0), (0.0, 1.0), (0.5, 0.500_01)];
  for (a, b) in cases {
    let mut samples = [0.0; 8];
    samples[0] = a;
    samples[1] = b;
    let p = edge_point(&samples, 0, 0.5, [0, 0, 0]).unwrap();
    assert!((0.0..=1.0).contains(&p.x), "a={} b={} -> {:?}", a, b, p);
    assert_eq!(p.y, 0.0);
    assert_eq!(p.z, 0.0);
  }
}

#[test]
fn test_equal_endpoints_are_degenerate() {
  let samples = [0.8; 8];
  match edge_point(&samples, 5, 0.5, [2, 3, 4]) {
    Err(TerrainError::DegenerateEdge { edge, cell }) => {
      assert_eq!(edge, 5);
      assert_eq!(cell, [2, 3, 4]);
    }
    other => panic!("expected DegenerateEdge, got {:?}", other),
  }
}
