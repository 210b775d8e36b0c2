use super::*;
use crate::density::FnDensity;
use crate::noise::{NoiseParams, PlaneTerrain};

fn spec() -> ChunkSpec {
  ChunkSpec::from(&TerrainConfig::default())
}

#[test]
fn test_spec_from_config() {
  let config = TerrainConfig::default()
    .with_chunk_size([16, 8, 4])
    .with_threshold(0.3)
    .with_weld_vertices(true);
  let spec = ChunkSpec::from(&config);

  assert_eq!(spec.chunk_size, [16, 8, 4]);
  assert_eq!(spec.extract.threshold, 0.3);
  assert!(spec.extract.weld_vertices);
  assert_eq!(spec.chunk_size_vec(), Vec3::new(16.0, 8.0, 4.0));
}

#[test]
fn test_chunk_at_horizon_has_surface() {
  let terrain = PlaneTerrain::new(NoiseParams::default()).unwrap();
  let built = build_chunk(ChunkCoord::ORIGIN, &spec(), &terrain).unwrap();

  assert_eq!(built.coord, ChunkCoord::ORIGIN);
  assert!(!built.mesh.is_empty());
  for v in &built.mesh.vertices {
    assert!(v.iter().all(|&c| (0.0..=8.0).contains(&c)), "vertex {:?} not chunk-local", v);
  }
}

#[test]
fn test_terrain_faces_point_up() {
  let terrain = PlaneTerrain::new(NoiseParams::default()).unwrap();
  let built = build_chunk(ChunkCoord::ORIGIN, &spec(), &terrain).unwrap();

  let normals = built.mesh.face_normals();
  let up = normals.iter().filter(|n| n[1] > 0.0).count();
  assert!(up * 4 > normals.len() * 3, "{} of {} faces point up", up, normals.len());
}

#[test]
fn test_chunks_far_from_horizon_are_empty() {
  let terrain = PlaneTerrain::new(NoiseParams::default()).unwrap();
  let sky = build_chunk(ChunkCoord::new(0, 50, 0), &spec(), &terrain).unwrap();
  let bedrock = build_chunk(ChunkCoord::new(0, -50, 0), &spec(), &terrain).unwrap();

  assert!(sky.mesh.is_empty());
  assert!(bedrock.mesh.is_empty());
}

#[test]
fn test_chunk_origin_applied_to_sampling() {
  // Surface at world y = 12 falls in chunk y = 1, local height 4.
  let plane = FnDensity(|p: Vec3| 12.5 - p.y);
  let below = build_chunk(ChunkCoord::new(0, 0, 0), &spec(), &plane).unwrap();
  let level = build_chunk(ChunkCoord::new(3, 1, -2), &spec(), &plane).unwrap();

  assert!(below.mesh.is_empty());
  assert!(!level.mesh.is_empty());
  for v in &level.mesh.vertices {
    assert!((v[1] - 4.0).abs() < 1e-5);
  }
}

#[test]
fn test_failure_names_chunk() {
  let broken = FnDensity(|_: Vec3| f32::INFINITY);
  let coord = ChunkCoord::new(2, -1, 0);

  match build_chunk(coord, &spec(), &broken) {
    Err(TerrainError::ChunkBuild { coord: failed, source }) => {
      assert_eq!(failed, coord);
      assert!(matches!(*source, TerrainError::NonFiniteDensity { .. }));
    }
    other => panic!("expected ChunkBuild, got {:?}", other),
  }
}
