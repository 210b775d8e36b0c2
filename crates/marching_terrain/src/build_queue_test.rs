use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use glam::Vec3;

use super::*;
use crate::config::TerrainConfig;
use crate::error::TerrainError;

/// Plane density that counts its samples.
#[derive(Default)]
struct CountingPlane {
  samples: AtomicUsize,
}

impl DensitySampler for CountingPlane {
  fn sample(&self, position: Vec3) -> Result<f32> {
    self.samples.fetch_add(1, Ordering::Relaxed);
    Ok(4.5 - position.y)
  }
}

fn queue() -> (Arc<CountingPlane>, BuildQueue<CountingPlane>) {
  let sampler = Arc::new(CountingPlane::default());
  let spec = ChunkSpec::from(&TerrainConfig::default());
  (Arc::clone(&sampler), BuildQueue::new(sampler, spec))
}

/// Drain until `expected` completions arrived or a generous deadline passed.
fn drain_all(queue: &mut BuildQueue<CountingPlane>, expected: usize) -> Vec<BuildCompletion> {
  let mut out = Vec::new();
  for _ in 0..5_000 {
    out.extend(queue.drain());
    if out.len() >= expected {
      break;
    }
    std::thread::sleep(Duration::from_millis(1));
  }
  out
}

#[test]
fn test_request_dedupes_in_flight_coord() {
  let (_, mut queue) = queue();
  let coord = ChunkCoord::new(1, 0, -1);

  assert!(queue.request(coord));
  assert!(!queue.request(coord));
  assert!(queue.is_in_flight(&coord));
  assert_eq!(queue.in_flight_count(), 1);
}

#[test]
fn test_completion_clears_in_flight() {
  let (sampler, mut queue) = queue();
  let coords = [ChunkCoord::new(0, 0, 0), ChunkCoord::new(1, 0, 0), ChunkCoord::new(0, 1, 0)];
  for coord in coords {
    queue.request(coord);
  }

  let completions = drain_all(&mut queue, coords.len());
  assert_eq!(completions.len(), coords.len());
  assert_eq!(queue.in_flight_count(), 0);

  for completion in &completions {
    let built = completion.result.as_ref().unwrap();
    assert_eq!(built.coord, completion.coord);
    // Surface at y = 4 lies only in the y = 0 layer.
    assert_eq!(built.mesh.is_empty(), completion.coord.y != 0);
  }

  // 9³ lattice samples per chunk.
  assert_eq!(sampler.samples.load(Ordering::Relaxed), 3 * 729);
}

#[test]
fn test_coord_can_be_requested_again_after_drain() {
  let (_, mut queue) = queue();
  let coord = ChunkCoord::ORIGIN;

  queue.request(coord);
  assert_eq!(drain_all(&mut queue, 1).len(), 1);
  assert!(queue.request(coord));
}

#[test]
fn test_failures_are_delivered() {
  struct Broken;
  impl DensitySampler for Broken {
    fn sample(&self, _position: Vec3) -> Result<f32> {
      Ok(f32::NAN)
    }
  }

  let spec = ChunkSpec::from(&TerrainConfig::default());
  let mut queue = BuildQueue::new(Arc::new(Broken), spec);
  let coord = ChunkCoord::new(5, 5, 5);
  queue.request(coord);

  let mut completions = Vec::new();
  for _ in 0..5_000 {
    completions.extend(queue.drain());
    if !completions.is_empty() {
      break;
    }
    std::thread::sleep(Duration::from_millis(1));
  }

  assert_eq!(completions.len(), 1);
  assert!(matches!(
    completions[0].result,
    Err(TerrainError::ChunkBuild { coord: c, .. }) if c == coord
  ));
}
