//! Benchmarks for marching cubes extraction on synthetic and terrain grids.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use glam::Vec3;
use marching_terrain::{extract_with, DensityGrid, ExtractConfig, NoiseParams, PlaneTerrain};

/// Sphere density peaking at the grid centre.
fn sphere_grid(cells: u32) -> DensityGrid {
  let center = Vec3::splat(cells as f32 * 0.5);
  let radius = cells as f32 * 0.4;
  DensityGrid::from_fn([cells; 3], |x, y, z| {
    radius - Vec3::new(x as f32, y as f32, z as f32).distance(center)
  })
}

fn bench_sphere(c: &mut Criterion) {
  let mut group = c.benchmark_group("extract_sphere");

  for cells in [8u32, 16, 32] {
    let grid = sphere_grid(cells);
    group.throughput(Throughput::Elements((cells * cells * cells) as u64));

    group.bench_with_input(BenchmarkId::new("soup", cells), &grid, |b, grid| {
      let config = ExtractConfig::new(0.0);
      b.iter(|| black_box(extract_with(grid, &config).expect("valid grid")))
    });
    group.bench_with_input(BenchmarkId::new("welded", cells), &grid, |b, grid| {
      let config = ExtractConfig::new(0.0).with_weld_vertices(true);
      b.iter(|| black_box(extract_with(grid, &config).expect("valid grid")))
    });
  }

  group.finish();
}

fn bench_terrain_chunk(c: &mut Criterion) {
  let terrain = PlaneTerrain::new(NoiseParams::default()).expect("valid params");
  let grid = DensityGrid::build(Vec3::new(0.0, -8.0, 0.0), [16, 16, 16], &terrain).expect("finite density");
  let config = ExtractConfig::new(0.5);

  c.bench_function("extract_terrain_16", |b| {
    b.iter(|| black_box(extract_with(&grid, &config).expect("valid grid")))
  });
}

criterion_group!(benches, bench_sphere, bench_terrain_chunk);
criterion_main!(benches);
