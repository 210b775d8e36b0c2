//! Benchmarks for density sampling - single points and full chunk grids.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use glam::Vec3;
use marching_terrain::{DensityGrid, NoiseMode, NoiseParams, PlaneTerrain};

const CHUNK: u32 = 16;
const LATTICE: u64 = ((CHUNK + 1) * (CHUNK + 1) * (CHUNK + 1)) as u64;

/// Octave count scaling for a single density evaluation.
fn bench_octaves(c: &mut Criterion) {
  let mut group = c.benchmark_group("density_octaves");

  for octaves in [1, 2, 4, 6, 8] {
    let params = NoiseParams::default().with_octaves(octaves, 0.5, 2.0);
    let terrain = PlaneTerrain::new(params).expect("valid params");

    group.bench_with_input(BenchmarkId::from_parameter(octaves), &octaves, |b, _| {
      let mut x = 0.0f32;
      b.iter(|| {
        x += 0.37;
        black_box(terrain.density(Vec3::new(x, 3.0, -x)).expect("bounded noise"))
      })
    });
  }

  group.finish();
}

/// Planar vs volumetric primitive over a full chunk lattice.
fn bench_grid_fill(c: &mut Criterion) {
  let mut group = c.benchmark_group("grid_fill_16");
  group.throughput(Throughput::Elements(LATTICE));

  for (name, mode) in [("planar", NoiseMode::Planar), ("volumetric", NoiseMode::Volumetric)] {
    let terrain = PlaneTerrain::new(NoiseParams::default().with_mode(mode)).expect("valid params");
    group.bench_function(name, |b| {
      b.iter(|| {
        let grid = DensityGrid::build(Vec3::new(32.0, -8.0, 64.0), [CHUNK; 3], &terrain).expect("finite density");
        black_box(grid)
      })
    });
  }

  group.finish();
}

criterion_group!(benches, bench_octaves, bench_grid_fill);
criterion_main!(benches);
