use super::*;
use crate::constants::{CORNER_OFFSETS, MAX_TRIANGLES_PER_CELL};

#[test]
fn test_homogeneous_configurations_are_empty() {
  assert_eq!(EDGE_TABLE[0], 0, "All below should have no edges");
  assert_eq!(EDGE_TABLE[255], 0, "All above should have no edges");
  assert_eq!(triangle_count(0), 0);
  assert_eq!(triangle_count(255), 0);
}

#[test]
fn test_single_corner_emits_one_triangle() {
  for corner in 0..8 {
    let config = 1u8 << corner;
    assert_eq!(
      triangle_count(config),
      1,
      "Corner {} alone should emit exactly one triangle",
      corner
    );
    assert_eq!(EDGE_TABLE[config as usize].count_ones(), 3);
  }
}

#[test]
fn test_rows_only_reference_crossing_edges() {
  for config in 0..=255u8 {
    let mask = EDGE_TABLE[config as usize];
    for tri in triangles(config) {
      for edge in tri {
        assert!(
          mask & (1 << edge) != 0,
          "Config {} references edge {} without a crossing",
          config,
          edge
        );
      }
    }
  }
}

#[test]
fn test_rows_cover_every_crossing_edge() {
  for config in 1..255u8 {
    let mut used = 0u16;
    for tri in triangles(config) {
      for edge in tri {
        used |= 1 << edge;
      }
    }
    assert_eq!(used, EDGE_TABLE[config as usize], "Config {} leaves a crossing unused", config);
  }
}

#[test]
fn test_rows_are_sentinel_terminated() {
  for (config, row) in TRI_TABLE.iter().enumerate() {
    let used = row.iter().take_while(|&&e| e != EDGE_SENTINEL).count();
    assert_eq!(used % 3, 0, "Config {} has a partial triangle", config);
    assert!(used / 3 <= MAX_TRIANGLES_PER_CELL);
    assert!(
      row[used..].iter().all(|&e| e == EDGE_SENTINEL),
      "Config {} has entries after its sentinel",
      config
    );
  }
}

#[test]
fn test_edge_endpoints_are_adjacent_corners() {
  for (edge, &[a, b]) in EDGE_ENDPOINTS.iter().enumerate() {
    let pa = CORNER_OFFSETS[a as usize];
    let pb = CORNER_OFFSETS[b as usize];
    let differing = (0..3).filter(|&axis| pa[axis] != pb[axis]).count();
    assert_eq!(differing, 1, "Edge {} does not follow a single axis", edge);
  }
}

#[test]
fn test_complement_crosses_same_edges() {
  for config in 0..128 {
    assert_eq!(EDGE_TABLE[config], EDGE_TABLE[255 - config]);
  }
}
