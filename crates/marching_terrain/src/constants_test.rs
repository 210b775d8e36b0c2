use super::*;

#[test]
fn test_corner_offsets_are_unit_cube() {
  let mut seen = std::collections::HashSet::new();
  for offset in CORNER_OFFSETS {
    assert!(offset.iter().all(|&c| c <= 1), "Offset {:?} leaves the cell", offset);
    assert!(seen.insert(offset), "Duplicate corner offset {:?}", offset);
  }
  assert_eq!(seen.len(), CORNER_COUNT);
}

#[test]
fn test_corner_positions_match_offsets() {
  for (i, offset) in CORNER_OFFSETS.iter().enumerate() {
    let expected = Vec3::new(offset[0] as f32, offset[1] as f32, offset[2] as f32);
    assert_eq!(CORNER_POSITIONS[i], expected, "Corner {} mismatch", i);
  }
}

#[test]
fn test_corner_lattice() {
  assert_eq!(corner_lattice([3, 4, 5], 0), [3, 4, 5]);
  assert_eq!(corner_lattice([3, 4, 5], 2), [4, 5, 5]);
  assert_eq!(corner_lattice([3, 4, 5], 6), [4, 5, 6]);
  assert_eq!(corner_lattice([3, 4, 5], 7), [3, 5, 6]);
}

#[test]
fn test_row_width_holds_max_triangles() {
  assert!(MAX_TRIANGLES_PER_CELL * 3 < TRIANGLE_ROW_WIDTH);
}
